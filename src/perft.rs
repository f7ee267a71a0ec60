//! Perft: counted enumeration of legal move sequences, the reference check
//! for generator and make/unmake correctness.

use crate::move_gen::MoveGen;
use crate::position::Position;

/// Count legal move leaf nodes to a given depth.
/// perft(pos, 0) = 1; for d>0, sum perft(child, d-1) over all legal moves.
pub fn perft(pos: &Position, depth: u32) -> u64 {
  if depth == 0 {
    return 1;
  }
  let mut clone = *pos;
  let moves = clone.legal_moves();
  if depth == 1 {
    return moves.len() as u64;
  }
  let mut nodes = 0;
  for mv in moves {
    let undo = clone.make(&mv);
    nodes += perft(&clone, depth - 1);
    clone.unmake(&mv, &undo);
  }
  nodes
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fen::{fen_parser, startpos};

  const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
  const TALKCHESS: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

  #[test]
  fn perft_depth0_is_one() {
    assert_eq!(perft(&startpos(), 0), 1);
  }

  #[test]
  fn startpos_perft_depth1() {
    assert_eq!(perft(&startpos(), 1), 20);
  }

  #[test]
  fn startpos_perft_depth2() {
    assert_eq!(perft(&startpos(), 2), 400);
  }

  #[test]
  fn startpos_perft_depth3() {
    assert_eq!(perft(&startpos(), 3), 8_902);
  }

  #[test]
  fn startpos_perft_depth4() {
    assert_eq!(perft(&startpos(), 4), 197_281);
  }

  #[test]
  #[ignore]
  fn startpos_perft_depth5() {
    assert_eq!(perft(&startpos(), 5), 4_865_609);
  }

  // Kiwipete exercises castling, en passant and promotion interactions.
  #[test]
  fn kiwipete_perft_depth1() {
    let pos = fen_parser(KIWIPETE).unwrap();
    assert_eq!(perft(&pos, 1), 48);
  }

  #[test]
  fn kiwipete_perft_depth2() {
    let pos = fen_parser(KIWIPETE).unwrap();
    assert_eq!(perft(&pos, 2), 2_039);
  }

  #[test]
  #[ignore]
  fn kiwipete_perft_depth3() {
    let pos = fen_parser(KIWIPETE).unwrap();
    assert_eq!(perft(&pos, 3), 97_862);
  }

  #[test]
  fn talkchess_perft_depth1() {
    let pos = fen_parser(TALKCHESS).unwrap();
    assert_eq!(perft(&pos, 1), 44);
  }

  #[test]
  fn talkchess_perft_depth2() {
    let pos = fen_parser(TALKCHESS).unwrap();
    assert_eq!(perft(&pos, 2), 1_486);
  }

  // Make/unmake must restore the position exactly along every perft path;
  // a corrupt unmake shows up as a wrong node count above, and this pins
  // the state itself on a smaller corpus.
  #[test]
  fn make_unmake_roundtrips_over_kiwipete_moves() {
    let pos = fen_parser(KIWIPETE).unwrap();
    let mut scratch = pos;
    for mv in pos.legal_moves() {
      let undo = scratch.make(&mv);
      assert_ne!(scratch.zobrist_key(), undo.key, "a move must change the key");
      scratch.unmake(&mv, &undo);
      assert_eq!(scratch, pos, "unmake failed for {}", mv);
      assert_eq!(scratch.zobrist_key(), undo.key);
    }
  }

  #[test]
  fn transpositions_hash_equal() {
    // Nf3/Nc3 and Nc3/Nf3 reach the same position by different orders.
    let mut a = startpos();
    let mut b = startpos();
    for mv_str in ["g1f3", "b8c6", "b1c3"] {
      let mv = a.legal_moves().into_iter().find(|m| m.to_string() == mv_str).unwrap();
      a.make(&mv);
    }
    for mv_str in ["b1c3", "b8c6", "g1f3"] {
      let mv = b.legal_moves().into_iter().find(|m| m.to_string() == mv_str).unwrap();
      b.make(&mv);
    }
    assert_eq!(a.zobrist_key(), b.zobrist_key());
    // The full-move counters are irrelevant to the key, the placement is not.
    let c = startpos();
    assert_ne!(a.zobrist_key(), c.zobrist_key());
  }
}
