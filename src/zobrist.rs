//! Zobrist hashing tables, filled with random values exactly once per
//! process. Any position hashed twice in the same run gets the same key.

use once_cell::sync::Lazy;
use rand::Rng;

pub struct ZobristTables {
  /// One value per (color, piece kind, square).
  pub piece: [[[u64; 64]; 6]; 2],
  /// One value per castling right: WK, WQ, BK, BQ.
  pub castling: [u64; 4],
  /// One value per possible en-passant target square.
  pub en_passant: [u64; 64],
  /// XORed in when White is to move.
  pub white_to_move: u64,
}

pub static ZOBRIST: Lazy<ZobristTables> = Lazy::new(|| {
  let mut rng = rand::thread_rng();

  let mut piece = [[[0u64; 64]; 6]; 2];
  for side in piece.iter_mut() {
    for kind in side.iter_mut() {
      for sq in kind.iter_mut() {
        *sq = rng.gen();
      }
    }
  }

  let mut castling = [0u64; 4];
  for v in castling.iter_mut() {
    *v = rng.gen();
  }

  let mut en_passant = [0u64; 64];
  for v in en_passant.iter_mut() {
    *v = rng.gen();
  }

  ZobristTables {
    piece,
    castling,
    en_passant,
    white_to_move: rng.gen(),
  }
});
