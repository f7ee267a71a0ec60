//! Material-only evaluation in centipawns.

use crate::position::{PieceKind, Position};
use crate::Color;

const P: i32 = 100;
const N: i32 = 320;
const B: i32 = 330;
const R: i32 = 500;
const Q: i32 = 900;

fn material(pos: &Position, color: Color) -> i32 {
  let mut score = 0;
  for square in pos.squares.iter() {
    let Some(piece) = square else { continue };
    if piece.color != color {
      continue;
    }
    score += match piece.kind {
      PieceKind::Pawn => P,
      PieceKind::Knight => N,
      PieceKind::Bishop => B,
      PieceKind::Rook => R,
      PieceKind::Queen => Q,
      PieceKind::King => 0, // both kings are always present; they cancel
    };
  }
  score
}

/// Material balance from the side to move's perspective.
pub fn eval(pos: &Position) -> i32 {
  let white = material(pos, Color::White);
  let black = material(pos, Color::Black);
  match pos.stm {
    Color::White => white - black,
    Color::Black => black - white,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fen::{fen_parser, startpos};

  #[test]
  fn startpos_is_balanced() {
    assert_eq!(eval(&startpos()), 0);
  }

  #[test]
  fn eval_is_side_to_move_relative() {
    let white_up = fen_parser("4k3/8/8/8/8/8/8/QQ2K3 w - - 0 1").unwrap();
    assert_eq!(eval(&white_up), 2 * 900);
    let black_view = fen_parser("4k3/8/8/8/8/8/8/QQ2K3 b - - 0 1").unwrap();
    assert_eq!(eval(&black_view), -2 * 900);
  }

  #[test]
  fn piece_values_sum() {
    let pos = fen_parser("4k3/8/8/8/8/8/8/RNBQK3 w - - 0 1").unwrap();
    assert_eq!(eval(&pos), 500 + 320 + 330 + 900);
  }
}
