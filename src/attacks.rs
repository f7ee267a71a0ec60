//! Attack detection: is a square attacked by a given color?
//! Scans outward from the square (pawn origin squares, knight and king
//! deltas, slider rays), so the cost does not depend on how many pieces the
//! attacker has. All stepping goes through `Square::offset_by`, which makes
//! board-edge wrap impossible by construction.

use crate::position::{Piece, PieceKind, Position};
use crate::square::Square;
use crate::Color;

pub const KNIGHT_DELTAS: [(i8, i8); 8] = [
  (-2, -1), (-2, 1), (-1, -2), (-1, 2),
  (1, -2), (1, 2), (2, -1), (2, 1),
];

pub const KING_DELTAS: [(i8, i8); 8] = [
  (-1, -1), (-1, 0), (-1, 1), (0, -1),
  (0, 1), (1, -1), (1, 0), (1, 1),
];

pub const BISHOP_DIRS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub const ROOK_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

impl Position {
  /// Returns true iff `sq` is attacked by any piece of color `by`.
  pub fn is_square_attacked_by(&self, sq: Square, by: Color) -> bool {
    // Pawns: the two squares a pawn of `by` would capture from. A white
    // pawn captures moving up the board (row decreasing), so it attacks
    // from one row below `sq`.
    let pawn_drow = match by {
      Color::White => 1,
      Color::Black => -1,
    };
    for dfile in [-1, 1] {
      if let Some(from) = sq.offset_by(pawn_drow, dfile) {
        if self.piece_at(from) == Some(Piece { kind: PieceKind::Pawn, color: by }) {
          return true;
        }
      }
    }

    for &(drow, dfile) in KNIGHT_DELTAS.iter() {
      if let Some(from) = sq.offset_by(drow, dfile) {
        if self.piece_at(from) == Some(Piece { kind: PieceKind::Knight, color: by }) {
          return true;
        }
      }
    }

    for &(drow, dfile) in KING_DELTAS.iter() {
      if let Some(from) = sq.offset_by(drow, dfile) {
        if self.piece_at(from) == Some(Piece { kind: PieceKind::King, color: by }) {
          return true;
        }
      }
    }

    if self.ray_hits(sq, &BISHOP_DIRS, PieceKind::Bishop, by) {
      return true;
    }
    if self.ray_hits(sq, &ROOK_DIRS, PieceKind::Rook, by) {
      return true;
    }

    false
  }

  // The first occupied square along each ray attacks iff it holds `slider`
  // or a queen of color `by`.
  fn ray_hits(&self, sq: Square, dirs: &[(i8, i8); 4], slider: PieceKind, by: Color) -> bool {
    for &(drow, dfile) in dirs.iter() {
      let mut current = sq;
      while let Some(next) = current.offset_by(drow, dfile) {
        if let Some(p) = self.piece_at(next) {
          if p.color == by && (p.kind == slider || p.kind == PieceKind::Queen) {
            return true;
          }
          break;
        }
        current = next;
      }
    }
    false
  }

  /// Is `color`'s king currently attacked?
  pub fn in_check(&self, color: Color) -> bool {
    match self.king_square(color) {
      Some(king_sq) => self.is_square_attacked_by(king_sq, color.opposite()),
      None => false,
    }
  }
}
