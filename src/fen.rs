//! FEN decoding: the six mandatory fields (piece placement, active color,
//! castling rights, en-passant target, halfmove clock, fullmove number).
//! A malformed string yields an error and no position; callers keep their
//! previous board.

use thiserror::Error;

use crate::position::{
  Piece, PieceKind, Position, BLACK_KINGSIDE, BLACK_QUEENSIDE, WHITE_KINGSIDE, WHITE_QUEENSIDE,
};
use crate::square::Square;
use crate::Color;

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
  #[error("FEN needs at least 6 whitespace-separated fields, got {0}")]
  FieldCount(usize),
  #[error("bad piece placement '{0}'")]
  Placement(String),
  #[error("bad side to move '{0}'")]
  SideToMove(String),
  #[error("bad castling rights '{0}'")]
  CastlingRights(String),
  #[error("bad en-passant target '{0}'")]
  EnPassantTarget(String),
  #[error("bad halfmove clock '{0}'")]
  HalfmoveClock(String),
  #[error("bad fullmove number '{0}'")]
  FullmoveNumber(String),
}

/// Decode a FEN string into a fresh `Position`.
///
/// Expectations:
/// - Field 1 holds exactly 8 ranks separated by `/`, each summing to 8 files.
/// - Field 2 is `w` or `b`; field 3 a subset of `KQkq` or `-`; field 4 an
///   algebraic square or `-`; fields 5 and 6 are non-negative integers.
pub fn fen_parser(fen: &str) -> Result<Position, FenError> {
  let fields: Vec<&str> = fen.split_whitespace().collect();
  if fields.len() < 6 {
    return Err(FenError::FieldCount(fields.len()));
  }

  let mut position = Position::empty();

  let ranks: Vec<&str> = fields[0].split('/').collect();
  if ranks.len() != 8 {
    return Err(FenError::Placement(fields[0].to_string()));
  }
  for (row, rank_data) in ranks.iter().enumerate() {
    let mut file: u8 = 0;
    for c in rank_data.chars() {
      if let Some(skip) = c.to_digit(10) {
        if skip == 0 || skip > 8 {
          return Err(FenError::Placement(fields[0].to_string()));
        }
        file = file.saturating_add(skip as u8);
      }
      else {
        let piece = char_to_piece(c).ok_or_else(|| FenError::Placement(fields[0].to_string()))?;
        let sq = Square::from_row_file(row as u8, file)
          .ok_or_else(|| FenError::Placement(fields[0].to_string()))?;
        position.set_piece(sq, piece);
        file += 1;
      }
      if file > 8 {
        return Err(FenError::Placement(fields[0].to_string()));
      }
    }
    if file != 8 {
      return Err(FenError::Placement(fields[0].to_string()));
    }
  }

  position.stm = match fields[1] {
    "w" => Color::White,
    "b" => Color::Black,
    other => return Err(FenError::SideToMove(other.to_string())),
  };

  if fields[2] != "-" {
    for c in fields[2].chars() {
      match c {
        'K' => position.castling |= WHITE_KINGSIDE,
        'Q' => position.castling |= WHITE_QUEENSIDE,
        'k' => position.castling |= BLACK_KINGSIDE,
        'q' => position.castling |= BLACK_QUEENSIDE,
        _ => return Err(FenError::CastlingRights(fields[2].to_string())),
      }
    }
  }

  position.ep = match fields[3] {
    "-" => None,
    s => Some(
      Square::from_algebraic(s).ok_or_else(|| FenError::EnPassantTarget(s.to_string()))?,
    ),
  };

  position.halfmove_clock = fields[4]
    .parse()
    .map_err(|_| FenError::HalfmoveClock(fields[4].to_string()))?;

  position.fullmove_number = fields[5]
    .parse()
    .map_err(|_| FenError::FullmoveNumber(fields[5].to_string()))?;

  Ok(position)
}

fn char_to_piece(c: char) -> Option<Piece> {
  let (kind, color) = match c {
    'P' => (PieceKind::Pawn, Color::White),
    'N' => (PieceKind::Knight, Color::White),
    'B' => (PieceKind::Bishop, Color::White),
    'R' => (PieceKind::Rook, Color::White),
    'Q' => (PieceKind::Queen, Color::White),
    'K' => (PieceKind::King, Color::White),
    'p' => (PieceKind::Pawn, Color::Black),
    'n' => (PieceKind::Knight, Color::Black),
    'b' => (PieceKind::Bishop, Color::Black),
    'r' => (PieceKind::Rook, Color::Black),
    'q' => (PieceKind::Queen, Color::Black),
    'k' => (PieceKind::King, Color::Black),
    _ => return None,
  };
  Some(Piece { kind, color })
}

/// The standard initial position.
pub fn startpos() -> Position {
  fen_parser(STARTPOS_FEN).expect("startpos FEN must parse")
}
