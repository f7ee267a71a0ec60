//! Position: the mailbox board (64 squares), side to move, castling rights,
//! en-passant target and move counters, plus the make/unmake primitives and
//! Zobrist keying over the whole state.

use crate::move_gen::Move;
use crate::square::Square;
use crate::zobrist::ZOBRIST;
use crate::{color_idx, Color};

/// The logical kind of a chess piece (no color).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum PieceKind {
  Pawn,
  Knight,
  Bishop,
  Rook,
  Queen,
  King,
}

/// Map a `PieceKind` to its 0..=5 index (P=0, N=1, B=2, R=3, Q=4, K=5).
#[inline]
pub fn piece_kind_idx(pk: PieceKind) -> usize {
  match pk {
    PieceKind::Pawn => 0,
    PieceKind::Knight => 1,
    PieceKind::Bishop => 2,
    PieceKind::Rook => 3,
    PieceKind::Queen => 4,
    PieceKind::King => 5,
  }
}

/// A concrete piece on the board: its kind and color.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Piece {
  pub kind: PieceKind,
  pub color: Color,
}

// Castling-right bits.
pub const WHITE_KINGSIDE: u8 = 0b0001;
pub const WHITE_QUEENSIDE: u8 = 0b0010;
pub const BLACK_KINGSIDE: u8 = 0b0100;
pub const BLACK_QUEENSIDE: u8 = 0b1000;

/// Snapshot of every mutable non-placement field, taken before a move is
/// applied. Together with the move itself this restores the position
/// bit-exactly, including the Zobrist key.
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub struct Undo {
  pub piece_moved: Piece,
  pub castling: u8,
  pub ep: Option<Square>,
  pub halfmove_clock: u32,
  pub fullmove_number: u32,
  pub stm: Color,
  pub key: u64,
}

/// The board state: 64-square mailbox plus side to move, castling rights,
/// en-passant target and the halfmove/fullmove counters.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Position {
  pub squares: [Option<Piece>; 64],
  pub stm: Color,
  pub castling: u8, // bit 1=WK, 2=WQ, 4=BK, 8=BQ
  pub ep: Option<Square>,
  pub halfmove_clock: u32,
  pub fullmove_number: u32,
}

/// Square of the pawn removed by an en-passant capture landing on `to`:
/// one square behind `to` in the capturing side's forward direction.
fn ep_victim_square(to: Square, mover: Color) -> Square {
  let drow = match mover {
    Color::White => 1,
    Color::Black => -1,
  };
  to.offset_by(drow, 0).expect("en-passant target cannot be on an edge rank")
}

impl Position {
  /// Create an empty position (no pieces), side to move defaults to White.
  pub fn empty() -> Self {
    Self {
      squares: [None; 64],
      stm: Color::White,
      castling: 0,
      ep: None,
      halfmove_clock: 0,
      fullmove_number: 1,
    }
  }

  /// Return the piece at `sq`, if any.
  pub fn piece_at(&self, sq: Square) -> Option<Piece> {
    self.squares[sq.index() as usize]
  }

  /// Place `piece` on `sq`, replacing whatever was there.
  pub fn set_piece(&mut self, sq: Square, piece: Piece) {
    self.squares[sq.index() as usize] = Some(piece);
  }

  /// Remove any piece on `sq`.
  pub fn clear_piece(&mut self, sq: Square) {
    self.squares[sq.index() as usize] = None;
  }

  /// Locate the king square for the given color.
  pub fn king_square(&self, color: Color) -> Option<Square> {
    for i in 0..64u8 {
      if let Some(p) = self.squares[i as usize] {
        if p.kind == PieceKind::King && p.color == color {
          return Square::from_index(i);
        }
      }
    }
    None
  }

  /// Toggle side to move.
  pub fn toggle_stm(&mut self) {
    self.stm = self.stm.opposite();
  }

  /// Zobrist key of the current state: an XOR fold over occupied squares,
  /// set castling rights, the en-passant target and the side to move.
  /// Recomputed from scratch; the tables are seeded once per process, so
  /// equal states always hash equal within a run.
  pub fn zobrist_key(&self) -> u64 {
    let mut key = 0u64;
    for (i, square) in self.squares.iter().enumerate() {
      if let Some(p) = square {
        key ^= ZOBRIST.piece[color_idx(p.color)][piece_kind_idx(p.kind)][i];
      }
    }
    const RIGHTS: [u8; 4] = [WHITE_KINGSIDE, WHITE_QUEENSIDE, BLACK_KINGSIDE, BLACK_QUEENSIDE];
    for (i, right) in RIGHTS.iter().enumerate() {
      if self.castling & right != 0 {
        key ^= ZOBRIST.castling[i];
      }
    }
    if let Some(ep) = self.ep {
      key ^= ZOBRIST.en_passant[ep.index() as usize];
    }
    if self.stm == Color::White {
      key ^= ZOBRIST.white_to_move;
    }
    key
  }

  /// Apply `mv`, mutating the position in place. Returns an `Undo` record
  /// sufficient for `unmake` to restore the state.
  pub fn make(&mut self, mv: &Move) -> Undo {
    let piece = self.piece_at(mv.from).unwrap();

    let undo = Undo {
      piece_moved: piece,
      castling: self.castling,
      ep: self.ep,
      halfmove_clock: self.halfmove_clock,
      fullmove_number: self.fullmove_number,
      stm: self.stm,
      key: self.zobrist_key(),
    };

    self.clear_piece(mv.from);

    if mv.ep {
      self.clear_piece(ep_victim_square(mv.to, piece.color));
    }
    else if mv.captured.is_some() {
      self.clear_piece(mv.to);
    }

    if mv.castle.is_some() {
      // Kingside is identified by the g-file destination; move the rook too.
      let row = mv.from.row();
      let rook = Piece { kind: PieceKind::Rook, color: piece.color };
      if mv.to.file() == 6 {
        self.clear_piece(Square::from_row_file(row, 7).unwrap());
        self.set_piece(Square::from_row_file(row, 5).unwrap(), rook);
      }
      else {
        self.clear_piece(Square::from_row_file(row, 0).unwrap());
        self.set_piece(Square::from_row_file(row, 3).unwrap(), rook);
      }
    }

    match mv.promotion {
      Some(kind) => self.set_piece(mv.to, Piece { kind, color: piece.color }),
      None => self.set_piece(mv.to, piece),
    }

    self.update_castling_rights(piece, mv);

    // A double pawn push leaves the jumped-over square as the ep target.
    self.ep = None;
    if piece.kind == PieceKind::Pawn {
      let from = mv.from.index() as i16;
      let to = mv.to.index() as i16;
      if (to - from).abs() == 16 {
        self.ep = Square::from_index(((from + to) / 2) as u8);
      }
    }

    if piece.kind == PieceKind::Pawn || mv.captured.is_some() {
      self.halfmove_clock = 0;
    }
    else {
      self.halfmove_clock += 1;
    }

    self.toggle_stm();
    if self.stm == Color::White {
      // Black just moved.
      self.fullmove_number += 1;
    }

    undo
  }

  /// Revert a move previously applied with `make`. Scalar fields come back
  /// from the undo record; placement is reconstructed from the move.
  pub fn unmake(&mut self, mv: &Move, undo: &Undo) {
    self.stm = undo.stm;
    self.castling = undo.castling;
    self.ep = undo.ep;
    self.halfmove_clock = undo.halfmove_clock;
    self.fullmove_number = undo.fullmove_number;

    self.clear_piece(mv.to);

    if mv.castle.is_some() {
      let row = mv.from.row();
      let rook = Piece { kind: PieceKind::Rook, color: undo.piece_moved.color };
      if mv.to.file() == 6 {
        self.clear_piece(Square::from_row_file(row, 5).unwrap());
        self.set_piece(Square::from_row_file(row, 7).unwrap(), rook);
      }
      else {
        self.clear_piece(Square::from_row_file(row, 3).unwrap());
        self.set_piece(Square::from_row_file(row, 0).unwrap(), rook);
      }
    }

    // For promotions this puts the pawn back, not the promoted piece.
    self.set_piece(mv.from, undo.piece_moved);

    if mv.ep {
      if let Some(victim) = mv.captured {
        self.set_piece(ep_victim_square(mv.to, undo.piece_moved.color), victim);
      }
    }
    else if let Some(captured) = mv.captured {
      self.set_piece(mv.to, captured);
    }
  }

  /// Update castling rights after a move:
  /// - any king move clears both rights for that color;
  /// - any move leaving or landing on a rook home corner clears the
  ///   corresponding right (covers rook moves and rook captures alike).
  fn update_castling_rights(&mut self, piece: Piece, mv: &Move) {
    if piece.kind == PieceKind::King {
      match piece.color {
        Color::White => self.castling &= !(WHITE_KINGSIDE | WHITE_QUEENSIDE),
        Color::Black => self.castling &= !(BLACK_KINGSIDE | BLACK_QUEENSIDE),
      }
    }
    self.clear_corner_right(mv.from);
    self.clear_corner_right(mv.to);
  }

  fn clear_corner_right(&mut self, sq: Square) {
    match sq.index() {
      0 => self.castling &= !BLACK_QUEENSIDE,   // a8
      7 => self.castling &= !BLACK_KINGSIDE,    // h8
      56 => self.castling &= !WHITE_QUEENSIDE,  // a1
      63 => self.castling &= !WHITE_KINGSIDE,   // h1
      _ => {}
    }
  }
}
