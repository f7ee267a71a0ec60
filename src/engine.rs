//! Engine façade: owns the position, spawns a search worker on `go`, and
//! joins it on `stop`. The worker prints exactly one `bestmove` line per
//! search (`bestmove 0000` when no legal move exists).

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use thiserror::Error;

use crate::fen::{fen_parser, startpos, FenError};
use crate::move_gen::{Move, MoveGen};
use crate::params::{GoParams, PositionParams};
use crate::position::{PieceKind, Position};
use crate::search::Search;
use crate::square::Square;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
  #[error(transparent)]
  Fen(#[from] FenError),
  #[error("malformed move string '{0}'")]
  BadMoveString(String),
  #[error("illegal move '{0}' for the current position")]
  IllegalMove(String),
}

pub struct Engine {
  board: Position,
  search: Arc<Mutex<Search>>,
  stop_requested: Arc<AtomicBool>,
  search_thread: Option<JoinHandle<()>>,
  best_move: Arc<Mutex<Option<Move>>>,
}

impl Engine {
  pub fn new() -> Self {
    Engine {
      board: startpos(),
      search: Arc::new(Mutex::new(Search::new())),
      stop_requested: Arc::new(AtomicBool::new(false)),
      search_thread: None,
      best_move: Arc::new(Mutex::new(None)),
    }
  }

  pub fn board(&self) -> &Position {
    &self.board
  }

  /// Load a position (startpos or FEN) and replay the listed UCI moves by
  /// resolving each against the legal moves of the running position. The
  /// previous board is kept whenever anything fails.
  pub fn set_position(&mut self, params: &PositionParams) -> Result<(), PositionError> {
    let mut board = match &params.fen {
      Some(fen) => fen_parser(fen)?,
      None => startpos(),
    };
    for mv_str in &params.moves {
      let mv = find_legal_move(&board, mv_str)?;
      board.make(&mv);
    }
    self.board = board;
    Ok(())
  }

  /// Launch a search worker. Any in-flight search is stopped first, so at
  /// most one worker exists at a time.
  pub fn go(&mut self, params: &GoParams) {
    self.stop();
    self.stop_requested.store(false, Ordering::Relaxed);

    let mut board = self.board;
    let depth = params.depth.unwrap_or(5);
    let movetime = params.movetime;
    let stop = Arc::clone(&self.stop_requested);
    let search = Arc::clone(&self.search);
    let best_move = Arc::clone(&self.best_move);

    self.search_thread = Some(thread::spawn(move || {
      let result = search
        .lock()
        .unwrap()
        .find_best_move(&mut board, depth, &stop, movetime);
      *best_move.lock().unwrap() = result;
      match result {
        Some(mv) => println!("bestmove {}", mv),
        None => println!("bestmove 0000"),
      }
      io::stdout().flush().ok();
    }));
  }

  /// Request cancellation and wait for the worker to finish. Idempotent;
  /// calling it with no active search is a no-op.
  pub fn stop(&mut self) {
    self.stop_requested.store(true, Ordering::Relaxed);
    if let Some(handle) = self.search_thread.take() {
      let _ = handle.join();
    }
  }

  /// Reset for a new game: stop any worker, restore the starting position
  /// and drop the cached search state.
  pub fn new_game(&mut self) {
    self.stop();
    self.board = startpos();
    self.search.lock().unwrap().clear_tables();
  }

  /// The move published by the most recently finished search.
  pub fn best_move(&self) -> Option<Move> {
    *self.best_move.lock().unwrap()
  }
}

impl Drop for Engine {
  fn drop(&mut self) {
    self.stop();
  }
}

impl Default for Engine {
  fn default() -> Self {
    Self::new()
  }
}

/// Resolve a UCI move string (`e2e4`, `a7a8q`) against the legal moves of
/// `board`.
fn find_legal_move(board: &Position, mv_str: &str) -> Result<Move, PositionError> {
  let bad = || PositionError::BadMoveString(mv_str.to_string());
  if !mv_str.is_ascii() || mv_str.len() < 4 || mv_str.len() > 5 {
    return Err(bad());
  }
  let from = Square::from_algebraic(&mv_str[0..2]).ok_or_else(bad)?;
  let to = Square::from_algebraic(&mv_str[2..4]).ok_or_else(bad)?;
  let promotion = match mv_str.as_bytes().get(4) {
    None => None,
    Some(b'q') => Some(PieceKind::Queen),
    Some(b'r') => Some(PieceKind::Rook),
    Some(b'b') => Some(PieceKind::Bishop),
    Some(b'n') => Some(PieceKind::Knight),
    Some(_) => return Err(bad()),
  };

  board
    .legal_moves()
    .into_iter()
    .find(|m| m.from == from && m.to == to && m.promotion == promotion)
    .ok_or_else(|| PositionError::IllegalMove(mv_str.to_string()))
}
