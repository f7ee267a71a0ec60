//! Transposition table: a flat map from Zobrist key to the result of a
//! completed node, with an always-replace store policy. Owned by the search
//! and only ever touched from the worker thread.

use rustc_hash::FxHashMap;

use crate::move_gen::Move;

/// How the stored value bounds the true score of the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
  Exact,
  LowerBound,
  UpperBound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtEntry {
  pub key: u64,
  pub depth: i32,
  pub value: i32,
  pub kind: NodeKind,
  pub best_move: Move,
}

#[derive(Debug, Default)]
pub struct TranspositionTable {
  table: FxHashMap<u64, TtEntry>,
}

impl TranspositionTable {
  pub fn new() -> Self {
    TranspositionTable { table: FxHashMap::default() }
  }

  /// Look up a stored entry. Key equality is the only validation.
  pub fn probe(&self, key: u64) -> Option<TtEntry> {
    self.table.get(&key).copied()
  }

  /// Store unconditionally, replacing any previous entry for the key.
  pub fn store(&mut self, key: u64, value: i32, kind: NodeKind, depth: i32, best_move: Move) {
    self.table.insert(key, TtEntry { key, depth, value, kind, best_move });
  }

  /// Drop all entries.
  pub fn clear(&mut self) {
    self.table.clear();
  }

  pub fn len(&self) -> usize {
    self.table.len()
  }

  pub fn is_empty(&self) -> bool {
    self.table.is_empty()
  }
}
