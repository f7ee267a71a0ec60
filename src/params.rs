//! Parameter records decoded from UCI `position` and `go` commands.

use std::time::Duration;

/// Parameters of a `go` command. Only `depth` and `movetime` steer the
/// search; the clock fields are accepted so GUIs can send them.
#[derive(Debug, Clone, Default)]
pub struct GoParams {
  pub depth: Option<i32>,
  pub movetime: Option<Duration>,
  pub wtime: Option<Duration>,
  pub btime: Option<Duration>,
  pub winc: Option<Duration>,
  pub binc: Option<Duration>,
  pub movestogo: Option<u32>,
  pub nodes: Option<u64>,
  pub mate: Option<u32>,
  pub infinite: bool,
}

/// Parameters of a `position` command: a FEN (or the starting position when
/// absent) plus UCI move strings to replay on top of it.
#[derive(Debug, Clone, Default)]
pub struct PositionParams {
  pub fen: Option<String>,
  pub moves: Vec<String>,
}
