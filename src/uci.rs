//! UCI shell over stdin/stdout.
//!
//! Supported commands:
//! - `uci` → id/author + `uciok`
//! - `isready` → `readyok`
//! - `ucinewgame` → reset board and search tables
//! - `position startpos [moves ...]` / `position fen <FEN> [moves ...]`
//! - `go [depth N] [movetime MS] [wtime|btime|winc|binc MS] [movestogo N]
//!   [nodes N] [mate N] [infinite]` → background search, `bestmove` on
//!   completion; unknown sub-tokens are ignored, default depth is 5
//! - `go perft N` → node count with timing
//! - `stop` / `quit`
//! - `debug`, `setoption`, `register`, `ponderhit` → accepted with a stub
//!
//! Unknown commands are logged to stderr and ignored.

use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use crate::engine::Engine;
use crate::params::{GoParams, PositionParams};
use crate::perft::perft;

pub const ENGINE_NAME: &str = "Sable";
pub const ENGINE_AUTHOR: &str = "the Sable developers";

/// The UCI front end. Owns the engine and translates protocol lines into
/// engine operations.
pub struct UciEngine {
  engine: Engine,
}

impl UciEngine {
  pub fn new() -> Self {
    UciEngine { engine: Engine::new() }
  }

  /// Main read-eval-print loop over stdin/stdout. Returns on `quit` or EOF.
  pub fn run_stdio(&mut self) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
      let Ok(line) = line else { break }; // EOF or error ends the loop
      let line = line.trim();
      if line.is_empty() {
        continue;
      }
      if self.handle_line(line, &mut stdout) {
        break;
      }
    }
  }

  /// Handle a single UCI command line. Returns true if we should quit.
  pub fn handle_line(&mut self, line: &str, out: &mut dyn Write) -> bool {
    let mut it = line.split_whitespace();
    let Some(cmd) = it.next() else { return false };
    let rest: Vec<&str> = it.collect();
    match cmd {
      "uci" => {
        writeln!(out, "id name {}", ENGINE_NAME).ok();
        writeln!(out, "id author {}", ENGINE_AUTHOR).ok();
        writeln!(out, "uciok").ok();
        out.flush().ok();
      }
      "isready" => {
        writeln!(out, "readyok").ok();
        out.flush().ok();
      }
      "ucinewgame" => {
        self.engine.new_game();
      }
      "position" => {
        let params = parse_position_params(&rest);
        if let Err(e) = self.engine.set_position(&params) {
          eprintln!("position rejected: {}", e);
        }
      }
      "go" => {
        self.handle_go(&rest, out);
      }
      "stop" => {
        self.engine.stop();
      }
      "quit" => {
        return true;
      }
      "debug" | "setoption" | "register" | "ponderhit" => {
        writeln!(out, "info string {} ignored", cmd).ok();
        out.flush().ok();
      }
      _ => {
        eprintln!("Unknown command: {}", line);
      }
    }
    false
  }

  fn handle_go(&mut self, tokens: &[&str], out: &mut dyn Write) {
    // `go perft N` runs synchronously; everything else goes to the worker.
    if tokens.len() >= 2 && tokens[0] == "perft" {
      if let Ok(depth) = tokens[1].parse::<u32>() {
        let start = Instant::now();
        let nodes = perft(self.engine.board(), depth);
        let elapsed = start.elapsed();
        writeln!(
          out,
          "nodes {} time {} ms nps {}",
          nodes,
          elapsed.as_millis(),
          (nodes as f64 / elapsed.as_secs_f64()) as u64
        )
        .ok();
        out.flush().ok();
        return;
      }
    }
    let params = parse_go_params(tokens);
    self.engine.go(&params);
  }
}

impl Default for UciEngine {
  fn default() -> Self {
    Self::new()
  }
}

/// Parse the tokens following `position`.
pub fn parse_position_params(tokens: &[&str]) -> PositionParams {
  let mut params = PositionParams::default();
  if tokens.is_empty() {
    return params;
  }
  let mut i = 1;
  if tokens[0] == "fen" {
    let mut fen = String::new();
    while i < tokens.len() && tokens[i] != "moves" {
      if !fen.is_empty() {
        fen.push(' ');
      }
      fen.push_str(tokens[i]);
      i += 1;
    }
    params.fen = Some(fen);
  }
  if i < tokens.len() && tokens[i] == "moves" {
    params.moves = tokens[i + 1..].iter().map(|m| m.to_string()).collect();
  }
  params
}

/// Parse the tokens following `go`. Unknown sub-tokens are ignored.
pub fn parse_go_params(tokens: &[&str]) -> GoParams {
  fn value<T: std::str::FromStr>(tokens: &[&str], i: usize) -> Option<T> {
    tokens.get(i).and_then(|t| t.parse().ok())
  }
  fn millis(tokens: &[&str], i: usize) -> Option<Duration> {
    value::<u64>(tokens, i).map(Duration::from_millis)
  }

  let mut params = GoParams::default();
  let mut i = 0;
  while i < tokens.len() {
    match tokens[i] {
      "infinite" => params.infinite = true,
      "depth" => {
        i += 1;
        params.depth = value(tokens, i).or(params.depth);
      }
      "movetime" => {
        i += 1;
        params.movetime = millis(tokens, i).or(params.movetime);
      }
      "wtime" => {
        i += 1;
        params.wtime = millis(tokens, i).or(params.wtime);
      }
      "btime" => {
        i += 1;
        params.btime = millis(tokens, i).or(params.btime);
      }
      "winc" => {
        i += 1;
        params.winc = millis(tokens, i).or(params.winc);
      }
      "binc" => {
        i += 1;
        params.binc = millis(tokens, i).or(params.binc);
      }
      "movestogo" => {
        i += 1;
        params.movestogo = value(tokens, i).or(params.movestogo);
      }
      "nodes" => {
        i += 1;
        params.nodes = value(tokens, i).or(params.nodes);
      }
      "mate" => {
        i += 1;
        params.mate = value(tokens, i).or(params.mate);
      }
      _ => {}
    }
    i += 1;
  }
  params
}

#[cfg(test)]
mod tests {
  use super::*;

  fn run(engine: &mut UciEngine, line: &str) -> String {
    let mut out = Vec::new();
    engine.handle_line(line, &mut out);
    String::from_utf8(out).unwrap()
  }

  #[test]
  fn uci_handshake() {
    let mut engine = UciEngine::new();
    let out = run(&mut engine, "uci");
    assert!(out.contains("id name Sable"));
    assert!(out.contains("id author"));
    assert!(out.ends_with("uciok\n"));
  }

  #[test]
  fn isready_answers_readyok() {
    let mut engine = UciEngine::new();
    assert_eq!(run(&mut engine, "isready"), "readyok\n");
  }

  #[test]
  fn quit_terminates_the_loop() {
    let mut engine = UciEngine::new();
    let mut out = Vec::new();
    assert!(engine.handle_line("quit", &mut out));
    assert!(!engine.handle_line("isready", &mut out));
  }

  #[test]
  fn stub_commands_are_accepted() {
    let mut engine = UciEngine::new();
    let out = run(&mut engine, "setoption name Hash value 32");
    assert!(out.contains("info string"));
  }

  #[test]
  fn go_perft_counts_startpos_nodes() {
    let mut engine = UciEngine::new();
    run(&mut engine, "position startpos");
    let out = run(&mut engine, "go perft 2");
    assert!(out.starts_with("nodes 400 "), "unexpected perft output: {}", out);
  }

  #[test]
  fn position_then_go_then_stop_roundtrip() {
    let mut engine = UciEngine::new();
    run(&mut engine, "position fen 4k3/8/4K3/8/8/8/8/7R w - - 0 1");
    run(&mut engine, "go depth 2");
    run(&mut engine, "stop");
  }

  #[test]
  fn parse_position_startpos_with_moves() {
    let params = parse_position_params(&["startpos", "moves", "e2e4", "e7e5"]);
    assert_eq!(params.fen, None);
    assert_eq!(params.moves, vec!["e2e4".to_string(), "e7e5".to_string()]);
  }

  #[test]
  fn parse_position_fen_with_moves() {
    let tokens = [
      "fen", "4k3/8/4K3/8/8/8/8/7R", "w", "-", "-", "0", "1", "moves", "h1h8",
    ];
    let params = parse_position_params(&tokens);
    assert_eq!(params.fen.as_deref(), Some("4k3/8/4K3/8/8/8/8/7R w - - 0 1"));
    assert_eq!(params.moves, vec!["h1h8".to_string()]);
  }

  #[test]
  fn parse_go_depth_and_movetime() {
    let params = parse_go_params(&["depth", "7", "movetime", "1500"]);
    assert_eq!(params.depth, Some(7));
    assert_eq!(params.movetime, Some(Duration::from_millis(1500)));
    assert!(!params.infinite);
  }

  #[test]
  fn parse_go_clock_fields() {
    let params = parse_go_params(&[
      "wtime", "300000", "btime", "295000", "winc", "2000", "binc", "2000", "movestogo", "40",
    ]);
    assert_eq!(params.wtime, Some(Duration::from_millis(300_000)));
    assert_eq!(params.btime, Some(Duration::from_millis(295_000)));
    assert_eq!(params.winc, Some(Duration::from_millis(2000)));
    assert_eq!(params.binc, Some(Duration::from_millis(2000)));
    assert_eq!(params.movestogo, Some(40));
  }

  #[test]
  fn parse_go_ignores_unknown_tokens() {
    let params = parse_go_params(&["ponder", "depth", "3", "frobnicate", "9"]);
    assert_eq!(params.depth, Some(3));
  }

  #[test]
  fn parse_go_infinite_and_limits() {
    let params = parse_go_params(&["infinite", "nodes", "100000", "mate", "2"]);
    assert!(params.infinite);
    assert_eq!(params.nodes, Some(100_000));
    assert_eq!(params.mate, Some(2));
  }
}
