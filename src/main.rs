use sable::uci::UciEngine;

fn main() {
  let mut eng = UciEngine::new();
  eng.run_stdio();
}
