//! Tournament Runner for ML-chess
//!
//! This crate provides infrastructure for:
//! - Playing games between two engines on per-side chess clocks
//! - Detecting how each game ended (mate, draw, flag, illegal move, move cap)
//! - Saving match results as JSON
//!
//! # Usage
//!
//! ```bash
//! # Ten games of classical against greedy, one minute each plus 100ms
//! cargo run -p tournament -- match classical greedy --games 10 --time 60000 --inc 100
//!
//! # Classical with a tuned config against random, results to disk
//! cargo run -p tournament -- match classical:tuned.toml random --out results.json
//! ```

mod match_runner;
mod results;

pub use match_runner::*;
pub use results::*;
