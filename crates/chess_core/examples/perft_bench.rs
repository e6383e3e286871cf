//! Perft benchmark for profiling the board adapter with cargo-flamegraph.
//!
//! Usage:
//!   cargo flamegraph --example perft_bench -p chess_core -- [depth] [fen]
//!
//! Examples:
//!   # Default: depth 5 from starting position
//!   cargo flamegraph --example perft_bench -p chess_core
//!
//!   # Custom depth and position (Kiwipete - complex middlegame)
//!   cargo flamegraph --example perft_bench -p chess_core -- 4 "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -"

use chess_core::{perft, Game, STARTPOS_FEN};
use std::env;
use std::process::ExitCode;
use std::time::Instant;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let depth: u8 = args.first().and_then(|d| d.parse().ok()).unwrap_or(5);
    let fen = args.get(1).map(String::as_str).unwrap_or(STARTPOS_FEN);

    let mut game = match Game::from_fen(fen) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    println!("Perft depth {depth} on {fen}");
    let start = Instant::now();
    let nodes = perft(&mut game, depth);
    let elapsed = start.elapsed();
    println!(
        "{nodes} nodes in {elapsed:.3?} ({:.2} Mn/s)",
        (nodes as f64 / 1_000_000.0) / elapsed.as_secs_f64()
    );
    ExitCode::SUCCESS
}
