use anyhow::{Context, Result};
use chess_core::{move_to_uci, set_position_from_uci, Clock, Color, FixedClock, Game, GameClock, GameState};
use classical_engine::{ClassicalEngine, EngineConfig};
use std::io::{self, BufRead, Write};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Path to an engine TOML config, read once at startup.
const CONFIG_ENV: &str = "ENGINE_CONFIG";

fn load_config() -> Result<EngineConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            let config = EngineConfig::load(&path)
                .with_context(|| format!("{CONFIG_ENV}={}", path.to_string_lossy()))?;
            info!(path = %path.to_string_lossy(), "loaded engine config");
            Ok(config)
        }
        None => Ok(EngineConfig::default()),
    }
}

/// Time arguments of a `go` command.
#[derive(Debug, Default, PartialEq, Eq)]
struct GoParams {
    wtime: Option<u64>,
    btime: Option<u64>,
    winc: Option<u64>,
    binc: Option<u64>,
    movetime: Option<u64>,
    infinite: bool,
}

impl GoParams {
    fn parse(args: &[&str]) -> Self {
        let mut params = GoParams::default();
        let mut i = 0;
        while i < args.len() {
            let value = args.get(i + 1).and_then(|v| v.parse::<u64>().ok());
            match args[i] {
                "wtime" => params.wtime = value,
                "btime" => params.btime = value,
                "winc" => params.winc = value,
                "binc" => params.binc = value,
                "movetime" => params.movetime = value,
                "infinite" => {
                    params.infinite = true;
                    i += 1;
                    continue;
                }
                _ => {
                    // depth, nodes, ... are not supported; skip the keyword only
                    i += 1;
                    continue;
                }
            }
            i += 2;
        }
        params
    }

    /// The clock the engine thinks against. It starts running immediately.
    fn clock_for(&self, side: Color) -> Box<dyn Clock> {
        if self.infinite {
            return Box::new(FixedClock::UNLIMITED);
        }
        let (time, inc) = match side {
            Color::White => (self.wtime, self.winc),
            Color::Black => (self.btime, self.binc),
        };
        let Some(ms) = self.movetime.or(time) else {
            return Box::new(FixedClock::UNLIMITED);
        };
        let mut clock = GameClock::with_increment(
            Duration::from_millis(ms),
            Duration::from_millis(inc.unwrap_or(0)),
        );
        clock.start_turn();
        Box::new(clock)
    }
}

fn setoption(config: &mut EngineConfig, parts: &[&str]) -> bool {
    // Example: setoption name Depth value 4
    let (Some(idx_name), Some(idx_val)) = (
        parts.iter().position(|&x| x == "name"),
        parts.iter().position(|&x| x == "value"),
    ) else {
        return false;
    };
    let (Some(name), Some(value)) = (parts.get(idx_name + 1), parts.get(idx_val + 1)) else {
        return false;
    };
    match *name {
        "Depth" => match value.parse::<u8>() {
            Ok(d) => {
                config.depth = d.clamp(1, 8);
                true
            }
            Err(_) => false,
        },
        "Pruning" => match value.parse::<bool>() {
            Ok(p) => {
                config.pruning = p;
                true
            }
            Err(_) => false,
        },
        _ => false,
    }
}

fn main() -> Result<()> {
    // stdout carries the protocol, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let mut config = load_config()?;
    let mut engine = ClassicalEngine::with_config(config.clone())?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut game = Game::startpos();

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "uci" => {
                writeln!(stdout, "id name MlChess Classical {}", env!("CARGO_PKG_VERSION"))?;
                writeln!(stdout, "id author ML-chess")?;
                writeln!(
                    stdout,
                    "option name Depth type spin default {} min 1 max 8",
                    config.depth
                )?;
                writeln!(
                    stdout,
                    "option name Pruning type check default {}",
                    config.pruning
                )?;
                writeln!(stdout, "uciok")?;
                stdout.flush()?;
            }
            "isready" => {
                writeln!(stdout, "readyok")?;
                stdout.flush()?;
            }
            "setoption" => {
                if setoption(&mut config, &parts) {
                    engine = ClassicalEngine::with_config(config.clone())?;
                } else {
                    warn!(%line, "ignored option");
                }
            }
            "ucinewgame" => {
                game = Game::startpos();
            }
            "position" => match set_position_from_uci(&parts[1..]) {
                Ok(g) => game = g,
                Err(e) => warn!(error = %e, "bad position command, keeping the old one"),
            },
            "go" => {
                let params = GoParams::parse(&parts[1..]);
                let clock = params.clock_for(game.side_to_move());
                match engine.choose_move(&mut game, clock.as_ref()) {
                    Ok(mv) => {
                        if let Some(report) = engine.last_report() {
                            writeln!(
                                stdout,
                                "info depth {} score cp {} nodes {} time {}",
                                report.depth,
                                report.score,
                                report.nodes,
                                report.elapsed.as_millis()
                            )?;
                        }
                        writeln!(stdout, "bestmove {}", move_to_uci(mv))?;
                    }
                    Err(e) => {
                        warn!(error = %e, "no move to play");
                        writeln!(stdout, "bestmove 0000")?; // no moves
                    }
                }
                stdout.flush()?;
            }
            "quit" => break,
            _ => {
                // ignore unknown commands
            }
        }
    }
    Ok(())
}
