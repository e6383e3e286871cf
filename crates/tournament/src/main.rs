//! Tournament CLI
//!
//! Run matches between engines on real clocks and report the results.

use anyhow::{bail, Context, Result};
use chess_core::{Engine, STARTPOS_FEN};
use classical_engine::{ClassicalEngine, EngineConfig};
use greedy_engine::GreedyEngine;
use random_engine::RandomEngine;
use std::env;
use std::path::Path;
use std::time::Duration;
use tournament::{MatchConfig, MatchRunner};
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("ML-chess Tournament Runner");
    println!();
    println!("Usage:");
    println!("  tournament match <engine1> <engine2> [options]");
    println!();
    println!("Options:");
    println!("  --games N       games to play (default 10)");
    println!("  --time MS       starting clock per side (default 60000)");
    println!("  --inc MS        increment per move (default 0)");
    println!("  --max-plies N   adjudicate a draw after N plies (default 400)");
    println!("  --fen FEN       start every game from FEN");
    println!("  --out FILE      write results as JSON");
    println!();
    println!("Engines:");
    println!("  classical            - Negamax with alpha-beta, default config");
    println!("  classical:FILE.toml  - Negamax with alpha-beta, config from FILE");
    println!("  greedy               - Mate in one, else biggest capture");
    println!("  random               - Uniform random legal move");
    println!();
    println!("Examples:");
    println!("  tournament match classical greedy --games 20 --time 10000 --inc 100");
    println!("  tournament match classical:deep.toml random --out results.json");
}

fn create_engine(spec: &str) -> Result<Box<dyn Engine>> {
    let (kind, arg) = match spec.split_once(':') {
        Some((kind, arg)) => (kind, Some(arg)),
        None => (spec, None),
    };
    let engine: Box<dyn Engine> = match kind.to_lowercase().as_str() {
        "classical" | "classic" => {
            let config = match arg {
                Some(path) => EngineConfig::load(path)
                    .with_context(|| format!("loading engine config for `{spec}`"))?,
                None => EngineConfig::default(),
            };
            Box::new(ClassicalEngine::with_config(config)?)
        }
        "greedy" => Box::new(GreedyEngine::new()),
        "random" => Box::new(RandomEngine::new()),
        _ => bail!("unknown engine `{spec}`"),
    };
    Ok(engine)
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = value.with_context(|| format!("{flag} needs a value"))?;
    value
        .parse()
        .with_context(|| format!("bad value `{value}` for {flag}"))
}

fn run_match(args: &[String]) -> Result<()> {
    if args.len() < 2 {
        print_usage();
        bail!("match requires two engine specifications");
    }

    let engine1_spec = &args[0];
    let engine2_spec = &args[1];

    // Parse optional arguments
    let mut config = MatchConfig::default();
    let mut out = None;

    let mut i = 2;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args.get(i + 1);
        match flag {
            "--games" | "-g" => config.num_games = parse_value(flag, value)?,
            "--time" | "-t" => {
                config.initial_time = Duration::from_millis(parse_value(flag, value)?)
            }
            "--inc" => config.increment = Duration::from_millis(parse_value(flag, value)?),
            "--max-plies" => config.max_plies = parse_value(flag, value)?,
            "--fen" => config.start_fen = parse_value(flag, value)?,
            "--out" | "-o" => out = Some(parse_value::<String>(flag, value)?),
            _ => bail!("unknown option `{flag}`"),
        }
        i += 2;
    }

    println!("=== Match: {} vs {} ===", engine1_spec, engine2_spec);
    println!(
        "Games: {}, Clock: {}ms + {}ms",
        config.num_games,
        config.initial_time.as_millis(),
        config.increment.as_millis()
    );
    if config.start_fen != STARTPOS_FEN {
        println!("From: {}", config.start_fen);
    }
    println!();

    let mut engine1 = create_engine(engine1_spec)?;
    let mut engine2 = create_engine(engine2_spec)?;

    let runner = MatchRunner::new(config);
    let result = runner.run_match(engine1.as_mut(), engine2.as_mut())?;

    println!("{}", result.generate_report());

    if let Some(path) = out {
        result.save(Path::new(&path))?;
        println!("Results written to {path}");
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    match args[1].as_str() {
        "match" => run_match(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        _ => {
            print_usage();
            bail!("unknown command `{}`", args[1])
        }
    }
}
