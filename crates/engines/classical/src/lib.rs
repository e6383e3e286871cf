//! Classical Chess Engine
//!
//! Fixed-depth negamax with alpha-beta pruning over the host's live game,
//! material evaluation at the leaves, and a handful of cheap adjustments at
//! the root. Under time pressure it plays a random legal move instead of
//! searching.

mod config;
mod eval;
mod heuristics;
mod repetition;
mod search;
mod time_guard;

use std::time::{Duration, Instant};

use chess_core::{Clock, Engine, EngineError, GameState, Move, ScopedMove};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info, warn};

pub use config::{ConfigError, EngineConfig};
pub use eval::{Evaluator, PieceWeights};
pub use heuristics::{in_center, in_inner_center, HeuristicWeights, PositionalHeuristics};
pub use repetition::RepetitionMemory;
pub use search::{Searcher, DRAW_VALUE, INFINITY, MATE_VALUE};
pub use time_guard::TimeGuard;

/// What the last decision looked like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub best_move: Move,
    /// Score after root heuristics (0 for a random fallback move)
    pub score: i32,
    /// Search value of the chosen move before root heuristics
    pub raw_score: i32,
    pub depth: u8,
    /// Number of nodes searched
    pub nodes: u64,
    /// Root moves that were fully searched
    pub searched: usize,
    /// Whether the time guard cut the root loop short
    pub stopped: bool,
    /// Whether the move was picked at random because time was low
    pub fallback: bool,
    pub elapsed: Duration,
}

/// Classical chess engine using negamax with alpha-beta pruning.
///
/// This engine uses:
/// - Negamax search with alpha-beta pruning to a fixed depth
/// - Simple material evaluation
/// - Root heuristics: repetition penalty, check bonus, pawn/knight centrality
/// - A low-time fallback to a random legal move
///
/// The repetition memory lives as long as the engine. Starting a new game
/// does not clear it.
#[derive(Debug, Clone)]
pub struct ClassicalEngine {
    config: EngineConfig,
    evaluator: Evaluator,
    heuristics: PositionalHeuristics,
    time_guard: TimeGuard,
    memory: RepetitionMemory,
    rng: StdRng,
    last_report: Option<SearchReport>,
}

impl ClassicalEngine {
    pub fn new() -> Self {
        let config = EngineConfig::default();
        let memory = RepetitionMemory::new(config.repetition_window);
        Self::assemble(config, memory, StdRng::from_entropy())
    }

    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let memory = RepetitionMemory::new(config.repetition_window);
        Self::with_state(config, memory, rng)
    }

    /// Build around existing state, e.g. a pre-filled repetition memory.
    /// The memory's own capacity wins over `config.repetition_window`.
    pub fn with_state(
        config: EngineConfig,
        memory: RepetitionMemory,
        rng: StdRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::assemble(config, memory, rng))
    }

    fn assemble(config: EngineConfig, memory: RepetitionMemory, rng: StdRng) -> Self {
        Self {
            evaluator: Evaluator::new(&config.weights),
            heuristics: PositionalHeuristics::new(config.heuristics),
            time_guard: TimeGuard::new(config.fallback_threshold_ms),
            config,
            memory,
            rng,
            last_report: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn memory(&self) -> &RepetitionMemory {
        &self.memory
    }

    pub fn last_report(&self) -> Option<&SearchReport> {
        self.last_report.as_ref()
    }

    /// Pick a move for the side to move in `state`.
    ///
    /// Every root move is applied, searched `depth - 1` further plies with a
    /// full window, taken back and adjusted by the root heuristics. The first
    /// move with the strictly highest score wins. The time guard is consulted
    /// before the search and again before every root move after the first.
    ///
    /// `state` is handed back unchanged, also on error.
    ///
    /// # Errors
    /// - [`EngineError::NoLegalMoves`] if there is nothing to play.
    /// - [`EngineError::EmptyMoveList`] if the board's terminal detection and
    ///   move generation disagree somewhere in the tree.
    pub fn choose_move<G: GameState + ?Sized>(
        &mut self,
        state: &mut G,
        clock: &dyn Clock,
    ) -> Result<Move, EngineError> {
        let start = Instant::now();
        let moves = state.legal_moves();
        if moves.is_empty() {
            error!("asked for a move in a position without legal moves");
            return Err(EngineError::NoLegalMoves);
        }

        let remaining_ms = clock.remaining_ms();
        if self.time_guard.should_fallback(remaining_ms) {
            return self.fallback(&moves, remaining_ms, start);
        }

        let depth = self.config.depth;
        let mut searcher = Searcher::new(&self.evaluator, self.config.pruning);
        // (move, adjusted, raw)
        let mut best: Option<(Move, i32, i32)> = None;
        let mut searched = 0;
        let mut stopped = false;

        for &mv in &moves {
            if searched > 0 && self.time_guard.should_fallback(clock.remaining_ms()) {
                stopped = true;
                warn!(searched, total = moves.len(), "time low, stopping root search early");
                break;
            }

            let (raw, check_after_move) = {
                let mut child = ScopedMove::new(&mut *state, mv);
                let raw = -searcher.search(&mut *child, depth - 1, -INFINITY, INFINITY)?;
                (raw, child.is_in_check())
            };
            let score = self.heuristics.adjust(raw, mv, check_after_move, &self.memory);
            searched += 1;
            debug!(%mv, raw, score, "root move");

            if best.map_or(true, |(_, best_score, _)| score > best_score) {
                best = Some((mv, score, raw));
            }
        }

        let (best_move, score, raw_score) = best.ok_or(EngineError::NoLegalMoves)?;
        self.memory.push(best_move);

        let report = SearchReport {
            best_move,
            score,
            raw_score,
            depth,
            nodes: searcher.nodes(),
            searched,
            stopped,
            fallback: false,
            elapsed: start.elapsed(),
        };
        info!(
            best = %best_move,
            score,
            raw_score,
            nodes = report.nodes,
            searched,
            stopped,
            elapsed_ms = millis(report.elapsed),
            "move chosen"
        );
        self.last_report = Some(report);
        Ok(best_move)
    }

    fn fallback(
        &mut self,
        moves: &[Move],
        remaining_ms: u64,
        start: Instant,
    ) -> Result<Move, EngineError> {
        let mv = random_engine::pick_uniform(moves, &mut self.rng).ok_or(EngineError::NoLegalMoves)?;
        warn!(
            remaining_ms,
            threshold_ms = self.time_guard.threshold_ms(),
            %mv,
            "time low, playing a random move"
        );
        self.memory.push(mv);
        self.last_report = Some(SearchReport {
            best_move: mv,
            score: 0,
            raw_score: 0,
            depth: 0,
            nodes: 0,
            searched: 0,
            stopped: false,
            fallback: true,
            elapsed: start.elapsed(),
        });
        Ok(mv)
    }
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

impl Default for ClassicalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for ClassicalEngine {
    fn choose_move(
        &mut self,
        state: &mut dyn GameState,
        clock: &dyn Clock,
    ) -> Result<Move, EngineError> {
        ClassicalEngine::choose_move(self, state, clock)
    }

    fn name(&self) -> &str {
        "Classical v2.0"
    }

    fn author(&self) -> &str {
        "ML-chess"
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod lib_tests;
