//! Random Move Chess Engine
//!
//! A simple engine that selects moves uniformly at random from all legal moves.
//! Useful for:
//! - Baseline comparisons (any real engine should easily beat this)
//! - Stress testing the board adapter and the tournament runner
//! - The instant fallback other engines use when they are out of time

use chess_core::{Clock, Engine, EngineError, GameState, Move};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::trace;


/// Picks one of `moves` uniformly at random. `None` only for an empty slice.
pub fn pick_uniform<R: Rng + ?Sized>(moves: &[Move], rng: &mut R) -> Option<Move> {
    moves.choose(rng).copied()
}

/// A chess engine that plays random legal moves.
///
/// This engine provides no evaluation - it simply picks a random move
/// from all available legal moves.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible move sequence for tests and seeded matches.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn choose_move(
        &mut self,
        state: &mut dyn GameState,
        _clock: &dyn Clock,
    ) -> Result<Move, EngineError> {
        let moves = state.legal_moves();
        let mv = pick_uniform(&moves, &mut self.rng).ok_or(EngineError::NoLegalMoves)?;
        trace!(%mv, choices = moves.len(), "random move");
        Ok(mv)
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }
}
