//! Greedy Chess Engine
//!
//! Looks exactly one ply ahead. Mates when it can, otherwise grabs the most
//! valuable piece on offer, otherwise plays a random move. Useful as a
//! sparring partner that punishes hanging pieces.

use chess_core::{Clock, Color, Engine, EngineError, GameState, Move, PieceKind, ScopedMove};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

/// Capture values, indexed by [`PieceKind::idx`].
pub const CAPTURE_VALUES: [i32; 6] = [100, 300, 300, 500, 900, 10_000];

/// Total capture value of `color`'s pieces.
pub fn material<G: GameState + ?Sized>(state: &G, color: Color) -> i32 {
    PieceKind::ALL
        .iter()
        .map(|&kind| CAPTURE_VALUES[kind.idx()] * state.piece_count(color, kind) as i32)
        .sum()
}

pub struct GreedyEngine {
    rng: StdRng,
}

impl GreedyEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for GreedyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for GreedyEngine {
    fn choose_move(
        &mut self,
        state: &mut dyn GameState,
        _clock: &dyn Clock,
    ) -> Result<Move, EngineError> {
        let moves = state.legal_moves();
        let opponent = state.side_to_move().other();
        let before = material(&*state, opponent);

        let mut best_capture: Option<(Move, i32)> = None;
        for &mv in &moves {
            let child = ScopedMove::new(&mut *state, mv);
            if child.is_checkmate() {
                debug!(%mv, "mate in one");
                return Ok(mv);
            }
            let gained = before - material(&*child, opponent);
            if gained > 0 && best_capture.map_or(true, |(_, best)| gained > best) {
                best_capture = Some((mv, gained));
            }
        }

        if let Some((mv, gained)) = best_capture {
            debug!(%mv, gained, "capture");
            return Ok(mv);
        }
        random_engine::pick_uniform(&moves, &mut self.rng).ok_or(EngineError::NoLegalMoves)
    }

    fn name(&self) -> &str {
        "Greedy v1.0"
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod lib_tests;
