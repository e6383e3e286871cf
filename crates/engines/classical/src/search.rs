//! Negamax search with alpha-beta pruning

use chess_core::{EngineError, GameState, ScopedMove};
use tracing::error;

use crate::eval::Evaluator;

/// Score of a position in which the side to move has been checkmated, from
/// the mated side's point of view (negated). Independent of depth.
pub const MATE_VALUE: i32 = 40_000;

/// Score of any drawn position, for both sides at every depth.
pub const DRAW_VALUE: i32 = 0;

/// Bound strictly outside every reachable score. Safe to negate.
pub const INFINITY: i32 = 1_000_000;

/// One search over a shared, mutable game state.
///
/// Every score is relative to the side to move at the node it was computed
/// for; callers negate to view it from the other side.
pub struct Searcher<'a> {
    evaluator: &'a Evaluator,
    pruning: bool,
    /// Nodes visited (for statistics)
    nodes: u64,
}

impl<'a> Searcher<'a> {
    /// With `pruning` off the same recursion runs as plain minimax, which
    /// must produce identical scores.
    pub fn new(evaluator: &'a Evaluator, pruning: bool) -> Self {
        Self {
            evaluator,
            pruning,
            nodes: 0,
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Value of the current position searched `depth` plies deep, within the
    /// window `(alpha, beta)`.
    ///
    /// The state must already reflect the move being valued. It is returned
    /// unchanged on every path, including errors.
    ///
    /// # Errors
    /// [`EngineError::EmptyMoveList`] when move generation comes back empty
    /// at a node the board reported as neither checkmate nor draw.
    pub fn search<G: GameState + ?Sized>(
        &mut self,
        state: &mut G,
        depth: u8,
        mut alpha: i32,
        beta: i32,
    ) -> Result<i32, EngineError> {
        self.nodes += 1;

        // Terminal positions are scored before the depth floor
        if state.is_checkmate() {
            return Ok(-MATE_VALUE);
        }
        if state.is_draw() {
            return Ok(DRAW_VALUE);
        }

        if depth == 0 {
            let perspective = state.side_to_move();
            return Ok(self.evaluator.evaluate(&*state, perspective));
        }

        let moves = state.legal_moves();
        if moves.is_empty() {
            error!(depth, "move generation empty at a non-terminal node");
            return Err(EngineError::EmptyMoveList {
                depth_remaining: depth,
            });
        }

        let mut best = -INFINITY;
        for mv in moves {
            let score = {
                let mut child = ScopedMove::new(&mut *state, mv);
                -self.search(&mut *child, depth - 1, -beta, -alpha)?
            };

            if score > best {
                best = score;
            }
            if self.pruning {
                if best > alpha {
                    alpha = best;
                }
                if alpha >= beta {
                    break; // Beta cutoff
                }
            }
        }

        Ok(best)
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
