//! Material-based position evaluation.

use chess_core::{Color, GameState, PieceKind};
use serde::{Deserialize, Serialize};

/// Material weight per piece kind.
///
/// Weights are unsigned so a configuration file cannot make a piece worth
/// less than nothing. Kings are always on the board, so the king weight
/// cancels out of every evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PieceWeights {
    pub pawn: u16,
    pub knight: u16,
    pub bishop: u16,
    pub rook: u16,
    pub queen: u16,
    pub king: u16,
}

impl PieceWeights {
    pub fn get(&self, kind: PieceKind) -> u16 {
        match kind {
            PieceKind::Pawn => self.pawn,
            PieceKind::Knight => self.knight,
            PieceKind::Bishop => self.bishop,
            PieceKind::Rook => self.rook,
            PieceKind::Queen => self.queen,
            PieceKind::King => self.king,
        }
    }
}

impl Default for PieceWeights {
    fn default() -> Self {
        Self {
            pawn: 100,
            knight: 320,
            bishop: 330,
            rook: 500,
            queen: 900,
            king: 10_000,
        }
    }
}

/// Scores positions by material balance.
#[derive(Debug, Clone)]
pub struct Evaluator {
    /// Indexed by `PieceKind::idx()`
    weights: [i32; 6],
}

impl Evaluator {
    pub fn new(weights: &PieceWeights) -> Self {
        Self {
            weights: PieceKind::ALL.map(|kind| i32::from(weights.get(kind))),
        }
    }

    #[inline]
    pub fn weight(&self, kind: PieceKind) -> i32 {
        self.weights[kind.idx()]
    }

    /// Material balance from `perspective`'s point of view.
    ///
    /// Returns a score in centipawns:
    /// - Positive = `perspective` is ahead
    /// - Negative = `perspective` is behind
    ///
    /// Terminal positions are the search's business; here they simply get
    /// their material balance.
    pub fn evaluate<G: GameState + ?Sized>(&self, state: &G, perspective: Color) -> i32 {
        let opponent = perspective.other();
        PieceKind::ALL
            .iter()
            .map(|&kind| {
                let own = state.piece_count(perspective, kind) as i32;
                let theirs = state.piece_count(opponent, kind) as i32;
                self.weight(kind) * (own - theirs)
            })
            .sum()
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(&PieceWeights::default())
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
