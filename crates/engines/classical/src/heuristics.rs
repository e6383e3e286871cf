//! Root-move adjustments applied after the search has valued a move.

use chess_core::{file_of, rank_of, Move, PieceKind};
use serde::{Deserialize, Serialize};

use crate::repetition::RepetitionMemory;

/// Bonuses and penalties in centipawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeuristicWeights {
    /// Subtracted when the move is one of the recently chosen root moves
    pub repetition_penalty: i32,
    /// Added when the position after the move reports check
    pub check_bonus: i32,
    /// Pawn or knight landing in the central 4x4
    pub center_bonus: i32,
    /// Extra for landing in the central 2x2
    pub inner_center_bonus: i32,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            repetition_penalty: 50,
            check_bonus: 50,
            center_bonus: 10,
            inner_center_bonus: 10,
        }
    }
}

/// Files c-f, ranks 3-6.
pub fn in_center(sq: u8) -> bool {
    (2..=5).contains(&file_of(sq)) && (2..=5).contains(&rank_of(sq))
}

/// d4, e4, d5, e5.
pub fn in_inner_center(sq: u8) -> bool {
    (3..=4).contains(&file_of(sq)) && (3..=4).contains(&rank_of(sq))
}

#[derive(Debug, Clone, Default)]
pub struct PositionalHeuristics {
    weights: HeuristicWeights,
}

impl PositionalHeuristics {
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    /// Adjusted score of a root move whose search value is `raw`.
    ///
    /// `check_after_move` is the board's in-check answer while `mv` is
    /// applied.
    pub fn adjust(
        &self,
        raw: i32,
        mv: Move,
        check_after_move: bool,
        memory: &RepetitionMemory,
    ) -> i32 {
        let mut score = raw;
        if memory.contains(&mv) {
            score -= self.weights.repetition_penalty;
        }
        if check_after_move {
            score += self.weights.check_bonus;
        }
        score + self.centrality_bonus(mv)
    }

    pub fn centrality_bonus(&self, mv: Move) -> i32 {
        if !matches!(mv.piece, PieceKind::Pawn | PieceKind::Knight) {
            return 0;
        }
        let mut bonus = 0;
        if in_center(mv.to) {
            bonus += self.weights.center_bonus;
        }
        if in_inner_center(mv.to) {
            bonus += self.weights.inner_center_bonus;
        }
        bonus
    }
}

#[cfg(test)]
#[path = "heuristics_tests.rs"]
mod heuristics_tests;
