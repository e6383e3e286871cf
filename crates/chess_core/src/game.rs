//! The board contract consumed by every engine.
//!
//! Engines never own or copy a position. They borrow one mutable
//! [`GameState`] per decision and walk the whole search tree on it,
//! applying and undoing moves in strict pairs. [`ScopedMove`] ties each undo
//! to a scope so that early returns, `break`s and `?` all restore the board.

use std::ops::{Deref, DerefMut};

use crate::types::{Color, Move, PieceKind};

/// Mutable position with legal move generation and terminal detection.
pub trait GameState {
    /// Replaces the contents of `moves` with every legal move for the side to
    /// move. Empty only when the position is checkmate or stalemate.
    fn legal_moves_into(&self, moves: &mut Vec<Move>);

    fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.legal_moves_into(&mut moves);
        moves
    }

    /// Plays a move previously returned by [`GameState::legal_moves_into`].
    fn make_move(&mut self, mv: Move);

    /// Takes back `mv`, which must be the most recently played move.
    /// Restores the exact state from before the matching `make_move`.
    fn undo_move(&mut self, mv: Move);

    fn side_to_move(&self) -> Color;

    /// The side to move is checkmated.
    fn is_checkmate(&self) -> bool;

    /// The game is drawn: stalemate, fifty-move rule, repetition or
    /// insufficient material, as far as the implementation tracks them.
    fn is_draw(&self) -> bool;

    /// The side to move is in check.
    fn is_in_check(&self) -> bool;

    fn piece_count(&self, color: Color, kind: PieceKind) -> u32;
}

/// A move that is applied for as long as the guard lives.
///
/// Dereferences to the underlying state so the caller can keep searching
/// through it; dropping the guard undoes the move.
pub struct ScopedMove<'a, G: GameState + ?Sized> {
    state: &'a mut G,
    mv: Move,
}

impl<'a, G: GameState + ?Sized> ScopedMove<'a, G> {
    pub fn new(state: &'a mut G, mv: Move) -> Self {
        state.make_move(mv);
        Self { state, mv }
    }
}

impl<G: GameState + ?Sized> Deref for ScopedMove<'_, G> {
    type Target = G;

    fn deref(&self) -> &G {
        self.state
    }
}

impl<G: GameState + ?Sized> DerefMut for ScopedMove<'_, G> {
    fn deref_mut(&mut self) -> &mut G {
        self.state
    }
}

impl<G: GameState + ?Sized> Drop for ScopedMove<'_, G> {
    fn drop(&mut self) {
        self.state.undo_move(self.mv);
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
