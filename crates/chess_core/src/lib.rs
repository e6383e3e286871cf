pub mod board;
pub mod error;
pub mod game;
pub mod perft;
pub mod time_control;
pub mod types;
pub mod uci;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use error::*;
pub use game::*;
pub use perft::perft;
pub use time_control::*;
pub use types::*;
pub use uci::*;

// =============================================================================
// Engine trait: implemented by all move selectors (negamax, greedy, random)
// =============================================================================

/// Trait that all chess engines must implement.
///
/// The host calls [`Engine::choose_move`] once per turn with the live game
/// and the mover's clock. Engines may apply and undo moves on the state while
/// thinking but must hand it back exactly as they received it.
pub trait Engine: Send {
    /// Pick a legal move for the side to move.
    ///
    /// # Errors
    /// [`EngineError::NoLegalMoves`] if the position has no legal moves; the
    /// host must not ask for a move once the game is over.
    fn choose_move(
        &mut self,
        state: &mut dyn GameState,
        clock: &dyn Clock,
    ) -> Result<Move, EngineError>;

    /// Returns the engine's name for UCI identification
    fn name(&self) -> &str;

    /// Returns the engine's author for UCI identification
    fn author(&self) -> &str {
        "ML-chess"
    }

    /// Called before a new game starts.
    fn new_game(&mut self) {}
}
