//! Error types shared by the board adapter and the engines.

use thiserror::Error;

/// Failures of a move decision.
///
/// Both variants are contract violations between an engine and the board it
/// was handed. Running low on time is not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The host asked for a move in a position without legal moves.
    #[error("move requested in a position with no legal moves")]
    NoLegalMoves,

    /// Move generation came back empty at a node the board did not report
    /// as checkmate or draw.
    #[error(
        "no legal moves at a non-terminal node with {depth_remaining} plies remaining \
         (terminal detection and move generation disagree)"
    )]
    EmptyMoveList { depth_remaining: u8 },
}

/// Failures of the board adapter itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid FEN `{fen}`: {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("`{0}` is not a legal move in this position")]
    IllegalMove(String),
}
