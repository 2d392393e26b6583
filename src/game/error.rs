//! Error types for game module
//!
//! Provides custom error types for move validation and the game-state
//! mutator's command channel.

use crate::grid::{GridError, Position};

/// Errors that can occur in game logic
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// No piece on the origin square
    #[error("Piece not found at {position}")]
    PieceNotFound { position: Position },

    /// The origin piece does not belong to the side to move
    #[error("Not {color}'s turn to move the piece at {position}")]
    WrongTurn {
        position: Position,
        color: crate::game::PieceColor,
    },

    /// Destination is not reachable by the piece
    #[error("Invalid move: {from} -> {to}")]
    InvalidMove { from: Position, to: Position },

    /// Destination is reachable but would leave the mover's king attacked
    #[error("Move {from} -> {to} leaves the king in check")]
    LeavesKingInCheck { from: Position, to: Position },

    /// The game has already finished
    #[error("Game is over")]
    GameOver,

    /// The engine thread is gone and cannot accept commands
    #[error("Game engine is not running")]
    EngineUnavailable,

    /// Board construction failed
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
