//! Game module - board state, move rules and the reference game-state mutator
//!
//! Everything the interactive layer consumes but does not own lives here.
//! The rules are pure functions over a [`rules::Board`]; the engine applies
//! them on its own thread and publishes immutable [`GameSnapshot`]s.
//!
//! # Module Organization
//!
//! - `pieces` - piece identity (colour, type, material value)
//! - `rules` - pure move generation and king-safety checks
//! - `snapshot` - [`GameSnapshot`], [`GameStatus`], [`MoveRecord`]
//! - `captured` - captured pieces and material balance
//! - `promotion` - promotion choice and decision-handshake aliases
//! - `engine` - [`GameEngine`] thread, commands and notifications
//! - `error` - [`GameError`]
//!
//! # Scope
//!
//! Standard piece movement, check, checkmate, stalemate and promotion.
//! Castling and en passant are not part of this rule set.

pub mod captured;
pub mod engine;
pub mod error;
pub mod pieces;
pub mod promotion;
pub mod rules;
pub mod snapshot;

pub use captured::CapturedPieces;
pub use engine::{
    EngineChannels, GameEngine, MoveCommand, MoveOutcome, MoveSender, SnapshotSource, StateChange,
};
pub use error::{GameError, GameResult};
pub use pieces::{Piece, PieceColor, PieceType};
pub use promotion::{
    PromotionChoice, PromotionRequest, PromotionRequester, PromotionResponder, PromotionSubject,
};
pub use snapshot::{GameSnapshot, GameStatus, MoveRecord};
