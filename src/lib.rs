//! Interactive core of a turn-based board game client
//!
//! - [`grid`] - game-agnostic grid geometry (projection, blocking, adjacency, search)
//! - [`game`] - chess pieces, move rules and a threaded reference mutator
//! - [`interaction`] - square selection, the decision handshake and Bevy wiring
//! - [`core`] - errors, settings persistence and logging setup

pub mod core;
pub mod game;
pub mod grid;
pub mod interaction;

pub use crate::core::{CorePlugin, InteractionSettings, OpponentPreview};
pub use game::{GameEngine, GameSnapshot, Piece, PieceColor, PieceType, PromotionChoice};
pub use grid::{Direction, Grid, Position};
pub use interaction::{BoardInteractionPlugin, GameLink, SelectionController};
