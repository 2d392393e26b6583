//! Read-only board queries and the move-commit entry point
//!
//! These are the two seams between the interactive context and whoever owns
//! the game state. The selection controller borrows a [`BoardView`] for the
//! duration of one activation and never keeps it across events.

use crate::game::{GameResult, Piece, PieceColor};
use crate::grid::Position;

/// Snapshot queries the selection controller consumes
pub trait BoardView {
    fn rows(&self) -> usize;

    fn cols(&self) -> usize;

    fn contains(&self, position: Position) -> bool {
        position.row < self.rows() && position.col < self.cols()
    }

    fn occupant_at(&self, position: Position) -> Option<Piece>;

    fn turn_color(&self) -> PieceColor;

    /// Legal destinations respecting whose turn it is (empty for the side not to move)
    fn legal_destinations(&self, position: Position) -> Vec<Position>;

    /// Destinations the piece would have if it were its side's turn
    fn legal_destinations_ignoring_turn(&self, position: Position) -> Vec<Position>;

    fn is_game_over(&self) -> bool;
}

/// Asynchronous move commit
///
/// The outcome arrives later as a state-change notification. An `Err` only
/// means the request could not be handed to the mutator at all.
pub trait MoveRequester {
    fn request_move(&self, from: Position, to: Position) -> GameResult<()>;
}
