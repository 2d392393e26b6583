//! Square-selection state machine
//!
//! [`SelectionController`] turns "square activated" events into selections,
//! move requests and deselections. It reads board state through a borrowed
//! [`BoardView`] and commits moves through a [`MoveRequester`]; it never
//! mutates game state itself.
//!
//! # States
//!
//! - **Idle** - no origin chosen
//! - **PieceSelected** - origin chosen, destinations computed
//!
//! # Transitions on activating square `p`
//!
//! | State         | Condition                              | Result                         |
//! |---------------|----------------------------------------|--------------------------------|
//! | Idle          | `p` empty                              | stay Idle                      |
//! | Idle          | piece of the side to move              | select with legal moves        |
//! | Idle          | opponent piece                         | select with preview moves      |
//! | PieceSelected | `p` listed                             | commit if allowed, then Idle   |
//! | PieceSelected | unlisted, piece of the side to move    | reselect at `p`                |
//! | PieceSelected | anything else                          | request move anyway, then Idle |
//!
//! A listed destination is only committed when the origin piece belongs to
//! the side to move *and* to the local player. Unlisted squares are still
//! sent to the mutator so its "leaves king in check" feedback fires.

use crate::core::OpponentPreview;
use crate::game::PieceColor;
use crate::grid::Position;
use crate::interaction::{BoardView, MoveRequester};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Current origin and destinations, replaced as a unit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    origin: Option<Position>,
    destinations: BTreeSet<Position>,
}

impl SelectionState {
    pub fn idle() -> Self {
        Self::default()
    }

    fn selected(origin: Position, destinations: impl IntoIterator<Item = Position>) -> Self {
        Self {
            origin: Some(origin),
            destinations: destinations.into_iter().collect(),
        }
    }

    pub fn origin(&self) -> Option<Position> {
        self.origin
    }

    pub fn destinations(&self) -> &BTreeSet<Position> {
        &self.destinations
    }

    pub fn is_idle(&self) -> bool {
        self.origin.is_none()
    }

    pub fn is_destination(&self, position: Position) -> bool {
        self.destinations.contains(&position)
    }
}

/// What one activation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// The game is over; any selection is dropped
    GameOver,
    /// The square is not on the board
    OutOfBounds,
    /// Idle and the square is empty
    EmptySquare,
    /// Idle, opponent piece, and previews are disabled
    PreviewDisabled,
    /// A piece was selected (`preview` marks destinations that cannot be played)
    Selected { origin: Position, preview: bool },
    /// The selection moved to another piece of the side to move
    Reselected { origin: Position },
    /// A move request was handed to the mutator
    MoveRequested { from: Position, to: Position },
    /// A listed destination was clicked but the move is not ours to make
    MoveWithheld { from: Position, to: Position },
    /// The mutator could not be reached
    MoveUndeliverable { from: Position, to: Position },
}

/// Kind of highlight drawn on a square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightKind {
    Origin,
    Destination,
}

/// Selection state machine for one board
#[derive(Debug, Clone)]
pub struct SelectionController {
    state: SelectionState,
    local_color: PieceColor,
    opponent_preview: OpponentPreview,
}

impl SelectionController {
    pub fn new(local_color: PieceColor, opponent_preview: OpponentPreview) -> Self {
        Self {
            state: SelectionState::idle(),
            local_color,
            opponent_preview,
        }
    }

    pub fn current_selection(&self) -> &SelectionState {
        &self.state
    }

    pub fn local_color(&self) -> PieceColor {
        self.local_color
    }

    pub fn set_local_color(&mut self, color: PieceColor) {
        self.local_color = color;
        self.clear();
    }

    pub fn set_opponent_preview(&mut self, preview: OpponentPreview) {
        self.opponent_preview = preview;
    }

    /// Drop any selection
    pub fn clear(&mut self) {
        self.state = SelectionState::idle();
    }

    /// Squares to highlight, origin first, destinations in position order
    ///
    /// Destinations are left out when `show_available_moves` is off.
    pub fn highlighted_squares(&self, show_available_moves: bool) -> Vec<(Position, HighlightKind)> {
        let Some(origin) = self.state.origin else {
            return Vec::new();
        };
        let mut squares = vec![(origin, HighlightKind::Origin)];
        if show_available_moves {
            squares.extend(
                self.state
                    .destinations
                    .iter()
                    .map(|p| (*p, HighlightKind::Destination)),
            );
        }
        squares
    }

    /// Single entry point for pointer and keyboard square activation
    pub fn activate(
        &mut self,
        position: Position,
        view: &dyn BoardView,
        mover: &dyn MoveRequester,
    ) -> ActivationOutcome {
        if view.is_game_over() {
            self.clear();
            return ActivationOutcome::GameOver;
        }
        if !view.contains(position) {
            return ActivationOutcome::OutOfBounds;
        }

        let outcome = match self.state.origin {
            None => self.select(position, view),
            Some(origin) => self.activate_with_selection(origin, position, view, mover),
        };
        debug!("[SELECTION] {} -> {:?}", position, outcome);
        outcome
    }

    fn select(&mut self, position: Position, view: &dyn BoardView) -> ActivationOutcome {
        let Some(piece) = view.occupant_at(position) else {
            return ActivationOutcome::EmptySquare;
        };

        let preview = piece.color != view.turn_color();
        let destinations = if !preview {
            view.legal_destinations(position)
        } else if self.opponent_preview == OpponentPreview::ShowDestinations {
            view.legal_destinations_ignoring_turn(position)
        } else {
            return ActivationOutcome::PreviewDisabled;
        };

        self.state = SelectionState::selected(position, destinations);
        ActivationOutcome::Selected {
            origin: position,
            preview,
        }
    }

    fn activate_with_selection(
        &mut self,
        origin: Position,
        position: Position,
        view: &dyn BoardView,
        mover: &dyn MoveRequester,
    ) -> ActivationOutcome {
        let turn = view.turn_color();

        if self.state.is_destination(position) {
            let origin_color = view.occupant_at(origin).map(|p| p.color);
            self.clear();
            if origin_color == Some(turn) && turn == self.local_color {
                return Self::commit(origin, position, mover);
            }
            return ActivationOutcome::MoveWithheld {
                from: origin,
                to: position,
            };
        }

        if view.occupant_at(position).is_some_and(|p| p.color == turn) {
            self.state = SelectionState::selected(position, view.legal_destinations(position));
            return ActivationOutcome::Reselected { origin: position };
        }

        self.clear();
        Self::commit(origin, position, mover)
    }

    fn commit(from: Position, to: Position, mover: &dyn MoveRequester) -> ActivationOutcome {
        match mover.request_move(from, to) {
            Ok(()) => ActivationOutcome::MoveRequested { from, to },
            Err(e) => {
                warn!("[SELECTION] Could not request {} -> {}: {}", from, to, e);
                ActivationOutcome::MoveUndeliverable { from, to }
            }
        }
    }
}
