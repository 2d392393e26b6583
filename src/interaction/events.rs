//! Messages exchanged between the host application and the interaction systems

use crate::game::{PromotionChoice, StateChange};
use crate::grid::Position;
use crate::interaction::handshake::RequestId;
use bevy::prelude::*;

/// Raw pointer click, in pixels relative to the board panel's top-left corner
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct BoardClicked {
    pub x: f32,
    pub y: f32,
}

/// A board square was activated by pointer or keyboard
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareActivated {
    pub position: Position,
}

/// A mutator notification, re-emitted on the interactive schedule
#[derive(Message, Debug, Clone, PartialEq)]
pub struct BoardStateChanged {
    pub change: StateChange,
}

/// The human picked a promotion piece for an outstanding request
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionChosen {
    pub request: RequestId,
    pub choice: PromotionChoice,
}

/// Turn the board around
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardFlipped;
