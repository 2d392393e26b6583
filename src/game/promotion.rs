//! Pawn promotion decision types
//!
//! Promotion is the one place where applying a move needs a human choice.
//! The engine thread asks through the decision handshake with a
//! [`PromotionSubject`] and waits for a [`PromotionChoice`].

use super::pieces::{PieceColor, PieceType};
use crate::grid::Position;
use crate::interaction::handshake::{DecisionRequest, DecisionRequester, DecisionResponder};
use serde::{Deserialize, Serialize};

/// Piece a pawn may promote to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PromotionChoice {
    #[default]
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromotionChoice {
    /// Every legal choice, in the order a prompt lists them
    pub const ALL: [PromotionChoice; 4] = [
        PromotionChoice::Queen,
        PromotionChoice::Rook,
        PromotionChoice::Bishop,
        PromotionChoice::Knight,
    ];

    pub fn piece_type(self) -> PieceType {
        match self {
            PromotionChoice::Queen => PieceType::Queen,
            PromotionChoice::Rook => PieceType::Rook,
            PromotionChoice::Bishop => PieceType::Bishop,
            PromotionChoice::Knight => PieceType::Knight,
        }
    }
}

/// Who is promoting and where
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PromotionSubject {
    pub color: PieceColor,
    pub square: Position,
}

pub type PromotionRequest = DecisionRequest<PromotionSubject, PromotionChoice>;
pub type PromotionRequester = DecisionRequester<PromotionSubject, PromotionChoice>;
pub type PromotionResponder = DecisionResponder<PromotionSubject, PromotionChoice>;
