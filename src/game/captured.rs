//! Captured pieces tracking
//!
//! Tracks pieces captured by each player and calculates material advantage.
//! Used by the captured-piece strips around the board.
//!
//! # Material Advantage
//!
//! Positive advantage means White is ahead, negative means Black is ahead.
//! Example: If White captured (Rook=5, Pawn=1) and Black captured (Knight=3),
//! White's advantage is (5+1) - 3 = +3 pawns.

use super::pieces::{PieceColor, PieceType};
use serde::{Deserialize, Serialize};

/// Pieces captured by each side, in capture order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedPieces {
    /// Pieces captured by white (black pieces taken)
    pub white_captured: Vec<PieceType>,
    /// Pieces captured by black (white pieces taken)
    pub black_captured: Vec<PieceType>,
}

impl CapturedPieces {
    /// Record a piece capture
    ///
    /// # Arguments
    ///
    /// * `captured_piece_color` - Color of the piece that was captured
    /// * `piece_type` - Type of piece that was captured
    pub fn add_capture(&mut self, captured_piece_color: PieceColor, piece_type: PieceType) {
        match captured_piece_color {
            PieceColor::White => self.black_captured.push(piece_type),
            PieceColor::Black => self.white_captured.push(piece_type),
        }
    }

    /// Pieces taken by `capturer`
    pub fn taken_by(&self, capturer: PieceColor) -> &[PieceType] {
        match capturer {
            PieceColor::White => &self.white_captured,
            PieceColor::Black => &self.black_captured,
        }
    }

    /// Material difference in pawn units, positive when White is ahead
    pub fn material_advantage(&self) -> i32 {
        let white_score: i32 = self.white_captured.iter().map(|p| p.value()).sum();
        let black_score: i32 = self.black_captured.iter().map(|p| p.value()).sum();
        white_score - black_score
    }

    /// Clear all captured pieces (for new game)
    pub fn clear(&mut self) {
        self.white_captured.clear();
        self.black_captured.clear();
    }
}
