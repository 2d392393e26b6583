//! Piece identity types shared by the board, the rules and the interaction layer

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PieceColor {
    #[default]
    White,
    Black,
}

impl PieceColor {
    pub fn opponent(self) -> PieceColor {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }

    /// Row delta of a forward pawn step (White moves toward row 0)
    pub fn forward(self) -> i8 {
        match self {
            PieceColor::White => -1,
            PieceColor::Black => 1,
        }
    }

    /// Row a pawn of this colour promotes on
    pub fn promotion_row(self, rows: usize) -> usize {
        match self {
            PieceColor::White => 0,
            PieceColor::Black => rows.saturating_sub(1),
        }
    }

    /// Row pawns of this colour start on
    pub fn pawn_row(self, rows: usize) -> usize {
        match self {
            PieceColor::White => rows.saturating_sub(2),
            PieceColor::Black => 1,
        }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceColor::White => write!(f, "White"),
            PieceColor::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PieceType {
    #[default]
    King,
    Queen,
    Bishop,
    Knight,
    Rook,
    Pawn,
}

impl PieceType {
    /// Standard material value in pawns; the king is never captured
    pub fn value(self) -> i32 {
        match self {
            PieceType::Pawn => 1,
            PieceType::Knight => 3,
            PieceType::Bishop => 3,
            PieceType::Rook => 5,
            PieceType::Queen => 9,
            PieceType::King => 0,
        }
    }

    /// Single-letter symbol, uppercase for White
    pub fn symbol(self, color: PieceColor) -> char {
        let symbol = match self {
            PieceType::King => 'k',
            PieceType::Queen => 'q',
            PieceType::Bishop => 'b',
            PieceType::Knight => 'n',
            PieceType::Rook => 'r',
            PieceType::Pawn => 'p',
        };
        match color {
            PieceColor::White => symbol.to_ascii_uppercase(),
            PieceColor::Black => symbol,
        }
    }
}

/// An occupant of a board square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: PieceColor,
    pub piece_type: PieceType,
}

impl Piece {
    pub const fn new(color: PieceColor, piece_type: PieceType) -> Self {
        Self { color, piece_type }
    }

    pub fn symbol(&self) -> char {
        self.piece_type.symbol(self.color)
    }
}

/// Back-rank layout from file `a` to file `h`
pub const BACK_ROW: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];
