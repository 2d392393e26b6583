//! Board coordinates and unit directions
//!
//! [`Position`] replaces ad hoc `(row, col)` tuples with a single value type so
//! rows and columns cannot be transposed by accident. [`Direction`] is a unit
//! step drawn from a fixed catalogue; the zero vector cannot be constructed.
//!
//! # Coordinate System
//!
//! Row 0 is the top row of the grid as stored. On an 8x8 chess board row 0 is
//! rank 8 (Black's back rank) and column 0 is file `a`, so `(7, 4)` is `e1`.

use super::error::{GridError, GridResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A square on a rectangular grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step `steps` times along `direction`
    ///
    /// Returns `None` when either coordinate would become negative. Upper
    /// bounds are the caller's concern (see [`super::geometry::in_bounds`]).
    pub fn offset(self, direction: Direction, steps: usize) -> Option<Position> {
        let steps = isize::try_from(steps).ok()?;
        let row = isize::try_from(self.row)
            .ok()?
            .checked_add(isize::from(direction.d_row()).checked_mul(steps)?)?;
        let col = isize::try_from(self.col)
            .ok()?
            .checked_add(isize::from(direction.d_col()).checked_mul(steps)?)?;
        if row < 0 || col < 0 {
            return None;
        }
        Some(Position::new(row as usize, col as usize))
    }

    /// Algebraic name of this square on an 8x8 board, e.g. `e4`
    ///
    /// Returns `None` for positions outside the 8x8 board.
    pub fn to_algebraic(self) -> Option<String> {
        if self.row > 7 || self.col > 7 {
            return None;
        }
        let file = (b'a' + self.col as u8) as char;
        let rank = 8 - self.row;
        Some(format!("{file}{rank}"))
    }

    /// Parse an algebraic square name such as `e4`
    pub fn from_algebraic(name: &str) -> Option<Position> {
        let mut chars = name.trim().chars();
        let file = chars.next()?.to_ascii_lowercase();
        let rank = chars.next()?.to_digit(10)? as usize;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !(1..=8).contains(&rank) {
            return None;
        }
        Some(Position::new(8 - rank, (file as u8 - b'a') as usize))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_algebraic() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "({}, {})", self.row, self.col),
        }
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position::new(row, col)
    }
}

/// A unit displacement `(d_row, d_col)` with components in `{-1, 0, 1}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    d_row: i8,
    d_col: i8,
}

impl Direction {
    pub const UP: Direction = Direction { d_row: -1, d_col: 0 };
    pub const DOWN: Direction = Direction { d_row: 1, d_col: 0 };
    pub const LEFT: Direction = Direction { d_row: 0, d_col: -1 };
    pub const RIGHT: Direction = Direction { d_row: 0, d_col: 1 };
    pub const UP_LEFT: Direction = Direction { d_row: -1, d_col: -1 };
    pub const UP_RIGHT: Direction = Direction { d_row: -1, d_col: 1 };
    pub const DOWN_LEFT: Direction = Direction { d_row: 1, d_col: -1 };
    pub const DOWN_RIGHT: Direction = Direction { d_row: 1, d_col: 1 };

    /// Cardinal directions in fixed order: up, right, down, left
    pub const CARDINAL: [Direction; 4] = [
        Direction::UP,
        Direction::RIGHT,
        Direction::DOWN,
        Direction::LEFT,
    ];

    /// Diagonal directions in fixed order: up-left, up-right, down-left, down-right
    pub const DIAGONAL: [Direction; 4] = [
        Direction::UP_LEFT,
        Direction::UP_RIGHT,
        Direction::DOWN_LEFT,
        Direction::DOWN_RIGHT,
    ];

    /// All eight directions, cardinal first, then diagonal
    pub const ALL: [Direction; 8] = [
        Direction::UP,
        Direction::RIGHT,
        Direction::DOWN,
        Direction::LEFT,
        Direction::UP_LEFT,
        Direction::UP_RIGHT,
        Direction::DOWN_LEFT,
        Direction::DOWN_RIGHT,
    ];

    /// Build a direction from raw deltas
    ///
    /// Rejects `(0, 0)` and any component outside `{-1, 0, 1}`.
    pub fn new(d_row: i8, d_col: i8) -> GridResult<Direction> {
        let unit = |d: i8| (-1..=1).contains(&d);
        if !unit(d_row) || !unit(d_col) || (d_row == 0 && d_col == 0) {
            return Err(GridError::InvalidDirection { d_row, d_col });
        }
        Ok(Direction { d_row, d_col })
    }

    pub fn d_row(self) -> i8 {
        self.d_row
    }

    pub fn d_col(self) -> i8 {
        self.d_col
    }

    pub fn is_diagonal(self) -> bool {
        self.d_row != 0 && self.d_col != 0
    }

    pub fn reversed(self) -> Direction {
        Direction {
            d_row: -self.d_row,
            d_col: -self.d_col,
        }
    }
}
