//! Error types for grid geometry
//!
//! Structural problems with grid input are reported immediately instead of
//! producing a partial result.

use thiserror::Error;

/// Errors raised while building or inspecting a grid
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The grid has no rows, or its rows have no columns
    #[error("Grid is empty: {rows} rows x {cols} columns")]
    Empty { rows: usize, cols: usize },

    /// A row's length differs from the first row's
    #[error("Grid row {row} has {found} cells, expected {expected}")]
    Jagged {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A direction that is zero or not a unit step
    #[error("Invalid direction ({d_row}, {d_col}): components must be -1, 0 or 1 and not both zero")]
    InvalidDirection { d_row: i8, d_col: i8 },
}

/// Result type alias for grid operations
pub type GridResult<T> = Result<T, GridError>;
