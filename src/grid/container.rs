//! Rectangular grid container
//!
//! A [`Grid`] is always fully populated and never jagged: the only ways to
//! build one check the row structure up front, so every geometry operation can
//! rely on `rows() x cols()` being the real shape.

use super::error::{GridError, GridResult};
use super::geometry::in_bounds;
use super::position::Position;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fully populated rectangular mapping from [`Position`] to `T`
///
/// Use `Option<Occupant>` as `T` for grids with empty squares. Serialized as
/// the bare row list; deserializing goes through [`Grid::from_rows`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<T>>,
}

impl<T> Grid<T> {
    /// Build a grid from existing rows, failing fast on empty or jagged input
    pub fn from_rows(cells: Vec<Vec<T>>) -> GridResult<Self> {
        let rows = cells.len();
        let cols = cells.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty { rows, cols });
        }
        if let Some((row, found)) = cells
            .iter()
            .enumerate()
            .find_map(|(i, r)| (r.len() != cols).then_some((i, r.len())))
        {
            return Err(GridError::Jagged {
                row,
                expected: cols,
                found,
            });
        }
        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, position: Position) -> bool {
        in_bounds(position, self.rows, self.cols)
    }

    pub fn get(&self, position: Position) -> Option<&T> {
        self.cells.get(position.row)?.get(position.col)
    }

    pub fn get_mut(&mut self, position: Position) -> Option<&mut T> {
        self.cells.get_mut(position.row)?.get_mut(position.col)
    }

    /// Store `value` at `position`, returning the previous occupant
    ///
    /// Returns `None` and drops `value` when `position` is out of bounds.
    pub fn replace(&mut self, position: Position, value: T) -> Option<T> {
        self.get_mut(position)
            .map(|cell| std::mem::replace(cell, value))
    }

    pub fn row(&self, row: usize) -> Option<&[T]> {
        self.cells.get(row).map(Vec::as_slice)
    }

    /// Cells in row-major order, paired with their position
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, cell)| (Position::new(row, col), cell))
        })
    }
}

/// Fixed-size arrays are rectangular by construction; zero sizes fail to compile
impl<T, const R: usize, const C: usize> From<[[T; C]; R]> for Grid<T> {
    fn from(cells: [[T; C]; R]) -> Self {
        const { assert!(R > 0 && C > 0, "grid dimensions must be non-zero") };
        Self {
            rows: R,
            cols: C,
            cells: cells.into_iter().map(Vec::from).collect(),
        }
    }
}

impl<T: Clone> Grid<T> {
    /// A `rows x cols` grid with every cell set to `value`
    pub fn filled(rows: usize, cols: usize, value: T) -> GridResult<Self> {
        Self::from_rows(vec![vec![value; cols]; rows])
    }
}

impl<T: Default + Clone> Grid<T> {
    pub fn with_size(rows: usize, cols: usize) -> GridResult<Self> {
        Self::filled(rows, cols, T::default())
    }
}

impl<T: Serialize> Serialize for Grid<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.cells.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Grid<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let cells = Vec::<Vec<T>>::deserialize(deserializer)?;
        Grid::from_rows(cells).map_err(serde::de::Error::custom)
    }
}
