//! Grid geometry primitives
//!
//! Stateless algorithms over an abstract rectangular grid. Nothing here knows
//! about pieces or turns: callers plug game knowledge in through predicates.
//!
//! ## Sliding Movement
//!
//! [`project_line_until_blocked`] is the general form of a sliding piece:
//!
//! | stop predicate      | `include_stop_square` | result                          |
//! |---------------------|-----------------------|---------------------------------|
//! | "square occupied"   | `true`                | quiet moves plus the capture    |
//! | "square occupied"   | `false`               | quiet moves only                |
//!
//! Callers that must not capture their own pieces drop the stop square
//! afterwards when it holds an ally.
//!
//! ## Ordering
//!
//! Every function returns positions in a deterministic order (projection
//! order, catalogue order, or row-major order) so tests can assert exact
//! sequences.

use super::container::Grid;
use super::error::GridResult;
use super::position::{Direction, Position};

/// True iff `0 <= row < rows` and `0 <= col < cols`
#[inline]
pub fn in_bounds(position: Position, rows: usize, cols: usize) -> bool {
    position.row < rows && position.col < cols
}

/// Lazy straight-line projection produced by [`project_line`]
///
/// Never yields the origin. Ends at `max_steps` or at the first
/// out-of-bounds square, whichever comes first. Cloning before iteration, or
/// calling [`Line::restart`], replays the same sequence.
#[derive(Debug, Clone)]
pub struct Line {
    origin: Position,
    direction: Direction,
    max_steps: usize,
    rows: usize,
    cols: usize,
    step: usize,
    exhausted: bool,
}

impl Line {
    pub fn restart(&self) -> Line {
        Line {
            step: 0,
            exhausted: false,
            ..self.clone()
        }
    }
}

impl Iterator for Line {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.exhausted || self.step >= self.max_steps {
            return None;
        }
        self.step += 1;
        let next = self
            .origin
            .offset(self.direction, self.step)
            .filter(|p| in_bounds(*p, self.rows, self.cols));
        if next.is_none() {
            self.exhausted = true;
        }
        next
    }
}

/// Positions at 1..=`max_steps` multiples of `direction` from `origin`
///
/// `max_steps == 0` yields an empty sequence.
pub fn project_line(
    origin: Position,
    direction: Direction,
    max_steps: usize,
    rows: usize,
    cols: usize,
) -> Line {
    Line {
        origin,
        direction,
        max_steps,
        rows,
        cols,
        step: 0,
        exhausted: false,
    }
}

/// Walk a projection over `grid`, halting at the first occupant matching `stop`
///
/// The matching square is appended only when `include_stop_square` is set.
/// Bounds come from the grid itself.
pub fn project_line_until_blocked<T, F>(
    origin: Position,
    direction: Direction,
    max_steps: usize,
    grid: &Grid<T>,
    mut stop: F,
    include_stop_square: bool,
) -> Vec<Position>
where
    F: FnMut(&T) -> bool,
{
    let mut positions = Vec::new();
    for position in project_line(origin, direction, max_steps, grid.rows(), grid.cols()) {
        let Some(occupant) = grid.get(position) else {
            break;
        };
        if stop(occupant) {
            if include_stop_square {
                positions.push(position);
            }
            break;
        }
        positions.push(position);
    }
    positions
}

/// In-bounds neighbours of `origin`
///
/// Four cardinal neighbours (up, right, down, left), followed by the four
/// diagonals when `include_diagonals` is set.
pub fn adjacent_positions(
    origin: Position,
    rows: usize,
    cols: usize,
    include_diagonals: bool,
) -> Vec<Position> {
    let catalogue: &[Direction] = if include_diagonals {
        &Direction::ALL
    } else {
        &Direction::CARDINAL
    };
    catalogue
        .iter()
        .filter_map(|d| origin.offset(*d, 1))
        .filter(|p| in_bounds(*p, rows, cols))
        .collect()
}

/// Every position of a `rows x cols` grid satisfying `predicate`, row-major
pub fn find_all<F>(rows: usize, cols: usize, mut predicate: F) -> Vec<Position>
where
    F: FnMut(Position) -> bool,
{
    (0..rows)
        .flat_map(|row| (0..cols).map(move |col| Position::new(row, col)))
        .filter(|p| predicate(*p))
        .collect()
}

/// Every position whose occupant satisfies `predicate`, row-major
pub fn find_all_occupants<T, F>(grid: &Grid<T>, mut predicate: F) -> Vec<Position>
where
    F: FnMut(&T) -> bool,
{
    grid.iter()
        .filter(|(_, occupant)| predicate(occupant))
        .map(|(position, _)| position)
        .collect()
}

/// Structural duplicate of `grid` for evaluating hypothetical moves
///
/// Rows are new containers; each cell holds a clone of the original
/// occupant, so `Grid<Arc<_>>` shares occupants while `Grid<Option<Piece>>`
/// copies them.
pub fn copy_grid<T: Clone>(grid: &Grid<T>) -> Grid<T> {
    grid.clone()
}

/// Copy raw row data into a validated grid
///
/// Fails on empty or jagged input.
pub fn copy_rows<T: Clone>(rows: &[Vec<T>]) -> GridResult<Grid<T>> {
    Grid::from_rows(rows.to_vec())
}
