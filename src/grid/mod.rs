//! Grid geometry toolkit
//!
//! Game-agnostic building blocks for rectangular boards: coordinates,
//! directions, a validated grid container, and the projection, adjacency and
//! search algorithms that move generation is built from.
//!
//! # Module Structure
//!
//! - `position` - [`Position`] and [`Direction`] value types
//! - `container` - [`Grid`], a non-jagged, fully populated grid
//! - `geometry` - pure algorithms over positions and grids
//! - `error` - [`GridError`] for structural input problems

pub mod container;
pub mod error;
pub mod geometry;
pub mod position;


pub use container::Grid;
pub use error::{GridError, GridResult};
pub use geometry::{
    adjacent_positions, copy_grid, copy_rows, find_all, find_all_occupants, in_bounds,
    project_line, project_line_until_blocked, Line,
};
pub use position::{Direction, Position};
