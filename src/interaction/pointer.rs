//! Pixel to board-square mapping
//!
//! [`BoardViewport`] describes the board panel as laid out on screen. It
//! resolves a pointer position to a [`Position`], maps positions back to
//! display cells for highlighting, and produces the rank/file labels drawn
//! along the edges.
//!
//! # Orientation
//!
//! Row 0 is the rank furthest from White. With `white_at_bottom` it is drawn
//! at the top; when flipped both rows and columns are mirrored, so the
//! mapping is its own inverse.

use crate::grid::Position;
use bevy::prelude::*;

/// Board panel geometry and orientation
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct BoardViewport {
    pub width_px: f32,
    pub height_px: f32,
    pub rows: usize,
    pub cols: usize,
    pub white_at_bottom: bool,
}

impl Default for BoardViewport {
    fn default() -> Self {
        Self {
            width_px: 640.0,
            height_px: 640.0,
            rows: 8,
            cols: 8,
            white_at_bottom: true,
        }
    }
}

/// Edge labels in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisLabels {
    /// Top to bottom
    pub ranks: Vec<String>,
    /// Left to right
    pub files: Vec<String>,
}

impl BoardViewport {
    pub fn new(width_px: f32, height_px: f32, white_at_bottom: bool) -> Self {
        Self {
            width_px,
            height_px,
            white_at_bottom,
            ..Self::default()
        }
    }

    /// Resolve a pointer position relative to the panel's top-left corner
    ///
    /// Returns `None` for coordinates outside the panel or a degenerate panel.
    pub fn pixel_to_square(&self, x: f32, y: f32) -> Option<Position> {
        if !(self.width_px > 0.0 && self.height_px > 0.0) || self.rows == 0 || self.cols == 0 {
            return None;
        }
        if !(0.0..self.width_px).contains(&x) || !(0.0..self.height_px).contains(&y) {
            return None;
        }
        let cell_w = self.width_px / self.cols as f32;
        let cell_h = self.height_px / self.rows as f32;
        // Clamp guards against float rounding at the far edge
        let view_col = ((x / cell_w) as usize).min(self.cols - 1);
        let view_row = ((y / cell_h) as usize).min(self.rows - 1);
        Some(self.view_square(Position::new(view_row, view_col)))
    }

    /// Board position <-> display cell (row 0 at the top of the panel)
    pub fn view_square(&self, position: Position) -> Position {
        if self.white_at_bottom {
            position
        } else {
            Position::new(
                self.rows.saturating_sub(1 + position.row),
                self.cols.saturating_sub(1 + position.col),
            )
        }
    }

    /// Pixel rectangle `(x, y, width, height)` of a board position
    pub fn square_rect(&self, position: Position) -> (f32, f32, f32, f32) {
        let cell_w = self.width_px / self.cols.max(1) as f32;
        let cell_h = self.height_px / self.rows.max(1) as f32;
        let view = self.view_square(position);
        (view.col as f32 * cell_w, view.row as f32 * cell_h, cell_w, cell_h)
    }

    pub fn axis_labels(&self) -> AxisLabels {
        let mut ranks: Vec<String> = (0..self.rows).map(|row| (self.rows - row).to_string()).collect();
        let mut files: Vec<String> = (0..self.cols).map(file_label).collect();
        if !self.white_at_bottom {
            ranks.reverse();
            files.reverse();
        }
        AxisLabels { ranks, files }
    }

    pub fn flip(&mut self) {
        self.white_at_bottom = !self.white_at_bottom;
    }

    pub fn resize(&mut self, width_px: f32, height_px: f32) {
        self.width_px = width_px;
        self.height_px = height_px;
    }
}

fn file_label(col: usize) -> String {
    match u8::try_from(col) {
        Ok(offset) if offset < 26 => char::from(b'a' + offset).to_string(),
        _ => (col + 1).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Position {
        Position::from_algebraic(name).expect("square")
    }

    #[test]
    fn test_pixel_to_square_white_at_bottom() {
        let viewport = BoardViewport::new(800.0, 800.0, true);
        assert_eq!(viewport.pixel_to_square(5.0, 5.0), Some(sq("a8")));
        assert_eq!(viewport.pixel_to_square(799.0, 799.0), Some(sq("h1")));
        assert_eq!(viewport.pixel_to_square(450.0, 650.0), Some(sq("e2")));
    }

    #[test]
    fn test_pixel_to_square_flipped() {
        //! Flipping mirrors both axes
        let viewport = BoardViewport::new(800.0, 800.0, false);
        assert_eq!(viewport.pixel_to_square(5.0, 5.0), Some(sq("h1")));
        assert_eq!(viewport.pixel_to_square(799.0, 799.0), Some(sq("a8")));
    }

    #[test]
    fn test_outside_panel_has_no_square() {
        let viewport = BoardViewport::new(800.0, 600.0, true);
        assert_eq!(viewport.pixel_to_square(-1.0, 10.0), None);
        assert_eq!(viewport.pixel_to_square(10.0, 600.0), None);
        assert_eq!(viewport.pixel_to_square(f32::NAN, 10.0), None);

        let collapsed = BoardViewport::new(0.0, 600.0, true);
        assert_eq!(collapsed.pixel_to_square(0.0, 10.0), None);
    }

    #[test]
    fn test_view_square_round_trips() {
        let viewport = BoardViewport::new(640.0, 640.0, false);
        let position = sq("c3");
        assert_eq!(viewport.view_square(viewport.view_square(position)), position);
    }

    #[test]
    fn test_axis_labels_follow_orientation() {
        let mut viewport = BoardViewport::default();
        let labels = viewport.axis_labels();
        assert_eq!(labels.ranks.first().map(String::as_str), Some("8"));
        assert_eq!(labels.files.first().map(String::as_str), Some("a"));

        viewport.flip();
        let labels = viewport.axis_labels();
        assert_eq!(labels.ranks.first().map(String::as_str), Some("1"));
        assert_eq!(labels.files.first().map(String::as_str), Some("h"));
    }
}
