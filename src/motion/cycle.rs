//! the idle screen snake, circling a fixed rectangle
use crate::config::CycleBounds;
use crate::types::{Position, GRID};

/// Cells shown while circling
pub const WINDOW_LEN: usize = 5;

/// A closed loop of grid cells around a rectangle: right along the top, down
/// the right side, left along the bottom, then up the left side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyclePath {
    cells: Vec<Position>,
}

impl CyclePath {
    /// builds the perimeter of `bounds`, one cell per grid step. Corners appear once.
    pub fn rectangle(bounds: CycleBounds) -> Self {
        let CycleBounds {
            top,
            bottom,
            left,
            right,
        } = bounds;
        let step = GRID as usize;

        let top_edge = (left..right).step_by(step).map(|x| Position::new(x, top));
        let right_edge = (top..bottom).step_by(step).map(|y| Position::new(right, y));
        let bottom_edge = ((left + GRID)..=right)
            .rev()
            .step_by(step)
            .map(|x| Position::new(x, bottom));
        let left_edge = ((top + GRID)..=bottom)
            .rev()
            .step_by(step)
            .map(|y| Position::new(left, y));

        let cells = top_edge
            .chain(right_edge)
            .chain(bottom_edge)
            .chain(left_edge)
            .collect();
        CyclePath { cells }
    }

    /// number of cells in the loop
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// the cells of the loop in travel order
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    /// `WINDOW_LEN` consecutive cells starting at `cursor`, wrapping around the loop
    pub fn window(&self, cursor: usize) -> Vec<Position> {
        let n = self.cells.len();
        (cursor..cursor + WINDOW_LEN)
            .map(|i| self.cells[i % n])
            .collect()
    }
}

/// A cycle path plus the cursor that walks it, one cell per frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleMotion {
    path: CyclePath,
    cursor: usize,
}

impl CycleMotion {
    #[allow(missing_docs)]
    pub fn new(path: CyclePath) -> Self {
        CycleMotion { path, cursor: 0 }
    }

    #[allow(missing_docs)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// the body shown at the current cursor
    pub fn window(&self) -> Vec<Position> {
        self.path.window(self.cursor)
    }

    /// moves the cursor one cell along the loop
    pub fn advance(&mut self) {
        self.cursor = (self.cursor + 1) % self.path.len();
    }

    /// the current window, then advances the cursor
    pub fn next_window(&mut self) -> Vec<Position> {
        let window = self.window();
        self.advance();
        window
    }
}
