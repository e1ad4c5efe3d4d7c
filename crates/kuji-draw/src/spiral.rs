//! Center-out square spiral over integer grid cells.
//!
//! Index 0 is the origin; the walk then goes `(1,0) (1,1) (0,1) (-1,1)
//! (-1,0) (-1,-1) (0,-1) (1,-1) (2,-1) ..`, visiting every cell exactly once
//! and ring by ring, so low indices stay near the center.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An integer grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    /// Column (x axis).
    pub col: i32,
    /// Row (z axis).
    pub row: i32,
}

impl GridCell {
    /// The cell at `(col, row)`.
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Chebyshev ring number; the origin is ring 0.
    pub fn ring(&self) -> u32 {
        self.col.unsigned_abs().max(self.row.unsigned_abs())
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.col, self.row)
    }
}

/// Infinite iterator over the spiral.
#[derive(Debug, Clone)]
pub struct SpiralCells {
    col: i32,
    row: i32,
    d_col: i32,
    d_row: i32,
}

impl Default for SpiralCells {
    fn default() -> Self {
        Self::new()
    }
}

impl SpiralCells {
    /// Start a walk at the origin.
    pub fn new() -> Self {
        Self {
            col: 0,
            row: 0,
            d_col: 0,
            d_row: -1,
        }
    }

    fn at_corner(&self) -> bool {
        let (c, r) = (self.col, self.row);
        c == r || (c < 0 && c == -r) || (c > 0 && c == 1 - r)
    }
}

impl Iterator for SpiralCells {
    type Item = GridCell;

    fn next(&mut self) -> Option<GridCell> {
        let cell = GridCell::new(self.col, self.row);
        if self.at_corner() {
            // Rotate the heading 90 degrees.
            (self.d_col, self.d_row) = (-self.d_row, self.d_col);
        }
        self.col += self.d_col;
        self.row += self.d_row;
        Some(cell)
    }
}

/// The first `count` cells of the spiral.
pub fn spiral_cells(count: usize) -> Vec<GridCell> {
    SpiralCells::new().take(count).collect()
}
