use serde::{Deserialize, Serialize};

/// Grid position of a placed cell. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

/// Placement grid. Slots are numbered column-major: `slot = x * rows + y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub rows: u32,
    pub cols: u32,
}

impl Grid {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    pub fn slot_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    #[inline]
    pub fn coord_of(&self, slot: u32) -> Coord {
        Coord {
            x: slot / self.rows,
            y: slot % self.rows,
        }
    }

    /// Returns `None` for coordinates outside the grid.
    #[inline]
    pub fn slot_of(&self, coord: Coord) -> Option<u32> {
        if coord.x < self.cols && coord.y < self.rows {
            Some(coord.x * self.rows + coord.y)
        } else {
            None
        }
    }
}
