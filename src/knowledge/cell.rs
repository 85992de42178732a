//! Grid coordinates shared by the board and the knowledge engine

use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A `(row, col)` position on the board, 0-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Check whether the cell lies inside a `height` x `width` grid
    #[inline]
    pub fn in_bounds(&self, height: usize, width: usize) -> bool {
        self.row < height && self.col < width
    }

    /// All cells of the Moore neighbourhood, clipped to the grid, excluding the cell itself
    pub fn neighbors(self, height: usize, width: usize) -> impl Iterator<Item = Cell> {
        iproduct!([-1isize, 0, 1], [-1isize, 0, 1])
            .filter(|&(dr, dc)| dr != 0 || dc != 0)
            .filter_map(move |(dr, dc)| {
                let row = self.row.checked_add_signed(dr)?;
                let col = self.col.checked_add_signed(dc)?;
                let neighbor = Cell::new(row, col);
                neighbor.in_bounds(height, width).then_some(neighbor)
            })
    }

    /// Every cell of a `height` x `width` grid in row-major order
    pub fn all(height: usize, width: usize) -> impl Iterator<Item = Cell> {
        iproduct!(0..height, 0..width).map(|(row, col)| Cell::new(row, col))
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell::new(row, col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_has_eight_neighbors() {
        let neighbors: Vec<Cell> = Cell::new(1, 1).neighbors(3, 3).collect();
        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&Cell::new(1, 1)));
    }

    #[test]
    fn test_corner_neighbors_are_clipped() {
        let mut neighbors: Vec<Cell> = Cell::new(0, 0).neighbors(3, 3).collect();
        neighbors.sort();
        assert_eq!(neighbors, vec![Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]);

        let far_corner: Vec<Cell> = Cell::new(2, 4).neighbors(3, 5).collect();
        assert_eq!(far_corner.len(), 3);
    }

    #[test]
    fn test_single_cell_grid_has_no_neighbors() {
        assert_eq!(Cell::new(0, 0).neighbors(1, 1).count(), 0);
    }

    #[test]
    fn test_row_major_ordering() {
        let cells: Vec<Cell> = Cell::all(2, 2).collect();
        assert_eq!(cells, vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]);
        assert!(Cell::new(0, 5) < Cell::new(1, 0));
    }
}
