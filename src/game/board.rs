//! Ground-truth Minesweeper board

use crate::knowledge::Cell;
use rand::seq::index::sample;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid board dimensions {height}x{width}")]
    InvalidDimensions { height: usize, width: usize },
    #[error("a {height}x{width} board cannot hold {mines} mines")]
    TooManyMines { height: usize, width: usize, mines: usize },
    #[error("cell {cell} is outside the {height}x{width} board")]
    OutOfBounds { cell: Cell, height: usize, width: usize },
}

/// Result of revealing a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reveal {
    Mine,
    Safe(usize),
}

/// Mine layout plus what the player has revealed and flagged so far
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub height: usize,
    pub width: usize,
    mines: BTreeSet<Cell>,
    revealed: BTreeSet<Cell>,
    flagged: BTreeSet<Cell>,
}

impl Board {
    /// Create a board with an explicit mine layout
    pub fn from_mines<I: IntoIterator<Item = Cell>>(height: usize, width: usize, mines: I) -> Result<Self, BoardError> {
        Self::cell_count(height, width)?;

        let mines: BTreeSet<Cell> = mines.into_iter().collect();
        if let Some(&cell) = mines.iter().find(|cell| !cell.in_bounds(height, width)) {
            return Err(BoardError::OutOfBounds { cell, height, width });
        }

        Ok(Self {
            height,
            width,
            mines,
            revealed: BTreeSet::new(),
            flagged: BTreeSet::new(),
        })
    }

    /// Place `mines` mines uniformly at random
    pub fn random<R: Rng + ?Sized>(height: usize, width: usize, mines: usize, rng: &mut R) -> Result<Self, BoardError> {
        let cells = Self::cell_count(height, width)?;
        if mines > cells {
            return Err(BoardError::TooManyMines { height, width, mines });
        }

        let layout = sample(rng, cells, mines)
            .into_iter()
            .map(|idx| Cell::new(idx / width, idx % width));
        Self::from_mines(height, width, layout)
    }

    /// Number of cells on a `height` x `width` board, rejecting empty or overflowing sizes
    fn cell_count(height: usize, width: usize) -> Result<usize, BoardError> {
        match height.checked_mul(width) {
            Some(cells) if cells > 0 => Ok(cells),
            _ => Err(BoardError::InvalidDimensions { height, width }),
        }
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.in_bounds(self.height, self.width)
    }

    fn check_bounds(&self, cell: Cell) -> Result<(), BoardError> {
        if self.in_bounds(cell) {
            Ok(())
        } else {
            Err(BoardError::OutOfBounds {
                cell,
                height: self.height,
                width: self.width,
            })
        }
    }

    pub fn is_mine(&self, cell: Cell) -> bool {
        self.mines.contains(&cell)
    }

    /// Number of mines among the cell's neighbours, not counting the cell itself
    pub fn nearby_mines(&self, cell: Cell) -> usize {
        cell.neighbors(self.height, self.width)
            .filter(|neighbor| self.is_mine(*neighbor))
            .count()
    }

    /// Uncover a cell, reporting either a mine or its neighbour count
    pub fn reveal(&mut self, cell: Cell) -> Result<Reveal, BoardError> {
        self.check_bounds(cell)?;
        self.revealed.insert(cell);
        if self.is_mine(cell) {
            Ok(Reveal::Mine)
        } else {
            Ok(Reveal::Safe(self.nearby_mines(cell)))
        }
    }

    /// Mark a cell as a suspected mine
    pub fn flag(&mut self, cell: Cell) -> Result<(), BoardError> {
        self.check_bounds(cell)?;
        self.flagged.insert(cell);
        Ok(())
    }

    pub fn is_revealed(&self, cell: Cell) -> bool {
        self.revealed.contains(&cell)
    }

    pub fn is_flagged(&self, cell: Cell) -> bool {
        self.flagged.contains(&cell)
    }

    pub fn mines(&self) -> &BTreeSet<Cell> {
        &self.mines
    }

    pub fn mine_count(&self) -> usize {
        self.mines.len()
    }

    pub fn flagged_count(&self) -> usize {
        self.flagged.len()
    }

    /// All mines, and nothing else, have been flagged
    pub fn won(&self) -> bool {
        self.flagged == self.mines
    }

    /// Every non-mine cell has been revealed
    pub fn is_cleared(&self) -> bool {
        let safe_cells = self.height.saturating_mul(self.width).saturating_sub(self.mines.len());
        self.revealed.iter().filter(|cell| !self.is_mine(**cell)).count() == safe_cells
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = format!("{}-", "--".repeat(self.width));
        for row in 0..self.height {
            writeln!(f, "{}", separator)?;
            for col in 0..self.width {
                let symbol = if self.is_mine(Cell::new(row, col)) { "|X" } else { "| " };
                write!(f, "{}", symbol)?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{}", separator)
    }
}
