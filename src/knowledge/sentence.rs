//! Logical sentences about the board

use super::Cell;
use itertools::Itertools;
use std::collections::BTreeSet;
use std::fmt;

/// Statement that exactly `count` of `cells` are mines
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sentence {
    cells: BTreeSet<Cell>,
    count: usize,
}

impl Sentence {
    /// Create a new sentence
    pub fn new<I: IntoIterator<Item = Cell>>(cells: I, count: usize) -> Self {
        Self {
            cells: cells.into_iter().collect(),
            count,
        }
    }

    pub fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A sentence without cells carries no information
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells that must all be mines
    pub fn known_mines(&self) -> BTreeSet<Cell> {
        if self.count > 0 && self.count == self.cells.len() {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// Cells that must all be safe
    pub fn known_safes(&self) -> BTreeSet<Cell> {
        if self.count == 0 {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// Remove a cell known to be a mine, which accounts for one of the counted mines
    pub fn mark_mine(&mut self, cell: Cell) {
        if self.cells.remove(&cell) {
            // Only inconsistent observations can drive this below zero
            self.count = self.count.saturating_sub(1);
        }
    }

    /// Remove a cell known to be safe
    pub fn mark_safe(&mut self, cell: Cell) {
        self.cells.remove(&cell);
    }

    pub fn is_proper_subset_of(&self, other: &Sentence) -> bool {
        self.cells.len() < other.cells.len() && self.cells.is_subset(&other.cells)
    }

    /// Derive the sentence covering the cells of `self` that `subset` does not mention.
    ///
    /// Returns `None` if `subset` is not a proper subset of `self`, or if it claims
    /// more mines than `self`, which only happens with contradictory knowledge.
    pub fn subtract(&self, subset: &Sentence) -> Option<Sentence> {
        if subset.is_empty() || !subset.is_proper_subset_of(self) {
            return None;
        }
        let count = self.count.checked_sub(subset.count)?;
        let cells = self.cells.difference(&subset.cells).copied();
        Some(Sentence::new(cells, count))
    }

    /// Check the `count <= |cells|` half of the sentence invariant
    pub fn is_consistent(&self) -> bool {
        self.count <= self.cells.len()
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}} = {}", self.cells.iter().join(", "), self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(coords: &[(usize, usize)]) -> Vec<Cell> {
        coords.iter().map(|&c| Cell::from(c)).collect()
    }

    fn set(coords: &[(usize, usize)]) -> BTreeSet<Cell> {
        cells(coords).into_iter().collect()
    }

    #[test]
    fn test_known_mines_when_count_equals_size() {
        let sentence = Sentence::new(cells(&[(0, 0), (0, 1)]), 2);
        assert_eq!(sentence.known_mines(), set(&[(0, 0), (0, 1)]));
        assert!(sentence.known_safes().is_empty());
    }

    #[test]
    fn test_known_safes_when_count_is_zero() {
        let sentence = Sentence::new(cells(&[(1, 1), (2, 2)]), 0);
        assert_eq!(sentence.known_safes().len(), 2);
        assert!(sentence.known_mines().is_empty());

        let empty = Sentence::new(Vec::new(), 0);
        assert!(empty.known_safes().is_empty());
        assert!(empty.known_mines().is_empty());
    }

    #[test]
    fn test_undecided_sentence_has_no_conclusions() {
        let sentence = Sentence::new(cells(&[(0, 0), (0, 1), (0, 2)]), 1);
        assert!(sentence.known_mines().is_empty());
        assert!(sentence.known_safes().is_empty());
    }

    #[test]
    fn test_mark_mine_shrinks_cells_and_count() {
        let mut sentence = Sentence::new(cells(&[(0, 0), (0, 1), (0, 2)]), 2);
        sentence.mark_mine(Cell::new(0, 1));
        assert_eq!(sentence, Sentence::new(cells(&[(0, 0), (0, 2)]), 1));

        // Cells outside the sentence leave it untouched
        sentence.mark_mine(Cell::new(5, 5));
        assert_eq!(sentence, Sentence::new(cells(&[(0, 0), (0, 2)]), 1));
    }

    #[test]
    fn test_mark_safe_keeps_count() {
        let mut sentence = Sentence::new(cells(&[(0, 0), (0, 1), (0, 2)]), 1);
        sentence.mark_safe(Cell::new(0, 0));
        assert_eq!(sentence, Sentence::new(cells(&[(0, 1), (0, 2)]), 1));
        sentence.mark_safe(Cell::new(0, 0));
        assert_eq!(sentence.len(), 2);
    }

    #[test]
    fn test_subtract_proper_subset() {
        let a = Sentence::new(cells(&[(0, 0), (0, 1)]), 1);
        let b = Sentence::new(cells(&[(0, 0), (0, 1), (0, 2)]), 2);

        let derived = b.subtract(&a).unwrap();
        assert_eq!(derived, Sentence::new(cells(&[(0, 2)]), 1));
        assert_eq!(derived.known_mines(), set(&[(0, 2)]));

        assert!(a.subtract(&b).is_none());
        assert!(b.subtract(&b.clone()).is_none());
    }

    #[test]
    fn test_subtract_rejects_contradiction() {
        let a = Sentence::new(cells(&[(0, 0)]), 1);
        let b = Sentence::new(cells(&[(0, 0), (0, 1)]), 0);
        assert!(b.subtract(&a).is_none());
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let a = Sentence::new(cells(&[(0, 1), (0, 0)]), 1);
        let b = Sentence::new(cells(&[(0, 0), (0, 1)]), 1);
        assert_eq!(a, b);
        assert_ne!(a, Sentence::new(cells(&[(0, 0), (0, 1)]), 2));
    }

    #[test]
    fn test_display() {
        let sentence = Sentence::new(cells(&[(0, 1), (0, 0)]), 1);
        assert_eq!(sentence.to_string(), "{(0, 0), (0, 1)} = 1");
    }
}
