//! Knowledge base and fixed-point inference
//!
//! The engine accumulates sentences of the form "exactly `n` of these cells are
//! mines" and closes them under two rules: trivially decided sentences mark their
//! cells, and a sentence contained in another yields the difference of the two.

use super::{Cell, Sentence};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KnowledgeError {
    #[error("cell {cell} is outside the {height}x{width} grid")]
    OutOfBounds { cell: Cell, height: usize, width: usize },
}

/// Facts newly proven while processing one observation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    pub safes: Vec<Cell>,
    pub mines: Vec<Cell>,
}

impl Deductions {
    pub fn is_empty(&self) -> bool {
        self.safes.is_empty() && self.mines.is_empty()
    }
}

/// Knowledge accumulated over one game
#[derive(Debug, Clone)]
pub struct KnowledgeEngine {
    height: usize,
    width: usize,
    moves_made: HashSet<Cell>,
    safes: HashSet<Cell>,
    mines: HashSet<Cell>,
    knowledge: Vec<Sentence>,
}

impl KnowledgeEngine {
    /// Create an engine knowing nothing about a `height` x `width` board
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            moves_made: HashSet::new(),
            safes: HashSet::new(),
            mines: HashSet::new(),
            knowledge: Vec::new(),
        }
    }

    /// Record `cell` as a mine in the engine and in every sentence
    pub fn mark_mine(&mut self, cell: Cell) {
        self.mines.insert(cell);
        for sentence in &mut self.knowledge {
            sentence.mark_mine(cell);
        }
    }

    /// Record `cell` as safe in the engine and in every sentence
    pub fn mark_safe(&mut self, cell: Cell) {
        self.safes.insert(cell);
        for sentence in &mut self.knowledge {
            sentence.mark_safe(cell);
        }
    }

    /// Absorb the neighbour mine count of a revealed, non-mine cell and draw
    /// every conclusion that follows from the knowledge base.
    pub fn record_observation(&mut self, cell: Cell, count: usize) -> Result<Deductions, KnowledgeError> {
        if !cell.in_bounds(self.height, self.width) {
            return Err(KnowledgeError::OutOfBounds {
                cell,
                height: self.height,
                width: self.width,
            });
        }

        self.moves_made.insert(cell);
        // A revealed cell is safe, whatever was concluded before
        if self.mines.remove(&cell) {
            warn!("Observed cell {} was recorded as a mine; keeping it safe", cell);
        }
        self.mark_safe(cell);

        let mut known_mine_neighbors = 0;
        let mut undetermined = BTreeSet::new();
        for neighbor in cell.neighbors(self.height, self.width) {
            if self.mines.contains(&neighbor) {
                known_mine_neighbors += 1;
            } else if !self.safes.contains(&neighbor) {
                undetermined.insert(neighbor);
            }
        }

        let adjusted_count = count.checked_sub(known_mine_neighbors).unwrap_or_else(|| {
            warn!(
                "Observation {} = {} conflicts with {} known neighbouring mines",
                cell, count, known_mine_neighbors
            );
            0
        });

        if !undetermined.is_empty() {
            let sentence = Sentence::new(undetermined, adjusted_count);
            if !sentence.is_consistent() {
                warn!("Observation {} produced unsatisfiable sentence {}", cell, sentence);
            }
            self.add_sentence(sentence);
        }

        let deductions = self.close();
        debug!(
            "Observed {} = {}: {} new safes, {} new mines, {} sentences held",
            cell,
            count,
            deductions.safes.len(),
            deductions.mines.len(),
            self.knowledge.len()
        );
        Ok(deductions)
    }

    /// Append `sentence` unless an equal one is already held
    fn add_sentence(&mut self, sentence: Sentence) -> bool {
        if self.knowledge.contains(&sentence) {
            return false;
        }
        trace!("New sentence {}", sentence);
        self.knowledge.push(sentence);
        true
    }

    /// Run the deduction rules until a full pass changes nothing
    fn close(&mut self) -> Deductions {
        let mut deductions = Deductions::default();
        let mut pass = 0;

        loop {
            pass += 1;
            let mut changed = false;

            let mut safes_found = BTreeSet::new();
            let mut mines_found = BTreeSet::new();
            for sentence in &self.knowledge {
                safes_found.extend(sentence.known_safes());
                mines_found.extend(sentence.known_mines());
            }

            for cell in safes_found {
                if !self.safes.contains(&cell) {
                    self.mark_safe(cell);
                    deductions.safes.push(cell);
                    changed = true;
                }
            }

            for cell in mines_found {
                if self.safes.contains(&cell) {
                    warn!("Cell {} is implied to be both safe and a mine; keeping it safe", cell);
                    continue;
                }
                if !self.mines.contains(&cell) {
                    self.mark_mine(cell);
                    deductions.mines.push(cell);
                    changed = true;
                }
            }

            self.prune();

            let derived = self.subset_inferences();
            if !derived.is_empty() {
                trace!("Pass {} derived {} sentences", pass, derived.len());
                self.knowledge.extend(derived);
                changed = true;
            }

            if !changed {
                break;
            }
        }

        trace!("Closure reached a fixed point after {} passes", pass);
        deductions.safes.sort();
        deductions.mines.sort();
        deductions
    }

    /// Drop resolved sentences and collapse sentences that became equal after marking
    fn prune(&mut self) {
        let mut seen = HashSet::new();
        self.knowledge
            .retain(|sentence| !sentence.is_empty() && seen.insert(sentence.clone()));
    }

    /// New sentences `B - A` for every pair where `A` is a proper subset of `B`
    fn subset_inferences(&self) -> Vec<Sentence> {
        let mut derived: Vec<Sentence> = Vec::new();

        for subset in &self.knowledge {
            for superset in &self.knowledge {
                if !subset.is_proper_subset_of(superset) {
                    continue;
                }
                match superset.subtract(subset) {
                    Some(sentence) => {
                        if !self.knowledge.contains(&sentence) && !derived.contains(&sentence) {
                            derived.push(sentence);
                        }
                    }
                    None => warn!(
                        "Skipping contradictory inference: {} is contained in {}",
                        subset, superset
                    ),
                }
            }
        }

        derived
    }

    /// A known-safe cell that has not been played yet, smallest in row-major order
    pub fn next_certain_safe_move(&self) -> Option<Cell> {
        self.safes.difference(&self.moves_made).min().copied()
    }

    /// Uniformly pick a cell that has not been played and is not a known mine.
    ///
    /// The cell may or may not be safe.
    pub fn random_undetermined_move<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Cell> {
        let candidates: Vec<Cell> = Cell::all(self.height, self.width)
            .filter(|cell| !self.moves_made.contains(cell) && !self.mines.contains(cell))
            .collect();
        candidates.choose(rng).copied()
    }

    pub fn safes(&self) -> &HashSet<Cell> {
        &self.safes
    }

    pub fn mines(&self) -> &HashSet<Cell> {
        &self.mines
    }

    pub fn moves_made(&self) -> &HashSet<Cell> {
        &self.moves_made
    }

    pub fn knowledge(&self) -> &[Sentence] {
        &self.knowledge
    }

    /// Grid dimensions as `(height, width)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn is_undetermined(&self, cell: Cell) -> bool {
        !self.safes.contains(&cell) && !self.mines.contains(&cell)
    }

    /// Cells neither proven safe nor proven mines, in row-major order
    pub fn undetermined_cells(&self) -> Vec<Cell> {
        Cell::all(self.height, self.width)
            .filter(|&cell| self.is_undetermined(cell))
            .collect()
    }

    pub fn statistics(&self) -> EngineStatistics {
        EngineStatistics {
            moves_made: self.moves_made.len(),
            known_safes: self.safes.len(),
            known_mines: self.mines.len(),
            undetermined: self.undetermined_cells().len(),
            sentences: self.knowledge.len(),
        }
    }
}

/// Snapshot of the size of the knowledge base
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStatistics {
    pub moves_made: usize,
    pub known_safes: usize,
    pub known_mines: usize,
    pub undetermined: usize,
    pub sentences: usize,
}

impl fmt::Display for EngineStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Knowledge Statistics:")?;
        writeln!(f, "  Moves made: {}", self.moves_made)?;
        writeln!(f, "  Known safe cells: {}", self.known_safes)?;
        writeln!(f, "  Known mines: {}", self.known_mines)?;
        writeln!(f, "  Undetermined cells: {}", self.undetermined)?;
        writeln!(f, "  Active sentences: {}", self.sentences)?;
        Ok(())
    }
}
