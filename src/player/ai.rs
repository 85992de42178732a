//! Move selection on top of the knowledge engine

use crate::knowledge::{Cell, Deductions, KnowledgeEngine, KnowledgeError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// How a move was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    /// Proven safe by the knowledge base
    Certain,
    /// Picked at random among undetermined cells
    Guess,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub cell: Cell,
    pub kind: MoveKind,
}

/// Autonomous player: prefers certain moves and guesses only when it must
pub struct MinesweeperAi {
    engine: KnowledgeEngine,
    rng: StdRng,
}

impl MinesweeperAi {
    pub fn new(height: usize, width: usize, seed: u64) -> Self {
        Self {
            engine: KnowledgeEngine::new(height, width),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Next cell to reveal, or `None` when every cell is played or a known mine
    pub fn choose_move(&mut self) -> Option<Move> {
        if let Some(cell) = self.engine.next_certain_safe_move() {
            return Some(Move { cell, kind: MoveKind::Certain });
        }
        self.engine
            .random_undetermined_move(&mut self.rng)
            .map(|cell| Move { cell, kind: MoveKind::Guess })
    }

    /// Feed back the neighbour count of a revealed safe cell
    pub fn observe(&mut self, cell: Cell, count: usize) -> Result<Deductions, KnowledgeError> {
        self.engine.record_observation(cell, count)
    }

    pub fn engine(&self) -> &KnowledgeEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_move_is_a_guess() {
        let mut ai = MinesweeperAi::new(4, 4, 1);
        let first = ai.choose_move().unwrap();
        assert_eq!(first.kind, MoveKind::Guess);
        assert!(first.cell.in_bounds(4, 4));
    }

    #[test]
    fn test_prefers_certain_moves() {
        let mut ai = MinesweeperAi::new(3, 3, 1);
        ai.observe(Cell::new(0, 0), 0).unwrap();
        let next = ai.choose_move().unwrap();
        assert_eq!(next, Move { cell: Cell::new(0, 1), kind: MoveKind::Certain });
    }

    #[test]
    fn test_same_seed_same_guesses() {
        let mut a = MinesweeperAi::new(10, 10, 99);
        let mut b = MinesweeperAi::new(10, 10, 99);
        assert_eq!(a.choose_move(), b.choose_move());
    }

    #[test]
    fn test_no_move_when_board_exhausted() {
        let mut ai = MinesweeperAi::new(1, 2, 5);
        ai.observe(Cell::new(0, 0), 1).unwrap();
        assert!(ai.engine().mines().contains(&Cell::new(0, 1)));
        assert_eq!(ai.choose_move(), None);
    }
}
