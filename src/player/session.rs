//! A single game played by the AI against a ground-truth board

use super::ai::{MinesweeperAi, Move, MoveKind};
use crate::config::Settings;
use crate::game::{load_board_from_file, Board, Reveal};
use crate::knowledge::{Cell, EngineStatistics};
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "result")]
pub enum GameOutcome {
    /// Every safe cell revealed or every mine flagged
    Won,
    /// A guess landed on a mine
    Lost { cell: Cell },
    /// No move left without the board being cleared; only reachable with an inconsistent board
    Stuck,
}

/// One turn of the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub turn: usize,
    pub cell: Cell,
    pub kind: MoveKind,
    pub reveal: Reveal,
    pub new_safes: Vec<Cell>,
    pub new_mines: Vec<Cell>,
}

/// Full account of a finished game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameReport {
    pub seed: u64,
    pub height: usize,
    pub width: usize,
    pub mines: usize,
    pub outcome: GameOutcome,
    pub moves: Vec<MoveRecord>,
    pub certain_moves: usize,
    pub guesses: usize,
    pub flagged: usize,
    pub statistics: EngineStatistics,
    /// Final board, with the player's reveals and flags
    pub board: Board,
    #[serde(skip)]
    pub duration: Duration,
}

impl GameReport {
    pub fn is_win(&self) -> bool {
        self.outcome == GameOutcome::Won
    }

    /// Save the report as JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize game report")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write report: {}", path.as_ref().display()))?;
        Ok(())
    }

    /// Load a report from JSON
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read report: {}", path.as_ref().display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse report: {}", path.as_ref().display()))
    }
}

/// Drives one game from the first guess to a win or a mine
pub struct GameSession {
    seed: u64,
    board: Board,
    ai: MinesweeperAi,
}

impl GameSession {
    /// Create a session from settings, loading or generating the board
    pub fn new(settings: &Settings) -> Result<Self> {
        let seed = settings.player.seed.unwrap_or_else(rand::random::<u64>);
        let mut rng = StdRng::seed_from_u64(seed);

        let board = match settings.input.board_file {
            Some(ref path) => load_board_from_file(path)
                .context("Failed to load board file")?,
            None => Board::random(settings.board.height, settings.board.width, settings.board.mines, &mut rng)
                .context("Failed to generate board")?,
        };

        let ai_seed = rng.gen();
        Ok(Self::with_board(board, seed, ai_seed))
    }

    /// Create a session on an explicit board (useful for testing)
    pub fn with_board(board: Board, seed: u64, ai_seed: u64) -> Self {
        let ai = MinesweeperAi::new(board.height, board.width, ai_seed);
        Self { seed, board, ai }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Play until the game is decided
    pub fn play(mut self) -> Result<GameReport> {
        let start_time = Instant::now();
        info!(
            "Starting {}x{} game with {} mines (seed {})",
            self.board.height, self.board.width, self.board.mine_count(), self.seed
        );

        let mut moves = Vec::new();
        let outcome = loop {
            // An empty mine set is trivially all flagged; only clearing wins there
            if self.board.is_cleared() || (self.board.mine_count() > 0 && self.board.won()) {
                break GameOutcome::Won;
            }

            let Some(Move { cell, kind }) = self.ai.choose_move() else {
                break GameOutcome::Stuck;
            };

            let reveal = self.board.reveal(cell)
                .with_context(|| format!("Failed to reveal {}", cell))?;

            let (new_safes, new_mines) = match reveal {
                Reveal::Mine => (Vec::new(), Vec::new()),
                Reveal::Safe(count) => {
                    let deductions = self.ai.observe(cell, count)
                        .with_context(|| format!("Failed to record observation at {}", cell))?;
                    for &mine in &deductions.mines {
                        self.board.flag(mine)?;
                    }
                    (deductions.safes, deductions.mines)
                }
            };

            debug!("Turn {}: {:?} move {} -> {:?}", moves.len() + 1, kind, cell, reveal);
            moves.push(MoveRecord {
                turn: moves.len() + 1,
                cell,
                kind,
                reveal,
                new_safes,
                new_mines,
            });

            if reveal == Reveal::Mine {
                break GameOutcome::Lost { cell };
            }
        };

        let certain_moves = moves.iter().filter(|m| m.kind == MoveKind::Certain).count();
        let guesses = moves.len() - certain_moves;
        info!("Game finished: {:?} after {} moves ({} guesses)", outcome, moves.len(), guesses);

        Ok(GameReport {
            seed: self.seed,
            height: self.board.height,
            width: self.board.width,
            mines: self.board.mine_count(),
            outcome,
            moves,
            certain_moves,
            guesses,
            flagged: self.board.flagged_count(),
            statistics: self.ai.engine().statistics(),
            board: self.board,
            duration: start_time.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::io::parse_board_from_string;
    use tempfile::tempdir;

    #[test]
    fn test_certain_moves_never_hit_mines() {
        for seed in 0..25 {
            let mut settings = Settings::default();
            settings.player.seed = Some(seed);
            let report = GameSession::new(&settings).unwrap().play().unwrap();

            for record in &report.moves {
                if record.kind == MoveKind::Certain {
                    assert_ne!(record.reveal, Reveal::Mine, "seed {} turn {}", seed, record.turn);
                }
            }
            assert_eq!(report.certain_moves + report.guesses, report.moves.len());
            assert_ne!(report.outcome, GameOutcome::Stuck);
        }
    }

    #[test]
    fn test_flags_are_true_mines() {
        for seed in 0..10 {
            let mut settings = Settings::default();
            settings.player.seed = Some(seed);
            let report = GameSession::new(&settings).unwrap().play().unwrap();
            for record in &report.moves {
                for mine in &record.new_mines {
                    assert!(report.board.is_mine(*mine));
                }
            }
        }
    }

    #[test]
    fn test_mine_free_board_is_won_by_one_guess() {
        let board = Board::from_mines(4, 5, Vec::new()).unwrap();
        let report = GameSession::with_board(board, 0, 11).play().unwrap();

        assert!(report.is_win());
        assert_eq!(report.guesses, 1);
        assert_eq!(report.moves.len(), 20);
        assert!(report.board.is_cleared());
    }

    #[test]
    fn test_guess_on_mine_loses() {
        let mut losses = 0;
        for ai_seed in 0..20 {
            let board = Board::from_mines(1, 2, vec![Cell::new(0, 0)]).unwrap();
            let report = GameSession::with_board(board, 0, ai_seed).play().unwrap();
            match report.outcome {
                GameOutcome::Lost { cell } => {
                    assert_eq!(cell, Cell::new(0, 0));
                    assert_eq!(report.guesses, 1);
                    losses += 1;
                }
                // Revealing (0, 1) first proves (0, 0) is the mine
                GameOutcome::Won => assert_eq!(report.flagged, 1),
                GameOutcome::Stuck => panic!("consistent board left the player stuck"),
            }
        }
        assert!(losses > 0);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut settings = Settings::default();
        settings.player.seed = Some(1234);
        let a = GameSession::new(&settings).unwrap().play().unwrap();
        let b = GameSession::new(&settings).unwrap().play().unwrap();
        assert_eq!(a.moves, b.moves);
        assert_eq!(a.outcome, b.outcome);
    }

    #[test]
    fn test_report_json_file() {
        let board = parse_board_from_string("...\n*.*\n").unwrap();
        let report = GameSession::with_board(board, 5, 5).play().unwrap();

        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("game.json");
        report.save_to_file(&path).unwrap();
        let loaded = GameReport::load_from_file(&path).unwrap();

        assert_eq!(loaded.moves, report.moves);
        assert_eq!(loaded.outcome, report.outcome);
        assert_eq!(loaded.board, report.board);
    }
}
