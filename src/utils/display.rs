//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::game::Board;
use crate::knowledge::Cell;
use crate::player::{GameOutcome, GameReport, MoveKind};
use anyhow::{Context, Result};
use std::path::Path;

/// Format game reports for display
pub struct ReportFormatter;

impl ReportFormatter {
    /// Symbol for a cell as the player sees it
    fn player_symbol(board: &Board, cell: Cell) -> char {
        if board.is_revealed(cell) {
            if board.is_mine(cell) {
                'X'
            } else {
                match board.nearby_mines(cell) {
                    0 => '·',
                    n => char::from_digit(n as u32, 10).unwrap_or('?'),
                }
            }
        } else if board.is_flagged(cell) {
            'F'
        } else {
            '#'
        }
    }

    /// Format the board as the player sees it
    pub fn format_player_view(board: &Board) -> String {
        let mut output = String::new();
        for row in 0..board.height {
            for col in 0..board.width {
                output.push(Self::player_symbol(board, Cell::new(row, col)));
            }
            output.push('\n');
        }
        output
    }

    /// Format the player's view with coordinates
    pub fn format_board_with_coords(board: &Board) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for col in 0..board.width {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        for row in 0..board.height {
            output.push_str(&format!("{:2} ", row));
            for col in 0..board.width {
                output.push_str(&format!(" {}", Self::player_symbol(board, Cell::new(row, col))));
            }
            output.push('\n');
        }

        output
    }

    fn outcome_label(outcome: &GameOutcome) -> String {
        match outcome {
            GameOutcome::Won => "Won".to_string(),
            GameOutcome::Lost { cell } => format!("Lost (mine at {})", cell),
            GameOutcome::Stuck => "Stuck".to_string(),
        }
    }

    /// Format a single game report for console output
    pub fn format_report(report: &GameReport, show_moves: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== Game (seed {}) ===\n", report.seed));
        output.push_str(&format!("Board: {}x{}, {} mines\n", report.height, report.width, report.mines));
        output.push_str(&format!("Outcome: {}\n", Self::outcome_label(&report.outcome)));
        output.push_str(&format!("Moves: {} ({} certain, {} guesses)\n",
                                report.moves.len(), report.certain_moves, report.guesses));
        output.push_str(&format!("Mines flagged: {}/{}\n", report.flagged, report.mines));
        output.push_str(&format!("Play Time: {:.3}s\n", report.duration.as_secs_f64()));
        output.push('\n');

        if show_moves {
            output.push_str("Moves:\n");
            for record in &report.moves {
                let kind = match record.kind {
                    MoveKind::Certain => "certain",
                    MoveKind::Guess => "guess",
                };
                output.push_str(&format!("{:4}. {:<10} {:<8} {:?}", record.turn, record.cell.to_string(), kind, record.reveal));
                if !record.new_safes.is_empty() || !record.new_mines.is_empty() {
                    output.push_str(&format!(" -> +{} safe, +{} mines", record.new_safes.len(), record.new_mines.len()));
                }
                output.push('\n');
            }
            output.push('\n');
        }

        output.push_str("Final Board:\n");
        output.push_str(&Self::format_board_with_coords(&report.board));
        output.push('\n');
        output.push_str("Mine Layout:\n");
        output.push_str(&report.board.to_string());

        output
    }

    /// Save reports to files based on output format
    pub fn save_reports<P: AsRef<Path>>(
        reports: &[GameReport],
        output_dir: P,
        format: OutputFormat,
    ) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        match format {
            OutputFormat::Text => {
                for (i, report) in reports.iter().enumerate() {
                    let filepath = output_dir.join(format!("game_{:03}.txt", i + 1));
                    std::fs::write(&filepath, Self::format_report(report, true))
                        .with_context(|| format!("Failed to write {}", filepath.display()))?;
                }
            }
            OutputFormat::Json => {
                for (i, report) in reports.iter().enumerate() {
                    report.save_to_file(output_dir.join(format!("game_{:03}.json", i + 1)))?;
                }
            }
        }

        Ok(())
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() &&
        (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::GameSession;
    use tempfile::tempdir;

    fn played_board() -> Board {
        let mut board = Board::from_mines(2, 3, vec![Cell::new(1, 0)]).unwrap();
        board.reveal(Cell::new(0, 2)).unwrap();
        board.reveal(Cell::new(0, 0)).unwrap();
        board.flag(Cell::new(1, 0)).unwrap();
        board
    }

    #[test]
    fn test_player_view() {
        let view = ReportFormatter::format_player_view(&played_board());
        assert_eq!(view, "1#·\nF##\n");
    }

    #[test]
    fn test_board_with_coords() {
        let with_coords = ReportFormatter::format_board_with_coords(&played_board());
        assert!(with_coords.starts_with("    0 1 2\n"));
        assert!(with_coords.contains(" 1  F # #"));
    }

    #[test]
    fn test_format_report() {
        let board = Board::from_mines(3, 3, Vec::new()).unwrap();
        let report = GameSession::with_board(board, 9, 9).play().unwrap();
        let text = ReportFormatter::format_report(&report, true);
        assert!(text.contains("Outcome: Won"));
        assert!(text.contains("guess"));
        assert!(text.contains("Mine Layout:"));
    }

    #[test]
    fn test_save_reports() {
        let board = Board::from_mines(2, 2, Vec::new()).unwrap();
        let report = GameSession::with_board(board, 1, 1).play().unwrap();
        let temp_dir = tempdir().unwrap();

        ReportFormatter::save_reports(&[report.clone()], temp_dir.path(), OutputFormat::Text).unwrap();
        assert!(temp_dir.path().join("game_001.txt").exists());

        ReportFormatter::save_reports(&[report], temp_dir.path(), OutputFormat::Json).unwrap();
        assert!(temp_dir.path().join("game_001.json").exists());
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        // Should either be colored or plain text
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
