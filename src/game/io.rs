//! File I/O operations for Minesweeper boards

use super::Board;
use crate::knowledge::Cell;
use anyhow::{Context, Result};
use std::path::Path;

const MINE: char = '*';
const SAFE: char = '.';

/// Load a board from a text file
/// Format: Each line represents a row, with '*' for mines and '.' for safe cells
pub fn load_board_from_file<P: AsRef<Path>>(path: P) -> Result<Board> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read board file: {}", path.as_ref().display()))?;

    parse_board_from_string(&content)
        .with_context(|| format!("Failed to parse board from file: {}", path.as_ref().display()))
}

/// Parse a board from a string representation
pub fn parse_board_from_string(content: &str) -> Result<Board> {
    let lines: Vec<&str> = content.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Board file is empty or contains no valid rows");
    }

    let height = lines.len();
    let width = lines[0].chars().count();
    let mut mines = Vec::new();

    for (row, line) in lines.iter().enumerate() {
        let len = line.chars().count();
        if len != width {
            anyhow::bail!("Row {} has length {}, expected {} (all rows must have the same length)",
                         row, len, width);
        }

        for (col, ch) in line.chars().enumerate() {
            match ch {
                MINE => mines.push(Cell::new(row, col)),
                SAFE => {}
                _ => anyhow::bail!("Invalid character '{}' at position ({}, {}). Only '{}' and '{}' are allowed",
                                 ch, row, col, MINE, SAFE),
            }
        }
    }

    Ok(Board::from_mines(height, width, mines)?)
}

/// Save a board's mine layout to a text file
pub fn save_board_to_file<P: AsRef<Path>>(board: &Board, path: P) -> Result<()> {
    let content = board_to_string(board);

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write board to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Convert a board's mine layout to its text representation
pub fn board_to_string(board: &Board) -> String {
    let mut result = String::with_capacity(board.height * (board.width + 1));

    for row in 0..board.height {
        for col in 0..board.width {
            result.push(if board.is_mine(Cell::new(row, col)) { MINE } else { SAFE });
        }
        result.push('\n');
    }

    result
}

/// Create example board files for testing
pub fn create_example_boards<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    // Solvable from any corner without guessing
    let corner = "....\n....\n....\n...*\n";
    std::fs::write(dir.join("corner.txt"), corner)
        .context("Failed to write corner.txt")?;

    // The 1-2-1 pattern along the top edge
    let one_two_one = "...\n*.*\n";
    std::fs::write(dir.join("one_two_one.txt"), one_two_one)
        .context("Failed to write one_two_one.txt")?;

    // Beginner-sized board with the classic 8 mines
    let beginner = "*.......\n....*...\n........\n.*....*.\n........\n...*....\n*.......\n.....*.*\n";
    std::fs::write(dir.join("beginner.txt"), beginner)
        .context("Failed to write beginner.txt")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_board_from_string() {
        let content = ".*.\n...\n*..\n";
        let board = parse_board_from_string(content).unwrap();

        assert_eq!(board.width, 3);
        assert_eq!(board.height, 3);
        assert_eq!(board.mine_count(), 2);
        assert!(board.is_mine(Cell::new(0, 1)));
        assert!(board.is_mine(Cell::new(2, 0)));
        assert_eq!(board.nearby_mines(Cell::new(1, 1)), 2);
    }

    #[test]
    fn test_board_to_string() {
        let board = Board::from_mines(2, 3, vec![Cell::new(0, 0), Cell::new(1, 2)]).unwrap();
        assert_eq!(board_to_string(&board), "*..\n..*\n");
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("boards/test_board.txt");

        let original = Board::from_mines(2, 4, vec![Cell::new(1, 3)]).unwrap();
        save_board_to_file(&original, &file_path).unwrap();
        let loaded = load_board_from_file(&file_path).unwrap();

        assert_eq!(original, loaded);
    }

    #[test]
    fn test_invalid_input() {
        assert!(parse_board_from_string(".*.\n.X.\n").is_err());
        assert!(parse_board_from_string("...\n..\n...\n").is_err());
        assert!(parse_board_from_string("").is_err());
        assert!(parse_board_from_string("\n  \n").is_err());
    }

    #[test]
    fn test_create_example_boards() {
        let temp_dir = tempdir().unwrap();
        create_example_boards(temp_dir.path()).unwrap();

        for name in ["corner.txt", "one_two_one.txt", "beginner.txt"] {
            assert!(temp_dir.path().join(name).exists());
        }

        let beginner = load_board_from_file(temp_dir.path().join("beginner.txt")).unwrap();
        assert_eq!((beginner.height, beginner.width), (8, 8));
        assert_eq!(beginner.mine_count(), 8);
    }
}
