//! Minesweeper ground truth: mine layout, reveals and flags

pub mod board;
pub mod io;

pub use board::{Board, BoardError, Reveal};
pub use io::{load_board_from_file, save_board_to_file, create_example_boards};
