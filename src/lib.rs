//! Minesweeper AI
//!
//! This library provides a knowledge-based inference engine that deduces safe
//! cells and mines from neighbour counts, and a player that uses it.

pub mod config;
pub mod game;
pub mod knowledge;
pub mod player;
pub mod utils;

pub use config::Settings;
pub use knowledge::{Cell, KnowledgeEngine, Sentence};
pub use player::{GameReport, GameSession};

use anyhow::Result;

/// Main entry point for playing a single game
pub fn play_game(settings: &Settings) -> Result<GameReport> {
    GameSession::new(settings)?.play()
}
