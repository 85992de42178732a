//! Knowledge representation and inference for Minesweeper

pub mod cell;
pub mod sentence;
pub mod engine;

pub use cell::Cell;
pub use sentence::Sentence;
pub use engine::{Deductions, EngineStatistics, KnowledgeEngine, KnowledgeError};
