//! The autonomous player and the games it plays

pub mod ai;
pub mod session;
pub mod benchmark;

pub use ai::{MinesweeperAi, Move, MoveKind};
pub use session::{GameOutcome, GameReport, GameSession, MoveRecord};
pub use benchmark::{run_benchmark, BenchmarkSummary};
