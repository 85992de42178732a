//! Configuration management for the Minesweeper player

pub mod settings;

pub use settings::{
    Settings, BoardConfig, PlayerConfig, InputConfig, OutputConfig, OutputFormat,
    BenchmarkConfig, CliOverrides
};
