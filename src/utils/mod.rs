//! Output helpers shared by the CLI commands

pub mod display;

pub use display::{ColorOutput, Color, ReportFormatter};
