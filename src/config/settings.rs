//! Configuration settings for the Minesweeper player

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub board: BoardConfig,
    pub player: PlayerConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub benchmark: BenchmarkConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub height: usize,
    pub width: usize,
    pub mines: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Seed for board generation and guesses; drawn from entropy when absent
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Play this fixed layout instead of a random board
    pub board_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub save_reports: bool,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    pub games: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board: BoardConfig {
                height: 8,
                width: 8,
                mines: 8,
            },
            player: PlayerConfig { seed: None },
            input: InputConfig { board_file: None },
            output: OutputConfig {
                format: OutputFormat::Text,
                save_reports: false,
                output_directory: PathBuf::from("output/games"),
            },
            benchmark: BenchmarkConfig { games: 100 },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.board.height == 0 || self.board.width == 0 {
            anyhow::bail!("Board dimensions must be positive, got {}x{}", self.board.height, self.board.width);
        }

        let Some(cells) = self.board.height.checked_mul(self.board.width) else {
            anyhow::bail!("Board dimensions {}x{} are too large", self.board.height, self.board.width);
        };

        // A board file brings its own layout, so the mine count only applies to random boards
        if self.input.board_file.is_none() && self.board.mines > cells {
            anyhow::bail!("A {}x{} board cannot hold {} mines", self.board.height, self.board.width, self.board.mines);
        }

        if self.benchmark.games == 0 {
            anyhow::bail!("Number of benchmark games must be positive");
        }

        if let Some(ref board_file) = self.input.board_file {
            if !board_file.exists() {
                anyhow::bail!("Board file does not exist: {}", board_file.display());
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(height) = cli_overrides.height {
            self.board.height = height;
        }
        if let Some(width) = cli_overrides.width {
            self.board.width = width;
        }
        if let Some(mines) = cli_overrides.mines {
            self.board.mines = mines;
        }
        if let Some(seed) = cli_overrides.seed {
            self.player.seed = Some(seed);
        }
        if let Some(games) = cli_overrides.games {
            self.benchmark.games = games;
        }
        if let Some(ref board_file) = cli_overrides.board_file {
            self.input.board_file = Some(board_file.clone());
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
            self.output.save_reports = true;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub height: Option<usize>,
    pub width: Option<usize>,
    pub mines: Option<usize>,
    pub seed: Option<u64>,
    pub games: Option<usize>,
    pub board_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}
