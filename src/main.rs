//! Main CLI application for the Minesweeper AI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use minesweeper_ai::{
    config::{CliOverrides, Settings},
    game::create_example_boards,
    player::{run_benchmark, GameOutcome, GameSession},
    utils::{ColorOutput, ReportFormatter},
};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "minesweeper_ai")]
#[command(about = "Knowledge-based Minesweeper player")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game
    Play {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Board layout file (overrides config)
        #[arg(short, long)]
        board: Option<PathBuf>,

        /// Board height (overrides config)
        #[arg(long)]
        height: Option<usize>,

        /// Board width (overrides config)
        #[arg(long)]
        width: Option<usize>,

        /// Number of mines (overrides config)
        #[arg(short, long)]
        mines: Option<usize>,

        /// Random seed (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output directory for the game report (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// List every move
        #[arg(long)]
        show_moves: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Play many seeded games in parallel and report the win rate
    Benchmark {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Number of games (overrides config)
        #[arg(short, long)]
        games: Option<usize>,

        /// Base seed; game i uses seed + i (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output directory for per-game reports (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and board files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbose = matches!(
        cli.command,
        Commands::Play { verbose: true, .. } | Commands::Benchmark { verbose: true, .. }
    );
    init_tracing(verbose);

    match cli.command {
        Commands::Play {
            config, board, height, width, mines, seed, output,
            show_moves, verbose
        } => {
            let overrides = CliOverrides {
                height,
                width,
                mines,
                seed,
                board_file: board,
                output_dir: output,
                ..Default::default()
            };
            play_command(config, overrides, show_moves, verbose)
        }
        Commands::Benchmark { config, games, seed, output, verbose } => {
            let overrides = CliOverrides {
                games,
                seed,
                output_dir: output,
                ..Default::default()
            };
            benchmark_command(config, overrides, verbose)
        }
        Commands::Setup { directory, force } => {
            setup_command(directory, force)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "minesweeper_ai=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_settings(config_path: &PathBuf, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        println!("{}", ColorOutput::warning(&format!(
            "Config file {} not found, using defaults", config_path.display()
        )));
        Settings::default()
    };

    settings.merge_with_cli(overrides);
    if settings.input.board_file.is_some()
        && (overrides.height.is_some() || overrides.width.is_some() || overrides.mines.is_some())
    {
        println!("{}", ColorOutput::warning(
            "Board file given: --height, --width and --mines are taken from the file"
        ));
    }
    settings.validate()
        .context("Configuration validation failed")?;
    Ok(settings)
}

fn play_command(
    config_path: PathBuf,
    overrides: CliOverrides,
    show_moves: bool,
    verbose: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("💣 Starting Minesweeper AI"));

    let settings = load_settings(&config_path, &overrides)?;

    if verbose {
        println!("Configuration:");
        match settings.input.board_file {
            Some(ref path) => println!("  Board file: {}", path.display()),
            None => println!("  Board: {}x{}, {} mines",
                             settings.board.height, settings.board.width, settings.board.mines),
        }
        match settings.player.seed {
            Some(seed) => println!("  Seed: {}", seed),
            None => println!("  Seed: random"),
        }
        println!();
    }

    let session = GameSession::new(&settings)
        .context("Failed to set up game")?;
    let report = session.play()
        .context("Game aborted")?;

    println!("{}", ReportFormatter::format_report(&report, show_moves));

    match report.outcome {
        GameOutcome::Won => println!("{}", ColorOutput::success(&format!(
            "✅ Won in {} moves with {} guess(es)", report.moves.len(), report.guesses
        ))),
        GameOutcome::Lost { cell } => println!("{}", ColorOutput::error(&format!(
            "💥 Hit a mine at {} after {} moves", cell, report.moves.len()
        ))),
        GameOutcome::Stuck => println!("{}", ColorOutput::warning(
            "❓ No moves left but the board is not cleared"
        )),
    }

    if verbose {
        println!("\n{}", report.statistics);
    }

    if settings.output.save_reports {
        ReportFormatter::save_reports(&[report], &settings.output.output_directory, settings.output.format)
            .context("Failed to save game report")?;
        println!("{}", ColorOutput::success(&format!(
            "Report saved to {}", settings.output.output_directory.display()
        )));
    }

    Ok(())
}

fn benchmark_command(config_path: PathBuf, overrides: CliOverrides, verbose: bool) -> Result<()> {
    let settings = load_settings(&config_path, &overrides)?;

    println!("{}", ColorOutput::info(&format!(
        "🏁 Playing {} games on {}x{} boards with {} mines...",
        settings.benchmark.games, settings.board.height, settings.board.width, settings.board.mines
    )));

    let (summary, reports) = run_benchmark(&settings)
        .context("Benchmark failed")?;

    println!("\n{}", summary);

    if verbose {
        for report in reports.iter().filter(|r| !r.is_win()) {
            println!("Seed {}: {:?} after {} moves", report.seed, report.outcome, report.moves.len());
        }
    }

    if settings.output.save_reports {
        ReportFormatter::save_reports(&reports, &settings.output.output_directory, settings.output.format)
            .context("Failed to save game reports")?;
        println!("{}", ColorOutput::success(&format!(
            "Reports saved to {}", settings.output.output_directory.display()
        )));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let boards_dir = directory.join("input/boards");
    let output_dir = directory.join("output/games");

    for dir in [&config_dir, &boards_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default().to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_boards(&boards_dir)
        .context("Failed to create example boards")?;
    println!("Created example boards in: {}", boards_dir.display());

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    // Intermediate difficulty
    let mut intermediate = Settings::default();
    intermediate.board.height = 16;
    intermediate.board.width = 16;
    intermediate.board.mines = 40;
    intermediate.to_file(&examples_dir.join("intermediate.yaml"))?;

    // Expert difficulty
    let mut expert = Settings::default();
    expert.board.height = 16;
    expert.board.width = 30;
    expert.board.mines = 99;
    expert.to_file(&examples_dir.join("expert.yaml"))?;

    // Fixed layout
    let mut fixed = Settings::default();
    fixed.input.board_file = Some(PathBuf::from("input/boards/beginner.txt"));
    fixed.player.seed = Some(42);
    fixed.to_file(&examples_dir.join("fixed_board.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your own boards to {}", boards_dir.display());
    println!("3. Run: cargo run -- play --config config/default.yaml");

    Ok(())
}
