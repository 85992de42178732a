//! Many independent games played in parallel to measure the player

use super::session::{GameOutcome, GameReport, GameSession};
use crate::config::Settings;
use anyhow::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::info;

/// Aggregate results of a benchmark run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkSummary {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub stuck: usize,
    pub base_seed: u64,
    pub average_moves: f64,
    pub average_certain_moves: f64,
    pub average_guesses: f64,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl BenchmarkSummary {
    fn from_reports(reports: &[GameReport], base_seed: u64, elapsed: Duration) -> Self {
        let games = reports.len();
        let count = |outcome: fn(&GameOutcome) -> bool| reports.iter().filter(|r| outcome(&r.outcome)).count();
        let average = |value: fn(&GameReport) -> usize| {
            if games == 0 {
                0.0
            } else {
                reports.iter().map(value).sum::<usize>() as f64 / games as f64
            }
        };

        Self {
            games,
            wins: count(|o| matches!(o, GameOutcome::Won)),
            losses: count(|o| matches!(o, GameOutcome::Lost { .. })),
            stuck: count(|o| matches!(o, GameOutcome::Stuck)),
            base_seed,
            average_moves: average(|r| r.moves.len()),
            average_certain_moves: average(|r| r.certain_moves),
            average_guesses: average(|r| r.guesses),
            elapsed,
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }
}

impl fmt::Display for BenchmarkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Benchmark Summary:")?;
        writeln!(f, "  Games played: {} (seeds {}..{})", self.games, self.base_seed, self.base_seed.wrapping_add(self.games as u64))?;
        writeln!(f, "  Wins: {} ({:.1}%)", self.wins, self.win_rate() * 100.0)?;
        writeln!(f, "  Losses: {}", self.losses)?;
        if self.stuck > 0 {
            writeln!(f, "  Stuck: {}", self.stuck)?;
        }
        writeln!(f, "  Average moves: {:.1}", self.average_moves)?;
        writeln!(f, "  Average certain moves: {:.1}", self.average_certain_moves)?;
        writeln!(f, "  Average guesses: {:.2}", self.average_guesses)?;
        writeln!(f, "  Total time: {:.3}s", self.elapsed.as_secs_f64())?;
        Ok(())
    }
}

/// Play `settings.benchmark.games` games, game `i` seeded with `base_seed + i`
pub fn run_benchmark(settings: &Settings) -> Result<(BenchmarkSummary, Vec<GameReport>)> {
    let base_seed = settings.player.seed.unwrap_or_else(rand::random::<u64>);
    let games = settings.benchmark.games;
    info!("Running {} games from base seed {}", games, base_seed);

    let start_time = Instant::now();
    let reports = (0..games as u64)
        .into_par_iter()
        .map(|i| {
            let mut game_settings = settings.clone();
            game_settings.player.seed = Some(base_seed.wrapping_add(i));
            GameSession::new(&game_settings)?.play()
        })
        .collect::<Result<Vec<_>>>()?;

    let summary = BenchmarkSummary::from_reports(&reports, base_seed, start_time.elapsed());
    info!("Benchmark finished: {}/{} games won", summary.wins, summary.games);
    Ok((summary, reports))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benchmark_counts_every_game() {
        let mut settings = Settings::default();
        settings.player.seed = Some(100);
        settings.benchmark.games = 12;

        let (summary, reports) = run_benchmark(&settings).unwrap();
        assert_eq!(summary.games, 12);
        assert_eq!(reports.len(), 12);
        assert_eq!(summary.wins + summary.losses + summary.stuck, 12);
        assert!(summary.average_guesses >= 1.0);
        assert!(summary.to_string().contains("Games played: 12"));
    }

    #[test]
    fn test_benchmark_is_reproducible() {
        let mut settings = Settings::default();
        settings.player.seed = Some(7);
        settings.benchmark.games = 6;

        let (first, _) = run_benchmark(&settings).unwrap();
        let (second, _) = run_benchmark(&settings).unwrap();
        assert_eq!(first.wins, second.wins);
        assert_eq!(first.average_moves, second.average_moves);
    }

    #[test]
    fn test_mine_free_boards_always_win() {
        let mut settings = Settings::default();
        settings.board.mines = 0;
        settings.player.seed = Some(1);
        settings.benchmark.games = 4;

        let (summary, _) = run_benchmark(&settings).unwrap();
        assert_eq!(summary.wins, 4);
        assert_eq!(summary.win_rate(), 1.0);
    }
}
