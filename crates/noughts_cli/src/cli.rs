//! Command-line interface for noughts.

use clap::{Parser, Subcommand};
use noughts_engine::Difficulty;
use std::path::PathBuf;

/// Noughts - tic-tac-toe against the computer, with rankings
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Play tic-tac-toe against the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a session against the computer
    Play {
        /// Computer strength: easy, medium or hard
        #[arg(short, long, default_value = "hard")]
        difficulty: Difficulty,

        /// Number of games to play
        #[arg(short, long, default_value = "1")]
        games: u32,

        /// Name recorded with results
        #[arg(short, long, default_value = "player")]
        player: String,

        /// Database file for results (kept in memory if omitted)
        #[arg(long)]
        db: Option<String>,

        /// Arena configuration file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show rankings from recorded games
    Leaderboard {
        /// Database file holding results
        #[arg(long, default_value = "noughts.db")]
        db: String,

        /// Maximum rows to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show one player's recorded games, most recent first
    History {
        /// Database file holding results
        #[arg(long, default_value = "noughts.db")]
        db: String,

        /// Player to look up
        #[arg(short, long)]
        player: String,
    },
}
