//! Noughts - terminal front end
//!
//! Plays sessions against the computer and reports rankings from the
//! results database.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use noughts_arena::db::SqliteRecorder;
use noughts_arena::{ArenaConfig, ComputerSession, MemoryRecorder, ResultRecorder, rank};
use noughts_engine::{Difficulty, Outcome, Position, Status};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            difficulty,
            games,
            player,
            db,
            config,
        } => run_play(difficulty, games, player, db, config),
        Command::Leaderboard { db, limit } => run_leaderboard(db, limit),
        Command::History { db, player } => run_history(db, player),
    }
}

/// Play a session against the computer on stdin/stdout
#[instrument(skip_all, fields(%difficulty, games))]
fn run_play(
    difficulty: Difficulty,
    games: u32,
    player: String,
    db: Option<String>,
    config: Option<PathBuf>,
) -> Result<()> {
    let config = match config {
        Some(path) => ArenaConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ArenaConfig::default(),
    };

    let recorder: Arc<dyn ResultRecorder> = match db {
        Some(path) => Arc::new(SqliteRecorder::open(path).context("Failed to open results")?),
        None => Arc::new(MemoryRecorder::new()),
    };

    let mut rng = rand::thread_rng();
    let mut session = ComputerSession::new(player, difficulty, &config, recorder, &mut rng);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    info!("Starting play session");
    println!("Playing {} games against the {} computer.", games, difficulty);

    for game in 1..=games {
        if game > 1 {
            session.next_game(&mut rng);
        }
        let seating = session.seating();
        println!();
        println!("Game {} of {}: you are {}.", game, games, seating.human);

        let status = loop {
            let status = session.game().status();
            if status.is_terminal() {
                break status;
            }

            if session.computer_to_move() {
                if let Some(index) = session.computer_move(&mut rng)? {
                    debug!(index, "Computer moved");
                    println!("Computer plays {}.", describe(index));
                }
                continue;
            }

            println!();
            println!("{}", session.game().board().display());
            print!("Your move (1-9 or name): ");
            io::stdout().flush()?;

            let Some(line) = lines.next() else {
                bail!("Input closed before the game finished");
            };
            let line = line?;
            let Some(position) = Position::parse_cell(&line) else {
                println!("Not a cell: '{}'.", line.trim());
                continue;
            };
            if let Err(e) = session.human_move(position.index()) {
                println!("{}", e);
            }
        };

        println!();
        println!("{}", session.game().board().display());
        announce(status, seating.human);
    }

    let tally = session.tally();
    println!();
    println!(
        "Session: {} won, {} lost, {} drawn.",
        tally.human_wins(),
        tally.computer_wins(),
        tally.draws()
    );
    Ok(())
}

/// Print the ranked standings
#[instrument]
fn run_leaderboard(db: String, limit: usize) -> Result<()> {
    let recorder = SqliteRecorder::open(db).context("Failed to open results")?;
    let standings = rank(&recorder.records()?);

    if standings.is_empty() {
        println!("No games recorded yet.");
        return Ok(());
    }

    println!(
        "{:<4} {:<20} {:>5} {:>5} {:>5} {:>6} {:>7}",
        "#", "Player", "W", "D", "L", "Score", "Win %"
    );
    for (place, standing) in standings.iter().take(limit).enumerate() {
        println!(
            "{:<4} {:<20} {:>5} {:>5} {:>5} {:>6} {:>6.1}%",
            place + 1,
            standing.party_id(),
            standing.wins(),
            standing.draws(),
            standing.losses(),
            standing.total_score(),
            standing.win_rate()
        );
    }
    Ok(())
}

/// Print one player's recorded games
#[instrument]
fn run_history(db: String, player: String) -> Result<()> {
    let recorder = SqliteRecorder::open(db).context("Failed to open results")?;
    let records = recorder.history(&player)?;

    if records.is_empty() {
        println!("No games recorded for {}.", player);
        return Ok(());
    }

    for record in records {
        let outcome = record
            .participants()
            .into_iter()
            .find(|(party, _)| party.as_str() == player)
            .map(|(_, outcome)| outcome);
        let opponent = match record.player_two() {
            Some(two) if *two != player => two.as_str(),
            Some(_) => record.player_one().as_str(),
            None => "computer",
        };
        match outcome {
            Some(outcome) => println!(
                "{:<12} vs {:<20} {:<5} {}",
                record.mode().tag(),
                opponent,
                outcome.to_string(),
                record.board()
            ),
            None => continue,
        }
    }
    Ok(())
}

fn describe(index: usize) -> String {
    match Position::from_index(index) {
        Some(position) => format!("{} ({})", position, position.number()),
        None => index.to_string(),
    }
}

fn announce(status: Status, human: noughts_engine::Mark) {
    match Outcome::for_mark(status, human) {
        Some(Outcome::Win) => println!("You win!"),
        Some(Outcome::Loss) => println!("The computer wins."),
        Some(Outcome::Draw) => println!("It's a draw."),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_uses_board_numbering() {
        assert_eq!(describe(0), "top-left (1)");
        assert_eq!(describe(4), "center (5)");
    }
}
