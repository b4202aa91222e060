//! Session-scoped seating and tallies for play against the computer.
//!
//! Which side moves first is decided per game from explicit session
//! counters, never from global state, and never changes inside a match.

use super::{Mark, Status};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Games at the start of a session where the human always plays first.
pub const DEFAULT_WARMUP_GAMES: u32 = 3;

/// Which mark each participant plays in one match. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seating {
    /// Mark played by the human.
    pub human: Mark,
    /// Mark played by the computer.
    pub computer: Mark,
}

impl Seating {
    /// Human plays X and moves first.
    pub const HUMAN_FIRST: Seating = Seating {
        human: Mark::X,
        computer: Mark::O,
    };

    /// Computer plays X and moves first.
    pub const COMPUTER_FIRST: Seating = Seating {
        human: Mark::O,
        computer: Mark::X,
    };

    /// Returns true if the human moves first.
    pub fn human_first(&self) -> bool {
        self.human == Mark::X
    }
}

/// Decides seating for successive games of a session.
///
/// The first `warmup` games seat the human first; afterwards a fair coin
/// decides each game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatingPolicy {
    warmup: u32,
    games_started: u32,
}

impl SeatingPolicy {
    /// Creates a policy with the given warm-up length.
    pub fn new(warmup: u32) -> Self {
        Self {
            warmup,
            games_started: 0,
        }
    }

    /// Number of games seated so far.
    pub fn games_started(&self) -> u32 {
        self.games_started
    }

    /// Seats the next game and advances the counter.
    #[instrument(skip(self, rng), fields(games_started = self.games_started, warmup = self.warmup))]
    pub fn next_seating<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Seating {
        let seating = if self.games_started < self.warmup || rng.gen_bool(0.5) {
            Seating::HUMAN_FIRST
        } else {
            Seating::COMPUTER_FIRST
        };
        self.games_started += 1;
        debug!(human = %seating.human, "Seated game");
        seating
    }

    /// Starts the session over.
    pub fn reset(&mut self) {
        self.games_started = 0;
    }
}

impl Default for SeatingPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_WARMUP_GAMES)
    }
}

/// Result of a finished game from one participant's point of view.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Outcome {
    /// The participant won.
    Win,
    /// The participant lost.
    Loss,
    /// Nobody won.
    Draw,
}

impl Outcome {
    /// Outcome of a terminal status for the participant playing `mark`.
    ///
    /// Returns `None` while the status is ongoing.
    pub fn for_mark(status: Status, mark: Mark) -> Option<Self> {
        match status {
            Status::Ongoing => None,
            Status::Draw => Some(Outcome::Draw),
            Status::Win(winner) if winner == mark => Some(Outcome::Win),
            Status::Win(_) => Some(Outcome::Loss),
        }
    }

    /// The same game seen from the other participant.
    pub fn reversed(self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Loss => Outcome::Win,
            Outcome::Draw => Outcome::Draw,
        }
    }

    /// Ranking points: Win +2, Draw +1, Loss -1.
    pub fn points(self) -> i32 {
        match self {
            Outcome::Win => 2,
            Outcome::Draw => 1,
            Outcome::Loss => -1,
        }
    }
}

/// Running results of a session against the computer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTally {
    human_wins: u32,
    computer_wins: u32,
    draws: u32,
    current_streak: u32,
}

impl SessionTally {
    /// Adds one finished game from the human's point of view.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => {
                self.human_wins += 1;
                self.current_streak += 1;
            }
            Outcome::Loss => {
                self.computer_wins += 1;
                self.current_streak = 0;
            }
            Outcome::Draw => {
                self.draws += 1;
                self.current_streak = 0;
            }
        }
    }

    /// Games the human won.
    pub fn human_wins(&self) -> u32 {
        self.human_wins
    }

    /// Games the computer won.
    pub fn computer_wins(&self) -> u32 {
        self.computer_wins
    }

    /// Drawn games.
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Consecutive human wins ending with the latest game.
    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    /// Total finished games.
    pub fn games(&self) -> u32 {
        self.human_wins + self.computer_wins + self.draws
    }
}
