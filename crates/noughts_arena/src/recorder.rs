//! Finished-game records and the recorder contract.

use crate::{PartyId, StoreError};
use derive_getters::Getters;
use derive_new::new;
use noughts_engine::{Board, Difficulty, Outcome};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tracing::{debug, instrument};

/// How a recorded game was played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Two parties in a room.
    Multiplayer,
    /// A party against the computer at a difficulty.
    Computer(Difficulty),
}

impl GameMode {
    /// Tag stored with the record: `multiplayer` or `ai_<difficulty>`.
    pub fn tag(&self) -> String {
        match self {
            GameMode::Multiplayer => "multiplayer".to_string(),
            GameMode::Computer(difficulty) => format!("ai_{}", difficulty),
        }
    }

    /// Parses a tag produced by [`GameMode::tag`].
    pub fn from_tag(tag: &str) -> Result<Self, StoreError> {
        if tag == "multiplayer" {
            return Ok(GameMode::Multiplayer);
        }
        tag.strip_prefix("ai_")
            .and_then(|difficulty| Difficulty::from_str(difficulty).ok())
            .map(GameMode::Computer)
            .ok_or_else(|| StoreError::new(format!("Invalid game mode: '{}'", tag)))
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// One finished game.
///
/// `outcome` is from `player_one`'s point of view. Computer games have no
/// `player_two`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct GameRecord {
    player_one: PartyId,
    player_two: Option<PartyId>,
    mode: GameMode,
    board: Board,
    outcome: Outcome,
    winner_id: Option<PartyId>,
}

impl GameRecord {
    /// Each participant with their own outcome.
    pub fn participants(&self) -> Vec<(&PartyId, Outcome)> {
        let mut participants = vec![(&self.player_one, self.outcome)];
        if let Some(player_two) = &self.player_two {
            participants.push((player_two, self.outcome.reversed()));
        }
        participants
    }
}

/// Sink for finished games.
pub trait ResultRecorder: Send + Sync + std::fmt::Debug {
    /// Persists one record.
    fn record(&self, record: &GameRecord) -> Result<(), StoreError>;

    /// Returns every record, oldest first.
    fn records(&self) -> Result<Vec<GameRecord>, StoreError>;
}

/// Recorder that keeps records in memory. Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecorder {
    records: Arc<Mutex<Vec<GameRecord>>>,
}

impl MemoryRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultRecorder for MemoryRecorder {
    #[instrument(skip(self, record), fields(mode = %record.mode(), outcome = %record.outcome()))]
    fn record(&self, record: &GameRecord) -> Result<(), StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::new("Recorder lock poisoned"))?
            .push(record.clone());
        debug!("Game recorded");
        Ok(())
    }

    fn records(&self) -> Result<Vec<GameRecord>, StoreError> {
        Ok(self
            .records
            .lock()
            .map_err(|_| StoreError::new("Recorder lock poisoned"))?
            .clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_tags() {
        assert_eq!(GameMode::Multiplayer.tag(), "multiplayer");
        assert_eq!(GameMode::Computer(Difficulty::Hard).tag(), "ai_hard");
        assert_eq!(
            GameMode::from_tag("ai_medium").expect("valid tag"),
            GameMode::Computer(Difficulty::Medium)
        );
        assert!(GameMode::from_tag("ai_godlike").is_err());
        assert!(GameMode::from_tag("chess").is_err());
    }

    #[test]
    fn test_participants_see_opposite_outcomes() {
        let record = GameRecord::new(
            "alice".to_string(),
            Some("bob".to_string()),
            GameMode::Multiplayer,
            Board::new(),
            Outcome::Win,
            Some("alice".to_string()),
        );
        let participants = record.participants();
        assert_eq!(participants[0].1, Outcome::Win);
        assert_eq!(participants[1].1, Outcome::Loss);
    }
}
