//! Arena configuration.

use crate::ConfigError;
use derive_getters::Getters;
use noughts_engine::{DEFAULT_WARMUP_GAMES, Difficulty};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Tunables for rooms, seating and result recording.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Minutes a room stays joinable after creation.
    #[serde(default = "default_room_ttl_minutes")]
    room_ttl_minutes: u32,

    /// Characters in a room code.
    #[serde(default = "default_code_length")]
    code_length: usize,

    /// Code collisions tolerated before giving up.
    #[serde(default = "default_code_attempts")]
    code_attempts: u32,

    /// Computer games where the human always moves first.
    #[serde(default = "default_warmup_games")]
    warmup_games: u32,

    /// Computer difficulties whose results reach the recorder.
    #[serde(default = "default_recorded_difficulties")]
    recorded_difficulties: Vec<Difficulty>,

    /// Whether finished room games reach the recorder.
    #[serde(default = "default_record_multiplayer")]
    record_multiplayer: bool,
}

fn default_room_ttl_minutes() -> u32 {
    120
}

fn default_code_length() -> usize {
    6
}

fn default_code_attempts() -> u32 {
    10
}

fn default_warmup_games() -> u32 {
    DEFAULT_WARMUP_GAMES
}

fn default_recorded_difficulties() -> Vec<Difficulty> {
    vec![Difficulty::Hard]
}

fn default_record_multiplayer() -> bool {
    true
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            room_ttl_minutes: default_room_ttl_minutes(),
            code_length: default_code_length(),
            code_attempts: default_code_attempts(),
            warmup_games: default_warmup_games(),
            recorded_difficulties: default_recorded_difficulties(),
            record_multiplayer: default_record_multiplayer(),
        }
    }
}

impl ArenaConfig {
    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(?config, "Config loaded successfully");
        Ok(config)
    }

    /// Returns true if computer games at `difficulty` are recorded.
    pub fn records_difficulty(&self, difficulty: Difficulty) -> bool {
        self.recorded_difficulties.contains(&difficulty)
    }

    /// Sets which computer difficulties are recorded.
    pub fn with_recorded_difficulties(mut self, difficulties: Vec<Difficulty>) -> Self {
        self.recorded_difficulties = difficulties;
        self
    }

    /// Sets whether room games are recorded.
    pub fn with_record_multiplayer(mut self, record: bool) -> Self {
        self.record_multiplayer = record;
        self
    }

    /// Sets the room lifetime.
    pub fn with_room_ttl_minutes(mut self, minutes: u32) -> Self {
        self.room_ttl_minutes = minutes;
        self
    }

    /// Sets the warm-up length for computer sessions.
    pub fn with_warmup_games(mut self, games: u32) -> Self {
        self.warmup_games = games;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.code_length == 0 {
            return Err(ConfigError::new("code_length must be at least 1"));
        }
        if self.code_attempts == 0 {
            return Err(ConfigError::new("code_attempts must be at least 1"));
        }
        if self.room_ttl_minutes == 0 {
            return Err(ConfigError::new("room_ttl_minutes must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = ArenaConfig::from_toml("").expect("valid config");
        assert_eq!(config, ArenaConfig::default());
        assert_eq!(*config.room_ttl_minutes(), 120);
        assert!(config.records_difficulty(Difficulty::Hard));
        assert!(!config.records_difficulty(Difficulty::Easy));
    }

    #[test]
    fn test_overrides() {
        let config = ArenaConfig::from_toml(
            r#"
            room_ttl_minutes = 30
            recorded_difficulties = ["easy", "medium", "hard"]
            record_multiplayer = false
            "#,
        )
        .expect("valid config");
        assert_eq!(*config.room_ttl_minutes(), 30);
        assert!(config.records_difficulty(Difficulty::Easy));
        assert!(!*config.record_multiplayer());
    }

    #[test]
    fn test_rejects_zero_attempts() {
        assert!(ArenaConfig::from_toml("code_attempts = 0").is_err());
    }

    #[test]
    fn test_rejects_unknown_difficulty() {
        assert!(ArenaConfig::from_toml(r#"recorded_difficulties = ["nightmare"]"#).is_err());
    }
}
