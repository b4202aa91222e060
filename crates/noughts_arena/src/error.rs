//! Error types for rooms, persistence and configuration.

use crate::RoomStatus;
use derive_more::{Display, Error};
use noughts_engine::MoveError;
use tracing::instrument;

/// Persistence failure with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<diesel::result::Error> for StoreError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(format!("Diesel error: {}", err))
    }
}

impl From<diesel::ConnectionError> for StoreError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(format!("Connection error: {}", err))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Failure of a room operation.
///
/// Every variant is local to one attempted operation. Lifecycle and turn
/// failures are benign races or bad input; `Store` is infrastructure.
#[derive(Debug, Clone, Display, derive_more::From)]
pub enum RoomError {
    /// No unexpired room has this code.
    #[display("Room {} not found or has expired", _0)]
    NotFound(String),

    /// Another party already occupies the second seat.
    #[display("Room is full")]
    AlreadyFull,

    /// The room left `Waiting` before the join could be written.
    #[display("Room is no longer available")]
    RoomNoLongerAvailable,

    /// The caller's mark does not own the current turn.
    #[display("Not your turn")]
    NotYourTurn,

    /// Moves are only accepted while the room is playing.
    #[display("Room is {}, not playing", _0)]
    RoomNotPlaying(RoomStatus),

    /// The caller is neither creator nor opponent.
    #[display("Not a participant in this room")]
    NotAParticipant,

    /// Only the creator may reset the room.
    #[display("Only the room creator can reset the game")]
    NotCreator,

    /// Reset requires a finished game.
    #[display("Room is {}, not completed", _0)]
    RoomNotCompleted(RoomStatus),

    /// The move is out of range or the cell is taken.
    #[display("{}", _0)]
    IllegalMove(MoveError),

    /// Every generated code collided with an existing room.
    #[display("Failed to generate a unique room code after {} attempts", _0)]
    CodeGenerationExhausted(u32),

    /// The store failed.
    #[display("{}", _0)]
    #[from]
    Store(StoreError),
}

impl std::error::Error for RoomError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RoomError::IllegalMove(err) => Some(err),
            RoomError::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MoveError> for RoomError {
    fn from(err: MoveError) -> Self {
        match err {
            MoveError::NotYourTurn(_) => RoomError::NotYourTurn,
            MoveError::GameOver => RoomError::RoomNotPlaying(RoomStatus::Completed),
            MoveError::Unreachable(reason) => {
                RoomError::Store(StoreError::new(format!("Stored board is inconsistent: {}", reason)))
            }
            illegal @ MoveError::IllegalMove { .. } => RoomError::IllegalMove(illegal),
        }
    }
}

impl RoomError {
    /// Returns true if refreshing state and trying again may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RoomError::NotYourTurn
                | RoomError::RoomNotPlaying(_)
                | RoomError::RoomNoLongerAvailable
                | RoomError::CodeGenerationExhausted(_)
        )
    }
}
