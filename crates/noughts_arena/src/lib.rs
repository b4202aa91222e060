//! Multiplayer rooms, computer sessions and result recording for noughts.
//!
//! # Architecture
//!
//! - **Rooms**: a `Waiting -> Playing -> Completed` state machine over a
//!   compare-and-swap store
//! - **Notify**: room snapshots pushed to subscribers, applied by version
//! - **Computer**: a human against a strategy with fair seating
//! - **Recorder**: finished games persisted for rankings
//! - **Db**: SQLite implementations of the store and recorder
//!
//! # Example
//!
//! ```
//! use noughts_arena::{
//!     ArenaConfig, BroadcastNotifier, MemoryRecorder, MemoryRoomStore, RoomService,
//! };
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), noughts_arena::RoomError> {
//! let service = RoomService::new(
//!     Arc::new(MemoryRoomStore::new()),
//!     Arc::new(BroadcastNotifier::default()),
//!     Arc::new(MemoryRecorder::new()),
//!     ArenaConfig::default(),
//! );
//! let room = service.create_room("alice")?;
//! service.join_room(room.code().as_str(), "bob")?;
//! service.play_move(room.code().as_str(), "alice", 4)?;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod clock;
mod computer;
mod config;
pub mod db;
mod error;
mod leaderboard;
mod notify;
mod recorder;
mod room;
mod rooms;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use computer::{ComputerSession, PlayError};
pub use config::ArenaConfig;
pub use error::{ConfigError, RoomError, StoreError};
pub use leaderboard::{Standing, rank};
pub use notify::{BroadcastNotifier, RoomNotifier, RoomView};
pub use recorder::{GameMode, GameRecord, MemoryRecorder, ResultRecorder};
pub use room::{
    CODE_ALPHABET, NewRoom, PartyId, Precondition, Room, RoomCode, RoomFields, RoomStatus,
};
pub use rooms::RoomService;
pub use store::{Inserted, MemoryRoomStore, RoomStore, UpdateOutcome};
