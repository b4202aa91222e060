//! Persistence contract for rooms and an in-memory implementation.
//!
//! All mutation goes through [`RoomStore::conditional_update`], which
//! applies only if the stored version and status still match what the
//! writer observed. There is no other locking primitive.

use crate::{NewRoom, Precondition, Room, RoomCode, RoomFields, StoreError};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};

/// Result of inserting a new room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inserted {
    /// The room was stored.
    Created(Room),
    /// Another room already uses the code.
    CodeTaken,
}

/// Result of a conditional update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The precondition held; the stored room after the write.
    Applied(Room),
    /// The stored room changed since it was read.
    PreconditionFailed,
}

/// Room persistence with compare-and-swap updates.
pub trait RoomStore: Send + Sync + std::fmt::Debug {
    /// Looks up a room by code, expired or not.
    fn get(&self, code: &RoomCode) -> Result<Option<Room>, StoreError>;

    /// Stores a new room unless its code is taken.
    fn insert(&self, room: NewRoom) -> Result<Inserted, StoreError>;

    /// Writes `fields` to room `id` only if `expected` still holds,
    /// bumping the version on success.
    fn conditional_update(
        &self,
        id: i32,
        expected: Precondition,
        fields: RoomFields,
    ) -> Result<UpdateOutcome, StoreError>;
}

#[derive(Debug, Default)]
struct Rooms {
    next_id: i32,
    by_id: HashMap<i32, Room>,
    by_code: HashMap<RoomCode, i32>,
}

/// Mutex-guarded map of rooms. Clones share the same rooms.
///
/// Expired rooms stay stored, and keep their codes reserved, until
/// [`MemoryRoomStore::purge_expired`] removes them.
#[derive(Debug, Clone, Default)]
pub struct MemoryRoomStore {
    rooms: Arc<Mutex<Rooms>>,
}

impl MemoryRoomStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating in-memory room store");
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Rooms>, StoreError> {
        self.rooms
            .lock()
            .map_err(|_| StoreError::new("Room store lock poisoned"))
    }

    /// Number of stored rooms.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.by_id.len())
    }

    /// Returns true if no rooms are stored.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Drops rooms expired at `now`, freeing their codes. Returns how many
    /// were removed.
    #[instrument(skip(self))]
    pub fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError> {
        let mut rooms = self.lock()?;
        let expired: Vec<(i32, RoomCode)> = rooms
            .by_id
            .values()
            .filter(|room| room.is_expired(now))
            .map(|room| (*room.id(), room.code().clone()))
            .collect();

        for (id, code) in &expired {
            rooms.by_id.remove(id);
            rooms.by_code.remove(code);
        }
        if !expired.is_empty() {
            info!(purged = expired.len(), "Purged expired rooms");
        }
        Ok(expired.len())
    }
}

impl RoomStore for MemoryRoomStore {
    #[instrument(skip(self), fields(code = %code))]
    fn get(&self, code: &RoomCode) -> Result<Option<Room>, StoreError> {
        let rooms = self.lock()?;
        let room = rooms
            .by_code
            .get(code)
            .and_then(|id| rooms.by_id.get(id))
            .cloned();
        if room.is_none() {
            debug!("Room not found");
        }
        Ok(room)
    }

    #[instrument(skip(self, room), fields(code = %room.code()))]
    fn insert(&self, room: NewRoom) -> Result<Inserted, StoreError> {
        let mut rooms = self.lock()?;
        if rooms.by_code.contains_key(room.code()) {
            debug!("Room code already in use");
            return Ok(Inserted::CodeTaken);
        }

        rooms.next_id += 1;
        let id = rooms.next_id;
        let stored = Room::from_parts(id, &room, room.initial_fields(), 0);
        rooms.by_code.insert(room.code().clone(), id);
        rooms.by_id.insert(id, stored.clone());

        debug!(room_id = id, "Room inserted");
        Ok(Inserted::Created(stored))
    }

    #[instrument(skip(self, update), fields(expected_version = expected.version, expected_status = %expected.status))]
    fn conditional_update(
        &self,
        id: i32,
        expected: Precondition,
        update: RoomFields,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut rooms = self.lock()?;
        let Some(current) = rooms.by_id.get(&id) else {
            warn!("Conditional update on missing room");
            return Ok(UpdateOutcome::PreconditionFailed);
        };

        if !current.satisfies(&expected) {
            debug!(
                actual_version = current.version(),
                actual_status = %current.status(),
                "Precondition failed"
            );
            return Ok(UpdateOutcome::PreconditionFailed);
        }

        let updated = current.updated(update);
        rooms.by_id.insert(id, updated.clone());
        debug!(version = updated.version(), "Room updated");
        Ok(UpdateOutcome::Applied(updated))
    }
}
