//! Push notification of room changes.
//!
//! Delivery is at-least-once and may repeat snapshots; [`RoomView`] makes
//! consumers idempotent by applying only newer versions.

use crate::{Room, RoomCode};
use tokio::sync::broadcast;
use tracing::{debug, instrument};

/// Receives a snapshot after every successful room write.
pub trait RoomNotifier: Send + Sync + std::fmt::Debug {
    /// Publishes the room as stored after the write.
    fn publish(&self, room: &Room);
}

/// Fan-out of room snapshots over a tokio broadcast channel.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    sender: broadcast::Sender<Room>,
}

impl BroadcastNotifier {
    /// Creates a notifier buffering up to `capacity` snapshots per receiver.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to snapshots published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Room> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new(64)
    }
}

impl RoomNotifier for BroadcastNotifier {
    #[instrument(skip(self, room), fields(code = %room.code(), version = room.version()))]
    fn publish(&self, room: &Room) {
        match self.sender.send(room.clone()) {
            Ok(receivers) => debug!(receivers, "Room snapshot published"),
            Err(_) => debug!("No subscribers for room snapshot"),
        }
    }
}

/// Latest known state of one room on the consumer side.
#[derive(Debug, Clone)]
pub struct RoomView {
    code: RoomCode,
    latest: Option<Room>,
}

impl RoomView {
    /// Watches the room with `code`.
    pub fn new(code: RoomCode) -> Self {
        Self { code, latest: None }
    }

    /// Applies a snapshot if it is for this room and newer than what is held.
    ///
    /// Returns true if the view changed. Redelivered or stale snapshots are
    /// no-ops.
    pub fn apply(&mut self, snapshot: &Room) -> bool {
        if snapshot.code() != &self.code {
            return false;
        }
        if let Some(latest) = &self.latest
            && latest.version() >= snapshot.version()
        {
            debug!(
                held = latest.version(),
                received = snapshot.version(),
                "Ignoring stale room snapshot"
            );
            return false;
        }
        self.latest = Some(snapshot.clone());
        true
    }

    /// Latest applied snapshot.
    pub fn latest(&self) -> Option<&Room> {
        self.latest.as_ref()
    }
}
