//! Shared test stores.

use noughts_arena::{
    Inserted, NewRoom, Precondition, Room, RoomCode, RoomFields, RoomStore, StoreError,
    UpdateOutcome,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Barrier;

/// Store that holds the next two reads at a barrier so both racers see
/// the same snapshot before either writes.
#[derive(Debug)]
pub struct RacingStore<S> {
    inner: S,
    barrier: Barrier,
    gated: AtomicUsize,
}

impl<S: RoomStore> RacingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            barrier: Barrier::new(2),
            gated: AtomicUsize::new(0),
        }
    }

    /// Gates the next two reads.
    pub fn arm(&self) {
        self.gated.store(2, Ordering::SeqCst);
    }
}

impl<S: RoomStore> RoomStore for RacingStore<S> {
    fn get(&self, code: &RoomCode) -> Result<Option<Room>, StoreError> {
        let room = self.inner.get(code)?;
        let gate = self
            .gated
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if gate {
            self.barrier.wait();
        }
        Ok(room)
    }

    fn insert(&self, room: NewRoom) -> Result<Inserted, StoreError> {
        self.inner.insert(room)
    }

    fn conditional_update(
        &self,
        id: i32,
        expected: Precondition,
        fields: RoomFields,
    ) -> Result<UpdateOutcome, StoreError> {
        self.inner.conditional_update(id, expected, fields)
    }
}
