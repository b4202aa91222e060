//! Room state machine: create, join, move, reset.
//!
//! Rooms move `Waiting -> Playing -> Completed`; reset takes a completed
//! room back to `Playing` with a fresh board and the same parties. Every
//! write is a conditional update against the version and status this
//! service read, so concurrent writers never overwrite each other: exactly
//! one wins and the others get a typed, retryable error.

use chrono::TimeDelta;
use noughts_engine::{Board, Mark, Match, Outcome, Status};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    ArenaConfig, Clock, GameMode, GameRecord, Inserted, NewRoom, ResultRecorder, Room, RoomCode,
    RoomError, RoomFields, RoomNotifier, RoomStatus, RoomStore, StoreError, SystemClock,
    UpdateOutcome,
};

/// Coordinates room transitions over a store, notifier and recorder.
#[derive(Debug)]
pub struct RoomService {
    store: Arc<dyn RoomStore>,
    notifier: Arc<dyn RoomNotifier>,
    recorder: Arc<dyn ResultRecorder>,
    clock: Arc<dyn Clock>,
    config: ArenaConfig,
    rng: Mutex<StdRng>,
}

impl RoomService {
    /// Creates a service using the system clock and an entropy-seeded RNG.
    #[instrument(skip_all)]
    pub fn new(
        store: Arc<dyn RoomStore>,
        notifier: Arc<dyn RoomNotifier>,
        recorder: Arc<dyn ResultRecorder>,
        config: ArenaConfig,
    ) -> Self {
        info!(?config, "Creating room service");
        Self {
            store,
            notifier,
            recorder,
            clock: Arc::new(SystemClock),
            config,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Replaces the clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Seeds the room code generator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Creates a waiting room owned by `creator`, who plays X.
    ///
    /// # Errors
    ///
    /// - [`RoomError::CodeGenerationExhausted`] if every generated code collided
    /// - [`RoomError::Store`] if the store fails
    #[instrument(skip(self))]
    pub fn create_room(&self, creator: &str) -> Result<Room, RoomError> {
        let now = self.clock.now();
        let expires_at = now + TimeDelta::minutes(i64::from(*self.config.room_ttl_minutes()));
        let attempts = *self.config.code_attempts();

        for attempt in 1..=attempts {
            let code = self.generate_code();
            let new_room = NewRoom::new(code, creator.to_string(), now, expires_at);

            match self.store.insert(new_room)? {
                Inserted::Created(room) => {
                    info!(code = %room.code(), %expires_at, "Room created");
                    self.notifier.publish(&room);
                    return Ok(room);
                }
                Inserted::CodeTaken => debug!(attempt, "Room code collision"),
            }
        }

        warn!(attempts, "Room code generation exhausted");
        Err(RoomError::CodeGenerationExhausted(attempts))
    }

    /// Returns the room with `code` if it exists and has not expired.
    ///
    /// # Errors
    ///
    /// Returns [`RoomError::NotFound`] for unknown or expired codes.
    #[instrument(skip(self))]
    pub fn get_room(&self, code: &str) -> Result<Room, RoomError> {
        let code = RoomCode::parse(code);
        let room = self
            .store
            .get(&code)?
            .ok_or_else(|| RoomError::NotFound(code.to_string()))?;

        if room.is_expired(self.clock.now()) {
            debug!(expires_at = %room.expires_at(), "Room expired");
            return Err(RoomError::NotFound(code.to_string()));
        }
        Ok(room)
    }

    /// Seats `party` as the opponent and starts play.
    ///
    /// Re-entering a room one already sits in is a successful no-op.
    ///
    /// # Errors
    ///
    /// - [`RoomError::NotFound`] for unknown or expired codes
    /// - [`RoomError::AlreadyFull`] if another party holds the second seat
    /// - [`RoomError::RoomNoLongerAvailable`] if the room left `Waiting`
    ///   before the join was written
    #[instrument(skip(self))]
    pub fn join_room(&self, code: &str, party: &str) -> Result<Room, RoomError> {
        let room = self.get_room(code)?;

        if room.mark_of(party).is_some() {
            debug!("Party already seated in room");
            return Ok(room);
        }
        if room.opponent_id().is_some() {
            warn!("Join attempted on full room");
            return Err(RoomError::AlreadyFull);
        }
        if *room.status() != RoomStatus::Waiting {
            warn!(status = %room.status(), "Join attempted on room that is not waiting");
            return Err(RoomError::RoomNoLongerAvailable);
        }

        let mut fields = room.fields();
        fields.opponent_id = Some(party.to_string());
        fields.status = RoomStatus::Playing;

        match self.write(&room, fields)? {
            Some(joined) => {
                info!(code = %joined.code(), "Party joined room");
                Ok(joined)
            }
            None => {
                warn!("Lost join race");
                Err(RoomError::RoomNoLongerAvailable)
            }
        }
    }

    /// Plays `party`'s mark at `index`.
    ///
    /// Legality is derived from the stored board, never from the caller's
    /// copy. On a terminal move the room completes, the winner mark is
    /// mapped back to a party and the game is recorded.
    ///
    /// # Errors
    ///
    /// - [`RoomError::NotFound`] for unknown or expired codes
    /// - [`RoomError::RoomNotPlaying`] unless the room is playing
    /// - [`RoomError::NotAParticipant`] if `party` is not seated
    /// - [`RoomError::NotYourTurn`] if `party` does not own the turn, or
    ///   another move landed first
    /// - [`RoomError::IllegalMove`] for out-of-range or occupied cells
    #[instrument(skip(self))]
    pub fn play_move(&self, code: &str, party: &str, index: usize) -> Result<Room, RoomError> {
        let room = self.get_room(code)?;

        if *room.status() != RoomStatus::Playing {
            warn!(status = %room.status(), "Move attempted on room that is not playing");
            return Err(RoomError::RoomNotPlaying(*room.status()));
        }
        let mark = room.mark_of(party).ok_or(RoomError::NotAParticipant)?;
        if mark != *room.current_mark() {
            warn!(%mark, current = %room.current_mark(), "Move attempted out of turn");
            return Err(RoomError::NotYourTurn);
        }

        let mut game = Match::resume(*room.board(), Mark::X)?;
        let status = game.play(index, mark)?;

        let mut fields = room.fields();
        fields.board = *game.board();
        fields.current_mark = game.to_move();
        if status.is_terminal() {
            fields.status = RoomStatus::Completed;
            fields.winner_id = status.winner().and_then(|m| room.party_for(m).cloned());
        }

        let Some(updated) = self.write(&room, fields)? else {
            return Err(self.explain_lost_move(code));
        };

        info!(index, %mark, %status, version = updated.version(), "Move applied");
        if status.is_terminal() {
            self.record_room_game(&updated, status);
        }
        Ok(updated)
    }

    /// Starts a rematch in a completed room: empty board, X to move.
    ///
    /// # Errors
    ///
    /// - [`RoomError::NotFound`] for unknown or expired codes
    /// - [`RoomError::NotCreator`] unless `party` created the room
    /// - [`RoomError::RoomNotCompleted`] unless the match is finished
    #[instrument(skip(self))]
    pub fn reset_room(&self, code: &str, party: &str) -> Result<Room, RoomError> {
        let room = self.get_room(code)?;

        if room.creator_id() != party {
            warn!("Reset attempted by non-creator");
            return Err(RoomError::NotCreator);
        }
        if *room.status() != RoomStatus::Completed {
            warn!(status = %room.status(), "Reset attempted before completion");
            return Err(RoomError::RoomNotCompleted(*room.status()));
        }

        let fields = RoomFields::new(
            room.opponent_id().clone(),
            RoomStatus::Playing,
            Board::new(),
            Mark::X,
            None,
        );

        match self.write(&room, fields)? {
            Some(reset) => {
                info!(code = %reset.code(), "Room reset");
                Ok(reset)
            }
            None => {
                let status = self.get_room(code).map(|r| *r.status())?;
                warn!(%status, "Lost reset race");
                Err(RoomError::RoomNotCompleted(status))
            }
        }
    }

    /// Conditionally writes `fields` over `room`, publishing on success.
    ///
    /// Returns `None` if the room changed since it was read.
    fn write(&self, room: &Room, fields: RoomFields) -> Result<Option<Room>, StoreError> {
        match self
            .store
            .conditional_update(*room.id(), room.precondition(), fields)?
        {
            UpdateOutcome::Applied(updated) => {
                self.notifier.publish(&updated);
                Ok(Some(updated))
            }
            UpdateOutcome::PreconditionFailed => Ok(None),
        }
    }

    /// Error for a move whose write lost to a concurrent update.
    fn explain_lost_move(&self, code: &str) -> RoomError {
        match self.get_room(code) {
            Ok(current) if *current.status() != RoomStatus::Playing => {
                warn!(status = %current.status(), "Lost move race to game end");
                RoomError::RoomNotPlaying(*current.status())
            }
            Ok(_) => {
                warn!("Lost move race");
                RoomError::NotYourTurn
            }
            Err(err) => err,
        }
    }

    fn record_room_game(&self, room: &Room, status: Status) {
        if !*self.config.record_multiplayer() {
            debug!("Multiplayer recording disabled");
            return;
        }
        let Some(outcome) = Outcome::for_mark(status, Mark::X) else {
            return;
        };

        let record = GameRecord::new(
            room.creator_id().clone(),
            room.opponent_id().clone(),
            GameMode::Multiplayer,
            *room.board(),
            outcome,
            room.winner_id().clone(),
        );
        // The move is already committed; a recorder failure cannot undo it.
        if let Err(err) = self.recorder.record(&record) {
            error!(error = %err, code = %room.code(), "Failed to record room game");
        }
    }

    fn generate_code(&self) -> RoomCode {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        RoomCode::generate(&mut *rng, *self.config.code_length())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BroadcastNotifier, MemoryRecorder, MemoryRoomStore};
    use std::thread;

    #[test]
    fn test_poisoned_code_generator_still_creates_rooms() {
        let service = RoomService::new(
            Arc::new(MemoryRoomStore::new()),
            Arc::new(BroadcastNotifier::default()),
            Arc::new(MemoryRecorder::new()),
            ArenaConfig::default(),
        )
        .with_seed(11);

        thread::scope(|scope| {
            let poisoner = scope.spawn(|| {
                let _guard = service.rng.lock().expect("lock");
                panic!("poison the generator");
            });
            assert!(poisoner.join().is_err());
        });
        assert!(service.rng.is_poisoned());

        let room = service.create_room("alice").expect("Create failed");
        assert_eq!(room.code().as_str().len(), *service.config().code_length());
    }
}
