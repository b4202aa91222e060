//! Room data model: codes, lifecycle status and stored state.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use noughts_engine::{Board, Mark};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Opaque party identifier supplied by the identity provider.
pub type PartyId = String;

/// Characters room codes are drawn from.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Human-legible room code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    /// Draws a code of `length` characters uniformly from [`CODE_ALPHABET`].
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, length: usize) -> Self {
        let code = (0..length)
            .map(|_| char::from(CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())]))
            .collect();
        Self(code)
    }

    /// Normalises user input: surrounding whitespace dropped, uppercased.
    pub fn parse(input: &str) -> Self {
        Self(input.trim().to_uppercase())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Lifecycle status of a room.
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
pub enum RoomStatus {
    /// Creator present, no opponent yet.
    Waiting,
    /// Two parties, match in progress.
    Playing,
    /// Match reached a terminal state.
    Completed,
}

/// The mutable part of a room, written as a unit by conditional updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct RoomFields {
    /// Second party, once joined.
    pub opponent_id: Option<PartyId>,
    /// Lifecycle status.
    pub status: RoomStatus,
    /// Authoritative board.
    pub board: Board,
    /// Mark owning the turn. After a terminal move, the mark that made it.
    pub current_mark: Mark,
    /// Winning party, once completed with a win.
    pub winner_id: Option<PartyId>,
}

/// Precondition for a conditional update: the state the writer observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Precondition {
    /// Version the writer read.
    pub version: i64,
    /// Status the writer read.
    pub status: RoomStatus,
}

/// A fresh room ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq, new, Getters)]
pub struct NewRoom {
    code: RoomCode,
    creator_id: PartyId,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl NewRoom {
    /// State of a room before anyone joins: empty board, X to move.
    pub fn initial_fields(&self) -> RoomFields {
        RoomFields::new(None, RoomStatus::Waiting, Board::new(), Mark::X, None)
    }
}

/// A stored multiplayer room.
///
/// The creator plays X and moves first; the joiner plays O.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Room {
    id: i32,
    code: RoomCode,
    creator_id: PartyId,
    opponent_id: Option<PartyId>,
    status: RoomStatus,
    board: Board,
    current_mark: Mark,
    winner_id: Option<PartyId>,
    version: i64,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl Room {
    /// Builds the stored form of `new` with the given id and fields.
    pub fn from_parts(id: i32, new: &NewRoom, fields: RoomFields, version: i64) -> Self {
        Self {
            id,
            code: new.code().clone(),
            creator_id: new.creator_id().clone(),
            opponent_id: fields.opponent_id,
            status: fields.status,
            board: fields.board,
            current_mark: fields.current_mark,
            winner_id: fields.winner_id,
            version,
            created_at: *new.created_at(),
            expires_at: *new.expires_at(),
        }
    }

    /// Copies the mutable fields.
    pub fn fields(&self) -> RoomFields {
        RoomFields::new(
            self.opponent_id.clone(),
            self.status,
            self.board,
            self.current_mark,
            self.winner_id.clone(),
        )
    }

    /// Returns a copy with `fields` applied and the version bumped.
    pub fn updated(&self, fields: RoomFields) -> Self {
        Self {
            opponent_id: fields.opponent_id,
            status: fields.status,
            board: fields.board,
            current_mark: fields.current_mark,
            winner_id: fields.winner_id,
            version: self.version + 1,
            ..self.clone()
        }
    }

    /// The precondition matching this snapshot.
    pub fn precondition(&self) -> Precondition {
        Precondition {
            version: self.version,
            status: self.status,
        }
    }

    /// Returns true if `expected` still describes this room.
    pub fn satisfies(&self, expected: &Precondition) -> bool {
        self.version == expected.version && self.status == expected.status
    }

    /// Returns true once the deadline has passed.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Mark played by `party`, if they are in this room.
    pub fn mark_of(&self, party: &str) -> Option<Mark> {
        if self.creator_id == party {
            Some(Mark::X)
        } else if self.opponent_id.as_deref() == Some(party) {
            Some(Mark::O)
        } else {
            None
        }
    }

    /// Party playing `mark`, if seated.
    pub fn party_for(&self, mark: Mark) -> Option<&PartyId> {
        match mark {
            Mark::X => Some(&self.creator_id),
            Mark::O => self.opponent_id.as_ref(),
        }
    }
}
