//! Row types and conversions to domain types.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use noughts_engine::{Board, Mark};
use std::str::FromStr;

use super::schema;
use crate::{GameMode, GameRecord, NewRoom, Room, RoomCode, RoomFields, RoomStatus, StoreError};

/// Stored room row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = schema::rooms)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RoomRow {
    id: i32,
    code: String,
    creator_id: String,
    opponent_id: Option<String>,
    status: String,
    board: String,
    current_mark: String,
    winner_id: Option<String>,
    version: i64,
    created_at: NaiveDateTime,
    expires_at: NaiveDateTime,
}

impl TryFrom<RoomRow> for Room {
    type Error = StoreError;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        let status = RoomStatus::from_str(&row.status)
            .map_err(|_| StoreError::new(format!("Invalid room status: '{}'", row.status)))?;
        let board = Board::decode(&row.board)
            .map_err(|e| StoreError::new(format!("Invalid board '{}': {}", row.board, e)))?;
        let current_mark = mark_from_db(&row.current_mark)?;

        Ok(Room::new(
            row.id,
            RoomCode::parse(&row.code),
            row.creator_id,
            row.opponent_id,
            status,
            board,
            current_mark,
            row.winner_id,
            row.version,
            row.created_at.and_utc(),
            row.expires_at.and_utc(),
        ))
    }
}

/// Insertable room row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::rooms)]
pub struct NewRoomRow {
    code: String,
    creator_id: String,
    status: String,
    board: String,
    current_mark: String,
    version: i64,
    created_at: NaiveDateTime,
    expires_at: NaiveDateTime,
}

impl From<&NewRoom> for NewRoomRow {
    fn from(room: &NewRoom) -> Self {
        let fields = room.initial_fields();
        Self {
            code: room.code().as_str().to_string(),
            creator_id: room.creator_id().clone(),
            status: fields.status.to_string(),
            board: fields.board.encode(),
            current_mark: mark_to_db(fields.current_mark).to_string(),
            version: 0,
            created_at: room.created_at().naive_utc(),
            expires_at: room.expires_at().naive_utc(),
        }
    }
}

/// Columns written by a conditional update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::rooms)]
#[diesel(treat_none_as_null = true)]
pub struct RoomChanges {
    opponent_id: Option<String>,
    status: String,
    board: String,
    current_mark: String,
    winner_id: Option<String>,
    version: i64,
}

impl RoomChanges {
    /// Changes writing `fields` at `version`.
    pub fn new(fields: RoomFields, version: i64) -> Self {
        Self {
            opponent_id: fields.opponent_id,
            status: fields.status.to_string(),
            board: fields.board.encode(),
            current_mark: mark_to_db(fields.current_mark).to_string(),
            winner_id: fields.winner_id,
            version,
        }
    }
}

/// Stored game result row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = schema::game_results)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GameResultRow {
    #[allow(dead_code)]
    id: i32,
    mode: String,
    player_one_id: String,
    player_two_id: Option<String>,
    board: String,
    outcome: String,
    winner_id: Option<String>,
    #[allow(dead_code)]
    recorded_at: NaiveDateTime,
}

impl TryFrom<GameResultRow> for GameRecord {
    type Error = StoreError;

    fn try_from(row: GameResultRow) -> Result<Self, Self::Error> {
        let mode = GameMode::from_tag(&row.mode)?;
        let board = Board::decode(&row.board)
            .map_err(|e| StoreError::new(format!("Invalid board '{}': {}", row.board, e)))?;
        let outcome = row
            .outcome
            .parse()
            .map_err(|_| StoreError::new(format!("Invalid outcome: '{}'", row.outcome)))?;

        Ok(GameRecord::new(
            row.player_one_id,
            row.player_two_id,
            mode,
            board,
            outcome,
            row.winner_id,
        ))
    }
}

/// Insertable game result row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::game_results)]
pub struct NewGameResultRow {
    mode: String,
    player_one_id: String,
    player_two_id: Option<String>,
    board: String,
    outcome: String,
    winner_id: Option<String>,
}

impl From<&GameRecord> for NewGameResultRow {
    fn from(record: &GameRecord) -> Self {
        Self {
            mode: record.mode().tag(),
            player_one_id: record.player_one().clone(),
            player_two_id: record.player_two().clone(),
            board: record.board().encode(),
            outcome: record.outcome().to_string(),
            winner_id: record.winner_id().clone(),
        }
    }
}

fn mark_to_db(mark: Mark) -> char {
    mark.symbol()
}

fn mark_from_db(s: &str) -> Result<Mark, StoreError> {
    match s {
        "X" => Ok(Mark::X),
        "O" => Ok(Mark::O),
        _ => Err(StoreError::new(format!("Invalid mark: '{}'", s))),
    }
}
