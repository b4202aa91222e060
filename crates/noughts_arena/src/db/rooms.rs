//! SQLite room store.

use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, info, instrument};

use super::models::{NewRoomRow, RoomChanges, RoomRow};
use super::{connect, run_migrations, schema};
use crate::{
    Inserted, NewRoom, Precondition, Room, RoomCode, RoomFields, RoomStore, StoreError,
    UpdateOutcome,
};

/// Room store backed by a SQLite database.
///
/// Conditional updates compile to a single
/// `UPDATE rooms ... WHERE id = ? AND version = ? AND status = ?`, so the
/// database decides which of two racing writers wins.
#[derive(Debug, Clone)]
pub struct SqliteRoomStore {
    db_path: String,
}

impl SqliteRoomStore {
    /// Opens the database at `db_path`, applying pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, StoreError> {
        info!(path = %db_path, "Opening SQLite room store");
        run_migrations(&db_path)?;
        Ok(Self { db_path })
    }
}

impl RoomStore for SqliteRoomStore {
    #[instrument(skip(self), fields(code = %code))]
    fn get(&self, code: &RoomCode) -> Result<Option<Room>, StoreError> {
        let mut conn = connect(&self.db_path)?;

        let row = schema::rooms::table
            .filter(schema::rooms::code.eq(code.as_str()))
            .select(RoomRow::as_select())
            .first(&mut conn)
            .optional()?;

        row.map(Room::try_from).transpose()
    }

    #[instrument(skip(self, room), fields(code = %room.code()))]
    fn insert(&self, room: NewRoom) -> Result<Inserted, StoreError> {
        let mut conn = connect(&self.db_path)?;

        let inserted = diesel::insert_into(schema::rooms::table)
            .values(NewRoomRow::from(&room))
            .returning(RoomRow::as_returning())
            .get_result(&mut conn);

        match inserted {
            Ok(row) => {
                let room = Room::try_from(row)?;
                debug!(room_id = room.id(), "Room inserted");
                Ok(Inserted::Created(room))
            }
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                debug!("Room code already in use");
                Ok(Inserted::CodeTaken)
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, update), fields(expected_version = expected.version, expected_status = %expected.status))]
    fn conditional_update(
        &self,
        id: i32,
        expected: Precondition,
        update: RoomFields,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut conn = connect(&self.db_path)?;

        let row = diesel::update(
            schema::rooms::table
                .filter(schema::rooms::id.eq(id))
                .filter(schema::rooms::version.eq(expected.version))
                .filter(schema::rooms::status.eq(expected.status.to_string())),
        )
        .set(RoomChanges::new(update, expected.version + 1))
        .returning(RoomRow::as_returning())
        .get_result(&mut conn)
        .optional()?;

        match row {
            Some(row) => {
                let room = Room::try_from(row)?;
                debug!(version = room.version(), "Room updated");
                Ok(UpdateOutcome::Applied(room))
            }
            None => {
                debug!("Precondition failed");
                Ok(UpdateOutcome::PreconditionFailed)
            }
        }
    }
}
