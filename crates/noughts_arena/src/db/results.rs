//! SQLite result recorder.

use diesel::prelude::*;
use tracing::{debug, info, instrument};

use super::models::{GameResultRow, NewGameResultRow};
use super::{connect, run_migrations, schema};
use crate::{GameRecord, ResultRecorder, StoreError};

/// Result recorder backed by a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteRecorder {
    db_path: String,
}

impl SqliteRecorder {
    /// Opens the database at `db_path`, applying pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, StoreError> {
        info!(path = %db_path, "Opening SQLite result recorder");
        run_migrations(&db_path)?;
        Ok(Self { db_path })
    }

    /// Records involving `party_id`, most recent first.
    #[instrument(skip(self))]
    pub fn history(&self, party_id: &str) -> Result<Vec<GameRecord>, StoreError> {
        let mut conn = connect(&self.db_path)?;

        let rows = schema::game_results::table
            .filter(
                schema::game_results::player_one_id
                    .eq(party_id)
                    .or(schema::game_results::player_two_id.eq(party_id)),
            )
            .order(schema::game_results::id.desc())
            .select(GameResultRow::as_select())
            .load(&mut conn)?;

        debug!(count = rows.len(), "History loaded");
        rows.into_iter().map(GameRecord::try_from).collect()
    }
}

impl ResultRecorder for SqliteRecorder {
    #[instrument(skip(self, record), fields(mode = %record.mode(), outcome = %record.outcome()))]
    fn record(&self, record: &GameRecord) -> Result<(), StoreError> {
        let mut conn = connect(&self.db_path)?;

        diesel::insert_into(schema::game_results::table)
            .values(NewGameResultRow::from(record))
            .execute(&mut conn)?;

        info!(player = %record.player_one(), "Game result recorded");
        Ok(())
    }

    #[instrument(skip(self))]
    fn records(&self) -> Result<Vec<GameRecord>, StoreError> {
        let mut conn = connect(&self.db_path)?;

        let rows = schema::game_results::table
            .order(schema::game_results::id.asc())
            .select(GameResultRow::as_select())
            .load(&mut conn)?;

        debug!(count = rows.len(), "Records loaded");
        rows.into_iter().map(GameRecord::try_from).collect()
    }
}
