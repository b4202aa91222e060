//! SQLite persistence for rooms and game results.

mod models;
mod results;
mod rooms;
mod schema; // Diesel generated schema - internal use only

pub use results::SqliteRecorder;
pub use rooms::SqliteRoomStore;

use crate::StoreError;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

/// Schema migrations compiled into the crate.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How long a connection waits on another writer's lock before failing.
pub const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Opens a connection to the database at `db_path`.
///
/// Every operation opens its own connection, so a writer that finds the
/// database locked waits up to [`BUSY_TIMEOUT_MS`] and then re-checks its
/// `WHERE` clause against the committed row.
#[instrument]
fn connect(db_path: &str) -> Result<SqliteConnection, StoreError> {
    debug!("Establishing connection");
    let mut conn = SqliteConnection::establish(db_path)
        .map_err(|e| StoreError::new(format!("Failed to connect to '{}': {}", db_path, e)))?;
    conn.batch_execute(&format!("PRAGMA busy_timeout = {};", BUSY_TIMEOUT_MS))?;
    Ok(conn)
}

/// Applies any pending migrations to the database at `db_path`.
///
/// # Errors
///
/// Returns [`StoreError`] if the database cannot be opened or a migration
/// fails.
#[instrument]
pub fn run_migrations(db_path: &str) -> Result<(), StoreError> {
    let mut conn = connect(db_path)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| StoreError::new(format!("Migration failed: {}", e)))?;
    info!(applied = applied.len(), "Migrations applied");
    Ok(())
}
