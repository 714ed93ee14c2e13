//! Embedded schema migrations for the content tables.
//!
//! Migrations run over a synchronous `PgConnection`; async callers should
//! wrap these functions in `tokio::task::spawn_blocking`.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::PersistenceError;

/// Migrations compiled into the binary from `backend/migrations`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

fn connect(database_url: &str) -> Result<PgConnection, PersistenceError> {
    PgConnection::establish(database_url)
        .map_err(|err| PersistenceError::connection(err.to_string()))
}

/// Apply every pending migration, returning the versions that ran.
///
/// # Errors
///
/// Returns [`PersistenceError::Connection`] when the database is unreachable
/// and [`PersistenceError::Query`] when a migration fails.
pub fn run_pending_migrations(database_url: &str) -> Result<Vec<String>, PersistenceError> {
    let mut conn = connect(database_url)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| PersistenceError::query(format!("migration: {err}")))?
        .into_iter()
        .map(|version| version.to_string())
        .collect::<Vec<_>>();

    info!(count = applied.len(), versions = ?applied, "applied content migrations");
    Ok(applied)
}

/// Revert every applied migration, dropping the content tables.
///
/// # Errors
///
/// Same as [`run_pending_migrations`].
pub fn revert_all_migrations(database_url: &str) -> Result<Vec<String>, PersistenceError> {
    let mut conn = connect(database_url)?;
    let reverted = conn
        .revert_all_migrations(MIGRATIONS)
        .map_err(|err| PersistenceError::query(format!("revert migration: {err}")))?
        .into_iter()
        .map(|version| version.to_string())
        .collect::<Vec<_>>();

    info!(count = reverted.len(), versions = ?reverted, "reverted content migrations");
    Ok(reverted)
}
