//! Shared mapping from pool and Diesel failures to [`PersistenceError`].
//!
//! Constraint violations keep the constraint name PostgreSQL reports so the
//! caller sees the same names the in-memory adapter uses.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ValidationError;
use crate::domain::ports::PersistenceError;

use super::pool::PoolError;

/// Map pool errors to connection failures.
pub(crate) fn map_pool_error(error: PoolError) -> PersistenceError {
    PersistenceError::connection(error.into_message())
}

/// Map Diesel errors, classifying database constraint violations.
pub(crate) fn map_diesel_error(error: DieselError) -> PersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => PersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => PersistenceError::query("database query error"),
        DieselError::DatabaseError(kind, info) => {
            let constraint = info.constraint_name().unwrap_or("unknown").to_owned();
            match kind {
                DatabaseErrorKind::UniqueViolation => PersistenceError::unique_violation(constraint),
                DatabaseErrorKind::ForeignKeyViolation => {
                    PersistenceError::foreign_key_violation(constraint)
                }
                DatabaseErrorKind::NotNullViolation => {
                    let column = info.column_name().unwrap_or("unknown");
                    PersistenceError::not_null_violation(column)
                }
                DatabaseErrorKind::ClosedConnection => {
                    PersistenceError::connection("database connection error")
                }
                _ => PersistenceError::query(info.message().to_owned()),
            }
        }
        _ => PersistenceError::query("database error"),
    }
}

/// Map a stored value that no longer passes domain validation.
pub(crate) fn map_corrupt_row(table: &str, error: &ValidationError) -> PersistenceError {
    PersistenceError::query(format!("invalid {table} row: {error}"))
}

/// Convert a database count into the domain's unsigned representation.
pub(crate) fn count_to_u64(count: i64) -> Result<u64, PersistenceError> {
    u64::try_from(count).map_err(|_| PersistenceError::query(format!("negative count {count}")))
}
