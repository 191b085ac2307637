//! Store error model and sqlx error mapping.

use thiserror::Error;

/// Persistence-layer error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying database reported a failure.
    #[error("database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// A single-record lookup returned more than one row. Reported as an
    /// inconsistency rather than silently resolved by taking the first.
    #[error("ambiguous result: {0}")]
    Ambiguous(String),

    /// The connection pool was closed.
    #[error("connection pool closed in {0}")]
    PoolClosed(&'static str),
}

/// Map sqlx errors to `StoreError`, tagged with the store operation that
/// failed.
pub(crate) fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolClosed => StoreError::PoolClosed(operation),
        sqlx::Error::Database(db_err) => StoreError::Database {
            operation,
            message: db_err.message().to_string(),
        },
        other => StoreError::Database {
            operation,
            message: other.to_string(),
        },
    }
}
