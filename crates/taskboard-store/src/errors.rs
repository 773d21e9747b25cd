//! Error types for the store.

use taskboard_core::TaskError;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `SQLite` error, including a missing `tasks` table.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error, including acquisition timeouts.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// A stored value could not be decoded.
    #[error("corrupt row in {table}.{column}: {detail}")]
    CorruptRow {
        /// Table name.
        table: &'static str,
        /// Column name.
        column: &'static str,
        /// What was wrong with the value.
        detail: String,
    },

    /// `DATABASE_URL` names a store this build cannot open.
    #[error("unsupported database url: {0}")]
    UnsupportedUrl(String),

    /// Internal error (e.g. a blocking task panicked).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for store results.
pub type Result<T> = std::result::Result<T, StoreError>;

impl From<StoreError> for TaskError {
    fn from(err: StoreError) -> Self {
        TaskError::StorageUnavailable(err.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
