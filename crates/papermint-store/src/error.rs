use thiserror::Error;

use papermint_shared::error::LedgerError;

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error (e.g. creating the database directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding/decoding of a stored value failed.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Migration failure.
    #[error("Migration error: {0}")]
    Migration(String),

    /// A stored value does not parse as the expected type.
    #[error("Corrupt stored value: {0}")]
    Corrupt(String),
}

impl From<StoreError> for LedgerError {
    /// The core only distinguishes "persistence worked" from "it did not".
    fn from(err: StoreError) -> Self {
        LedgerError::PersistenceUnavailable(err.to_string())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
