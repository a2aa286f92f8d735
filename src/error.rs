//! Error types for the person store.

use std::path::PathBuf;

/// Errors that can occur while opening or operating on the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The directory holding the database file could not be created
    #[error("storage unavailable at {path}: {source}")]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The engine could not open or create the database file
    #[error("cannot open database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// An existing table does not match the expected layout
    #[error("schema error: {0}")]
    Schema(String),

    /// SQLite statement error
    #[error("statement failed: {0}")]
    Statement(#[from] rusqlite::Error),

    /// Rejected input for a new record
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

/// Convenience Result type.
pub type Result<T> = std::result::Result<T, StoreError>;
