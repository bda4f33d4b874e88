use thiserror::Error;

use bayanihan_shared::{DomainError, EntityId};

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

    /// Migration failure.
    #[error("Migration error: {0}")]
    Migration(String),

    /// A collection failed to serialize on write.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An id lookup during update/delete found no record.
    #[error("Record {id} not found in '{collection}'")]
    NotFound {
        collection: &'static str,
        id: EntityId,
    },

    /// A mutator rejected its input before anything was written.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
