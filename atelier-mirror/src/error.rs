//! Error types for the local mirror.

use thiserror::Error;

/// Result type for mirror operations.
pub type MirrorResult<T> = Result<T, MirrorError>;

/// Errors that can occur while writing the local mirror.
///
/// Reads never surface these: an unreadable value is reported as absent.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (creating the mirror's directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A writer panicked while holding the connection lock.
    #[error("mirror lock poisoned")]
    Poisoned,
}
