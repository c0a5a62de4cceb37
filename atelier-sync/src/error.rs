//! Error types for the reconciliation layer.

use atelier_mirror::MirrorError;
use atelier_remote::RemoteError;
use atelier_types::ValidationError;
use thiserror::Error;

/// Result type for site data operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors a mutation or flush can surface.
///
/// Remote failures only appear here when the configured
/// [`FallbackPolicy`](crate::FallbackPolicy) refuses to fall back.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The draft broke a record invariant. Nothing was written.
    #[error("invalid record: {0}")]
    Invalid(#[from] ValidationError),

    /// The remote store refused the write.
    #[error(transparent)]
    Rejected(RemoteError),

    /// The local mirror could not be written.
    #[error("local mirror error: {0}")]
    Mirror(#[from] MirrorError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
