//! Remote store error types.

use thiserror::Error;

/// Result type for remote store operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Errors returned by a remote store.
///
/// The split matters to callers: an unavailable backend is a reason to fall
/// back to local data, a rejection means the request itself was refused.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    /// Network failure, authentication failure, or the backend is down.
    #[error("remote store unavailable: {0}")]
    Unavailable(String),

    /// The backend received the request and refused it.
    #[error("remote store rejected the request{}: {message}", status_suffix(.status))]
    Rejected {
        status: Option<u16>,
        message: String,
    },

    /// The client could not be configured (missing URL or key).
    #[error("invalid remote configuration: {0}")]
    Config(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

impl RemoteError {
    pub fn rejected(message: impl Into<String>) -> Self {
        RemoteError::Rejected {
            status: None,
            message: message.into(),
        }
    }

    /// Returns true when the backend could not be reached at all.
    ///
    /// A misconfigured client never reaches the backend, so it counts as
    /// unavailable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, RemoteError::Unavailable(_) | RemoteError::Config(_))
    }

    /// Returns true when the backend refused the request.
    pub fn is_rejected(&self) -> bool {
        matches!(self, RemoteError::Rejected { .. })
    }

    /// HTTP status attached to a rejection, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Rejected { status, .. } => *status,
            _ => None,
        }
    }
}
