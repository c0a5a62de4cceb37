//! Record identifiers.
//!
//! Identifiers are opaque strings. The hosted backend assigns UUIDs; records
//! created while the backend is unreachable get a small decimal id from
//! [`RecordId::next_local`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed identifier of the opening-hours singleton row.
pub const HOURS_ROW_ID: &str = "main";

/// Unique identifier of a record within its collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wraps an existing identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the numeric value of a locally generated id.
    ///
    /// Backend-assigned UUIDs return `None`.
    #[must_use]
    pub fn as_local_number(&self) -> Option<u64> {
        self.0.parse().ok()
    }

    /// Computes the next locally generated id: one past the largest numeric
    /// id in `existing`, or `"1"` when there is none.
    #[must_use]
    pub fn next_local<'a>(existing: impl IntoIterator<Item = &'a RecordId>) -> Self {
        let next = existing
            .into_iter()
            .filter_map(RecordId::as_local_number)
            .max()
            .map_or(1, |max| max.saturating_add(1));
        Self(next.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
