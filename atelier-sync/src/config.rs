//! Site data configuration.

use atelier_remote::RemoteError;
use serde::{Deserialize, Serialize};

/// Which remote write failures fall back to a local-only write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Every failure falls back; writes always succeed.
    #[default]
    AnyFailure,
    /// Only an unreachable backend falls back. Rejections are returned.
    UnavailableOnly,
}

impl FallbackPolicy {
    /// Returns true when `error` should be absorbed by a local write.
    pub fn allows(self, error: &RemoteError) -> bool {
        match self {
            FallbackPolicy::AnyFailure => true,
            FallbackPolicy::UnavailableOnly => error.is_unavailable(),
        }
    }
}

/// Configuration for [`SiteData`](crate::SiteData).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteDataConfig {
    /// How create and update treat remote failures.
    pub fallback: FallbackPolicy,
    /// Write built-in defaults to the mirror when a collection falls back to them.
    pub seed_defaults: bool,
    /// Back up successfully fetched collections to the mirror.
    pub mirror_remote_reads: bool,
}

impl Default for SiteDataConfig {
    fn default() -> Self {
        Self {
            fallback: FallbackPolicy::AnyFailure,
            seed_defaults: true,
            mirror_remote_reads: true,
        }
    }
}
