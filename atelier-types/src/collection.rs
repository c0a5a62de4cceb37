//! The four named record groups and how each is addressed remotely and locally.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four content collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Events,
    Artworks,
    CafeItems,
    Hours,
}

impl Collection {
    /// All collections in load order.
    pub const ALL: [Collection; 4] = [
        Collection::Events,
        Collection::Artworks,
        Collection::CafeItems,
        Collection::Hours,
    ];

    /// Table name in the hosted backend.
    #[must_use]
    pub const fn remote_table(self) -> &'static str {
        match self {
            Collection::Events => "events",
            Collection::Artworks => "artworks",
            Collection::CafeItems => "cafe_items",
            Collection::Hours => "hours",
        }
    }

    /// Key under which the local mirror stores this collection.
    #[must_use]
    pub const fn mirror_key(self) -> &'static str {
        match self {
            Collection::Events => "events",
            Collection::Artworks => "artworks",
            Collection::CafeItems => "cafeItems",
            Collection::Hours => "site_opening_hours",
        }
    }

    /// PostgREST `order` clause used when listing the collection.
    #[must_use]
    pub const fn list_order(self) -> Option<&'static str> {
        match self {
            Collection::Events => Some("date.asc"),
            Collection::Artworks => Some("created_at.desc"),
            Collection::CafeItems => Some("category.asc"),
            Collection::Hours => None,
        }
    }

    /// Whether the collection is a single record rather than a sequence.
    #[must_use]
    pub const fn is_singleton(self) -> bool {
        matches!(self, Collection::Hours)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.remote_table())
    }
}
