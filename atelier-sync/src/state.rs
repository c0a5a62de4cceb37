//! In-memory site state: the snapshot, per-collection load status and write
//! outcomes.

use atelier_remote::RemoteError;
use atelier_types::{defaults, Artwork, CafeItem, Collection, Event, Hours, Record};
use serde::{Deserialize, Serialize};

/// Load progress of one collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    Uninitialized,
    Loading,
    /// Data is available, whichever source supplied it.
    Ready,
}

/// Where a collection's current data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Remote,
    Mirror,
    Defaults,
}

/// Status of one collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStatus {
    pub state: LoadState,
    pub source: Option<DataSource>,
    /// Why the remote fetch was not used, if it was not.
    pub last_error: Option<String>,
}

impl CollectionStatus {
    pub fn ready(source: DataSource, last_error: Option<String>) -> Self {
        Self {
            state: LoadState::Ready,
            source: Some(source),
            last_error,
        }
    }
}

/// Status of all four collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteStatus {
    pub events: CollectionStatus,
    pub artworks: CollectionStatus,
    pub cafe_items: CollectionStatus,
    pub hours: CollectionStatus,
}

impl SiteStatus {
    #[must_use]
    pub fn get(&self, collection: Collection) -> &CollectionStatus {
        match collection {
            Collection::Events => &self.events,
            Collection::Artworks => &self.artworks,
            Collection::CafeItems => &self.cafe_items,
            Collection::Hours => &self.hours,
        }
    }

    pub fn get_mut(&mut self, collection: Collection) -> &mut CollectionStatus {
        match collection {
            Collection::Events => &mut self.events,
            Collection::Artworks => &mut self.artworks,
            Collection::CafeItems => &mut self.cafe_items,
            Collection::Hours => &mut self.hours,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Collection, &CollectionStatus)> {
        Collection::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// True until every collection is ready.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.iter().any(|(_, s)| s.state != LoadState::Ready)
    }

    /// Collections not currently served from the remote store.
    pub fn degraded(&self) -> impl Iterator<Item = Collection> + '_ {
        self.iter()
            .filter(|(_, s)| s.source.is_some_and(|src| src != DataSource::Remote))
            .map(|(c, _)| c)
    }
}

/// The application-wide view of all four collections.
///
/// Starts out holding the built-in defaults, so it is never empty before the
/// first load completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSnapshot {
    pub events: Vec<Event>,
    pub artworks: Vec<Artwork>,
    pub cafe_items: Vec<CafeItem>,
    pub hours: Hours,
}

impl Default for SiteSnapshot {
    fn default() -> Self {
        Self {
            events: defaults::default_events(),
            artworks: defaults::default_artworks(),
            cafe_items: defaults::default_cafe_items(),
            hours: defaults::default_hours(),
        }
    }
}

/// A record kind held as a sequence in the snapshot.
pub trait SnapshotRecord: Record {
    fn slot(snapshot: &SiteSnapshot) -> &Vec<Self>;
    fn slot_mut(snapshot: &mut SiteSnapshot) -> &mut Vec<Self>;
}

impl SnapshotRecord for Event {
    fn slot(snapshot: &SiteSnapshot) -> &Vec<Self> {
        &snapshot.events
    }

    fn slot_mut(snapshot: &mut SiteSnapshot) -> &mut Vec<Self> {
        &mut snapshot.events
    }
}

impl SnapshotRecord for Artwork {
    fn slot(snapshot: &SiteSnapshot) -> &Vec<Self> {
        &snapshot.artworks
    }

    fn slot_mut(snapshot: &mut SiteSnapshot) -> &mut Vec<Self> {
        &mut snapshot.artworks
    }
}

impl SnapshotRecord for CafeItem {
    fn slot(snapshot: &SiteSnapshot) -> &Vec<Self> {
        &snapshot.cafe_items
    }

    fn slot_mut(snapshot: &mut SiteSnapshot) -> &mut Vec<Self> {
        &mut snapshot.cafe_items
    }
}

/// Whether a mutation reached the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncStatus {
    /// The remote store accepted the write.
    Remote,
    /// Only the mirror and snapshot were updated.
    LocalOnly { reason: String },
}

impl SyncStatus {
    pub fn local_only(error: &RemoteError) -> Self {
        SyncStatus::LocalOnly {
            reason: error.to_string(),
        }
    }

    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, SyncStatus::Remote)
    }
}

/// Outcome of a mutation: the resulting value and how far it got.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Write<T> {
    pub value: T,
    pub sync: SyncStatus,
}

impl<T> Write<T> {
    pub fn remote(value: T) -> Self {
        Self {
            value,
            sync: SyncStatus::Remote,
        }
    }

    pub fn local(value: T, error: &RemoteError) -> Self {
        Self {
            value,
            sync: SyncStatus::local_only(error),
        }
    }

    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.sync.is_remote()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
