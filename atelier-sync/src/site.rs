//! The site data context.
//!
//! [`SiteData`] owns the snapshot and reconciles it against the remote store
//! and the local mirror. Loads never fail: each collection independently
//! falls back from the remote store to the mirror and then to the built-in
//! defaults. Mutations write through to the remote store and keep the mirror
//! and snapshot current even when the remote write fails.

use crate::config::SiteDataConfig;
use crate::error::{SyncError, SyncResult};
use crate::state::{
    CollectionStatus, DataSource, LoadState, SiteSnapshot, SiteStatus, SnapshotRecord, Write,
};
use atelier_mirror::Mirror;
use atelier_remote::{RemoteError, RemoteResult, RemoteStore};
use atelier_types::{
    defaults, Artwork, ArtworkDraft, ArtworkPatch, CafeItem, CafeItemDraft, CafeItemPatch,
    Category, Collection, Event, EventDraft, EventPatch, Hours, Record, RecordId, HOURS_ROW_ID,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Decodes a row returned by the remote store.
pub(crate) fn decode_row<T: DeserializeOwned>(
    collection: Collection,
    row: Value,
) -> RemoteResult<T> {
    serde_json::from_value(row).map_err(|e| RemoteError::Rejected {
        status: None,
        message: format!("undecodable {collection} row: {e}"),
    })
}

/// The id the remote store assigned to a row, if it carries one.
fn row_id(row: &Value) -> Option<RecordId> {
    match row.get("id")? {
        Value::String(id) => Some(RecordId::from(id.as_str())),
        Value::Number(id) => Some(RecordId::from(id.to_string())),
        _ => None,
    }
}

/// Finds and decodes the hours singleton among the rows of the hours table.
pub(crate) fn find_hours_row(rows: Vec<Value>) -> Option<Hours> {
    let row = rows
        .into_iter()
        .find(|row| row.get("id").and_then(Value::as_str) == Some(HOURS_ROW_ID))?;
    match serde_json::from_value(row) {
        Ok(hours) => Some(hours),
        Err(e) => {
            warn!("Ignoring undecodable hours row: {}", e);
            None
        }
    }
}

/// Shared site content with remote write-through and local fallback.
pub struct SiteData {
    remote: Arc<dyn RemoteStore>,
    mirror: Mirror,
    config: SiteDataConfig,
    snapshot: RwLock<SiteSnapshot>,
    status: RwLock<SiteStatus>,
}

impl SiteData {
    /// Creates a context holding the built-in defaults. Call [`load`](Self::load)
    /// to fetch real content.
    pub fn new(remote: Arc<dyn RemoteStore>, mirror: Mirror, config: SiteDataConfig) -> Self {
        Self {
            remote,
            mirror,
            config,
            snapshot: RwLock::new(SiteSnapshot::default()),
            status: RwLock::new(SiteStatus::default()),
        }
    }

    pub fn config(&self) -> &SiteDataConfig {
        &self.config
    }

    pub fn mirror(&self) -> &Mirror {
        &self.mirror
    }

    pub fn remote(&self) -> &Arc<dyn RemoteStore> {
        &self.remote
    }

    // ── Loading ──────────────────────────────────────────────────

    /// Runs the startup protocol.
    ///
    /// All four collections are fetched concurrently and each settles on its
    /// own; afterwards every collection is [`LoadState::Ready`].
    pub async fn load(&self) {
        {
            let mut status = self.status.write().await;
            for collection in Collection::ALL {
                status.get_mut(collection).state = LoadState::Loading;
            }
        }
        debug!("Loading site data from {}", self.remote.provider_name());

        let (events, artworks, cafe_items, hours) = tokio::join!(
            self.remote.list(Collection::Events),
            self.remote.list(Collection::Artworks),
            self.remote.list(Collection::CafeItems),
            self.remote.list(Collection::Hours),
        );

        let (events, events_status) = self.resolve_records::<Event>(events);
        let (artworks, artworks_status) = self.resolve_records::<Artwork>(artworks);
        let (cafe_items, cafe_items_status) = self.resolve_records::<CafeItem>(cafe_items);
        let (hours, hours_status) = self.resolve_hours(hours);

        let status = SiteStatus {
            events: events_status,
            artworks: artworks_status,
            cafe_items: cafe_items_status,
            hours: hours_status,
        };

        *self.snapshot.write().await = SiteSnapshot {
            events,
            artworks,
            cafe_items,
            hours,
        };

        let degraded: Vec<_> = status.degraded().map(|c| c.to_string()).collect();
        if degraded.is_empty() {
            info!("Site data loaded from {}", self.remote.provider_name());
        } else {
            info!("Site data loaded; using local data for: {}", degraded.join(", "));
        }
        *self.status.write().await = status;
    }

    /// Re-runs the startup protocol against the current remote store.
    pub async fn reload(&self) {
        self.load().await;
    }

    /// Flushes the snapshot to the mirror.
    pub async fn shutdown(&self) -> SyncResult<()> {
        let snapshot = self.snapshot.read().await;
        self.mirror.write(Collection::Events, &snapshot.events)?;
        self.mirror.write(Collection::Artworks, &snapshot.artworks)?;
        self.mirror.write(Collection::CafeItems, &snapshot.cafe_items)?;
        self.mirror.write(Collection::Hours, &snapshot.hours)?;
        info!("Site data flushed to local mirror");
        Ok(())
    }

    fn resolve_records<T: Record>(
        &self,
        fetched: RemoteResult<Vec<Value>>,
    ) -> (Vec<T>, CollectionStatus) {
        let collection = T::COLLECTION;
        match fetched {
            Ok(rows) => {
                let total = rows.len();
                let records: Vec<T> = rows
                    .into_iter()
                    .filter_map(|row| match decode_row::<T>(collection, row) {
                        Ok(record) => Some(record),
                        Err(e) => {
                            warn!("Skipping remote row: {}", e);
                            None
                        }
                    })
                    .collect();
                debug!("Fetched {}/{} {} rows", records.len(), total, collection);
                self.back_up(collection, &records);
                (records, CollectionStatus::ready(DataSource::Remote, None))
            }
            Err(e) => {
                warn!("Failed to fetch {}: {}", collection, e);
                let (records, source) = self.fall_back(collection, T::defaults);
                (records, CollectionStatus::ready(source, Some(e.to_string())))
            }
        }
    }

    fn resolve_hours(&self, fetched: RemoteResult<Vec<Value>>) -> (Hours, CollectionStatus) {
        let error = match fetched.map(find_hours_row) {
            Ok(Some(hours)) => {
                self.back_up(Collection::Hours, &hours);
                return (hours, CollectionStatus::ready(DataSource::Remote, None));
            }
            Ok(None) => "no opening hours row".to_string(),
            Err(e) => e.to_string(),
        };
        warn!("Failed to fetch hours: {}", error);
        let (hours, source) = self.fall_back(Collection::Hours, defaults::default_hours);
        (hours, CollectionStatus::ready(source, Some(error)))
    }

    /// Mirror first, then defaults.
    fn fall_back<T>(&self, collection: Collection, builtin: impl FnOnce() -> T) -> (T, DataSource)
    where
        T: Serialize + DeserializeOwned,
    {
        if let Some(stored) = self.mirror.read(collection) {
            info!("Using mirrored {}", collection);
            return (stored, DataSource::Mirror);
        }

        info!("Using default {}", collection);
        let value = builtin();
        if self.config.seed_defaults {
            if let Err(e) = self.mirror.write(collection, &value) {
                warn!("Failed to seed mirror with default {}: {}", collection, e);
            }
        }
        (value, DataSource::Defaults)
    }

    fn back_up<T: Serialize + ?Sized>(&self, collection: Collection, value: &T) {
        if self.config.mirror_remote_reads {
            self.store(collection, value);
        }
    }

    /// Writes the mirror, logging failures. The snapshot stays authoritative.
    fn store<T: Serialize + ?Sized>(&self, collection: Collection, value: &T) {
        if let Err(e) = self.mirror.write(collection, value) {
            warn!("Failed to mirror {}: {}", collection, e);
        }
    }

    // ── Reads ────────────────────────────────────────────────────

    pub async fn snapshot(&self) -> SiteSnapshot {
        self.snapshot.read().await.clone()
    }

    pub async fn events(&self) -> Vec<Event> {
        self.snapshot.read().await.events.clone()
    }

    pub async fn artworks(&self) -> Vec<Artwork> {
        self.snapshot.read().await.artworks.clone()
    }

    pub async fn featured_artworks(&self) -> Vec<Artwork> {
        self.snapshot
            .read()
            .await
            .artworks
            .iter()
            .filter(|a| a.featured)
            .cloned()
            .collect()
    }

    pub async fn cafe_items(&self) -> Vec<CafeItem> {
        self.snapshot.read().await.cafe_items.clone()
    }

    pub async fn cafe_items_in(&self, category: Category) -> Vec<CafeItem> {
        self.snapshot
            .read()
            .await
            .cafe_items
            .iter()
            .filter(|item| item.category == category)
            .cloned()
            .collect()
    }

    pub async fn opening_hours(&self) -> Hours {
        self.snapshot.read().await.hours.clone()
    }

    /// Looks up one record by id.
    pub async fn get<T: SnapshotRecord>(&self, id: &RecordId) -> Option<T> {
        let snapshot = self.snapshot.read().await;
        T::slot(&snapshot).iter().find(|r| r.id() == id).cloned()
    }

    pub async fn status(&self) -> SiteStatus {
        self.status.read().await.clone()
    }

    /// True from construction until the first load completes, and while a
    /// reload is running.
    pub async fn is_loading(&self) -> bool {
        self.status.read().await.is_loading()
    }

    // ── Generic mutations ────────────────────────────────────────

    /// Creates a record.
    ///
    /// The remote store assigns the id. When the remote write fails and the
    /// fallback policy allows it, the record is kept locally under the next
    /// free numeric id.
    pub async fn create<T: SnapshotRecord>(&self, draft: T::Draft) -> SyncResult<Write<T>> {
        T::validate(&draft)?;
        let collection = T::COLLECTION;
        let payload = serde_json::to_value(&draft)?;

        match self.remote.create(collection, payload).await {
            Ok(row) => {
                let assigned = row_id(&row);
                let record = match decode_row::<T>(collection, row) {
                    Ok(record) => record,
                    Err(e) => {
                        warn!(
                            "Created {} but could not read the row back: {}",
                            collection, e
                        );
                        match assigned {
                            Some(id) => T::from_draft(id, draft),
                            None => return Ok(Write::remote(self.insert_local(draft).await)),
                        }
                    }
                };
                debug!("Created {} {}", collection, record.id());
                self.insert(record.clone()).await;
                Ok(Write::remote(record))
            }
            Err(e) if !self.config.fallback.allows(&e) => Err(SyncError::Rejected(e)),
            Err(e) => {
                warn!("Remote create of {} failed, keeping it locally: {}", collection, e);
                let record = self.insert_local(draft).await;
                Ok(Write::local(record, &e))
            }
        }
    }

    /// Applies a partial update.
    ///
    /// The change lands in the snapshot and mirror first; a successful remote
    /// write then replaces it with the stored row. Returns `None` when no
    /// record has the given id.
    pub async fn update<T: SnapshotRecord>(
        &self,
        id: &RecordId,
        patch: T::Patch,
    ) -> SyncResult<Option<Write<T>>> {
        let collection = T::COLLECTION;
        let payload = serde_json::to_value(&patch)?;

        let (previous, optimistic) = {
            let mut snapshot = self.snapshot.write().await;
            let slot = T::slot_mut(&mut snapshot);
            let Some(record) = slot.iter_mut().find(|r| r.id() == id) else {
                debug!("No {} with id {} to update", collection, id);
                return Ok(None);
            };
            let previous = record.clone();
            record.apply(&patch);
            let optimistic = record.clone();
            self.mirror_replace(&optimistic);
            (previous, optimistic)
        };

        match self.remote.update(collection, id, payload).await {
            Ok(row) => match decode_row::<T>(collection, row) {
                Ok(record) => {
                    self.replace(record.clone()).await;
                    Ok(Some(Write::remote(record)))
                }
                Err(e) => {
                    warn!(
                        "Updated {} {} but could not read the row back: {}",
                        collection, id, e
                    );
                    Ok(Some(Write::remote(optimistic)))
                }
            },
            Err(e) if !self.config.fallback.allows(&e) => {
                self.replace(previous).await;
                Err(SyncError::Rejected(e))
            }
            Err(e) => {
                warn!("Remote update of {} {} failed, kept locally: {}", collection, id, e);
                Ok(Some(Write::local(optimistic, &e)))
            }
        }
    }

    /// Removes a record locally, then remotely. Deleting an unknown id is a
    /// no-op; the returned value says whether a local record was removed.
    pub async fn delete<T: SnapshotRecord>(&self, id: &RecordId) -> Write<bool> {
        let collection = T::COLLECTION;
        let removed = {
            let mut snapshot = self.snapshot.write().await;
            let slot = T::slot_mut(&mut snapshot);
            let before = slot.len();
            slot.retain(|r| r.id() != id);
            let from_snapshot = slot.len() != before;
            let from_mirror = self.edit_mirror::<T>(|stored| {
                let before = stored.len();
                stored.retain(|r| r.id() != id);
                stored.len() != before
            });
            from_snapshot || from_mirror
        };

        match self.remote.delete(collection, id).await {
            Ok(_) => Write::remote(removed),
            Err(e) => {
                warn!("Remote delete of {} {} failed: {}", collection, id, e);
                Write::local(removed, &e)
            }
        }
    }

    async fn insert<T: SnapshotRecord>(&self, record: T) {
        let mut snapshot = self.snapshot.write().await;
        T::slot_mut(&mut snapshot).push(record.clone());
        self.edit_mirror::<T>(|stored| {
            stored.push(record);
            true
        });
    }

    /// Keeps a draft locally under the next free numeric id.
    async fn insert_local<T: SnapshotRecord>(&self, draft: T::Draft) -> T {
        let mut snapshot = self.snapshot.write().await;
        let mut stored: Vec<T> = self.mirror.read(T::COLLECTION).unwrap_or_default();
        let id = RecordId::next_local(
            stored.iter().map(T::id).chain(T::slot(&snapshot).iter().map(T::id)),
        );
        let record = T::from_draft(id, draft);
        T::slot_mut(&mut snapshot).push(record.clone());
        stored.push(record.clone());
        self.store(T::COLLECTION, &stored);
        record
    }

    async fn replace<T: SnapshotRecord>(&self, record: T) {
        let mut snapshot = self.snapshot.write().await;
        let slot = T::slot_mut(&mut snapshot);
        if let Some(existing) = slot.iter_mut().find(|r| r.id() == record.id()) {
            *existing = record.clone();
        }
        self.mirror_replace(&record);
    }

    fn mirror_replace<T: Record>(&self, record: &T) {
        self.edit_mirror::<T>(|stored| match stored.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => {
                *existing = record.clone();
                true
            }
            None => false,
        });
    }

    /// Applies `edit` to the mirrored sequence of `T`, writing it back when
    /// `edit` reports a change. Returns that report.
    fn edit_mirror<T: Record>(&self, edit: impl FnOnce(&mut Vec<T>) -> bool) -> bool {
        let mut stored: Vec<T> = self.mirror.read(T::COLLECTION).unwrap_or_default();
        let changed = edit(&mut stored);
        if changed {
            self.store(T::COLLECTION, &stored);
        }
        changed
    }

    // ── Named mutations ──────────────────────────────────────────

    pub async fn create_event(&self, draft: EventDraft) -> SyncResult<Write<Event>> {
        self.create(draft).await
    }

    pub async fn update_event(
        &self,
        id: &RecordId,
        patch: EventPatch,
    ) -> SyncResult<Option<Write<Event>>> {
        self.update(id, patch).await
    }

    pub async fn delete_event(&self, id: &RecordId) -> Write<bool> {
        self.delete::<Event>(id).await
    }

    pub async fn create_artwork(&self, draft: ArtworkDraft) -> SyncResult<Write<Artwork>> {
        self.create(draft).await
    }

    pub async fn update_artwork(
        &self,
        id: &RecordId,
        patch: ArtworkPatch,
    ) -> SyncResult<Option<Write<Artwork>>> {
        self.update(id, patch).await
    }

    pub async fn delete_artwork(&self, id: &RecordId) -> Write<bool> {
        self.delete::<Artwork>(id).await
    }

    /// Sets the featured flag of an artwork.
    pub async fn toggle_artwork_featured(
        &self,
        id: &RecordId,
        featured: bool,
    ) -> SyncResult<Option<Write<Artwork>>> {
        self.update(id, ArtworkPatch::featured(featured)).await
    }

    pub async fn create_cafe_item(&self, draft: CafeItemDraft) -> SyncResult<Write<CafeItem>> {
        self.create(draft).await
    }

    pub async fn update_cafe_item(
        &self,
        id: &RecordId,
        patch: CafeItemPatch,
    ) -> SyncResult<Option<Write<CafeItem>>> {
        self.update(id, patch).await
    }

    pub async fn delete_cafe_item(&self, id: &RecordId) -> Write<bool> {
        self.delete::<CafeItem>(id).await
    }

    /// Replaces the weekly opening hours.
    ///
    /// The snapshot and mirror take `hours` as given whatever the remote
    /// outcome.
    pub async fn update_opening_hours(&self, hours: Hours) -> Write<Hours> {
        let outcome = match serde_json::to_value(&hours) {
            Ok(payload) => {
                self.remote
                    .upsert(Collection::Hours, &RecordId::from(HOURS_ROW_ID), payload)
                    .await
            }
            Err(e) => Err(RemoteError::rejected(e.to_string())),
        };

        let mut snapshot = self.snapshot.write().await;
        snapshot.hours = hours.clone();
        self.store(Collection::Hours, &snapshot.hours);

        match outcome {
            Ok(_) => Write::remote(hours),
            Err(e) => {
                warn!("Remote update of opening hours failed: {}", e);
                Write::local(hours, &e)
            }
        }
    }
}

impl std::fmt::Debug for SiteData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteData")
            .field("remote", &self.remote.provider_name())
            .field("mirror", &self.mirror)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
