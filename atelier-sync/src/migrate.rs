//! One-shot transfers between the local mirror and the remote store.

use crate::site::find_hours_row;
use atelier_mirror::Mirror;
use atelier_remote::{RemoteError, RemoteResult, RemoteStore};
use atelier_types::{
    defaults, Artwork, CafeItem, Collection, Event, Hours, Record, RecordId, HOURS_ROW_ID,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

/// Outcome of migrating one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionMigration {
    pub collection: Collection,
    /// Records found in the mirror.
    pub found: usize,
    /// Records the remote store accepted.
    pub migrated: usize,
    pub error: Option<String>,
}

impl CollectionMigration {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-collection results of [`migrate_mirror_to_remote`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub collections: Vec<CollectionMigration>,
}

impl MigrationReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.collections.iter().all(CollectionMigration::is_success)
    }

    #[must_use]
    pub fn get(&self, collection: Collection) -> Option<&CollectionMigration> {
        self.collections.iter().find(|c| c.collection == collection)
    }

    #[must_use]
    pub fn total_migrated(&self) -> usize {
        self.collections.iter().map(|c| c.migrated).sum()
    }
}

/// Pushes all mirrored content to the remote store.
///
/// Records are inserted without their ids so the backend assigns new ones.
/// Hours are upserted into the singleton row. Collections migrate
/// concurrently and a failure in one does not stop the others; within a
/// collection, migration stops at the first failed insert.
pub async fn migrate_mirror_to_remote(
    remote: &dyn RemoteStore,
    mirror: &Mirror,
) -> MigrationReport {
    let (events, artworks, cafe_items, hours) = tokio::join!(
        migrate_records::<Event>(remote, mirror),
        migrate_records::<Artwork>(remote, mirror),
        migrate_records::<CafeItem>(remote, mirror),
        migrate_hours(remote, mirror),
    );

    let report = MigrationReport {
        collections: vec![events, artworks, cafe_items, hours],
    };
    info!(
        "Migrated {} records to {}",
        report.total_migrated(),
        remote.provider_name()
    );
    report
}

async fn migrate_records<T: Record>(
    remote: &dyn RemoteStore,
    mirror: &Mirror,
) -> CollectionMigration {
    let collection = T::COLLECTION;
    let records: Vec<T> = mirror.read(collection).unwrap_or_default();
    let mut outcome = CollectionMigration {
        collection,
        found: records.len(),
        migrated: 0,
        error: None,
    };

    for record in &records {
        let result = match serde_json::to_value(record) {
            Ok(Value::Object(mut fields)) => {
                fields.remove("id");
                remote.create(collection, Value::Object(fields)).await
            }
            Ok(_) => Err(RemoteError::rejected("record is not an object")),
            Err(e) => Err(RemoteError::rejected(e.to_string())),
        };

        if let Err(e) = result {
            warn!("Migration of {} stopped after {} records: {}", collection, outcome.migrated, e);
            outcome.error = Some(e.to_string());
            break;
        }
        outcome.migrated += 1;
    }
    outcome
}

async fn migrate_hours(remote: &dyn RemoteStore, mirror: &Mirror) -> CollectionMigration {
    let mut outcome = CollectionMigration {
        collection: Collection::Hours,
        found: 0,
        migrated: 0,
        error: None,
    };
    let Some(hours) = mirror.read::<Hours>(Collection::Hours) else {
        return outcome;
    };
    outcome.found = 1;

    match upsert_hours(remote, &hours).await {
        Ok(_) => outcome.migrated = 1,
        Err(e) => {
            warn!("Migration of opening hours failed: {}", e);
            outcome.error = Some(e.to_string());
        }
    }
    outcome
}

async fn upsert_hours(remote: &dyn RemoteStore, hours: &Hours) -> RemoteResult<Value> {
    let payload = serde_json::to_value(hours)
        .map_err(|e| RemoteError::rejected(e.to_string()))?;
    remote
        .upsert(Collection::Hours, &RecordId::from(HOURS_ROW_ID), payload)
        .await
}

/// Makes sure the opening hours row exists remotely, inserting the built-in
/// hours when it does not. Returns whether a row was written.
pub async fn initialize_remote(remote: &dyn RemoteStore) -> RemoteResult<bool> {
    let rows = remote.list(Collection::Hours).await?;
    if find_hours_row(rows).is_some() {
        info!("Opening hours already present in {}", remote.provider_name());
        return Ok(false);
    }

    upsert_hours(remote, &defaults::default_hours()).await?;
    info!("Seeded default opening hours in {}", remote.provider_name());
    Ok(true)
}
