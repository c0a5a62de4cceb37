//! In-process remote store.
//!
//! Behaves like the hosted backend (the backend assigns UUID ids, updates
//! merge fields, deletes are idempotent) and lets tests and local runs
//! simulate outages and refusals.

use crate::error::{RemoteError, RemoteResult};
use crate::store::RemoteStore;
use async_trait::async_trait;
use atelier_types::{Collection, RecordId};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;
use uuid::Uuid;

/// Remote store kept in memory.
#[derive(Default)]
pub struct MemoryRemote {
    tables: Mutex<HashMap<Collection, Vec<Value>>>,
    offline: AtomicBool,
    outages: Mutex<HashSet<Collection>>,
    reject_next: Mutex<Option<String>>,
    requests: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn row_id(row: &Value) -> Option<&str> {
    row.get("id").and_then(Value::as_str)
}

fn into_object(value: Value) -> RemoteResult<Map<String, Value>> {
    match value {
        Value::Object(fields) => Ok(fields),
        other => Err(RemoteError::Rejected {
            status: Some(400),
            message: format!("expected a JSON object, got {other}"),
        }),
    }
}

impl MemoryRemote {
    /// Creates an empty, reachable store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a collection with rows, replacing what was there.
    #[must_use]
    pub fn with_rows(self, collection: Collection, rows: Vec<Value>) -> Self {
        lock(&self.tables).insert(collection, rows);
        self
    }

    /// Simulates the whole backend going down (or coming back).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Makes every request against one collection fail as unavailable.
    pub fn fail_collection(&self, collection: Collection) {
        lock(&self.outages).insert(collection);
    }

    /// Ends an outage started with [`fail_collection`](Self::fail_collection).
    pub fn restore_collection(&self, collection: Collection) {
        lock(&self.outages).remove(&collection);
    }

    /// Makes the next request fail as a rejection with `message`.
    pub fn reject_next(&self, message: impl Into<String>) {
        *lock(&self.reject_next) = Some(message.into());
    }

    /// Returns a copy of the rows currently stored for a collection.
    pub fn rows(&self, collection: Collection) -> Vec<Value> {
        lock(&self.tables).get(&collection).cloned().unwrap_or_default()
    }

    /// Number of requests received so far, including failed ones.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn check(&self, collection: Collection) -> RemoteResult<()> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        if self.offline.load(Ordering::SeqCst) {
            return Err(RemoteError::Unavailable("backend offline".to_string()));
        }
        if lock(&self.outages).contains(&collection) {
            return Err(RemoteError::Unavailable(format!("{collection} unavailable")));
        }
        if let Some(message) = lock(&self.reject_next).take() {
            return Err(RemoteError::Rejected {
                status: Some(400),
                message,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for MemoryRemote {
    fn provider_name(&self) -> &'static str {
        "In-memory"
    }

    async fn list(&self, collection: Collection) -> RemoteResult<Vec<Value>> {
        self.check(collection)?;
        Ok(self.rows(collection))
    }

    async fn create(&self, collection: Collection, record: Value) -> RemoteResult<Value> {
        self.check(collection)?;
        let mut fields = into_object(record)?;
        fields.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
        let row = Value::Object(fields);

        lock(&self.tables)
            .entry(collection)
            .or_default()
            .push(row.clone());
        debug!("Created {} row {:?}", collection, row_id(&row));
        Ok(row)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &RecordId,
        patch: Value,
    ) -> RemoteResult<Value> {
        self.check(collection)?;
        let patch = into_object(patch)?;

        let mut tables = lock(&self.tables);
        let row = tables
            .get_mut(&collection)
            .and_then(|rows| rows.iter_mut().find(|r| row_id(r) == Some(id.as_str())))
            .ok_or_else(|| RemoteError::Rejected {
                status: Some(406),
                message: format!("no {collection} row with id {id}"),
            })?;

        if let Value::Object(fields) = row {
            for (key, value) in patch {
                if key != "id" {
                    fields.insert(key, value);
                }
            }
        }
        Ok(row.clone())
    }

    async fn upsert(
        &self,
        collection: Collection,
        id: &RecordId,
        record: Value,
    ) -> RemoteResult<Value> {
        self.check(collection)?;
        let mut fields = into_object(record)?;
        fields.insert("id".to_string(), Value::String(id.to_string()));
        let row = Value::Object(fields);

        let mut tables = lock(&self.tables);
        let rows = tables.entry(collection).or_default();
        match rows.iter_mut().find(|r| row_id(r) == Some(id.as_str())) {
            Some(existing) => *existing = row.clone(),
            None => rows.push(row.clone()),
        }
        Ok(row)
    }

    async fn delete(&self, collection: Collection, id: &RecordId) -> RemoteResult<bool> {
        self.check(collection)?;
        if let Some(rows) = lock(&self.tables).get_mut(&collection) {
            rows.retain(|r| row_id(r) != Some(id.as_str()));
        }
        Ok(true)
    }
}
