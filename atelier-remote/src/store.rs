//! Remote store abstraction trait.
//!
//! Rows cross this boundary as JSON objects with the backend's field names;
//! typed decoding is left to the caller.

use crate::error::RemoteResult;
use async_trait::async_trait;
use atelier_types::{Collection, RecordId};
use serde_json::Value;

/// Stateless CRUD access to the hosted content backend.
///
/// Implementations perform no retries; retry policy belongs to the caller.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Returns the name of the backend provider.
    fn provider_name(&self) -> &'static str;

    /// Lists every row in a collection.
    async fn list(&self, collection: Collection) -> RemoteResult<Vec<Value>>;

    /// Inserts a row without an id and returns it with the backend-assigned id.
    async fn create(&self, collection: Collection, record: Value) -> RemoteResult<Value>;

    /// Applies a partial update to the row with `id` and returns the full row.
    async fn update(&self, collection: Collection, id: &RecordId, patch: Value)
    -> RemoteResult<Value>;

    /// Inserts or wholly replaces the row with `id`.
    async fn upsert(&self, collection: Collection, id: &RecordId, record: Value)
    -> RemoteResult<Value>;

    /// Deletes the row with `id`. Deleting a missing row succeeds.
    async fn delete(&self, collection: Collection, id: &RecordId) -> RemoteResult<bool>;
}
