//! Typed access to the mirror, one value per collection.

use crate::error::MirrorResult;
use crate::store::{DetachedMirror, LocalMirror};
use atelier_types::Collection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Typed mirror handle shared by the sync layer.
///
/// Each collection is stored as one JSON document under its
/// [`Collection::mirror_key`].
#[derive(Clone)]
pub struct Mirror {
    inner: Arc<dyn LocalMirror>,
}

impl Mirror {
    pub fn new(inner: Arc<dyn LocalMirror>) -> Self {
        Self { inner }
    }

    /// A mirror with no backing store.
    pub fn detached() -> Self {
        Self::new(Arc::new(DetachedMirror))
    }

    pub fn is_available(&self) -> bool {
        self.inner.is_available()
    }

    /// Reads a collection.
    ///
    /// Returns `None` when nothing is stored, when the store cannot be read,
    /// or when the stored value does not decode. Failures are logged.
    pub fn read<T: DeserializeOwned>(&self, collection: Collection) -> Option<T> {
        let key = collection.mirror_key();
        let raw = match self.inner.read_raw(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read mirror key {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring corrupt mirror value under {}: {}", key, e);
                None
            }
        }
    }

    /// Replaces the stored value of a collection.
    pub fn write<T: Serialize + ?Sized>(
        &self,
        collection: Collection,
        value: &T,
    ) -> MirrorResult<()> {
        let raw = serde_json::to_string(value)?;
        self.inner.write_raw(collection.mirror_key(), &raw)?;
        debug!("Mirrored {} ({} bytes)", collection, raw.len());
        Ok(())
    }

    /// Writes `value` only when the collection has nothing readable stored.
    ///
    /// Returns whether a write happened.
    pub fn seed<T>(&self, collection: Collection, value: &T) -> MirrorResult<bool>
    where
        T: Serialize + DeserializeOwned,
    {
        if self.read::<T>(collection).is_some() {
            return Ok(false);
        }
        self.write(collection, value)?;
        Ok(true)
    }

    /// Removes a collection from the mirror.
    pub fn clear(&self, collection: Collection) -> MirrorResult<()> {
        self.inner.remove(collection.mirror_key())
    }
}

impl std::fmt::Debug for Mirror {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mirror")
            .field("available", &self.is_available())
            .finish()
    }
}
