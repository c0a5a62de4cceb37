//! Raw key-value mirror backends.

use crate::error::{MirrorError, MirrorResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Persistent string key-value store addressed by collection key.
///
/// Operations are synchronous. `write_raw` replaces the whole value stored
/// under a key; it never merges.
pub trait LocalMirror: Send + Sync {
    /// Whether a backing store exists at all.
    fn is_available(&self) -> bool {
        true
    }

    /// Returns the value stored under `key`, if any.
    fn read_raw(&self, key: &str) -> MirrorResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn write_raw(&self, key: &str, value: &str) -> MirrorResult<()>;

    /// Removes `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> MirrorResult<()>;
}

/// Mirror backed by a single-table SQLite database.
pub struct SqliteMirror {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteMirror {
    /// Opens (or creates) a mirror database at the given path.
    pub fn open(path: impl AsRef<Path>) -> MirrorResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        debug!("Opened local mirror at {}", path.display());
        Self::with_connection(conn)
    }

    /// Opens an in-memory mirror (for testing).
    pub fn open_in_memory() -> MirrorResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> MirrorResult<Self> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS mirror (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
            );
            ",
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> MirrorResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| MirrorError::Poisoned)
    }

    /// Returns every stored key, sorted.
    pub fn keys(&self) -> MirrorResult<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT key FROM mirror ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

impl LocalMirror for SqliteMirror {
    fn read_raw(&self, key: &str) -> MirrorResult<Option<String>> {
        let conn = self.conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM mirror WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_raw(&self, key: &str, value: &str) -> MirrorResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO mirror (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now'))",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> MirrorResult<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM mirror WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// Mirror for contexts without persistent storage.
///
/// Reads are always absent and writes succeed without storing anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedMirror;

impl LocalMirror for DetachedMirror {
    fn is_available(&self) -> bool {
        false
    }

    fn read_raw(&self, _key: &str) -> MirrorResult<Option<String>> {
        Ok(None)
    }

    fn write_raw(&self, _key: &str, _value: &str) -> MirrorResult<()> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> MirrorResult<()> {
        Ok(())
    }
}
