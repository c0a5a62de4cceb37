//! Reconciliation of remote, mirrored and default Atelier content.
//!
//! [`SiteData`] is the single owner of the site's in-memory content. It loads
//! each collection from the remote store, falling back to the local mirror
//! and then to built-in defaults, and writes every mutation through to the
//! remote store while keeping the mirror current.
//!
//! # Example
//!
//! ```
//! use atelier_mirror::Mirror;
//! use atelier_remote::MemoryRemote;
//! use atelier_sync::{SiteData, SiteDataConfig};
//! use std::sync::Arc;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let site = SiteData::new(
//!     Arc::new(MemoryRemote::new()),
//!     Mirror::detached(),
//!     SiteDataConfig::default(),
//! );
//! site.load().await;
//! assert!(!site.is_loading().await);
//! # });
//! ```

mod config;
mod error;
mod migrate;
mod site;
mod state;

pub use config::{FallbackPolicy, SiteDataConfig};
pub use error::{SyncError, SyncResult};
pub use migrate::{
    initialize_remote, migrate_mirror_to_remote, CollectionMigration, MigrationReport,
};
pub use site::SiteData;
pub use state::{
    CollectionStatus, DataSource, LoadState, SiteSnapshot, SiteStatus, SnapshotRecord, SyncStatus,
    Write,
};
