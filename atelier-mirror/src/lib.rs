//! Persistent local mirror of Atelier content.
//!
//! The mirror keeps a full copy of each collection on the local machine so
//! content stays readable and editable while the hosted backend is down.
//!
//! # Architecture
//!
//! - [`LocalMirror`] is the raw string key-value contract
//! - [`SqliteMirror`] persists it in one SQLite table
//! - [`DetachedMirror`] stands in where no persistent storage exists
//! - [`Mirror`] adds typed, per-collection JSON access on top

mod error;
mod mirror;
mod store;

pub use error::{MirrorError, MirrorResult};
pub use mirror::Mirror;
pub use store::{DetachedMirror, LocalMirror, SqliteMirror};
