//! Remote store client for the Atelier content backend.
//!
//! The remote store is a stateless request executor: each call either returns
//! parsed rows or a [`RemoteError`] that says whether the backend was
//! unreachable or refused the request. Retry and fallback decisions belong to
//! the caller.
//!
//! ## Components
//!
//! - [`RemoteStore`]: the CRUD contract over named collections
//! - [`RestRemote`]: client for the hosted backend's REST API
//! - [`MemoryRemote`]: in-process store with outage simulation

mod error;
mod memory;
mod rest;
mod store;

pub use error::{RemoteError, RemoteResult};
pub use memory::MemoryRemote;
pub use rest::{classify_status, RestConfig, RestRemote, REMOTE_KEY_ENV, REMOTE_URL_ENV};
pub use store::RemoteStore;
