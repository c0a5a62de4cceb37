//! Record types for the Atelier gallery and café.
//!
//! This crate defines the content shared by every layer of the sync stack:
//! - Record identifiers and the local id generator
//! - The four collections and their remote/local addressing
//! - Events, artworks, café items (with creation drafts and partial patches)
//! - Weekly opening hours
//! - Built-in default content

mod collection;
pub mod defaults;
mod hours;
mod ids;
mod records;

pub use collection::Collection;
pub use hours::{DayHours, Hours, Weekday};
pub use ids::{RecordId, HOURS_ROW_ID};
pub use records::{
    Artwork, ArtworkDraft, ArtworkPatch, CafeItem, CafeItemDraft, CafeItemPatch, Category, Event,
    EventDraft, EventPatch, Record,
};

/// Result type alias for draft validation.
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// A creation payload that breaks a record invariant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{collection}: `{field}` must not be empty")]
    MissingField {
        collection: Collection,
        field: &'static str,
    },

    #[error("price must be a finite, non-negative number, got {0}")]
    InvalidPrice(f64),
}
