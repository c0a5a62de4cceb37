//! Gallery and café record types.
//!
//! Field names are the ones the hosted backend and the local mirror use.
//! Fields the stored shape may omit or null out are resolved to a fixed
//! default when decoding, so consumers never probe for their presence.

use crate::collection::Collection;
use crate::defaults;
use crate::ids::RecordId;
use crate::ValidationError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Decodes `null` and missing values as `T::default()`.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn require(
    collection: Collection,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField { collection, field });
    }
    Ok(())
}

/// A record kind stored as a sequence in one collection.
pub trait Record: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Creation payload (the record without its id).
    type Draft: Clone + fmt::Debug + Serialize + Send + Sync + 'static;
    /// Partial update payload.
    type Patch: Clone + fmt::Debug + Serialize + Send + Sync + 'static;

    const COLLECTION: Collection;

    fn id(&self) -> &RecordId;

    /// Built-in records used when neither the backend nor the mirror has data.
    fn defaults() -> Vec<Self>;

    /// Checks the creation invariants of a draft.
    fn validate(draft: &Self::Draft) -> Result<(), ValidationError>;

    /// Builds the record from a draft and an assigned id.
    fn from_draft(id: RecordId, draft: Self::Draft) -> Self;

    /// Applies the fields set in `patch`.
    fn apply(&mut self, patch: &Self::Patch);
}

// ── Events ───────────────────────────────────────────────────────

/// A scheduled gallery event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: RecordId,
    pub title: String,
    pub date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub time: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub image: String,
    /// Free-form kind such as `exhibition`, `workshop` or `talk`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Only written when set; the events table may not carry the column.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_false")]
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub time: String,
    pub description: String,
    pub image: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
            time: time.into(),
            description: String::new(),
            image: String::new(),
            kind: None,
            featured: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl Record for Event {
    type Draft = EventDraft;
    type Patch = EventPatch;

    const COLLECTION: Collection = Collection::Events;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn defaults() -> Vec<Self> {
        defaults::default_events()
    }

    fn validate(draft: &EventDraft) -> Result<(), ValidationError> {
        require(Self::COLLECTION, "title", &draft.title)?;
        require(Self::COLLECTION, "date", &draft.date)?;
        require(Self::COLLECTION, "time", &draft.time)
    }

    fn from_draft(id: RecordId, draft: EventDraft) -> Self {
        Self {
            id,
            title: draft.title,
            date: draft.date,
            time: draft.time,
            description: draft.description,
            image: draft.image,
            kind: draft.kind,
            featured: draft.featured.unwrap_or_default(),
        }
    }

    fn apply(&mut self, patch: &EventPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(date) = &patch.date {
            self.date = date.clone();
        }
        if let Some(time) = &patch.time {
            self.time = time.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(image) = &patch.image {
            self.image = image.clone();
        }
        if let Some(kind) = &patch.kind {
            self.kind = Some(kind.clone());
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
    }
}

// ── Artworks ─────────────────────────────────────────────────────

/// A piece shown in the gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: RecordId,
    pub title: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub image: String,
    #[serde(default, deserialize_with = "nullable")]
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtworkDraft {
    pub title: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub featured: bool,
}

impl ArtworkDraft {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            medium: None,
            description: String::new(),
            image: String::new(),
            featured: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtworkPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl ArtworkPatch {
    /// Patch that only sets the featured flag.
    #[must_use]
    pub fn featured(featured: bool) -> Self {
        Self {
            featured: Some(featured),
            ..Self::default()
        }
    }
}

impl Record for Artwork {
    type Draft = ArtworkDraft;
    type Patch = ArtworkPatch;

    const COLLECTION: Collection = Collection::Artworks;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn defaults() -> Vec<Self> {
        defaults::default_artworks()
    }

    fn validate(draft: &ArtworkDraft) -> Result<(), ValidationError> {
        require(Self::COLLECTION, "title", &draft.title)?;
        require(Self::COLLECTION, "artist", &draft.artist)
    }

    fn from_draft(id: RecordId, draft: ArtworkDraft) -> Self {
        Self {
            id,
            title: draft.title,
            artist: draft.artist,
            medium: draft.medium,
            description: draft.description,
            image: draft.image,
            featured: draft.featured,
        }
    }

    fn apply(&mut self, patch: &ArtworkPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(artist) = &patch.artist {
            self.artist = artist.clone();
        }
        if let Some(medium) = &patch.medium {
            self.medium = Some(medium.clone());
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(image) = &patch.image {
            self.image = image.clone();
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
    }
}

// ── Café menu ────────────────────────────────────────────────────

/// Menu section of a café item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Drink,
    Food,
    Dessert,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Drink, Category::Food, Category::Dessert];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Drink => "drink",
            Category::Food => "food",
            Category::Dessert => "dessert",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An item on the café menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CafeItem {
    pub id: RecordId,
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    pub price: f64,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CafeItemDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CafeItemDraft {
    pub fn new(name: impl Into<String>, category: Category, price: f64) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            price,
            category,
            image: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CafeItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Record for CafeItem {
    type Draft = CafeItemDraft;
    type Patch = CafeItemPatch;

    const COLLECTION: Collection = Collection::CafeItems;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn defaults() -> Vec<Self> {
        defaults::default_cafe_items()
    }

    fn validate(draft: &CafeItemDraft) -> Result<(), ValidationError> {
        require(Self::COLLECTION, "name", &draft.name)?;
        // Zero is allowed here; callers decide whether free items make sense.
        if !draft.price.is_finite() || draft.price < 0.0 {
            return Err(ValidationError::InvalidPrice(draft.price));
        }
        Ok(())
    }

    fn from_draft(id: RecordId, draft: CafeItemDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            category: draft.category,
            image: draft.image,
        }
    }

    fn apply(&mut self, patch: &CafeItemPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(image) = &patch.image {
            self.image = Some(image.clone());
        }
    }
}
