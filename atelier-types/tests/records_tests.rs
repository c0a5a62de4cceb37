use atelier_types::defaults::{default_artworks, default_cafe_items, default_events};
use atelier_types::{
    Artwork, ArtworkDraft, ArtworkPatch, CafeItem, CafeItemDraft, CafeItemPatch, Category,
    Collection, Event, EventDraft, EventPatch, Record, RecordId, ValidationError,
};
use pretty_assertions::assert_eq;
use serde_json::json;

// ── Decoding backend rows ────────────────────────────────────────

#[test]
fn event_row_resolves_optional_fields() {
    let row = json!({
        "id": "a1",
        "title": "Opening",
        "date": "2025-06-01",
        "time": null,
        "description": null,
        "created_at": "2025-01-01T00:00:00Z"
    });
    let event: Event = serde_json::from_value(row).unwrap();
    assert_eq!(event.time, "");
    assert_eq!(event.description, "");
    assert_eq!(event.image, "");
    assert_eq!(event.kind, None);
    assert!(!event.featured);
}

#[test]
fn event_type_field_maps_to_kind() {
    let row = json!({
        "id": "a1", "title": "Talk", "date": "2025-06-22", "time": "18:00",
        "description": "", "image": "", "type": "talk", "featured": true
    });
    let event: Event = serde_json::from_value(row).unwrap();
    assert_eq!(event.kind.as_deref(), Some("talk"));
    assert!(event.featured);

    let back = serde_json::to_value(&event).unwrap();
    assert_eq!(back["type"], "talk");
}

#[test]
fn artwork_featured_defaults_to_false() {
    let row = json!({ "id": "7", "title": "Dunes", "artist": "Ali", "featured": null });
    let artwork: Artwork = serde_json::from_value(row).unwrap();
    assert!(!artwork.featured);
    assert_eq!(artwork.medium, None);
}

#[test]
fn artwork_without_title_fails_to_decode() {
    let row = json!({ "id": "7", "artist": "Ali" });
    assert!(serde_json::from_value::<Artwork>(row).is_err());
}

#[test]
fn cafe_item_category_is_lowercase() {
    let row = json!({ "id": "1", "name": "Tea", "price": 5, "category": "drink" });
    let item: CafeItem = serde_json::from_value(row).unwrap();
    assert_eq!(item.category, Category::Drink);
    assert_eq!(item.price, 5.0);
    assert_eq!(item.image, None);
}

#[test]
fn cafe_item_unknown_category_is_rejected() {
    let row = json!({ "id": "1", "name": "Tea", "price": 5, "category": "snack" });
    assert!(serde_json::from_value::<CafeItem>(row).is_err());
}

#[test]
fn draft_serializes_without_id() {
    let draft = CafeItemDraft {
        description: "Hot tea".to_string(),
        ..CafeItemDraft::new("Tea", Category::Drink, 5.0)
    };
    let value = serde_json::to_value(&draft).unwrap();
    assert!(value.get("id").is_none());
    assert_eq!(value["category"], "drink");
    assert!(value.get("image").is_none());
}

// ── Validation ───────────────────────────────────────────────────

#[test]
fn event_draft_requires_title_date_time() {
    let ok = EventDraft::new("Opening", "2025-06-01", "19:00");
    assert!(Event::validate(&ok).is_ok());

    let no_time = EventDraft::new("Opening", "2025-06-01", "  ");
    assert_eq!(
        Event::validate(&no_time),
        Err(ValidationError::MissingField {
            collection: Collection::Events,
            field: "time"
        })
    );
}

#[test]
fn artwork_draft_requires_artist() {
    let draft = ArtworkDraft::new("Dunes", "");
    assert!(matches!(
        Artwork::validate(&draft),
        Err(ValidationError::MissingField { field: "artist", .. })
    ));
}

#[test]
fn cafe_draft_rejects_negative_and_nan_price() {
    assert!(CafeItem::validate(&CafeItemDraft::new("Tea", Category::Drink, 0.0)).is_ok());
    assert_eq!(
        CafeItem::validate(&CafeItemDraft::new("Tea", Category::Drink, -1.0)),
        Err(ValidationError::InvalidPrice(-1.0))
    );
    assert!(CafeItem::validate(&CafeItemDraft::new("Tea", Category::Drink, f64::NAN)).is_err());
}

#[test]
fn validation_error_messages() {
    let err = ValidationError::MissingField {
        collection: Collection::CafeItems,
        field: "name",
    };
    assert_eq!(err.to_string(), "cafe_items: `name` must not be empty");
}

// ── Drafts and patches ───────────────────────────────────────────

#[test]
fn from_draft_keeps_fields_and_assigns_id() {
    let draft = ArtworkDraft {
        medium: Some("Oil".to_string()),
        featured: true,
        ..ArtworkDraft::new("Dunes", "Ali")
    };
    let artwork = Artwork::from_draft(RecordId::from("9"), draft);
    assert_eq!(artwork.id, RecordId::from("9"));
    assert_eq!(artwork.title, "Dunes");
    assert_eq!(artwork.medium.as_deref(), Some("Oil"));
    assert!(artwork.featured);
}

#[test]
fn event_draft_payload_omits_unset_optional_fields() {
    let payload = serde_json::to_value(EventDraft::new("Talk", "2025-06-01", "7:00 PM")).unwrap();
    assert_eq!(
        payload,
        json!({
            "title": "Talk",
            "date": "2025-06-01",
            "time": "7:00 PM",
            "description": "",
            "image": ""
        })
    );

    let featured = EventDraft {
        featured: Some(true),
        ..EventDraft::new("Talk", "2025-06-01", "7:00 PM")
    };
    assert_eq!(serde_json::to_value(&featured).unwrap()["featured"], true);
    assert!(Event::from_draft(RecordId::from("1"), featured).featured);
}

#[test]
fn unfeatured_event_is_written_without_flag() {
    let event = Event::from_draft(
        RecordId::from("1"),
        EventDraft::new("Talk", "2025-06-01", "7:00 PM"),
    );
    assert!(!event.featured);
    let value = serde_json::to_value(&event).unwrap();
    assert!(value.get("featured").is_none());
    assert_eq!(serde_json::from_value::<Event>(value).unwrap(), event);
}

#[test]
fn patch_only_touches_set_fields() {
    let mut event = default_events().remove(0);
    let before = event.clone();
    event.apply(&EventPatch {
        title: Some("Renamed".to_string()),
        ..Default::default()
    });
    assert_eq!(event.title, "Renamed");
    assert_eq!(event.date, before.date);
    assert_eq!(event.description, before.description);
}

#[test]
fn empty_patch_serializes_to_empty_object() {
    assert_eq!(serde_json::to_value(EventPatch::default()).unwrap(), json!({}));
    assert_eq!(
        serde_json::to_value(ArtworkPatch::featured(false)).unwrap(),
        json!({ "featured": false })
    );
}

#[test]
fn cafe_patch_changes_price_and_category() {
    let mut item = default_cafe_items().remove(0);
    item.apply(&CafeItemPatch {
        price: Some(18.5),
        category: Some(Category::Dessert),
        ..Default::default()
    });
    assert_eq!(item.price, 18.5);
    assert_eq!(item.category, Category::Dessert);
}

// ── Defaults ─────────────────────────────────────────────────────

#[test]
fn default_artworks_are_two_featured() {
    let artworks = default_artworks();
    assert_eq!(artworks.len(), 2);
    assert!(artworks.iter().all(|a| a.featured));
    assert_eq!(Artwork::defaults(), artworks);
}

#[test]
fn defaults_have_unique_local_ids() {
    let events = default_events();
    assert_eq!(events.len(), 2);
    assert_ne!(events[0].id, events[1].id);
    assert!(events.iter().all(|e| e.id.as_local_number().is_some()));

    let items = default_cafe_items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].category, Category::Drink);
    assert_eq!(items[1].category, Category::Food);
}

#[test]
fn record_collections() {
    assert_eq!(Event::COLLECTION, Collection::Events);
    assert_eq!(Artwork::COLLECTION, Collection::Artworks);
    assert_eq!(CafeItem::COLLECTION, Collection::CafeItems);
}
