use atelier_remote::{MemoryRemote, RemoteError, RemoteStore};
use atelier_types::{Collection, RecordId};
use serde_json::json;

// ── CRUD ─────────────────────────────────────────────────────────

#[tokio::test]
async fn create_assigns_backend_id() {
    let remote = MemoryRemote::new();
    let row = remote
        .create(Collection::Events, json!({ "title": "Opening", "id": "ignored" }))
        .await
        .unwrap();

    let id = row["id"].as_str().unwrap();
    assert_ne!(id, "ignored");
    assert_eq!(id.len(), 36);
    assert_eq!(remote.rows(Collection::Events).len(), 1);
}

#[tokio::test]
async fn list_returns_seeded_rows() {
    let remote = MemoryRemote::new()
        .with_rows(Collection::Artworks, vec![json!({ "id": "1" }), json!({ "id": "2" })]);
    let rows = remote.list(Collection::Artworks).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(remote.list(Collection::Events).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_merges_fields_and_keeps_id() {
    let remote = MemoryRemote::new().with_rows(
        Collection::Artworks,
        vec![json!({ "id": "a1", "title": "Dunes", "featured": false })],
    );

    let row = remote
        .update(
            Collection::Artworks,
            &RecordId::from("a1"),
            json!({ "featured": true, "id": "hijack" }),
        )
        .await
        .unwrap();
    assert_eq!(row, json!({ "id": "a1", "title": "Dunes", "featured": true }));
}

#[tokio::test]
async fn update_of_missing_row_is_rejected() {
    let remote = MemoryRemote::new();
    let err = remote
        .update(Collection::Events, &RecordId::from("nope"), json!({}))
        .await
        .unwrap_err();
    assert!(err.is_rejected());
}

#[tokio::test]
async fn upsert_inserts_then_replaces() {
    let remote = MemoryRemote::new();
    let id = RecordId::from("main");

    remote
        .upsert(Collection::Hours, &id, json!({ "a": 1 }))
        .await
        .unwrap();
    remote
        .upsert(Collection::Hours, &id, json!({ "b": 2 }))
        .await
        .unwrap();

    assert_eq!(remote.rows(Collection::Hours), vec![json!({ "id": "main", "b": 2 })]);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let remote = MemoryRemote::new().with_rows(Collection::Events, vec![json!({ "id": "e1" })]);
    let id = RecordId::from("e1");

    assert!(remote.delete(Collection::Events, &id).await.unwrap());
    assert!(remote.delete(Collection::Events, &id).await.unwrap());
    assert!(remote.rows(Collection::Events).is_empty());
}

#[tokio::test]
async fn create_rejects_non_object() {
    let remote = MemoryRemote::new();
    let err = remote.create(Collection::Events, json!("x")).await.unwrap_err();
    assert!(matches!(err, RemoteError::Rejected { status: Some(400), .. }));
}

// ── Failure injection ────────────────────────────────────────────

#[tokio::test]
async fn offline_fails_every_collection() {
    let remote = MemoryRemote::new();
    remote.set_offline(true);
    for collection in Collection::ALL {
        assert!(remote.list(collection).await.unwrap_err().is_unavailable());
    }

    remote.set_offline(false);
    assert!(remote.list(Collection::Events).await.is_ok());
}

#[tokio::test]
async fn collection_outage_is_isolated() {
    let remote = MemoryRemote::new();
    remote.fail_collection(Collection::Artworks);

    assert!(remote.list(Collection::Artworks).await.is_err());
    assert!(remote.list(Collection::Events).await.is_ok());

    remote.restore_collection(Collection::Artworks);
    assert!(remote.list(Collection::Artworks).await.is_ok());
}

#[tokio::test]
async fn reject_next_applies_once() {
    let remote = MemoryRemote::new();
    remote.reject_next("title is required");

    let err = remote.create(Collection::Events, json!({})).await.unwrap_err();
    assert!(err.is_rejected());
    assert!(remote.create(Collection::Events, json!({})).await.is_ok());
}

#[tokio::test]
async fn request_count_includes_failures() {
    let remote = MemoryRemote::new();
    remote.set_offline(true);
    let _ = remote.list(Collection::Events).await;
    remote.set_offline(false);
    let _ = remote.list(Collection::Events).await;
    assert_eq!(remote.request_count(), 2);
}
