use atelier_mirror::Mirror;
use atelier_remote::MemoryRemote;
use atelier_server::{build_router, StatusResponse};
use atelier_sync::{DataSource, SiteData, SiteDataConfig, SiteSnapshot};
use atelier_types::{defaults, Artwork, CafeItem, Category, Collection, Event, Hours};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

async fn loaded_site(remote: MemoryRemote) -> Arc<SiteData> {
    let site = Arc::new(SiteData::new(
        Arc::new(remote),
        Mirror::detached(),
        SiteDataConfig::default(),
    ));
    site.load().await;
    site
}

/// Spin up the HTTP server on an OS-assigned port, returning the base URL.
async fn spawn_test_server(site: Arc<SiteData>) -> String {
    let app = build_router(site);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

async fn offline_server() -> String {
    let remote = MemoryRemote::new();
    remote.set_offline(true);
    spawn_test_server(loaded_site(remote).await).await
}

// ── Collections ──────────────────────────────────────────────────

#[tokio::test]
async fn site_endpoint_returns_full_snapshot() {
    let base = offline_server().await;
    let resp = reqwest::get(format!("{}/api/v1/site", base)).await.unwrap();

    assert_eq!(resp.status(), 200);
    let body: SiteSnapshot = resp.json().await.unwrap();
    assert_eq!(body, SiteSnapshot::default());
}

#[tokio::test]
async fn events_endpoint_serves_remote_rows() {
    let remote = MemoryRemote::new().with_rows(
        Collection::Events,
        vec![json!({ "id": "e1", "title": "Opening", "date": "2025-05-01", "time": "6:00 PM", "type": "exhibition" })],
    );
    let base = spawn_test_server(loaded_site(remote).await).await;

    let events: Vec<Event> = reqwest::get(format!("{}/api/v1/events", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind.as_deref(), Some("exhibition"));
}

#[tokio::test]
async fn artworks_can_be_filtered_by_featured() {
    let site = loaded_site({
        let remote = MemoryRemote::new();
        remote.set_offline(true);
        remote
    })
    .await;
    site.toggle_artwork_featured(&"1".into(), false).await.unwrap();
    let base = spawn_test_server(site).await;

    let all: Vec<Artwork> = reqwest::get(format!("{}/api/v1/artworks", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let featured: Vec<Artwork> = reqwest::get(format!("{}/api/v1/artworks?featured=true", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(all.len(), 2);
    assert_eq!(featured.len(), 1);
    assert_eq!(featured[0].title, "Urban Life");
}

#[tokio::test]
async fn cafe_items_can_be_filtered_by_category() {
    let base = offline_server().await;

    let drinks: Vec<CafeItem> = reqwest::get(format!("{}/api/v1/cafe-items?category=drink", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(drinks.len(), 1);
    assert_eq!(drinks[0].category, Category::Drink);

    let resp = reqwest::get(format!("{}/api/v1/cafe-items?category=soup", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn hours_endpoint_returns_week() {
    let base = offline_server().await;
    let hours: Hours = reqwest::get(format!("{}/api/v1/hours", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(hours, defaults::default_hours());
}

// ── Status ───────────────────────────────────────────────────────

#[tokio::test]
async fn status_reports_sources() {
    let remote = MemoryRemote::new();
    remote.fail_collection(Collection::Artworks);
    let base = spawn_test_server(loaded_site(remote).await).await;

    let resp = reqwest::get(format!("{}/api/v1/status", base)).await.unwrap();
    let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.contains("application/json"));

    let status: StatusResponse = resp.json().await.unwrap();
    assert_eq!(status.remote, "In-memory");
    assert!(!status.mirror_available);
    assert!(!status.loading);
    assert_eq!(status.collections.events.source, Some(DataSource::Remote));
    assert_eq!(status.collections.artworks.source, Some(DataSource::Defaults));
    assert_eq!(status.collections.hours.source, Some(DataSource::Defaults));
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let base = offline_server().await;
    let resp = reqwest::get(format!("{}/api/v1/nonexistent", base))
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
}
