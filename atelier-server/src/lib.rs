//! HTTP content API for the Atelier site.
//!
//! Serves the current [`SiteData`] snapshot read-only under `/api/v1`.

use atelier_sync::{SiteData, SiteSnapshot, SiteStatus};
use atelier_types::{Artwork, CafeItem, Category, Event, Hours};
use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StatusResponse {
    /// Name of the remote store in use.
    pub remote: String,
    pub mirror_available: bool,
    pub loading: bool,
    pub collections: SiteStatus,
}

#[derive(Deserialize, Debug, Default)]
pub struct ArtworkFilter {
    pub featured: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
pub struct CafeItemFilter {
    pub category: Option<Category>,
}

async fn site_handler(State(site): State<Arc<SiteData>>) -> Json<SiteSnapshot> {
    Json(site.snapshot().await)
}

async fn events_handler(State(site): State<Arc<SiteData>>) -> Json<Vec<Event>> {
    Json(site.events().await)
}

async fn artworks_handler(
    State(site): State<Arc<SiteData>>,
    Query(filter): Query<ArtworkFilter>,
) -> Json<Vec<Artwork>> {
    let artworks = match filter.featured {
        Some(true) => site.featured_artworks().await,
        Some(false) => site
            .artworks()
            .await
            .into_iter()
            .filter(|a| !a.featured)
            .collect(),
        None => site.artworks().await,
    };
    Json(artworks)
}

async fn cafe_items_handler(
    State(site): State<Arc<SiteData>>,
    Query(filter): Query<CafeItemFilter>,
) -> Json<Vec<CafeItem>> {
    let items = match filter.category {
        Some(category) => site.cafe_items_in(category).await,
        None => site.cafe_items().await,
    };
    Json(items)
}

async fn hours_handler(State(site): State<Arc<SiteData>>) -> Json<Hours> {
    Json(site.opening_hours().await)
}

async fn status_handler(State(site): State<Arc<SiteData>>) -> Json<StatusResponse> {
    let collections = site.status().await;
    Json(StatusResponse {
        remote: site.remote().provider_name().to_string(),
        mirror_available: site.mirror().is_available(),
        loading: collections.is_loading(),
        collections,
    })
}

/// Build the content API router over the given site data.
pub fn build_router(site: Arc<SiteData>) -> Router {
    Router::new()
        .route("/api/v1/site", get(site_handler))
        .route("/api/v1/events", get(events_handler))
        .route("/api/v1/artworks", get(artworks_handler))
        .route("/api/v1/cafe-items", get(cafe_items_handler))
        .route("/api/v1/hours", get(hours_handler))
        .route("/api/v1/status", get(status_handler))
        .with_state(site)
}
