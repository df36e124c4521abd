//! API Handlers
//!
//! HTTP request handlers for the bookmark and cache admin endpoints.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::cache::CacheRegistry;
use crate::config::Config;
use crate::error::{BookmarkError, Result};
use crate::models::responses::{cleared_by_table, stats_by_table};
use crate::models::{
    BookmarkCreateRequest, BookmarkResponse, BookmarkUpdateRequest, CacheStatsResponse,
    HealthResponse, ListingQuery, MessageResponse, Page, TagUpsertRequest,
};
use crate::service::BookmarkService;
use crate::store::MemoryRepository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: BookmarkService<MemoryRepository>,
    /// Same registry the service reads through
    pub registry: Arc<CacheRegistry>,
}

impl AppState {
    pub fn new(repository: Arc<MemoryRepository>, registry: Arc<CacheRegistry>) -> Self {
        Self {
            service: BookmarkService::new(repository, Arc::clone(&registry)),
            registry,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Sizes every cache table from the Config and starts with an empty store.
    pub fn from_config(config: &Config) -> Self {
        let registry = CacheRegistry::new(|name| config.table_config(name));
        Self::new(Arc::new(MemoryRepository::new()), Arc::new(registry))
    }
}

fn listing_query(pairs: Vec<(String, String)>) -> Result<ListingQuery> {
    ListingQuery::from_pairs(pairs).map_err(BookmarkError::InvalidRequest)
}

/// Handler for POST /bookmarks
pub async fn create_bookmark_handler(
    State(state): State<AppState>,
    Json(req): Json<BookmarkCreateRequest>,
) -> Result<(StatusCode, Json<BookmarkResponse>)> {
    let created = state.service.create_bookmark(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for GET /bookmarks
///
/// `search` switches from the plain listing to a keyword search.
pub async fn list_bookmarks_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Page<BookmarkResponse>>> {
    let query = listing_query(pairs)?;
    let page = state
        .service
        .get_bookmarks(query.search.as_deref(), &query.page)
        .await?;
    Ok(Json(page))
}

/// Handler for GET /bookmarks/by-tag
pub async fn bookmarks_by_tag_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Page<BookmarkResponse>>> {
    let query = listing_query(pairs)?;
    let name = query
        .name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| BookmarkError::InvalidRequest("Tag name is required".to_string()))?;

    let page = state.service.get_bookmarks_by_tag(&name, &query.page).await?;
    Ok(Json(page))
}

/// Handler for GET /bookmarks/:id
pub async fn get_bookmark_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<BookmarkResponse>> {
    Ok(Json(state.service.get_bookmark(id).await?))
}

/// Handler for PUT /bookmarks/:id
pub async fn update_bookmark_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<BookmarkUpdateRequest>,
) -> Result<Json<BookmarkResponse>> {
    Ok(Json(state.service.update_bookmark(id, req).await?))
}

/// Handler for DELETE /bookmarks/:id
pub async fn delete_bookmark_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<MessageResponse>> {
    state.service.delete_bookmark(id).await?;
    Ok(Json(MessageResponse::new(format!("Bookmark {} deleted", id))))
}

/// Handler for POST /bookmarks/:id/tags
pub async fn add_tags_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<TagUpsertRequest>,
) -> Result<Json<BookmarkResponse>> {
    Ok(Json(state.service.add_tags(id, req).await?))
}

/// Handler for DELETE /bookmarks/:id/tags/:tag_name
pub async fn remove_tag_handler(
    State(state): State<AppState>,
    Path((id, tag_name)): Path<(u64, String)>,
) -> Result<Json<BookmarkResponse>> {
    Ok(Json(state.service.remove_tag(id, &tag_name).await?))
}

/// Handler for POST /admin/cache/clear
pub async fn clear_cache_handler(
    State(state): State<AppState>,
) -> Json<BTreeMap<&'static str, &'static str>> {
    let cleared = state.service.clear_caches().await;
    Json(cleared_by_table(&cleared))
}

/// Handler for GET /admin/cache/stats
pub async fn cache_stats_handler(
    State(state): State<AppState>,
) -> Json<BTreeMap<&'static str, CacheStatsResponse>> {
    let stats = state.service.cache_stats().await;
    Json(stats_by_table(&stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
