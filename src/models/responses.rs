//! Response DTOs for the bookmark API
//!
//! Defines the structure of outgoing HTTP response bodies. `BookmarkResponse`
//! and `Page<BookmarkResponse>` are also what the cache tables hold, so they
//! round-trip through serde unchanged.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::{CacheName, CacheStats};
use crate::models::BookmarkView;

/// A bookmark as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkResponse {
    pub id: u64,
    pub title: String,
    pub url: String,
    pub memo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Tag names, sorted
    pub tags: Vec<String>,
}

impl From<BookmarkView> for BookmarkResponse {
    fn from(view: BookmarkView) -> Self {
        let BookmarkView { bookmark, tags } = view;
        Self {
            id: bookmark.id,
            title: bookmark.title,
            url: bookmark.url,
            memo: bookmark.memo,
            created_at: bookmark.created_at,
            updated_at: bookmark.updated_at,
            tags,
        }
    }
}

/// Plain message body, e.g. after a delete.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Statistics of one cache table (GET /admin/cache/stats)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsResponse {
    pub hit_rate: f64,
    pub miss_rate: f64,
    pub request_count: u64,
    pub eviction_count: u64,
    pub hits: u64,
    pub misses: u64,
    pub total_entries: usize,
}

impl From<&CacheStats> for CacheStatsResponse {
    fn from(stats: &CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            miss_rate: stats.miss_rate(),
            request_count: stats.request_count(),
            eviction_count: stats.evictions,
            hits: stats.hits,
            misses: stats.misses,
            total_entries: stats.total_entries,
        }
    }
}

/// Per-table statistics keyed by table name.
pub fn stats_by_table(
    stats: &[(CacheName, CacheStats)],
) -> BTreeMap<&'static str, CacheStatsResponse> {
    stats
        .iter()
        .map(|(name, stats)| (name.as_str(), CacheStatsResponse::from(stats)))
        .collect()
}

/// Per-table status after a clear (POST /admin/cache/clear)
pub fn cleared_by_table(names: &[CacheName]) -> BTreeMap<&'static str, &'static str> {
    names.iter().map(|name| (name.as_str(), "cleared")).collect()
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
    pub status: u16,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, status: u16) -> Self {
        Self {
            error: error.into(),
            status,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
