//! Configuration Module
//!
//! Loads server and cache table settings from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::{CacheName, TableConfig};

/// Reads `name` and parses it, falling back to `default` when unset or invalid.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    pub by_id_max_entries: usize,
    /// Seconds after write
    pub by_id_ttl: u64,
    pub first_page_max_entries: usize,
    pub first_page_ttl: u64,
    pub search_max_entries: usize,
    pub search_ttl: u64,
    pub by_tag_max_entries: usize,
    pub by_tag_ttl: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds, at least 1 (default: 5)
    /// - `CACHE_BY_ID_MAX_ENTRIES` / `CACHE_BY_ID_TTL` (default: 5000 / 600s)
    /// - `CACHE_FIRST_PAGE_MAX_ENTRIES` / `CACHE_FIRST_PAGE_TTL` (default: 1000 / 60s)
    /// - `CACHE_SEARCH_MAX_ENTRIES` / `CACHE_SEARCH_TTL` (default: 1000 / 30s)
    /// - `CACHE_BY_TAG_MAX_ENTRIES` / `CACHE_BY_TAG_TTL` (default: 1000 / 60s)
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", d.server_port),
            cleanup_interval: env_or("CLEANUP_INTERVAL", d.cleanup_interval).max(1),
            by_id_max_entries: env_or("CACHE_BY_ID_MAX_ENTRIES", d.by_id_max_entries),
            by_id_ttl: env_or("CACHE_BY_ID_TTL", d.by_id_ttl),
            first_page_max_entries: env_or(
                "CACHE_FIRST_PAGE_MAX_ENTRIES",
                d.first_page_max_entries,
            ),
            first_page_ttl: env_or("CACHE_FIRST_PAGE_TTL", d.first_page_ttl),
            search_max_entries: env_or("CACHE_SEARCH_MAX_ENTRIES", d.search_max_entries),
            search_ttl: env_or("CACHE_SEARCH_TTL", d.search_ttl),
            by_tag_max_entries: env_or("CACHE_BY_TAG_MAX_ENTRIES", d.by_tag_max_entries),
            by_tag_ttl: env_or("CACHE_BY_TAG_TTL", d.by_tag_ttl),
        }
    }

    /// Size and TTL of one cache table.
    pub fn table_config(&self, name: CacheName) -> TableConfig {
        let (max_entries, ttl_secs) = match name {
            CacheName::ById => (self.by_id_max_entries, self.by_id_ttl),
            CacheName::FirstPage => (self.first_page_max_entries, self.first_page_ttl),
            CacheName::Search => (self.search_max_entries, self.search_ttl),
            CacheName::ByTag => (self.by_tag_max_entries, self.by_tag_ttl),
        };
        TableConfig::new(max_entries, Duration::from_secs(ttl_secs))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cleanup_interval: 5,
            by_id_max_entries: 5000,
            by_id_ttl: 600,
            first_page_max_entries: 1000,
            first_page_ttl: 60,
            search_max_entries: 1000,
            search_ttl: 30,
            by_tag_max_entries: 1000,
            by_tag_ttl: 60,
        }
    }
}
