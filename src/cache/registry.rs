//! Cache Registry Module
//!
//! The fixed set of named cache tables, built once at startup and shared by
//! reference with the service layer.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::{CacheStats, CacheTable};
use crate::error::CacheError;

// == Cache Name ==
/// Identifies one of the four cache tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheName {
    /// Single bookmark lookups keyed by id
    ById,
    /// Unfiltered first page listings
    FirstPage,
    /// Keyword search pages
    Search,
    /// Tag listing pages
    ByTag,
}

impl CacheName {
    /// Every table, in registry order.
    pub const ALL: [CacheName; 4] = [
        CacheName::ById,
        CacheName::FirstPage,
        CacheName::Search,
        CacheName::ByTag,
    ];

    /// Tables holding list-shaped results.
    pub const LISTINGS: [CacheName; 3] =
        [CacheName::FirstPage, CacheName::Search, CacheName::ByTag];

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheName::ById => "by-id",
            CacheName::FirstPage => "first-page",
            CacheName::Search => "search",
            CacheName::ByTag => "by-tag",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CacheName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Table Config ==
/// Capacity and lifetime of one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    pub max_entries: usize,
    pub ttl: Duration,
}

impl TableConfig {
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self { max_entries, ttl }
    }

    /// Built-in sizing for each table.
    pub fn default_for(name: CacheName) -> Self {
        match name {
            CacheName::ById => Self::new(5_000, Duration::from_secs(600)),
            CacheName::FirstPage => Self::new(1_000, Duration::from_secs(60)),
            CacheName::Search => Self::new(1_000, Duration::from_secs(30)),
            CacheName::ByTag => Self::new(1_000, Duration::from_secs(60)),
        }
    }
}

// == Cache Registry ==
/// Owns one [`CacheTable`] per [`CacheName`], each behind its own lock.
#[derive(Debug)]
pub struct CacheRegistry {
    tables: [Mutex<CacheTable>; 4],
}

impl CacheRegistry {
    // == Constructor ==
    /// Builds every table using `configure` to size it.
    pub fn new(configure: impl Fn(CacheName) -> TableConfig) -> Self {
        let tables = CacheName::ALL.map(|name| {
            let config = configure(name);
            debug!(
                cache = %name,
                max_entries = config.max_entries,
                ttl_secs = config.ttl.as_secs_f64(),
                "cache table created"
            );
            Mutex::new(CacheTable::new(config.max_entries, config.ttl))
        });
        Self { tables }
    }

    fn table(&self, name: CacheName) -> &Mutex<CacheTable> {
        &self.tables[name.index()]
    }

    // == Get ==
    pub async fn get(&self, name: CacheName, key: &str) -> Option<String> {
        self.table(name).lock().await.get(key)
    }

    // == Put ==
    pub async fn put(&self, name: CacheName, key: String, value: String) -> Result<(), CacheError> {
        self.table(name).lock().await.put(key, value)
    }

    /// Stores `value` unless the table was invalidated after `generation`
    /// was read. Returns whether it was stored.
    pub async fn put_if_generation(
        &self,
        name: CacheName,
        key: String,
        value: String,
        generation: u64,
    ) -> Result<bool, CacheError> {
        self.table(name)
            .lock()
            .await
            .put_if_generation(key, value, generation)
    }

    /// Invalidation generation of one table.
    pub async fn generation(&self, name: CacheName) -> u64 {
        self.table(name).lock().await.generation()
    }

    // == Evict ==
    /// Removes a single entry. Returns whether it was present.
    pub async fn evict(&self, name: CacheName, key: &str) -> bool {
        self.table(name).lock().await.evict(key)
    }

    // == Clear ==
    /// Empties one table and returns how many entries were dropped.
    pub async fn clear(&self, name: CacheName) -> usize {
        self.table(name).lock().await.clear()
    }

    /// Empties every table.
    pub async fn clear_all(&self) -> Vec<(CacheName, usize)> {
        let mut cleared = Vec::with_capacity(CacheName::ALL.len());
        for name in CacheName::ALL {
            cleared.push((name, self.clear(name).await));
        }
        cleared
    }

    // == Stats ==
    pub async fn stats(&self, name: CacheName) -> CacheStats {
        self.table(name).lock().await.stats()
    }

    pub async fn all_stats(&self) -> Vec<(CacheName, CacheStats)> {
        let mut stats = Vec::with_capacity(CacheName::ALL.len());
        for name in CacheName::ALL {
            stats.push((name, self.stats(name).await));
        }
        stats
    }

    /// Current sizing of a table.
    pub async fn config(&self, name: CacheName) -> TableConfig {
        let table = self.table(name).lock().await;
        TableConfig::new(table.max_entries(), table.ttl())
    }

    // == Purge Expired ==
    /// Drops expired entries from every table; returns the total removed.
    pub async fn purge_expired(&self) -> usize {
        let mut removed = 0;
        for name in CacheName::ALL {
            removed += self.table(name).lock().await.purge_expired();
        }
        removed
    }
}

impl Default for CacheRegistry {
    fn default() -> Self {
        Self::new(TableConfig::default_for)
    }
}
