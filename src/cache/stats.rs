//! Cache Statistics Module
//!
//! Tracks per-table hits, misses and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Performance counters for one cache table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups that returned a live entry
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Entries dropped to make room (capacity eviction only)
    pub evictions: u64,
    /// Current number of entries in the table
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Request Count ==
    /// Total lookups: hits + misses.
    pub fn request_count(&self) -> u64 {
        self.hits + self.misses
    }

    // == Hit Rate ==
    /// Returns hits / requests, or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        ratio(self.hits, self.request_count())
    }

    // == Miss Rate ==
    /// Returns misses / requests, or 0.0 if no requests have been made.
    pub fn miss_rate(&self) -> f64 {
        ratio(self.misses, self.request_count())
    }

    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Eviction ==
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Update Entry Count ==
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

fn ratio(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}
