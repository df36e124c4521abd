//! Cache Table Module
//!
//! One bounded key/value table with a fixed TTL measured from write time
//! and LRU eviction when full.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, CacheStats, LruTracker, MAX_KEY_LENGTH};
use crate::error::CacheError;

// == Cache Table ==
/// A single named cache: serialized values keyed by generated cache keys.
#[derive(Debug)]
pub struct CacheTable {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Lifetime of every entry, counted from its write
    ttl: Duration,
    /// Bumped by every invalidation
    generation: u64,
}

impl CacheTable {
    // == Constructor ==
    /// Creates an empty table with the given capacity and TTL.
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries,
            ttl,
            generation: 0,
        }
    }

    // == Put ==
    /// Stores a value under `key`.
    ///
    /// Overwriting an existing key resets its write time. Inserting a new key
    /// into a full table evicts the least recently used entry first.
    pub fn put(&mut self, key: String, value: String) -> Result<(), CacheError> {
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::KeyTooLong {
                len: key.len(),
                max: MAX_KEY_LENGTH,
            });
        }

        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.max_entries {
            match self.lru.evict_oldest() {
                Some(evicted_key) => {
                    self.entries.remove(&evicted_key);
                    self.stats.record_eviction();
                }
                None => {
                    return Err(CacheError::Full(format!(
                        "table holds at most {} entries",
                        self.max_entries
                    )));
                }
            }
        }

        self.entries.insert(key.clone(), CacheEntry::new(value, self.ttl));
        self.lru.touch(&key);
        self.stats.set_total_entries(self.entries.len());

        Ok(())
    }

    /// Stores a value only if no invalidation happened since `generation`
    /// was read. Returns whether the value was stored.
    ///
    /// A loader that started before a write may finish after the write's
    /// invalidation; its result must not land in the table.
    pub fn put_if_generation(
        &mut self,
        key: String,
        value: String,
        generation: u64,
    ) -> Result<bool, CacheError> {
        if generation != self.generation {
            return Ok(false);
        }
        self.put(key, value)?;
        Ok(true)
    }

    /// Current invalidation generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // == Get ==
    /// Looks up `key`, recording exactly one hit or one miss.
    ///
    /// Expired entries are removed on sight and count as misses.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let now = Instant::now();

        let (value, expired) = match self.entries.get(key) {
            Some(entry) if entry.is_expired_at(now) => (None, true),
            Some(entry) => (Some(entry.value.clone()), false),
            None => (None, false),
        };

        if expired {
            self.remove_entry(key);
        }

        match value {
            Some(value) => {
                self.lru.touch(key);
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Evict ==
    /// Removes one entry. Returns whether it was present.
    pub fn evict(&mut self, key: &str) -> bool {
        self.generation += 1;
        self.remove_entry(key)
    }

    // == Clear ==
    /// Drops every entry and returns how many were removed.
    ///
    /// Statistics counters are kept.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.generation += 1;
        self.entries.clear();
        self.lru.clear();
        self.stats.set_total_entries(0);
        removed
    }

    // == Purge Expired ==
    /// Removes all expired entries and returns the number removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
        }
        expired_keys.len()
    }

    // == Stats ==
    /// Returns a snapshot of the table's statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove_entry(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.lru.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }
}
