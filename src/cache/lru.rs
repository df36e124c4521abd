//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for capacity eviction.

use std::collections::{BTreeMap, HashMap};

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Every touch stamps the key with a fresh tick. `order` maps tick to key,
/// so the smallest tick is always the least recently used key; `ticks` maps
/// key back to its current tick. Both maps are updated together.
#[derive(Debug, Default)]
pub struct LruTracker {
    /// tick -> key, oldest first
    order: BTreeMap<u64, String>,
    /// key -> tick
    ticks: HashMap<String, u64>,
    /// Next tick to hand out
    clock: u64,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used, inserting it if new.
    pub fn touch(&mut self, key: &str) {
        let tick = self.clock;
        self.clock += 1;

        match self.ticks.get_mut(key) {
            Some(previous) => {
                self.order.remove(previous);
                *previous = tick;
            }
            None => {
                self.ticks.insert(key.to_string(), tick);
            }
        }
        self.order.insert(tick, key.to_string());
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &str) {
        if let Some(tick) = self.ticks.remove(key) {
            self.order.remove(&tick);
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.order.pop_first()?;
        self.ticks.remove(&key);
        Some(key)
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.order.clear();
        self.ticks.clear();
    }
}
