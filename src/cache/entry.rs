//! Cache Entry Module
//!
//! A single cached value with its write time and expiry.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A serialized value plus the instant it expires at.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value (JSON)
    pub value: String,
    /// Write instant plus the table's TTL
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry written now that lives for `ttl`.
    pub fn new(value: String, ttl: Duration) -> Self {
        Self::written_at(value, Instant::now(), ttl)
    }

    /// Creates an entry with an explicit write instant.
    pub fn written_at(value: String, written: Instant, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: written + ttl,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired at `now`.
    ///
    /// An entry is expired once `now >= expires_at`, so a zero TTL entry is
    /// never served.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
