//! Cache Module
//!
//! Named in-memory tables with per-table capacity and TTL, the key and
//! eligibility rules for each read, the cache-aside wrapper, and
//! write-triggered invalidation.

mod aside;
mod entry;
mod invalidation;
pub mod keys;
mod lru;
pub mod policy;
mod registry;
mod stats;
mod table;


// Re-export public types
pub use aside::CacheAside;
pub use entry::CacheEntry;
pub use invalidation::{InvalidationPlan, Invalidator, WriteEvent};
pub use lru::LruTracker;
pub use registry::{CacheName, CacheRegistry, TableConfig};
pub use stats::CacheStats;
pub use table::CacheTable;

// == Public Constants ==
/// Longest key a table accepts, in bytes.
pub const MAX_KEY_LENGTH: usize = 1024;
