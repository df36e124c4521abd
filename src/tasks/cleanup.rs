//! TTL Cleanup Task
//!
//! Background task that periodically drops expired cache entries. Lookups
//! already ignore expired entries; this only returns their memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheRegistry;

/// Spawns a background task that purges expired entries from every table.
///
/// The task sleeps `cleanup_interval_secs` between runs and locks one table at
/// a time. Abort the returned handle during graceful shutdown.
///
/// # Example
/// ```ignore
/// let registry = Arc::new(CacheRegistry::default());
/// let cleanup_handle = spawn_cleanup_task(registry.clone(), 5);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(
    registry: Arc<CacheRegistry>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = registry.purge_expired().await;

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}
