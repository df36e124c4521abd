//! Cache-aside read path.
//!
//! Wraps a loader (the backing-store call) as:
//! condition -> key -> lookup -> (hit: decode) | (miss: load, encode, store).
//!
//! Cache trouble never reaches the caller: a failed decode, encode or store is
//! logged and the loader's result is returned as is. Loader errors pass
//! through untouched and are never cached.

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::cache::{CacheName, CacheRegistry};
use crate::error::CacheError;

// == Cache Aside ==
#[derive(Debug, Clone)]
pub struct CacheAside {
    registry: Arc<CacheRegistry>,
}

impl CacheAside {
    pub fn new(registry: Arc<CacheRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<CacheRegistry> {
        &self.registry
    }

    // == Cached ==
    /// Runs `loader` behind the `name` table.
    ///
    /// `condition` is evaluated first; when false the loader runs directly and
    /// the table is not touched. `key` is only computed for eligible calls.
    pub async fn cached<T, E, C, K, F, Fut>(
        &self,
        name: CacheName,
        condition: C,
        key: K,
        loader: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        C: FnOnce() -> bool,
        K: FnOnce() -> String,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if !condition() {
            trace!(cache = %name, "not cacheable, bypassing");
            return loader().await;
        }

        let key = key();

        if let Some(raw) = self.registry.get(name, &key).await {
            match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    debug!(cache = %name, key = %key, "cache hit");
                    return Ok(value);
                }
                Err(e) => {
                    warn!(
                        cache = %name,
                        key = %key,
                        error = %e,
                        "discarding undecodable cache entry"
                    );
                    self.registry.evict(name, &key).await;
                }
            }
        } else {
            debug!(cache = %name, key = %key, "cache miss");
        }

        // Read before loading so a write landing mid-load voids the fill
        let generation = self.registry.generation(name).await;
        let value = loader().await?;

        match self.store(name, key, &value, generation).await {
            Ok(true) => {}
            Ok(false) => debug!(cache = %name, "invalidated during load, not stored"),
            Err(e) => warn!(cache = %name, error = %e, "cache store failed, serving uncached"),
        }

        Ok(value)
    }

    async fn store<T: Serialize>(
        &self,
        name: CacheName,
        key: String,
        value: &T,
        generation: u64,
    ) -> Result<bool, CacheError> {
        let raw = serde_json::to_string(value)?;
        self.registry
            .put_if_generation(name, key, raw, generation)
            .await
    }
}
