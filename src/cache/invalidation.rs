//! Write-triggered invalidation.
//!
//! Any write can change which bookmarks match any listing, so the listing
//! tables are cleared wholesale. The by-id table is narrow enough to evict
//! precisely.

use std::sync::Arc;

use tracing::debug;

use crate::cache::keys::by_id_key;
use crate::cache::{CacheName, CacheRegistry};

// == Write Event ==
/// A completed write against the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteEvent {
    Created,
    Updated(u64),
    Deleted(u64),
    TagsAdded(u64),
    TagRemoved(u64),
}

impl WriteEvent {
    fn label(&self) -> &'static str {
        match self {
            WriteEvent::Created => "created",
            WriteEvent::Updated(_) => "updated",
            WriteEvent::Deleted(_) => "deleted",
            WriteEvent::TagsAdded(_) => "tags-added",
            WriteEvent::TagRemoved(_) => "tag-removed",
        }
    }

    /// What this write invalidates.
    pub fn plan(&self) -> InvalidationPlan {
        let evict_by_id = match *self {
            WriteEvent::Created => None,
            WriteEvent::Updated(id)
            | WriteEvent::Deleted(id)
            | WriteEvent::TagsAdded(id)
            | WriteEvent::TagRemoved(id) => Some(id),
        };

        InvalidationPlan {
            evict_by_id,
            clear: CacheName::LISTINGS.to_vec(),
        }
    }
}

// == Invalidation Plan ==
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidationPlan {
    /// Bookmark whose by-id entry is evicted
    pub evict_by_id: Option<u64>,
    /// Tables emptied entirely
    pub clear: Vec<CacheName>,
}

// == Invalidator ==
/// Applies invalidation plans against the registry.
///
/// Must be awaited before the write returns to its caller so a read issued
/// afterwards cannot observe a pre-write entry.
#[derive(Debug, Clone)]
pub struct Invalidator {
    registry: Arc<CacheRegistry>,
}

impl Invalidator {
    pub fn new(registry: Arc<CacheRegistry>) -> Self {
        Self { registry }
    }

    pub async fn apply(&self, event: WriteEvent) {
        let plan = event.plan();

        let evicted = match plan.evict_by_id {
            Some(id) => self.registry.evict(CacheName::ById, &by_id_key(id)).await,
            None => false,
        };

        let mut cleared = 0;
        for name in &plan.clear {
            cleared += self.registry.clear(*name).await;
        }

        debug!(
            event = event.label(),
            id = ?plan.evict_by_id,
            evicted,
            cleared,
            "caches invalidated"
        );
    }
}
