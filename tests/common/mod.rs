//! Shared helpers for the service-level cache tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bookmark_cache::cache::{CacheRegistry, TableConfig};
use bookmark_cache::error::Result;
use bookmark_cache::models::{
    BookmarkChanges, BookmarkCreateRequest, BookmarkView, NewBookmark, Page, PageRequest,
};
use bookmark_cache::store::{BookmarkFilter, BookmarkRepository, DetachOutcome, MemoryRepository};
use bookmark_cache::BookmarkService;

/// Repository wrapper that counts backing-store reads.
#[derive(Default)]
pub struct CountingRepository {
    inner: MemoryRepository,
    by_id_reads: AtomicUsize,
    page_reads: AtomicUsize,
}

impl CountingRepository {
    pub fn by_id_reads(&self) -> usize {
        self.by_id_reads.load(Ordering::SeqCst)
    }

    pub fn page_reads(&self) -> usize {
        self.page_reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BookmarkRepository for CountingRepository {
    async fn find_by_id(&self, id: u64) -> Result<Option<BookmarkView>> {
        self.by_id_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(id).await
    }

    async fn find_page(
        &self,
        filter: &BookmarkFilter,
        request: &PageRequest,
    ) -> Result<Page<BookmarkView>> {
        self.page_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.find_page(filter, request).await
    }

    async fn insert(&self, bookmark: NewBookmark) -> Result<BookmarkView> {
        self.inner.insert(bookmark).await
    }

    async fn update(&self, id: u64, changes: BookmarkChanges) -> Result<Option<BookmarkView>> {
        self.inner.update(id, changes).await
    }

    async fn delete_by_id(&self, id: u64) -> Result<bool> {
        self.inner.delete_by_id(id).await
    }

    async fn exists_by_id(&self, id: u64) -> Result<bool> {
        self.inner.exists_by_id(id).await
    }

    async fn attach_tags(&self, id: u64, names: &[String]) -> Result<Option<BookmarkView>> {
        self.inner.attach_tags(id, names).await
    }

    async fn detach_tag(&self, id: u64, name: &str) -> Result<DetachOutcome> {
        self.inner.detach_tag(id, name).await
    }
}

pub fn counting_service() -> BookmarkService<CountingRepository> {
    BookmarkService::new(
        Arc::new(CountingRepository::default()),
        Arc::new(CacheRegistry::default()),
    )
}

/// Every table shares one short TTL.
pub fn short_ttl_service(ttl: Duration) -> BookmarkService<CountingRepository> {
    BookmarkService::new(
        Arc::new(CountingRepository::default()),
        Arc::new(CacheRegistry::new(|_| TableConfig::new(100, ttl))),
    )
}

pub fn create_request(title: &str, url: &str) -> BookmarkCreateRequest {
    BookmarkCreateRequest {
        title: title.to_string(),
        url: url.to_string(),
        memo: None,
    }
}
