//! Bookmark service.
//!
//! Every read goes through [`CacheAside`] with its table's policy and key.
//! Every successful write is followed by its invalidation before returning.

use std::sync::Arc;

use tracing::info;

use crate::cache::keys::{by_id_key, page_key, search_key, tag_key};
use crate::cache::policy::{
    by_id_cacheable, first_page_cacheable, has_text, search_cacheable, tag_cacheable,
};
use crate::cache::{CacheAside, CacheName, CacheRegistry, CacheStats, Invalidator, WriteEvent};
use crate::error::{BookmarkError, Result};
use crate::models::{
    normalize_tag, BookmarkCreateRequest, BookmarkResponse, BookmarkUpdateRequest, Page,
    PageRequest, TagUpsertRequest,
};
use crate::store::{BookmarkFilter, BookmarkRepository, DetachOutcome};

// == Bookmark Service ==
pub struct BookmarkService<R> {
    repository: Arc<R>,
    cache: CacheAside,
    invalidator: Invalidator,
}

impl<R> Clone for BookmarkService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            cache: self.cache.clone(),
            invalidator: self.invalidator.clone(),
        }
    }
}

impl<R: BookmarkRepository> BookmarkService<R> {
    pub fn new(repository: Arc<R>, registry: Arc<CacheRegistry>) -> Self {
        Self {
            repository,
            cache: CacheAside::new(Arc::clone(&registry)),
            invalidator: Invalidator::new(registry),
        }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    pub fn registry(&self) -> &Arc<CacheRegistry> {
        self.cache.registry()
    }

    // == Reads ==
    pub async fn get_bookmark(&self, id: u64) -> Result<BookmarkResponse> {
        self.cache
            .cached(CacheName::ById, by_id_cacheable, || by_id_key(id), || async {
                self.repository
                    .find_by_id(id)
                    .await?
                    .map(BookmarkResponse::from)
                    .ok_or(BookmarkError::NotFound(id))
            })
            .await
    }

    /// Lists bookmarks, filtered by `search` when it has text.
    pub async fn get_bookmarks(
        &self,
        search: Option<&str>,
        request: &PageRequest,
    ) -> Result<Page<BookmarkResponse>> {
        match search {
            Some(term) if has_text(Some(term)) => {
                self.cache
                    .cached(
                        CacheName::Search,
                        || search_cacheable(Some(term), request.page),
                        || search_key(term, request),
                        || self.load_page(BookmarkFilter::Search(term.to_string()), request),
                    )
                    .await
            }
            _ => {
                self.cache
                    .cached(
                        CacheName::FirstPage,
                        || first_page_cacheable(search, request.page),
                        || page_key(request),
                        || self.load_page(BookmarkFilter::All, request),
                    )
                    .await
            }
        }
    }

    /// Lists bookmarks carrying `name`. The key uses the name as supplied; the
    /// query uses its normalized form.
    pub async fn get_bookmarks_by_tag(
        &self,
        name: &str,
        request: &PageRequest,
    ) -> Result<Page<BookmarkResponse>> {
        self.cache
            .cached(
                CacheName::ByTag,
                || tag_cacheable(request.page),
                || tag_key(name, request),
                || self.load_page(BookmarkFilter::Tag(normalize_tag(name)), request),
            )
            .await
    }

    async fn load_page(
        &self,
        filter: BookmarkFilter,
        request: &PageRequest,
    ) -> Result<Page<BookmarkResponse>> {
        let page = self.repository.find_page(&filter, request).await?;
        Ok(page.map(BookmarkResponse::from))
    }

    // == Writes ==
    pub async fn create_bookmark(
        &self,
        request: BookmarkCreateRequest,
    ) -> Result<BookmarkResponse> {
        if let Some(msg) = request.validate() {
            return Err(BookmarkError::InvalidRequest(msg));
        }

        let view = self.repository.insert(request.into_new_bookmark()).await?;
        self.invalidator.apply(WriteEvent::Created).await;

        info!(id = view.bookmark.id, "bookmark created");
        Ok(view.into())
    }

    /// Partial update; absent fields keep their value.
    pub async fn update_bookmark(
        &self,
        id: u64,
        request: BookmarkUpdateRequest,
    ) -> Result<BookmarkResponse> {
        if let Some(msg) = request.validate() {
            return Err(BookmarkError::InvalidRequest(msg));
        }

        let view = self
            .repository
            .update(id, request.into_changes())
            .await?
            .ok_or(BookmarkError::NotFound(id))?;
        self.invalidator.apply(WriteEvent::Updated(id)).await;

        info!(id, "bookmark updated");
        Ok(view.into())
    }

    pub async fn delete_bookmark(&self, id: u64) -> Result<()> {
        if !self.repository.exists_by_id(id).await? {
            return Err(BookmarkError::NotFound(id));
        }
        if !self.repository.delete_by_id(id).await? {
            return Err(BookmarkError::NotFound(id));
        }
        self.invalidator.apply(WriteEvent::Deleted(id)).await;

        info!(id, "bookmark deleted");
        Ok(())
    }

    /// Attaches tags by normalized name. Blank names are skipped and tags
    /// already on the bookmark are left as they are.
    pub async fn add_tags(&self, id: u64, request: TagUpsertRequest) -> Result<BookmarkResponse> {
        if let Some(msg) = request.validate() {
            return Err(BookmarkError::InvalidRequest(msg));
        }

        let mut names: Vec<String> = request
            .names
            .iter()
            .map(|name| normalize_tag(name))
            .filter(|name| !name.is_empty())
            .collect();
        names.sort();
        names.dedup();

        let view = self
            .repository
            .attach_tags(id, &names)
            .await?
            .ok_or(BookmarkError::NotFound(id))?;
        self.invalidator.apply(WriteEvent::TagsAdded(id)).await;

        info!(id, tags = ?names, "tags added");
        Ok(view.into())
    }

    /// Detaches a tag and deletes it once no bookmark uses it. Only a tag
    /// that does not exist at all is an error.
    pub async fn remove_tag(&self, id: u64, tag_name: &str) -> Result<BookmarkResponse> {
        if !self.repository.exists_by_id(id).await? {
            return Err(BookmarkError::NotFound(id));
        }

        let name = normalize_tag(tag_name);
        match self.repository.detach_tag(id, &name).await? {
            DetachOutcome::UnknownTag => return Err(BookmarkError::TagNotFound(name)),
            DetachOutcome::Detached {
                was_attached,
                tag_removed,
            } => {
                info!(id, tag = %name, was_attached, tag_removed, "tag removed");
            }
        }
        self.invalidator.apply(WriteEvent::TagRemoved(id)).await;

        self.repository
            .find_by_id(id)
            .await?
            .map(BookmarkResponse::from)
            .ok_or(BookmarkError::NotFound(id))
    }

    // == Admin ==
    /// Empties every table and returns the names cleared.
    pub async fn clear_caches(&self) -> Vec<CacheName> {
        let cleared = self.registry().clear_all().await;
        let total: usize = cleared.iter().map(|(_, n)| n).sum();
        info!(entries = total, "all caches cleared");
        cleared.into_iter().map(|(name, _)| name).collect()
    }

    pub async fn cache_stats(&self) -> Vec<(CacheName, CacheStats)> {
        self.registry().all_stats().await
    }
}
