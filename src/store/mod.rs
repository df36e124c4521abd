//! Persistence port.
//!
//! The service talks to storage only through [`BookmarkRepository`].
//! [`MemoryRepository`] is the in-process implementation used by the binary
//! and the tests.

mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{BookmarkChanges, BookmarkView, NewBookmark, Page, PageRequest};

pub use memory::MemoryRepository;

// == Bookmark Filter ==
/// Predicate for [`BookmarkRepository::find_page`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkFilter {
    All,
    /// Case-insensitive substring of title or url
    Search(String),
    /// Normalized tag name
    Tag(String),
}

// == Detach Outcome ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetachOutcome {
    /// No tag with that name exists
    UnknownTag,
    /// Tag exists; the link, if any, is gone
    Detached {
        /// A link to the bookmark existed and was removed
        was_attached: bool,
        /// Tag had no bookmarks left and was deleted
        tag_removed: bool,
    },
}

// == Bookmark Repository ==
#[async_trait]
pub trait BookmarkRepository: Send + Sync + 'static {
    async fn find_by_id(&self, id: u64) -> Result<Option<BookmarkView>>;

    async fn find_page(
        &self,
        filter: &BookmarkFilter,
        request: &PageRequest,
    ) -> Result<Page<BookmarkView>>;

    /// Inserts a bookmark and returns it with its new id.
    async fn insert(&self, bookmark: NewBookmark) -> Result<BookmarkView>;

    /// Applies `changes`; `None` when the bookmark does not exist.
    async fn update(&self, id: u64, changes: BookmarkChanges) -> Result<Option<BookmarkView>>;

    /// Deletes a bookmark and its tag links. Returns whether it existed.
    async fn delete_by_id(&self, id: u64) -> Result<bool>;

    async fn exists_by_id(&self, id: u64) -> Result<bool>;

    /// Links normalized tag names to a bookmark, creating missing tags.
    /// `None` when the bookmark does not exist.
    async fn attach_tags(&self, id: u64, names: &[String]) -> Result<Option<BookmarkView>>;

    /// Unlinks a normalized tag name, deleting the tag once unused. A tag
    /// that exists but is not on the bookmark is still checked for use.
    async fn detach_tag(&self, id: u64, name: &str) -> Result<DetachOutcome>;
}
