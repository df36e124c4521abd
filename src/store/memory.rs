//! In-memory repository.
//!
//! Bookmarks, tags and their join records live in separate maps. Join
//! records are owned by the `links` arena; `tags_of` and `bookmarks_of` are
//! forward and backward indexes into it and are always updated together.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::Result;
use crate::models::{
    normalize_tag, Bookmark, BookmarkChanges, BookmarkTag, BookmarkView, Direction, NewBookmark,
    Order, Page, PageRequest, Tag,
};
use crate::store::{BookmarkFilter, BookmarkRepository, DetachOutcome};

#[derive(Debug, Default)]
struct Tables {
    next_bookmark_id: u64,
    next_tag_id: u64,
    next_link_id: u64,
    /// Keyed by id, so iteration is insertion order
    bookmarks: BTreeMap<u64, Bookmark>,
    tags: HashMap<u64, Tag>,
    tag_ids_by_name: HashMap<String, u64>,
    /// Join record arena
    links: HashMap<u64, BookmarkTag>,
    /// bookmark id -> (tag id -> link id)
    tags_of: HashMap<u64, BTreeMap<u64, u64>>,
    /// tag id -> (bookmark id -> link id)
    bookmarks_of: HashMap<u64, BTreeMap<u64, u64>>,
}

impl Tables {
    fn view(&self, bookmark: &Bookmark) -> BookmarkView {
        let mut tags: Vec<String> = self
            .tags_of
            .get(&bookmark.id)
            .into_iter()
            .flat_map(|links| links.keys())
            .filter_map(|tag_id| self.tags.get(tag_id))
            .map(|tag| tag.name.clone())
            .collect();
        tags.sort();

        BookmarkView {
            bookmark: bookmark.clone(),
            tags,
        }
    }

    fn view_by_id(&self, id: u64) -> Option<BookmarkView> {
        self.bookmarks.get(&id).map(|b| self.view(b))
    }

    fn matches(&self, bookmark: &Bookmark, filter: &Filter) -> bool {
        match filter {
            Filter::All => true,
            Filter::Search(needle) => {
                bookmark.title.to_lowercase().contains(needle)
                    || bookmark.url.to_lowercase().contains(needle)
            }
            Filter::Tag(None) => false,
            Filter::Tag(Some(tag_id)) => self
                .tags_of
                .get(&bookmark.id)
                .is_some_and(|links| links.contains_key(tag_id)),
        }
    }

    fn tag_id_or_create(&mut self, name: &str) -> u64 {
        if let Some(id) = self.tag_ids_by_name.get(name) {
            return *id;
        }
        self.next_tag_id += 1;
        let id = self.next_tag_id;
        self.tags.insert(
            id,
            Tag {
                id,
                name: name.to_string(),
                created_at: Utc::now(),
            },
        );
        self.tag_ids_by_name.insert(name.to_string(), id);
        id
    }

    fn link(&mut self, bookmark_id: u64, tag_id: u64) {
        let already = self
            .tags_of
            .get(&bookmark_id)
            .is_some_and(|links| links.contains_key(&tag_id));
        if already {
            return;
        }

        self.next_link_id += 1;
        let link_id = self.next_link_id;
        self.links.insert(
            link_id,
            BookmarkTag {
                id: link_id,
                bookmark_id,
                tag_id,
                created_at: Utc::now(),
            },
        );
        self.tags_of.entry(bookmark_id).or_default().insert(tag_id, link_id);
        self.bookmarks_of.entry(tag_id).or_default().insert(bookmark_id, link_id);
    }

    /// Removes one link from the arena and both indexes.
    fn unlink(&mut self, bookmark_id: u64, tag_id: u64) -> bool {
        let Some(link_id) = self
            .tags_of
            .get_mut(&bookmark_id)
            .and_then(|links| links.remove(&tag_id))
        else {
            return false;
        };

        self.links.remove(&link_id);
        if self.tags_of.get(&bookmark_id).is_some_and(BTreeMap::is_empty) {
            self.tags_of.remove(&bookmark_id);
        }
        if let Some(bookmarks) = self.bookmarks_of.get_mut(&tag_id) {
            bookmarks.remove(&bookmark_id);
            if bookmarks.is_empty() {
                self.bookmarks_of.remove(&tag_id);
            }
        }
        true
    }

    fn remove_tag(&mut self, tag_id: u64) {
        if let Some(tag) = self.tags.remove(&tag_id) {
            self.tag_ids_by_name.remove(&tag.name);
        }
        self.bookmarks_of.remove(&tag_id);
    }
}

/// Filter with the search needle lowercased and the tag resolved to an id.
enum Filter {
    All,
    Search(String),
    Tag(Option<u64>),
}

fn compare(a: &Bookmark, b: &Bookmark, orders: &[Order]) -> Ordering {
    for order in orders {
        let ordering = match order.property.as_str() {
            "id" => a.id.cmp(&b.id),
            "title" => a.title.cmp(&b.title),
            "url" => a.url.cmp(&b.url),
            "createdAt" => a.created_at.cmp(&b.created_at),
            "updatedAt" => a.updated_at.cmp(&b.updated_at),
            _ => Ordering::Equal,
        };
        let ordering = match order.direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

// == Memory Repository ==
#[derive(Debug, Default)]
pub struct MemoryRepository {
    tables: RwLock<Tables>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored join records.
    pub async fn link_count(&self) -> usize {
        self.tables.read().await.links.len()
    }

    /// Number of stored tags.
    pub async fn tag_count(&self) -> usize {
        self.tables.read().await.tags.len()
    }
}

#[async_trait]
impl BookmarkRepository for MemoryRepository {
    async fn find_by_id(&self, id: u64) -> Result<Option<BookmarkView>> {
        Ok(self.tables.read().await.view_by_id(id))
    }

    async fn find_page(
        &self,
        filter: &BookmarkFilter,
        request: &PageRequest,
    ) -> Result<Page<BookmarkView>> {
        let tables = self.tables.read().await;

        let filter = match filter {
            BookmarkFilter::All => Filter::All,
            BookmarkFilter::Search(term) => Filter::Search(term.to_lowercase()),
            BookmarkFilter::Tag(name) => {
                Filter::Tag(tables.tag_ids_by_name.get(&normalize_tag(name)).copied())
            }
        };

        let mut matching: Vec<&Bookmark> = tables
            .bookmarks
            .values()
            .filter(|b| tables.matches(b, &filter))
            .collect();
        matching.sort_by(|a, b| compare(a, b, &request.sort.orders));

        let total = matching.len() as u64;
        let content = matching
            .into_iter()
            .skip(request.offset())
            .take(request.size as usize)
            .map(|b| tables.view(b))
            .collect();

        Ok(Page::new(content, request, total))
    }

    async fn insert(&self, new: NewBookmark) -> Result<BookmarkView> {
        let mut tables = self.tables.write().await;
        tables.next_bookmark_id += 1;
        let id = tables.next_bookmark_id;
        let now = Utc::now();

        let bookmark = Bookmark {
            id,
            title: new.title,
            url: new.url,
            memo: new.memo,
            created_at: now,
            updated_at: now,
        };
        let view = tables.view(&bookmark);
        tables.bookmarks.insert(id, bookmark);

        debug!(id, "bookmark inserted");
        Ok(view)
    }

    async fn update(&self, id: u64, changes: BookmarkChanges) -> Result<Option<BookmarkView>> {
        let mut tables = self.tables.write().await;
        let Some(bookmark) = tables.bookmarks.get_mut(&id) else {
            return Ok(None);
        };
        bookmark.apply(changes, Utc::now());
        Ok(tables.view_by_id(id))
    }

    async fn delete_by_id(&self, id: u64) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.bookmarks.remove(&id).is_none() {
            return Ok(false);
        }

        let tag_ids: Vec<u64> = tables
            .tags_of
            .get(&id)
            .map(|links| links.keys().copied().collect())
            .unwrap_or_default();
        for tag_id in tag_ids {
            tables.unlink(id, tag_id);
        }

        debug!(id, "bookmark deleted");
        Ok(true)
    }

    async fn exists_by_id(&self, id: u64) -> Result<bool> {
        Ok(self.tables.read().await.bookmarks.contains_key(&id))
    }

    async fn attach_tags(&self, id: u64, names: &[String]) -> Result<Option<BookmarkView>> {
        let mut tables = self.tables.write().await;
        if !tables.bookmarks.contains_key(&id) {
            return Ok(None);
        }

        for name in names {
            let tag_id = tables.tag_id_or_create(name);
            tables.link(id, tag_id);
        }
        Ok(tables.view_by_id(id))
    }

    async fn detach_tag(&self, id: u64, name: &str) -> Result<DetachOutcome> {
        let mut tables = self.tables.write().await;
        let Some(tag_id) = tables.tag_ids_by_name.get(name).copied() else {
            return Ok(DetachOutcome::UnknownTag);
        };

        let was_attached = tables.unlink(id, tag_id);

        let tag_removed = !tables.bookmarks_of.contains_key(&tag_id);
        if tag_removed {
            tables.remove_tag(tag_id);
            debug!(tag = name, "unused tag removed");
        }
        Ok(DetachOutcome::Detached {
            was_attached,
            tag_removed,
        })
    }
}
