//! Bookmark, tag and join records as held by the repository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Bookmark ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: u64,
    pub title: String,
    pub url: String,
    pub memo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bookmark {
    /// Applies the fields present in `changes`; absent fields keep their value.
    pub fn apply(&mut self, changes: BookmarkChanges, now: DateTime<Utc>) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(url) = changes.url {
            self.url = url;
        }
        if let Some(memo) = changes.memo {
            self.memo = Some(memo);
        }
        self.updated_at = now;
    }
}

/// Fields for a bookmark that has no id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub memo: Option<String>,
}

/// Partial update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkChanges {
    pub title: Option<String>,
    pub url: Option<String>,
    pub memo: Option<String>,
}

// == Tag ==
/// A tag, unique by its normalized name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: u64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Trims and lowercases a tag name.
pub fn normalize_tag(raw: &str) -> String {
    raw.trim().to_lowercase()
}

// == Bookmark Tag ==
/// Join record linking one bookmark to one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkTag {
    pub id: u64,
    pub bookmark_id: u64,
    pub tag_id: u64,
    pub created_at: DateTime<Utc>,
}

// == Bookmark View ==
/// A bookmark together with its tag names, sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkView {
    pub bookmark: Bookmark,
    pub tags: Vec<String>,
}
