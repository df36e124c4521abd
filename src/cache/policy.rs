//! Conditional caching.
//!
//! Each read decides from its inputs alone whether it may use the cache at
//! all. An ineligible call does no cache I/O.

/// Shortest search term whose results are cached.
pub const MIN_CACHED_SEARCH_LEN: usize = 2;

/// Highest page number cached for search and tag listings.
pub const MAX_CACHED_PAGE: u32 = 2;

/// True when `term` is present and not just whitespace.
pub fn has_text(term: Option<&str>) -> bool {
    term.is_some_and(|t| !t.trim().is_empty())
}

/// Unfiltered listing: only the first page, and only without a search term.
pub fn first_page_cacheable(search: Option<&str>, page: u32) -> bool {
    !has_text(search) && page == 0
}

/// Search listing: a real term of at least two characters, pages 0..=2.
pub fn search_cacheable(search: Option<&str>, page: u32) -> bool {
    match search {
        Some(term) if has_text(search) => {
            term.chars().count() >= MIN_CACHED_SEARCH_LEN && page <= MAX_CACHED_PAGE
        }
        _ => false,
    }
}

/// Tag listing: pages 0..=2.
pub fn tag_cacheable(page: u32) -> bool {
    page <= MAX_CACHED_PAGE
}

/// Single lookups are always cached.
pub fn by_id_cacheable() -> bool {
    true
}
