//! Cache key generation.
//!
//! Keys are plain strings built from a query's semantic parameters:
//!
//! - by id: `{id}`
//! - listing: `{page}|{size}|{sort}`
//! - search: `{term}|{page}|{size}|{sort}`
//! - by tag: `{tag}|{page}|{size}|{sort}`
//!
//! The search term and tag name are used verbatim, so `Rust` and `rust`
//! produce different keys.

use crate::models::PageRequest;

/// Separator between key segments.
pub const KEY_SEPARATOR: char = '|';

/// Key for a single bookmark lookup.
pub fn by_id_key(id: u64) -> String {
    id.to_string()
}

/// Key for an unfiltered listing page.
pub fn page_key(request: &PageRequest) -> String {
    format!(
        "{}{sep}{}{sep}{}",
        request.page,
        request.size,
        request.sort,
        sep = KEY_SEPARATOR
    )
}

/// Key for a keyword search page.
pub fn search_key(term: &str, request: &PageRequest) -> String {
    prefixed(term, request)
}

/// Key for a tag listing page.
pub fn tag_key(tag_name: &str, request: &PageRequest) -> String {
    prefixed(tag_name, request)
}

fn prefixed(prefix: &str, request: &PageRequest) -> String {
    format!("{}{}{}", prefix, KEY_SEPARATOR, page_key(request))
}
