//! Request DTOs for the bookmark API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::models::{
    BookmarkChanges, Direction, NewBookmark, Order, PageRequest, Sort, DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE, SORTABLE_FIELDS,
};

const MAX_TITLE_LEN: usize = 200;
const MAX_URL_LEN: usize = 2048;
const MAX_MEMO_LEN: usize = 1000;
const MAX_TAGS_PER_REQUEST: usize = 20;
const MAX_TAG_LEN: usize = 50;

fn too_long(field: &str, value: &str, max: usize) -> Option<String> {
    (value.chars().count() > max).then(|| format!("{} must be at most {} characters", field, max))
}

/// Request body for POST /bookmarks
#[derive(Debug, Clone, Deserialize)]
pub struct BookmarkCreateRequest {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub memo: Option<String>,
}

impl BookmarkCreateRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.title.trim().is_empty() {
            return Some("Title is required".to_string());
        }
        if self.url.trim().is_empty() {
            return Some("URL is required".to_string());
        }
        too_long("Title", &self.title, MAX_TITLE_LEN)
            .or_else(|| too_long("URL", &self.url, MAX_URL_LEN))
            .or_else(|| {
                self.memo
                    .as_deref()
                    .and_then(|memo| too_long("Memo", memo, MAX_MEMO_LEN))
            })
    }

    pub fn into_new_bookmark(self) -> NewBookmark {
        NewBookmark {
            title: self.title,
            url: self.url,
            memo: self.memo,
        }
    }
}

/// Request body for PUT /bookmarks/:id
///
/// Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookmarkUpdateRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
}

impl BookmarkUpdateRequest {
    pub fn validate(&self) -> Option<String> {
        let check = |field: &str, value: &Option<String>, max: usize| {
            value.as_deref().and_then(|v| too_long(field, v, max))
        };
        check("Title", &self.title, MAX_TITLE_LEN)
            .or_else(|| check("URL", &self.url, MAX_URL_LEN))
            .or_else(|| check("Memo", &self.memo, MAX_MEMO_LEN))
    }

    pub fn into_changes(self) -> BookmarkChanges {
        BookmarkChanges {
            title: self.title,
            url: self.url,
            memo: self.memo,
        }
    }
}

/// Request body for POST /bookmarks/:id/tags
#[derive(Debug, Clone, Deserialize)]
pub struct TagUpsertRequest {
    pub names: Vec<String>,
}

impl TagUpsertRequest {
    pub fn validate(&self) -> Option<String> {
        if self.names.is_empty() {
            return Some("Tag list cannot be empty".to_string());
        }
        if self.names.len() > MAX_TAGS_PER_REQUEST {
            return Some(format!(
                "At most {} tags can be added at once",
                MAX_TAGS_PER_REQUEST
            ));
        }
        self.names.iter().find_map(|name| {
            let len = name.chars().count();
            (len == 0 || len > MAX_TAG_LEN)
                .then(|| format!("Tag names must be 1 to {} characters", MAX_TAG_LEN))
        })
    }
}

// == Listing Query ==
/// Query string of the listing endpoints.
///
/// Parsed from raw pairs because `sort` may repeat:
/// `?search=git&page=0&size=20&sort=createdAt,desc&sort=title`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingQuery {
    /// `search` on GET /bookmarks
    pub search: Option<String>,
    /// `name` on GET /bookmarks/by-tag
    pub name: Option<String>,
    pub page: PageRequest,
}

impl ListingQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, String> {
        let mut query = ListingQuery::default();
        let mut page = 0u32;
        let mut size = DEFAULT_PAGE_SIZE;
        let mut orders = Vec::new();

        for (name, value) in pairs {
            match name.as_str() {
                "search" => query.search = Some(value),
                "name" => query.name = Some(value),
                "page" => {
                    page = value
                        .parse()
                        .map_err(|_| format!("Invalid page number '{}'", value))?;
                }
                "size" => {
                    size = value
                        .parse()
                        .map_err(|_| format!("Invalid page size '{}'", value))?;
                    if size == 0 || size > MAX_PAGE_SIZE {
                        return Err(format!("Page size must be between 1 and {}", MAX_PAGE_SIZE));
                    }
                }
                "sort" => orders.push(parse_order(&value)?),
                _ => {}
            }
        }

        query.page = PageRequest::sorted(page, size, Sort::by(orders));
        Ok(query)
    }
}

/// Parses `field` or `field,asc|desc`. Direction defaults to ascending.
fn parse_order(raw: &str) -> Result<Order, String> {
    let mut parts = raw.split(',').map(str::trim);
    let property = parts.next().unwrap_or_default();
    if !SORTABLE_FIELDS.contains(&property) {
        return Err(format!("Cannot sort by '{}'", property));
    }
    let direction = match parts.next() {
        Some(dir) if !dir.is_empty() => dir.parse::<Direction>()?,
        _ => Direction::Asc,
    };
    Ok(Order {
        property: property.to_string(),
        direction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_create_request_deserialize() {
        let json = r#"{"title": "Google", "url": "https://www.google.com"}"#;
        let req: BookmarkCreateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.title, "Google");
        assert!(req.memo.is_none());
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_create_request_requires_title_and_url() {
        let req = BookmarkCreateRequest {
            title: "  ".to_string(),
            url: "https://a.com".to_string(),
            memo: None,
        };
        assert!(req.validate().unwrap().contains("Title"));

        let req = BookmarkCreateRequest {
            title: "A".to_string(),
            url: "".to_string(),
            memo: None,
        };
        assert!(req.validate().unwrap().contains("URL"));
    }

    #[test]
    fn test_create_request_length_limits() {
        let req = BookmarkCreateRequest {
            title: "t".repeat(201),
            url: "https://a.com".to_string(),
            memo: None,
        };
        assert!(req.validate().is_some());

        let req = BookmarkCreateRequest {
            title: "t".to_string(),
            url: "https://a.com".to_string(),
            memo: Some("m".repeat(1001)),
        };
        assert!(req.validate().unwrap().contains("Memo"));
    }

    #[test]
    fn test_update_request_partial() {
        let req: BookmarkUpdateRequest = serde_json::from_str(r#"{"title":"New"}"#).unwrap();
        assert!(req.validate().is_none());

        let changes = req.into_changes();
        assert_eq!(changes.title.as_deref(), Some("New"));
        assert!(changes.url.is_none());
    }

    #[test]
    fn test_tag_request_validation() {
        let ok = TagUpsertRequest {
            names: vec!["spring".into(), "java".into()],
        };
        assert!(ok.validate().is_none());

        let empty = TagUpsertRequest { names: vec![] };
        assert!(empty.validate().is_some());

        let too_many = TagUpsertRequest {
            names: (0..21).map(|i| format!("t{}", i)).collect(),
        };
        assert!(too_many.validate().is_some());

        let too_long = TagUpsertRequest {
            names: vec!["x".repeat(51)],
        };
        assert!(too_long.validate().is_some());
    }

    #[test]
    fn test_listing_query_defaults() {
        let query = ListingQuery::from_pairs(vec![]).unwrap();
        assert_eq!(query.page, PageRequest::of(0, 20));
        assert!(query.search.is_none());
    }

    #[test]
    fn test_listing_query_repeated_sort() {
        let query = ListingQuery::from_pairs(pairs(&[
            ("search", "git"),
            ("page", "1"),
            ("size", "5"),
            ("sort", "createdAt,desc"),
            ("sort", "title"),
        ]))
        .unwrap();

        assert_eq!(query.search.as_deref(), Some("git"));
        assert_eq!(query.page.page, 1);
        assert_eq!(query.page.size, 5);
        assert_eq!(query.page.sort.to_string(), "createdAt: DESC, title: ASC");
    }

    #[test]
    fn test_listing_query_rejects_bad_input() {
        assert!(ListingQuery::from_pairs(pairs(&[("page", "-1")])).is_err());
        assert!(ListingQuery::from_pairs(pairs(&[("size", "0")])).is_err());
        assert!(ListingQuery::from_pairs(pairs(&[("size", "5000")])).is_err());
        assert!(ListingQuery::from_pairs(pairs(&[("sort", "password,asc")])).is_err());
        assert!(ListingQuery::from_pairs(pairs(&[("sort", "title,up")])).is_err());
    }
}
