//! Domain records, paging types, and request/response DTOs.

pub mod bookmark;
pub mod page;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use bookmark::{
    normalize_tag, Bookmark, BookmarkChanges, BookmarkTag, BookmarkView, NewBookmark, Tag,
};
pub use page::{
    Direction, Order, Page, PageRequest, Sort, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, SORTABLE_FIELDS,
};
pub use requests::{BookmarkCreateRequest, BookmarkUpdateRequest, ListingQuery, TagUpsertRequest};
pub use responses::{
    BookmarkResponse, CacheStatsResponse, ErrorResponse, HealthResponse, MessageResponse,
};
