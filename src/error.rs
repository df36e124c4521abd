//! Error types for the bookmark service
//!
//! `CacheError` stays inside the cache layer and is absorbed there.
//! `BookmarkError` is what service callers and HTTP clients see.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Failures local to the cache tables.
///
/// None of these ever fail a read or a write; callers log and move on.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key longer than the table accepts
    #[error("Cache key exceeds maximum length of {max} bytes (got {len})")]
    KeyTooLong { len: usize, max: usize },

    /// Table cannot hold any entry
    #[error("Cache full: {0}")]
    Full(String),

    /// Value could not be encoded or decoded
    #[error("Cache codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

// == Bookmark Error Enum ==
/// Unified error type for bookmark operations.
#[derive(Error, Debug)]
pub enum BookmarkError {
    /// Bookmark does not exist
    #[error("Bookmark not found: {0}")]
    NotFound(u64),

    /// Tag does not exist
    #[error("Tag not found: {0}")]
    TagNotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Backing store failure
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BookmarkError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            BookmarkError::NotFound(_) | BookmarkError::TagNotFound(_) => StatusCode::NOT_FOUND,
            BookmarkError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            BookmarkError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for BookmarkError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(ErrorResponse::new(self.to_string(), status.as_u16()));
        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for bookmark operations.
pub type Result<T> = std::result::Result<T, BookmarkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(BookmarkError::NotFound(1).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            BookmarkError::TagNotFound("rust".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            BookmarkError::InvalidRequest("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BookmarkError::Storage("down".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_key_too_long_message() {
        let err = CacheError::KeyTooLong { len: 2000, max: 1024 };
        assert!(err.to_string().contains("1024"));
        assert!(err.to_string().contains("2000"));
    }
}
