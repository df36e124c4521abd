//! API Module
//!
//! HTTP handlers and routing for the bookmark REST API.
//!
//! # Endpoints
//! - `/bookmarks` - CRUD, listing, search and tag listing
//! - `/bookmarks/:id/tags` - Tag association
//! - `/admin/cache` - Cache clear and statistics
//! - `/health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
