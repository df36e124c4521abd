//! API Routes
//!
//! Configures the Axum router with the bookmark, admin and health endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_tags_handler, bookmarks_by_tag_handler, cache_stats_handler, clear_cache_handler,
    create_bookmark_handler, delete_bookmark_handler, get_bookmark_handler, health_handler,
    list_bookmarks_handler, remove_tag_handler, update_bookmark_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /bookmarks`, `GET /bookmarks?search=&page=&size=&sort=`
/// - `GET|PUT|DELETE /bookmarks/:id`
/// - `GET /bookmarks/by-tag?name=&page=&size=&sort=`
/// - `POST /bookmarks/:id/tags`, `DELETE /bookmarks/:id/tags/:tag_name`
/// - `POST /admin/cache/clear`, `GET /admin/cache/stats`
/// - `GET /health`
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/bookmarks",
            post(create_bookmark_handler).get(list_bookmarks_handler),
        )
        .route("/bookmarks/by-tag", get(bookmarks_by_tag_handler))
        .route(
            "/bookmarks/:id",
            get(get_bookmark_handler)
                .put(update_bookmark_handler)
                .delete(delete_bookmark_handler),
        )
        .route("/bookmarks/:id/tags", post(add_tags_handler))
        .route("/bookmarks/:id/tags/:tag_name", delete(remove_tag_handler))
        .route("/admin/cache/clear", post(clear_cache_handler))
        .route("/admin/cache/stats", get(cache_stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
