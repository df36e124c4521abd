//! Bookmark Cache - a personal bookmark REST API
//!
//! Reads go through per-operation cache tables with their own TTL, capacity
//! and eligibility rules; writes invalidate the tables they affect.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use service::BookmarkService;
pub use tasks::spawn_cleanup_task;
