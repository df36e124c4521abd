//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - TTL Cleanup: Drops expired entries from every cache table

mod cleanup;

pub use cleanup::spawn_cleanup_task;
