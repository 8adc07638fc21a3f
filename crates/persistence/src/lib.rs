//! Persistence layer for the campus events backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations
//! - Query timing metrics
//!
//! SQL migrations live in `src/migrations` and are embedded by the API binary.

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
