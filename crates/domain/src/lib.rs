//! Domain layer for the campus events backend.
//!
//! This crate contains:
//! - Domain models (User, Event, Registration, Feedback, Notification)
//! - Request/response DTOs with their validation rules
//! - Pure business rules (registration decisions, notification templates,
//!   feedback statistics)

pub mod models;
pub mod services;
