//! API route handlers.

pub mod admin;
pub mod admin_users;
pub mod auth;
pub mod events;
pub mod feedback;
pub mod health;
pub mod notifications;
pub mod profile;
pub mod registrations;
