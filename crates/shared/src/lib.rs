//! Shared utilities for the campus events backend.
//!
//! - Session token generation and hashing
//! - Password hashing with Argon2id and the password strength policy
//! - Offset pagination helpers
//! - Custom validators for `validator` derives

pub mod crypto;
pub mod pagination;
pub mod password;
pub mod validation;
