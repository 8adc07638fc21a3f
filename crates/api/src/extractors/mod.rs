//! Custom Axum extractors.

pub mod request;
pub mod session;

pub use request::{AppJson, AppPath, AppQuery};
pub use session::{AdminUser, SessionUser};
