//! Repository implementations for database operations.

pub mod event;
pub mod feedback;
pub mod notification;
pub mod registration;
pub mod stats;
pub mod user;

pub use event::{EventOrder, EventRepository};
pub use feedback::FeedbackRepository;
pub use notification::NotificationRepository;
pub use registration::{RegisterOutcome, RegistrationRepository};
pub use stats::StatsRepository;
pub use user::{NewUser, SessionRepository, UserAdminChanges, UserRepository};

/// ILIKE pattern matching `search` anywhere, with `\`, `%` and `_` taken literally.
pub(crate) fn search_pattern(search: Option<&str>) -> Option<String> {
    search.map(|s| {
        let mut pattern = String::with_capacity(s.len() + 2);
        pattern.push('%');
        for c in s.chars() {
            if matches!(c, '\\' | '%' | '_') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    })
}
