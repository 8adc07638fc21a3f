//! Domain models for campus events.

pub mod event;
pub mod feedback;
pub mod notification;
pub mod registration;
pub mod stats;
pub mod user;

pub use event::{ApprovalStatus, Event, EventType};
pub use feedback::Feedback;
pub use notification::{Notification, NotificationContent, NotificationType};
pub use registration::{Registration, RegistrationStatus};
pub use user::{User, UserRole, UserSummary};
