//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod event;
pub mod feedback;
pub mod notification;
pub mod registration;
pub mod stats;
pub mod user;

pub use event::{CategoryCountEntity, EventEntity, EventWithCountsEntity, EVENT_COLUMNS};
pub use feedback::{FeedbackEntity, FeedbackWithUserEntity};
pub use notification::NotificationEntity;
pub use registration::{AttendeeEntity, MyRegistrationEntity, RegistrationEntity};
pub use stats::{RecentEventEntity, RecentUserEntity, StatsTotalsEntity};
pub use user::{GroupCountEntity, UserEntity, UserSessionEntity, UserWithCountsEntity};
