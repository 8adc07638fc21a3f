//! Domain services for campus events.
//!
//! Services contain business logic that operates on domain models.

pub mod feedback;
pub mod notification;
pub mod registration;

pub use feedback::feedback_stats;
pub use registration::{
    decide_registration, status_for_capacity, RegistrationContext, RegistrationDecision,
    RegistrationRejection,
};
