//! Registration decision rules.
//!
//! Decides whether a user may register for an event and, if so, whether the
//! registration is CONFIRMED or WAITLISTED. The caller supplies the current
//! CONFIRMED count and is responsible for making the read and the following
//! write atomic.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::event::deadline_passed;
use crate::models::RegistrationStatus;

/// Why a registration attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistrationRejection {
    #[error("Registration deadline has passed")]
    DeadlinePassed,

    #[error("Already registered for this event")]
    AlreadyRegistered(RegistrationStatus),
}

/// What to write for an accepted registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationDecision {
    /// Insert a new registration row.
    Create(RegistrationStatus),
    /// Reuse the caller's cancelled row with a fresh status.
    Reactivate(RegistrationStatus),
}

impl RegistrationDecision {
    pub fn status(&self) -> RegistrationStatus {
        match self {
            RegistrationDecision::Create(status) | RegistrationDecision::Reactivate(status) => {
                *status
            }
        }
    }
}

/// Inputs to a registration decision.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationContext {
    pub capacity: i32,
    pub confirmed_count: i64,
    pub registration_deadline: Option<DateTime<Utc>>,
    /// Status of the user's existing row for this event, if any.
    pub existing: Option<RegistrationStatus>,
    pub now: DateTime<Utc>,
}

/// WAITLISTED once CONFIRMED registrations reach capacity, otherwise CONFIRMED.
pub fn status_for_capacity(confirmed_count: i64, capacity: i32) -> RegistrationStatus {
    if confirmed_count >= capacity as i64 {
        RegistrationStatus::Waitlisted
    } else {
        RegistrationStatus::Confirmed
    }
}

/// Applies the registration rules in order: deadline, duplicate, capacity.
pub fn decide_registration(
    ctx: RegistrationContext,
) -> Result<RegistrationDecision, RegistrationRejection> {
    if deadline_passed(ctx.registration_deadline, ctx.now) {
        return Err(RegistrationRejection::DeadlinePassed);
    }

    let status = status_for_capacity(ctx.confirmed_count, ctx.capacity);

    match ctx.existing {
        Some(existing) if existing.is_active() => {
            Err(RegistrationRejection::AlreadyRegistered(existing))
        }
        Some(_) => Ok(RegistrationDecision::Reactivate(status)),
        None => Ok(RegistrationDecision::Create(status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ctx(capacity: i32, confirmed: i64, existing: Option<RegistrationStatus>) -> RegistrationContext {
        RegistrationContext {
            capacity,
            confirmed_count: confirmed,
            registration_deadline: None,
            existing,
            now: Utc::now(),
        }
    }

    #[test]
    fn test_status_for_capacity() {
        assert_eq!(status_for_capacity(0, 2), RegistrationStatus::Confirmed);
        assert_eq!(status_for_capacity(1, 2), RegistrationStatus::Confirmed);
        assert_eq!(status_for_capacity(2, 2), RegistrationStatus::Waitlisted);
        assert_eq!(status_for_capacity(3, 2), RegistrationStatus::Waitlisted);
    }

    #[test]
    fn test_new_registration_with_seats() {
        assert_eq!(
            decide_registration(ctx(10, 3, None)),
            Ok(RegistrationDecision::Create(RegistrationStatus::Confirmed))
        );
    }

    #[test]
    fn test_new_registration_on_full_event() {
        assert_eq!(
            decide_registration(ctx(2, 2, None)),
            Ok(RegistrationDecision::Create(RegistrationStatus::Waitlisted))
        );
    }

    #[test]
    fn test_active_registration_is_duplicate() {
        for status in [
            RegistrationStatus::Pending,
            RegistrationStatus::Confirmed,
            RegistrationStatus::Waitlisted,
        ] {
            assert_eq!(
                decide_registration(ctx(10, 0, Some(status))),
                Err(RegistrationRejection::AlreadyRegistered(status))
            );
        }
    }

    #[test]
    fn test_cancelled_registration_is_reactivated() {
        assert_eq!(
            decide_registration(ctx(2, 1, Some(RegistrationStatus::Cancelled))),
            Ok(RegistrationDecision::Reactivate(RegistrationStatus::Confirmed))
        );
        assert_eq!(
            decide_registration(ctx(2, 2, Some(RegistrationStatus::Cancelled))),
            Ok(RegistrationDecision::Reactivate(RegistrationStatus::Waitlisted))
        );
    }

    #[test]
    fn test_deadline_checked_first() {
        let mut context = ctx(10, 0, Some(RegistrationStatus::Confirmed));
        context.registration_deadline = Some(context.now - Duration::hours(1));
        assert_eq!(
            decide_registration(context),
            Err(RegistrationRejection::DeadlinePassed)
        );

        context.registration_deadline = Some(context.now + Duration::hours(1));
        context.existing = None;
        assert!(decide_registration(context).is_ok());
    }

    #[test]
    fn test_capacity_two_walkthrough() {
        // Two students fill the event, the third is waitlisted.
        let mut confirmed = 0;
        for _ in 0..2 {
            let decision = decide_registration(ctx(2, confirmed, None)).unwrap();
            assert_eq!(decision.status(), RegistrationStatus::Confirmed);
            confirmed += 1;
        }
        let third = decide_registration(ctx(2, confirmed, None)).unwrap();
        assert_eq!(third.status(), RegistrationStatus::Waitlisted);

        // First student cancels: the waitlisted student is not promoted,
        // and a fourth student is judged on the current confirmed count.
        confirmed -= 1;
        let fourth = decide_registration(ctx(2, confirmed, None)).unwrap();
        assert_eq!(fourth, RegistrationDecision::Create(RegistrationStatus::Confirmed));
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            RegistrationRejection::DeadlinePassed.to_string(),
            "Registration deadline has passed"
        );
        assert_eq!(
            RegistrationRejection::AlreadyRegistered(RegistrationStatus::Confirmed).to_string(),
            "Already registered for this event"
        );
    }
}
