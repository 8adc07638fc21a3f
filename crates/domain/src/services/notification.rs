//! Notification templates.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{NotificationContent, NotificationType, RegistrationStatus};

/// Sent to every student when an event is created.
pub fn new_event(event_id: Uuid, title: &str, date: DateTime<Utc>) -> NotificationContent {
    NotificationContent {
        title: "New Event Available".to_string(),
        message: format!(
            "A new event \"{}\" has been scheduled for {}. Check it out!",
            title,
            date.format("%B %-d, %Y")
        ),
        notification_type: NotificationType::NewEvent,
        event_id: Some(event_id),
    }
}

/// Sent to the registrant after a successful registration.
pub fn registration_outcome(
    event_id: Uuid,
    title: &str,
    status: RegistrationStatus,
) -> NotificationContent {
    let message = match status {
        RegistrationStatus::Waitlisted => format!(
            "\"{}\" is full. You have been added to the waitlist.",
            title
        ),
        _ => format!("You are registered for \"{}\".", title),
    };

    NotificationContent {
        title: "Event Registration".to_string(),
        message,
        notification_type: NotificationType::EventRegistration,
        event_id: Some(event_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_event_template() {
        let id = Uuid::new_v4();
        let date = Utc.with_ymd_and_hms(2030, 3, 7, 10, 0, 0).unwrap();
        let content = new_event(id, "Hackathon", date);

        assert_eq!(content.notification_type, NotificationType::NewEvent);
        assert_eq!(content.event_id, Some(id));
        assert_eq!(
            content.message,
            "A new event \"Hackathon\" has been scheduled for March 7, 2030. Check it out!"
        );
    }

    #[test]
    fn test_registration_outcome_confirmed() {
        let content = registration_outcome(Uuid::new_v4(), "Career Fair", RegistrationStatus::Confirmed);
        assert_eq!(content.notification_type, NotificationType::EventRegistration);
        assert_eq!(content.message, "You are registered for \"Career Fair\".");
    }

    #[test]
    fn test_registration_outcome_waitlisted() {
        let content = registration_outcome(Uuid::new_v4(), "Career Fair", RegistrationStatus::Waitlisted);
        assert!(content.message.contains("waitlist"));
    }
}
