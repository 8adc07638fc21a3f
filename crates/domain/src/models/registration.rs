//! Event registration domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::event::ApprovalStatus;

/// Lifecycle of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    Pending,
    Confirmed,
    Waitlisted,
    Cancelled,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "PENDING",
            RegistrationStatus::Confirmed => "CONFIRMED",
            RegistrationStatus::Waitlisted => "WAITLISTED",
            RegistrationStatus::Cancelled => "CANCELLED",
        }
    }

    /// Active registrations block a new registration for the same event.
    pub fn is_active(&self) -> bool {
        !matches!(self, RegistrationStatus::Cancelled)
    }
}

impl FromStr for RegistrationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(RegistrationStatus::Pending),
            "CONFIRMED" => Ok(RegistrationStatus::Confirmed),
            "WAITLISTED" => Ok(RegistrationStatus::Waitlisted),
            "CANCELLED" => Ok(RegistrationStatus::Cancelled),
            _ => Err(format!("Invalid registration status: {}", s)),
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents one user's registration for one event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub status: RegistrationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response for a successful registration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: &'static str,
    pub registration: Registration,
}

impl RegisterResponse {
    pub fn new(registration: Registration) -> Self {
        let message = match registration.status {
            RegistrationStatus::Waitlisted => "Event is full. You have been added to the waitlist",
            _ => "Successfully registered for event",
        };
        Self {
            message,
            registration,
        }
    }
}

/// Event fields shown alongside a user's own registrations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredEvent {
    pub id: Uuid,
    pub title: String,
    pub date: DateTime<Utc>,
    pub start_time: String,
    pub location: String,
    pub category: String,
    pub approval_status: ApprovalStatus,
}

/// One of the caller's registrations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyRegistration {
    pub id: Uuid,
    pub status: RegistrationStatus,
    pub created_at: DateTime<Utc>,
    pub event: RegisteredEvent,
}

/// A registrant as seen by the event owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub registration_id: Uuid,
    pub status: RegistrationStatus,
    pub registered_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub year: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(status: RegistrationStatus) -> Registration {
        Registration {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_active() {
        assert!(RegistrationStatus::Pending.is_active());
        assert!(RegistrationStatus::Confirmed.is_active());
        assert!(RegistrationStatus::Waitlisted.is_active());
        assert!(!RegistrationStatus::Cancelled.is_active());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(
            RegistrationStatus::from_str("waitlisted").unwrap(),
            RegistrationStatus::Waitlisted
        );
        assert!(RegistrationStatus::from_str("REFUNDED").is_err());
        assert_eq!(RegistrationStatus::Cancelled.to_string(), "CANCELLED");
    }

    #[test]
    fn test_register_response_message() {
        let confirmed = RegisterResponse::new(registration(RegistrationStatus::Confirmed));
        assert_eq!(confirmed.message, "Successfully registered for event");

        let waitlisted = RegisterResponse::new(registration(RegistrationStatus::Waitlisted));
        assert!(waitlisted.message.contains("waitlist"));
    }

    #[test]
    fn test_registration_serialization() {
        let json = serde_json::to_value(registration(RegistrationStatus::Confirmed)).unwrap();
        assert_eq!(json["status"], "CONFIRMED");
        assert!(json.get("eventId").is_some());
        assert!(json.get("userId").is_some());
    }
}
