//! In-app notification domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Kind of notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    EventRegistration,
    EventUpdate,
    RegistrationStatus,
    NewEvent,
    #[default]
    System,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::EventRegistration => "EVENT_REGISTRATION",
            NotificationType::EventUpdate => "EVENT_UPDATE",
            NotificationType::RegistrationStatus => "REGISTRATION_STATUS",
            NotificationType::NewEvent => "NEW_EVENT",
            NotificationType::System => "SYSTEM",
        }
    }
}

impl FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "EVENT_REGISTRATION" => Ok(NotificationType::EventRegistration),
            "EVENT_UPDATE" => Ok(NotificationType::EventUpdate),
            "REGISTRATION_STATUS" => Ok(NotificationType::RegistrationStatus),
            "NEW_EVENT" => Ok(NotificationType::NewEvent),
            "SYSTEM" => Ok(NotificationType::System),
            _ => Err(format!("Invalid notification type: {}", s)),
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A notification delivered to one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub read: bool,
    pub event_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Content of a notification before it is addressed and stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub event_id: Option<Uuid>,
}

/// Request payload for sending a notification to a user.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
    pub user_id: Uuid,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 1000, message = "Message must be 1-1000 characters"))]
    pub message: String,

    #[serde(rename = "type", default)]
    pub notification_type: NotificationType,

    pub event_id: Option<Uuid>,
}

impl From<CreateNotificationRequest> for NotificationContent {
    fn from(request: CreateNotificationRequest) -> Self {
        Self {
            title: request.title,
            message: request.message,
            notification_type: request.notification_type,
            event_id: request.event_id,
        }
    }
}

/// Request payload for marking one notification read.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkReadRequest {
    pub id: Uuid,
}

/// Unread notification count.
#[derive(Debug, Clone, Serialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_type_as_str() {
        assert_eq!(NotificationType::NewEvent.as_str(), "NEW_EVENT");
        assert_eq!(
            NotificationType::from_str("event_registration").unwrap(),
            NotificationType::EventRegistration
        );
        assert!(NotificationType::from_str("PUSH").is_err());
    }

    #[test]
    fn test_notification_serializes_type_field() {
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Hello".to_string(),
            message: "World".to_string(),
            notification_type: NotificationType::System,
            read: false,
            event_id: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&notification).unwrap();
        assert_eq!(json["type"], "SYSTEM");
        assert_eq!(json["read"], false);
        assert!(json.get("notificationType").is_none());
    }

    #[test]
    fn test_create_request_defaults_to_system() {
        let json = format!(
            r#"{{"userId":"{}","title":"Heads up","message":"Room changed"}}"#,
            Uuid::new_v4()
        );
        let request: CreateNotificationRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request.notification_type, NotificationType::System);
        assert!(request.validate().is_ok());

        let content = NotificationContent::from(request);
        assert_eq!(content.title, "Heads up");
    }

    #[test]
    fn test_create_request_rejects_empty_title() {
        let request = CreateNotificationRequest {
            user_id: Uuid::new_v4(),
            title: String::new(),
            message: "x".to_string(),
            notification_type: NotificationType::System,
            event_id: None,
        };
        assert!(request.validate().is_err());
    }
}
