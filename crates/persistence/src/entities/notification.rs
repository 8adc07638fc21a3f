//! Notification entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::NotificationType;
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

/// Database row mapping for the notifications table.
#[derive(Debug, Clone, FromRow)]
pub struct NotificationEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    #[sqlx(rename = "type")]
    pub notification_type: String,
    pub read: bool,
    pub event_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<NotificationEntity> for domain::models::Notification {
    fn from(entity: NotificationEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            title: entity.title,
            message: entity.message,
            notification_type: NotificationType::from_str(&entity.notification_type)
                .unwrap_or_default(),
            read: entity.read,
            event_id: entity.event_id,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_entity_to_domain() {
        let entity = NotificationEntity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "New Event Available".to_string(),
            message: "Check it out".to_string(),
            notification_type: "NEW_EVENT".to_string(),
            read: false,
            event_id: Some(Uuid::new_v4()),
            created_at: Utc::now(),
        };
        let notification: domain::models::Notification = entity.into();
        assert_eq!(notification.notification_type, NotificationType::NewEvent);
        assert!(!notification.read);
    }
}
