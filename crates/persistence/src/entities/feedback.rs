//! Feedback entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::feedback::FeedbackItem;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the feedback table.
#[derive(Debug, Clone, FromRow)]
pub struct FeedbackEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub was_helpful: bool,
    pub created_at: DateTime<Utc>,
}

impl From<FeedbackEntity> for domain::models::Feedback {
    fn from(entity: FeedbackEntity) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            user_id: entity.user_id,
            rating: entity.rating,
            comment: entity.comment,
            was_helpful: entity.was_helpful,
            created_at: entity.created_at,
        }
    }
}

/// Feedback row joined with the author's name.
#[derive(Debug, Clone, FromRow)]
pub struct FeedbackWithUserEntity {
    #[sqlx(flatten)]
    pub feedback: FeedbackEntity,
    pub user_name: String,
}

impl From<FeedbackWithUserEntity> for FeedbackItem {
    fn from(entity: FeedbackWithUserEntity) -> Self {
        Self {
            feedback: entity.feedback.into(),
            user_name: entity.user_name,
        }
    }
}
