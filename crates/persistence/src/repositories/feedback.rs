//! Feedback repository.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{FeedbackEntity, FeedbackWithUserEntity};
use crate::metrics::QueryTimer;

/// Repository for feedback database operations.
#[derive(Clone)]
pub struct FeedbackRepository {
    pool: PgPool,
}

impl FeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user's feedback for an event.
    pub async fn find_by_event_and_user(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<FeedbackEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_feedback_by_event_and_user");
        let result = sqlx::query_as::<_, FeedbackEntity>(
            r#"
            SELECT id, event_id, user_id, rating, comment, was_helpful, created_at
            FROM feedback
            WHERE event_id = $1 AND user_id = $2
            LIMIT 1
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert feedback.
    pub async fn create(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        rating: i32,
        comment: &str,
        was_helpful: bool,
    ) -> Result<FeedbackEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_feedback");
        let result = sqlx::query_as::<_, FeedbackEntity>(
            r#"
            INSERT INTO feedback (event_id, user_id, rating, comment, was_helpful)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, event_id, user_id, rating, comment, was_helpful, created_at
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .bind(rating)
        .bind(comment)
        .bind(was_helpful)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Feedback for an event with author names, newest first.
    pub async fn list_for_event(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<FeedbackWithUserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_event_feedback");
        let result = sqlx::query_as::<_, FeedbackWithUserEntity>(
            r#"
            SELECT f.id, f.event_id, f.user_id, f.rating, f.comment, f.was_helpful,
                   f.created_at, u.name AS user_name
            FROM feedback f
            JOIN users u ON u.id = f.user_id
            WHERE f.event_id = $1
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
