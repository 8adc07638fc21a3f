//! Notification repository.

use domain::models::NotificationContent;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::NotificationEntity;
use crate::metrics::QueryTimer;

/// Maximum notifications returned by a list call.
pub const MAX_NOTIFICATIONS: i64 = 100;

/// Repository for notification database operations.
#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a notification for one user.
    pub async fn create(
        &self,
        user_id: Uuid,
        content: &NotificationContent,
    ) -> Result<NotificationEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_notification");
        let result = sqlx::query_as::<_, NotificationEntity>(
            r#"
            INSERT INTO notifications (user_id, title, message, type, event_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, title, message, type, read, event_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(&content.title)
        .bind(&content.message)
        .bind(content.notification_type.as_str())
        .bind(content.event_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// A user's notifications, newest first.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<NotificationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_notifications");
        let result = sqlx::query_as::<_, NotificationEntity>(
            r#"
            SELECT id, user_id, title, message, type, read, event_id, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC, id
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(MAX_NOTIFICATIONS)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Number of unread notifications of a user.
    pub async fn unread_count(&self, user_id: Uuid) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_unread_notifications");
        let result = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND read = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Mark one notification read if it belongs to `user_id`.
    pub async fn mark_read(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<NotificationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("mark_notification_read");
        let result = sqlx::query_as::<_, NotificationEntity>(
            r#"
            UPDATE notifications
            SET read = TRUE
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, message, type, read, event_id, created_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Mark all of a user's notifications read.
    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("mark_all_notifications_read");
        let result = sqlx::query(
            "UPDATE notifications SET read = TRUE WHERE user_id = $1 AND read = FALSE",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}
