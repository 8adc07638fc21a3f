//! Registration repository.
//!
//! Registration runs as one transaction holding a row lock on the event, so
//! concurrent registrations for the same event are serialized and the number
//! of CONFIRMED rows never exceeds the event capacity.

use chrono::{DateTime, Utc};
use domain::models::RegistrationStatus;
use domain::services::notification;
use domain::services::{
    decide_registration, RegistrationContext, RegistrationDecision, RegistrationRejection,
};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::entities::{
    AttendeeEntity, EventEntity, MyRegistrationEntity, RegistrationEntity, EVENT_COLUMNS,
};
use crate::metrics::QueryTimer;

/// Result of a registration attempt.
#[derive(Debug)]
pub enum RegisterOutcome {
    Registered(RegistrationEntity),
    EventNotFound,
    Rejected(RegistrationRejection),
}

/// Repository for registration database operations.
#[derive(Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register `user_id` for `event_id`.
    ///
    /// A successful registration also writes a notification to the registrant
    /// in the same transaction.
    pub async fn register(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<RegisterOutcome, sqlx::Error> {
        let timer = QueryTimer::new("register_for_event");
        let mut tx = self.pool.begin().await?;

        let lock = format!(
            "SELECT {} FROM events e WHERE e.id = $1 FOR UPDATE",
            EVENT_COLUMNS
        );
        let Some(event) = sqlx::query_as::<_, EventEntity>(&lock)
            .bind(event_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            timer.record();
            return Ok(RegisterOutcome::EventNotFound);
        };

        let existing = sqlx::query_as::<_, RegistrationEntity>(
            r#"
            SELECT id, event_id, user_id, status, created_at, updated_at
            FROM registrations
            WHERE event_id = $1 AND user_id = $2
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let confirmed_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM registrations WHERE event_id = $1 AND status = $2",
        )
        .bind(event_id)
        .bind(RegistrationStatus::Confirmed.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let decision = match decide_registration(RegistrationContext {
            capacity: event.capacity,
            confirmed_count,
            registration_deadline: event.registration_deadline,
            existing: existing.as_ref().map(|r| r.status()),
            now,
        }) {
            Ok(decision) => decision,
            Err(rejection) => {
                timer.record();
                return Ok(RegisterOutcome::Rejected(rejection));
            }
        };

        let registration = match (decision, existing) {
            (RegistrationDecision::Reactivate(status), Some(existing)) => {
                sqlx::query_as::<_, RegistrationEntity>(
                    r#"
                    UPDATE registrations
                    SET status = $2, updated_at = NOW()
                    WHERE id = $1
                    RETURNING id, event_id, user_id, status, created_at, updated_at
                    "#,
                )
                .bind(existing.id)
                .bind(status.as_str())
                .fetch_one(&mut *tx)
                .await?
            }
            (decision, _) => {
                sqlx::query_as::<_, RegistrationEntity>(
                    r#"
                    INSERT INTO registrations (event_id, user_id, status)
                    VALUES ($1, $2, $3)
                    RETURNING id, event_id, user_id, status, created_at, updated_at
                    "#,
                )
                .bind(event_id)
                .bind(user_id)
                .bind(decision.status().as_str())
                .fetch_one(&mut *tx)
                .await?
            }
        };

        let content =
            notification::registration_outcome(event.id, &event.title, registration.status());
        sqlx::query(
            r#"
            INSERT INTO notifications (user_id, title, message, type, event_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user_id)
        .bind(&content.title)
        .bind(&content.message)
        .bind(content.notification_type.as_str())
        .bind(content.event_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        debug!(
            event_id = %event_id,
            user_id = %user_id,
            status = %registration.status,
            confirmed_before = confirmed_count,
            "Registration stored"
        );
        Ok(RegisterOutcome::Registered(registration))
    }

    /// Mark a registration CANCELLED. Returns the number of rows changed.
    ///
    /// Waitlisted registrations are not promoted.
    pub async fn cancel(&self, event_id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("cancel_registration");
        let result = sqlx::query(
            r#"
            UPDATE registrations
            SET status = $3, updated_at = NOW()
            WHERE event_id = $1 AND user_id = $2
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .bind(RegistrationStatus::Cancelled.as_str())
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// Find the registration of a user for an event.
    pub async fn find(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_registration");
        let result = sqlx::query_as::<_, RegistrationEntity>(
            r#"
            SELECT id, event_id, user_id, status, created_at, updated_at
            FROM registrations
            WHERE event_id = $1 AND user_id = $2
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// A user's registrations with event summaries, newest first.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<MyRegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_user_registrations");
        let result = sqlx::query_as::<_, MyRegistrationEntity>(
            r#"
            SELECT r.id, r.status, r.created_at,
                   e.id AS event_id, e.title AS event_title, e.date AS event_date,
                   e.start_time AS event_start_time, e.location AS event_location,
                   e.category AS event_category, e.approval_status AS event_approval_status
            FROM registrations r
            JOIN events e ON e.id = r.event_id
            WHERE r.user_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Registrants of an event in registration order.
    pub async fn list_attendees(&self, event_id: Uuid) -> Result<Vec<AttendeeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_event_attendees");
        let result = sqlx::query_as::<_, AttendeeEntity>(
            r#"
            SELECT r.id AS registration_id, r.status, r.created_at AS registered_at,
                   u.id AS user_id, u.name, u.email, u.department, u.year
            FROM registrations r
            JOIN users u ON u.id = r.user_id
            WHERE r.event_id = $1
            ORDER BY r.created_at ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Number of registrations of an event in `status`.
    pub async fn count_by_status(
        &self,
        event_id: Uuid,
        status: RegistrationStatus,
    ) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_registrations_by_status");
        let result = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM registrations WHERE event_id = $1 AND status = $2",
        )
        .bind(event_id)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
