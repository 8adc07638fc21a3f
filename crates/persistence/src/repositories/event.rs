//! Event repository for database operations.

use domain::models::event::{CreateEventRequest, EventFilter, UpdateEventRequest};
use domain::models::ApprovalStatus;
use domain::models::UserRole;
use domain::services::notification;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::entities::{EventEntity, EventWithCountsEntity, EVENT_COLUMNS};
use crate::metrics::QueryTimer;
use crate::repositories::search_pattern;

const EVENT_COUNTS: &str = r#"
    (SELECT COUNT(*) FROM registrations r
     WHERE r.event_id = e.id AND r.status = 'CONFIRMED') AS confirmed_count,
    (SELECT COUNT(*) FROM registrations r
     WHERE r.event_id = e.id AND r.status = 'WAITLISTED') AS waitlisted_count
"#;

// $1 approval status, $2 category, $3 search pattern, $4 starting after, $5 creator.
const EVENT_FILTER: &str = r#"
    ($1::text IS NULL OR e.approval_status = $1)
    AND ($2::text IS NULL OR e.category = $2)
    AND ($3::text IS NULL OR e.title ILIKE $3 OR e.description ILIKE $3)
    AND ($4::timestamptz IS NULL OR e.date >= $4)
    AND ($5::uuid IS NULL OR e.created_by_id = $5)
"#;

/// Sort order for event lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOrder {
    /// Soonest first.
    Date,
    /// Most recently created first.
    Newest,
}

impl EventOrder {
    fn as_sql(&self) -> &'static str {
        match self {
            EventOrder::Date => "e.date ASC, e.id",
            EventOrder::Newest => "e.created_at DESC, e.id",
        }
    }
}

/// Repository for event database operations.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an event and notify every student about it, atomically.
    ///
    /// Returns the event and the number of notifications written.
    pub async fn create_with_fan_out(
        &self,
        created_by: Uuid,
        request: &CreateEventRequest,
    ) -> Result<(EventEntity, u64), sqlx::Error> {
        let timer = QueryTimer::new("create_event_with_fan_out");
        let mut tx = self.pool.begin().await?;

        let insert = format!(
            r#"
            INSERT INTO events AS e (
                title, description, date, start_time, end_time, location, venue, category,
                department, tags, images, contact_email, contact_phone, event_type, is_public,
                requires_approval, allow_feedback, featured, capacity, registration_deadline,
                created_by_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                    $17, $18, $19, $20, $21)
            RETURNING {}
            "#,
            EVENT_COLUMNS
        );
        let event = sqlx::query_as::<_, EventEntity>(&insert)
            .bind(&request.title)
            .bind(&request.description)
            .bind(request.date)
            .bind(&request.start_time)
            .bind(request.end_time.as_deref())
            .bind(&request.location)
            .bind(request.venue.as_deref())
            .bind(&request.category)
            .bind(request.department.as_deref())
            .bind(&request.tags)
            .bind(&request.images)
            .bind(request.contact_email.as_deref())
            .bind(request.contact_phone.as_deref())
            .bind(request.event_type.as_str())
            .bind(request.is_public)
            .bind(request.requires_approval)
            .bind(request.allow_feedback)
            .bind(request.featured)
            .bind(request.capacity)
            .bind(request.registration_deadline)
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        let content = notification::new_event(event.id, &event.title, event.date);
        let notified = sqlx::query(
            r#"
            INSERT INTO notifications (user_id, title, message, type, event_id)
            SELECT id, $1, $2, $3, $4
            FROM users
            WHERE role = $5
            "#,
        )
        .bind(&content.title)
        .bind(&content.message)
        .bind(content.notification_type.as_str())
        .bind(content.event_id)
        .bind(UserRole::Student.as_str())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;
        timer.record();
        debug!(event_id = %event.id, notified, "Event created with student fan-out");
        Ok((event, notified))
    }

    /// Find an event by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_by_id");
        let query = format!("SELECT {} FROM events e WHERE e.id = $1", EVENT_COLUMNS);
        let result = sqlx::query_as::<_, EventEntity>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Find an event with its confirmed and waitlisted counts.
    pub async fn find_with_counts(
        &self,
        id: Uuid,
    ) -> Result<Option<EventWithCountsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_with_counts");
        let query = format!(
            "SELECT {}, {} FROM events e WHERE e.id = $1",
            EVENT_COLUMNS, EVENT_COUNTS
        );
        let result = sqlx::query_as::<_, EventWithCountsEntity>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Count events matching a filter.
    pub async fn count(&self, filter: &EventFilter) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_events");
        let query = format!("SELECT COUNT(*) FROM events e WHERE {}", EVENT_FILTER);
        let result = sqlx::query_scalar::<_, i64>(&query)
            .bind(filter.approval_status.map(|s| s.as_str()))
            .bind(filter.category.as_deref())
            .bind(search_pattern(filter.search.as_deref()))
            .bind(filter.starting_after)
            .bind(filter.created_by)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }

    /// List events matching a filter, with registration counts.
    pub async fn list(
        &self,
        filter: &EventFilter,
        order: EventOrder,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<EventWithCountsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_events");
        let query = format!(
            r#"
            SELECT {}, {}
            FROM events e
            WHERE {}
            ORDER BY {}
            LIMIT $6 OFFSET $7
            "#,
            EVENT_COLUMNS,
            EVENT_COUNTS,
            EVENT_FILTER,
            order.as_sql()
        );
        let result = sqlx::query_as::<_, EventWithCountsEntity>(&query)
            .bind(filter.approval_status.map(|s| s.as_str()))
            .bind(filter.category.as_deref())
            .bind(search_pattern(filter.search.as_deref()))
            .bind(filter.starting_after)
            .bind(filter.created_by)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Apply a partial update. Approval status is never touched here.
    pub async fn update(
        &self,
        id: Uuid,
        changes: &UpdateEventRequest,
    ) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_event");
        let query = format!(
            r#"
            UPDATE events AS e SET
                title = COALESCE($2, e.title),
                description = COALESCE($3, e.description),
                date = COALESCE($4, e.date),
                start_time = COALESCE($5, e.start_time),
                end_time = COALESCE($6, e.end_time),
                location = COALESCE($7, e.location),
                venue = COALESCE($8, e.venue),
                category = COALESCE($9, e.category),
                department = COALESCE($10, e.department),
                tags = COALESCE($11, e.tags),
                images = COALESCE($12, e.images),
                contact_email = COALESCE($13, e.contact_email),
                contact_phone = COALESCE($14, e.contact_phone),
                event_type = COALESCE($15, e.event_type),
                is_public = COALESCE($16, e.is_public),
                requires_approval = COALESCE($17, e.requires_approval),
                allow_feedback = COALESCE($18, e.allow_feedback),
                featured = COALESCE($19, e.featured),
                capacity = COALESCE($20, e.capacity),
                registration_deadline = COALESCE($21, e.registration_deadline),
                updated_at = NOW()
            WHERE e.id = $1
            RETURNING {}
            "#,
            EVENT_COLUMNS
        );
        let result = sqlx::query_as::<_, EventEntity>(&query)
            .bind(id)
            .bind(changes.title.as_deref())
            .bind(changes.description.as_deref())
            .bind(changes.date)
            .bind(changes.start_time.as_deref())
            .bind(changes.end_time.as_deref())
            .bind(changes.location.as_deref())
            .bind(changes.venue.as_deref())
            .bind(changes.category.as_deref())
            .bind(changes.department.as_deref())
            .bind(changes.tags.as_ref())
            .bind(changes.images.as_ref())
            .bind(changes.contact_email.as_deref())
            .bind(changes.contact_phone.as_deref())
            .bind(changes.event_type.map(|t| t.as_str()))
            .bind(changes.is_public)
            .bind(changes.requires_approval)
            .bind(changes.allow_feedback)
            .bind(changes.featured)
            .bind(changes.capacity)
            .bind(changes.registration_deadline)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Set the approval status regardless of the current one.
    pub async fn set_approval_status(
        &self,
        id: Uuid,
        status: ApprovalStatus,
    ) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("set_event_approval_status");
        let query = format!(
            r#"
            UPDATE events AS e
            SET approval_status = $2, updated_at = NOW()
            WHERE e.id = $1
            RETURNING {}
            "#,
            EVENT_COLUMNS
        );
        let result = sqlx::query_as::<_, EventEntity>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Delete an event. Registrations and feedback cascade.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_event");
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_order_sql() {
        assert!(EventOrder::Date.as_sql().starts_with("e.date ASC"));
        assert!(EventOrder::Newest.as_sql().starts_with("e.created_at DESC"));
    }

    #[test]
    fn test_filter_leaves_room_for_pagination_params() {
        assert!(EVENT_FILTER.contains("$5"));
        assert!(!EVENT_FILTER.contains("$6"));
    }
}
