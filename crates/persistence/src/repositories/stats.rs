//! Admin dashboard statistics queries.

use domain::models::UserRole;
use sqlx::PgPool;

use crate::entities::{
    CategoryCountEntity, RecentEventEntity, RecentUserEntity, StatsTotalsEntity,
};
use crate::metrics::QueryTimer;

/// Repository for aggregate queries.
#[derive(Clone)]
pub struct StatsRepository {
    pool: PgPool,
}

impl StatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Headline counters.
    pub async fn totals(&self) -> Result<StatsTotalsEntity, sqlx::Error> {
        let timer = QueryTimer::new("stats_totals");
        let result = sqlx::query_as::<_, StatsTotalsEntity>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users WHERE role = 'STUDENT') AS students,
                (SELECT COUNT(*) FROM events) AS events,
                (SELECT COUNT(*) FROM users WHERE role = 'EVENT_ORGANIZER') AS organizers,
                (SELECT COUNT(*) FROM events WHERE approval_status = 'PENDING') AS pending_approvals
            "#,
        )
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Event counts grouped by category.
    pub async fn events_by_category(&self) -> Result<Vec<CategoryCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("stats_events_by_category");
        let result = sqlx::query_as::<_, CategoryCountEntity>(
            r#"
            SELECT category, COUNT(*) AS count
            FROM events
            GROUP BY category
            ORDER BY count DESC, category
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Most recently created events.
    pub async fn recent_events(&self, limit: i64) -> Result<Vec<RecentEventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("stats_recent_events");
        let result = sqlx::query_as::<_, RecentEventEntity>(
            r#"
            SELECT id, title, date, category, approval_status, created_at
            FROM events
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Most recently created accounts with `role`.
    pub async fn recent_users(
        &self,
        role: UserRole,
        limit: i64,
    ) -> Result<Vec<RecentUserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("stats_recent_users");
        let result = sqlx::query_as::<_, RecentUserEntity>(
            r#"
            SELECT id, name, email, department, created_at
            FROM users
            WHERE role = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(role.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
