//! User and session repositories.

use chrono::{DateTime, Utc};
use domain::models::user::{UpdateProfileRequest, UserFilter};
use domain::models::UserRole;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{GroupCountEntity, UserEntity, UserSessionEntity, UserWithCountsEntity};
use crate::metrics::QueryTimer;
use crate::repositories::search_pattern;

const USER_COLUMNS: &str = r#"
    u.id, u.name, u.email, u.password_hash, u.role, u.department, u.year, u.bio,
    u.location, u.website, u.image, u.is_active, u.created_at, u.updated_at
"#;

// Nullable parameters shared by the admin list and its count:
// $1 role, $2 search pattern, $3 department.
const USER_FILTER: &str = r#"
    ($1::text IS NULL OR u.role = $1)
    AND ($2::text IS NULL OR u.name ILIKE $2 OR u.email ILIKE $2)
    AND ($3::text IS NULL OR u.department = $3)
"#;

/// Input for creating a user account.
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: UserRole,
    pub department: Option<&'a str>,
    pub year: Option<i32>,
}

/// Admin changes to an account. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserAdminChanges<'a> {
    pub role: Option<UserRole>,
    pub department: Option<&'a str>,
    pub year: Option<i32>,
    pub is_active: Option<bool>,
}

/// Repository for user-related database operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_id");
        let query = format!("SELECT {} FROM users u WHERE u.id = $1", USER_COLUMNS);
        let result = sqlx::query_as::<_, UserEntity>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Find a user by (normalized) email address.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_email");
        let query = format!("SELECT {} FROM users u WHERE u.email = $1", USER_COLUMNS);
        let result = sqlx::query_as::<_, UserEntity>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Create a new user account. Duplicate emails surface as a unique violation.
    pub async fn create(&self, user: NewUser<'_>) -> Result<UserEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_user");
        let query = format!(
            r#"
            INSERT INTO users AS u (name, email, password_hash, role, department, year)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        let result = sqlx::query_as::<_, UserEntity>(&query)
            .bind(user.name)
            .bind(user.email)
            .bind(user.password_hash)
            .bind(user.role.as_str())
            .bind(user.department)
            .bind(user.year)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Apply a partial profile update. An empty website clears it.
    pub async fn update_profile(
        &self,
        id: Uuid,
        changes: &UpdateProfileRequest,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_user_profile");
        let query = format!(
            r#"
            UPDATE users AS u SET
                name = COALESCE($2, u.name),
                bio = COALESCE($3, u.bio),
                location = COALESCE($4, u.location),
                website = CASE WHEN $5::text IS NULL THEN u.website ELSE NULLIF($5, '') END,
                department = COALESCE($6, u.department),
                year = COALESCE($7, u.year),
                image = COALESCE($8, u.image),
                updated_at = NOW()
            WHERE u.id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        let result = sqlx::query_as::<_, UserEntity>(&query)
            .bind(id)
            .bind(changes.name.as_deref())
            .bind(changes.bio.as_deref())
            .bind(changes.location.as_deref())
            .bind(changes.website.as_deref())
            .bind(changes.department.as_deref())
            .bind(changes.year)
            .bind(changes.image.as_deref())
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Apply admin changes to an account.
    pub async fn update_by_admin(
        &self,
        id: Uuid,
        changes: UserAdminChanges<'_>,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_user_by_admin");
        let query = format!(
            r#"
            UPDATE users AS u SET
                role = COALESCE($2, u.role),
                department = COALESCE($3, u.department),
                year = COALESCE($4, u.year),
                is_active = COALESCE($5, u.is_active),
                updated_at = NOW()
            WHERE u.id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        let result = sqlx::query_as::<_, UserEntity>(&query)
            .bind(id)
            .bind(changes.role.map(|r| r.as_str()))
            .bind(changes.department)
            .bind(changes.year)
            .bind(changes.is_active)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Delete a user. Events, registrations, feedback and sessions cascade.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_user");
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// Count users matching the admin list filters.
    pub async fn count(&self, filter: &UserFilter) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_users");
        let query = format!("SELECT COUNT(*) FROM users u WHERE {}", USER_FILTER);
        let result = sqlx::query_scalar::<_, i64>(&query)
            .bind(filter.role.map(|r| r.as_str()))
            .bind(search_pattern(filter.search.as_deref()))
            .bind(filter.department.as_deref())
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }

    /// List users with activity counts, filtered, sorted and paginated.
    pub async fn list_with_counts(
        &self,
        filter: &UserFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UserWithCountsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_users_with_counts");
        let query = format!(
            r#"
            SELECT {},
                (SELECT COUNT(*) FROM events e WHERE e.created_by_id = u.id) AS event_count,
                (SELECT COUNT(*) FROM registrations r WHERE r.user_id = u.id) AS registration_count
            FROM users u
            WHERE {}
            ORDER BY {} {} NULLS LAST, u.id
            LIMIT $4 OFFSET $5
            "#,
            USER_COLUMNS,
            USER_FILTER,
            filter.sort_by.as_sql_column(),
            filter.sort_order.as_sql()
        );
        let result = sqlx::query_as::<_, UserWithCountsEntity>(&query)
            .bind(filter.role.map(|r| r.as_str()))
            .bind(search_pattern(filter.search.as_deref()))
            .bind(filter.department.as_deref())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// User counts grouped by department.
    pub async fn count_by_department(&self) -> Result<Vec<GroupCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("count_users_by_department");
        let result = sqlx::query_as::<_, GroupCountEntity>(
            r#"
            SELECT department AS key, COUNT(*) AS count
            FROM users
            GROUP BY department
            ORDER BY count DESC, key
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// User counts grouped by role.
    pub async fn count_by_role(&self) -> Result<Vec<GroupCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("count_users_by_role");
        let result = sqlx::query_as::<_, GroupCountEntity>(
            r#"
            SELECT role AS key, COUNT(*) AS count
            FROM users
            GROUP BY role
            ORDER BY count DESC, key
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

/// Repository for session rows.
#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a new session for `user_id`.
    pub async fn create(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<UserSessionEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_session");
        let result = sqlx::query_as::<_, UserSessionEntity>(
            r#"
            INSERT INTO user_sessions (user_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, token_hash, expires_at, created_at, last_used_at
            "#,
        )
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Resolve an unexpired session to its user and touch `last_used_at`.
    pub async fn find_user_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_session");
        let query = format!(
            r#"
            WITH s AS (
                UPDATE user_sessions
                SET last_used_at = NOW()
                WHERE token_hash = $1 AND expires_at > NOW()
                RETURNING user_id
            )
            SELECT {}
            FROM users u
            JOIN s ON s.user_id = u.id
            "#,
            USER_COLUMNS
        );
        let result = sqlx::query_as::<_, UserEntity>(&query)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Delete one session.
    pub async fn delete_by_token_hash(&self, token_hash: &str) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_session");
        let result = sqlx::query("DELETE FROM user_sessions WHERE token_hash = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// Delete every session of a user.
    pub async fn delete_for_user(&self, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_user_sessions");
        let result = sqlx::query("DELETE FROM user_sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// Remove expired sessions of a user.
    pub async fn delete_expired_for_user(&self, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_expired_sessions");
        let result =
            sqlx::query("DELETE FROM user_sessions WHERE user_id = $1 AND expires_at <= NOW()")
                .bind(user_id)
                .execute(&self.pool)
                .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}
