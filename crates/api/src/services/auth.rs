//! Authentication service for sign-up, sign-in and session management.

use chrono::{Duration, Utc};
use domain::models::user::{CreateUserRequest, SignUpRequest};
use domain::models::{User, UserRole};
use persistence::repositories::{NewUser, SessionRepository, UserRepository};
use shared::crypto::{generate_session_token, session_token_hash};
use shared::password::{hash_password, verify_password, PasswordError};
use shared::validation::normalize_email;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ApiError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User is disabled")]
    UserDisabled,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::EmailAlreadyExists => {
                ApiError::Conflict("User with this email already exists".into())
            }
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid email or password".into())
            }
            AuthError::UserDisabled => ApiError::Unauthorized("Account is deactivated".into()),
            AuthError::PasswordError(e) => e.into(),
            AuthError::DatabaseError(e) => e.into(),
        }
    }
}

/// A freshly started session.
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub user: User,
    /// Raw token for the cookie; never stored.
    pub session_token: String,
}

/// Authentication service.
pub struct AuthService {
    users: UserRepository,
    sessions: SessionRepository,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(pool: PgPool, session_ttl_secs: i64) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            sessions: SessionRepository::new(pool),
            session_ttl: Duration::seconds(session_ttl_secs),
        }
    }

    /// Register a STUDENT account and sign it in.
    pub async fn register(&self, request: &SignUpRequest) -> Result<AuthResult, AuthError> {
        let user = self
            .create_account(
                &request.name,
                &request.email,
                &request.password,
                UserRole::Student,
                request.department.as_deref(),
                request.year,
            )
            .await?;

        info!(user_id = %user.id, "User registered");
        self.start_session(user).await
    }

    /// Create an account with any role (admin operation). No session is started.
    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<User, AuthError> {
        let user = self
            .create_account(
                &request.name,
                &request.email,
                &request.password,
                request.role,
                request.department.as_deref(),
                request.year,
            )
            .await?;

        info!(user_id = %user.id, role = %user.role, "User created by admin");
        Ok(user)
    }

    /// Sign in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResult, AuthError> {
        let email = normalize_email(email);
        let user: User = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?
            .into();

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(AuthError::UserDisabled);
        }

        // Housekeeping: old sessions of this user are no longer usable
        let purged = self.sessions.delete_expired_for_user(user.id).await?;
        if purged > 0 {
            debug!(user_id = %user.id, purged, "Removed expired sessions");
        }

        info!(user_id = %user.id, "User signed in");
        self.start_session(user).await
    }

    /// End the session identified by `token`. Unknown tokens are ignored.
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let deleted = self
            .sessions
            .delete_by_token_hash(&session_token_hash(token))
            .await?;
        if deleted == 0 {
            debug!("Session not found during logout, may already be logged out");
        }
        Ok(())
    }

    /// Resolve a session token to an active user.
    pub async fn authenticate(&self, token: &str) -> Result<Option<User>, AuthError> {
        let user = self
            .sessions
            .find_user_by_token_hash(&session_token_hash(token))
            .await?
            .map(User::from)
            .filter(|u| u.is_active);
        Ok(user)
    }

    /// End every session of a user.
    pub async fn revoke_all(&self, user_id: Uuid) -> Result<u64, AuthError> {
        Ok(self.sessions.delete_for_user(user_id).await?)
    }

    async fn create_account(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
        department: Option<&str>,
        year: Option<i32>,
    ) -> Result<User, AuthError> {
        let email = normalize_email(email);

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = hash_password(password)?;

        let created = self
            .users
            .create(NewUser {
                name: name.trim(),
                email: &email,
                password_hash: &password_hash,
                role,
                department,
                year,
            })
            .await;

        // Concurrent sign-up with the same email
        if let Err(sqlx::Error::Database(db_err)) = &created {
            if db_err.code().as_deref() == Some("23505") {
                return Err(AuthError::EmailAlreadyExists);
            }
        }

        Ok(created?.into())
    }

    async fn start_session(&self, user: User) -> Result<AuthResult, AuthError> {
        let token = generate_session_token();
        let expires_at = Utc::now() + self.session_ttl;
        self.sessions
            .create(user.id, &session_token_hash(&token), expires_at)
            .await?;

        Ok(AuthResult {
            user,
            session_token: token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_auth_error_status_codes() {
        let cases = [
            (AuthError::EmailAlreadyExists, StatusCode::CONFLICT),
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::UserDisabled, StatusCode::UNAUTHORIZED),
            (
                AuthError::DatabaseError(sqlx::Error::PoolTimedOut),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            let api: ApiError = err.into();
            assert_eq!(api.into_response().status(), status);
        }
    }

    #[test]
    fn test_credentials_error_does_not_leak_which_part_failed() {
        let api: ApiError = AuthError::InvalidCredentials.into();
        assert_eq!(api.to_string(), "Unauthorized: Invalid email or password");
    }
}
