//! Admin bootstrap service for initial setup.
//!
//! Creates the first ADMIN account on startup if configured. Running it again
//! is a no-op once a user with the bootstrap email exists.

use domain::models::UserRole;
use persistence::repositories::{NewUser, UserRepository};
use shared::password::{hash_password, PasswordError};
use shared::validation::normalize_email;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::AdminBootstrapConfig;

/// Error types for admin bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordError),
}

/// Outcome of a bootstrap attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    NotConfigured,
    AlreadyExists,
    Created,
}

/// Create the bootstrap admin if configured and missing.
pub async fn bootstrap_admin(
    pool: &PgPool,
    config: &AdminBootstrapConfig,
) -> Result<BootstrapOutcome, BootstrapError> {
    if !config.is_configured() {
        if !config.bootstrap_email.is_empty() {
            warn!("admin.bootstrap_email is set without a password - skipping bootstrap");
        }
        return Ok(BootstrapOutcome::NotConfigured);
    }

    let email = normalize_email(&config.bootstrap_email);
    let users = UserRepository::new(pool.clone());

    if users.find_by_email(&email).await?.is_some() {
        info!(email = %email, "Bootstrap admin already exists - skipping bootstrap");
        return Ok(BootstrapOutcome::AlreadyExists);
    }

    let password_hash = hash_password(&config.bootstrap_password)?;
    let admin = users
        .create(NewUser {
            name: &config.bootstrap_name,
            email: &email,
            password_hash: &password_hash,
            role: UserRole::Admin,
            department: None,
            year: None,
        })
        .await?;

    info!(
        email = %email,
        user_id = %admin.id,
        "Bootstrap admin user created successfully"
    );
    warn!(
        "SECURITY: Remove CE__ADMIN__BOOTSTRAP_PASSWORD from configuration after initial setup"
    );

    Ok(BootstrapOutcome::Created)
}
