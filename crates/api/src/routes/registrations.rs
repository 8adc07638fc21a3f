//! Registration route handlers.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use domain::models::registration::{MyRegistration, RegisterResponse};
use persistence::repositories::{RegisterOutcome, RegistrationRepository};
use tracing::info;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AppPath, SessionUser};
use crate::middleware::metrics::record_registration;

/// Register the caller for an event, CONFIRMED while seats remain, else WAITLISTED.
///
/// POST /api/registration/:event_id
pub async fn register(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    AppPath(event_id): AppPath<Uuid>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let repo = RegistrationRepository::new(state.pool.clone());

    match repo.register(event_id, user.id, Utc::now()).await? {
        RegisterOutcome::Registered(registration) => {
            let status = registration.status();
            record_registration(status.as_str());
            info!(
                event_id = %event_id,
                user_id = %user.id,
                status = status.as_str(),
                "User registered for event"
            );
            Ok((
                StatusCode::CREATED,
                Json(RegisterResponse::new(registration.into())),
            ))
        }
        RegisterOutcome::EventNotFound => Err(ApiError::NotFound("Event not found".to_string())),
        RegisterOutcome::Rejected(rejection) => {
            info!(
                event_id = %event_id,
                user_id = %user.id,
                reason = %rejection,
                "Registration rejected"
            );
            Err(rejection.into())
        }
    }
}

/// Cancel the caller's registration. Waitlisted registrants are not promoted.
///
/// DELETE /api/registration/:event_id
pub async fn cancel(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    AppPath(event_id): AppPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = RegistrationRepository::new(state.pool.clone());

    if repo.cancel(event_id, user.id).await? == 0 {
        return Err(ApiError::NotFound("Registration not found".to_string()));
    }

    info!(event_id = %event_id, user_id = %user.id, "Registration cancelled");
    Ok(StatusCode::NO_CONTENT)
}

/// The caller's registrations with event summaries.
///
/// GET /api/registration
pub async fn list_mine(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Json<Vec<MyRegistration>>, ApiError> {
    let registrations = RegistrationRepository::new(state.pool.clone())
        .list_for_user(user.id)
        .await?
        .into_iter()
        .map(MyRegistration::from)
        .collect();
    Ok(Json(registrations))
}
