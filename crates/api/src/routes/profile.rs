//! Profile route handlers for the signed-in user.

use axum::{extract::State, Json};
use domain::models::user::{UpdateProfileRequest, UserResponse};
use domain::models::User;
use persistence::repositories::UserRepository;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AppJson, SessionUser};

/// GET /api/profile
pub async fn get_profile(SessionUser(user): SessionUser) -> Json<UserResponse> {
    Json(user.into())
}

/// Partial profile update; omitted fields are left unchanged.
///
/// PATCH /api/profile
pub async fn update_profile(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    AppJson(request): AppJson<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    request.validate()?;
    if request.is_empty() {
        return Ok(Json(user.into()));
    }

    let updated: User = UserRepository::new(state.pool.clone())
        .update_profile(user.id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?
        .into();

    info!(user_id = %user.id, "Profile updated");
    Ok(Json(updated.into()))
}
