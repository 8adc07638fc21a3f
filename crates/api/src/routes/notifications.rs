//! Notification route handlers.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::notification::{
    CreateNotificationRequest, MarkReadRequest, UnreadCountResponse,
};
use domain::models::{Notification, NotificationContent};
use persistence::repositories::NotificationRepository;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AppJson, SessionUser};

/// The caller's notifications, newest first.
///
/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let notifications = NotificationRepository::new(state.pool.clone())
        .list_for_user(user.id)
        .await?
        .into_iter()
        .map(Notification::from)
        .collect();
    Ok(Json(notifications))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Json<UnreadCountResponse>, ApiError> {
    let count = NotificationRepository::new(state.pool.clone())
        .unread_count(user.id)
        .await?;
    Ok(Json(UnreadCountResponse { count }))
}

/// Send a notification to one user. Admins and organizers only.
///
/// POST /api/notifications
pub async fn create_notification(
    State(state): State<AppState>,
    SessionUser(sender): SessionUser,
    AppJson(request): AppJson<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<Notification>), ApiError> {
    if !sender.role.can_send_notifications() {
        return Err(ApiError::Forbidden(
            "Only admins and event organizers can send notifications".to_string(),
        ));
    }
    request.validate()?;

    let recipient = request.user_id;
    let content = NotificationContent::from(request);
    let notification = NotificationRepository::new(state.pool.clone())
        .create(recipient, &content)
        .await?;

    info!(
        notification_id = %notification.id,
        sender_id = %sender.id,
        recipient_id = %recipient,
        "Notification sent"
    );
    Ok((StatusCode::CREATED, Json(notification.into())))
}

/// Mark one of the caller's notifications read.
///
/// PATCH /api/notifications
pub async fn mark_read(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    AppJson(request): AppJson<MarkReadRequest>,
) -> Result<Json<Notification>, ApiError> {
    NotificationRepository::new(state.pool.clone())
        .mark_read(request.id, user.id)
        .await?
        .map(|n| Json(n.into()))
        .ok_or_else(|| ApiError::NotFound("Notification not found".to_string()))
}

/// Mark all of the caller's notifications read.
///
/// PUT /api/notifications
pub async fn mark_all_read(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> Result<StatusCode, ApiError> {
    let updated = NotificationRepository::new(state.pool.clone())
        .mark_all_read(user.id)
        .await?;
    tracing::debug!(user_id = %user.id, updated, "Notifications marked read");
    Ok(StatusCode::NO_CONTENT)
}
