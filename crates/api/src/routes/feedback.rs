//! Feedback route handlers.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::feedback::{
    CreateFeedbackRequest, FeedbackItem, FeedbackListResponse, FeedbackQuery,
};
use domain::models::{Event, Feedback};
use domain::services::feedback_stats;
use persistence::repositories::{EventRepository, FeedbackRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AppJson, AppQuery, SessionUser};

async fn find_event(state: &AppState, id: Uuid) -> Result<Event, ApiError> {
    EventRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .map(Event::from)
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))
}

/// Submit feedback for an event, once per user.
///
/// POST /api/feedback
pub async fn create_feedback(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    AppJson(request): AppJson<CreateFeedbackRequest>,
) -> Result<(StatusCode, Json<Feedback>), ApiError> {
    request.validate()?;

    let event = find_event(&state, request.event_id).await?;
    if !event.allow_feedback {
        return Err(ApiError::Validation(
            "Feedback is not enabled for this event".to_string(),
        ));
    }

    let repo = FeedbackRepository::new(state.pool.clone());
    if repo
        .find_by_event_and_user(event.id, user.id)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "You have already submitted feedback for this event".to_string(),
        ));
    }

    let feedback = repo
        .create(
            event.id,
            user.id,
            request.rating,
            request.comment.trim(),
            request.was_helpful,
        )
        .await?;

    info!(
        feedback_id = %feedback.id,
        event_id = %event.id,
        user_id = %user.id,
        rating = feedback.rating,
        "Feedback submitted"
    );
    Ok((StatusCode::CREATED, Json(feedback.into())))
}

/// Feedback of an event with aggregate statistics.
///
/// GET /api/feedback?eventId=
pub async fn list_feedback(
    State(state): State<AppState>,
    _user: SessionUser,
    AppQuery(query): AppQuery<FeedbackQuery>,
) -> Result<Json<FeedbackListResponse>, ApiError> {
    let event = find_event(&state, query.event_id).await?;

    let feedback: Vec<FeedbackItem> = FeedbackRepository::new(state.pool.clone())
        .list_for_event(event.id)
        .await?
        .into_iter()
        .map(FeedbackItem::from)
        .collect();
    let stats = feedback_stats(feedback.iter().map(|item| &item.feedback));

    Ok(Json(FeedbackListResponse { feedback, stats }))
}
