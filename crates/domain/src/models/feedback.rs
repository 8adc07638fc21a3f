//! Event feedback domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Feedback left by an attendee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub was_helpful: bool,
    pub created_at: DateTime<Utc>,
}

/// Feedback with the author's display name.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackItem {
    #[serde(flatten)]
    pub feedback: Feedback,
    pub user_name: String,
}

/// Request payload for submitting feedback.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackRequest {
    pub event_id: Uuid,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(custom(function = "shared::validation::validate_feedback_comment"))]
    pub comment: String,

    #[serde(default)]
    pub was_helpful: bool,
}

/// Query parameters for listing feedback.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackQuery {
    pub event_id: Uuid,
}

/// Aggregates over an event's feedback.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackStats {
    pub total_ratings: i64,
    /// Mean rating rounded to one decimal place.
    pub average_rating: f64,
    pub helpful_count: i64,
    /// Share of helpful feedback, rounded to a whole percent.
    pub helpful_percentage: i64,
}

/// Response for listing feedback.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackListResponse {
    pub feedback: Vec<FeedbackItem>,
    pub stats: FeedbackStats,
}
