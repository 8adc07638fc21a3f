//! Event domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::pagination::PageInfo;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::registration::RegistrationStatus;
use super::user::UserSummary;

/// Admin-controlled lifecycle of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "PENDING",
            ApprovalStatus::Approved => "APPROVED",
            ApprovalStatus::Rejected => "REJECTED",
        }
    }
}

impl FromStr for ApprovalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(ApprovalStatus::Pending),
            "APPROVED" => Ok(ApprovalStatus::Approved),
            "REJECTED" => Ok(ApprovalStatus::Rejected),
            _ => Err(format!("Invalid approval status: {}", s)),
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How attendees take part in an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    #[default]
    InPerson,
    Online,
    Hybrid,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::InPerson => "IN_PERSON",
            EventType::Online => "ONLINE",
            EventType::Hybrid => "HYBRID",
        }
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "IN_PERSON" => Ok(EventType::InPerson),
            "ONLINE" => Ok(EventType::Online),
            "HYBRID" => Ok(EventType::Hybrid),
            _ => Err(format!("Invalid event type: {}", s)),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a campus event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub start_time: String,
    pub end_time: Option<String>,
    pub location: String,
    pub venue: Option<String>,
    pub category: String,
    pub department: Option<String>,
    pub tags: Vec<String>,
    pub images: Vec<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub event_type: EventType,
    pub is_public: bool,
    pub requires_approval: bool,
    pub allow_feedback: bool,
    pub featured: bool,
    pub capacity: i32,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub approval_status: ApprovalStatus,
    pub created_by_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Whether `user_id` created this event.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.created_by_id == user_id
    }

    /// Whether the registration deadline has passed at `now`.
    pub fn registration_closed(&self, now: DateTime<Utc>) -> bool {
        deadline_passed(self.registration_deadline, now)
    }
}

/// Whether an optional deadline lies before `now`. No deadline never closes.
pub fn deadline_passed(deadline: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    deadline.map_or(false, |d| now > d)
}

/// Seats left for CONFIRMED registrations, never negative.
pub fn available_seats(capacity: i32, confirmed: i64) -> i64 {
    (capacity as i64 - confirmed).max(0)
}

/// A registration deadline may not fall after the event itself.
pub fn schedule_is_valid(date: DateTime<Utc>, deadline: Option<DateTime<Utc>>) -> bool {
    deadline.map_or(true, |d| d <= date)
}

pub const DEADLINE_AFTER_DATE: &str = "Registration deadline must be before the event date";

// ============================================================================
// Request DTOs
// ============================================================================

/// Request payload for creating an event.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 3, max = 200, message = "Title must be 3-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 5000, message = "Description must be 1-5000 characters"))]
    pub description: String,

    pub date: DateTime<Utc>,

    #[validate(custom(function = "shared::validation::validate_time_of_day"))]
    pub start_time: String,

    #[validate(custom(function = "shared::validation::validate_time_of_day"))]
    pub end_time: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Location must be 1-200 characters"))]
    pub location: String,

    #[validate(length(max = 200, message = "Venue must be at most 200 characters"))]
    pub venue: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Category must be 1-50 characters"))]
    pub category: String,

    #[validate(length(max = 100, message = "Department must be at most 100 characters"))]
    pub department: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_tags"))]
    pub tags: Vec<String>,

    #[serde(default)]
    pub images: Vec<String>,

    #[validate(email(message = "Invalid contact email"))]
    pub contact_email: Option<String>,

    #[validate(custom(function = "shared::validation::validate_phone"))]
    pub contact_phone: Option<String>,

    #[serde(default)]
    pub event_type: EventType,

    #[serde(default = "default_true")]
    pub is_public: bool,

    #[serde(default)]
    pub requires_approval: bool,

    #[serde(default = "default_true")]
    pub allow_feedback: bool,

    #[serde(default)]
    pub featured: bool,

    #[validate(range(min = 1, message = "Capacity must be greater than 0"))]
    pub capacity: i32,

    pub registration_deadline: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl CreateEventRequest {
    pub fn schedule_is_valid(&self) -> bool {
        schedule_is_valid(self.date, self.registration_deadline)
    }
}

/// Partial event update. Approval status is not editable here.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(length(min = 3, max = 200, message = "Title must be 3-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 5000, message = "Description must be 1-5000 characters"))]
    pub description: Option<String>,

    pub date: Option<DateTime<Utc>>,

    #[validate(custom(function = "shared::validation::validate_time_of_day"))]
    pub start_time: Option<String>,

    #[validate(custom(function = "shared::validation::validate_time_of_day"))]
    pub end_time: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Location must be 1-200 characters"))]
    pub location: Option<String>,

    #[validate(length(max = 200, message = "Venue must be at most 200 characters"))]
    pub venue: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Category must be 1-50 characters"))]
    pub category: Option<String>,

    #[validate(length(max = 100, message = "Department must be at most 100 characters"))]
    pub department: Option<String>,

    #[validate(custom(function = "shared::validation::validate_tags"))]
    pub tags: Option<Vec<String>>,

    pub images: Option<Vec<String>>,

    #[validate(email(message = "Invalid contact email"))]
    pub contact_email: Option<String>,

    #[validate(custom(function = "shared::validation::validate_phone"))]
    pub contact_phone: Option<String>,

    pub event_type: Option<EventType>,

    pub is_public: Option<bool>,

    pub requires_approval: Option<bool>,

    pub allow_feedback: Option<bool>,

    pub featured: Option<bool>,

    #[validate(range(min = 1, message = "Capacity must be greater than 0"))]
    pub capacity: Option<i32>,

    pub registration_deadline: Option<DateTime<Utc>>,
}

impl UpdateEventRequest {
    /// Checks the deadline rule against the event after this update is applied.
    pub fn schedule_is_valid_for(&self, current: &Event) -> bool {
        let date = self.date.unwrap_or(current.date);
        let deadline = self.registration_deadline.or(current.registration_deadline);
        schedule_is_valid(date, deadline)
    }
}

/// Request payload for setting an event's approval status.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetApprovalStatusRequest {
    pub status: ApprovalStatus,
}

/// Query parameters for the public event list.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsQuery {
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: Option<u32>,
    #[validate(range(min = 1, message = "Limit must be at least 1"))]
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub upcoming: Option<bool>,
}

/// Query parameters for the admin event list.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdminEventsQuery {
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: Option<u32>,
    #[validate(range(min = 1, message = "Limit must be at least 1"))]
    pub limit: Option<u32>,
    pub status: Option<ApprovalStatus>,
}

/// Resolved filters handed to the event repository.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub approval_status: Option<ApprovalStatus>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub starting_after: Option<DateTime<Utc>>,
    pub created_by: Option<Uuid>,
}

impl EventFilter {
    /// Public listing: approved events only.
    pub fn public(query: &ListEventsQuery, now: DateTime<Utc>) -> Self {
        Self {
            approval_status: Some(ApprovalStatus::Approved),
            category: non_blank(query.category.as_deref()),
            search: non_blank(query.search.as_deref()),
            starting_after: query.upcoming.unwrap_or(false).then_some(now),
            created_by: None,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Event with seat counts, used in list responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventListItem {
    #[serde(flatten)]
    pub event: Event,
    pub confirmed_count: i64,
    pub waitlisted_count: i64,
    pub available_seats: i64,
}

impl EventListItem {
    pub fn new(event: Event, confirmed_count: i64, waitlisted_count: i64) -> Self {
        let available_seats = available_seats(event.capacity, confirmed_count);
        Self {
            event,
            confirmed_count,
            waitlisted_count,
            available_seats,
        }
    }
}

/// Paginated event list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsResponse {
    pub events: Vec<EventListItem>,
    #[serde(flatten)]
    pub page: PageInfo,
}

/// Full event detail.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailResponse {
    #[serde(flatten)]
    pub event: Event,
    pub organizer: Option<UserSummary>,
    pub confirmed_count: i64,
    pub waitlisted_count: i64,
    pub available_seats: i64,
    /// The caller's own registration status, if any.
    pub user_registration: Option<RegistrationStatus>,
}

/// Response for event creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventResponse {
    #[serde(flatten)]
    pub event: Event,
    /// Number of students notified about the new event.
    pub notified_students: i64,
}
