//! Event entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::{ApprovalStatus, EventType};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

/// Column list shared by every events query.
pub const EVENT_COLUMNS: &str = r#"
    e.id, e.title, e.description, e.date, e.start_time, e.end_time, e.location, e.venue,
    e.category, e.department, e.tags, e.images, e.contact_email, e.contact_phone,
    e.event_type, e.is_public, e.requires_approval, e.allow_feedback, e.featured,
    e.capacity, e.registration_deadline, e.approval_status, e.created_by_id,
    e.created_at, e.updated_at
"#;

/// Database row mapping for the events table.
#[derive(Debug, Clone, FromRow)]
pub struct EventEntity {
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
    pub event_type: String,
    pub is_public: bool,
    pub requires_approval: bool,
    pub allow_feedback: bool,
    pub featured: bool,
    pub capacity: i32,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub approval_status: String,
    pub created_by_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventEntity> for domain::models::Event {
    fn from(entity: EventEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            date: entity.date,
            start_time: entity.start_time,
            end_time: entity.end_time,
            location: entity.location,
            venue: entity.venue,
            category: entity.category,
            department: entity.department,
            tags: entity.tags,
            images: entity.images,
            contact_email: entity.contact_email,
            contact_phone: entity.contact_phone,
            event_type: EventType::from_str(&entity.event_type).unwrap_or_default(),
            is_public: entity.is_public,
            requires_approval: entity.requires_approval,
            allow_feedback: entity.allow_feedback,
            featured: entity.featured,
            capacity: entity.capacity,
            registration_deadline: entity.registration_deadline,
            approval_status: ApprovalStatus::from_str(&entity.approval_status)
                .unwrap_or_default(),
            created_by_id: entity.created_by_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Event row with registration counts.
#[derive(Debug, Clone, FromRow)]
pub struct EventWithCountsEntity {
    #[sqlx(flatten)]
    pub event: EventEntity,
    pub confirmed_count: i64,
    pub waitlisted_count: i64,
}

impl From<EventWithCountsEntity> for domain::models::event::EventListItem {
    fn from(entity: EventWithCountsEntity) -> Self {
        Self::new(
            entity.event.into(),
            entity.confirmed_count,
            entity.waitlisted_count,
        )
    }
}

/// Event count per category.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryCountEntity {
    pub category: String,
    pub count: i64,
}

impl From<CategoryCountEntity> for domain::models::stats::CategoryCount {
    fn from(entity: CategoryCountEntity) -> Self {
        Self {
            category: entity.category,
            count: entity.count,
        }
    }
}
