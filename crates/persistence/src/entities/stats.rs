//! Admin statistics entities.

use chrono::{DateTime, Utc};
use domain::models::stats::{RecentEvent, RecentUser};
use domain::models::ApprovalStatus;
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

/// Headline counters in one row.
#[derive(Debug, Clone, FromRow)]
pub struct StatsTotalsEntity {
    pub students: i64,
    pub events: i64,
    pub organizers: i64,
    pub pending_approvals: i64,
}

impl From<StatsTotalsEntity> for domain::models::stats::StatsTotals {
    fn from(entity: StatsTotalsEntity) -> Self {
        Self {
            students: entity.students,
            events: entity.events,
            organizers: entity.organizers,
            pending_approvals: entity.pending_approvals,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct RecentEventEntity {
    pub id: Uuid,
    pub title: String,
    pub date: DateTime<Utc>,
    pub category: String,
    pub approval_status: String,
    pub created_at: DateTime<Utc>,
}

impl From<RecentEventEntity> for RecentEvent {
    fn from(entity: RecentEventEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            date: entity.date,
            category: entity.category,
            approval_status: ApprovalStatus::from_str(&entity.approval_status)
                .unwrap_or_default(),
            created_at: entity.created_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct RecentUserEntity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<RecentUserEntity> for RecentUser {
    fn from(entity: RecentUserEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            department: entity.department,
            created_at: entity.created_at,
        }
    }
}
