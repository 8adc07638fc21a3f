//! Admin dashboard statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::event::ApprovalStatus;

/// Headline counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatsTotals {
    pub students: i64,
    pub events: i64,
    pub organizers: i64,
    pub pending_approvals: i64,
}

/// Event count for one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// Recently created event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentEvent {
    pub id: Uuid,
    pub title: String,
    pub date: DateTime<Utc>,
    pub category: String,
    pub approval_status: ApprovalStatus,
    pub created_at: DateTime<Utc>,
}

/// Recently created account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Admin overview.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub totals: StatsTotals,
    pub events_by_category: Vec<CategoryCount>,
    pub recent_events: Vec<RecentEvent>,
    pub recent_students: Vec<RecentUser>,
    pub recent_organizers: Vec<RecentUser>,
}

/// Number of rows in each "recent" list.
pub const RECENT_LIMIT: i64 = 5;
