//! User and profile domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::pagination::PageInfo;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    #[default]
    Student,
    EventOrganizer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Student => "STUDENT",
            UserRole::EventOrganizer => "EVENT_ORGANIZER",
        }
    }

    /// Whether this role may publish notifications to other users.
    pub fn can_send_notifications(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::EventOrganizer)
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Ok(UserRole::Admin),
            "STUDENT" => Ok(UserRole::Student),
            "EVENT_ORGANIZER" => Ok(UserRole::EventOrganizer),
            _ => Err(format!("Invalid user role: {}", s)),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a user account in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)] // Never serialize password hash to API responses
    pub password_hash: String,
    pub role: UserRole,
    pub department: Option<String>,
    pub year: Option<i32>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub image: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Minimal user reference embedded in other responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub department: Option<String>,
    pub year: Option<i32>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub image: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            department: user.department,
            year: user.year,
            bio: user.bio,
            location: user.location,
            website: user.website,
            image: user.image,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

// ============================================================================
// Auth DTOs
// ============================================================================

/// Request payload for self sign-up. New accounts are always students.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[validate(custom(function = "shared::validation::validate_display_name"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    #[validate(length(max = 255, message = "Email must be at most 255 characters"))]
    pub email: String,

    #[validate(custom(function = "shared::validation::validate_password_strength"))]
    pub password: String,

    #[validate(length(min = 2, max = 100, message = "Department must be 2-100 characters"))]
    pub department: Option<String>,

    #[validate(range(min = 1, max = 8, message = "Year must be between 1 and 8"))]
    pub year: Option<i32>,
}

/// Request payload for sign-in.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// Profile DTOs
// ============================================================================

/// Partial profile update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(custom(function = "shared::validation::validate_display_name"))]
    pub name: Option<String>,

    #[validate(length(max = 160, message = "Bio must be at most 160 characters"))]
    pub bio: Option<String>,

    #[validate(length(min = 2, max = 100, message = "Location must be at least 2 characters"))]
    pub location: Option<String>,

    #[validate(custom(function = "shared::validation::validate_website"))]
    pub website: Option<String>,

    #[validate(length(min = 2, max = 100, message = "Department must be at least 2 characters"))]
    pub department: Option<String>,

    #[validate(range(min = 1, max = 8, message = "Year must be between 1 and 8"))]
    pub year: Option<i32>,

    #[validate(url(message = "Image must be a valid URL"))]
    pub image: Option<String>,
}

impl UpdateProfileRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.bio.is_none()
            && self.location.is_none()
            && self.website.is_none()
            && self.department.is_none()
            && self.year.is_none()
            && self.image.is_none()
    }
}

// ============================================================================
// Admin user management DTOs
// ============================================================================

/// Request payload for an admin creating an account with any role.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(custom(function = "shared::validation::validate_display_name"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    #[validate(length(max = 255, message = "Email must be at most 255 characters"))]
    pub email: String,

    #[validate(custom(function = "shared::validation::validate_password_strength"))]
    pub password: String,

    #[serde(default)]
    pub role: UserRole,

    #[validate(length(min = 2, max = 100, message = "Department must be 2-100 characters"))]
    pub department: Option<String>,

    #[validate(range(min = 1, max = 8, message = "Year must be between 1 and 8"))]
    pub year: Option<i32>,
}

/// Request payload for an admin updating an account.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub id: Uuid,

    pub role: Option<UserRole>,

    #[validate(length(min = 2, max = 100, message = "Department must be 2-100 characters"))]
    pub department: Option<String>,

    #[validate(range(min = 1, max = 8, message = "Year must be between 1 and 8"))]
    pub year: Option<i32>,

    pub is_active: Option<bool>,
}

/// Query parameters for deleting a user.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteUserQuery {
    pub id: Uuid,
}

/// Sortable columns for the admin user list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserSortField {
    #[default]
    CreatedAt,
    Name,
    Email,
    Role,
    Department,
}

impl UserSortField {
    /// Parses a `sortBy` value; anything outside the whitelist sorts by creation time.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value {
            Some("name") => UserSortField::Name,
            Some("email") => UserSortField::Email,
            Some("role") => UserSortField::Role,
            Some("department") => UserSortField::Department,
            _ => UserSortField::CreatedAt,
        }
    }

    pub fn as_sql_column(&self) -> &'static str {
        match self {
            UserSortField::CreatedAt => "u.created_at",
            UserSortField::Name => "u.name",
            UserSortField::Email => "u.email",
            UserSortField::Role => "u.role",
            UserSortField::Department => "u.department",
        }
    }
}

/// Sort order for queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Query parameters for the admin user list.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersQuery {
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: Option<u32>,
    #[validate(range(min = 1, message = "Limit must be at least 1"))]
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub role: Option<UserRole>,
    pub department: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

/// Resolved filters handed to the user repository.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub search: Option<String>,
    pub role: Option<UserRole>,
    pub department: Option<String>,
    pub sort_by: UserSortField,
    pub sort_order: SortOrder,
}

impl From<&ListUsersQuery> for UserFilter {
    fn from(query: &ListUsersQuery) -> Self {
        Self {
            search: query
                .search
                .as_ref()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            role: query.role,
            department: query
                .department
                .as_ref()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            sort_by: UserSortField::parse_or_default(query.sort_by.as_deref()),
            sort_order: query.sort_order.unwrap_or_default(),
        }
    }
}

/// Admin list row: a user with activity counts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserItem {
    #[serde(flatten)]
    pub user: UserResponse,
    pub event_count: i64,
    pub registration_count: i64,
}

/// Number of rows sharing a grouping key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroupCount {
    pub key: Option<String>,
    pub count: i64,
}

/// Breakdown of the user base.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatistics {
    pub departments: Vec<GroupCount>,
    pub roles: Vec<GroupCount>,
}

/// Response for the admin user list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersResponse {
    pub users: Vec<AdminUserItem>,
    #[serde(flatten)]
    pub page: PageInfo,
    pub stats: UserStatistics,
}
