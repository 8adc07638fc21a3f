//! User and session entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::UserRole;
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
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

impl From<UserEntity> for domain::models::User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            password_hash: entity.password_hash,
            role: UserRole::from_str(&entity.role).unwrap_or_default(),
            department: entity.department,
            year: entity.year,
            bio: entity.bio,
            location: entity.location,
            website: entity.website,
            image: entity.image,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// User row joined with activity counts for the admin list.
#[derive(Debug, Clone, FromRow)]
pub struct UserWithCountsEntity {
    #[sqlx(flatten)]
    pub user: UserEntity,
    pub event_count: i64,
    pub registration_count: i64,
}

impl From<UserWithCountsEntity> for domain::models::user::AdminUserItem {
    fn from(entity: UserWithCountsEntity) -> Self {
        Self {
            user: domain::models::User::from(entity.user).into(),
            event_count: entity.event_count,
            registration_count: entity.registration_count,
        }
    }
}

/// Grouped count row (`key`, `count`).
#[derive(Debug, Clone, FromRow)]
pub struct GroupCountEntity {
    pub key: Option<String>,
    pub count: i64,
}

impl From<GroupCountEntity> for domain::models::user::GroupCount {
    fn from(entity: GroupCountEntity) -> Self {
        Self {
            key: entity.key,
            count: entity.count,
        }
    }
}

/// Database row mapping for the user_sessions table.
#[derive(Debug, Clone, FromRow)]
pub struct UserSessionEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}

impl UserSessionEntity {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entity(role: &str) -> UserEntity {
        UserEntity {
            id: Uuid::new_v4(),
            name: "Organizer".to_string(),
            email: "org@uni.edu".to_string(),
            password_hash: "hash".to_string(),
            role: role.to_string(),
            department: None,
            year: None,
            bio: None,
            location: None,
            website: None,
            image: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_user_entity_to_domain() {
        let user: domain::models::User = entity("EVENT_ORGANIZER").into();
        assert_eq!(user.role, UserRole::EventOrganizer);
        assert_eq!(user.email, "org@uni.edu");
    }

    #[test]
    fn test_user_with_counts_to_item() {
        let item: domain::models::user::AdminUserItem = UserWithCountsEntity {
            user: entity("ADMIN"),
            event_count: 3,
            registration_count: 7,
        }
        .into();
        assert_eq!(item.user.role, UserRole::Admin);
        assert_eq!(item.event_count, 3);
        assert_eq!(item.registration_count, 7);
    }

    #[test]
    fn test_session_expiry() {
        let now = Utc::now();
        let session = UserSessionEntity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            token_hash: "abc".to_string(),
            expires_at: now + Duration::hours(1),
            created_at: now,
            last_used_at: now,
        };
        assert!(!session.is_expired(now));
        assert!(session.is_expired(now + Duration::hours(2)));
    }
}
