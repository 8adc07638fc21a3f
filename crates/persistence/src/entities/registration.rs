//! Registration entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::registration::{Attendee, MyRegistration, RegisteredEvent};
use domain::models::{ApprovalStatus, RegistrationStatus};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

fn parse_status(value: &str) -> RegistrationStatus {
    RegistrationStatus::from_str(value).unwrap_or(RegistrationStatus::Pending)
}

/// Database row mapping for the registrations table.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RegistrationEntity {
    pub fn status(&self) -> RegistrationStatus {
        parse_status(&self.status)
    }
}

impl From<RegistrationEntity> for domain::models::Registration {
    fn from(entity: RegistrationEntity) -> Self {
        Self {
            status: parse_status(&entity.status),
            id: entity.id,
            event_id: entity.event_id,
            user_id: entity.user_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Registration joined with its event.
#[derive(Debug, Clone, FromRow)]
pub struct MyRegistrationEntity {
    pub id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub event_id: Uuid,
    pub event_title: String,
    pub event_date: DateTime<Utc>,
    pub event_start_time: String,
    pub event_location: String,
    pub event_category: String,
    pub event_approval_status: String,
}

impl From<MyRegistrationEntity> for MyRegistration {
    fn from(entity: MyRegistrationEntity) -> Self {
        Self {
            id: entity.id,
            status: parse_status(&entity.status),
            created_at: entity.created_at,
            event: RegisteredEvent {
                id: entity.event_id,
                title: entity.event_title,
                date: entity.event_date,
                start_time: entity.event_start_time,
                location: entity.event_location,
                category: entity.event_category,
                approval_status: ApprovalStatus::from_str(&entity.event_approval_status)
                    .unwrap_or_default(),
            },
        }
    }
}

/// Registration joined with the registrant.
#[derive(Debug, Clone, FromRow)]
pub struct AttendeeEntity {
    pub registration_id: Uuid,
    pub status: String,
    pub registered_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub year: Option<i32>,
}

impl From<AttendeeEntity> for Attendee {
    fn from(entity: AttendeeEntity) -> Self {
        Self {
            registration_id: entity.registration_id,
            status: parse_status(&entity.status),
            registered_at: entity.registered_at,
            user_id: entity.user_id,
            name: entity.name,
            email: entity.email,
            department: entity.department,
            year: entity.year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_entity_to_domain() {
        let entity = RegistrationEntity {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            status: "WAITLISTED".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(entity.status(), RegistrationStatus::Waitlisted);
        let registration: domain::models::Registration = entity.into();
        assert_eq!(registration.status, RegistrationStatus::Waitlisted);
    }

    #[test]
    fn test_my_registration_entity_to_domain() {
        let entity = MyRegistrationEntity {
            id: Uuid::new_v4(),
            status: "CANCELLED".to_string(),
            created_at: Utc::now(),
            event_id: Uuid::new_v4(),
            event_title: "Film Night".to_string(),
            event_date: Utc::now(),
            event_start_time: "19:00".to_string(),
            event_location: "Auditorium".to_string(),
            event_category: "Art".to_string(),
            event_approval_status: "PENDING".to_string(),
        };
        let mine: MyRegistration = entity.into();
        assert_eq!(mine.status, RegistrationStatus::Cancelled);
        assert_eq!(mine.event.title, "Film Night");
        assert_eq!(mine.event.approval_status, ApprovalStatus::Pending);
    }
}
