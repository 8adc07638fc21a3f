//! Event route handlers: CRUD, approval and attendee listing.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use domain::models::event::{
    AdminEventsQuery, CreateEventRequest, CreateEventResponse, EventDetailResponse, EventFilter,
    EventListItem, ListEventsQuery, ListEventsResponse, SetApprovalStatusRequest,
    UpdateEventRequest, DEADLINE_AFTER_DATE,
};
use domain::models::registration::Attendee;
use domain::models::{ApprovalStatus, Event, User, UserSummary};
use persistence::repositories::{
    EventOrder, EventRepository, RegistrationRepository, UserRepository,
};
use shared::pagination::{PageInfo, PageWindow};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AdminUser, AppJson, AppPath, AppQuery, SessionUser};
use crate::middleware::metrics::record_event_fan_out;

fn page_window(state: &AppState, page: Option<u32>, limit: Option<u32>) -> PageWindow {
    PageWindow::resolve(
        page,
        limit,
        state.config.limits.default_page_size,
        state.config.limits.max_page_size,
    )
}

/// Owners and admins may manage an event.
fn ensure_can_manage(event: &Event, user: &User) -> Result<(), ApiError> {
    if event.is_owned_by(user.id) || user.is_admin() {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "Only the event organizer or an admin can do this".to_string(),
        ))
    }
}

async fn load_event(repo: &EventRepository, id: Uuid) -> Result<Event, ApiError> {
    repo.find_by_id(id)
        .await?
        .map(Event::from)
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))
}

async fn list_page(
    state: &AppState,
    filter: EventFilter,
    order: EventOrder,
    window: PageWindow,
) -> Result<ListEventsResponse, ApiError> {
    let repo = EventRepository::new(state.pool.clone());
    let total = repo.count(&filter).await?;
    let events = repo
        .list(&filter, order, window.limit(), window.offset())
        .await?
        .into_iter()
        .map(EventListItem::from)
        .collect();

    Ok(ListEventsResponse {
        events,
        page: PageInfo::new(window, total),
    })
}

/// Create an event and notify every student.
///
/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    AppJson(request): AppJson<CreateEventRequest>,
) -> Result<(StatusCode, Json<CreateEventResponse>), ApiError> {
    request.validate()?;
    if !request.schedule_is_valid() {
        return Err(ApiError::Validation(DEADLINE_AFTER_DATE.to_string()));
    }

    let repo = EventRepository::new(state.pool.clone());
    let (event, notified) = repo.create_with_fan_out(user.id, &request).await?;
    record_event_fan_out(notified);

    info!(
        event_id = %event.id,
        created_by = %user.id,
        notified_students = notified,
        "Event created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateEventResponse {
            event: event.into(),
            notified_students: notified as i64,
        }),
    ))
}

/// Approved events, soonest first.
///
/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
    _user: SessionUser,
    AppQuery(query): AppQuery<ListEventsQuery>,
) -> Result<Json<ListEventsResponse>, ApiError> {
    query.validate()?;

    let window = page_window(&state, query.page, query.limit);
    let filter = EventFilter::public(&query, Utc::now());
    Ok(Json(list_page(&state, filter, EventOrder::Date, window).await?))
}

/// Event detail with seat counts and the caller's own registration.
///
/// Events that are not approved are only visible to their organizer and admins.
///
/// GET /api/events/:id
pub async fn get_event(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<EventDetailResponse>, ApiError> {
    let repo = EventRepository::new(state.pool.clone());
    let row = repo
        .find_with_counts(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;
    let item = EventListItem::from(row);

    if item.event.approval_status != ApprovalStatus::Approved
        && ensure_can_manage(&item.event, &user).is_err()
    {
        return Err(ApiError::NotFound("Event not found".to_string()));
    }

    let organizer = UserRepository::new(state.pool.clone())
        .find_by_id(item.event.created_by_id)
        .await?
        .map(|entity| UserSummary::from(&User::from(entity)));

    let user_registration = RegistrationRepository::new(state.pool.clone())
        .find(id, user.id)
        .await?
        .map(|r| r.status());

    Ok(Json(EventDetailResponse {
        event: item.event,
        organizer,
        confirmed_count: item.confirmed_count,
        waitlisted_count: item.waitlisted_count,
        available_seats: item.available_seats,
        user_registration,
    }))
}

/// Partial update by the organizer or an admin.
///
/// PUT /api/events/:id
pub async fn update_event(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(request): AppJson<UpdateEventRequest>,
) -> Result<Json<Event>, ApiError> {
    let repo = EventRepository::new(state.pool.clone());
    let event = load_event(&repo, id).await?;
    ensure_can_manage(&event, &user)?;

    request.validate()?;
    if !request.schedule_is_valid_for(&event) {
        return Err(ApiError::Validation(DEADLINE_AFTER_DATE.to_string()));
    }

    let updated = repo
        .update(id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    info!(event_id = %id, updated_by = %user.id, "Event updated");
    Ok(Json(updated.into()))
}

/// Delete an event with its registrations and feedback.
///
/// DELETE /api/events/:id
pub async fn delete_event(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = EventRepository::new(state.pool.clone());
    let event = load_event(&repo, id).await?;
    ensure_can_manage(&event, &user)?;

    if repo.delete(id).await? == 0 {
        return Err(ApiError::NotFound("Event not found".to_string()));
    }

    info!(event_id = %id, deleted_by = %user.id, "Event deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn set_status(
    state: &AppState,
    admin: &User,
    id: Uuid,
    status: ApprovalStatus,
) -> Result<Json<Event>, ApiError> {
    let event = EventRepository::new(state.pool.clone())
        .set_approval_status(id, status)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    info!(
        event_id = %id,
        admin_id = %admin.id,
        approval_status = status.as_str(),
        "Event approval status changed"
    );
    Ok(Json(event.into()))
}

/// POST /api/events/:id/approve
pub async fn approve_event(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Event>, ApiError> {
    set_status(&state, &admin, id, ApprovalStatus::Approved).await
}

/// POST /api/events/:id/reject
pub async fn reject_event(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Event>, ApiError> {
    set_status(&state, &admin, id, ApprovalStatus::Rejected).await
}

/// Set any approval status, including back to PENDING.
///
/// PATCH /api/events/:id/status
pub async fn set_event_status(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(request): AppJson<SetApprovalStatusRequest>,
) -> Result<Json<Event>, ApiError> {
    set_status(&state, &admin, id, request.status).await
}

/// Registrations of an event with registrant details.
///
/// GET /api/events/:id/attendees
pub async fn list_attendees(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Vec<Attendee>>, ApiError> {
    let event = load_event(&EventRepository::new(state.pool.clone()), id).await?;
    ensure_can_manage(&event, &user)?;

    let attendees = RegistrationRepository::new(state.pool.clone())
        .list_attendees(id)
        .await?
        .into_iter()
        .map(Attendee::from)
        .collect();
    Ok(Json(attendees))
}

/// The caller's own events in any approval status, newest first.
///
/// GET /api/organizer/events
pub async fn list_my_events(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    AppQuery(query): AppQuery<AdminEventsQuery>,
) -> Result<Json<ListEventsResponse>, ApiError> {
    query.validate()?;

    let window = page_window(&state, query.page, query.limit);
    let filter = EventFilter {
        approval_status: query.status,
        created_by: Some(user.id),
        ..Default::default()
    };
    Ok(Json(list_page(&state, filter, EventOrder::Newest, window).await?))
}

/// Every event, optionally filtered by approval status.
///
/// GET /api/admin/events
pub async fn admin_list_events(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<AdminEventsQuery>,
) -> Result<Json<ListEventsResponse>, ApiError> {
    query.validate()?;

    let window = page_window(&state, query.page, query.limit);
    let filter = EventFilter {
        approval_status: query.status,
        ..Default::default()
    };
    Ok(Json(list_page(&state, filter, EventOrder::Newest, window).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use domain::models::{EventType, UserRole};

    fn user(role: UserRole) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Someone".to_string(),
            email: "someone@uni.edu".to_string(),
            password_hash: String::new(),
            role,
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

    fn event_owned_by(owner: Uuid) -> Event {
        Event {
            id: Uuid::new_v4(),
            title: "Career Fair".to_string(),
            description: "Meet employers".to_string(),
            date: Utc::now() + Duration::days(7),
            start_time: "10:00".to_string(),
            end_time: None,
            location: "Main Hall".to_string(),
            venue: None,
            category: "Career".to_string(),
            department: None,
            tags: vec![],
            images: vec![],
            contact_email: None,
            contact_phone: None,
            event_type: EventType::InPerson,
            is_public: true,
            requires_approval: false,
            allow_feedback: true,
            featured: false,
            capacity: 50,
            registration_deadline: None,
            approval_status: ApprovalStatus::Pending,
            created_by_id: owner,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_can_manage() {
        let organizer = user(UserRole::EventOrganizer);
        assert!(ensure_can_manage(&event_owned_by(organizer.id), &organizer).is_ok());
    }

    #[test]
    fn test_admin_can_manage_any_event() {
        let admin = user(UserRole::Admin);
        assert!(ensure_can_manage(&event_owned_by(Uuid::new_v4()), &admin).is_ok());
    }

    #[test]
    fn test_other_users_cannot_manage() {
        let student = user(UserRole::Student);
        let organizer = user(UserRole::EventOrganizer);
        let event = event_owned_by(Uuid::new_v4());

        assert!(matches!(
            ensure_can_manage(&event, &student),
            Err(ApiError::Forbidden(_))
        ));
        assert!(matches!(
            ensure_can_manage(&event, &organizer),
            Err(ApiError::Forbidden(_))
        ));
    }
}
