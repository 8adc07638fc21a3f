//! Admin dashboard handlers.

use axum::{extract::State, Json};
use domain::models::stats::{AdminStats, CategoryCount, RecentEvent, RecentUser, RECENT_LIMIT};
use domain::models::UserRole;
use persistence::repositories::StatsRepository;

use crate::app::AppState;
use crate::error::ApiError;

/// Totals, events per category and the latest events and accounts.
///
/// GET /api/admin/stats
pub async fn get_admin_stats(State(state): State<AppState>) -> Result<Json<AdminStats>, ApiError> {
    let repo = StatsRepository::new(state.pool.clone());

    let (totals, by_category, recent_events, recent_students, recent_organizers) = tokio::try_join!(
        repo.totals(),
        repo.events_by_category(),
        repo.recent_events(RECENT_LIMIT),
        repo.recent_users(UserRole::Student, RECENT_LIMIT),
        repo.recent_users(UserRole::EventOrganizer, RECENT_LIMIT),
    )?;

    Ok(Json(AdminStats {
        totals: totals.into(),
        events_by_category: by_category.into_iter().map(CategoryCount::from).collect(),
        recent_events: recent_events.into_iter().map(RecentEvent::from).collect(),
        recent_students: recent_students.into_iter().map(RecentUser::from).collect(),
        recent_organizers: recent_organizers.into_iter().map(RecentUser::from).collect(),
    }))
}
