//! Admin user management handlers.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::user::{
    AdminUserItem, CreateUserRequest, DeleteUserQuery, GroupCount, ListUsersQuery,
    ListUsersResponse, UpdateUserRequest, UserFilter, UserResponse, UserStatistics,
};
use domain::models::{User, UserRole};
use persistence::repositories::{UserAdminChanges, UserRepository};
use shared::pagination::{PageInfo, PageWindow};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AdminUser, AppJson, AppQuery};
use crate::services::auth::AuthService;

/// Users with activity counts, filters, sorting and group statistics.
///
/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListUsersQuery>,
) -> Result<Json<ListUsersResponse>, ApiError> {
    query.validate()?;

    let window = PageWindow::resolve(
        query.page,
        query.limit,
        state.config.limits.default_page_size,
        state.config.limits.max_page_size,
    );
    let filter = UserFilter::from(&query);
    let repo = UserRepository::new(state.pool.clone());

    let total = repo.count(&filter).await?;
    let users = repo
        .list_with_counts(&filter, window.limit(), window.offset())
        .await?
        .into_iter()
        .map(AdminUserItem::from)
        .collect();
    let departments = repo
        .count_by_department()
        .await?
        .into_iter()
        .map(GroupCount::from)
        .collect();
    let roles = repo
        .count_by_role()
        .await?
        .into_iter()
        .map(GroupCount::from)
        .collect();

    Ok(Json(ListUsersResponse {
        users,
        page: PageInfo::new(window, total),
        stats: UserStatistics { departments, roles },
    }))
}

/// Create an account with any role.
///
/// POST /api/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    AppJson(request): AppJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    request.validate()?;

    let user = AuthService::new(state.pool.clone(), state.config.session.ttl_secs)
        .create_user(&request)
        .await?;

    info!(user_id = %user.id, admin_id = %admin.id, "Admin created user");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Change role, department, year or active flag. Deactivation ends all sessions.
///
/// PATCH /api/admin/users
pub async fn update_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    AppJson(request): AppJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    request.validate()?;

    let updated: User = UserRepository::new(state.pool.clone())
        .update_by_admin(
            request.id,
            UserAdminChanges {
                role: request.role,
                department: request.department.as_deref(),
                year: request.year,
                is_active: request.is_active,
            },
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?
        .into();

    if !updated.is_active {
        let revoked = AuthService::new(state.pool.clone(), state.config.session.ttl_secs)
            .revoke_all(updated.id)
            .await?;
        info!(user_id = %updated.id, revoked, "Sessions revoked for inactive user");
    }

    info!(user_id = %updated.id, admin_id = %admin.id, "Admin updated user");
    Ok(Json(updated.into()))
}

/// Delete a non-admin account.
///
/// DELETE /api/admin/users?id=
pub async fn delete_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    AppQuery(query): AppQuery<DeleteUserQuery>,
) -> Result<StatusCode, ApiError> {
    let repo = UserRepository::new(state.pool.clone());
    let target: User = repo
        .find_by_id(query.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?
        .into();

    if target.role == UserRole::Admin {
        return Err(ApiError::Forbidden("Admin accounts cannot be deleted".to_string()));
    }

    if repo.delete(target.id).await? == 0 {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    info!(user_id = %target.id, admin_id = %admin.id, "Admin deleted user");
    Ok(StatusCode::NO_CONTENT)
}
