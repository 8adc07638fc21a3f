//! Session cookie authentication extractors.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use domain::models::User;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::auth::AuthService;
use crate::services::cookies::CookieHelper;

/// The signed-in user behind the request's session cookie.
///
/// Handlers behind `require_session` get the user the middleware already
/// resolved; elsewhere the cookie is looked up directly.
#[derive(Debug, Clone)]
pub struct SessionUser(pub User);

impl SessionUser {
    /// Resolve the session cookie of a request, if any.
    pub async fn resolve(parts: &Parts, state: &AppState) -> Result<Option<User>, ApiError> {
        let cookies = CookieHelper::new(state.config.session.clone());
        let Some(token) = cookies.extract_token(&parts.headers) else {
            return Ok(None);
        };

        let auth = AuthService::new(state.pool.clone(), state.config.session.ttl_secs);
        auth.authenticate(token).await.map_err(|e| {
            tracing::error!(error = %e, "Session lookup failed");
            ApiError::Internal("Authentication service unavailable".to_string())
        })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<SessionUser>() {
            return Ok(user.clone());
        }

        Self::resolve(parts, state)
            .await?
            .map(SessionUser)
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}

/// Signed-in ADMIN. Other roles get 403.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let SessionUser(user) = SessionUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            return Err(ApiError::Forbidden("Admin access required".to_string()));
        }
        Ok(AdminUser(user))
    }
}
