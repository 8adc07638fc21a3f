//! Session authentication middleware.
//!
//! `require_session` resolves the session cookie once per request and stores
//! the user in request extensions; `require_admin` additionally checks the role.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::SessionUser;

/// Resolve the session and attach the user to the request extensions.
async fn authenticate(
    req: Request<Body>,
    state: &AppState,
) -> Result<(Request<Body>, SessionUser), ApiError> {
    let (mut parts, body) = req.into_parts();
    let user = SessionUser::resolve(&parts, state)
        .await?
        .map(SessionUser)
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;
    parts.extensions.insert(user.clone());
    Ok((Request::from_parts(parts, body), user))
}

/// Reject requests without a valid session.
pub async fn require_session(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    match authenticate(req, &state).await {
        Ok((req, _)) => next.run(req).await,
        Err(e) => e.into_response(),
    }
}

/// Reject requests without an ADMIN session.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    match authenticate(req, &state).await {
        Ok((req, SessionUser(user))) if user.is_admin() => next.run(req).await,
        Ok((_, SessionUser(user))) => {
            tracing::warn!(user_id = %user.id, role = %user.role, "Admin route denied");
            ApiError::Forbidden("Admin access required".to_string()).into_response()
        }
        Err(e) => e.into_response(),
    }
}
