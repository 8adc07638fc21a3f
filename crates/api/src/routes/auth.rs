//! Authentication route handlers.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use domain::models::user::{SignInRequest, SignUpRequest, UserResponse};
use serde::Serialize;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AppJson, SessionUser};
use crate::services::auth::AuthService;
use crate::services::cookies::CookieHelper;

/// Response for sign-up and sign-in.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: UserResponse,
    pub expires_in: i64,
}

fn services(state: &AppState) -> (AuthService, CookieHelper) {
    (
        AuthService::new(state.pool.clone(), state.config.session.ttl_secs),
        CookieHelper::new(state.config.session.clone()),
    )
}

/// Create a STUDENT account and start a session.
///
/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    AppJson(request): AppJson<SignUpRequest>,
) -> Result<(StatusCode, HeaderMap, Json<SessionResponse>), ApiError> {
    request.validate()?;

    let (auth, cookies) = services(&state);
    let result = auth.register(&request).await?;

    let mut headers = HeaderMap::new();
    cookies.add_session_cookie(&mut headers, &result.session_token);

    Ok((
        StatusCode::CREATED,
        headers,
        Json(SessionResponse {
            user: result.user.into(),
            expires_in: state.config.session.ttl_secs,
        }),
    ))
}

/// Start a session with email and password.
///
/// POST /api/auth/signin
pub async fn signin(
    State(state): State<AppState>,
    AppJson(request): AppJson<SignInRequest>,
) -> Result<(HeaderMap, Json<SessionResponse>), ApiError> {
    request.validate()?;

    let (auth, cookies) = services(&state);
    let result = auth.login(&request.email, &request.password).await?;

    let mut headers = HeaderMap::new();
    cookies.add_session_cookie(&mut headers, &result.session_token);

    Ok((
        headers,
        Json(SessionResponse {
            user: result.user.into(),
            expires_in: state.config.session.ttl_secs,
        }),
    ))
}

/// End the current session and clear the cookie.
///
/// POST /api/auth/signout
pub async fn signout(
    State(state): State<AppState>,
    request_headers: HeaderMap,
) -> Result<(StatusCode, HeaderMap), ApiError> {
    let (auth, cookies) = services(&state);

    if let Some(token) = cookies.extract_token(&request_headers) {
        auth.logout(token).await?;
        info!("User signed out");
    }

    let mut headers = HeaderMap::new();
    cookies.add_clear_cookie(&mut headers);
    Ok((StatusCode::NO_CONTENT, headers))
}

/// The signed-in user.
///
/// GET /api/auth/me
pub async fn me(SessionUser(user): SessionUser) -> Json<UserResponse> {
    Json(user.into())
}
