use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, patch, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, require_admin, require_session,
    security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{
    admin, admin_users, auth, events, feedback, health, notifications, profile, registrations,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.security.cors_origins.is_empty() {
        // Development: any origin, no credentials
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::PATCH,
                axum::http::Method::DELETE,
            ])
            .allow_headers([axum::http::header::CONTENT_TYPE])
            .allow_credentials(true)
    }
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let rate_limiter = (config.security.rate_limit_per_minute > 0).then(|| {
        Arc::new(RateLimiterState::new(
            config.security.rate_limit_per_minute,
        ))
    });

    let state = AppState {
        pool,
        config: config.clone(),
        rate_limiter,
    };

    // Signed-in users. Layers run bottom-up: session first, then rate limiting.
    let session_routes = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route(
            "/api/events",
            get(events::list_events).post(events::create_event),
        )
        .route(
            "/api/events/:id",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route("/api/events/:id/attendees", get(events::list_attendees))
        .route("/api/organizer/events", get(events::list_my_events))
        .route("/api/registration", get(registrations::list_mine))
        .route(
            "/api/registration/:event_id",
            post(registrations::register).delete(registrations::cancel),
        )
        .route(
            "/api/notifications",
            get(notifications::list_notifications)
                .post(notifications::create_notification)
                .patch(notifications::mark_read)
                .put(notifications::mark_all_read),
        )
        .route(
            "/api/notifications/unread-count",
            get(notifications::unread_count),
        )
        .route(
            "/api/feedback",
            get(feedback::list_feedback).post(feedback::create_feedback),
        )
        .route(
            "/api/profile",
            get(profile::get_profile).patch(profile::update_profile),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    let admin_routes = Router::new()
        .route("/api/events/:id/approve", post(events::approve_event))
        .route("/api/events/:id/reject", post(events::reject_event))
        .route("/api/events/:id/status", patch(events::set_event_status))
        .route("/api/admin/events", get(events::admin_list_events))
        .route("/api/admin/stats", get(admin::get_admin_stats))
        .route(
            "/api/admin/users",
            get(admin_users::list_users)
                .post(admin_users::create_user)
                .patch(admin_users::update_user)
                .delete(admin_users::delete_user),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/signin", post(auth::signin))
        .route("/api/auth/signout", post(auth::signout));

    Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .merge(admin_routes)
        // Global middleware (bottom layers run first)
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors_layer(&config))
        .with_state(state)
}
