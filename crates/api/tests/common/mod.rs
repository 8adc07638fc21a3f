//! Common test utilities for integration tests.
//!
//! Tests run against a real PostgreSQL database named by `TEST_DATABASE_URL`.
//! When the variable is unset every test returns early.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use campus_events_api::{app::create_app, config::Config};
use chrono::{Duration, Utc};
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::{json, Value};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::OnceLock;
use tokio::sync::{Mutex, MutexGuard};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "Campus#2024";

/// Tests in one binary share a database, so they run one at a time.
static DB_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

pub struct TestContext {
    pub pool: PgPool,
    pub app: Router,
    _guard: MutexGuard<'static, ()>,
}

/// A signed-in account.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub cookie: String,
}

/// Connect, migrate and truncate. Returns `None` without a test database.
pub async fn setup() -> Option<TestContext> {
    let Ok(database_url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return None;
    };

    let guard = DB_LOCK.get_or_init(|| Mutex::new(())).lock().await;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    persistence::db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    cleanup_all_test_data(&pool).await;

    let app = create_app(test_config(&database_url), pool.clone());
    Some(TestContext {
        pool,
        app,
        _guard: guard,
    })
}

pub fn test_config(database_url: &str) -> Config {
    Config::load_for_test(&[
        ("database.url", database_url),
        ("database.min_connections", "1"),
        ("database.max_connections", "5"),
        ("security.rate_limit_per_minute", "0"),
        ("session.secure", "false"),
        ("logging.level", "debug"),
    ])
    .expect("Failed to build test config")
}

pub async fn cleanup_all_test_data(pool: &PgPool) {
    sqlx::query(
        "TRUNCATE user_sessions, notifications, feedback, registrations, events, users CASCADE",
    )
    .execute(pool)
    .await
    .expect("Failed to clean test data");
}

/// Generate a unique email for testing.
pub fn unique_test_email() -> String {
    format!("test_{}@uni.edu", Uuid::new_v4().simple())
}

pub fn fake_name() -> String {
    Name().fake()
}

/// Send a request and return status, headers and the JSON body (`Null` when empty).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, json)
}

/// The `name=value` part of the first Set-Cookie header.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

/// Sign up a new student and keep the session cookie.
pub async fn sign_up(app: &Router) -> TestUser {
    let email = unique_test_email();
    let (status, headers, body) = send(
        app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({
            "name": fake_name(),
            "email": email,
            "password": TEST_PASSWORD,
            "department": "Computer Science",
            "year": 2
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");

    TestUser {
        id: body["user"]["id"].as_str().unwrap().parse().unwrap(),
        email,
        cookie: session_cookie(&headers).expect("signup sets a cookie"),
    }
}

/// Sign up and then switch the account to `role` directly in the database.
pub async fn sign_up_as(ctx: &TestContext, role: &str) -> TestUser {
    let user = sign_up(&ctx.app).await;
    sqlx::query("UPDATE users SET role = $1 WHERE id = $2")
        .bind(role)
        .bind(user.id)
        .execute(&ctx.pool)
        .await
        .expect("Failed to set role");
    user
}

pub async fn sign_up_admin(ctx: &TestContext) -> TestUser {
    sign_up_as(ctx, "ADMIN").await
}

pub async fn sign_up_organizer(ctx: &TestContext) -> TestUser {
    sign_up_as(ctx, "EVENT_ORGANIZER").await
}

pub fn event_payload(title: &str, capacity: i32) -> Value {
    json!({
        "title": title,
        "description": "An afternoon of talks and demos",
        "date": (Utc::now() + Duration::days(14)).to_rfc3339(),
        "startTime": "14:00",
        "endTime": "17:00",
        "location": "Main Hall",
        "category": "Technology",
        "capacity": capacity,
        "registrationDeadline": (Utc::now() + Duration::days(7)).to_rfc3339()
    })
}

/// Create an event as `owner` and return its id.
pub async fn create_event(app: &Router, owner: &TestUser, title: &str, capacity: i32) -> Uuid {
    let (status, _, body) = send(
        app,
        Method::POST,
        "/api/events",
        Some(&owner.cookie),
        Some(event_payload(title, capacity)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "event creation failed: {body}");
    body["id"].as_str().unwrap().parse().unwrap()
}

pub async fn approve_event(app: &Router, admin: &TestUser, event_id: Uuid) {
    let (status, _, body) = send(
        app,
        Method::POST,
        &format!("/api/events/{event_id}/approve"),
        Some(&admin.cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "approve failed: {body}");
}
