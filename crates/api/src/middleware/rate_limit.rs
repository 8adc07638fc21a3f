//! Rate limiting middleware.
//!
//! Per-user request quotas for authenticated routes, backed by `governor`.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter as GovRateLimiter,
};
use std::{
    collections::HashMap,
    num::NonZeroU32,
    sync::{Arc, RwLock},
};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::SessionUser;

type UserRateLimiter = GovRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

const FALLBACK_LIMIT: NonZeroU32 = match NonZeroU32::new(100) {
    Some(limit) => limit,
    None => unreachable!(),
};

/// Rate limiter state shared across all requests, one limiter per user.
pub struct RateLimiterState {
    limiters: RwLock<HashMap<Uuid, Arc<UserRateLimiter>>>,
    rate_limit_per_minute: u32,
}

impl RateLimiterState {
    pub fn new(rate_limit_per_minute: u32) -> Self {
        Self {
            limiters: RwLock::new(HashMap::new()),
            rate_limit_per_minute,
        }
    }

    fn get_or_create_limiter(&self, user_id: Uuid) -> Arc<UserRateLimiter> {
        {
            let limiters = self.limiters.read().unwrap_or_else(|e| e.into_inner());
            if let Some(limiter) = limiters.get(&user_id) {
                return limiter.clone();
            }
        }

        let mut limiters = self.limiters.write().unwrap_or_else(|e| e.into_inner());
        limiters
            .entry(user_id)
            .or_insert_with(|| {
                let quota = Quota::per_minute(
                    NonZeroU32::new(self.rate_limit_per_minute).unwrap_or(FALLBACK_LIMIT),
                );
                Arc::new(GovRateLimiter::direct(quota))
            })
            .clone()
    }

    /// Ok if the request is allowed, otherwise the Retry-After seconds.
    pub fn check(&self, user_id: Uuid) -> Result<(), u64> {
        let limiter = self.get_or_create_limiter(user_id);

        match limiter.check() {
            Ok(_) => Ok(()),
            Err(not_until) => {
                let wait_time = not_until.wait_time_from(DefaultClock::default().now());
                Err(wait_time.as_secs().max(1))
            }
        }
    }

    pub fn tracked_users(&self) -> usize {
        self.limiters.read().map(|l| l.len()).unwrap_or(0)
    }
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("tracked_users", &self.tracked_users())
            .finish()
    }
}

/// Applies the per-user quota. Must run after `require_session`.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let user_id = match req.extensions().get::<SessionUser>() {
        Some(SessionUser(user)) => user.id,
        None => return next.run(req).await,
    };

    if let Some(ref rate_limiter) = state.rate_limiter {
        if let Err(retry_after) = rate_limiter.check(user_id) {
            tracing::warn!(user_id = %user_id, retry_after, "Rate limit exceeded");
            metrics::counter!("rate_limited_requests_total").increment(1);
            return rate_limited_response(state.config.security.rate_limit_per_minute, retry_after);
        }
    }

    next.run(req).await
}

fn rate_limited_response(limit: u32, retry_after: u64) -> Response {
    let mut response = ApiError::RateLimited(format!(
        "Rate limit of {} requests/minute exceeded",
        limit
    ))
    .into_response();
    response
        .headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
    response
}
