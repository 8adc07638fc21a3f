//! Session cookie helpers.
//!
//! Builds, reads and clears the httpOnly cookie that carries the session token.

use axum::http::{header::SET_COOKIE, HeaderMap, HeaderValue};

use crate::config::SessionConfig;

/// Cookie helper for the session cookie.
#[derive(Debug, Clone)]
pub struct CookieHelper {
    config: SessionConfig,
}

impl CookieHelper {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Name of the session cookie.
    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// Build a Set-Cookie value holding `token` for the session lifetime.
    pub fn build_session_cookie(&self, token: &str) -> String {
        let cookie = format!(
            "{}={}; Path=/; Max-Age={}",
            self.config.cookie_name, token, self.config.ttl_secs
        );
        self.with_attributes(cookie)
    }

    /// Build a Set-Cookie value that removes the session cookie.
    pub fn build_clear_cookie(&self) -> String {
        let cookie = format!(
            "{}=; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
            self.config.cookie_name
        );
        self.with_attributes(cookie)
    }

    /// Append the session cookie to response headers.
    pub fn add_session_cookie(&self, headers: &mut HeaderMap, token: &str) {
        if let Ok(value) = HeaderValue::from_str(&self.build_session_cookie(token)) {
            headers.append(SET_COOKIE, value);
        }
    }

    /// Append a clearing cookie to response headers.
    pub fn add_clear_cookie(&self, headers: &mut HeaderMap) {
        if let Ok(value) = HeaderValue::from_str(&self.build_clear_cookie()) {
            headers.append(SET_COOKIE, value);
        }
    }

    /// Read the session token from request headers.
    pub fn extract_token<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        extract_cookie(headers, &self.config.cookie_name)
    }

    fn with_attributes(&self, mut cookie: String) -> String {
        cookie.push_str("; HttpOnly");

        if self.config.secure {
            cookie.push_str("; Secure");
        }

        cookie.push_str(&format!("; SameSite={}", self.config.same_site));

        if !self.config.domain.is_empty() {
            cookie.push_str(&format!("; Domain={}", self.config.domain));
        }

        cookie
    }
}

/// Extract a cookie value by name from every Cookie header of a request.
pub fn extract_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(axum::http::header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|cookie_header| cookie_header.split(';'))
        .map(|s| s.trim())
        .find_map(|cookie| {
            let (cookie_name, cookie_value) = cookie.split_once('=')?;
            (cookie_name == name && !cookie_value.is_empty()).then_some(cookie_value)
        })
}
