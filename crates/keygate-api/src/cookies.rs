//! Refresh token cookie construction.
//!
//! The refresh token only ever travels inside an HttpOnly, strict-same-site
//! cookie scoped to the refresh endpoint. The access token is never placed
//! in a cookie.

use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, Utc};

use keygate_core::config::SessionConfig;

/// Builds the refresh token cookie for a freshly issued token.
pub fn refresh_cookie(
    config: &SessionConfig,
    token: &str,
    expires_at: DateTime<Utc>,
) -> Cookie<'static> {
    let max_age = (expires_at - Utc::now()).num_seconds().max(0);

    Cookie::build((config.cookie_name.clone(), token.to_string()))
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Strict)
        .path(config.cookie_path.clone())
        .max_age(time::Duration::seconds(max_age))
        .build()
}

/// Builds a cookie that removes any previously set refresh token.
pub fn removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), String::new()))
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Strict)
        .path(config.cookie_path.clone())
        .max_age(time::Duration::ZERO)
        .build()
}
