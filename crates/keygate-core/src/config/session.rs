//! Refresh session and cookie configuration.

use serde::{Deserialize, Serialize};

/// Refresh token cookie and rotation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the refresh token cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Path the refresh token cookie is scoped to.
    #[serde(default = "default_cookie_path")]
    pub cookie_path: String,
    /// Whether the refresh token cookie carries the `Secure` attribute.
    /// Disable only for local development over plain HTTP.
    #[serde(default = "default_true")]
    pub cookie_secure: bool,
    /// When true, a consumed refresh token is deleted as part of rotation,
    /// making each token single-use. The default keeps the old token valid
    /// until expiry, so two concurrent refreshes with the same token both
    /// succeed.
    #[serde(default)]
    pub rotate_strict: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            cookie_path: default_cookie_path(),
            cookie_secure: true,
            rotate_strict: false,
        }
    }
}

fn default_cookie_name() -> String {
    "refresh_token".to_string()
}

fn default_cookie_path() -> String {
    "/api/auth/refresh".to_string()
}

fn default_true() -> bool {
    true
}
