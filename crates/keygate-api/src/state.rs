//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use keygate_auth::jwt::JwtDecoder;
use keygate_auth::session::SessionManager;
use keygate_core::config::AppConfig;
use keygate_database::repositories::{RefreshTokenRepository, UserRepository};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// User repository.
    pub users: Arc<UserRepository>,
    /// Refresh token repository.
    pub tokens: Arc<RefreshTokenRepository>,
    /// JWT access token validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Session flow orchestrator.
    pub session_manager: Arc<SessionManager>,
}
