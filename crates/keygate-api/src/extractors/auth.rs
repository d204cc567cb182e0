//! `AuthUser` extractor — pulls the JWT from the Authorization header,
//! validates it, and loads the subject.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use keygate_auth::error::AuthError;
use keygate_auth::jwt::Claims;
use keygate_core::error::AppError;
use keygate_entity::user::User;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user available in handlers.
///
/// Decodes the bearer access token and re-checks that the subject still
/// exists — a valid signature over a deleted account is still unauthorized.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The authenticated user record.
    pub user: User,
    /// The validated access token claims.
    pub claims: Claims,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

        let claims = state.jwt_decoder.decode(token)?;

        let user = state
            .users
            .find_by_id(claims.user_id())
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(AuthUser { user, claims })
    }
}
