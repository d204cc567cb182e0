//! Auth handlers — register, login, federated login, refresh.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Redirect;
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use crate::cookies;
use crate::dto::request::{FederatedLoginRequest, LoginRequest, RegisterRequest};
use crate::dto::response::{AccessTokenResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    req.validate()?;

    let user = state
        .session_manager
        .register(&req.email, &req.password, req.display_name)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AccessTokenResponse>), ApiError> {
    req.validate()?;

    let outcome = state.session_manager.login(&req.email, &req.password).await?;

    let jar = jar.add(cookies::refresh_cookie(
        &state.config.session,
        &outcome.tokens.refresh_token,
        outcome.tokens.refresh_expires_at,
    ));

    Ok((
        jar,
        Json(AccessTokenResponse {
            access_token: outcome.tokens.access_token,
        }),
    ))
}

/// POST /api/auth/federated/google
///
/// Receives the verified profile from the upstream OAuth gateway, signs the
/// user in (creating the account on first sight), and redirects back to the
/// frontend with the access token.
pub async fn federated_google(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<FederatedLoginRequest>,
) -> Result<(CookieJar, Redirect), ApiError> {
    req.validate()?;

    let outcome = state.session_manager.federated_login(&req.into()).await?;

    let jar = jar.add(cookies::refresh_cookie(
        &state.config.session,
        &outcome.tokens.refresh_token,
        outcome.tokens.refresh_expires_at,
    ));

    let url = format!(
        "{}/auth/success?accessToken={}",
        state.config.federation.frontend_url, outcome.tokens.access_token
    );

    Ok((jar, Redirect::to(&url)))
}

/// POST /api/auth/refresh
///
/// The subject id comes from the still-valid bearer token; the opaque
/// refresh token comes from the inbound cookie. On success the cookie is
/// replaced with the newly issued token.
pub async fn refresh(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<AccessTokenResponse>), ApiError> {
    let presented = jar
        .get(&state.config.session.cookie_name)
        .map(|c| c.value().to_string());

    let outcome = state
        .session_manager
        .refresh(auth.user.id, presented.as_deref())
        .await?;

    let jar = jar.add(cookies::refresh_cookie(
        &state.config.session,
        &outcome.tokens.refresh_token,
        outcome.tokens.refresh_expires_at,
    ));

    Ok((
        jar,
        Json(AccessTokenResponse {
            access_token: outcome.tokens.access_token,
        }),
    ))
}
