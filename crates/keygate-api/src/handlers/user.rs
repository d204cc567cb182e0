//! User self-service handlers.

use axum::Json;
use axum::extract::State;

use keygate_entity::user::UpdateUser;

use crate::dto::request::UpdateProfileRequest;
use crate::dto::response::UserResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/users/me
pub async fn me(auth: AuthUser) -> Json<UserResponse> {
    Json(auth.user.into())
}

/// PUT /api/users/me
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .users
        .update(&UpdateUser {
            id: auth.user.id,
            display_name: req.display_name,
        })
        .await?;

    Ok(Json(user.into()))
}
