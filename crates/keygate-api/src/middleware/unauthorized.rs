//! Clears the refresh cookie on every unauthorized response.

use axum::extract::{Request, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::middleware::Next;
use axum::response::Response;

use crate::cookies;
use crate::state::AppState;

/// Appends a refresh-cookie removal to any 401 that crosses the boundary,
/// so a client's browser never retains a cookie pointing at a session the
/// server considers invalid.
pub async fn clear_stale_refresh_cookie(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    if response.status() == StatusCode::UNAUTHORIZED {
        let removal = cookies::removal_cookie(&state.config.session).to_string();
        if let Ok(value) = HeaderValue::from_str(&removal) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    response
}
