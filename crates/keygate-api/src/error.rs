//! Maps domain errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use keygate_auth::error::AuthError;
use keygate_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Boundary error wrapping either an authentication failure or an
/// application error, so handlers can use `?` on both.
#[derive(Debug)]
pub enum ApiError {
    /// A session-flow failure.
    Auth(AuthError),
    /// An application/infrastructure failure.
    App(AppError),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::Auth(err)
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::App(AppError::validation(err.to_string()))
    }
}

impl ApiError {
    /// Resolves the HTTP status, error code, and user-visible message.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            Self::Auth(err) if err.is_unauthorized() => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", err.to_string())
            }
            Self::Auth(AuthError::MissingEmail) => {
                // A provider handing over a profile without an email is an
                // integration fault, not a client mistake.
                tracing::error!(error = %AuthError::MissingEmail, "Federated profile without email");
                internal_parts()
            }
            Self::Auth(err @ (AuthError::LinkingRequired | AuthError::EmailTaken)) => {
                (StatusCode::CONFLICT, "CONFLICT", err.to_string())
            }
            Self::Auth(AuthError::WeakPassword(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            Self::Auth(AuthError::Store(app)) | Self::App(app) => app_parts(app),
            // Remaining Auth variants are all covered by is_unauthorized above.
            Self::Auth(err) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", err.to_string()),
        }
    }
}

fn app_parts(err: &AppError) -> (StatusCode, &'static str, String) {
    match err.kind {
        ErrorKind::Validation => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            err.message.clone(),
        ),
        ErrorKind::Unauthorized => (
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            err.message.clone(),
        ),
        ErrorKind::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN", err.message.clone()),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", err.message.clone()),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT", err.message.clone()),
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization => {
            tracing::error!(error = %err, "Internal server error");
            internal_parts()
        }
    }
}

fn internal_parts() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "Internal server error".to_string(),
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = self.parts();

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
