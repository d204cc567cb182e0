//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use keygate_entity::user::FederatedProfile;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Password confirmation.
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
    /// Display name.
    pub display_name: Option<String>,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Verified federated profile, delivered by the upstream OAuth gateway
/// after it has completed the authorization-code exchange.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FederatedLoginRequest {
    /// Provider-side user identifier.
    #[validate(length(min = 1, message = "Provider id is required"))]
    pub provider_id: String,
    /// Primary email, if the provider shared one.
    pub email: Option<String>,
    /// Display name, if the provider shared one.
    pub display_name: Option<String>,
}

/// Profile update request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// New display name.
    pub display_name: Option<String>,
}

impl From<FederatedLoginRequest> for FederatedProfile {
    fn from(req: FederatedLoginRequest) -> Self {
        Self {
            provider_id: req.provider_id,
            email: req.email,
            display_name: req.display_name,
        }
    }
}
