//! Authentication failure taxonomy.

use thiserror::Error;

use keygate_core::error::AppError;

/// Failures produced by the session flows.
///
/// Credential failures deliberately share one message regardless of whether
/// the email was unknown or the password wrong, so callers cannot enumerate
/// accounts. Infrastructure failures travel in the `Store` variant.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email, password-less account, or wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// The federated profile carried no email address.
    #[error("No email on federated profile")]
    MissingEmail,
    /// No refresh token was presented.
    #[error("Refresh token not found")]
    MissingToken,
    /// The presented refresh token does not match any record for the caller.
    #[error("Invalid refresh token")]
    InvalidToken,
    /// The token's subject no longer exists.
    #[error("User not found")]
    UserNotFound,
    /// An account with this email exists but is not linked to the provider.
    #[error("Account exists and requires explicit linking")]
    LinkingRequired,
    /// The new password does not meet the strength policy.
    #[error("{0}")]
    WeakPassword(String),
    /// The email is already registered.
    #[error("Email already in use")]
    EmailTaken,
    /// A storage or infrastructure failure.
    #[error(transparent)]
    Store(#[from] AppError),
}

impl AuthError {
    /// Whether this failure must surface as a generic unauthorized response.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials | Self::MissingToken | Self::InvalidToken | Self::UserNotFound
        )
    }
}
