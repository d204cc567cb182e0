//! Session flow orchestration — login, federated login, refresh, register.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use keygate_core::config::{AuthConfig, FederationConfig, SessionConfig};
use keygate_database::repositories::{RefreshTokenRepository, UserRepository};
use keygate_entity::user::{CreateUser, FederatedProfile, User};

use crate::error::AuthError;
use crate::password::{PasswordHasher, PasswordValidator};
use crate::token::{TokenIssuer, TokenPair};

/// Result of a successful login, federated login, or refresh.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    /// The authenticated user.
    pub user: User,
    /// Freshly issued token pair.
    pub tokens: TokenPair,
}

/// Orchestrates the session entry flows.
///
/// Each flow is a terminal state transition: it either completes, leaving
/// exactly one new refresh record behind, or fails leaving nothing. There is
/// no in-process mutable state; concurrent callers coordinate only through
/// the store's per-record atomicity.
#[derive(Clone)]
pub struct SessionManager {
    /// User directory.
    users: Arc<UserRepository>,
    /// Refresh token persistence.
    tokens: Arc<RefreshTokenRepository>,
    /// Token pair issuer.
    issuer: Arc<TokenIssuer>,
    /// Password hasher.
    hasher: PasswordHasher,
    /// Password strength policy.
    validator: PasswordValidator,
    /// Federated identity settings.
    federation: FederationConfig,
    /// Whether a consumed refresh token is deleted on rotation.
    rotate_strict: bool,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("rotate_strict", &self.rotate_strict)
            .finish()
    }
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    pub fn new(
        users: Arc<UserRepository>,
        tokens: Arc<RefreshTokenRepository>,
        issuer: Arc<TokenIssuer>,
        auth_config: &AuthConfig,
        session_config: &SessionConfig,
        federation: FederationConfig,
    ) -> Self {
        Self {
            users,
            tokens,
            issuer,
            hasher: PasswordHasher::new(),
            validator: PasswordValidator::new(auth_config),
            federation,
            rotate_strict: session_config.rotate_strict,
        }
    }

    /// Registers a new password-based account.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<User, AuthError> {
        self.validator
            .validate(password)
            .map_err(|e| AuthError::WeakPassword(e.message))?;

        if self.users.find_by_email(email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = self.hasher.hash(password)?;
        let user = self
            .users
            .create(&CreateUser {
                email: email.to_string(),
                display_name,
                password_hash: Some(password_hash),
                google_id: None,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Performs the password login flow.
    ///
    /// An unknown email, an account without a password, and a wrong password
    /// all fail identically so the endpoint cannot be used to probe for
    /// registered addresses.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthOutcome, AuthError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let Some(hash) = user.password_hash.as_deref() else {
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(hash, password) {
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = self.issuer.issue(&user).await?;

        info!(user_id = %user.id, "Login successful");
        Ok(AuthOutcome { user, tokens })
    }

    /// Performs the federated login flow with a provider-verified profile.
    ///
    /// A profile whose email matches no account creates one (no password).
    /// A profile matching an existing account signs into it when the account
    /// already carries the provider id, or when `auto_link_accounts` is on.
    pub async fn federated_login(
        &self,
        profile: &FederatedProfile,
    ) -> Result<AuthOutcome, AuthError> {
        let email = profile.email.as_deref().ok_or(AuthError::MissingEmail)?;

        let user = match self.users.find_by_email(email).await? {
            Some(existing) => {
                let already_linked =
                    existing.google_id.as_deref() == Some(profile.provider_id.as_str());
                if !already_linked && !self.federation.auto_link_accounts {
                    warn!(
                        user_id = %existing.id,
                        provider_id = %profile.provider_id,
                        "Federated login refused: account not linked"
                    );
                    return Err(AuthError::LinkingRequired);
                }
                existing
            }
            None => {
                let created = self
                    .users
                    .create(&CreateUser {
                        email: email.to_string(),
                        display_name: profile.display_name.clone(),
                        password_hash: None,
                        google_id: Some(profile.provider_id.clone()),
                    })
                    .await?;
                info!(user_id = %created.id, "User created from federated profile");
                created
            }
        };

        let tokens = self.issuer.issue(&user).await?;

        info!(user_id = %user.id, "Federated login successful");
        Ok(AuthOutcome { user, tokens })
    }

    /// Performs the refresh flow.
    ///
    /// The subject id comes from whatever upstream verification admitted the
    /// caller (a still-valid access token in the HTTP layer). The presented
    /// token must match a stored record for that exact subject.
    pub async fn refresh(
        &self,
        user_id: Uuid,
        presented: Option<&str>,
    ) -> Result<AuthOutcome, AuthError> {
        let presented = presented.ok_or(AuthError::MissingToken)?;

        let record = self
            .tokens
            .find_by_user_and_token(user_id, presented)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        // The sweep removes expired records on its own schedule; one that is
        // past expiry but not yet swept is still invalid.
        if record.is_expired() {
            return Err(AuthError::InvalidToken);
        }

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let tokens = self.issuer.issue(&user).await?;

        if self.rotate_strict {
            // The new pair is already durable; a failed delete leaves the
            // old token valid until the sweep.
            if let Err(e) = self.tokens.delete_one(record.id).await {
                warn!(user_id = %user.id, error = %e, "Failed to consume rotated refresh token");
            }
        }

        info!(user_id = %user.id, "Token refreshed");
        Ok(AuthOutcome { user, tokens })
    }
}
