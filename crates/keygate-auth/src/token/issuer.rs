//! Token pair issuance: one signed access token plus one persisted refresh
//! token record.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use keygate_core::config::AuthConfig;
use keygate_database::repositories::RefreshTokenRepository;
use keygate_entity::token::NewRefreshToken;
use keygate_entity::user::User;

use crate::error::AuthError;
use crate::jwt::JwtEncoder;

use super::generate_refresh_token;

/// Result of a successful token pair issuance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived signed access token.
    pub access_token: String,
    /// Long-lived opaque refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

/// Mints access/refresh token pairs.
///
/// Issuance is all-or-nothing from the caller's perspective: the signed
/// access token is only returned once the refresh record has been persisted.
/// Every call produces one new durable record; existing records are never
/// reused or updated.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    /// Access token signer.
    encoder: Arc<JwtEncoder>,
    /// Refresh token persistence.
    tokens: Arc<RefreshTokenRepository>,
    /// Refresh token TTL in days.
    refresh_ttl_days: i64,
}

impl TokenIssuer {
    /// Creates a new token issuer.
    pub fn new(
        encoder: Arc<JwtEncoder>,
        tokens: Arc<RefreshTokenRepository>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            encoder,
            tokens,
            refresh_ttl_days: config.refresh_ttl_days as i64,
        }
    }

    /// Issues a fresh token pair for the given user.
    pub async fn issue(&self, user: &User) -> Result<TokenPair, AuthError> {
        let (access_token, access_expires_at) = self.encoder.sign(user)?;

        let refresh_token = generate_refresh_token();
        let refresh_expires_at = Utc::now() + chrono::Duration::days(self.refresh_ttl_days);

        self.tokens
            .insert(&NewRefreshToken {
                user_id: user.id,
                token: refresh_token.clone(),
                expires_at: refresh_expires_at,
            })
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }
}
