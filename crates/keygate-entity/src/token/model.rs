//! Refresh token entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted opaque refresh token.
///
/// Records are created on every successful login, federated login, or
/// refresh, and are never mutated afterwards. They disappear either through
/// the expiry sweep or, under strict rotation, when consumed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshToken {
    /// Unique record identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// The opaque token value handed to the client.
    pub token: String,
    /// When the token was issued.
    pub created_at: DateTime<Utc>,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Check whether this token is past its expiry.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Data required to persist a new refresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRefreshToken {
    /// Owning user.
    pub user_id: Uuid,
    /// The opaque token value.
    pub token: String,
    /// Expiry timestamp.
    pub expires_at: DateTime<Utc>,
}
