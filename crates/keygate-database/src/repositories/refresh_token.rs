//! Refresh token repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use keygate_core::error::{AppError, ErrorKind};
use keygate_core::result::AppResult;
use keygate_entity::token::{NewRefreshToken, RefreshToken};

/// Repository for persisted opaque refresh tokens.
///
/// Tokens are write-once: inserted on issuance and removed either by the
/// expiry sweep or by strict-rotation consumption. Uniqueness of the token
/// value is the issuer's responsibility (cryptographically random values),
/// not a constraint enforced here.
#[derive(Debug, Clone)]
pub struct RefreshTokenRepository {
    pool: PgPool,
}

impl RefreshTokenRepository {
    /// Create a new refresh token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new refresh token record.
    pub async fn insert(&self, data: &NewRefreshToken) -> AppResult<RefreshToken> {
        sqlx::query_as::<_, RefreshToken>(
            "INSERT INTO refresh_tokens (user_id, token, expires_at) \
             VALUES ($1, $2, $3) \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.token)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert refresh token", e)
        })
    }

    /// Find a token by owning user AND token value.
    ///
    /// Both columns must match: a token issued for one account must never
    /// resolve against another account's id claim.
    pub async fn find_by_user_and_token(
        &self,
        user_id: Uuid,
        token: &str,
    ) -> AppResult<Option<RefreshToken>> {
        sqlx::query_as::<_, RefreshToken>(
            "SELECT * FROM refresh_tokens WHERE user_id = $1 AND token = $2",
        )
        .bind(user_id)
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find refresh token", e)
        })
    }

    /// Bulk-delete all tokens that expired before the given instant.
    ///
    /// Single statement, so it is safe to run concurrently with inserts and
    /// lookups; a token expiring at the same instant may legitimately be
    /// observed as gone by an in-flight request.
    pub async fn delete_expired_before(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete expired tokens", e)
            })?;

        Ok(result.rows_affected())
    }

    /// Delete exactly one token record by its identifier.
    pub async fn delete_one(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete refresh token", e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    /// Count live token records for a user.
    pub async fn count_for_user(&self, user_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM refresh_tokens WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count refresh tokens", e)
            })
    }
}
