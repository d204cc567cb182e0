//! Expired refresh token reclamation.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use keygate_core::result::AppResult;
use keygate_database::repositories::RefreshTokenRepository;

/// Deletes refresh tokens past their expiry.
#[derive(Debug, Clone)]
pub struct TokenReclaimer {
    /// Refresh token repository.
    tokens: Arc<RefreshTokenRepository>,
}

impl TokenReclaimer {
    /// Creates a new reclaimer.
    pub fn new(tokens: Arc<RefreshTokenRepository>) -> Self {
        Self { tokens }
    }

    /// Runs one sweep, returning the number of tokens removed.
    ///
    /// Zero removals is a normal, quiet outcome. Failures are the caller's
    /// to log; the next scheduled run simply retries.
    pub async fn run_sweep(&self) -> AppResult<u64> {
        let removed = self.tokens.delete_expired_before(Utc::now()).await?;

        if removed > 0 {
            info!(removed, "Cleared expired refresh tokens");
        } else {
            debug!("No expired refresh tokens to clear");
        }

        Ok(removed)
    }
}
