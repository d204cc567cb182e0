//! Cron scheduler for periodic maintenance tasks.

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing::{error, info};

use keygate_core::config::WorkerConfig;
use keygate_core::error::AppError;

use crate::jobs::reclaim::TokenReclaimer;

/// Cron-based scheduler driving the expired-token sweep.
///
/// Owned by the process: started on init, shut down on graceful exit. Sweep
/// failures are logged and the next tick retries; there is no backoff.
pub struct SweepScheduler {
    /// The underlying job scheduler.
    scheduler: JobScheduler,
}

impl std::fmt::Debug for SweepScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SweepScheduler").finish()
    }
}

impl SweepScheduler {
    /// Creates a scheduler with the token sweep registered.
    pub async fn new(config: &WorkerConfig, reclaimer: TokenReclaimer) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        let job = CronJob::new_async(config.sweep_schedule.as_str(), move |_uuid, _lock| {
            let reclaimer = reclaimer.clone();
            Box::pin(async move {
                if let Err(e) = reclaimer.run_sweep().await {
                    error!(error = %e, "Refresh token sweep failed");
                }
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create sweep schedule: {e}")))?;

        scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add sweep schedule: {e}")))?;

        info!(schedule = %config.sweep_schedule, "Registered: refresh token sweep");
        Ok(Self { scheduler })
    }

    /// Starts the scheduler.
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        info!("Sweep scheduler started");
        Ok(())
    }

    /// Shuts down the scheduler.
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        info!("Sweep scheduler shut down");
        Ok(())
    }
}
