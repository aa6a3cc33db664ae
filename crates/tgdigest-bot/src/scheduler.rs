//! Cron scheduler built on tokio-cron-scheduler
//!
//! Wraps the scheduler with job metadata tracking and start/stop control.
//! The bot registers exactly one job: the daily digest cycle.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{BotError, BotResult};

/// Type alias for job identifiers (same as tokio-cron-scheduler's job id)
pub type JobId = Uuid;

/// Metadata for tracking scheduled jobs
#[derive(Debug, Clone)]
pub struct JobMetadata {
    pub id: JobId,
    pub name: String,
    pub cron_expression: String,
}

/// Scheduler service managing cron-based jobs
pub struct SchedulerService {
    scheduler: Arc<Mutex<JobScheduler>>,
    jobs: Arc<RwLock<HashMap<JobId, JobMetadata>>>,
    is_running: Arc<RwLock<bool>>,
}

impl SchedulerService {
    /// Create a new scheduler service instance
    pub async fn new() -> BotResult<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| BotError::Scheduler(format!("failed to create scheduler: {e:?}")))?;

        debug!("Job scheduler created");

        Ok(SchedulerService {
            scheduler: Arc::new(Mutex::new(scheduler)),
            jobs: Arc::new(RwLock::new(HashMap::new())),
            is_running: Arc::new(RwLock::new(false)),
        })
    }

    /// Start processing scheduled jobs
    pub async fn start(&self) -> BotResult<()> {
        let mut is_running = self.is_running.write().await;

        if *is_running {
            warn!("Scheduler is already running");
            return Ok(());
        }

        let mut scheduler = self.scheduler.lock().await;
        scheduler
            .start()
            .await
            .map_err(|e| BotError::Scheduler(format!("failed to start scheduler: {e:?}")))?;

        *is_running = true;
        info!("Scheduler started");

        Ok(())
    }

    /// Stop the scheduler gracefully
    pub async fn stop(&self) -> BotResult<()> {
        let mut is_running = self.is_running.write().await;

        if !*is_running {
            warn!("Scheduler is not running");
            return Ok(());
        }

        let mut scheduler = self.scheduler.lock().await;
        scheduler
            .shutdown()
            .await
            .map_err(|e| BotError::Scheduler(format!("failed to shut down scheduler: {e:?}")))?;

        *is_running = false;
        info!("Scheduler stopped");

        Ok(())
    }

    /// Check if the scheduler is currently running
    pub async fn is_running(&self) -> bool {
        *self.is_running.read().await
    }

    /// Add a new scheduled job with a 6-field cron expression
    /// (second minute hour day month weekday).
    pub async fn add_job<F, Fut>(
        &self,
        name: String,
        cron_expression: String,
        job_fn: F,
    ) -> BotResult<JobId>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        info!(job = %name, cron = %cron_expression, "Adding scheduled job");

        let job = Job::new_async(cron_expression.as_str(), move |_uuid, _scheduler| {
            let job_fn = job_fn();
            Box::pin(async move {
                job_fn.await;
            })
        })
        .map_err(|e| BotError::Scheduler(format!("invalid cron expression: {e:?}")))?;

        let mut scheduler = self.scheduler.lock().await;
        let job_id = scheduler
            .add(job)
            .await
            .map_err(|e| BotError::Scheduler(format!("failed to add job: {e:?}")))?;

        let metadata = JobMetadata {
            id: job_id,
            name,
            cron_expression,
        };

        let mut jobs = self.jobs.write().await;
        jobs.insert(job_id, metadata);

        Ok(job_id)
    }

    /// Get the number of currently scheduled jobs
    pub async fn job_count(&self) -> usize {
        let jobs = self.jobs.read().await;
        jobs.len()
    }
}

/// Build the daily cron expression for the configured UTC hour and minute.
pub fn daily_cron_expression(hour: u8, minute: u8) -> String {
    format!("0 {} {} * * *", minute, hour)
}

/// Validate a cron expression without registering a job
pub fn validate_cron_expression(cron_expression: &str) -> bool {
    Job::new(cron_expression, |_uuid, _scheduler| {}).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_scheduler_creation() {
        let scheduler = SchedulerService::new().await.unwrap();
        assert!(!scheduler.is_running().await);
        assert_eq!(scheduler.job_count().await, 0);
    }

    #[tokio::test]
    async fn test_scheduler_start_stop() {
        let scheduler = SchedulerService::new().await.unwrap();

        assert!(scheduler.start().await.is_ok());
        assert!(scheduler.is_running().await);

        assert!(scheduler.stop().await.is_ok());
        assert!(!scheduler.is_running().await);
    }

    #[tokio::test]
    async fn test_add_job() {
        let scheduler = SchedulerService::new().await.unwrap();

        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        let job_id = scheduler
            .add_job(
                "test_job".to_string(),
                "0 0 0 * * *".to_string(),
                move || {
                    let counter = counter_clone.clone();
                    async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                    }
                },
            )
            .await;

        assert!(job_id.is_ok());
        assert_eq!(scheduler.job_count().await, 1);
    }

    #[tokio::test]
    async fn test_invalid_cron_expression() {
        let scheduler = SchedulerService::new().await.unwrap();

        let result = scheduler
            .add_job("invalid_job".to_string(), "invalid_cron".to_string(), || {
                async {}
            })
            .await;

        assert!(result.is_err());
    }

    #[test]
    fn test_daily_cron_expression() {
        assert_eq!(daily_cron_expression(23, 0), "0 0 23 * * *");
        assert_eq!(daily_cron_expression(8, 30), "0 30 8 * * *");

        // every expression the config can produce must be valid
        assert!(validate_cron_expression(&daily_cron_expression(0, 0)));
        assert!(validate_cron_expression(&daily_cron_expression(23, 59)));
    }

    #[test]
    fn test_validate_cron_expression() {
        assert!(validate_cron_expression("0 0 0 * * *"));
        assert!(validate_cron_expression("0 30 8 * * *"));

        assert!(!validate_cron_expression("invalid"));
        assert!(!validate_cron_expression("0 60 0 * * *"));
        assert!(!validate_cron_expression("0 0 25 * * *"));
    }
}
