//! Recurring pipeline runs.
//!
//! Every tick is an independent invocation. A failed run is logged and the
//! scheduler keeps going.

use std::sync::Arc;

use otd_core::AppConfig;
use otd_pipeline::handle_invocation;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// Builds and starts a scheduler that runs the pipeline on `cron`.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive for
/// as long as runs should happen.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if `cron` is not a valid expression, or the
/// scheduler cannot be initialised or started.
pub async fn build_scheduler(
    cron: &str,
    config: Arc<AppConfig>,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;
    register_pipeline_job(&scheduler, cron, config).await?;
    scheduler.start().await?;
    Ok(scheduler)
}

async fn register_pipeline_job(
    scheduler: &JobScheduler,
    cron: &str,
    config: Arc<AppConfig>,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async(cron, move |_uuid, _lock| {
        let config = Arc::clone(&config);

        Box::pin(async move {
            tracing::info!("scheduler: starting pipeline run");
            let response = handle_invocation(&config).await;
            if response.is_success() {
                tracing::info!(body = %response.body, "scheduler: pipeline run complete");
            } else {
                tracing::warn!(
                    status = response.status_code,
                    body = %response.body,
                    "scheduler: pipeline run failed; waiting for next tick"
                );
            }
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}
