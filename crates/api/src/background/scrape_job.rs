//! Periodic hackathon scrape.
//!
//! Runs one scrape cycle a few seconds after startup and then every
//! `SCRAPE_INTERVAL_HOURS` (default 6). The cycle is the same
//! [`ScrapeOrchestrator::run`] the on-demand endpoint calls.

use hackradar_pipeline::{ScrapeOrchestrator, ScrapeOutcome};

use crate::background::scheduler::{JobScheduler, JobSpec};
use crate::config::ScrapeConfig;

/// Scheduler id of the scrape job. Registering it again replaces the job.
pub const SCRAPE_JOB_ID: &str = "hackathon_scraper";

/// Register the periodic scrape job on `scheduler`.
pub fn register_scrape_job(
    scheduler: &JobScheduler,
    orchestrator: ScrapeOrchestrator,
    config: &ScrapeConfig,
) {
    let spec = JobSpec {
        initial_delay: config.initial_delay,
        interval: config.interval,
    };
    let query = config.default_query.clone();
    let limit = config.limit;

    scheduler.register(SCRAPE_JOB_ID, spec, move || {
        let orchestrator = orchestrator.clone();
        let query = query.clone();
        async move {
            match orchestrator.run(&query, limit).await {
                ScrapeOutcome::Inserted { count, .. } => {
                    tracing::info!(count, "Scheduled scrape stored new hackathons");
                }
                ScrapeOutcome::NoNew { .. } => {
                    tracing::warn!("Scheduled scrape found no new hackathons");
                }
                ScrapeOutcome::Failed { stage, reason } => {
                    tracing::error!(%stage, error = %reason, "Scheduled scrape failed");
                }
            }
        }
    });
}
