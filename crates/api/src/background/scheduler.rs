//! Keyed periodic job scheduler.
//!
//! Each job runs once after an initial delay and then on a fixed interval.
//! Jobs are keyed by id; registering an id again replaces the old job. A run
//! is never interrupted: cancellation only takes effect between runs, and
//! [`JobScheduler::shutdown`] aborts whatever is still running once its
//! timeout elapses.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// When a job runs.
#[derive(Debug, Clone, Copy)]
pub struct JobSpec {
    /// Delay before the first run.
    pub initial_delay: Duration,
    /// Time between the starts of consecutive runs.
    pub interval: Duration,
}

/// Whether a job is currently executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Idle,
    Running,
}

struct JobHandle {
    cancel: CancellationToken,
    running: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

/// Owns the background tasks of all registered jobs.
#[derive(Default)]
pub struct JobScheduler {
    jobs: Mutex<HashMap<String, JobHandle>>,
}

impl JobScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `job` under `id` and start its timer.
    ///
    /// An existing job with the same id is cancelled first; a run it has in
    /// flight finishes, but it is never scheduled again.
    pub fn register<F, Fut>(&self, id: &str, spec: JobSpec, job: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let running = Arc::new(AtomicBool::new(false));
        let task = tokio::spawn(run_job(
            id.to_string(),
            spec,
            job,
            cancel.clone(),
            Arc::clone(&running),
        ));

        let previous = self.lock_jobs().insert(
            id.to_string(),
            JobHandle {
                cancel,
                running,
                task,
            },
        );

        if let Some(previous) = previous {
            previous.cancel.cancel();
            tracing::info!(job = id, "Replaced existing job");
        } else {
            tracing::info!(
                job = id,
                initial_delay_secs = spec.initial_delay.as_secs(),
                interval_secs = spec.interval.as_secs(),
                "Registered job"
            );
        }
    }

    /// Current state of job `id`, or `None` if no such job is registered.
    pub fn state(&self, id: &str) -> Option<JobState> {
        self.lock_jobs().get(id).map(|handle| {
            if handle.running.load(Ordering::SeqCst) {
                JobState::Running
            } else {
                JobState::Idle
            }
        })
    }

    /// Number of registered jobs.
    pub fn job_count(&self) -> usize {
        self.lock_jobs().len()
    }

    /// Stop every job and wait for its task to exit.
    ///
    /// Tasks still running after `timeout` are aborted.
    pub async fn shutdown(&self, timeout: Duration) {
        let jobs: Vec<(String, JobHandle)> = self.lock_jobs().drain().collect();

        for (_, handle) in &jobs {
            handle.cancel.cancel();
        }

        for (id, handle) in jobs {
            let abort = handle.task.abort_handle();
            if tokio::time::timeout(timeout, handle.task).await.is_err() {
                tracing::warn!(job = %id, "Job did not stop in time, aborting");
                abort.abort();
            }
        }

        tracing::info!("Job scheduler shut down");
    }

    fn lock_jobs(&self) -> std::sync::MutexGuard<'_, HashMap<String, JobHandle>> {
        // A panic while holding this lock cannot leave the map inconsistent.
        self.jobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

async fn run_job<F, Fut>(
    id: String,
    spec: JobSpec,
    job: F,
    cancel: CancellationToken,
    running: Arc<AtomicBool>,
) where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::select! {
        _ = cancel.cancelled() => return,
        _ = tokio::time::sleep(spec.initial_delay) => {}
    }

    let mut interval = tokio::time::interval_at(Instant::now() + spec.interval, spec.interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tracing::debug!(job = %id, "Job run starting");
        running.store(true, Ordering::SeqCst);
        job().await;
        running.store(false, Ordering::SeqCst);
        tracing::debug!(job = %id, "Job run finished");

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!(job = %id, "Job stopping");
                break;
            }
            _ = interval.tick() => {}
        }
    }
}
