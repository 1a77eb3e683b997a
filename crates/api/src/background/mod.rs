//! Background tasks and scheduled jobs.
//!
//! [`scheduler`] owns the timers; [`scrape_job`] wires the scrape pipeline
//! into it. All tasks stop through [`JobScheduler::shutdown`].

pub mod scheduler;
pub mod scrape_job;

pub use scheduler::{JobScheduler, JobSpec, JobState};
pub use scrape_job::{register_scrape_job, SCRAPE_JOB_ID};
