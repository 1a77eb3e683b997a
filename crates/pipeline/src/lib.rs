//! The scrape pipeline: sweep expired records, ask the search model for
//! hackathons, parse and dedupe the answer, and store what is new.
//!
//! - [`sweeper`]: removes records whose end date has passed.
//! - [`orchestrator`]: one full scrape cycle, shared by the scheduler and
//!   the on-demand endpoint.

pub mod orchestrator;
pub mod sweeper;

pub use orchestrator::{ScrapeOrchestrator, ScrapeOutcome, ScrapeStage};
pub use sweeper::{sweep_expired, SweepOutcome};
