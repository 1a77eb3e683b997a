use std::sync::Arc;

use hackradar_pipeline::ScrapeOrchestrator;

use crate::background::JobScheduler;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: hackradar_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Scrape pipeline, shared with the background scheduler.
    pub orchestrator: ScrapeOrchestrator,
    /// Background jobs; shut down by `main` after the server stops.
    pub scheduler: Arc<JobScheduler>,
}
