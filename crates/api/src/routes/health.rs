use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::background::{JobState, SCRAPE_JOB_ID};
use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// State of the periodic scrape job; `null` when it is not registered.
    pub scrape_job: Option<JobState>,
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = hackradar_db::health_check(&state.pool).await.is_ok();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        scrape_job: state.scheduler.state(SCRAPE_JOB_ID),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
