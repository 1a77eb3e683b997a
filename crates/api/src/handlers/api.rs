//! JSON handlers: listing, delete and on-demand scrape.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use hackradar_core::end_date::cutoff_string;
use hackradar_core::error::CoreError;
use hackradar_core::types::parse_db_id;
use hackradar_db::models::hackathon::Hackathon;
use hackradar_db::repositories::HackathonRepo;
use hackradar_pipeline::{sweep_expired, ScrapeOutcome, ScrapeStage};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/hackathons
///
/// All active hackathons as a JSON array, latest end date first. Expired
/// records are swept before listing.
pub async fn list_hackathons(State(state): State<AppState>) -> AppResult<Json<Vec<Hackathon>>> {
    let today = Utc::now().date_naive();
    sweep_expired(&state.pool, today).await;
    let hackathons = HackathonRepo::list_active(&state.pool, &cutoff_string(today)).await?;
    Ok(Json(hackathons))
}

/// Body of a successful `POST /delete/{id}`.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// POST /delete/{id}
///
/// Failures go through [`AppError`], whose body carries `"success": false`
/// next to the error message.
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let id = parse_db_id(&raw_id)?;

    if !HackathonRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound {
            entity: "Hackathon",
            id,
        }
        .into());
    }

    tracing::info!(id, "Hackathon deleted");
    Ok(Json(DeleteResponse { success: true }))
}

/// Optional body of `POST /scrape`.
#[derive(Debug, Default, Deserialize)]
pub struct ScrapeRequest {
    pub query: Option<String>,
}

/// Body of `POST /scrape` responses.
#[derive(Debug, Serialize)]
pub struct ScrapeResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<ScrapeStage>,
}

/// POST /scrape
///
/// Run one scrape cycle now, on the request task. The body may be empty or
/// `{"query": "..."}`; without a query the configured default is used.
pub async fn trigger_scrape(State(state): State<AppState>, body: Bytes) -> AppResult<Response> {
    let request: ScrapeRequest = if body.iter().all(u8::is_ascii_whitespace) {
        ScrapeRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid scrape request: {e}")))?
    };

    let scrape = &state.config.scrape;
    let query = request
        .query
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .unwrap_or_else(|| scrape.default_query.clone());

    let outcome = state.orchestrator.run(&query, scrape.limit).await;
    let (status, response) = scrape_response(outcome);
    Ok((status, Json(response)).into_response())
}

/// Map a scrape outcome onto an HTTP status and response body.
///
/// "Nothing new" is a successful cycle, distinct from a failure.
pub fn scrape_response(outcome: ScrapeOutcome) -> (StatusCode, ScrapeResponse) {
    match outcome {
        ScrapeOutcome::Inserted { count, .. } => (
            StatusCode::OK,
            ScrapeResponse {
                success: true,
                count: Some(count),
                message: Some(format!("Stored {count} new hackathons")),
                error: None,
                stage: None,
            },
        ),
        ScrapeOutcome::NoNew { .. } => (
            StatusCode::OK,
            ScrapeResponse {
                success: true,
                count: Some(0),
                message: Some("No new hackathons found".to_string()),
                error: None,
                stage: None,
            },
        ),
        ScrapeOutcome::Failed { stage, reason } => {
            let status = match stage {
                ScrapeStage::Search => StatusCode::BAD_GATEWAY,
                ScrapeStage::Lookup | ScrapeStage::Insert => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (
                status,
                ScrapeResponse {
                    success: false,
                    count: None,
                    message: None,
                    error: Some(reason),
                    stage: Some(stage),
                },
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserted_maps_to_success_with_count() {
        let (status, body) = scrape_response(ScrapeOutcome::Inserted { count: 3, parsed: 5 });
        assert_eq!(status, StatusCode::OK);
        assert!(body.success);
        assert_eq!(body.count, Some(3));
    }

    #[test]
    fn no_new_is_success_not_failure() {
        let (status, body) = scrape_response(ScrapeOutcome::NoNew { parsed: 0 });
        assert_eq!(status, StatusCode::OK);
        assert!(body.success);
        assert_eq!(body.count, Some(0));
        assert_eq!(body.message.as_deref(), Some("No new hackathons found"));
    }

    #[test]
    fn search_failure_maps_to_bad_gateway() {
        let (status, body) = scrape_response(ScrapeOutcome::Failed {
            stage: ScrapeStage::Search,
            reason: "timeout".into(),
        });
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(!body.success);
        assert_eq!(body.error.as_deref(), Some("timeout"));
        assert_eq!(body.stage, Some(ScrapeStage::Search));
    }

    #[test]
    fn store_failure_maps_to_internal_error() {
        let (status, _) = scrape_response(ScrapeOutcome::Failed {
            stage: ScrapeStage::Insert,
            reason: "pool closed".into(),
        });
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
