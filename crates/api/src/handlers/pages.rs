//! HTML page handlers.
//!
//! Store failures and unknown or malformed ids never surface as error pages:
//! the user is redirected home (or back to the edit form for a failed save).

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use chrono::{Datelike, Utc};
use hackradar_core::end_date::{cutoff_string, EndDate};
use hackradar_core::error::CoreError;
use hackradar_core::hackathon::split_tags;
use hackradar_core::search_link::search_url;
use hackradar_core::types::parse_db_id;
use hackradar_db::models::hackathon::{Hackathon, UpdateHackathon};
use hackradar_db::repositories::HackathonRepo;
use hackradar_pipeline::sweep_expired;
use serde::Deserialize;

use crate::state::AppState;
use crate::views;

/// GET /
///
/// Sweep expired records, then list the rest latest end date first.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = Utc::now().date_naive();
    sweep_expired(&state.pool, today).await;

    match HackathonRepo::list_active(&state.pool, &cutoff_string(today)).await {
        Ok(hackathons) => Html(views::index_page(hackathons, None)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list hackathons");
            Html(views::index_page(Vec::new(), Some("Failed to load hackathons")))
        }
    }
}

/// GET /hackathon/{id}
pub async fn view(State(state): State<AppState>, Path(raw_id): Path<String>) -> Response {
    match load(&state, &raw_id).await {
        Some(hackathon) => Html(views::detail_page(hackathon)).into_response(),
        None => Redirect::to("/").into_response(),
    }
}

/// GET /edit/{id}
pub async fn edit_form(State(state): State<AppState>, Path(raw_id): Path<String>) -> Response {
    match load(&state, &raw_id).await {
        Some(hackathon) => Html(views::edit_page(hackathon)).into_response(),
        None => Redirect::to("/").into_response(),
    }
}

/// Form body of `POST /update/{id}`.
///
/// Blank title, url, platform, status and end date keep the stored value;
/// the other text fields are saved as typed so they can be cleared.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub organizer: Option<String>,
    pub end_date: Option<String>,
    pub registration_deadline: Option<String>,
    pub event_date: Option<String>,
    pub prize_pool: Option<String>,
    pub website_url: Option<String>,
    pub platform: Option<String>,
    pub status: Option<String>,
    pub eligibility: Option<String>,
    /// Comma-separated; left unchanged when blank.
    pub tags: Option<String>,
}

impl UpdateForm {
    /// Convert into a repository update, validating the end date.
    pub fn into_update(self) -> Result<UpdateHackathon, CoreError> {
        let end_date = match non_blank(self.end_date) {
            Some(raw) => match EndDate::parse(&raw) {
                Some(parsed) => Some(parsed.to_string()),
                None => {
                    return Err(CoreError::Validation(format!(
                        "End date must be YYYY-MM-DD or TBD, got '{raw}'"
                    )))
                }
            },
            None => None,
        };

        Ok(UpdateHackathon {
            title: non_blank(self.title),
            end_date,
            website_url: non_blank(self.website_url),
            platform: non_blank(self.platform),
            status: non_blank(self.status),
            description: trimmed(self.description),
            organizer: trimmed(self.organizer),
            registration_deadline: trimmed(self.registration_deadline),
            event_date: trimmed(self.event_date),
            prize_pool: trimmed(self.prize_pool),
            eligibility: trimmed(self.eligibility),
            tags: non_blank(self.tags).map(|t| split_tags(&t)),
        })
    }
}

/// POST /update/{id}
///
/// Redirects to the detail page on success, back to the form on failure.
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(form): Form<UpdateForm>,
) -> Redirect {
    let Ok(id) = parse_db_id(&raw_id) else {
        return Redirect::to("/");
    };
    let edit_url = format!("/edit/{id}");

    let input = match form.into_update() {
        Ok(input) => input,
        Err(e) => {
            tracing::warn!(id, error = %e, "Rejected hackathon edit");
            return Redirect::to(&edit_url);
        }
    };

    match HackathonRepo::update(&state.pool, id, &input).await {
        Ok(Some(_)) => {
            tracing::info!(id, "Hackathon updated");
            Redirect::to(&format!("/hackathon/{id}"))
        }
        Ok(None) => Redirect::to("/"),
        Err(e) => {
            tracing::error!(id, error = %e, "Failed to update hackathon");
            Redirect::to(&edit_url)
        }
    }
}

/// GET /search/{id}
///
/// Redirect to a web search for the hackathon's title, platform and the
/// current year.
pub async fn search_redirect(State(state): State<AppState>, Path(raw_id): Path<String>) -> Redirect {
    match load(&state, &raw_id).await {
        Some(h) => Redirect::to(&search_url(&h.title, &h.platform, Utc::now().year())),
        None => Redirect::to("/"),
    }
}

/// Look up a hackathon by raw path id. Malformed ids, misses and store
/// errors all yield `None`; errors are logged.
async fn load(state: &AppState, raw_id: &str) -> Option<Hackathon> {
    let id = match parse_db_id(raw_id) {
        Ok(id) => id,
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring malformed hackathon id");
            return None;
        }
    };

    match HackathonRepo::find_by_id(&state.pool, id).await {
        Ok(found) => found,
        Err(e) => {
            tracing::error!(id, error = %e, "Failed to load hackathon");
            None
        }
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    trimmed(value).filter(|v| !v.is_empty())
}
