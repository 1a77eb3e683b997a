pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{api, pages};
use crate::state::AppState;

/// Build the application route tree.
///
/// ```text
/// /                      active hackathons (HTML)
/// /hackathon/{id}        detail page (HTML)
/// /edit/{id}             edit form (HTML)
/// /update/{id}           save edit form (POST, redirects)
/// /delete/{id}           delete (POST, JSON)
/// /search/{id}           redirect to a web search
/// /api/hackathons        active hackathons (JSON)
/// /scrape                run a scrape cycle now (POST, JSON)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/hackathon/{id}", get(pages::view))
        .route("/edit/{id}", get(pages::edit_form))
        .route("/update/{id}", post(pages::update))
        .route("/delete/{id}", post(api::delete))
        .route("/search/{id}", get(pages::search_redirect))
        .route("/api/hackathons", get(api::list_hackathons))
        .route("/scrape", post(api::trigger_scrape))
}
