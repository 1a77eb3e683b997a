#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use hackradar_api::background::{register_scrape_job, JobScheduler};
use hackradar_api::config::{ScrapeConfig, ServerConfig};
use hackradar_api::router::build_app_router;
use hackradar_api::state::AppState;
use hackradar_core::hackathon::{HackathonCandidate, SOURCE_TAG};
use hackradar_db::models::hackathon::Hackathon;
use hackradar_db::repositories::HackathonRepo;
use hackradar_pipeline::ScrapeOrchestrator;
use hackradar_search::{SearchBackend, SearchError};

/// Search backend that answers every prompt with the same canned result.
pub struct CannedSearch(pub Result<String, u16>);

#[async_trait]
impl SearchBackend for CannedSearch {
    async fn search(&self, _prompt: &str) -> Result<String, SearchError> {
        match &self.0 {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(SearchError::ApiError {
                status: *status,
                body: "upstream unavailable".to_string(),
            }),
        }
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        scrape: ScrapeConfig::default(),
    }
}

/// Full application router whose search backend returns an empty array.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, Ok("[]".to_string()))
}

/// Full application router whose search backend returns `answer`.
pub fn build_test_app_with(pool: PgPool, answer: Result<String, u16>) -> Router {
    let config = test_config();
    let search: Arc<dyn SearchBackend> = Arc::new(CannedSearch(answer));
    let state = AppState {
        orchestrator: ScrapeOrchestrator::new(pool.clone(), search),
        pool,
        config: Arc::new(config.clone()),
        scheduler: Arc::new(JobScheduler::new()),
    };
    build_app_router(state, &config)
}

/// Full application router with the scrape job registered. The job's first
/// run is an hour away, so it stays idle for the duration of a test.
pub fn build_test_app_with_scrape_job(pool: PgPool) -> Router {
    let mut config = test_config();
    config.scrape.initial_delay = Duration::from_secs(3600);

    let search: Arc<dyn SearchBackend> = Arc::new(CannedSearch(Ok("[]".to_string())));
    let orchestrator = ScrapeOrchestrator::new(pool.clone(), search);
    let scheduler = Arc::new(JobScheduler::new());
    register_scrape_job(&scheduler, orchestrator.clone(), &config.scrape);

    let state = AppState {
        orchestrator,
        pool,
        config: Arc::new(config.clone()),
        scheduler,
    };
    build_app_router(state, &config)
}

/// Insert one hackathon directly through the repository.
pub async fn seed(pool: &PgPool, title: &str, end_date: &str) -> Hackathon {
    let candidate = HackathonCandidate {
        title: title.to_string(),
        end_date: end_date.to_string(),
        website_url: format!("https://{}.example.com", title.to_lowercase().replace(' ', "-")),
        platform: "devfolio".to_string(),
        status: "open".to_string(),
        description: Some("Build something".to_string()),
        organizer: None,
        prize_pool: None,
        eligibility: None,
        tags: vec!["ai".to_string()],
        scraped_at: Utc::now(),
        source: SOURCE_TAG.to_string(),
    };
    HackathonRepo::insert_many(pool, &[candidate])
        .await
        .unwrap()
        .remove(0)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::post(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST an already url-encoded form body.
pub async fn post_form(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// `Location` header of a redirect response.
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get("location")
        .expect("redirect without Location header")
        .to_str()
        .unwrap()
}
