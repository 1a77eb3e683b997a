use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hackradar_api::background::{register_scrape_job, JobScheduler};
use hackradar_api::config::ServerConfig;
use hackradar_api::router::build_app_router;
use hackradar_api::state::AppState;
use hackradar_pipeline::ScrapeOrchestrator;
use hackradar_search::{GeminiClient, SearchBackend, SearchConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "hackradar_api=debug,hackradar_pipeline=debug,hackradar_search=info,tower_http=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    let search_config = SearchConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        model = %search_config.model,
        scrape_interval_secs = config.scrape.interval.as_secs(),
        "Loaded configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = hackradar_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    hackradar_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    hackradar_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Scrape pipeline ---
    let search: Arc<dyn SearchBackend> = Arc::new(GeminiClient::new(search_config));
    let orchestrator = ScrapeOrchestrator::new(pool.clone(), search);

    // --- Background jobs ---
    let scheduler = Arc::new(JobScheduler::new());
    register_scrape_job(&scheduler, orchestrator.clone(), &config.scrape);
    tracing::info!(jobs = scheduler.job_count(), "Background jobs registered");

    // --- App state + router ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        orchestrator,
        scheduler: Arc::clone(&scheduler),
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(config.host.parse().expect("Invalid HOST"), config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");
    scheduler
        .shutdown(Duration::from_secs(config.shutdown_timeout_secs))
        .await;

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or SIGTERM to initiate graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
