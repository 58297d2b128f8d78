//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, visit worker spawning, service wiring and the
//! Axum server lifecycle.

use crate::application::services::{RequestTracker, ShortUrlResolver, TrackingRedirectAction};
use crate::config::Config;
use crate::domain::repositories::ShortUrlRepository;
use crate::domain::tracking::VisitTracker;
use crate::domain::visit_worker::run_visit_worker;
use crate::infrastructure::geolocation::NullGeoLocator;
use crate::infrastructure::persistence::{PgShortUrlRepository, PgVisitRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Creates the PostgreSQL pool from the pool settings in `config`.
///
/// # Errors
///
/// Returns an error if the database cannot be reached.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (schema is managed externally)
/// - Background visit worker
/// - Redirect pipeline services
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = Arc::new(connect_pool(&config).await?);
    tracing::info!("Connected to database");

    let (visit_tx, visit_rx) = mpsc::channel(config.visit_queue_capacity);

    let visit_repository = Arc::new(PgVisitRepository::new(pool.clone()));
    let worker = tokio::spawn(run_visit_worker(
        visit_rx,
        visit_repository,
        config.visit_worker_concurrency,
    ));
    tracing::info!("Visit worker started");

    let short_urls: Arc<dyn ShortUrlRepository> = Arc::new(PgShortUrlRepository::new(pool));
    let tracker: Arc<dyn VisitTracker> = Arc::new(RequestTracker::new(
        config.tracking_options(),
        Arc::new(NullGeoLocator),
        visit_tx.clone(),
    ));
    let redirect_action = Arc::new(TrackingRedirectAction::new(
        Arc::new(ShortUrlResolver::new(short_urls.clone())),
        tracker,
        config.disable_track_param.clone(),
    ));

    let state = AppState::new(
        redirect_action,
        short_urls,
        config.redirect_options(),
        config.default_domain.clone(),
        visit_tx,
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // The router owned the last senders; the worker drains what is left.
    if let Err(e) = worker.await {
        tracing::error!("Visit worker stopped abnormally: {}", e);
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
