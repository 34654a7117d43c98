//! Reservation Server
//!
//! CRUD HTTP service for candidates and recruiters, backed by either
//! in-memory maps or an embedded SQLite database.

mod config;
mod handlers;
mod services;
mod storage;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use reservation_core::{Candidate, Recruiter};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{AppSettings, Settings};
use crate::services::ReservationService;
use crate::storage::Stores;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ReservationService>,
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("reservation_server=info,tower_http=info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!(
        "Starting Reservation Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    info!("Loading configuration...");
    let settings = Settings::load().context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, store={:?}",
        settings.app.bind_address, settings.store.mode
    );

    let stores = Stores::open(&settings.store)
        .await
        .context("Failed to initialize stores")?;

    let service = Arc::new(ReservationService::new(
        stores.candidates.clone(),
        stores.recruiters.clone(),
    ));
    let app = build_router(AppState { service }, &settings.app);

    let addr: SocketAddr = settings
        .app
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Running cleanup tasks...");
    stores.close().await;
    info!("Server shut down");

    Ok(())
}

pub fn build_router(state: AppState, settings: &AppSettings) -> Router {
    let base_path = settings.base_path.trim_end_matches('/');
    let api = if base_path.is_empty() {
        Router::new().merge(api_routes())
    } else {
        Router::new().nest(base_path, api_routes())
    };

    Router::new()
        .route("/health", get(handlers::health))
        .merge(api)
        .layer(TimeoutLayer::new(settings.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/candidates", handlers::entities::routes::<Candidate>())
        .nest("/recruiters", handlers::entities::routes::<Recruiter>())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, shutting down gracefully...");
}
