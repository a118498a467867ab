//! Gigboard Server
//!
//! HTTP CRUD service over users, orders and offers. Each request maps to a
//! single row operation on an embedded SQLite store and answers with JSON.

mod config;
mod error;
mod extractors;
mod handlers;
mod storage;
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use clap::Parser;
use gigboard_core::Store;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{Cli, LogFormat, Settings};
use crate::storage::{load_seed, Database, SeedData};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub check_references: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let settings = match Settings::load(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("[FATAL] Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_tracing(&settings) {
        eprintln!("[FATAL] Failed to initialize logging: {:#}", e);
        std::process::exit(1);
    }

    info!(
        "Starting Gigboard Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    if let Err(e) = run_server(settings).await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(settings: &Settings) -> Result<()> {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .with_context(|| format!("Invalid log_level `{}`", settings.log_level))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match settings.log_format {
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
        LogFormat::Pretty => tracing::subscriber::set_global_default(builder.finish())?,
    }

    Ok(())
}

async fn run_server(settings: Settings) -> Result<()> {
    info!(
        "Config loaded: bind={}, db={}, check_references={}",
        settings.bind_address, settings.database_url, settings.check_references
    );

    let db = Arc::new(
        Database::new(&settings.database_url)
            .await
            .context("Failed to initialize database")?,
    );

    if settings.seed_on_start {
        seed_store(&db, &settings).await?;
    } else {
        info!("Seeding disabled");
    }

    let state = AppState {
        store: db.clone(),
        check_references: settings.check_references,
    };
    let app = build_router(state);

    let addr = settings.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped, closing database");
    db.close().await;

    Ok(())
}

/// Load the seed file once, before any request is served
async fn seed_store(db: &Database, settings: &Settings) -> Result<()> {
    if !settings.seed_path.exists() {
        warn!(
            "Seed file {} not found, starting with an empty store",
            settings.seed_path.display()
        );
        return Ok(());
    }

    info!("Loading seed data from {}", settings.seed_path.display());
    let data = SeedData::from_file(&settings.seed_path)
        .await
        .context("Failed to read seed data")?;
    load_seed(db, data)
        .await
        .context("Failed to load seed data")?;

    Ok(())
}

pub(crate) fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(api_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(handlers::users::list).post(handlers::users::create),
        )
        .route(
            "/users/:id",
            get(handlers::users::get)
                .put(handlers::users::update)
                .delete(handlers::users::delete),
        )
        .route(
            "/orders",
            get(handlers::orders::list).post(handlers::orders::create),
        )
        .route(
            "/orders/:id",
            get(handlers::orders::get)
                .put(handlers::orders::update)
                .delete(handlers::orders::delete),
        )
        .route(
            "/offers",
            get(handlers::offers::list).post(handlers::offers::create),
        )
        .route(
            "/offers/:id",
            get(handlers::offers::get)
                .put(handlers::offers::update)
                .delete(handlers::offers::delete),
        )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
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
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
