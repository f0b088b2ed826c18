// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brewcat Server - local cache of an upstream beer catalog.
//!
//! The catalog is fetched on demand, written to a flat file and served
//! back from that file. One endpoint reads the file with a parallel
//! decode-and-filter pass.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /loadbeers` - Fetch upstream catalog and rewrite the store
//! - `GET /beers` - All stored records
//! - `GET /beers/:id` - One record by id
//! - `GET /fasterbeers?type=odd|even` - Concurrent read filtered by id parity

use anyhow::Context;
use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod routes;
mod services;
mod types;

use config::Config;
use services::{CatalogClient, CatalogError, SharedStore};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub catalog: CatalogClient,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, CatalogError> {
        let catalog = CatalogClient::new(
            &config.catalog_url,
            Duration::from_secs(config.catalog_timeout_secs),
        )?;

        Ok(Self {
            store: SharedStore::new(config.store_path.clone()),
            catalog,
            config: Arc::new(config),
        })
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let request_timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        // Root endpoint - API information
        .route("/", get(routes::health::info))
        .route("/health", get(routes::health::check))
        // Catalog endpoints
        .route("/loadbeers", get(routes::beers::load_beers))
        .route("/beers", get(routes::beers::list_beers))
        .route("/beers/:id", get(routes::beers::get_beer))
        .route("/fasterbeers", get(routes::beers::faster_beers))
        // Middleware
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug,brewcat_server=debug"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if json {
        builder.json().init();
    } else {
        builder.pretty().init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(config.json_logs);

    tracing::info!(
        address = %config.bind_address(),
        store_path = %config.store_path.display(),
        catalog_url = %config.catalog_url,
        worker_threads = config.worker_threads,
        "Starting Brewcat Server"
    );

    // Workers for the concurrent reader
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_threads)
        .build_global()
        .context("Failed to initialize rayon thread pool")?;

    let state = AppState::new(config.clone()).context("Failed to build catalog client")?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}
