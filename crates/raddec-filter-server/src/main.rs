//! # raddec-filter-server
//!
//! HTTP server for the raddec-filter pipeline stage.
//!
//! This binary provides:
//! - REST API for evaluating raddecs against a filter loaded at startup
//! - OpenAPI document at `/api/openapi.json`
//! - Structured logging to file and stdout
//!
//! ## Running
//!
//! ```bash
//! # Development
//! cargo run --package raddec-filter-server
//!
//! # With an explicit filter file
//! RADDEC_FILTER_FILTER_PATH=./filter.toml ./raddec-filter-server
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

use raddec_filter_core::{FilterConfig, RaddecFilter};
use raddec_filter_server::settings::ServerSettings;
use raddec_filter_server::state::AppState;
use raddec_filter_server::{api, logging};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = ServerSettings::load()?;
    logging::init(&settings)?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting raddec-filter-server");

    let config = FilterConfig::load_or_default(&settings.filter_path)?;
    let filter = RaddecFilter::new(config);
    info!(criteria = ?filter.active_criteria(), "Filter ready");

    let state = AppState::new(filter, Some(settings.filter_path.clone()));
    let app = api::create_router(state);

    let addr = settings.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;

    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
