// HTTP surface: route table and listener bootstrap

pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{get, post};
use log::info;

use crate::services::sync::SyncService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub sync: Arc<SyncService>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::liveness))
        .route("/sync-inventory", post(handlers::sync_inventory))
        .with_state(state)
}

/// Bind the listener and serve until ctrl-c.
pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Inventory sync middleware running on port {port}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("Failed to install ctrl-c handler: {err}");
    }
}
