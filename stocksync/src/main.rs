//! Inventory sync middleware.
//!
//! Receives `{sku, quantity, source}` webhooks and pushes the new available
//! quantity to every other registered store, resolving the matching variant
//! and fulfillment location in each.

mod api;
mod config;
mod server;
mod services;

use std::sync::Arc;

use anyhow::Context;
use log::info;

use crate::api::ShopClient;
use crate::config::{Settings, StoreRegistry};
use crate::server::AppState;
use crate::services::sync::SyncService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let settings = Settings::from_env()?;
    let registry =
        StoreRegistry::from_env().context("failed to load store registry from environment")?;
    info!("Store registry loaded with {} stores", registry.len());

    let client = Arc::new(ShopClient::new()?);
    let sync = Arc::new(SyncService::new(registry, client));

    server::serve(AppState { sync }, settings.port).await
}
