//! HTTP client for the store Admin APIs.
//!
//! One [`ShopClient`] serves every registered store; per-store connection
//! parameters travel with each call. The sync service depends on the
//! [`ShopApi`] trait rather than the concrete client so tests can substitute
//! a fake gateway.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, error};
use serde_json::Value;

use crate::config::StoreConfig;

use super::constants::{
    ACCESS_TOKEN_HEADER, API_VERSION, PRODUCTS_PAGE_LIMIT, REQUEST_TIMEOUT,
    TRACKING_DISABLED_MESSAGE,
};
use super::models::{InventoryLevelSet, Location, LocationsResponse, Product, ProductsResponse};
use super::pagination::next_page_url;

/// Boundary to the external store APIs.
#[async_trait]
pub trait ShopApi: Send + Sync {
    /// Full product catalog of a store, following pagination to exhaustion.
    /// Best-effort: a failure mid-fetch yields whatever was accumulated so
    /// far instead of an error.
    async fn fetch_all_products(&self, store: &StoreConfig) -> Vec<Product>;

    /// All fulfillment locations of a store.
    async fn fetch_locations(&self, store: &StoreConfig) -> Result<Vec<Location>>;

    /// Set the available quantity for an inventory item at a location.
    async fn set_inventory_level(
        &self,
        store: &StoreConfig,
        location_id: i64,
        inventory_item_id: i64,
        available: i64,
    ) -> std::result::Result<(), InventoryUpdateError>;
}

/// Failure modes of the inventory-level set call.
#[derive(Debug, thiserror::Error)]
pub enum InventoryUpdateError {
    /// The upstream rejected the write because the item is not tracked;
    /// callers treat this as a skip, not a failure.
    #[error("inventory tracking not enabled")]
    TrackingDisabled,

    /// Any other rejection from the upstream API.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Reqwest-backed [`ShopApi`] implementation.
pub struct ShopClient {
    http: reqwest::Client,
}

impl ShopClient {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http })
    }

    async fn fetch_products_page(
        &self,
        store: &StoreConfig,
        url: &str,
    ) -> Result<(Vec<Product>, Option<String>)> {
        let response = self
            .http
            .get(url)
            .header(ACCESS_TOKEN_HEADER, &store.access_token)
            .send()
            .await?
            .error_for_status()?;

        let next = response
            .headers()
            .get(reqwest::header::LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(next_page_url);

        let page: ProductsResponse = response.json().await?;
        Ok((page.products, next))
    }
}

#[async_trait]
impl ShopApi for ShopClient {
    async fn fetch_all_products(&self, store: &StoreConfig) -> Vec<Product> {
        let mut products = Vec::new();
        let mut url = format!(
            "{}/admin/api/{API_VERSION}/products.json?limit={PRODUCTS_PAGE_LIMIT}",
            base_url(store)
        );

        loop {
            match self.fetch_products_page(store, &url).await {
                Ok((mut page, next)) => {
                    products.append(&mut page);
                    match next {
                        Some(next_url) => url = next_url,
                        None => break,
                    }
                }
                Err(err) => {
                    error!("Failed to fetch products from {}: {err:#}", store.shop_domain);
                    break;
                }
            }
        }

        debug!("Fetched {} products from {}", products.len(), store.shop_domain);
        products
    }

    async fn fetch_locations(&self, store: &StoreConfig) -> Result<Vec<Location>> {
        let url = format!("{}/admin/api/{API_VERSION}/locations.json", base_url(store));
        let response = self
            .http
            .get(&url)
            .header(ACCESS_TOKEN_HEADER, &store.access_token)
            .send()
            .await
            .with_context(|| format!("locations request to {} failed", store.shop_domain))?
            .error_for_status()
            .with_context(|| format!("locations request to {} was rejected", store.shop_domain))?;

        let body: LocationsResponse = response
            .json()
            .await
            .context("failed to decode locations response")?;
        Ok(body.locations)
    }

    async fn set_inventory_level(
        &self,
        store: &StoreConfig,
        location_id: i64,
        inventory_item_id: i64,
        available: i64,
    ) -> std::result::Result<(), InventoryUpdateError> {
        let url = format!(
            "{}/admin/api/{API_VERSION}/inventory_levels/set.json",
            base_url(store)
        );
        let body = InventoryLevelSet {
            location_id,
            inventory_item_id,
            available,
        };

        let response = self
            .http
            .post(&url)
            .header(ACCESS_TOKEN_HEADER, &store.access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let detail: Value = response.json().await.unwrap_or(Value::Null);
        if error_messages(&detail)
            .iter()
            .any(|message| message == TRACKING_DISABLED_MESSAGE)
        {
            return Err(InventoryUpdateError::TrackingDisabled);
        }

        let message = match &detail {
            Value::Null => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
            other => other.to_string(),
        };
        Err(InventoryUpdateError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// `https://{domain}` for bare domains; a domain already carrying a scheme
/// is used verbatim.
fn base_url(store: &StoreConfig) -> String {
    if store.shop_domain.starts_with("http://") || store.shop_domain.starts_with("https://") {
        store.shop_domain.clone()
    } else {
        format!("https://{}", store.shop_domain)
    }
}

/// Error message strings from an upstream error body; `errors` may be a
/// single string or a list of strings.
fn error_messages(body: &Value) -> Vec<String> {
    match body.get("errors") {
        Some(Value::String(message)) => vec![message.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}
