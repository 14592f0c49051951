//! Wire models for the store Admin API.

use serde::{Deserialize, Serialize};

/// A product as returned by the product listing endpoint. Variants keep
/// their listed order; SKU resolution is first-match-wins across it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

/// A purchasable configuration of a product. Inventory levels are tracked
/// against `inventory_item_id`, which is absent when tracking is disabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub inventory_item_id: Option<i64>,
}

/// A fulfillment location; inventory is set per (item, location) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
}

/// Envelope of the product listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ProductsResponse {
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Envelope of the location listing endpoint.
#[derive(Debug, Deserialize)]
pub struct LocationsResponse {
    #[serde(default)]
    pub locations: Vec<Location>,
}

/// Request body of the inventory-level set endpoint.
#[derive(Debug, Serialize)]
pub struct InventoryLevelSet {
    pub location_id: i64,
    pub inventory_item_id: i64,
    pub available: i64,
}
