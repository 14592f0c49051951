//! Client for the external store Admin APIs.
//!
//! Covers the three endpoints the sync workflow touches: paginated product
//! listing, location listing, and the inventory-level set call. Everything
//! upstream-facing lives here; the services layer only sees [`ShopApi`].

pub mod client;
pub mod constants;
pub mod models;
pub mod pagination;

pub use client::{InventoryUpdateError, ShopApi, ShopClient};
pub use models::{Location, Product, Variant};
