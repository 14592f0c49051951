//! Constants for the store Admin API surface this middleware touches.

use std::time::Duration;

/// Admin API version every endpoint path is pinned to.
pub const API_VERSION: &str = "2024-01";

/// Page size requested from the product listing endpoint (its maximum).
pub const PRODUCTS_PAGE_LIMIT: u32 = 250;

/// Header carrying the per-store access credential.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Literal message the inventory endpoint returns when the item is not
/// tracked; recognized as a skip rather than an update failure.
pub const TRACKING_DISABLED_MESSAGE: &str =
    "Inventory item does not have inventory tracking enabled";

/// Bound on every outbound call; each call is attempted exactly once.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
