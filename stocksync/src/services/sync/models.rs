//! Request and outcome types for the sync workflow.

use serde::Deserialize;

use crate::config::StoreId;

/// A validated inbound sync request.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    pub sku: String,
    /// New available quantity; any integer, including zero and negative.
    pub quantity: i64,
    /// Store reporting the authoritative quantity; excluded from the targets.
    pub source: StoreId,
}

/// Raw request body as received. Validation turns it into a [`SyncRequest`].
#[derive(Debug, Default, Deserialize)]
pub struct SyncPayload {
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub source: Option<String>,
}

impl SyncPayload {
    /// Validate: sku non-empty, quantity present, source a known store.
    /// Every violation maps to the same client error.
    pub fn validate(self) -> Result<SyncRequest, ValidationError> {
        let sku = match self.sku {
            Some(sku) if !sku.trim().is_empty() => sku,
            _ => return Err(ValidationError),
        };
        let quantity = self.quantity.ok_or(ValidationError)?;
        let source = self
            .source
            .as_deref()
            .and_then(|value| value.parse::<StoreId>().ok())
            .ok_or(ValidationError)?;

        Ok(SyncRequest {
            sku,
            quantity,
            source,
        })
    }
}

/// Client error for a missing or invalid request field.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("Missing or invalid sku, quantity, or source")]
pub struct ValidationError;

/// Per-target result of one sync attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The target's inventory level was set to the given quantity.
    Synced(i64),
    /// No variant in the target's catalog carries the requested SKU.
    SkuNotFound,
    /// The target has no fulfillment locations.
    LocationNotFound,
    /// Inventory is not tracked for the matched variant.
    TrackingNotEnabled,
    /// The update (or a fetch it depends on) failed; carries the reason.
    UpdateFailed(String),
}

/// Outcome of one target store within a fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReport {
    pub store: StoreId,
    pub outcome: SyncOutcome,
}
