//! Store registry and process settings.
//!
//! Every affiliated store is a variant of [`StoreId`]; the registry maps each
//! one to its connection parameters, loaded once from the environment at
//! startup. Missing required values abort startup instead of failing per
//! request.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

const DEFAULT_PORT: u16 = 3000;

/// Identifier of a registered store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StoreId {
    Ezbike,
    Nami,
    Segway,
}

impl StoreId {
    /// All registered stores, in registry iteration order.
    pub const ALL: [StoreId; 3] = [StoreId::Ezbike, StoreId::Nami, StoreId::Segway];

    /// Canonical wire form, also used as the environment variable prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreId::Ezbike => "EZBIKE",
            StoreId::Nami => "NAMI",
            StoreId::Segway => "SEGWAY",
        }
    }

    /// Fulfillment location each store ships from unless overridden via
    /// `{ID}_LOCATION`.
    fn default_location_name(&self) -> &'static str {
        match self {
            StoreId::Ezbike => "EZbike Richmond Hill",
            StoreId::Nami => "Richmond Hill Store",
            StoreId::Segway => "10 Brodie Drive #4",
        }
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "EZBIKE" => Ok(StoreId::Ezbike),
            "NAMI" => Ok(StoreId::Nami),
            "SEGWAY" => Ok(StoreId::Segway),
            other => bail!("unknown store identifier: {other}"),
        }
    }
}

/// Connection parameters for one store. Immutable after startup.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub id: StoreId,
    /// Admin API host, e.g. `ezbike.myshopify.com`.
    pub shop_domain: String,
    /// Access token sent with every outbound call.
    pub access_token: String,
    /// Preferred fulfillment location name; selection falls back to the
    /// store's first listed location when no name matches.
    pub location_name: String,
}

/// Read-only mapping from store identifier to its configuration.
#[derive(Debug, Clone)]
pub struct StoreRegistry {
    stores: BTreeMap<StoreId, StoreConfig>,
}

impl StoreRegistry {
    pub fn new(stores: impl IntoIterator<Item = StoreConfig>) -> Self {
        Self {
            stores: stores.into_iter().map(|store| (store.id, store)).collect(),
        }
    }

    /// Build the registry from `{ID}_SHOP`, `{ID}_TOKEN` and the optional
    /// `{ID}_LOCATION` variables. Fails on the first missing required value.
    pub fn from_env() -> Result<Self> {
        let mut stores = Vec::new();
        for id in StoreId::ALL {
            let shop_domain = require_env(&format!("{id}_SHOP"))?;
            let access_token = require_env(&format!("{id}_TOKEN"))?;
            let location_name = std::env::var(format!("{id}_LOCATION"))
                .unwrap_or_else(|_| id.default_location_name().to_string());
            stores.push(StoreConfig {
                id,
                shop_domain,
                access_token,
                location_name,
            });
        }
        Ok(Self::new(stores))
    }

    pub fn get(&self, id: StoreId) -> Option<&StoreConfig> {
        self.stores.get(&id)
    }

    /// All registered identifiers, in deterministic order.
    pub fn ids(&self) -> impl Iterator<Item = StoreId> + '_ {
        self.stores.keys().copied()
    }

    /// Every registered store except `source`.
    pub fn targets_for(&self, source: StoreId) -> Vec<StoreId> {
        self.ids().filter(|id| *id != source).collect()
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("missing required environment variable {key}"))
}

/// Process-level settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("invalid PORT value: {value}"))?,
            Err(_) => DEFAULT_PORT,
        };
        Ok(Self { port })
    }
}
