// Sync service: fans one inventory quantity change out to every registered
// store except the one that reported it.
//
// Pure resolution logic lives in core.rs, request/outcome types in
// models.rs. The service is decoupled from the HTTP surface and from the
// concrete API client.

pub mod core;
pub mod models;

pub use models::{SyncOutcome, SyncPayload, SyncRequest, TargetReport, ValidationError};

use std::sync::Arc;

use log::{debug, error, info, warn};

use crate::api::{InventoryUpdateError, ShopApi};
use crate::config::{StoreConfig, StoreRegistry};

/// Drives the per-request fan-out workflow.
pub struct SyncService {
    registry: StoreRegistry,
    shop_api: Arc<dyn ShopApi>,
}

impl SyncService {
    pub fn new(registry: StoreRegistry, shop_api: Arc<dyn ShopApi>) -> Self {
        Self { registry, shop_api }
    }

    /// Process one validated sync request. Targets are processed strictly
    /// sequentially; a failure in one target never blocks the rest. The
    /// outcome of every target is collected and logged.
    pub async fn sync(&self, request: &SyncRequest) -> anyhow::Result<Vec<TargetReport>> {
        let targets = self.registry.targets_for(request.source);
        let mut reports = Vec::with_capacity(targets.len());

        for target in targets {
            let Some(store) = self.registry.get(target) else {
                continue;
            };
            let report = TargetReport {
                store: target,
                outcome: self.sync_target(store, request).await,
            };
            log_outcome(request, store, &report);
            reports.push(report);
        }

        Ok(reports)
    }

    /// Fetch -> resolve variant -> resolve location -> update, for one
    /// target. Every failure is contained here and reduced to an outcome.
    async fn sync_target(&self, store: &StoreConfig, request: &SyncRequest) -> SyncOutcome {
        let products = self.shop_api.fetch_all_products(store).await;

        let Some((product, variant)) = core::find_variant(&products, &request.sku) else {
            return SyncOutcome::SkuNotFound;
        };
        debug!(
            "SKU {} matched product '{}' in {}",
            request.sku, product.title, store.shop_domain
        );

        let Some(inventory_item_id) = variant.inventory_item_id else {
            return SyncOutcome::TrackingNotEnabled;
        };

        let locations = match self.shop_api.fetch_locations(store).await {
            Ok(locations) => locations,
            Err(err) => return SyncOutcome::UpdateFailed(format!("{err:#}")),
        };

        let Some(location) = core::select_location(&locations, &store.location_name) else {
            return SyncOutcome::LocationNotFound;
        };

        match self
            .shop_api
            .set_inventory_level(store, location.id, inventory_item_id, request.quantity)
            .await
        {
            Ok(()) => SyncOutcome::Synced(request.quantity),
            Err(InventoryUpdateError::TrackingDisabled) => SyncOutcome::TrackingNotEnabled,
            Err(err) => SyncOutcome::UpdateFailed(err.to_string()),
        }
    }
}

fn log_outcome(request: &SyncRequest, store: &StoreConfig, report: &TargetReport) {
    match &report.outcome {
        SyncOutcome::Synced(quantity) => info!(
            "[{} -> {}] SKU {} synced to quantity {}",
            request.source, report.store, request.sku, quantity
        ),
        SyncOutcome::SkuNotFound => {
            info!("SKU {} not found in {}", request.sku, store.shop_domain);
        }
        SyncOutcome::LocationNotFound => {
            warn!("Location not found for {}", store.shop_domain);
        }
        SyncOutcome::TrackingNotEnabled => {
            info!(
                "Inventory not tracked for SKU {} in {}",
                request.sku, report.store
            );
        }
        SyncOutcome::UpdateFailed(reason) => {
            error!(
                "Failed to sync SKU {} to {}: {}",
                request.sku, report.store, reason
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    use anyhow::bail;
    use async_trait::async_trait;

    use crate::api::models::{Location, Product, Variant};
    use crate::config::StoreId;

    #[derive(Default)]
    struct FakeShopApi {
        catalogs: HashMap<StoreId, Vec<Product>>,
        locations: HashMap<StoreId, Vec<Location>>,
        location_failures: HashSet<StoreId>,
        tracking_disabled: HashSet<StoreId>,
        set_calls: Mutex<Vec<(StoreId, i64, i64, i64)>>,
    }

    #[async_trait]
    impl ShopApi for FakeShopApi {
        async fn fetch_all_products(&self, store: &StoreConfig) -> Vec<Product> {
            self.catalogs.get(&store.id).cloned().unwrap_or_default()
        }

        async fn fetch_locations(&self, store: &StoreConfig) -> anyhow::Result<Vec<Location>> {
            if self.location_failures.contains(&store.id) {
                bail!("connection refused");
            }
            Ok(self.locations.get(&store.id).cloned().unwrap_or_default())
        }

        async fn set_inventory_level(
            &self,
            store: &StoreConfig,
            location_id: i64,
            inventory_item_id: i64,
            available: i64,
        ) -> Result<(), InventoryUpdateError> {
            if self.tracking_disabled.contains(&store.id) {
                return Err(InventoryUpdateError::TrackingDisabled);
            }
            self.set_calls
                .lock()
                .unwrap()
                .push((store.id, location_id, inventory_item_id, available));
            Ok(())
        }
    }

    fn registry() -> StoreRegistry {
        StoreRegistry::new(StoreId::ALL.map(|id| StoreConfig {
            id,
            shop_domain: format!("{}.example.com", id.as_str().to_lowercase()),
            access_token: "token".to_string(),
            location_name: format!("{id} Store"),
        }))
    }

    fn catalog(sku: &str, inventory_item_id: Option<i64>) -> Vec<Product> {
        vec![Product {
            title: "Bike".to_string(),
            variants: vec![Variant {
                sku: Some(sku.to_string()),
                inventory_item_id,
            }],
        }]
    }

    fn named_location(id: i64, store: StoreId) -> Vec<Location> {
        vec![Location {
            id,
            name: format!("{store} Store"),
        }]
    }

    fn request(sku: &str, quantity: i64, source: StoreId) -> SyncRequest {
        SyncRequest {
            sku: sku.to_string(),
            quantity,
            source,
        }
    }

    fn service(fake: FakeShopApi) -> (SyncService, Arc<FakeShopApi>) {
        let fake = Arc::new(fake);
        (SyncService::new(registry(), fake.clone()), fake)
    }

    #[tokio::test]
    async fn test_fan_out_updates_all_targets() {
        let (service, fake) = service(FakeShopApi {
            catalogs: HashMap::from([
                (StoreId::Nami, catalog("bk-100", Some(11))),
                (StoreId::Segway, catalog("BK-100", Some(22))),
            ]),
            locations: HashMap::from([
                (StoreId::Nami, named_location(100, StoreId::Nami)),
                (StoreId::Segway, named_location(200, StoreId::Segway)),
            ]),
            ..FakeShopApi::default()
        });

        let reports = service
            .sync(&request("BK-100", 5, StoreId::Ezbike))
            .await
            .unwrap();

        assert_eq!(
            reports,
            vec![
                TargetReport {
                    store: StoreId::Nami,
                    outcome: SyncOutcome::Synced(5)
                },
                TargetReport {
                    store: StoreId::Segway,
                    outcome: SyncOutcome::Synced(5)
                },
            ]
        );
        assert_eq!(
            *fake.set_calls.lock().unwrap(),
            vec![
                (StoreId::Nami, 100, 11, 5),
                (StoreId::Segway, 200, 22, 5)
            ]
        );
    }

    #[tokio::test]
    async fn test_source_is_never_a_target() {
        let (service, fake) = service(FakeShopApi {
            catalogs: HashMap::from([(StoreId::Ezbike, catalog("BK-100", Some(1)))]),
            locations: HashMap::from([(StoreId::Ezbike, named_location(1, StoreId::Ezbike))]),
            ..FakeShopApi::default()
        });

        let reports = service
            .sync(&request("BK-100", 5, StoreId::Ezbike))
            .await
            .unwrap();

        assert!(reports.iter().all(|report| report.store != StoreId::Ezbike));
        assert!(fake.set_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_sku_skips_target_but_not_siblings() {
        let (service, fake) = service(FakeShopApi {
            catalogs: HashMap::from([
                (StoreId::Nami, catalog("SC-200", Some(11))),
                (StoreId::Segway, catalog("BK-100", Some(22))),
            ]),
            locations: HashMap::from([
                (StoreId::Nami, named_location(100, StoreId::Nami)),
                (StoreId::Segway, named_location(200, StoreId::Segway)),
            ]),
            ..FakeShopApi::default()
        });

        let reports = service
            .sync(&request("BK-100", 5, StoreId::Ezbike))
            .await
            .unwrap();

        assert_eq!(reports[0].outcome, SyncOutcome::SkuNotFound);
        assert_eq!(reports[1].outcome, SyncOutcome::Synced(5));
        assert_eq!(*fake.set_calls.lock().unwrap(), vec![(StoreId::Segway, 200, 22, 5)]);
    }

    #[tokio::test]
    async fn test_location_fetch_failure_does_not_block_siblings() {
        let (service, fake) = service(FakeShopApi {
            catalogs: HashMap::from([
                (StoreId::Nami, catalog("BK-100", Some(11))),
                (StoreId::Segway, catalog("BK-100", Some(22))),
            ]),
            locations: HashMap::from([(StoreId::Segway, named_location(200, StoreId::Segway))]),
            location_failures: HashSet::from([StoreId::Nami]),
            ..FakeShopApi::default()
        });

        let reports = service
            .sync(&request("BK-100", 5, StoreId::Ezbike))
            .await
            .unwrap();

        assert!(matches!(reports[0].outcome, SyncOutcome::UpdateFailed(_)));
        assert_eq!(reports[1].outcome, SyncOutcome::Synced(5));
    }

    #[tokio::test]
    async fn test_untracked_variant_issues_no_write() {
        let (service, fake) = service(FakeShopApi {
            catalogs: HashMap::from([(StoreId::Nami, catalog("BK-100", None))]),
            locations: HashMap::from([(StoreId::Nami, named_location(100, StoreId::Nami))]),
            ..FakeShopApi::default()
        });

        let reports = service
            .sync(&request("BK-100", 5, StoreId::Ezbike))
            .await
            .unwrap();

        assert_eq!(reports[0].outcome, SyncOutcome::TrackingNotEnabled);
        assert!(fake.set_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_tracking_disabled_is_a_skip() {
        let (service, _fake) = service(FakeShopApi {
            catalogs: HashMap::from([(StoreId::Nami, catalog("BK-100", Some(11)))]),
            locations: HashMap::from([(StoreId::Nami, named_location(100, StoreId::Nami))]),
            tracking_disabled: HashSet::from([StoreId::Nami]),
            ..FakeShopApi::default()
        });

        let reports = service
            .sync(&request("BK-100", 5, StoreId::Ezbike))
            .await
            .unwrap();

        assert_eq!(reports[0].outcome, SyncOutcome::TrackingNotEnabled);
    }

    #[tokio::test]
    async fn test_empty_location_list() {
        let (service, fake) = service(FakeShopApi {
            catalogs: HashMap::from([(StoreId::Nami, catalog("BK-100", Some(11)))]),
            locations: HashMap::from([(StoreId::Nami, Vec::new())]),
            ..FakeShopApi::default()
        });

        let reports = service
            .sync(&request("BK-100", 5, StoreId::Ezbike))
            .await
            .unwrap();

        assert_eq!(reports[0].outcome, SyncOutcome::LocationNotFound);
        assert!(fake.set_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_sync_sets_same_value() {
        let (service, fake) = service(FakeShopApi {
            catalogs: HashMap::from([(StoreId::Nami, catalog("BK-100", Some(11)))]),
            locations: HashMap::from([(StoreId::Nami, named_location(100, StoreId::Nami))]),
            ..FakeShopApi::default()
        });

        let req = request("BK-100", 5, StoreId::Ezbike);
        service.sync(&req).await.unwrap();
        service.sync(&req).await.unwrap();

        let calls = fake.set_calls.lock().unwrap();
        let nami_calls: Vec<_> = calls
            .iter()
            .filter(|(store, ..)| *store == StoreId::Nami)
            .collect();
        assert_eq!(nami_calls.len(), 2);
        assert!(nami_calls.iter().all(|(_, _, _, available)| *available == 5));
    }
}
