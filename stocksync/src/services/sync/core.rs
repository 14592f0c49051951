//! Pure resolution logic for the sync workflow.

use crate::api::models::{Location, Product, Variant};

/// Find the first variant whose SKU matches `sku`, scanning products in
/// catalog order and each product's variants in listed order. Comparison
/// trims surrounding whitespace and ignores case; variants without a SKU
/// never match. Returns the owning product alongside the variant.
pub fn find_variant<'a>(products: &'a [Product], sku: &str) -> Option<(&'a Product, &'a Variant)> {
    let wanted = sku.trim().to_lowercase();
    products
        .iter()
        .flat_map(|product| product.variants.iter().map(move |variant| (product, variant)))
        .find(|(_, variant)| {
            variant
                .sku
                .as_deref()
                .is_some_and(|candidate| candidate.trim().to_lowercase() == wanted)
        })
}

/// Select the location whose name matches `preferred` (case-insensitive
/// exact match), falling back to the first listed location. An empty list
/// yields `None`.
pub fn select_location<'a>(locations: &'a [Location], preferred: &str) -> Option<&'a Location> {
    let wanted = preferred.to_lowercase();
    locations
        .iter()
        .find(|location| location.name.to_lowercase() == wanted)
        .or_else(|| locations.first())
}
