//! Test configuration helpers.
//!
//! Provides canned placement configurations for tests, centralizing
//! collection names that would otherwise be scattered across test modules.

use affinity_placement_types::{CollectionMap, PlacementConfig};

/// Builds a [`CollectionMap`] from `(key, value)` pairs.
#[must_use]
pub fn collection_map(pairs: &[(&str, &str)]) -> CollectionMap {
    pairs.iter().map(|(key, value)| ((*key).to_string(), (*value).to_string())).collect()
}

/// Returns a valid placement configuration exercising every field.
///
/// - `orders` co-located with `customers` (shard oblivious)
/// - `invoices` co-located shard-by-shard with `orders`
/// - `orders` restricted to `indexing` or `search` nodes
/// - spread across domains, at most 2 replicas per shard per domain
#[must_use]
pub fn test_placement_config() -> PlacementConfig {
    PlacementConfig::builder()
        .minimal_free_disk_gb(10)
        .prioritized_free_disk_gb(50)
        .with_collection(collection_map(&[("orders", "customers")]))
        .with_collection_shards(collection_map(&[("invoices", "orders")]))
        .collection_node_type(collection_map(&[("orders", "indexing,search")]))
        .spread_across_domains(true)
        .max_replicas_per_shard_in_domain(2)
        .build()
}

/// Returns a configuration that fails validation because `orders` appears in
/// both co-location mappings.
#[must_use]
pub fn conflicting_placement_config() -> PlacementConfig {
    PlacementConfig::builder()
        .with_collection(collection_map(&[("orders", "customers")]))
        .with_collection_shards(collection_map(&[("orders", "invoices")]))
        .build()
}
