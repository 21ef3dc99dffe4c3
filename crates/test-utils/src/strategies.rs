//! Proptest strategies for affinity placement configuration.
//!
//! Reusable generators for property-based testing across crates. Strategies
//! produce well-formed collection names and mappings while exploring overlap
//! between the two co-location rules.
//!
//! # Usage
//!
//! ```no_run
//! use affinity_placement_test_utils::strategies;
//! use proptest::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn my_property((a, b) in strategies::arb_disjoint_maps()) {
//!         // test invariant with randomly generated co-location rules
//!     }
//! }
//! ```

use std::collections::BTreeSet;

use affinity_placement_types::{CollectionMap, PlacementConfig};
use proptest::prelude::*;

/// Generates a collection name of 1-16 characters matching `[a-z][a-z0-9_]{0,15}`.
pub fn arb_collection_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}"
}

/// Generates a comma-separated list of 1-3 node types drawn from
/// `indexing`, `search`, `analytics`, `ingest`.
pub fn arb_node_types() -> impl Strategy<Value = String> {
    proptest::sample::subsequence(vec!["indexing", "search", "analytics", "ingest"], 1..=3)
        .prop_map(|labels| labels.join(","))
}

/// Generates a primary-to-secondary collection mapping with up to `max_entries` entries.
pub fn arb_collection_map(max_entries: usize) -> impl Strategy<Value = CollectionMap> {
    proptest::collection::btree_map(arb_collection_name(), arb_collection_name(), 0..=max_entries)
}

/// Generates a collection-to-node-types mapping with up to `max_entries` entries.
pub fn arb_node_type_map(max_entries: usize) -> impl Strategy<Value = CollectionMap> {
    proptest::collection::btree_map(arb_collection_name(), arb_node_types(), 0..=max_entries)
}

/// Generates a pair of co-location mappings whose key sets do not intersect.
pub fn arb_disjoint_maps() -> impl Strategy<Value = (CollectionMap, CollectionMap)> {
    (arb_collection_map(8), arb_collection_map(8)).prop_map(|(with_collection, mut shards)| {
        shards.retain(|name, _| !with_collection.contains_key(name));
        (with_collection, shards)
    })
}

/// Generates a pair of co-location mappings sharing at least one key.
///
/// Returns the two mappings and the exact set of shared keys.
pub fn arb_overlapping_maps()
-> impl Strategy<Value = (CollectionMap, CollectionMap, BTreeSet<String>)> {
    (
        arb_collection_map(8),
        arb_collection_map(8),
        proptest::collection::btree_map(
            arb_collection_name(),
            (arb_collection_name(), arb_collection_name()),
            1..=4,
        ),
    )
        .prop_map(|(mut with_collection, mut shards, shared)| {
            let base_keys: BTreeSet<String> = with_collection.keys().cloned().collect();
            let shard_keys: BTreeSet<String> = shards.keys().cloned().collect();
            let mut common: BTreeSet<String> =
                base_keys.intersection(&shard_keys).cloned().collect();
            for (name, (secondary, shard_secondary)) in shared {
                common.insert(name.clone());
                with_collection.insert(name.clone(), secondary);
                shards.insert(name, shard_secondary);
            }
            (with_collection, shards, common)
        })
}

/// Generates a [`PlacementConfig`] that passes validation.
pub fn arb_placement_config() -> impl Strategy<Value = PlacementConfig> {
    (
        -10i64..500,
        -10i64..2_000,
        arb_disjoint_maps(),
        arb_node_type_map(4),
        any::<bool>(),
        -1i32..8,
    )
        .prop_map(
            |(
                minimal_free_disk_gb,
                prioritized_free_disk_gb,
                (with_collection, with_collection_shards),
                collection_node_type,
                spread_across_domains,
                max_replicas_per_shard_in_domain,
            )| {
                PlacementConfig::builder()
                    .minimal_free_disk_gb(minimal_free_disk_gb)
                    .prioritized_free_disk_gb(prioritized_free_disk_gb)
                    .with_collection(with_collection)
                    .with_collection_shards(with_collection_shards)
                    .collection_node_type(collection_node_type)
                    .spread_across_domains(spread_across_domains)
                    .max_replicas_per_shard_in_domain(max_replicas_per_shard_in_domain)
                    .build()
            },
        )
}
