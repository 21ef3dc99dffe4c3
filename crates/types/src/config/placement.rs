//! Affinity placement policy parameters.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Collection name to collection name (or node-type list) mapping.
///
/// Ordered so that conflict reports and serialized documents are stable.
pub type CollectionMap = BTreeMap<String, String>;

/// Default minimal free disk, in GB.
pub const DEFAULT_MINIMAL_FREE_DISK_GB: i64 = 20;

/// Default prioritized free disk, in GB.
pub const DEFAULT_PRIORITIZED_FREE_DISK_GB: i64 = 100;

/// Sentinel for an unset per-domain replica cap.
pub const DEFAULT_MAX_REPLICAS_PER_SHARD_IN_DOMAIN: i32 = -1;

/// Configuration of the affinity placement policy.
///
/// Fields are public so that a deserializer can populate them, but a
/// configuration is meant to be read-only once validated and handed to the
/// placement engine. Construction never checks cross-field consistency; call
/// [`validate`](Self::validate) before use.
///
/// # Document Keys
///
/// Serialized field names match the persisted cluster configuration verbatim
/// (`minimalFreeDiskGB`, `withCollection`, ...). Missing keys take their
/// defaults.
///
/// # Example
///
/// ```no_run
/// # use affinity_placement_types::config::{CollectionMap, PlacementConfig};
/// let with_collection = CollectionMap::from([("orders".to_string(), "customers".to_string())]);
/// let config = PlacementConfig::builder()
///     .minimal_free_disk_gb(50)
///     .with_collection(with_collection)
///     .build();
/// config.validate().expect("co-location rules are disjoint");
/// ```
// The schemars `JsonSchema` derive expands to code that calls `.unwrap()`.
#[allow(clippy::unwrap_used)]
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder, Serialize, Deserialize, JsonSchema)]
pub struct PlacementConfig {
    /// Nodes with strictly less free disk (GB) than this are excluded from
    /// placement. Zero or less disables the rule.
    #[serde(rename = "minimalFreeDiskGB", default = "default_minimal_free_disk_gb")]
    #[builder(default = DEFAULT_MINIMAL_FREE_DISK_GB)]
    pub minimal_free_disk_gb: i64,

    /// Nodes with at least this much free disk (GB) are preferred over nodes
    /// below it, regardless of how many cores they already host. Nodes below
    /// it remain eligible when nothing better exists.
    #[serde(rename = "prioritizedFreeDiskGB", default = "default_prioritized_free_disk_gb")]
    #[builder(default = DEFAULT_PRIORITIZED_FREE_DISK_GB)]
    pub prioritized_free_disk_gb: i64,

    /// Co-location constraint: replicas of each primary collection (key) are
    /// placed only on nodes already hosting a replica of the secondary
    /// collection (value).
    #[serde(rename = "withCollection", default)]
    #[builder(default)]
    pub with_collection: CollectionMap,

    /// Node-type constraint: a collection (key) is placed only on nodes whose
    /// `node_type` property lists at least one of the comma-separated types
    /// in the value.
    #[serde(rename = "collectionNodeType", default)]
    #[builder(default)]
    pub collection_node_type: CollectionMap,

    /// Shard-aware co-location: shard N of the primary collection is placed
    /// with shard N of the secondary collection.
    ///
    /// Must be disjoint with [`with_collection`](Self::with_collection).
    #[serde(rename = "withCollectionShards", default)]
    #[builder(default)]
    pub with_collection_shards: CollectionMap,

    /// Spread replicas of the same shard across nodes with different
    /// `spread_domain` values.
    ///
    /// Domains are evaluated within an Availability Zone. When there are more
    /// replicas than domains, replicas are distributed evenly and placement
    /// fails once a domain would exceed
    /// [`max_replicas_per_shard_in_domain`](Self::max_replicas_per_shard_in_domain).
    #[serde(rename = "spreadAcrossDomains", default)]
    #[builder(default)]
    pub spread_across_domains: bool,

    /// Maximum replicas of one type of one shard placed in a single spread
    /// domain. `-1` leaves it unset.
    #[serde(
        rename = "maxReplicasPerShardInDomain",
        default = "default_max_replicas_per_shard_in_domain"
    )]
    #[builder(default = DEFAULT_MAX_REPLICAS_PER_SHARD_IN_DOMAIN)]
    pub max_replicas_per_shard_in_domain: i32,
}

impl PlacementConfig {
    /// The configuration used when none is supplied.
    pub const DEFAULT: Self = Self {
        minimal_free_disk_gb: DEFAULT_MINIMAL_FREE_DISK_GB,
        prioritized_free_disk_gb: DEFAULT_PRIORITIZED_FREE_DISK_GB,
        with_collection: BTreeMap::new(),
        collection_node_type: BTreeMap::new(),
        with_collection_shards: BTreeMap::new(),
        spread_across_domains: false,
        max_replicas_per_shard_in_domain: DEFAULT_MAX_REPLICAS_PER_SHARD_IN_DOMAIN,
    };

    /// Creates a configuration with the given disk thresholds and no
    /// collection constraints.
    #[must_use]
    pub fn with_disk_thresholds(minimal_free_disk_gb: i64, prioritized_free_disk_gb: i64) -> Self {
        Self { minimal_free_disk_gb, prioritized_free_disk_gb, ..Self::DEFAULT }
    }

    /// Creates a configuration with co-location and node-type constraints.
    ///
    /// `with_collection_shards` is left empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidArgument`] if either mapping is `None`.
    pub fn with_node_types(
        minimal_free_disk_gb: i64,
        prioritized_free_disk_gb: i64,
        with_collection: Option<CollectionMap>,
        collection_node_type: Option<CollectionMap>,
    ) -> Result<Self, ConfigError> {
        Self::with_collection_maps(
            minimal_free_disk_gb,
            prioritized_free_disk_gb,
            with_collection,
            Some(CollectionMap::new()),
            collection_node_type,
        )
    }

    /// Creates a configuration with all three collection mappings.
    ///
    /// Disjointness of the co-location mappings is not checked here.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidArgument`] naming the first mapping that
    /// is `None`.
    pub fn with_collection_maps(
        minimal_free_disk_gb: i64,
        prioritized_free_disk_gb: i64,
        with_collection: Option<CollectionMap>,
        with_collection_shards: Option<CollectionMap>,
        collection_node_type: Option<CollectionMap>,
    ) -> Result<Self, ConfigError> {
        let with_collection = require_mapping(with_collection, "withCollection")?;
        let with_collection_shards =
            require_mapping(with_collection_shards, "withCollectionShards")?;
        let collection_node_type = require_mapping(collection_node_type, "collectionNodeType")?;
        Ok(Self {
            minimal_free_disk_gb,
            prioritized_free_disk_gb,
            with_collection,
            collection_node_type,
            with_collection_shards,
            ..Self::DEFAULT
        })
    }

    /// Validates the configuration.
    ///
    /// Call after deserialization or construction, before handing the
    /// configuration to the placement engine. The only rule checked is that
    /// no collection is governed by both co-location mappings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CollectionConflict`] listing every collection
    /// that is a key of both `withCollection` and `withCollectionShards`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let collections = self.co_location_conflicts();
        if !collections.is_empty() {
            return Err(ConfigError::CollectionConflict { collections });
        }
        Ok(())
    }

    /// Collections that are keys of both co-location mappings, in name order.
    #[must_use]
    pub fn co_location_conflicts(&self) -> Vec<String> {
        self.with_collection
            .keys()
            .filter(|name| self.with_collection_shards.contains_key(*name))
            .cloned()
            .collect()
    }

    /// Node types a collection must be placed on, or `None` if unconstrained.
    ///
    /// Splits the comma-separated value, trimming whitespace and dropping
    /// empty labels.
    #[must_use]
    pub fn required_node_types(&self, collection: &str) -> Option<Vec<&str>> {
        self.collection_node_type.get(collection).map(|types| {
            types.split(',').map(str::trim).filter(|label| !label.is_empty()).collect()
        })
    }

    /// Returns the document keys whose values differ from `other`.
    #[must_use]
    pub fn diff(&self, other: &PlacementConfig) -> Vec<&'static str> {
        let mut changes = Vec::new();
        if self.minimal_free_disk_gb != other.minimal_free_disk_gb {
            changes.push("minimalFreeDiskGB");
        }
        if self.prioritized_free_disk_gb != other.prioritized_free_disk_gb {
            changes.push("prioritizedFreeDiskGB");
        }
        if self.with_collection != other.with_collection {
            changes.push("withCollection");
        }
        if self.collection_node_type != other.collection_node_type {
            changes.push("collectionNodeType");
        }
        if self.with_collection_shards != other.with_collection_shards {
            changes.push("withCollectionShards");
        }
        if self.spread_across_domains != other.spread_across_domains {
            changes.push("spreadAcrossDomains");
        }
        if self.max_replicas_per_shard_in_domain != other.max_replicas_per_shard_in_domain {
            changes.push("maxReplicasPerShardInDomain");
        }
        changes
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn require_mapping(
    mapping: Option<CollectionMap>,
    field: &'static str,
) -> Result<CollectionMap, ConfigError> {
    mapping.ok_or(ConfigError::InvalidArgument { field })
}

const fn default_minimal_free_disk_gb() -> i64 {
    DEFAULT_MINIMAL_FREE_DISK_GB
}

const fn default_prioritized_free_disk_gb() -> i64 {
    DEFAULT_PRIORITIZED_FREE_DISK_GB
}

const fn default_max_replicas_per_shard_in_domain() -> i32 {
    DEFAULT_MAX_REPLICAS_PER_SHARD_IN_DOMAIN
}
