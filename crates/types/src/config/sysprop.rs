//! Node system-property keys interpreted by the placement engine.
//!
//! These names are the contract between [`PlacementConfig`](super::PlacementConfig)
//! and the metadata each node advertises. The configuration only refers to
//! them; reading them from nodes is the placement engine's job.

/// System property naming the (public cloud) Availability Zone a node is in.
///
/// Any string is accepted; different strings denote different zones. Nodes
/// that do not define it are all placed in [`UNDEFINED_AVAILABILITY_ZONE`].
pub const AVAILABILITY_ZONE: &str = "availability_zone";

/// System property listing the replica types a node accepts.
///
/// A comma-separated list (or single value) of replica type names, case
/// insensitive. An undefined property accepts every replica type.
pub const REPLICA_TYPE: &str = "replica_type";

/// System property listing the arbitrary "node types" of a node, for example
/// `indexing`.
///
/// A comma-separated list (or single label). Labels must not contain commas
/// and are OR-ed for placement purposes. Matched against
/// [`PlacementConfig::collection_node_type`](super::PlacementConfig::collection_node_type).
pub const NODE_TYPE: &str = "node_type";

/// System property naming the spread domain group of a node (rack, physical
/// host, ...).
///
/// Used when [`PlacementConfig::spread_across_domains`](super::PlacementConfig::spread_across_domains)
/// is set.
pub const SPREAD_DOMAIN: &str = "spread_domain";

/// Availability Zone assigned to nodes that do not define [`AVAILABILITY_ZONE`].
///
/// Must not collide with a real zone name.
pub const UNDEFINED_AVAILABILITY_ZONE: &str = "uNd3f1NeD";
