//! Configuration types for the affinity replica placement policy.
//!
//! This crate provides:
//! - [`PlacementConfig`], the tunable parameter set consumed by the placement engine
//! - System-property key constants shared with node metadata ([`config::sysprop`])
//! - Error types using snafu, with machine-readable [`ErrorCode`]s

pub mod config;
pub mod error;

// Re-export commonly used types at crate root
pub use config::{CollectionMap, ConfigError, PlacementConfig, PluginConfig};
pub use error::ErrorCode;
