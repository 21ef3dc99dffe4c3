//! Configuration types for the affinity placement policy.
//!
//! Configuration is populated from a persisted JSON or TOML document (or
//! built in code) and validated separately. Construction accepts any
//! well-formed mapping; semantic consistency is checked by `validate()`
//! before the configuration is handed to the placement engine.

mod placement;
pub mod sysprop;

use core::fmt;

pub use placement::*;
use serde::{Serialize, de::DeserializeOwned};
use snafu::Snafu;

use crate::error::ErrorCode;

/// Configuration error.
///
/// # Recovery Guide
///
/// | Variant              | Client error | Recovery Action                                   |
/// | -------------------- | ------------ | ------------------------------------------------- |
/// | `InvalidArgument`    | No           | Fix the call site; pass an empty mapping          |
/// | `CollectionConflict` | Yes          | Remove the listed collections from one mapping    |
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum ConfigError {
    /// A mapping argument was absent at construction time.
    ///
    /// This is a programming-contract violation, raised before any field is
    /// set.
    #[snafu(display("invalid argument: {field} must not be null"))]
    InvalidArgument {
        /// Document key of the missing mapping.
        field: &'static str,
    },

    /// The shard-oblivious and shard-aware co-location rules govern the same
    /// collections.
    #[snafu(display(
        "withCollection and withCollectionShards must be disjoint, but {collections:?} are in common"
    ))]
    CollectionConflict {
        /// Collections present as keys in both mappings, in name order.
        collections: Vec<String>,
    },
}

impl ConfigError {
    /// Returns the machine-readable error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidArgument { .. } => ErrorCode::InvalidArgument,
            Self::CollectionConflict { .. } => ErrorCode::CollectionConflict,
        }
    }

    /// Whether the error reflects operator-supplied configuration.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.code().is_client_error()
    }

    /// Suggested recovery action for this error.
    #[must_use]
    pub const fn suggested_action(&self) -> &'static str {
        self.code().suggested_action()
    }
}

/// Configuration of a placement plugin.
///
/// Implementors are plain values that can be populated from a document,
/// validated on demand, and then shared read-only across threads.
pub trait PluginConfig:
    Serialize + DeserializeOwned + Default + Clone + fmt::Debug + Send + Sync + 'static
{
    /// Checks cross-field consistency.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first inconsistency found.
    fn validate(&self) -> Result<(), ConfigError>;

    /// Returns the document keys whose values differ from `other`.
    fn diff(&self, other: &Self) -> Vec<&'static str>;
}

impl PluginConfig for PlacementConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        PlacementConfig::validate(self)
    }

    fn diff(&self, other: &Self) -> Vec<&'static str> {
        PlacementConfig::diff(self, other)
    }
}
