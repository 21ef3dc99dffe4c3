//! Reading placement configuration documents from disk.
//!
//! Documents are JSON or TOML, chosen by file extension. Every loaded
//! configuration is validated before it is returned.

use std::{fmt, path::Path};

use affinity_placement_types::PluginConfig;
use snafu::{OptionExt, ResultExt};
use tracing::{debug, info, warn};

use crate::error::{
    ConfigSnafu, IoSnafu, JsonSnafu, LoadError, TomlSnafu, UnsupportedFormatSnafu,
};

/// Document format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON, as stored in persisted cluster state.
    Json,
    /// TOML, for hand-written node configuration files.
    Toml,
}

impl ConfigFormat {
    /// Picks the format from a file extension (case insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if extension.eq_ignore_ascii_case("toml") {
            Some(Self::Toml)
        } else {
            None
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Toml => f.write_str("toml"),
        }
    }
}

/// Parses and validates a configuration document.
///
/// Keys missing from the document take their defaults.
///
/// # Errors
///
/// Returns [`LoadError::Json`] or [`LoadError::Toml`] if the document does not
/// decode, or [`LoadError::Config`] if the decoded configuration fails
/// validation.
pub fn load_from_str<C: PluginConfig>(contents: &str, format: ConfigFormat) -> Result<C, LoadError> {
    let config: C = match format {
        ConfigFormat::Json => serde_json::from_str(contents).context(JsonSnafu)?,
        ConfigFormat::Toml => toml::from_str(contents).context(TomlSnafu)?,
    };
    debug!(%format, "Decoded placement config document");

    if let Err(e) = config.validate() {
        warn!(error = %e, code = %e.code(), "Placement config rejected");
        return Err(e).context(ConfigSnafu);
    }
    Ok(config)
}

/// Reads, parses and validates a configuration file.
///
/// # Errors
///
/// Returns [`LoadError::UnsupportedFormat`] for extensions other than
/// `.json`/`.toml`, [`LoadError::Io`] if the file cannot be read, and any
/// error from [`load_from_str`].
pub fn load_from_path<C: PluginConfig>(path: &Path) -> Result<C, LoadError> {
    let format = ConfigFormat::from_path(path).context(UnsupportedFormatSnafu { path })?;
    let contents = std::fs::read_to_string(path).context(IoSnafu { path })?;
    let config = load_from_str(&contents, format)?;
    info!(config_path = %path.display(), %format, "Loaded placement config");
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::io::Write;

    use affinity_placement_test_utils::collection_map;
    use affinity_placement_types::{ErrorCode, PlacementConfig};
    use tempfile::NamedTempFile;

    use super::*;

    fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a/b.json")), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_path(Path::new("b.TOML")), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_path(Path::new("b.yaml")), None);
        assert_eq!(ConfigFormat::from_path(Path::new("placement")), None);
    }

    #[test]
    fn test_load_json_document() {
        let file = temp_file(
            ".json",
            r#"{
                "minimalFreeDiskGB": 30,
                "withCollection": {"orders": "customers"},
                "withCollectionShards": {"invoices": "orders"},
                "maxReplicasPerShardInDomain": 2
            }"#,
        );

        let config: PlacementConfig = load_from_path(file.path()).unwrap();
        assert_eq!(config.minimal_free_disk_gb, 30);
        assert_eq!(config.prioritized_free_disk_gb, 100);
        assert_eq!(config.with_collection, collection_map(&[("orders", "customers")]));
        assert_eq!(config.with_collection_shards, collection_map(&[("invoices", "orders")]));
        assert_eq!(config.max_replicas_per_shard_in_domain, 2);
    }

    #[test]
    fn test_load_toml_document() {
        let file = temp_file(
            ".toml",
            r#"
prioritizedFreeDiskGB = 250
spreadAcrossDomains = true

[collectionNodeType]
logs = "indexing"
"#,
        );

        let config: PlacementConfig = load_from_path(file.path()).unwrap();
        assert_eq!(config.prioritized_free_disk_gb, 250);
        assert!(config.spread_across_domains);
        assert_eq!(config.required_node_types("logs"), Some(vec!["indexing"]));
    }

    #[test]
    fn test_load_rejects_conflicting_document() {
        let file = temp_file(
            ".json",
            r#"{
                "withCollection": {"collectionA": "collectionB"},
                "withCollectionShards": {"collectionA": "collectionC"}
            }"#,
        );

        let err = load_from_path::<PlacementConfig>(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Config { .. }));
        assert_eq!(err.code(), ErrorCode::CollectionConflict);
        assert!(err.to_string().contains("collectionA"));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let err = load_from_str::<PlacementConfig>("{ not json", ConfigFormat::Json).unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
        assert_eq!(err.code(), ErrorCode::LoadParse);
    }

    #[test]
    fn test_load_rejects_wrong_value_type() {
        let err = load_from_str::<PlacementConfig>(
            "minimalFreeDiskGB = \"lots\"",
            ConfigFormat::Toml,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Toml { .. }));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let file = temp_file(".yaml", "minimalFreeDiskGB: 1");
        let err = load_from_path::<PlacementConfig>(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat { .. }));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from_path::<PlacementConfig>(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert_eq!(err.code(), ErrorCode::LoadIo);
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_empty_documents_yield_defaults() {
        let json: PlacementConfig = load_from_str("{}", ConfigFormat::Json).unwrap();
        let toml: PlacementConfig = load_from_str("", ConfigFormat::Toml).unwrap();
        assert_eq!(json, PlacementConfig::default());
        assert_eq!(toml, PlacementConfig::default());
    }
}
