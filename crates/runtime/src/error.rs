//! Errors raised while loading a placement configuration document.

use std::path::PathBuf;

use affinity_placement_types::{ConfigError, ErrorCode};
use snafu::{Location, Snafu};

/// Error loading or applying a configuration document.
///
/// # Recovery Guide
///
/// | Variant             | Client error | Recovery Action                                |
/// | ------------------- | ------------ | ---------------------------------------------- |
/// | `Io`                | No           | Check the file exists and is readable          |
/// | `Json` / `Toml`     | Yes          | Fix the document syntax or value types         |
/// | `UnsupportedFormat` | Yes          | Use a `.json` or `.toml` file                  |
/// | `Config`            | Depends      | See [`ConfigError`]                            |
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum LoadError {
    /// The configuration file could not be read.
    #[snafu(display("Failed to read config file {} at {location}: {source}", path.display()))]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// The document is not valid JSON for this schema.
    #[snafu(display("Failed to parse JSON config: {source}"))]
    Json {
        /// Underlying decoder error.
        source: serde_json::Error,
    },

    /// The document is not valid TOML for this schema.
    #[snafu(display("Failed to parse TOML config: {source}"))]
    Toml {
        /// Underlying decoder error.
        source: toml::de::Error,
    },

    /// The file extension does not name a supported format.
    #[snafu(display("Unsupported config format for {}: expected .json or .toml", path.display()))]
    UnsupportedFormat {
        /// Path with the unsupported extension.
        path: PathBuf,
    },

    /// The document parsed but the configuration is inconsistent.
    #[snafu(display("Config validation failed: {source}"))]
    Config {
        /// Validation error.
        source: ConfigError,
    },
}

impl LoadError {
    /// Returns the machine-readable error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Io { .. } => ErrorCode::LoadIo,
            Self::Json { .. } | Self::Toml { .. } => ErrorCode::LoadParse,
            Self::UnsupportedFormat { .. } => ErrorCode::LoadUnsupportedFormat,
            Self::Config { source } => source.code(),
        }
    }

    /// Whether the error was caused by the supplied document.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.code().is_client_error()
    }
}
