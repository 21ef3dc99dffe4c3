//! Machine-readable error codes for affinity placement configuration.
//!
//! Every error variant raised by the workspace maps to an [`ErrorCode`] with a
//! unique numeric identifier, a client/server classification, and a suggested
//! recovery action. The error enums themselves live next to the code that
//! raises them ([`crate::config::ConfigError`] here, `LoadError` in the
//! runtime crate).

use core::fmt;

/// Machine-readable error codes for programmatic error handling.
///
/// Codes are organized into ranges:
///
/// | Range       | Domain        | Examples                                  |
/// |-------------|---------------|-------------------------------------------|
/// | 1000–1099   | Construction  | Missing mapping argument                  |
/// | 1100–1199   | Validation    | Overlapping co-location rules             |
/// | 2000–2099   | Loading       | File I/O, document parsing, bad extension |
///
/// # Wire Format
///
/// Codes are transmitted as the string representation of their numeric value
/// (e.g., `"1100"`). Use [`ErrorCode::as_u16`] and [`ErrorCode::from_u16`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // --- Construction errors (1000–1099) ---
    /// A required mapping argument was absent.
    InvalidArgument = 1000,

    // --- Validation errors (1100–1199) ---
    /// `withCollection` and `withCollectionShards` share collection names.
    CollectionConflict = 1100,

    // --- Loading errors (2000–2099) ---
    /// The configuration file could not be read.
    LoadIo = 2000,
    /// The configuration document is not valid JSON or TOML for this schema.
    LoadParse = 2001,
    /// The configuration file extension is not a supported document format.
    LoadUnsupportedFormat = 2002,
}

impl ErrorCode {
    /// Returns the numeric code value.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Converts a numeric code to an `ErrorCode`, returning `None` for unknown values.
    #[must_use]
    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            1000 => Some(Self::InvalidArgument),
            1100 => Some(Self::CollectionConflict),
            2000 => Some(Self::LoadIo),
            2001 => Some(Self::LoadParse),
            2002 => Some(Self::LoadUnsupportedFormat),
            _ => None,
        }
    }

    /// Whether the error was caused by caller-supplied input.
    ///
    /// Client errors are surfaced to whoever supplied the configuration
    /// (for example an administrative API caller) rather than treated as a
    /// system fault.
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        matches!(self, Self::CollectionConflict | Self::LoadParse | Self::LoadUnsupportedFormat)
    }

    /// HTTP-style status for transports that report errors that way.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        if self.is_client_error() { 400 } else { 500 }
    }

    /// Suggested recovery action for this error code.
    ///
    /// Stable, human-readable guidance that is safe to display to operators.
    #[must_use]
    pub const fn suggested_action(self) -> &'static str {
        match self {
            Self::InvalidArgument => {
                "Pass an empty mapping instead of no mapping. This is a bug at the call site."
            },
            Self::CollectionConflict => {
                "Remove each listed collection from either withCollection or withCollectionShards."
            },
            Self::LoadIo => "Verify the configuration file exists and is readable.",
            Self::LoadParse => {
                "Fix the document syntax and check that every key uses the expected type."
            },
            Self::LoadUnsupportedFormat => "Use a .json or .toml configuration file.",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}
