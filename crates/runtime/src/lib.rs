//! Loading and shared access for affinity placement configuration.
//!
//! - [`load_from_path`] / [`load_from_str`] decode JSON or TOML documents and validate them
//! - [`ConfigHandle`] publishes validated configurations for lock-free concurrent reads
//! - [`LoadError`] covers I/O, decoding, and validation failures

#![deny(unsafe_code)]

mod error;
mod handle;
mod loader;

pub use error::LoadError;
pub use handle::ConfigHandle;
pub use loader::{ConfigFormat, load_from_path, load_from_str};
