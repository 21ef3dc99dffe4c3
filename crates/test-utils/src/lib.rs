//! Shared test utilities for affinity placement crates.
//!
//! This crate provides common test helpers to reduce boilerplate across test modules:
//!
//! - [`collection_map`] - Build a collection mapping from string pairs
//! - [`test_placement_config`] - A valid configuration using every field
//! - [`conflicting_placement_config`] - A configuration that fails validation
//! - [`strategies`] - Proptest generators for collection mappings and configurations

#![deny(unsafe_code)]

mod config;
pub use config::{collection_map, conflicting_placement_config, test_placement_config};

pub mod strategies;
