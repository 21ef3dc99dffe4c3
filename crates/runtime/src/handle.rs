//! Shared, read-only access to the active placement configuration.
//!
//! Provides [`ConfigHandle`] — a thread-safe handle that only ever publishes
//! validated configurations. Placement decisions read the current snapshot
//! via `ArcSwap::load()` (lock-free) and operators replace it with
//! [`ConfigHandle::update`] or [`ConfigHandle::reload_from`].

use std::{path::Path, sync::Arc};

use affinity_placement_types::{ConfigError, PlacementConfig, PluginConfig};
use arc_swap::ArcSwap;
use snafu::ResultExt;
use tracing::{debug, info, warn};

use crate::{
    error::{ConfigSnafu, LoadError},
    loader::load_from_path,
};

/// Thread-safe handle to the active configuration.
///
/// Uses `ArcSwap` for lock-free reads and atomic writes. Safe to clone and
/// share across threads; all clones point to the same underlying slot.
/// Published snapshots are immutable: a reader holding one keeps a consistent
/// view even while an update is swapped in.
#[derive(Debug, Clone)]
pub struct ConfigHandle<C = PlacementConfig> {
    inner: Arc<ArcSwap<C>>,
}

impl<C: PluginConfig> ConfigHandle<C> {
    /// Validates `config` and freezes it behind a new handle.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from validation; no handle is created.
    pub fn new(config: C) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { inner: Arc::new(ArcSwap::from_pointee(config)) })
    }

    /// Load the current configuration.
    ///
    /// The returned guard is valid even if the configuration is updated
    /// concurrently.
    #[must_use]
    pub fn load(&self) -> arc_swap::Guard<Arc<C>> {
        self.inner.load()
    }

    /// Returns an owned snapshot of the current configuration.
    ///
    /// Prefer [`load`](Self::load) on hot paths; use this when the snapshot
    /// must outlive the current call.
    #[must_use]
    pub fn snapshot(&self) -> Arc<C> {
        self.inner.load_full()
    }

    /// Atomically replace the configuration.
    ///
    /// Validates `new_config` before swapping. Returns the document keys that
    /// differ from the configuration it replaced, or the validation error
    /// (the current configuration stays in place). Comparing and swapping is
    /// a single read-copy-update step, so concurrent updates never report a
    /// diff against a stale snapshot.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from validating `new_config`.
    pub fn update(&self, new_config: C) -> Result<Vec<&'static str>, ConfigError> {
        if let Err(e) = new_config.validate() {
            warn!(error = %e, code = %e.code(), "Rejected placement config update");
            return Err(e);
        }

        // The diff is recomputed on every retry so it always describes the
        // snapshot that was actually replaced.
        let new_config = Arc::new(new_config);
        let mut changed = Vec::new();
        self.inner.rcu(|current| {
            changed = current.diff(&new_config);
            if changed.is_empty() { Arc::clone(current) } else { Arc::clone(&new_config) }
        });

        if changed.is_empty() {
            debug!("Placement config update has no changes");
        } else {
            info!(changed_fields = ?changed, "Placement config updated");
        }
        Ok(changed)
    }

    /// Re-reads a configuration file and applies it via [`update`](Self::update).
    ///
    /// If reading, parsing, or validation fails, the current configuration
    /// remains unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the file cannot be read, parsed, or validated.
    pub fn reload_from(&self, path: &Path) -> Result<Vec<&'static str>, LoadError> {
        let new_config = load_from_path::<C>(path).inspect_err(|e| {
            warn!(
                config_path = %path.display(),
                error = %e,
                "Config reload failed, keeping current config"
            );
        })?;
        self.update(new_config).context(ConfigSnafu)
    }
}

impl Default for ConfigHandle<PlacementConfig> {
    fn default() -> Self {
        Self { inner: Arc::new(ArcSwap::from_pointee(PlacementConfig::default())) }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::{
        io::Write,
        sync::atomic::{AtomicUsize, Ordering},
        thread,
    };

    use affinity_placement_test_utils::{
        collection_map, conflicting_placement_config, test_placement_config,
    };

    use super::*;

    #[test]
    fn test_new_freezes_valid_config() {
        let handle = ConfigHandle::new(test_placement_config()).unwrap();
        assert_eq!(**handle.load(), test_placement_config());
    }

    #[test]
    fn test_new_rejects_conflicting_config() {
        let err = ConfigHandle::new(conflicting_placement_config()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::CollectionConflict { collections: vec!["orders".to_string()] }
        );
    }

    #[test]
    fn test_default_holds_default_config() {
        let handle: ConfigHandle = ConfigHandle::default();
        assert_eq!(*handle.snapshot(), PlacementConfig::default());
    }

    #[test]
    fn test_update_swaps_config() {
        let handle: ConfigHandle = ConfigHandle::default();
        let changed = handle.update(test_placement_config()).unwrap();
        assert_eq!(
            changed,
            vec![
                "minimalFreeDiskGB",
                "prioritizedFreeDiskGB",
                "withCollection",
                "collectionNodeType",
                "withCollectionShards",
                "spreadAcrossDomains",
                "maxReplicasPerShardInDomain",
            ]
        );
        assert_eq!(handle.load().minimal_free_disk_gb, 10);
    }

    #[test]
    fn test_update_reports_no_changes_when_identical() {
        let handle = ConfigHandle::new(test_placement_config()).unwrap();
        let changed = handle.update(test_placement_config()).unwrap();
        assert!(changed.is_empty());
    }

    #[test]
    fn test_update_rejects_invalid_config_and_keeps_current() {
        let handle = ConfigHandle::new(test_placement_config()).unwrap();
        let result = handle.update(conflicting_placement_config());
        assert!(result.is_err());
        assert_eq!(*handle.snapshot(), test_placement_config());
    }

    #[test]
    fn test_snapshot_survives_update() {
        let handle: ConfigHandle = ConfigHandle::default();
        let before = handle.snapshot();
        handle.update(PlacementConfig::with_disk_thresholds(1, 2)).unwrap();
        assert_eq!(*before, PlacementConfig::default());
        assert_eq!(handle.load().minimal_free_disk_gb, 1);
    }

    #[test]
    fn test_clone_shares_same_config() {
        let handle: ConfigHandle = ConfigHandle::default();
        let clone = handle.clone();
        handle.update(test_placement_config()).unwrap();
        assert!(clone.load().spread_across_domains);
    }

    #[test]
    fn test_concurrent_readers_see_valid_snapshots() {
        let handle = ConfigHandle::new(test_placement_config()).unwrap();
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let handle = handle.clone();
                thread::spawn(move || {
                    for _ in 0..1_000 {
                        assert!(handle.load().validate().is_ok());
                    }
                })
            })
            .collect();

        for gb in 0..100 {
            handle.update(PlacementConfig::with_disk_thresholds(gb, 100)).unwrap();
        }
        for reader in readers {
            reader.join().unwrap();
        }
    }

    #[test]
    fn test_concurrent_updates_report_diffs_against_replaced_config() {
        let low = PlacementConfig::with_disk_thresholds(5, 100);
        let high = PlacementConfig::with_disk_thresholds(50, 100);
        let handle = ConfigHandle::new(low.clone()).unwrap();
        let transitions = Arc::new(AtomicUsize::new(0));

        let writers: Vec<_> = (0..4)
            .map(|_| {
                let handle = handle.clone();
                let transitions = Arc::clone(&transitions);
                let (low, high) = (low.clone(), high.clone());
                thread::spawn(move || {
                    for i in 0..500 {
                        let next = if i % 2 == 0 { high.clone() } else { low.clone() };
                        let changed = handle.update(next).unwrap();
                        if !changed.is_empty() {
                            assert_eq!(changed, vec!["minimalFreeDiskGB"]);
                            transitions.fetch_add(1, Ordering::SeqCst);
                        }
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        // Every reported change flips the stored value, so the parity of the
        // reported changes determines the final value.
        let expected = if transitions.load(Ordering::SeqCst) % 2 == 0 { low } else { high };
        assert_eq!(*handle.snapshot(), expected);
    }

    #[test]
    fn test_reload_from_applies_changes() {
        let handle: ConfigHandle = ConfigHandle::default();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
minimalFreeDiskGB = 40

[withCollectionShards]
invoices = "orders"
"#
        )
        .unwrap();

        let changed = handle.reload_from(file.path()).unwrap();
        assert_eq!(changed, vec!["minimalFreeDiskGB", "withCollectionShards"]);
        assert_eq!(
            handle.load().with_collection_shards,
            collection_map(&[("invoices", "orders")])
        );
    }

    #[test]
    fn test_reload_from_rejects_conflict_and_keeps_current() {
        let handle = ConfigHandle::new(test_placement_config()).unwrap();
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"withCollection": {{"a": "b"}}, "withCollectionShards": {{"a": "c"}}}}"#
        )
        .unwrap();

        let err = handle.reload_from(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Config { .. }));
        assert_eq!(*handle.snapshot(), test_placement_config());
    }
}
