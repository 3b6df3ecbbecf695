use crate::snapshot::recovery;
use crate::snapshot::{config::SnapshotConfig, Snapshot};
use crate::store::ZooStore;
use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Writes store snapshots and prunes old ones.
///
/// The manager has no timer of its own: the reconciler persists after each
/// successful pass, so pass cadence is snapshot cadence.
pub struct SnapshotManager {
    store: Arc<ZooStore>,
    config: SnapshotConfig,
}

impl SnapshotManager {
    /// Create new snapshot manager
    pub fn new(store: Arc<ZooStore>, config: SnapshotConfig) -> Self {
        Self { store, config }
    }

    /// Whether snapshot persistence is enabled
    pub fn enabled(&self) -> bool {
        self.config.enabled
    }

    /// Snapshot current store state and save to the filesystem
    pub fn save(&self) -> Result<()> {
        fs::create_dir_all(&self.config.directory)
            .context("Failed to create snapshot directory")?;

        let snapshot = Snapshot::from_store(&self.store);
        let record_count = snapshot.record_count();

        let path = self.snapshot_path();
        snapshot.save_to_file(&path)?;

        info!(
            records = record_count,
            path = %path.display(),
            "Snapshot saved"
        );

        self.cleanup_old_snapshots()?;

        Ok(())
    }

    /// Generate snapshot file path with timestamp
    ///
    /// Format: snapshot-{timestamp}.json.gz
    /// Example: snapshot-20260212T153045.123Z.json.gz
    fn snapshot_path(&self) -> PathBuf {
        let timestamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
        let filename = format!("snapshot-{}.json.gz", timestamp);
        self.config.directory.join(filename)
    }

    /// Delete old snapshots, keeping only the most recent N
    fn cleanup_old_snapshots(&self) -> Result<()> {
        let mut snapshots = recovery::list_snapshots(&self.config.directory)?;

        if snapshots.len() <= self.config.keep_count {
            return Ok(());
        }

        // Sort by filename (timestamp is lexicographically sortable)
        snapshots.sort();

        let delete_count = snapshots.len() - self.config.keep_count;
        let to_delete = &snapshots[..delete_count];

        for path in to_delete {
            if let Err(e) = fs::remove_file(path) {
                error!(error = %e, path = %path.display(), "Failed to delete old snapshot");
            } else {
                info!(path = %path.display(), "Deleted old snapshot");
            }
        }

        Ok(())
    }
}
