use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for snapshot persistence
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Persist a snapshot after each successful reconciliation pass
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Directory to store snapshots
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Number of snapshots to keep (delete oldest)
    #[serde(default = "default_keep_count")]
    pub keep_count: usize,
}

fn default_enabled() -> bool {
    true
}

fn default_directory() -> PathBuf {
    PathBuf::from("/var/lib/paddock/snapshots")
}

fn default_keep_count() -> usize {
    10
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            directory: default_directory(),
            keep_count: default_keep_count(),
        }
    }
}
