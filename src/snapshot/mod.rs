use crate::store::{Animal, ZooStore};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

pub mod config;
pub mod manager;
pub mod recovery;


/// Snapshot of merged zoo state at a specific point in time
///
/// Written after each successful reconciliation pass so the last merged
/// state survives a restart. Losing a snapshot is never fatal: the next
/// pass rebuilds the same state from the feed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version (for future schema evolution)
    pub snapshot_version: String,

    /// Timestamp when snapshot was created
    pub created_at: DateTime<Utc>,

    /// All animals at snapshot time (id -> Animal)
    pub animals: HashMap<i64, Animal>,

    /// Last maintenance time per zone code
    pub maintenance: HashMap<String, DateTime<Utc>>,
}

impl Snapshot {
    /// Create snapshot from current store state
    pub fn from_store(store: &ZooStore) -> Self {
        let animals: HashMap<i64, Animal> = store
            .animals()
            .into_iter()
            .map(|animal| (animal.id, animal))
            .collect();

        Self {
            snapshot_version: "1".to_string(),
            created_at: Utc::now(),
            animals,
            maintenance: store.maintenance_records(),
        }
    }

    /// Number of records in the snapshot (animals + maintenance)
    pub fn record_count(&self) -> usize {
        self.animals.len() + self.maintenance.len()
    }

    /// Save snapshot to filesystem as compressed JSON (gzip)
    ///
    /// Uses atomic write: writes to .tmp file, fsyncs, then renames.
    /// This prevents partial/corrupt snapshots from being read.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string(self).context("Failed to serialize snapshot to JSON")?;

        let tmp_path = path.with_extension("tmp");

        {
            let tmp_file =
                File::create(&tmp_path).context("Failed to create temporary snapshot file")?;

            let mut encoder = GzEncoder::new(tmp_file, Compression::default());
            encoder
                .write_all(json.as_bytes())
                .context("Failed to write snapshot data")?;

            let tmp_file = encoder
                .finish()
                .context("Failed to finish snapshot compression")?;
            tmp_file
                .sync_all()
                .context("Failed to sync snapshot to disk")?;
        }

        fs::rename(&tmp_path, path).context("Failed to rename snapshot into place")?;

        Ok(())
    }

    /// Load snapshot from a gzip JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let file = File::open(path).context("Failed to open snapshot file")?;

        let mut decoder = GzDecoder::new(file);
        let mut json = String::new();
        decoder
            .read_to_string(&mut json)
            .context("Failed to decompress snapshot")?;

        let snapshot: Snapshot =
            serde_json::from_str(&json).context("Failed to parse snapshot JSON")?;

        Ok(snapshot)
    }
}
