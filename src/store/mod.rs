use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::collections::HashMap;
use tracing::info;

mod animal;
#[cfg(test)]
mod tests;

pub use animal::Animal;

/// ZooStore maintains the current-state view merged from the feed.
///
/// Two entity kinds: animals keyed by external id, and enclosure maintenance
/// records keyed by zone code. The store is a materialized view: events are
/// never kept, only their effect. Reads clone records out; writes replace
/// whole records under the map's shard lock, so readers never observe a
/// partially written entity.
pub struct ZooStore {
    /// Lock-free concurrent map for fast reads
    animals: DashMap<i64, Animal>,

    /// Last maintenance time per zone code; created on first event, never
    /// deleted
    maintenance: DashMap<String, DateTime<Utc>>,
}

impl ZooStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            animals: DashMap::new(),
            maintenance: DashMap::new(),
        }
    }

    /// Get animal by id
    pub fn animal(&self, id: i64) -> Option<Animal> {
        self.animals.get(&id).map(|a| a.clone())
    }

    /// Insert or replace an animal record
    pub fn upsert_animal(&self, animal: Animal) {
        self.animals.insert(animal.id, animal);
    }

    /// Remove an animal entirely, returning the removed record if present
    pub fn remove_animal(&self, id: i64) -> Option<Animal> {
        self.animals.remove(&id).map(|(_, animal)| animal)
    }

    /// All animal records. No ordering guarantee; callers must not depend
    /// on listing order.
    pub fn animals(&self) -> Vec<Animal> {
        self.animals.iter().map(|a| a.value().clone()).collect()
    }

    /// Last maintenance time for a zone, if any maintenance was ever recorded
    pub fn maintenance(&self, zone: &str) -> Option<DateTime<Utc>> {
        self.maintenance.get(zone).map(|t| *t)
    }

    /// Insert or replace a zone's last maintenance time
    pub fn upsert_maintenance(&self, zone: String, time: DateTime<Utc>) {
        self.maintenance.insert(zone, time);
    }

    /// All maintenance records as zone -> last maintenance time
    pub fn maintenance_records(&self) -> HashMap<String, DateTime<Utc>> {
        self.maintenance
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    /// Number of animal records
    pub fn animal_count(&self) -> usize {
        self.animals.len()
    }

    /// Load state from a recovered snapshot
    ///
    /// Clears existing state and replaces it with the snapshot contents.
    pub fn load_from_snapshot(
        &self,
        animals: HashMap<i64, Animal>,
        maintenance: HashMap<String, DateTime<Utc>>,
    ) {
        self.animals.clear();
        self.maintenance.clear();

        for (id, animal) in animals {
            self.animals.insert(id, animal);
        }
        for (zone, time) in maintenance {
            self.maintenance.insert(zone, time);
        }

        info!(
            animals = self.animals.len(),
            maintenance_records = self.maintenance.len(),
            "Loaded state from snapshot"
        );
    }
}

impl Default for ZooStore {
    fn default() -> Self {
        Self::new()
    }
}
