use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::{validate, ValidationError};

/// FeedEvent represents one entry from the zoo's telemetry feed.
///
/// The feed delivers a JSON array of objects discriminated by a `kind` field.
/// Every kind carries a `time` instant used for global ordering and per-entity
/// conflict resolution. Entries arrive unordered and may be re-delivered
/// across fetches; ordering and merge rules live in the reconciler and
/// applier, not here.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedEvent {
    /// A new animal transferred into the zoo
    AnimalAdded {
        id: i64,
        name: String,
        species: String,
        sex: String,
        digestion_period_in_hours: f64,
        herbivore: bool,
        time: DateTime<Utc>,
    },

    /// An animal transferred out (or deceased); hard removal
    AnimalRemoved { animal_id: i64, time: DateTime<Utc> },

    /// An animal moved to a new location code
    AnimalLocationUpdated {
        animal_id: i64,
        location: String,
        time: DateTime<Utc>,
    },

    /// An animal was fed
    AnimalFed { animal_id: i64, time: DateTime<Utc> },

    /// An enclosure was serviced
    MaintenancePerformed { location: String, time: DateTime<Utc> },
}

impl FeedEvent {
    /// Event timestamp used as the global sort key.
    pub fn time(&self) -> DateTime<Utc> {
        match self {
            FeedEvent::AnimalAdded { time, .. }
            | FeedEvent::AnimalRemoved { time, .. }
            | FeedEvent::AnimalLocationUpdated { time, .. }
            | FeedEvent::AnimalFed { time, .. }
            | FeedEvent::MaintenancePerformed { time, .. } => *time,
        }
    }

    /// Wire-format discriminator, for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            FeedEvent::AnimalAdded { .. } => "animal_added",
            FeedEvent::AnimalRemoved { .. } => "animal_removed",
            FeedEvent::AnimalLocationUpdated { .. } => "animal_location_updated",
            FeedEvent::AnimalFed { .. } => "animal_fed",
            FeedEvent::MaintenancePerformed { .. } => "maintenance_performed",
        }
    }

    /// Validates event fields beyond what deserialization enforces.
    ///
    /// Returns Ok(()) if valid, Err(ValidationError) otherwise. Invalid
    /// events are dropped by the reconciler with a warning; they never abort
    /// a pass.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate(self)
    }
}
