use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An animal currently resident in the zoo.
///
/// Identity is the externally assigned integer id. Records are whole-record
/// upserted; a removed animal leaves no tombstone, so a later add for the
/// same id starts a fresh record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Animal {
    /// Externally assigned identity (stable across the feed)
    pub id: i64,

    pub name: String,

    pub species: String,

    pub sex: String,

    /// Hours after feeding before a meat-eater is hungry again. Always > 0.
    pub digestion_period_in_hours: f64,

    /// Plant-eaters never make a zone unsafe
    pub herbivore: bool,

    /// Free-text location code from the feed; None until the first
    /// location update. Codes that don't name a real grid cell are simply
    /// invisible to the grid.
    pub location: Option<String>,

    /// None means never fed (or not yet observed)
    pub last_fed_time: Option<DateTime<Utc>>,
}

impl Animal {
    /// True when this animal is past its digestion window at `now`.
    ///
    /// An animal that has never been fed counts as hungry. Herbivores can be
    /// hungry too; whether that matters is the grid's concern.
    pub fn hungry_at(&self, now: DateTime<Utc>) -> bool {
        match self.last_fed_time {
            None => true,
            Some(fed) => {
                let hours_since = (now - fed).num_milliseconds() as f64 / 3_600_000.0;
                hours_since >= self.digestion_period_in_hours
            }
        }
    }
}
