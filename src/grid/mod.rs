use crate::store::{Animal, ZooStore};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

mod zone;

pub use zone::{Zone, GRID_COLS, GRID_ROWS};

/// A zone is due for maintenance once its last service is older than this
const MAINTENANCE_WINDOW_DAYS: i64 = 30;

/// Derived status of one grid cell. Never stored; recomputed per request.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneStatus {
    pub zone: Zone,

    /// False when some occupant is a hungry meat-eater
    pub is_safe: bool,

    /// True unless the zone was serviced within the last 30 days
    pub maintenance_required: bool,

    /// Occupant names, in store listing order
    pub animals: Vec<String>,
}

/// Compute the full 16x26 safety grid from current store contents, row-major.
///
/// Read-only projection: never mutates the store, and may run during a
/// reconciliation pass. It can then observe a partially applied batch, which
/// is acceptable; the grid is always best-effort as of `now`, not
/// transactionally isolated.
pub fn compute_grid(store: &ZooStore, now: DateTime<Utc>) -> Vec<Vec<ZoneStatus>> {
    // Bucket animals by parsed zone; unmapped locations are invisible
    let mut occupants: HashMap<Zone, Vec<Animal>> = HashMap::new();
    for animal in store.animals() {
        if let Some(zone) = animal.location.as_deref().and_then(Zone::parse) {
            occupants.entry(zone).or_default().push(animal);
        }
    }

    let maintenance = store.maintenance_records();

    (0..GRID_ROWS)
        .map(|row_idx| {
            (0..GRID_COLS)
                .filter_map(|col_idx| Zone::new(col_idx, row_idx))
                .map(|zone| {
                    let zone_animals = occupants.remove(&zone).unwrap_or_default();
                    zone_status(
                        zone,
                        zone_animals,
                        maintenance.get(&zone.code()).copied(),
                        now,
                    )
                })
                .collect()
        })
        .collect()
}

/// Derive one cell's status from its occupants and maintenance record
fn zone_status(
    zone: Zone,
    occupants: Vec<Animal>,
    last_maintenance: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> ZoneStatus {
    // First hungry meat-eater found settles the answer
    let is_safe = !occupants
        .iter()
        .any(|animal| !animal.herbivore && animal.hungry_at(now));

    let maintenance_required = match last_maintenance {
        Some(serviced) => now - serviced > Duration::days(MAINTENANCE_WINDOW_DAYS),
        None => true,
    };

    ZoneStatus {
        zone,
        is_safe,
        maintenance_required,
        animals: occupants.into_iter().map(|a| a.name).collect(),
    }
}
