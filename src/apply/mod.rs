use crate::event::FeedEvent;
use crate::store::{Animal, ZooStore};
use chrono::{DateTime, Utc};


/// Outcome of applying one event against the store.
///
/// Only `Applied` changed state. The other variants are expected no-ops
/// under partial or re-delivered feeds, not errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Entity state changed
    Applied,
    /// Duplicate add for an id already in the store
    AlreadyExists,
    /// Event references an animal the store does not hold
    UnknownAnimal,
    /// Timestamp does not advance the stored one
    Stale,
}

impl Outcome {
    /// True when the event changed entity state
    pub fn applied(self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// Apply a single feed event to the store.
///
/// Transitions are written so that replaying a batch, or an overlapping
/// superset of one, converges on the same state: adds are insert-if-absent,
/// feeding and maintenance times only ever move forward, and events for
/// unknown animals are dropped. Events must already be in chronological
/// order; the location rule relies on it.
pub fn apply(store: &ZooStore, event: &FeedEvent) -> Outcome {
    match event {
        FeedEvent::AnimalAdded {
            id,
            name,
            species,
            sex,
            digestion_period_in_hours,
            herbivore,
            ..
        } => {
            // Insert-if-absent: a re-delivered add must never clobber
            // location or feeding state merged since the first delivery.
            if store.animal(*id).is_some() {
                return Outcome::AlreadyExists;
            }
            store.upsert_animal(Animal {
                id: *id,
                name: name.clone(),
                species: species.clone(),
                sex: sex.clone(),
                digestion_period_in_hours: *digestion_period_in_hours,
                herbivore: *herbivore,
                location: None,
                last_fed_time: None,
            });
            Outcome::Applied
        }

        FeedEvent::AnimalRemoved { animal_id, .. } => match store.remove_animal(*animal_id) {
            Some(_) => Outcome::Applied,
            None => Outcome::UnknownAnimal,
        },

        FeedEvent::AnimalLocationUpdated {
            animal_id,
            location,
            ..
        } => {
            // Last write in chronological order wins. No per-field timestamp
            // is kept for location, unlike feeding and maintenance.
            match store.animal(*animal_id) {
                Some(mut animal) => {
                    animal.location = Some(location.clone());
                    store.upsert_animal(animal);
                    Outcome::Applied
                }
                None => Outcome::UnknownAnimal,
            }
        }

        FeedEvent::AnimalFed { animal_id, time } => match store.animal(*animal_id) {
            Some(mut animal) => {
                if advances(animal.last_fed_time, *time) {
                    animal.last_fed_time = Some(*time);
                    store.upsert_animal(animal);
                    Outcome::Applied
                } else {
                    Outcome::Stale
                }
            }
            None => Outcome::UnknownAnimal,
        },

        FeedEvent::MaintenancePerformed { location, time } => {
            if advances(store.maintenance(location), *time) {
                store.upsert_maintenance(location.clone(), *time);
                Outcome::Applied
            } else {
                Outcome::Stale
            }
        }
    }
}

/// Monotonicity guard: an incoming timestamp advances stored state only when
/// it is strictly after the stored one (or nothing is stored yet).
fn advances(current: Option<DateTime<Utc>>, incoming: DateTime<Utc>) -> bool {
    match current {
        None => true,
        Some(stored) => incoming > stored,
    }
}
