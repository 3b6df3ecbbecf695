use super::*;
use crate::config::FeedConfig;
use crate::snapshot::config::SnapshotConfig;
use crate::store::Animal;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 9, hour, min, 0).unwrap()
}

fn test_reconciler() -> Reconciler {
    let feed_config = FeedConfig {
        url: "http://localhost:0/feed".to_string(),
        ..FeedConfig::default()
    };
    let snapshot_config = SnapshotConfig {
        enabled: false,
        ..SnapshotConfig::default()
    };

    let store = Arc::new(ZooStore::new());
    Reconciler::new(
        Arc::clone(&store),
        FeedClient::new(&feed_config).unwrap(),
        SnapshotManager::new(store, snapshot_config),
        60,
    )
}

fn added(id: i64, name: &str, herbivore: bool, hour: u32) -> FeedEvent {
    FeedEvent::AnimalAdded {
        id,
        name: name.to_string(),
        species: "Sumatran tiger".to_string(),
        sex: "female".to_string(),
        digestion_period_in_hours: 48.0,
        herbivore,
        time: at(hour, 0),
    }
}

fn sample_batch() -> Vec<FeedEvent> {
    vec![
        FeedEvent::AnimalFed { animal_id: 1, time: at(11, 0) },
        added(1, "Nadia", false, 8),
        FeedEvent::AnimalLocationUpdated {
            animal_id: 1,
            location: "B4".to_string(),
            time: at(9, 0),
        },
        FeedEvent::MaintenancePerformed { location: "C7".to_string(), time: at(10, 0) },
        added(2, "Koko", true, 8),
        FeedEvent::AnimalLocationUpdated {
            animal_id: 1,
            location: "C2".to_string(),
            time: at(12, 0),
        },
        FeedEvent::AnimalFed { animal_id: 1, time: at(10, 30) },
        FeedEvent::AnimalRemoved { animal_id: 2, time: at(13, 0) },
    ]
}

/// Full store contents in a comparable form
fn state_of(store: &ZooStore) -> (Vec<Animal>, HashMap<String, DateTime<Utc>>) {
    let mut animals = store.animals();
    animals.sort_by_key(|a| a.id);
    (animals, store.maintenance_records())
}

#[test]
fn test_batch_is_applied_in_chronological_order() {
    let reconciler = test_reconciler();
    let summary = reconciler.reconcile_batch(sample_batch());

    assert_eq!(summary.fetched, 8);
    assert_eq!(summary.invalid, 0);
    // Everything applies once sorted: the 11:00 feeding lands after the add
    assert_eq!(summary.applied, 8);
    assert_eq!(summary.skipped, 0);

    let animal = reconciler.store.animal(1).unwrap();
    assert_eq!(animal.location, Some("C2".to_string()));
    assert_eq!(animal.last_fed_time, Some(at(11, 0)));
    assert!(reconciler.store.animal(2).is_none());
    assert_eq!(reconciler.store.maintenance("C7"), Some(at(10, 0)));
}

#[test]
fn test_permuted_batches_converge_to_identical_state() {
    let batch = sample_batch();

    let forward = test_reconciler();
    forward.reconcile_batch(batch.clone());

    let reversed = test_reconciler();
    let mut permuted = batch.clone();
    permuted.reverse();
    reversed.reconcile_batch(permuted);

    let rotated = test_reconciler();
    let mut permuted = batch;
    permuted.rotate_left(3);
    rotated.reconcile_batch(permuted);

    assert_eq!(state_of(&forward.store), state_of(&reversed.store));
    assert_eq!(state_of(&forward.store), state_of(&rotated.store));
}

#[test]
fn test_replaying_the_same_batch_is_idempotent() {
    let reconciler = test_reconciler();

    let first = reconciler.reconcile_batch(sample_batch());
    let state_after_first = state_of(&reconciler.store);

    let second = reconciler.reconcile_batch(sample_batch());
    assert_eq!(state_of(&reconciler.store), state_after_first);

    assert_eq!(first.applied, 8);
    // On replay only the unguarded transitions re-apply (location updates
    // and the removal of an animal whose add also re-applied)
    assert!(second.applied < first.applied);
    assert_eq!(second.fetched, 8);
}

#[test]
fn test_overlapping_superset_batch_converges() {
    let reconciler = test_reconciler();
    reconciler.reconcile_batch(sample_batch());

    // The feed grew: old events re-delivered plus a new feeding
    let mut grown = sample_batch();
    grown.push(FeedEvent::AnimalFed { animal_id: 1, time: at(14, 0) });
    reconciler.reconcile_batch(grown);

    let animal = reconciler.store.animal(1).unwrap();
    assert_eq!(animal.last_fed_time, Some(at(14, 0)));
    assert_eq!(animal.location, Some("C2".to_string()));
}

#[test]
fn test_last_fed_is_maximum_event_time_regardless_of_input_order() {
    let mut batch = vec![added(1, "Nadia", false, 0)];
    for (hour, min) in [(9, 0), (15, 30), (11, 0), (10, 45), (14, 0)] {
        batch.push(FeedEvent::AnimalFed { animal_id: 1, time: at(hour, min) });
    }

    let forward = test_reconciler();
    forward.reconcile_batch(batch.clone());

    let backward = test_reconciler();
    batch.reverse();
    backward.reconcile_batch(batch);

    assert_eq!(forward.store.animal(1).unwrap().last_fed_time, Some(at(15, 30)));
    assert_eq!(backward.store.animal(1).unwrap().last_fed_time, Some(at(15, 30)));
}

#[test]
fn test_events_for_never_added_animal_are_skipped() {
    let reconciler = test_reconciler();
    let summary = reconciler.reconcile_batch(vec![
        FeedEvent::AnimalFed { animal_id: 42, time: at(9, 0) },
        FeedEvent::AnimalLocationUpdated {
            animal_id: 42,
            location: "B4".to_string(),
            time: at(10, 0),
        },
        FeedEvent::AnimalRemoved { animal_id: 42, time: at(11, 0) },
    ]);

    assert_eq!(summary.applied, 0);
    assert_eq!(summary.skipped, 3);
    assert_eq!(reconciler.store.animal_count(), 0);
}

#[test]
fn test_invalid_events_are_dropped_not_fatal() {
    let reconciler = test_reconciler();

    let mut bad_add = added(1, "Nadia", false, 8);
    if let FeedEvent::AnimalAdded {
        digestion_period_in_hours,
        ..
    } = &mut bad_add
    {
        *digestion_period_in_hours = 0.0;
    }

    let summary = reconciler.reconcile_batch(vec![bad_add, added(2, "Koko", true, 9)]);

    assert_eq!(summary.invalid, 1);
    assert_eq!(summary.applied, 1);
    assert!(reconciler.store.animal(1).is_none());
    assert!(reconciler.store.animal(2).is_some());
}

#[test]
fn test_equal_timestamps_keep_feed_order() {
    let reconciler = test_reconciler();
    reconciler.reconcile_batch(vec![
        added(1, "Nadia", false, 8),
        FeedEvent::AnimalLocationUpdated {
            animal_id: 1,
            location: "B4".to_string(),
            time: at(9, 0),
        },
        FeedEvent::AnimalLocationUpdated {
            animal_id: 1,
            location: "C2".to_string(),
            time: at(9, 0),
        },
    ]);

    // Stable sort: the tie keeps original feed order, so C2 applies last
    assert_eq!(reconciler.store.animal(1).unwrap().location, Some("C2".to_string()));
}

#[tokio::test]
async fn test_pass_fails_cleanly_when_feed_unreachable() {
    let reconciler = test_reconciler();
    reconciler.reconcile_batch(vec![added(1, "Nadia", false, 8)]);

    // Port 0 is never a listening feed; the pass must abort without
    // touching merged state
    let result = reconciler.run_reconciliation_pass().await;
    assert!(result.is_err());
    assert_eq!(reconciler.store.animal_count(), 1);
}
