use super::*;
use chrono::TimeZone;
use std::sync::Arc;
use std::thread;

fn tiger(id: i64, name: &str) -> Animal {
    Animal {
        id,
        name: name.to_string(),
        species: "Sumatran tiger".to_string(),
        sex: "female".to_string(),
        digestion_period_in_hours: 48.0,
        herbivore: false,
        location: None,
        last_fed_time: None,
    }
}

#[test]
fn test_upsert_and_get_animal() {
    let store = ZooStore::new();

    store.upsert_animal(tiger(1, "Nadia"));

    let animal = store.animal(1).unwrap();
    assert_eq!(animal.id, 1);
    assert_eq!(animal.name, "Nadia");
    assert_eq!(animal.location, None);
    assert_eq!(animal.last_fed_time, None);
}

#[test]
fn test_get_nonexistent_animal() {
    let store = ZooStore::new();
    assert!(store.animal(42).is_none());
}

#[test]
fn test_upsert_replaces_whole_record() {
    let store = ZooStore::new();
    store.upsert_animal(tiger(1, "Nadia"));

    let mut updated = tiger(1, "Nadia");
    updated.location = Some("B4".to_string());
    store.upsert_animal(updated);

    let animal = store.animal(1).unwrap();
    assert_eq!(animal.location, Some("B4".to_string()));
}

#[test]
fn test_remove_animal() {
    let store = ZooStore::new();
    store.upsert_animal(tiger(1, "Nadia"));

    let removed = store.remove_animal(1);
    assert_eq!(removed.unwrap().name, "Nadia");
    assert!(store.animal(1).is_none());

    // Removing again is a no-op
    assert!(store.remove_animal(1).is_none());
}

#[test]
fn test_list_animals() {
    let store = ZooStore::new();
    store.upsert_animal(tiger(1, "Nadia"));
    store.upsert_animal(tiger(2, "Ranu"));
    store.upsert_animal(tiger(3, "Kirana"));

    let animals = store.animals();
    assert_eq!(animals.len(), 3);

    let ids: Vec<i64> = animals.iter().map(|a| a.id).collect();
    assert!(ids.contains(&1));
    assert!(ids.contains(&2));
    assert!(ids.contains(&3));
}

#[test]
fn test_maintenance_upsert_and_get() {
    let store = ZooStore::new();
    let time = Utc.with_ymd_and_hms(2026, 2, 9, 12, 0, 0).unwrap();

    assert!(store.maintenance("C7").is_none());

    store.upsert_maintenance("C7".to_string(), time);
    assert_eq!(store.maintenance("C7"), Some(time));

    let records = store.maintenance_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records["C7"], time);
}

#[test]
fn test_load_from_snapshot_replaces_state() {
    let store = ZooStore::new();
    store.upsert_animal(tiger(1, "Nadia"));
    store.upsert_maintenance(
        "A0".to_string(),
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    );

    let mut animals = HashMap::new();
    animals.insert(2, tiger(2, "Ranu"));
    let mut maintenance = HashMap::new();
    maintenance.insert(
        "B1".to_string(),
        Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
    );

    store.load_from_snapshot(animals, maintenance);

    assert!(store.animal(1).is_none());
    assert!(store.animal(2).is_some());
    assert!(store.maintenance("A0").is_none());
    assert!(store.maintenance("B1").is_some());
}

#[test]
fn test_concurrent_upserts() {
    let store = Arc::new(ZooStore::new());
    let mut handles = vec![];

    // Spawn 10 threads, each upserting a different animal
    for i in 0..10 {
        let store_clone = Arc::clone(&store);
        let handle = thread::spawn(move || {
            store_clone.upsert_animal(tiger(i, &format!("tiger_{}", i)));
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.animal_count(), 10);
}

#[test]
fn test_concurrent_upserts_same_animal_never_tear() {
    let store = Arc::new(ZooStore::new());
    let mut handles = vec![];

    // All threads write the same id with internally consistent records;
    // whichever wins, the stored record must match one of them exactly.
    for i in 0..10 {
        let store_clone = Arc::clone(&store);
        let handle = thread::spawn(move || {
            let mut animal = tiger(1, &format!("writer_{}", i));
            animal.digestion_period_in_hours = (i + 1) as f64;
            store_clone.upsert_animal(animal);
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let animal = store.animal(1).unwrap();
    let writer: usize = animal.name.trim_start_matches("writer_").parse().unwrap();
    assert_eq!(animal.digestion_period_in_hours, (writer + 1) as f64);
}
