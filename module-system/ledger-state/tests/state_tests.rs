use ledger_state::*;

fn value_and_map() -> (StateValue<u32>, StateMap<u32, String>) {
    (
        StateValue::new(Prefix::new(b"value".to_vec())),
        StateMap::new(Prefix::new(b"map".to_vec())),
    )
}

#[test]
fn test_checkpoint_keeps_writes() {
    let (value, map) = value_and_map();
    let mut working_set = WorkingSet::new(SnapshotStorage::temporary());

    value.set(&11, &mut working_set);
    map.set(&1, &"one".to_owned(), &mut working_set);

    let mut working_set = working_set.checkpoint().to_revertable();
    assert_eq!(value.get(&mut working_set), Some(11));
    assert_eq!(map.get(&1, &mut working_set), Some("one".to_owned()));
}

#[test]
fn test_revert_drops_writes_and_events() {
    let (value, map) = value_and_map();
    let mut working_set = WorkingSet::new(SnapshotStorage::temporary());
    value.set(&1, &mut working_set);
    let mut working_set = working_set.checkpoint().to_revertable();

    value.set(&2, &mut working_set);
    map.set(&7, &"seven".to_owned(), &mut working_set);
    working_set.add_event("changed", &2u32);
    assert_eq!(working_set.events().len(), 1);

    let mut working_set = working_set.revert().to_revertable();
    assert_eq!(value.get(&mut working_set), Some(1));
    assert_eq!(map.get(&7, &mut working_set), None);
    assert!(working_set.events().is_empty());
}

#[test]
fn test_delete_then_revert_restores_value() {
    let (value, _) = value_and_map();
    let mut working_set = WorkingSet::new(SnapshotStorage::temporary());
    value.set(&5, &mut working_set);
    let mut working_set = working_set.checkpoint().to_revertable();

    value.delete(&mut working_set);
    assert!(value.get_or_err(&mut working_set).is_err());

    let mut working_set = working_set.revert().to_revertable();
    assert_eq!(value.get_or_err(&mut working_set).unwrap(), 5);
}

#[test]
fn test_freeze_and_commit_reach_the_storage() {
    let (value, map) = value_and_map();
    let storage = SnapshotStorage::temporary();
    let mut working_set = WorkingSet::new(storage.clone());

    value.set(&42, &mut working_set);
    map.set(&3, &"three".to_owned(), &mut working_set);

    let writes = working_set.checkpoint().freeze();
    assert_eq!(writes.ordered_writes.len(), 2);
    assert!(storage.is_empty());

    storage.commit(&writes).unwrap();

    let mut fresh = WorkingSet::new(storage);
    assert_eq!(value.get(&mut fresh), Some(42));
    assert_eq!(map.get(&3, &mut fresh), Some("three".to_owned()));
}

#[test]
fn test_events_decode_in_order() {
    let mut working_set = WorkingSet::new(SnapshotStorage::temporary());
    working_set.add_event("first", &1u64);
    working_set.add_event("second", &"two".to_owned());

    let events = working_set.take_events();
    assert_eq!(events[0].key(), "first");
    assert_eq!(events[0].decode::<u64>().unwrap(), 1);
    assert_eq!(events[1].key(), "second");
    assert_eq!(events[1].decode::<String>().unwrap(), "two");
    assert!(working_set.events().is_empty());
}

#[test]
fn test_file_backed_state_is_shared_across_processes() {
    let tmpdir = tempfile::tempdir().unwrap();
    let path = tmpdir.path().join("ledger.json");
    let (value, _) = value_and_map();

    {
        let storage = SnapshotStorage::with_path(&path).unwrap();
        let mut working_set = WorkingSet::new(storage.clone());
        value.set(&9, &mut working_set);
        storage
            .commit(&working_set.checkpoint().freeze())
            .unwrap();
    }

    let storage = SnapshotStorage::with_config(config::Config { path: Some(path) }).unwrap();
    let mut working_set = WorkingSet::new(storage);
    assert_eq!(value.get(&mut working_set), Some(9));
}
