// Upload gate tests - daily quota bookkeeping over swappable stores
// Author: kelexine (https://github.com/kelexine)

use gardener_gateway::quota::gate::today;
use gardener_gateway::quota::{
    FileStore, KeyValueStore, MemoryStore, UploadGate, UploadRecord, UPLOAD_RECORD_KEY,
};
use proptest::prelude::*;

fn seeded_gate(record: &UploadRecord) -> UploadGate<MemoryStore> {
    let store = MemoryStore::new();
    store
        .save(UPLOAD_RECORD_KEY, &serde_json::to_string(record).unwrap())
        .unwrap();
    UploadGate::new(store, 3)
}

#[test]
fn test_quota_reset_on_new_day() {
    // A stale record loses, whatever its count was
    let gate = seeded_gate(&UploadRecord {
        date: "2021-03-14".to_string(),
        count: 99,
    });

    assert!(!gate.check_limit().unwrap());
    assert_eq!(gate.current_record().unwrap(), UploadRecord::fresh(today()));
}

#[test]
fn test_quota_enforcement_within_a_day() {
    let gate = UploadGate::new(MemoryStore::new(), 3);

    for _ in 0..3 {
        assert!(!gate.check_limit().unwrap());
        gate.record_upload().unwrap();
    }

    assert!(gate.check_limit().unwrap());
    assert_eq!(gate.current_record().unwrap().count, 3);
}

#[test]
fn test_missing_record_treated_as_fresh() {
    let gate = UploadGate::new(MemoryStore::new(), 3);
    assert!(!gate.check_limit().unwrap());
    assert_eq!(gate.current_record().unwrap(), UploadRecord::fresh(today()));
}

#[test]
fn test_malformed_record_fails_open() {
    let store = MemoryStore::new();
    store.save(UPLOAD_RECORD_KEY, "{not json").unwrap();
    let gate = UploadGate::new(store, 3);

    assert!(!gate.check_limit().unwrap());
    assert_eq!(gate.current_record().unwrap(), UploadRecord::fresh(today()));
}

#[test]
fn test_blocked_check_leaves_count_untouched() {
    let gate = seeded_gate(&UploadRecord {
        date: today(),
        count: 3,
    });

    assert!(gate.check_limit().unwrap());
    assert!(gate.check_limit().unwrap());
    assert_eq!(gate.current_record().unwrap().count, 3);
}

#[test]
fn test_count_below_limit_is_not_blocked() {
    let gate = seeded_gate(&UploadRecord {
        date: today(),
        count: 2,
    });
    assert!(!gate.check_limit().unwrap());
    assert_eq!(gate.current_record().unwrap().count, 2);
}

#[test]
fn test_record_survives_across_gate_instances() {
    let dir = tempfile::tempdir().unwrap();

    let gate = UploadGate::new(FileStore::new(dir.path()), 3);
    assert!(!gate.check_limit().unwrap());
    gate.record_upload().unwrap();

    let reopened = UploadGate::new(FileStore::new(dir.path()), 3);
    assert_eq!(reopened.current_record().unwrap().count, 1);
    assert!(!reopened.check_limit().unwrap());
}

proptest! {
    // Any record from an earlier day grants a fresh quota, whatever its count
    #[test]
    fn prop_stale_record_always_resets(
        count in 0u32..10_000,
        date in "20[01][0-9]-(0[1-9]|1[0-2])-(0[1-9]|1[0-9]|2[0-8])",
    ) {
        let gate = seeded_gate(&UploadRecord { date, count });
        prop_assert!(!gate.check_limit().unwrap());
        prop_assert_eq!(gate.current_record().unwrap().count, 0);
    }
}
