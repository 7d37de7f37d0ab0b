use basset_entities::{Entry, LogLevel, NumberDataType, Transaction};
use basset_store::{MemoryEntityStore, StoreError};
use pretty_assertions::assert_eq;

fn apply(store: &MemoryEntityStore, entries: Vec<Entry>) {
    store.apply(&Transaction::from(entries)).unwrap();
}

// ── Scalar classes ───────────────────────────────────────────────

#[test]
fn boolean_publish_and_read_back() {
    let store = MemoryEntityStore::new();
    apply(&store, vec![Entry::boolean("Debug:/Entities/Boolean", true)]);
    assert_eq!(store.boolean("Debug:/Entities/Boolean").unwrap(), Some(true));
}

#[test]
fn scalar_latest_value_wins_across_transactions() {
    let store = MemoryEntityStore::new();
    apply(&store, vec![Entry::string("Main:/Name", "first")]);
    apply(&store, vec![Entry::string("Main:/Name", "second")]);
    assert_eq!(
        store.string_value("Main:/Name").unwrap(),
        Some("second".to_string())
    );
}

#[test]
fn paths_are_case_insensitive() {
    let store = MemoryEntityStore::new();
    apply(&store, vec![Entry::boolean("Main:/Plant/On", true)]);
    assert_eq!(store.boolean("main:/plant/ON").unwrap(), Some(true));
}

#[test]
fn number_round_trips_literal_and_subtype() {
    let store = MemoryEntityStore::new();
    apply(
        &store,
        vec![Entry::number("Main:/Rate", NumberDataType::Decimal, "19.99")],
    );
    assert_eq!(
        store.number("Main:/Rate").unwrap(),
        Some((NumberDataType::Decimal, "19.99".to_string()))
    );
}

#[test]
fn duration_literal_normalizes_to_nanos() {
    let store = MemoryEntityStore::new();
    apply(&store, vec![Entry::duration("Main:/Cycle", "00:01:30")]);
    assert_eq!(store.duration("Main:/Cycle").unwrap(), Some(90_000_000_000));
}

#[test]
fn timestamp_literal_accepts_rfc3339() {
    let store = MemoryEntityStore::new();
    apply(
        &store,
        vec![Entry::timestamp("Main:/Start", "2024-08-01T00:00:00Z")],
    );
    assert_eq!(
        store.timestamp_value("Main:/Start").unwrap(),
        Some(1722470400000000000)
    );
}

#[test]
fn reference_target_is_canonicalized() {
    let store = MemoryEntityStore::new();
    apply(&store, vec![Entry::reference("Main:/Link", "/Plant/Line1")]);
    assert_eq!(
        store.reference("Main:/Link").unwrap(),
        Some("Main:/Plant/Line1".to_string())
    );
}

#[test]
fn time_range_reads_back_parsed_bounds() {
    let store = MemoryEntityStore::new();
    apply(
        &store,
        vec![Entry::time_range("Main:/Shift", "100", "350")],
    );
    let range = store.time_range("Main:/Shift").unwrap().unwrap();
    assert_eq!((range.start, range.end), (100, 350));
}

// ── Accumulating classes ─────────────────────────────────────────

#[test]
fn set_entries_accumulate_in_call_order() {
    let store = MemoryEntityStore::new();
    apply(
        &store,
        vec![
            Entry::set("Main:/Tags", "red"),
            Entry::set("Main:/Tags", "blue"),
        ],
    );
    apply(&store, vec![Entry::set("Main:/Tags", "green")]);
    assert_eq!(
        store.set_values("Main:/Tags").unwrap(),
        vec!["red", "blue", "green"]
    );
}

#[test]
fn set_duplicates_are_suppressed() {
    let store = MemoryEntityStore::new();
    apply(&store, vec![Entry::set("Main:/Tags", "red")]);
    apply(&store, vec![Entry::set("Main:/Tags", "red")]);
    assert_eq!(store.set_values("Main:/Tags").unwrap(), vec!["red"]);
}

#[test]
fn vocabulary_set_accumulates_canonical_terms() {
    let store = MemoryEntityStore::new();
    apply(
        &store,
        vec![
            Entry::vocabulary_set("Main:/Part/Faults", "/Vocab/Faults/Jam"),
            Entry::vocabulary_set("Main:/Part/Faults", "/Vocab/Faults/Overheat"),
        ],
    );
    assert_eq!(
        store.vocabulary_set_terms("Main:/Part/Faults").unwrap(),
        vec!["Main:/Vocab/Faults/Jam", "Main:/Vocab/Faults/Overheat"]
    );
}

#[test]
fn hash_fields_merge_latest_per_field() {
    let store = MemoryEntityStore::new();
    apply(
        &store,
        vec![
            Entry::hash("Main:/Meta", "make", "Acme"),
            Entry::hash("Main:/Meta", "model", "X1"),
        ],
    );
    apply(&store, vec![Entry::hash("Main:/Meta", "model", "X2")]);

    let hash = store.hash_values("Main:/Meta").unwrap();
    assert_eq!(hash.get("make").map(String::as_str), Some("Acme"));
    assert_eq!(hash.get("model").map(String::as_str), Some("X2"));
}

#[test]
fn logs_append_in_order() {
    let store = MemoryEntityStore::new();
    apply(
        &store,
        vec![
            Entry::log("Main:/Job", LogLevel::Information, "started"),
            Entry::log("Main:/Job", LogLevel::Warning, "retrying"),
        ],
    );
    let logs = store.logs("Main:/Job").unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].message, "started");
    assert_eq!(logs[1].level, LogLevel::Warning);
}

#[test]
fn group_members_accumulate() {
    let store = MemoryEntityStore::new();
    apply(
        &store,
        vec![
            Entry::group("Main:/Cell", "Main:/Machines/A"),
            Entry::group("Main:/Cell", "Main:/Machines/B"),
        ],
    );
    assert_eq!(
        store.group_members("Main:/Cell").unwrap(),
        vec!["Main:/Machines/A", "Main:/Machines/B"]
    );
}

// ── Observations ─────────────────────────────────────────────────

#[test]
fn latest_observation_is_newest_by_timestamp() {
    let store = MemoryEntityStore::new();
    apply(
        &store,
        vec![
            Entry::observation("Main:/Temp", "20.5", 100),
            Entry::observation("Main:/Temp", "21.0", 300),
        ],
    );
    // Out-of-order arrival does not displace the newest sample.
    apply(&store, vec![Entry::observation("Main:/Temp", "20.7", 200)]);

    let latest = store.latest_observation("Main:/Temp").unwrap().unwrap();
    assert_eq!(latest.value, "21.0");
    assert_eq!(latest.timestamp, 300);

    let all = store.observations("Main:/Temp").unwrap();
    let timestamps: Vec<i64> = all.iter().map(|o| o.timestamp).collect();
    assert_eq!(timestamps, vec![100, 200, 300]);
}

#[test]
fn missing_observation_is_none() {
    let store = MemoryEntityStore::new();
    assert_eq!(store.latest_observation("Main:/Test/Observation").unwrap(), None);
}

// ── Atomicity ────────────────────────────────────────────────────

#[test]
fn bad_entry_rejects_whole_transaction() {
    let store = MemoryEntityStore::new();
    let mut tx = Transaction::new();
    tx.add(Entry::boolean("Main:/On", true));
    tx.add(Entry::number("Main:/Count", NumberDataType::Byte, "999"));

    let err = store.apply(&tx).unwrap_err();
    assert!(matches!(err, StoreError::InvalidNumber { .. }));

    // Nothing from the batch became visible.
    assert_eq!(store.boolean("Main:/On").unwrap(), None);
    assert_eq!(store.number("Main:/Count").unwrap(), None);
}

#[test]
fn invalid_path_rejects_whole_transaction() {
    let store = MemoryEntityStore::new();
    let mut tx = Transaction::new();
    tx.add(Entry::string("Main:/Ok", "x"));
    tx.add(Entry::string(":/bad", "y"));

    assert!(store.apply(&tx).is_err());
    assert_eq!(store.string_value("Main:/Ok").unwrap(), None);
}

#[test]
fn out_of_range_duration_rejects_whole_transaction() {
    let store = MemoryEntityStore::new();
    let mut tx = Transaction::new();
    tx.add(Entry::boolean("Main:/On", true));
    tx.add(Entry::duration("Main:/Cycle", "9999999999:00:00"));

    assert!(store.apply(&tx).is_err());
    assert_eq!(store.boolean("Main:/On").unwrap(), None);
    assert_eq!(store.duration("Main:/Cycle").unwrap(), None);
}

#[test]
fn reversed_time_range_rejects_whole_transaction() {
    let store = MemoryEntityStore::new();
    let mut tx = Transaction::new();
    tx.add(Entry::boolean("Main:/On", true));
    tx.add(Entry::time_range("Main:/Shift", "500", "100"));

    let err = store.apply(&tx).unwrap_err();
    assert!(matches!(err, StoreError::InvalidTimeRange { .. }));
    assert_eq!(store.boolean("Main:/On").unwrap(), None);
}

// ── Query edge cases ─────────────────────────────────────────────

#[test]
fn missing_values_are_empty_not_errors() {
    let store = MemoryEntityStore::new();
    assert_eq!(store.boolean("Main:/Nothing").unwrap(), None);
    assert!(store.set_values("Main:/Nothing").unwrap().is_empty());
    assert!(store.logs("Main:/Nothing").unwrap().is_empty());
    assert!(!store.contains("Main:/Nothing").unwrap());
}

#[test]
fn malformed_query_path_is_an_error() {
    let store = MemoryEntityStore::new();
    assert!(store.boolean(":/nope").is_err());
}
