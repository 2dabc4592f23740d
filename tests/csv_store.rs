//! CSV persistence against real files in a temporary directory.

use arena_stats::core::{MatchupRecord, Outcome};
use arena_stats::store::{CsvRecordStore, CsvRoster, RecordStore, RosterSource, StoreError};
use std::fs;
use tempfile::TempDir;

fn record(names: [&str; 2], outcome: Outcome, odds: [f64; 4]) -> MatchupRecord {
    MatchupRecord::first_result(
        [Some(names[0].into()), Some(names[1].into()), None, None],
        outcome,
        odds,
    )
    .unwrap()
}

#[test]
fn records_survive_a_save_and_load() {
    let dir = TempDir::new().unwrap();
    let mut store = CsvRecordStore::new(dir.path().join("records.csv"));

    let mut first = record(["Alice", "Bob"], Outcome::Win(0), [1.5, 2.0, 0.0, 0.0]);
    first.record_outcome(Outcome::Draw, [1.25, 3.0, 0.0, 0.0]).unwrap();
    let second = record(["Carol", "Dave"], Outcome::Win(1), [0.0; 4]);
    store.save(&[first.clone(), second.clone()]).unwrap();

    assert_eq!(store.load().unwrap(), vec![first, second]);
}

#[test]
fn saved_file_has_one_row_per_record() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("records.csv");
    let mut store = CsvRecordStore::new(&path);
    store
        .save(&[record(["Alice", "Bob"], Outcome::Win(0), [1.5, 2.0, 0.0, 0.0])])
        .unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text, "Alice,Bob,,,1,1,0,0,0,0,1.5,2.0,0,0\n");
}

#[test]
fn missing_record_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    let mut store = CsvRecordStore::new(dir.path().join("absent.csv"));
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn saving_an_empty_book_truncates_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("records.csv");
    let mut store = CsvRecordStore::new(&path);
    store
        .save(&[record(["Alice", "Bob"], Outcome::Draw, [0.0; 4])])
        .unwrap();
    store.save(&[]).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "");
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn invalid_row_names_its_position() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("records.csv");
    fs::write(
        &path,
        "Alice,Bob,,,1,1,0,0,0,0,0,0,0,0\nAlice,Carol,,,5,1,0,0,0,0,0,0,0,0\n",
    )
    .unwrap();

    let err = CsvRecordStore::new(&path).load().unwrap_err();
    assert!(
        matches!(err, StoreError::InvalidRecord { row: 2, .. }),
        "unexpected error: {err}"
    );
}

#[test]
fn legacy_rows_with_repeated_names_and_negative_odds_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("records.csv");
    fs::write(&path, "Alice,Alice,,,1,1,0,0,0,0,-1.5,2,0,0\n").unwrap();

    let records = CsvRecordStore::new(&path).load().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].competitor(1), Some("Alice"));
    assert_eq!(records[0].odds(), &[-1.5, 2.0, 0.0, 0.0]);
}

#[test]
fn roster_keeps_file_order_and_skips_blank_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roster.csv");
    fs::write(&path, "Zed\n\n  Alice  ,ignored\nBob\n").unwrap();

    let roster = CsvRoster::new(&path).load_roster().unwrap();
    assert_eq!(roster.iter().collect::<Vec<_>>(), vec!["Zed", "Alice", "Bob"]);
    assert_eq!(roster.index_of("Alice"), Some(1));
}

#[test]
fn roster_rejects_duplicates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roster.csv");
    fs::write(&path, "Alice\nBob\nAlice\n").unwrap();

    let err = CsvRoster::new(&path).load_roster().unwrap_err();
    assert!(matches!(err, StoreError::DuplicateRosterEntry { ref name } if name == "Alice"));
}

#[test]
fn missing_roster_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = CsvRoster::new(dir.path().join("absent.csv"))
        .load_roster()
        .unwrap_err();
    assert!(matches!(err, StoreError::Csv { .. }));
}
