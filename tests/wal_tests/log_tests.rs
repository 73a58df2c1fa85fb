//! Tests for the in-memory write-ahead log
//!
//! These tests verify:
//! - Append order and LSN assignment
//! - Clear keeps the LSN counter, reset rewinds it
//! - Textual rendering of records

use embedkv::wal::{WalRecord, WriteAheadLog};

#[test]
fn test_new_log_is_empty() {
    let wal = WriteAheadLog::new();

    assert!(wal.is_empty());
    assert_eq!(wal.len(), 0);
    assert_eq!(wal.last_lsn(), None);
}

#[test]
fn test_append_preserves_write_order() {
    let mut wal = WriteAheadLog::new();

    wal.append("b", "2");
    wal.append("a", "1");
    wal.append("b", "3");

    let keys: Vec<&str> = wal.records().iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["b", "a", "b"]);
    assert_eq!(wal.records()[2].value, "3");
}

#[test]
fn test_append_assigns_increasing_lsn() {
    let mut wal = WriteAheadLog::new();

    let first = wal.append("a", "1");
    let second = wal.append("b", "2");

    assert_eq!(first, WriteAheadLog::INITIAL_LSN);
    assert_eq!(second, first + 1);
    assert_eq!(wal.last_lsn(), Some(second));
}

#[test]
fn test_clear_keeps_lsn_counting() {
    let mut wal = WriteAheadLog::new();

    wal.append("a", "1");
    wal.append("b", "2");
    wal.clear();

    assert!(wal.is_empty());
    assert_eq!(wal.last_lsn(), Some(2));

    let lsn = wal.append("c", "3");
    assert_eq!(lsn, 3);
    assert_eq!(wal.records(), &[WalRecord::new(3, "c", "3")]);
}

#[test]
fn test_reset_rewinds_lsn() {
    let mut wal = WriteAheadLog::new();

    wal.append("a", "1");
    wal.reset();

    assert!(wal.is_empty());
    assert_eq!(wal.last_lsn(), None);
    assert_eq!(wal.append("b", "2"), WriteAheadLog::INITIAL_LSN);
}

#[test]
fn test_record_display() {
    let record = WalRecord::new(7, "user:1", "alice smith");
    assert_eq!(record.to_string(), "PUT(user:1, alice smith)");
}
