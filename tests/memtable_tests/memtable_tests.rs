//! MemTable Tests
//!
//! Tests verify:
//! - Basic put/get operations
//! - Overwrite semantics
//! - Entry count and byte size tracking
//! - Sorted snapshots for flushing
//! - Clear functionality

use embedkv::memtable::{Entry, MemTable};

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_new_memtable_is_empty() {
    let memtable = MemTable::new();
    assert_eq!(memtable.size(), 0);
    assert_eq!(memtable.byte_size(), 0);
    assert!(memtable.is_empty());
}

#[test]
fn test_put_and_get() {
    let mut memtable = MemTable::new();

    memtable.put("key1".to_string(), "value1".to_string());

    assert_eq!(memtable.get("key1"), Some("value1"));
}

#[test]
fn test_get_nonexistent_key() {
    let memtable = MemTable::new();
    assert_eq!(memtable.get("nonexistent"), None);
}

#[test]
fn test_put_returns_entry_count() {
    let mut memtable = MemTable::new();

    assert_eq!(memtable.put("a".to_string(), "1".to_string()), 1);
    assert_eq!(memtable.put("b".to_string(), "2".to_string()), 2);
    // Overwrite does not add an entry
    assert_eq!(memtable.put("a".to_string(), "3".to_string()), 2);
}

#[test]
fn test_put_overwrites_existing() {
    let mut memtable = MemTable::new();

    memtable.put("key1".to_string(), "value1".to_string());
    memtable.put("key1".to_string(), "value2".to_string());

    assert_eq!(memtable.size(), 1);
    assert_eq!(memtable.get("key1"), Some("value2"));
}

// =============================================================================
// Threshold Tests
// =============================================================================

#[test]
fn test_is_full_at_threshold() {
    let mut memtable = MemTable::new();

    for (i, key) in ["a", "b", "c", "d"].iter().enumerate() {
        memtable.put(key.to_string(), i.to_string());
        assert!(!memtable.is_full(5));
    }

    memtable.put("e".to_string(), "4".to_string());
    assert!(memtable.is_full(5));
}

#[test]
fn test_overwrites_do_not_fill_memtable() {
    let mut memtable = MemTable::new();

    for i in 0..10 {
        memtable.put("same".to_string(), i.to_string());
    }

    assert_eq!(memtable.size(), 1);
    assert!(!memtable.is_full(5));
}

// =============================================================================
// Size Tracking Tests
// =============================================================================

#[test]
fn test_byte_size_tracking_put() {
    let mut memtable = MemTable::new();

    memtable.put("key".to_string(), "value".to_string());

    assert_eq!(memtable.byte_size(), "key".len() + "value".len());
}

#[test]
fn test_byte_size_tracking_overwrite() {
    let mut memtable = MemTable::new();

    memtable.put("key".to_string(), "short".to_string());
    memtable.put("key".to_string(), "much_longer_value".to_string());

    assert_eq!(memtable.byte_size(), "key".len() + "much_longer_value".len());

    memtable.put("key".to_string(), "v".to_string());
    assert_eq!(memtable.byte_size(), "key".len() + "v".len());
}

// =============================================================================
// Sorted Snapshot Tests
// =============================================================================

#[test]
fn test_entries_sorted_by_key() {
    let mut memtable = MemTable::new();

    memtable.put("cherry".to_string(), "red".to_string());
    memtable.put("apple".to_string(), "green".to_string());
    memtable.put("banana".to_string(), "yellow".to_string());

    let entries = memtable.entries_sorted_by_key();

    assert_eq!(
        entries,
        vec![
            Entry::new("apple", "green"),
            Entry::new("banana", "yellow"),
            Entry::new("cherry", "red"),
        ]
    );
}

#[test]
fn test_sorting_is_lexical_not_numeric() {
    let mut memtable = MemTable::new();

    memtable.put("10".to_string(), "ten".to_string());
    memtable.put("9".to_string(), "nine".to_string());
    memtable.put("100".to_string(), "hundred".to_string());

    let keys: Vec<String> = memtable.iter().map(|(k, _)| k.clone()).collect();
    assert_eq!(keys, vec!["10", "100", "9"]);
}

// =============================================================================
// Clear Tests
// =============================================================================

#[test]
fn test_clear() {
    let mut memtable = MemTable::new();

    memtable.put("key1".to_string(), "value1".to_string());
    memtable.put("key2".to_string(), "value2".to_string());

    memtable.clear();

    assert!(memtable.is_empty());
    assert_eq!(memtable.byte_size(), 0);
    assert_eq!(memtable.get("key1"), None);
    assert!(memtable.entries_sorted_by_key().is_empty());
}
