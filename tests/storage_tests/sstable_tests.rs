//! Tests for SSTable
//!
//! These tests verify:
//! - Construction sorts entries by key
//! - Point lookups (hits, misses, out-of-range keys)
//! - Key range metadata

use embedkv::memtable::Entry;
use embedkv::storage::SSTable;

// =============================================================================
// Construction Tests
// =============================================================================

#[test]
fn test_new_sorts_entries() {
    let table = SSTable::new(3, vec![("c", "3"), ("a", "1"), ("b", "2")]);

    assert_eq!(table.id(), 3);
    assert_eq!(
        table.entries(),
        &[
            Entry::new("a", "1"),
            Entry::new("b", "2"),
            Entry::new("c", "3"),
        ]
    );
}

#[test]
fn test_new_last_duplicate_wins() {
    let table = SSTable::new(0, vec![("k", "old"), ("k", "new")]);

    assert_eq!(table.len(), 1);
    assert_eq!(table.get("k"), Some("new"));
}

#[test]
fn test_empty_table() {
    let table = SSTable::new(0, Vec::<Entry>::new());

    assert!(table.is_empty());
    assert_eq!(table.min_key(), None);
    assert_eq!(table.max_key(), None);
    assert!(!table.might_contain("anything"));
    assert_eq!(table.get("anything"), None);
}

// =============================================================================
// Lookup Tests
// =============================================================================

#[test]
fn test_get_present_and_absent() {
    let table = SSTable::new(1, vec![("apple", "red"), ("banana", "yellow"), ("cherry", "dark")]);

    assert_eq!(table.get("apple"), Some("red"));
    assert_eq!(table.get("banana"), Some("yellow"));
    assert_eq!(table.get("cherry"), Some("dark"));
    // Inside the key range but absent
    assert_eq!(table.get("blueberry"), None);
    // Outside the key range
    assert_eq!(table.get("aardvark"), None);
    assert_eq!(table.get("zucchini"), None);
}

#[test]
fn test_might_contain_range() {
    let table = SSTable::new(1, vec![("d", "1"), ("m", "2"), ("t", "3")]);

    assert_eq!(table.min_key(), Some("d"));
    assert_eq!(table.max_key(), Some("t"));

    assert!(table.might_contain("d"));
    assert!(table.might_contain("g"));
    assert!(table.might_contain("t"));
    assert!(!table.might_contain("a"));
    assert!(!table.might_contain("z"));
}

#[test]
fn test_name() {
    let table = SSTable::new(12, vec![("a", "1")]);
    assert_eq!(table.name(), "SSTable-12");
}
