//! Integration tests for sorting.

use std::cmp::Ordering;

use rstest::rstest;
use strict_collections::error::CollectionError;
use strict_collections::prelude::*;

// =============================================================================
// Natural Ordering
// =============================================================================

#[rstest]
#[case(vec![3, 1, 2], vec![1, 2, 3])]
#[case(vec![1, 2, 3], vec![1, 2, 3])]
#[case(vec![], vec![])]
#[case(vec![5, 5, -1], vec![-1, 5, 5])]
fn test_sort_integers(#[case] input: Vec<i32>, #[case] expected: Vec<i32>) {
    let mut collection = IndexedCollection::from_values(input).unwrap();
    collection.sort().unwrap();
    assert_eq!(collection.values(), expected);
}

#[rstest]
fn test_sort_renumbers_indexed_keys() {
    let mut collection = IndexedCollection::from_values(["c", "a", "b"]).unwrap();
    collection.sort().unwrap();
    assert_eq!(collection.to_entries(), vec![(0, "a"), (1, "b"), (2, "c")]);
}

#[rstest]
fn test_sort_keeps_keyed_associations() {
    let mut map = KeyedCollection::from_entries([("x", 3), ("y", 1), ("z", 2)]).unwrap();
    map.sort().unwrap();
    assert_eq!(map.to_entries(), vec![("y", 1), ("z", 2), ("x", 3)]);
    assert_eq!(map.get(&"x"), Ok(&3));
}

#[rstest]
fn test_sort_rejects_nan_and_leaves_collection_unchanged() {
    let mut collection = IndexedCollection::from_values([2.0, f64::NAN, 1.0]).unwrap();
    let result = collection.sort().map(|_| ());
    assert_eq!(
        result,
        Err(CollectionError::NotComparable {
            element_type: ElementType::Float
        })
    );
    let values = collection.values();
    assert_eq!(values[0], 2.0);
    assert!(values[1].is_nan());
    assert_eq!(values[2], 1.0);
}

#[rstest]
fn test_sort_empty_collection_without_ordering_succeeds() {
    let mut collection: IndexedCollection<Value> =
        IndexedCollection::with_element_type(ElementType::Map);
    assert!(collection.sort().is_ok());
}

#[rstest]
fn test_sorted_leaves_receiver_untouched() {
    let collection = IndexedCollection::from_values([2, 3, 1]).unwrap();
    let sorted = collection.sorted().unwrap();
    assert_eq!(sorted.values(), vec![1, 2, 3]);
    assert_eq!(collection.values(), vec![2, 3, 1]);
}

// =============================================================================
// Comparators
// =============================================================================

#[rstest]
fn test_sort_by_is_stable() {
    let mut collection =
        IndexedCollection::from_values(["bb", "a", "cc", "d", "ee"]).unwrap();
    collection.sort_by(|left, right| left.len().cmp(&right.len()));
    assert_eq!(collection.values(), vec!["a", "d", "bb", "cc", "ee"]);
}

#[rstest]
fn test_sort_entries_by_key_descending() {
    let mut map = KeyedCollection::from_entries([(2, 'b'), (3, 'c'), (1, 'a')]).unwrap();
    map.sort_entries_by(|(left, _), (right, _)| right.cmp(left));
    assert_eq!(map.to_entries(), vec![(3, 'c'), (2, 'b'), (1, 'a')]);
}

#[rstest]
fn test_sorted_entries_by_returns_copy() {
    let map = KeyedCollection::from_entries([("b", 1), ("a", 2)]).unwrap();
    let sorted = map.sorted_entries_by(|(left, _), (right, _)| left.cmp(right));
    assert_eq!(sorted.to_entries(), vec![("a", 2), ("b", 1)]);
    assert_eq!(map.to_entries(), vec![("b", 1), ("a", 2)]);
}

#[rstest]
fn test_sort_by_keys() {
    let mut map = KeyedCollection::from_entries([("b", 1), ("c", 0), ("a", 2)]).unwrap();
    map.sort_by_keys();
    let keys: Vec<&str> = map.keys().copied().collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
}

#[rstest]
fn test_sorted_by_reverse_is_idempotent() {
    let collection = IndexedCollection::from_values([1, 3, 2]).unwrap();
    let reverse = |left: &i32, right: &i32| -> Ordering { right.cmp(left) };
    let once = collection.sorted_by(reverse);
    let twice = once.sorted_by(reverse);
    assert_eq!(once, twice);
    assert_eq!(once.values(), vec![3, 2, 1]);
}

#[rstest]
fn test_sort_text_values() {
    let mut collection =
        IndexedCollection::from_values([Value::from("pear"), Value::from("apple")]).unwrap();
    collection.sort().unwrap();
    assert_eq!(
        collection.values(),
        vec![Value::from("apple"), Value::from("pear")]
    );
}
