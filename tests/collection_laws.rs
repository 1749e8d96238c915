//! Property-based tests for the collection laws.

use proptest::prelude::*;
use strict_collections::prelude::*;

fn keyed_from(entries: &[(u8, i32)]) -> KeyedCollection<u8, i32> {
    KeyedCollection::from_entries(entries.iter().copied()).unwrap()
}

// =============================================================================
// Size Laws
// =============================================================================

proptest! {
    /// count() equals the number of values.
    #[test]
    fn prop_count_matches_values(elements in prop::collection::vec(any::<i32>(), 0..50)) {
        let collection = IndexedCollection::from_values(elements.clone()).unwrap();
        prop_assert_eq!(collection.count(), collection.values().len());
        prop_assert_eq!(collection.count(), elements.len());
    }

    /// is_empty() agrees with count().
    #[test]
    fn prop_is_empty_matches_count(
        entries in prop::collection::vec((any::<u8>(), any::<i32>()), 0..20)
    ) {
        let map = keyed_from(&entries);
        prop_assert_eq!(map.is_empty(), map.count() == 0);
    }

    /// Keys stay unique: count() equals the number of distinct keys.
    #[test]
    fn prop_keyed_count_is_distinct_keys(
        entries in prop::collection::vec((any::<u8>(), any::<i32>()), 0..40)
    ) {
        let map = keyed_from(&entries);
        let mut distinct: Vec<u8> = entries.iter().map(|(key, _)| *key).collect();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(map.count(), distinct.len());
    }

    /// Clearing twice leaves the collection empty both times.
    #[test]
    fn prop_clear_is_idempotent(elements in prop::collection::vec(any::<i32>(), 0..30)) {
        let mut collection = IndexedCollection::from_values(elements).unwrap();
        collection.clear();
        prop_assert!(collection.is_empty());
        collection.clear();
        prop_assert!(collection.is_empty());
    }
}

// =============================================================================
// Lookup Laws
// =============================================================================

proptest! {
    /// try_get returns the default exactly when the key is absent.
    #[test]
    fn prop_try_get_default(
        entries in prop::collection::vec((any::<u8>(), any::<i32>()), 0..20),
        key in any::<u8>(),
        default in any::<i32>()
    ) {
        let map = keyed_from(&entries);
        if map.contains_key(&key) {
            let value = map.try_get(&key, default);
            prop_assert_eq!(map.get(&key), Ok(&value));
        } else {
            prop_assert_eq!(map.try_get(&key, default), default);
            prop_assert!(map.get(&key).is_err());
        }
    }

    /// The last write to a key is the one that is read back.
    #[test]
    fn prop_last_write_wins(entries in prop::collection::vec((0_u8..8, any::<i32>()), 1..30)) {
        let map = keyed_from(&entries);
        for (key, _) in &entries {
            let last = entries
                .iter()
                .rev()
                .find(|(candidate, _)| candidate == key)
                .map(|(_, value)| value);
            prop_assert_eq!(map.find(key), last);
        }
    }

    /// exists(p) holds iff some stored pair satisfies p.
    #[test]
    fn prop_exists_matches_any(
        elements in prop::collection::vec(any::<i16>(), 0..30),
        threshold in any::<i16>()
    ) {
        let collection = IndexedCollection::from_values(elements.clone()).unwrap();
        let expected = elements.iter().any(|value| *value > threshold);
        prop_assert_eq!(collection.exists(|_, value| *value > threshold), expected);
    }
}

// =============================================================================
// Concat and Sort Laws
// =============================================================================

proptest! {
    /// Indexed concat is sequence concatenation.
    #[test]
    fn prop_indexed_concat_appends(
        left in prop::collection::vec(any::<i32>(), 0..20),
        right in prop::collection::vec(any::<i32>(), 0..20)
    ) {
        let mut collection = IndexedCollection::from_values(left.clone()).unwrap();
        collection.concat(&IndexedCollection::from_values(right.clone()).unwrap()).unwrap();
        let expected: Vec<i32> = left.into_iter().chain(right).collect();
        prop_assert_eq!(collection.values(), expected);
        let keys: Vec<usize> = collection.iter_keyed().map(|(key, _)| *key).collect();
        prop_assert_eq!(keys, (0..collection.count()).collect::<Vec<_>>());
    }

    /// Natural sort matches the standard stable sort and is idempotent.
    #[test]
    fn prop_sort_matches_std(elements in prop::collection::vec(any::<i64>(), 0..50)) {
        let collection = IndexedCollection::from_values(elements.clone()).unwrap();
        let sorted = collection.sorted().unwrap();
        let mut expected = elements;
        expected.sort();
        prop_assert_eq!(sorted.values(), expected);
        prop_assert_eq!(sorted.sorted().unwrap(), sorted);
    }

    /// Sorting by a projection is stable.
    #[test]
    fn prop_sort_by_is_stable(elements in prop::collection::vec((0_u8..4, any::<u16>()), 0..40)) {
        let collection = IndexedCollection::from_values(
            elements.iter().map(|(group, tag)| vec![u32::from(*group), u32::from(*tag)]),
        )
        .unwrap();
        let sorted = collection.sorted_by(|left, right| left[0].cmp(&right[0]));
        let mut expected: Vec<Vec<u32>> = collection.values();
        expected.sort_by_key(|pair| pair[0]);
        prop_assert_eq!(sorted.values(), expected);
    }
}

// =============================================================================
// Serialization Laws
// =============================================================================

#[cfg(feature = "serde")]
proptest! {
    /// Binary round-trip restores keys, values and order.
    #[test]
    fn prop_binary_roundtrip(entries in prop::collection::vec((any::<u8>(), any::<i32>()), 0..30)) {
        let map = keyed_from(&entries);
        let bytes = map.serialize().unwrap();
        prop_assert_eq!(KeyedCollection::<u8, i32>::from_bytes(&bytes).unwrap(), map);
    }

    /// Arbitrary bytes never panic the decoder.
    #[test]
    fn prop_decode_garbage_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let _ = IndexedCollection::<String>::from_bytes(&bytes);
    }
}
