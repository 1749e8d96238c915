//! Ordered key-value storage.
//!
//! [`Storage`] is the single piece of state a collection owns: a vector of
//! entries in iteration order plus a hash index from key to position.
//!
//! # Invariants
//!
//! - `positions[key] == i` iff `entries[i].0 == key`
//! - keys are unique
//! - `positions.len() == entries.len()`
//!
//! # Time Complexity
//!
//! | Operation  | Complexity |
//! |------------|------------|
//! | `get`      | O(1)       |
//! | `insert`   | O(1)*      |
//! | `remove`   | O(n)       |
//! | `sort_by`  | O(n log n) |
//! | `iter`     | O(1) + O(n)|

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

#[cfg(feature = "fxhash")]
type KeyHasher = rustc_hash::FxBuildHasher;

#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
type KeyHasher = ahash::RandomState;

#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
type KeyHasher = std::collections::hash_map::RandomState;

/// Insertion-ordered map from keys to values.
#[derive(Clone)]
pub(crate) struct Storage<K, V> {
    entries: Vec<(K, V)>,
    positions: HashMap<K, usize, KeyHasher>,
}

impl<K, V> Storage<K, V> {
    #[inline]
    pub(crate) fn entries(&self) -> &[(K, V)] {
        &self.entries
    }

    pub(crate) fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }
}

impl<K, V> Storage<K, V>
where
    K: Clone + Eq + Hash,
{
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::default(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity_and_hasher(capacity, KeyHasher::default()),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.positions.clear();
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.contains_key(key)
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions
            .get(key)
            .map(|&position| &self.entries[position].1)
    }

    pub(crate) fn get_index(&self, position: usize) -> Option<&(K, V)> {
        self.entries.get(position)
    }

    /// Inserts or overwrites. An overwritten key keeps its position.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&position) = self.positions.get(&key) {
            return Some(std::mem::replace(&mut self.entries[position].1, value));
        }
        self.positions.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    /// Removes an entry, shifting the later entries down by one.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let position = self.positions.remove(key)?;
        let (_, value) = self.entries.remove(position);
        for (shifted_key, _) in &self.entries[position..] {
            if let Some(slot) = self.positions.get_mut::<K>(shifted_key) {
                *slot -= 1;
            }
        }
        Some(value)
    }

    /// Stable in-place sort over whole entries.
    pub(crate) fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&(K, V), &(K, V)) -> Ordering,
    {
        self.entries.sort_by(|left, right| compare(left, right));
        self.reindex();
    }

    /// Reorders entries so that position `i` holds the entry previously at
    /// `order[i]`. `order` must be a permutation of `0..len`.
    pub(crate) fn permute(&mut self, order: &[usize]) {
        debug_assert_eq!(order.len(), self.entries.len());
        let mut slots: Vec<Option<(K, V)>> = self.entries.drain(..).map(Some).collect();
        self.entries.extend(
            order
                .iter()
                .filter_map(|&position| slots[position].take()),
        );
        self.reindex();
    }

    /// Rewrites every key with `rekey(position)` and rebuilds the index.
    pub(crate) fn rekey(&mut self, mut rekey: impl FnMut(usize) -> K) {
        for (position, entry) in self.entries.iter_mut().enumerate() {
            entry.0 = rekey(position);
        }
        self.reindex();
    }

    fn reindex(&mut self) {
        self.positions.clear();
        for (position, (key, _)) in self.entries.iter().enumerate() {
            self.positions.insert(key.clone(), position);
        }
    }
}

impl<K, V> Default for Storage<K, V>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Equal when both hold the same entries in the same order.
impl<K: PartialEq, V: PartialEq> PartialEq for Storage<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: std::fmt::Debug, V: std::fmt::Debug> std::fmt::Debug for Storage<K, V> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_map()
            .entries(self.entries.iter().map(|(key, value)| (key, value)))
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn storage_of(entries: &[(&'static str, i32)]) -> Storage<&'static str, i32> {
        let mut storage = Storage::new();
        for &(key, value) in entries {
            storage.insert(key, value);
        }
        storage
    }

    fn keys(storage: &Storage<&'static str, i32>) -> Vec<&'static str> {
        storage.entries().iter().map(|(key, _)| *key).collect()
    }

    #[rstest]
    fn test_insert_preserves_insertion_order() {
        let storage = storage_of(&[("c", 3), ("a", 1), ("b", 2)]);
        assert_eq!(keys(&storage), vec!["c", "a", "b"]);
        assert_eq!(storage.len(), 3);
    }

    #[rstest]
    fn test_overwrite_keeps_position() {
        let mut storage = storage_of(&[("a", 1), ("b", 2)]);
        assert_eq!(storage.insert("a", 10), Some(1));
        assert_eq!(keys(&storage), vec!["a", "b"]);
        assert_eq!(storage.get("a"), Some(&10));
        assert_eq!(storage.len(), 2);
    }

    #[rstest]
    fn test_remove_shifts_positions() {
        let mut storage = storage_of(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
        assert_eq!(storage.remove("b"), Some(2));
        assert_eq!(keys(&storage), vec!["a", "c", "d"]);
        assert_eq!(storage.get("c"), Some(&3));
        assert_eq!(storage.get("d"), Some(&4));
        assert_eq!(storage.remove("b"), None);
    }

    #[rstest]
    fn test_remove_by_borrowed_key_shifts_positions() {
        let mut storage: Storage<String, i32> = Storage::new();
        for (key, value) in [("a", 1), ("b", 2), ("c", 3)] {
            storage.insert(key.to_string(), value);
        }
        assert_eq!(storage.remove("a"), Some(1));
        assert_eq!(storage.get("b"), Some(&2));
        assert_eq!(storage.get("c"), Some(&3));
        assert_eq!(storage.remove("c"), Some(3));
        assert_eq!(storage.len(), 1);
    }

    fn first_key<K, V>(storage: &Storage<K, V>) -> Option<&K> {
        storage.entries().first().map(|(key, _)| key)
    }

    #[rstest]
    fn test_entries_need_no_key_bounds() {
        let storage = storage_of(&[("b", 2), ("a", 1)]);
        assert_eq!(first_key(&storage), Some(&"b"));
        assert_eq!(storage.into_entries(), vec![("b", 2), ("a", 1)]);
    }

    #[rstest]
    fn test_sort_by_is_stable_and_reindexes() {
        let mut storage = storage_of(&[("a", 2), ("b", 1), ("c", 2), ("d", 1)]);
        storage.sort_by(|left, right| left.1.cmp(&right.1));
        assert_eq!(keys(&storage), vec!["b", "d", "a", "c"]);
        assert_eq!(storage.get("a"), Some(&2));
        assert!(storage.contains_key("d"));
    }

    #[rstest]
    fn test_permute_applies_order() {
        let mut storage = storage_of(&[("a", 1), ("b", 2), ("c", 3)]);
        storage.permute(&[2, 0, 1]);
        assert_eq!(keys(&storage), vec!["c", "a", "b"]);
        assert_eq!(storage.get("b"), Some(&2));
    }

    #[rstest]
    fn test_rekey_rewrites_keys() {
        let mut storage: Storage<usize, char> = Storage::new();
        storage.insert(7, 'x');
        storage.insert(3, 'y');
        storage.rekey(|position| position);
        assert_eq!(storage.get(&0), Some(&'x'));
        assert_eq!(storage.get(&1), Some(&'y'));
        assert!(!storage.contains_key(&7));
    }

    #[rstest]
    fn test_clear_empties_both_entries_and_index() {
        let mut storage = storage_of(&[("a", 1)]);
        storage.clear();
        assert_eq!(storage.len(), 0);
        assert!(!storage.contains_key("a"));
    }

    #[rstest]
    fn test_equality_is_order_sensitive() {
        let forward = storage_of(&[("a", 1), ("b", 2)]);
        let backward = storage_of(&[("b", 2), ("a", 1)]);
        assert_ne!(forward, backward);
        assert_eq!(forward, storage_of(&[("a", 1), ("b", 2)]));
    }
}
