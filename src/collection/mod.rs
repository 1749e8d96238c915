//! Strictly typed collections over ordered storage.
//!
//! This module provides the [`Collection`] contract and its two variants:
//!
//! - [`IndexedCollection`]: a dense sequence keyed by position `0..count()`
//! - [`KeyedCollection`]: an insertion-ordered map with one declared key type
//!
//! Both own a single ordered storage, enforce element-type homogeneity at every
//! mutating boundary, and fail atomically: an operation that returns an error
//! leaves the collection exactly as it was.
//!
//! # Concurrency
//!
//! Collections are not internally synchronized. Mutation takes `&mut self`, so
//! unsynchronized concurrent mutation does not compile; share a collection
//! across threads behind an external `Mutex` or `RwLock`. Scans (`exists`, sort
//! comparators, observable emission) hold a shared borrow or a detached
//! snapshot, which rules out mutating the collection mid-scan.
//!
//! # Examples
//!
//! ```rust
//! use strict_collections::prelude::*;
//!
//! let mut collection = IndexedCollection::from_values([1, 2, 3]).unwrap();
//! collection.concat(&IndexedCollection::from_values([4, 5]).unwrap()).unwrap();
//! assert_eq!(collection.values(), vec![1, 2, 3, 4, 5]);
//!
//! let mut map = KeyedCollection::new();
//! map.set("a", 1).unwrap().set("b", 2).unwrap();
//! assert_eq!(map.try_get(&"c", -1), -1);
//! assert_eq!(map.get(&"a"), Ok(&1));
//! ```

mod indexed;
mod keyed;
mod merge;
pub(crate) mod storage;

pub use indexed::IndexedCollection;
pub use keyed::KeyedCollection;

pub(crate) use merge::MergeView;

use std::fmt::Debug;

use crate::error::{CollectionError, Result};
use crate::iteration::StrictKeyedIterable;

/// The shared contract of indexed and keyed collections.
///
/// # Laws
///
/// - `count() == values().len()`
/// - `is_empty() == (count() == 0)`
/// - `try_get(k, d) == d` when `!contains_key(k)`, otherwise `get(k) == Ok(&try_get(k, d))`
/// - `exists(p)` is `true` iff some stored pair satisfies `p`
pub trait Collection: StrictKeyedIterable<Key: Clone + Debug> + Sized {
    /// Returns the number of entries.
    fn count(&self) -> usize;

    /// Returns `true` if the collection holds no entries.
    #[inline]
    fn is_empty(&self) -> bool {
        self.count() < 1
    }

    /// Removes every entry and returns the collection for chaining.
    ///
    /// The element type binding survives clearing.
    fn clear(&mut self) -> &mut Self;

    /// Returns a snapshot of all values in iteration order.
    fn values(&self) -> Vec<Self::Item> {
        self.iter().cloned().collect()
    }

    /// Returns a snapshot of all `(key, value)` pairs in iteration order.
    fn to_entries(&self) -> Vec<(Self::Key, Self::Item)> {
        self.iter_keyed()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Returns `true` if `key` is present.
    fn contains_key(&self, key: &Self::Key) -> bool;

    /// Returns the value at `key`, or `None` when absent.
    fn find(&self, key: &Self::Key) -> Option<&Self::Item>;

    /// Returns the value at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::KeyNotFound`] when `key` is absent.
    fn get(&self, key: &Self::Key) -> Result<&Self::Item> {
        self.find(key)
            .ok_or_else(|| CollectionError::key_not_found(key))
    }

    /// Returns the value at `key`, or `default` when absent. Never fails.
    fn try_get(&self, key: &Self::Key, default: Self::Item) -> Self::Item {
        self.find(key).cloned().unwrap_or(default)
    }

    /// Inserts or overwrites the entry at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::TypeMismatch`] when `value` does not match
    /// the element type; variants may reject keys they cannot hold.
    fn set(&mut self, key: Self::Key, value: Self::Item) -> Result<&mut Self>;

    /// Returns `true` as soon as `predicate` holds for a stored pair, scanning
    /// in iteration order. Always `false` on an empty collection.
    fn exists<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&Self::Key, &Self::Item) -> bool,
    {
        self.iter_keyed().any(|(key, value)| predicate(key, value))
    }

    /// Appends the entries of `other`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::TypeMismatch`] when `other` holds values of a
    /// different element type; the receiver is left unchanged.
    fn concat(&mut self, other: &Self) -> Result<&mut Self>;
}
