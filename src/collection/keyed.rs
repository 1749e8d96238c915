//! Insertion-ordered, strictly typed map.
//!
//! [`KeyedCollection`] associates keys of one declared type with values of one
//! element type. Iteration follows insertion order; overwriting a key keeps the
//! key where it was first inserted.

use std::cmp::Ordering;
use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;

use super::storage::Storage;
use super::{Collection, IndexedCollection, MergeView};
use crate::element::{Element, ElementType};
use crate::error::{CollectionError, Result};
use crate::iteration::{
    Entries, IntoEntries, Keys, StrictIterable, StrictKeyedIterable, TypeBinding, Values,
};
use crate::sort::{Sortable, natural_order};

/// A strictly typed map that remembers insertion order.
///
/// # Type Parameters
///
/// * `K` - The key type. Must implement `Clone`, `Eq`, `Hash` and `Debug`.
/// * `V` - The element type. Every stored value reports the same
///   [`ElementType`].
///
/// # Examples
///
/// ```rust
/// use strict_collections::prelude::*;
///
/// let mut map = KeyedCollection::new();
/// map.set("a", 1).unwrap();
/// map.set("a", 2).unwrap();
/// assert_eq!(map.count(), 1);
/// assert_eq!(map.get(&"a"), Ok(&2));
/// ```
#[derive(Clone)]
pub struct KeyedCollection<K, V> {
    storage: Storage<K, V>,
    binding: TypeBinding,
}

impl<K, V> KeyedCollection<K, V>
where
    K: Clone + Eq + Hash + Debug,
    V: Element,
{
    /// Creates an empty map; the first stored value binds the element type.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Storage::new(),
            binding: TypeBinding::unbound(),
        }
    }

    /// Creates an empty map bound to `element_type`.
    #[must_use]
    pub fn with_element_type(element_type: ElementType) -> Self {
        Self {
            storage: Storage::new(),
            binding: TypeBinding::declared(element_type),
        }
    }

    /// Creates a map from `entries`; a repeated key keeps its first position
    /// and its last value.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::TypeMismatch`] when the values do not share
    /// one element type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strict_collections::prelude::*;
    ///
    /// let map = KeyedCollection::from_entries([("x", 1), ("y", 2), ("x", 3)]).unwrap();
    /// assert_eq!(map.to_entries(), vec![("x", 3), ("y", 2)]);
    /// ```
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let incoming: Vec<(K, V)> = entries.into_iter().collect();
        let binding = TypeBinding::unbound().check_all(incoming.iter().map(|(_, value)| value))?;
        let mut storage = Storage::with_capacity(incoming.len());
        for (key, value) in incoming {
            storage.insert(key, value);
        }
        Ok(Self { storage, binding })
    }

    /// Removes the entry at `key`; the remaining entries keep their order.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::KeyNotFound`] when `key` is absent.
    pub fn remove(&mut self, key: &K) -> Result<V> {
        self.storage
            .remove(key)
            .ok_or_else(|| CollectionError::key_not_found(key))
    }

    /// Returns an iterator over the keys in iteration order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.storage.entries())
    }

    /// Returns the values as an [`IndexedCollection`], dropping the keys.
    #[must_use]
    pub fn to_indexed(&self) -> IndexedCollection<V> {
        let mut storage = Storage::with_capacity(self.storage.len());
        for (position, (_, value)) in self.storage.entries().iter().enumerate() {
            storage.insert(position, value.clone());
        }
        IndexedCollection::from_parts(storage, self.binding)
    }

    /// Sorts entries by key, stably.
    pub fn sort_by_keys(&mut self) -> &mut Self
    where
        K: Ord,
    {
        self.storage.sort_by(|left, right| left.0.cmp(&right.0));
        self
    }

    /// Returns a new map holding this map's entries merged with each of
    /// `others` in turn, last write winning on key collisions.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::TypeMismatch`] when the inputs do not share
    /// one element type.
    pub fn merged(&self, others: &[&Self]) -> Result<Self> {
        let mut view = MergeView::new().with(self.storage.entries());
        for other in others {
            view = view.with(other.storage.entries());
        }
        let binding = view.validate(self.binding)?;
        tracing::debug!(
            parts = others.len() + 1,
            entries = view.len(),
            "merging keyed collections"
        );
        let mut storage = Storage::with_capacity(view.len());
        for (key, value) in view.iter() {
            storage.insert(key.clone(), value.clone());
        }
        Ok(Self { storage, binding })
    }

    #[cfg(feature = "serde")]
    pub(crate) const fn binding(&self) -> TypeBinding {
        self.binding
    }

    pub(crate) fn from_parts(storage: Storage<K, V>, binding: TypeBinding) -> Self {
        Self { storage, binding }
    }

    #[cfg(feature = "serde")]
    pub(crate) fn storage(&self) -> &Storage<K, V> {
        &self.storage
    }
}

// =============================================================================
// Contract Implementations
// =============================================================================

impl<K, V> StrictIterable for KeyedCollection<K, V>
where
    K: Clone + Eq + Hash + Debug,
    V: Element,
{
    type Item = V;
    type Iter<'a>
        = Values<'a, K, V>
    where
        Self: 'a;

    #[inline]
    fn iter(&self) -> Self::Iter<'_> {
        Values::new(self.storage.entries())
    }

    #[inline]
    fn element_type(&self) -> Option<ElementType> {
        self.binding.element_type()
    }
}

impl<K, V> StrictKeyedIterable for KeyedCollection<K, V>
where
    K: Clone + Eq + Hash + Debug,
    V: Element,
{
    type Key = K;
    type KeyedIter<'a>
        = Entries<'a, K, V>
    where
        Self: 'a;

    #[inline]
    fn iter_keyed(&self) -> Self::KeyedIter<'_> {
        Entries::new(self.storage.entries())
    }
}

impl<K, V> Collection for KeyedCollection<K, V>
where
    K: Clone + Eq + Hash + Debug,
    V: Element,
{
    #[inline]
    fn count(&self) -> usize {
        self.storage.len()
    }

    fn clear(&mut self) -> &mut Self {
        tracing::trace!(removed = self.storage.len(), "clearing keyed collection");
        self.storage.clear();
        self
    }

    #[inline]
    fn contains_key(&self, key: &K) -> bool {
        self.storage.contains_key(key)
    }

    #[inline]
    fn find(&self, key: &K) -> Option<&V> {
        self.storage.get(key)
    }

    fn set(&mut self, key: K, value: V) -> Result<&mut Self> {
        self.binding.admit(&value)?;
        let replaced = self.storage.insert(key, value).is_some();
        tracing::trace!(replaced, "setting keyed entry");
        Ok(self)
    }

    /// Merges `other` into this map.
    ///
    /// New keys are appended in `other`'s order. A key present in both keeps
    /// its position here and takes `other`'s value: last write wins, as in an
    /// array merge. This silently discards the receiver's value for colliding
    /// keys; check with [`Collection::exists`] or [`Collection::contains_key`]
    /// first when that matters.
    fn concat(&mut self, other: &Self) -> Result<&mut Self> {
        let view = MergeView::new().with(other.storage.entries());
        let binding = view.validate(self.binding)?;
        tracing::debug!(
            existing = self.storage.len(),
            incoming = view.len(),
            "concatenating keyed collections"
        );
        self.binding = binding;
        for (key, value) in view.iter() {
            self.storage.insert(key.clone(), value.clone());
        }
        Ok(self)
    }
}

impl<K, V> Sortable for KeyedCollection<K, V>
where
    K: Clone + Eq + Hash + Debug,
    V: Element,
{
    fn sort_entries_by<F>(&mut self, mut compare: F) -> &mut Self
    where
        F: FnMut((&K, &V), (&K, &V)) -> Ordering,
    {
        self.storage
            .sort_by(|left, right| compare((&left.0, &left.1), (&right.0, &right.1)));
        self
    }

    fn sort(&mut self) -> Result<&mut Self> {
        let order = natural_order(self.storage.entries())?;
        self.storage.permute(&order);
        Ok(self)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for KeyedCollection<K, V>
where
    K: Clone + Eq + Hash + Debug,
    V: Element,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Equal when both hold the same entries in the same order.
impl<K: PartialEq, V: PartialEq> PartialEq for KeyedCollection<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.storage == other.storage
    }
}

impl<K: Eq, V: Eq> Eq for KeyedCollection<K, V> {}

impl<K, V> TryFrom<Vec<(K, V)>> for KeyedCollection<K, V>
where
    K: Clone + Eq + Hash + Debug,
    V: Element,
{
    type Error = CollectionError;

    fn try_from(entries: Vec<(K, V)>) -> Result<Self> {
        Self::from_entries(entries)
    }
}

impl<'a, K, V> IntoIterator for &'a KeyedCollection<K, V>
where
    K: Clone + Eq + Hash + Debug,
    V: Element,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Entries<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_keyed()
    }
}

impl<K, V> IntoIterator for KeyedCollection<K, V>
where
    K: Clone + Eq + Hash + Debug,
    V: Element,
{
    type Item = (K, V);
    type IntoIter = IntoEntries<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoEntries::new(self.storage.into_entries())
    }
}

impl<K: Debug, V: Debug> Debug for KeyedCollection<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.storage, formatter)
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for KeyedCollection<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self.storage.entries() {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for KeyedCollection<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let entries = self.storage.entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct KeyedCollectionVisitor<K, V> {
    marker: std::marker::PhantomData<(K, V)>,
}

#[cfg(feature = "serde")]
impl<K, V> KeyedCollectionVisitor<K, V> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for KeyedCollectionVisitor<K, V>
where
    K: serde::Deserialize<'de> + Clone + Eq + Hash + Debug,
    V: serde::Deserialize<'de> + Element,
{
    type Value = KeyedCollection<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map whose values share one element type")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = map.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut entries = Vec::with_capacity(capacity);
        while let Some(entry) = map.next_entry()? {
            entries.push(entry);
        }
        KeyedCollection::from_entries(entries).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for KeyedCollection<K, V>
where
    K: serde::Deserialize<'de> + Clone + Eq + Hash + Debug,
    V: serde::Deserialize<'de> + Element,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(KeyedCollectionVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================
