//! Dense, position-keyed collection.
//!
//! [`IndexedCollection`] keys its entries by position: the keys are always
//! exactly `0..count()`. Appending, concatenating, removing and sorting all
//! renumber, so the collection behaves like a strictly typed list.

use std::cmp::Ordering;
use std::fmt;

use super::storage::Storage;
use super::{Collection, KeyedCollection, MergeView};
use crate::element::{Element, ElementType};
use crate::error::{CollectionError, Result};
use crate::iteration::{
    Entries, IntoEntries, StrictIterable, StrictKeyedIterable, TypeBinding, Values,
};
use crate::sort::{Sortable, natural_order};

/// A strictly typed sequence keyed by position.
///
/// # Type Parameters
///
/// * `V` - The element type. Every stored value reports the same
///   [`ElementType`].
///
/// # Examples
///
/// ```rust
/// use strict_collections::prelude::*;
///
/// let mut collection = IndexedCollection::new();
/// collection.add(3).unwrap().add(1).unwrap().add(2).unwrap();
/// collection.sort().unwrap();
/// assert_eq!(collection.values(), vec![1, 2, 3]);
/// assert_eq!(collection.get(&0), Ok(&1));
/// ```
#[derive(Clone)]
pub struct IndexedCollection<V> {
    storage: Storage<usize, V>,
    binding: TypeBinding,
}

impl<V: Element> IndexedCollection<V> {
    /// Creates an empty collection; the first stored value binds the element
    /// type.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Storage::new(),
            binding: TypeBinding::unbound(),
        }
    }

    /// Creates an empty collection bound to `element_type`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strict_collections::prelude::*;
    /// use strict_collections::element::{ElementType, Value};
    ///
    /// let mut collection = IndexedCollection::with_element_type(ElementType::Integer);
    /// assert!(collection.add(Value::from("text")).is_err());
    /// assert!(collection.add(Value::from(1)).is_ok());
    /// ```
    #[must_use]
    pub fn with_element_type(element_type: ElementType) -> Self {
        Self {
            storage: Storage::new(),
            binding: TypeBinding::declared(element_type),
        }
    }

    /// Creates a collection holding `values` in order.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::TypeMismatch`] when the values do not share
    /// one element type.
    pub fn from_values<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
    {
        let mut collection = Self::new();
        collection.add_all(values)?;
        Ok(collection)
    }

    /// Appends `value` at position `count()`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::TypeMismatch`] when `value` does not match
    /// the element type.
    pub fn add(&mut self, value: V) -> Result<&mut Self> {
        self.binding.admit(&value)?;
        let position = self.storage.len();
        self.storage.insert(position, value);
        Ok(self)
    }

    /// Appends every value of `values`, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::TypeMismatch`] when any value does not match
    /// the element type; nothing is appended in that case.
    pub fn add_all<I>(&mut self, values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = V>,
    {
        let incoming: Vec<V> = values.into_iter().collect();
        self.binding = self.binding.check_all(&incoming)?;
        self.append(incoming);
        Ok(self)
    }

    /// Appends every value produced by another strict source.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::TypeMismatch`] when the source's element
    /// type differs from this collection's; nothing is appended in that case.
    pub fn extend_from<S>(&mut self, source: &S) -> Result<&mut Self>
    where
        S: StrictIterable<Item = V>,
    {
        if let (Some(expected), Some(found)) = (self.binding.element_type(), source.element_type())
            && expected != found
        {
            return Err(CollectionError::TypeMismatch { expected, found });
        }
        self.add_all(source.iter().cloned())
    }

    /// Removes the value at `index`, shifting later values down by one.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfBounds`] when `index >= count()`.
    pub fn remove(&mut self, index: usize) -> Result<V> {
        let length = self.storage.len();
        let value = self
            .storage
            .remove(&index)
            .ok_or(CollectionError::IndexOutOfBounds { index, length })?;
        self.storage.rekey(|position| position);
        Ok(value)
    }

    /// Returns the first value, if any.
    #[must_use]
    pub fn first(&self) -> Option<&V> {
        self.storage.get_index(0).map(|(_, value)| value)
    }

    /// Returns the last value, if any.
    #[must_use]
    pub fn last(&self) -> Option<&V> {
        self.storage.entries().last().map(|(_, value)| value)
    }

    /// Returns a copy keyed by position in a [`KeyedCollection`].
    #[must_use]
    pub fn to_keyed(&self) -> KeyedCollection<usize, V> {
        KeyedCollection::from_parts(self.storage.clone(), self.binding)
    }

    /// Returns a new collection holding this collection's values followed by
    /// the values of each of `others`.
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
            values = view.len(),
            "merging indexed collections"
        );
        let mut merged = Self {
            storage: Storage::with_capacity(view.len()),
            binding,
        };
        merged.append(view.iter().map(|(_, value)| value.clone()));
        Ok(merged)
    }

    #[cfg(feature = "serde")]
    pub(crate) const fn binding(&self) -> TypeBinding {
        self.binding
    }

    pub(crate) fn from_parts(storage: Storage<usize, V>, binding: TypeBinding) -> Self {
        Self { storage, binding }
    }

    #[cfg(feature = "serde")]
    pub(crate) fn storage(&self) -> &Storage<usize, V> {
        &self.storage
    }

    /// Pushes already-validated values.
    fn append(&mut self, values: impl IntoIterator<Item = V>) {
        for value in values {
            let position = self.storage.len();
            self.storage.insert(position, value);
        }
    }
}

// =============================================================================
// Contract Implementations
// =============================================================================

impl<V: Element> StrictIterable for IndexedCollection<V> {
    type Item = V;
    type Iter<'a>
        = Values<'a, usize, V>
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

impl<V: Element> StrictKeyedIterable for IndexedCollection<V> {
    type Key = usize;
    type KeyedIter<'a>
        = Entries<'a, usize, V>
    where
        Self: 'a;

    #[inline]
    fn iter_keyed(&self) -> Self::KeyedIter<'_> {
        Entries::new(self.storage.entries())
    }
}

impl<V: Element> Collection for IndexedCollection<V> {
    #[inline]
    fn count(&self) -> usize {
        self.storage.len()
    }

    fn clear(&mut self) -> &mut Self {
        tracing::trace!(removed = self.storage.len(), "clearing indexed collection");
        self.storage.clear();
        self
    }

    #[inline]
    fn contains_key(&self, key: &usize) -> bool {
        *key < self.storage.len()
    }

    #[inline]
    fn find(&self, key: &usize) -> Option<&V> {
        self.storage.get_index(*key).map(|(_, value)| value)
    }

    /// Overwrites the value at `key`, or appends when `key == count()`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfBounds`] when `key > count()` and
    /// [`CollectionError::TypeMismatch`] when `value` does not match the
    /// element type.
    fn set(&mut self, key: usize, value: V) -> Result<&mut Self> {
        let length = self.storage.len();
        if key > length {
            return Err(CollectionError::IndexOutOfBounds { index: key, length });
        }
        self.binding.admit(&value)?;
        tracing::trace!(index = key, appended = key == length, "setting indexed entry");
        self.storage.insert(key, value);
        Ok(self)
    }

    /// Appends the values of `other` after the existing values, renumbering
    /// them from `count()`.
    fn concat(&mut self, other: &Self) -> Result<&mut Self> {
        let view = MergeView::new().with(other.storage.entries());
        let binding = view.validate(self.binding)?;
        tracing::debug!(
            existing = self.storage.len(),
            incoming = view.len(),
            "concatenating indexed collections"
        );
        self.binding = binding;
        self.append(view.iter().map(|(_, value)| value.clone()));
        Ok(self)
    }
}

impl<V: Element> Sortable for IndexedCollection<V> {
    fn sort_entries_by<F>(&mut self, mut compare: F) -> &mut Self
    where
        F: FnMut((&usize, &V), (&usize, &V)) -> Ordering,
    {
        self.storage
            .sort_by(|left, right| compare((&left.0, &left.1), (&right.0, &right.1)));
        self.storage.rekey(|position| position);
        self
    }

    fn sort(&mut self) -> Result<&mut Self> {
        let order = natural_order(self.storage.entries())?;
        self.storage.permute(&order);
        self.storage.rekey(|position| position);
        Ok(self)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<V: Element> Default for IndexedCollection<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Equal when both hold the same values in the same order.
impl<V: PartialEq> PartialEq for IndexedCollection<V> {
    fn eq(&self, other: &Self) -> bool {
        self.storage == other.storage
    }
}

impl<V: Eq> Eq for IndexedCollection<V> {}

impl<V: Element> TryFrom<Vec<V>> for IndexedCollection<V> {
    type Error = CollectionError;

    fn try_from(values: Vec<V>) -> Result<Self> {
        Self::from_values(values)
    }
}

impl<'a, V: Element> IntoIterator for &'a IndexedCollection<V> {
    type Item = &'a V;
    type IntoIter = Values<'a, usize, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: Element> IntoIterator for IndexedCollection<V> {
    type Item = (usize, V);
    type IntoIter = IntoEntries<usize, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoEntries::new(self.storage.into_entries())
    }
}

impl<V: fmt::Debug> fmt::Debug for IndexedCollection<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_list()
            .entries(self.storage.entries().iter().map(|(_, value)| value))
            .finish()
    }
}

impl<V: fmt::Display> fmt::Display for IndexedCollection<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for (_, value) in self.storage.entries() {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{value}")?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<V: serde::Serialize> serde::Serialize for IndexedCollection<V> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.storage.entries().iter().map(|(_, value)| value))
    }
}

#[cfg(feature = "serde")]
struct IndexedCollectionVisitor<V> {
    marker: std::marker::PhantomData<V>,
}

#[cfg(feature = "serde")]
impl<V> IndexedCollectionVisitor<V> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, V> serde::de::Visitor<'de> for IndexedCollectionVisitor<V>
where
    V: serde::Deserialize<'de> + Element,
{
    type Value = IndexedCollection<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of values sharing one element type")
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut values = Vec::with_capacity(capacity);
        while let Some(value) = seq.next_element()? {
            values.push(value);
        }
        IndexedCollection::from_values(values).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl<'de, V> serde::Deserialize<'de> for IndexedCollection<V>
where
    V: serde::Deserialize<'de> + Element,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(IndexedCollectionVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================
