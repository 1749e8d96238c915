//! Ordering of collection entries.
//!
//! [`Sortable`] reorders a collection either with a caller-supplied comparator
//! or by the natural ordering its elements report through
//! [`Element::try_compare`]. All sorts are stable: entries that compare equal
//! keep their relative order.
//!
//! # Examples
//!
//! ```rust
//! use strict_collections::prelude::*;
//!
//! let collection = IndexedCollection::from_values([3, 1, 2]).unwrap();
//! let ascending = collection.sorted().unwrap();
//! let descending = collection.sorted_by(|left, right| right.cmp(left));
//!
//! assert_eq!(ascending.values(), vec![1, 2, 3]);
//! assert_eq!(descending.values(), vec![3, 2, 1]);
//! assert_eq!(collection.values(), vec![3, 1, 2]);
//! ```

use std::cmp::Ordering;

use crate::element::Element;
use crate::error::{CollectionError, Result};
use crate::iteration::StrictKeyedIterable;

/// A collection whose entries can be reordered in place.
///
/// # Laws
///
/// ## Stability
///
/// ```text
/// compare(a, b) == Equal  =>  a and b keep their relative order
/// ```
///
/// ## Idempotence
///
/// ```text
/// c.sorted_by(f).sorted_by(f) == c.sorted_by(f)
/// ```
pub trait Sortable: StrictKeyedIterable + Clone {
    /// Sorts entries with `compare` over `(key, value)` pairs.
    fn sort_entries_by<F>(&mut self, compare: F) -> &mut Self
    where
        F: FnMut((&Self::Key, &Self::Item), (&Self::Key, &Self::Item)) -> Ordering;

    /// Sorts entries by the natural ordering of their values.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotComparable`] when the element type has no
    /// natural ordering or two values cannot be compared. The collection is
    /// left unchanged in that case.
    fn sort(&mut self) -> Result<&mut Self>;

    /// Sorts entries with `compare` over values.
    fn sort_by<F>(&mut self, mut compare: F) -> &mut Self
    where
        F: FnMut(&Self::Item, &Self::Item) -> Ordering,
    {
        self.sort_entries_by(|(_, left), (_, right)| compare(left, right))
    }

    /// Returns a sorted copy; `self` is untouched.
    #[must_use]
    fn sorted_by<F>(&self, compare: F) -> Self
    where
        F: FnMut(&Self::Item, &Self::Item) -> Ordering,
    {
        let mut copy = self.clone();
        copy.sort_by(compare);
        copy
    }

    /// Returns a copy sorted over `(key, value)` pairs; `self` is untouched.
    #[must_use]
    fn sorted_entries_by<F>(&self, compare: F) -> Self
    where
        F: FnMut((&Self::Key, &Self::Item), (&Self::Key, &Self::Item)) -> Ordering,
    {
        let mut copy = self.clone();
        copy.sort_entries_by(compare);
        copy
    }

    /// Returns a copy sorted by natural ordering.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotComparable`] under the same conditions as
    /// [`Sortable::sort`].
    fn sorted(&self) -> Result<Self> {
        let mut copy = self.clone();
        copy.sort()?;
        Ok(copy)
    }
}

/// Computes the stable permutation that puts `entries` in natural order.
///
/// `order[i]` is the position of the entry that belongs at `i`. Nothing is
/// reordered here, so a failure leaves the caller's storage intact.
pub(crate) fn natural_order<K, V: Element>(entries: &[(K, V)]) -> Result<Vec<usize>> {
    if let Some((_, value)) = entries
        .iter()
        .find(|(_, value)| value.try_compare(value).is_none())
    {
        return Err(CollectionError::NotComparable {
            element_type: value.element_type(),
        });
    }

    let mut incomparable = None;
    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by(|&left, &right| {
        let (left, right) = (&entries[left].1, &entries[right].1);
        left.try_compare(right).unwrap_or_else(|| {
            incomparable = incomparable.or(Some(left.element_type()));
            Ordering::Equal
        })
    });

    if let Some(element_type) = incomparable {
        tracing::debug!(%element_type, "natural sort rejected");
        return Err(CollectionError::NotComparable { element_type });
    }
    tracing::debug!(entries = entries.len(), "natural sort computed");
    Ok(order)
}

// =============================================================================
// Tests
// =============================================================================
