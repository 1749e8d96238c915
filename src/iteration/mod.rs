//! Strict iteration contracts.
//!
//! - [`StrictIterable`]: traversal over values whose runtime type matches the
//!   collection's element type
//! - [`StrictKeyedIterable`]: traversal over `(key, value)` pairs in insertion
//!   order
//!
//! Traversal is lazy, finite and restartable: every call to `iter()` starts a
//! fresh pass over the current storage.
//!
//! # Examples
//!
//! ```rust
//! use strict_collections::prelude::*;
//!
//! let collection = IndexedCollection::from_values([10, 20, 30]).unwrap();
//! let doubled: Vec<i32> = collection.iter().map(|value| value * 2).collect();
//! assert_eq!(doubled, vec![20, 40, 60]);
//!
//! // Restarting re-reads storage rather than resuming a cursor.
//! assert_eq!(collection.iter().count(), 3);
//! assert_eq!(collection.iter().count(), 3);
//! ```

mod iter;

pub use iter::{Entries, IntoEntries, Keys, Values};

use crate::element::{Element, ElementType};
use crate::error::{CollectionError, Result};

/// A collection whose elements all share one runtime element type.
pub trait StrictIterable {
    /// The element type.
    type Item: Element;

    /// Iterator over elements in iteration order.
    type Iter<'a>: Iterator<Item = &'a Self::Item>
    where
        Self: 'a;

    /// Starts a fresh traversal over the current elements.
    fn iter(&self) -> Self::Iter<'_>;

    /// Returns the bound element type, or `None` while nothing has bound it.
    fn element_type(&self) -> Option<ElementType>;

    /// Checks that `value` may be stored in this collection.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::TypeMismatch`] when the value's runtime type
    /// differs from the bound element type.
    fn accepts(&self, value: &Self::Item) -> Result<()> {
        TypeBinding::from(self.element_type()).check(value)
    }
}

/// A [`StrictIterable`] that also exposes its keys.
pub trait StrictKeyedIterable: StrictIterable {
    /// The key type.
    type Key;

    /// Iterator over `(key, value)` pairs in iteration order.
    type KeyedIter<'a>: Iterator<Item = (&'a Self::Key, &'a Self::Item)>
    where
        Self: 'a;

    /// Starts a fresh traversal over the current entries.
    fn iter_keyed(&self) -> Self::KeyedIter<'_>;
}

// =============================================================================
// TypeBinding
// =============================================================================

/// The element type a collection is bound to.
///
/// A binding starts unbound, is fixed either explicitly or by the first value
/// it accepts, and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct TypeBinding {
    bound: Option<ElementType>,
}

impl TypeBinding {
    pub(crate) const fn unbound() -> Self {
        Self { bound: None }
    }

    pub(crate) const fn declared(element_type: ElementType) -> Self {
        Self {
            bound: Some(element_type),
        }
    }

    #[inline]
    pub(crate) const fn element_type(self) -> Option<ElementType> {
        self.bound
    }

    /// Checks one value without binding.
    pub(crate) fn check<V: Element>(self, value: &V) -> Result<()> {
        match self.bound {
            Some(expected) => {
                let found = value.element_type();
                if found == expected {
                    Ok(())
                } else {
                    Err(CollectionError::TypeMismatch { expected, found })
                }
            }
            None => Ok(()),
        }
    }

    /// Checks a batch of values and returns the binding that would result from
    /// accepting all of them. `self` is left untouched so callers can commit
    /// only after the whole batch passed.
    pub(crate) fn check_all<'a, V, I>(self, values: I) -> Result<Self>
    where
        V: Element + 'a,
        I: IntoIterator<Item = &'a V>,
    {
        let mut candidate = self;
        for value in values {
            candidate.check(value)?;
            if candidate.bound.is_none() {
                candidate.bound = Some(value.element_type());
            }
        }
        Ok(candidate)
    }

    /// Checks one value and binds to its type when unbound.
    pub(crate) fn admit<V: Element>(&mut self, value: &V) -> Result<()> {
        *self = self.check_all(std::iter::once(value))?;
        Ok(())
    }
}

impl From<Option<ElementType>> for TypeBinding {
    fn from(bound: Option<ElementType>) -> Self {
        Self { bound }
    }
}

// =============================================================================
// Tests
// =============================================================================
