//! Error types for strict collections.
//!
//! Every fallible operation reports a [`CollectionError`] at the point of
//! violation. Failing operations leave the collection unchanged.

use crate::element::ElementType;

/// Represents the errors a collection operation can report.
///
/// # Examples
///
/// ```rust
/// use strict_collections::element::ElementType;
/// use strict_collections::error::CollectionError;
///
/// let error = CollectionError::TypeMismatch {
///     expected: ElementType::Integer,
///     found: ElementType::Text,
/// };
/// assert_eq!(
///     error.to_string(),
///     "type mismatch: collection holds integer values, got text"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    /// A lookup found no entry for the key.
    #[error("key not found: {key}")]
    KeyNotFound {
        /// Debug rendering of the missing key.
        key: String,
    },

    /// A position lies beyond the end of a dense indexed collection.
    #[error("index {index} is out of bounds for a collection of {length} elements")]
    IndexOutOfBounds {
        /// The rejected position.
        index: usize,
        /// The collection length at the time of the call.
        length: usize,
    },

    /// A value's runtime type differs from the collection's element type.
    #[error("type mismatch: collection holds {expected} values, got {found}")]
    TypeMismatch {
        /// The element type the collection is bound to.
        expected: ElementType,
        /// The element type of the rejected value.
        found: ElementType,
    },

    /// A serialized payload is malformed or incompatible.
    #[error("deserialization failed: {reason}")]
    Deserialization {
        /// What was wrong with the payload.
        reason: String,
    },

    /// Natural ordering was requested for values that have none.
    #[error("{element_type} values have no natural ordering")]
    NotComparable {
        /// The element type that could not be ordered.
        element_type: ElementType,
    },

    /// A value cannot be represented in the target format.
    #[error("value is not serializable: {reason}")]
    NotSerializable {
        /// Why the value could not be represented.
        reason: String,
    },
}

impl CollectionError {
    pub(crate) fn key_not_found<K: std::fmt::Debug + ?Sized>(key: &K) -> Self {
        Self::KeyNotFound {
            key: format!("{key:?}"),
        }
    }

    #[cfg_attr(not(feature = "serde"), allow(dead_code))]
    pub(crate) fn deserialization(reason: impl std::fmt::Display) -> Self {
        Self::Deserialization {
            reason: reason.to_string(),
        }
    }

    #[cfg_attr(not(feature = "serde"), allow(dead_code))]
    pub(crate) fn not_serializable(reason: impl std::fmt::Display) -> Self {
        Self::NotSerializable {
            reason: reason.to_string(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CollectionError>;
