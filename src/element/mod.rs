//! Runtime element typing.
//!
//! Every value stored in a collection implements [`Element`], which reports a
//! runtime [`ElementType`] tag. Collections bind to one tag and reject values
//! carrying any other tag, so a collection of the dynamic [`Value`] type stays
//! as homogeneous as a collection of `i32`.
//!
//! # Examples
//!
//! ```rust
//! use strict_collections::element::{Element, ElementType, Value};
//!
//! assert_eq!(42_i32.element_type(), ElementType::Integer);
//! assert_eq!(Value::from("text").element_type(), ElementType::Text);
//! assert_eq!(Value::Null.element_type(), ElementType::Null);
//! ```

mod value;

pub use value::Value;

use std::cmp::Ordering;
use std::fmt;

// =============================================================================
// ElementType
// =============================================================================

/// Runtime tag describing the type of a stored element.
///
/// Integer widths share the [`ElementType::Integer`] tag; a single collection
/// instance is still homogeneous because its Rust element type is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// The absence of a value.
    Null,
    /// A boolean.
    Bool,
    /// Any integer width.
    Integer,
    /// Any floating point width.
    Float,
    /// A single character.
    Char,
    /// A string.
    Text,
    /// A sequence of values.
    List,
    /// A string-keyed mapping of values.
    Map,
    /// A user type, identified by its type name.
    Named(&'static str),
}

impl ElementType {
    /// Returns the tag for a user type, named after `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strict_collections::element::ElementType;
    ///
    /// struct Point;
    /// let tag = ElementType::named::<Point>();
    /// assert!(matches!(tag, ElementType::Named(name) if name.ends_with("Point")));
    /// ```
    #[must_use]
    pub fn named<T: ?Sized>() -> Self {
        Self::Named(std::any::type_name::<T>())
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => formatter.write_str("null"),
            Self::Bool => formatter.write_str("bool"),
            Self::Integer => formatter.write_str("integer"),
            Self::Float => formatter.write_str("float"),
            Self::Char => formatter.write_str("char"),
            Self::Text => formatter.write_str("text"),
            Self::List => formatter.write_str("list"),
            Self::Map => formatter.write_str("map"),
            Self::Named(name) => formatter.write_str(name),
        }
    }
}

// =============================================================================
// Element
// =============================================================================

/// A value that can be stored in a strict collection.
///
/// # Required Methods
///
/// - `element_type`: the runtime tag checked at every mutating boundary
///
/// # Provided Methods
///
/// - `try_compare`: natural ordering used by `sort()`; `None` means the two
///   values have no natural ordering
/// - `is_json_representable`: whether the value survives a JSON projection
///
/// # Examples
///
/// ```rust
/// use strict_collections::element::{Element, ElementType};
///
/// #[derive(Clone)]
/// struct Celsius(f64);
///
/// impl Element for Celsius {
///     fn element_type(&self) -> ElementType {
///         ElementType::named::<Self>()
///     }
/// }
///
/// // No natural ordering was provided.
/// assert!(Celsius(1.0).try_compare(&Celsius(2.0)).is_none());
/// ```
pub trait Element: Clone {
    /// Returns the runtime type tag of this value.
    fn element_type(&self) -> ElementType;

    /// Compares two values under their natural ordering, if one exists.
    fn try_compare(&self, other: &Self) -> Option<Ordering> {
        let _ = other;
        None
    }

    /// Returns `true` if this value has a JSON representation.
    fn is_json_representable(&self) -> bool {
        true
    }
}

macro_rules! impl_ordered_element {
    ($tag:expr => $($type:ty),+ $(,)?) => {
        $(
            impl Element for $type {
                #[inline]
                fn element_type(&self) -> ElementType {
                    $tag
                }

                #[inline]
                fn try_compare(&self, other: &Self) -> Option<Ordering> {
                    Some(self.cmp(other))
                }
            }
        )+
    };
}

impl_ordered_element!(ElementType::Integer => i8, i16, i32, i64, i128, isize);
impl_ordered_element!(ElementType::Integer => u8, u16, u32, u64, u128, usize);
impl_ordered_element!(ElementType::Bool => bool);
impl_ordered_element!(ElementType::Char => char);
impl_ordered_element!(ElementType::Text => String, &'static str);

macro_rules! impl_float_element {
    ($($type:ty),+) => {
        $(
            impl Element for $type {
                #[inline]
                fn element_type(&self) -> ElementType {
                    ElementType::Float
                }

                #[inline]
                fn try_compare(&self, other: &Self) -> Option<Ordering> {
                    self.partial_cmp(other)
                }

                #[inline]
                fn is_json_representable(&self) -> bool {
                    self.is_finite()
                }
            }
        )+
    };
}

impl_float_element!(f32, f64);

/// `None` and `Some` share one tag, so an optional collection accepts both.
impl<T: Element> Element for Option<T> {
    fn element_type(&self) -> ElementType {
        ElementType::named::<Self>()
    }

    fn try_compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (None, None) => Some(Ordering::Equal),
            (None, Some(_)) => Some(Ordering::Less),
            (Some(_), None) => Some(Ordering::Greater),
            (Some(left), Some(right)) => left.try_compare(right),
        }
    }

    fn is_json_representable(&self) -> bool {
        self.as_ref().is_none_or(Element::is_json_representable)
    }
}

impl<T: Element> Element for Vec<T> {
    fn element_type(&self) -> ElementType {
        ElementType::List
    }

    /// Lexicographic comparison; `None` as soon as one pair is incomparable.
    fn try_compare(&self, other: &Self) -> Option<Ordering> {
        for (left, right) in self.iter().zip(other) {
            match left.try_compare(right)? {
                Ordering::Equal => {}
                ordering => return Some(ordering),
            }
        }
        Some(self.len().cmp(&other.len()))
    }

    fn is_json_representable(&self) -> bool {
        self.iter().all(Element::is_json_representable)
    }
}

// =============================================================================
// Tests
// =============================================================================
