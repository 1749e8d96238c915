//! JSON projection of strict collections.

use std::fmt::Debug;
use std::hash::Hash;

use crate::collection::{IndexedCollection, KeyedCollection};
use crate::element::Element;
use crate::error::{CollectionError, Result};
use crate::iteration::StrictIterable;

/// JSON projection of a collection.
///
/// Indexed collections become arrays and keyed collections become objects,
/// both in iteration order.
///
/// # Examples
///
/// ```rust
/// use strict_collections::prelude::*;
///
/// let mut map = KeyedCollection::new();
/// map.set("a".to_string(), 1).unwrap();
/// assert_eq!(map.json_serialize().unwrap(), serde_json::json!({"a": 1}));
///
/// let floats = IndexedCollection::from_values([1.0, f64::NAN]).unwrap();
/// assert!(floats.json_serialize().is_err());
/// ```
pub trait JsonSerializable {
    /// Returns the JSON representation. Pure.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotSerializable`] when a value has no JSON
    /// representation (such as a non-finite float) or a key cannot become a
    /// JSON object key.
    fn json_serialize(&self) -> Result<serde_json::Value>;
}

impl<C> JsonSerializable for C
where
    C: StrictIterable + serde::Serialize,
{
    fn json_serialize(&self) -> Result<serde_json::Value> {
        if let Some(value) = self.iter().find(|value| !value.is_json_representable()) {
            return Err(CollectionError::not_serializable(format!(
                "{} value has no JSON representation",
                value.element_type()
            )));
        }
        serde_json::to_value(self).map_err(CollectionError::not_serializable)
    }
}

impl<V> IndexedCollection<V>
where
    V: Element + serde::de::DeserializeOwned,
{
    /// Builds a collection from a JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Deserialization`] when `json` is not an array
    /// of values sharing one element type.
    pub fn from_json(json: serde_json::Value) -> Result<Self> {
        serde_json::from_value(json).map_err(CollectionError::deserialization)
    }
}

impl<K, V> KeyedCollection<K, V>
where
    K: Clone + Eq + Hash + Debug + serde::de::DeserializeOwned,
    V: Element + serde::de::DeserializeOwned,
{
    /// Builds a collection from a JSON object, keeping its key order.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Deserialization`] when `json` is not an
    /// object whose values share one element type.
    pub fn from_json(json: serde_json::Value) -> Result<Self> {
        serde_json::from_value(json).map_err(CollectionError::deserialization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::Collection;
    use crate::element::Value;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn test_indexed_projects_to_array() {
        let collection = IndexedCollection::from_values(["x", "y"]).unwrap();
        assert_eq!(collection.json_serialize().unwrap(), json!(["x", "y"]));
    }

    #[rstest]
    fn test_nested_non_finite_value_is_rejected() {
        let collection =
            IndexedCollection::from_values([Value::List(vec![Value::Float(f64::INFINITY)])])
                .unwrap();
        assert!(matches!(
            collection.json_serialize(),
            Err(CollectionError::NotSerializable { .. })
        ));
    }

    #[rstest]
    fn test_from_json_rejects_mixed_values() {
        let result = IndexedCollection::<Value>::from_json(json!([1, "two"]));
        assert!(matches!(
            result,
            Err(CollectionError::Deserialization { .. })
        ));
    }

    #[rstest]
    fn test_keyed_from_json_parses_integer_keys() {
        let map = KeyedCollection::<u32, bool>::from_json(json!({"2": true, "1": false})).unwrap();
        assert_eq!(map.to_entries(), vec![(2, true), (1, false)]);
    }
}
