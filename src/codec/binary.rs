//! Binary envelope encoding for indexed and keyed collections.

use std::fmt::Debug;
use std::hash::Hash;

use super::{BinarySerializable, Layout, decode_envelope, encode_envelope};
use crate::collection::storage::Storage;
use crate::collection::{IndexedCollection, KeyedCollection};
use crate::element::Element;
use crate::error::{CollectionError, Result};
use crate::iteration::TypeBinding;

impl<V> BinarySerializable for IndexedCollection<V>
where
    V: Element + serde::Serialize + serde::de::DeserializeOwned,
{
    fn serialize(&self) -> Result<Vec<u8>> {
        let values: Vec<&V> = self.storage().entries().iter().map(|(_, value)| value).collect();
        encode_envelope(Layout::Indexed, &values)
    }

    fn deserialize(&mut self, bytes: &[u8]) -> Result<&mut Self> {
        let decoded = decode_indexed(self.binding(), bytes)?;
        *self = decoded;
        Ok(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        decode_indexed(TypeBinding::unbound(), bytes)
    }
}

fn decode_indexed<V>(binding: TypeBinding, bytes: &[u8]) -> Result<IndexedCollection<V>>
where
    V: Element + serde::de::DeserializeOwned,
{
    let values: Vec<V> = decode_envelope(Layout::Indexed, bytes)?;
    let binding = binding
        .check_all(&values)
        .map_err(CollectionError::deserialization)?;
    let mut storage = Storage::with_capacity(values.len());
    for (position, value) in values.into_iter().enumerate() {
        storage.insert(position, value);
    }
    Ok(IndexedCollection::from_parts(storage, binding))
}

impl<K, V> BinarySerializable for KeyedCollection<K, V>
where
    K: Clone + Eq + Hash + Debug + serde::Serialize + serde::de::DeserializeOwned,
    V: Element + serde::Serialize + serde::de::DeserializeOwned,
{
    fn serialize(&self) -> Result<Vec<u8>> {
        let entries: Vec<(&K, &V)> = self
            .storage()
            .entries()
            .iter()
            .map(|(key, value)| (key, value))
            .collect();
        encode_envelope(Layout::Keyed, &entries)
    }

    fn deserialize(&mut self, bytes: &[u8]) -> Result<&mut Self> {
        let decoded = decode_keyed(self.binding(), bytes)?;
        *self = decoded;
        Ok(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        decode_keyed(TypeBinding::unbound(), bytes)
    }
}

fn decode_keyed<K, V>(binding: TypeBinding, bytes: &[u8]) -> Result<KeyedCollection<K, V>>
where
    K: Clone + Eq + Hash + Debug + serde::de::DeserializeOwned,
    V: Element + serde::de::DeserializeOwned,
{
    let entries: Vec<(K, V)> = decode_envelope(Layout::Keyed, bytes)?;
    let binding = binding
        .check_all(entries.iter().map(|(_, value)| value))
        .map_err(CollectionError::deserialization)?;
    let mut storage = Storage::with_capacity(entries.len());
    for (key, value) in entries {
        if storage.contains_key(&key) {
            return Err(CollectionError::deserialization(format!(
                "duplicate key {key:?}"
            )));
        }
        storage.insert(key, value);
    }
    Ok(KeyedCollection::from_parts(storage, binding))
}
