//! Serialization of collections.
//!
//! - [`BinarySerializable`]: a versioned binary envelope around a bincode
//!   payload, for persisting and restoring a collection exactly
//! - [`JsonSerializable`]: a JSON projection (array for indexed collections,
//!   object for keyed ones)
//!
//! # Binary Format
//!
//! | offset | size | content                                   |
//! |--------|------|-------------------------------------------|
//! | 0      | 4    | magic `b"SCOL"`                           |
//! | 4      | 1    | format version                            |
//! | 5      | 1    | layout tag: `0` indexed, `1` keyed        |
//! | 6      | ..   | payload: `Vec<V>` or `Vec<(K, V)>`        |
//!
//! # Examples
//!
//! ```rust
//! use strict_collections::prelude::*;
//!
//! let collection = IndexedCollection::from_values([1, 2, 3]).unwrap();
//! let bytes = collection.serialize().unwrap();
//! assert_eq!(&bytes[..4], b"SCOL");
//! assert_eq!(IndexedCollection::<i32>::from_bytes(&bytes).unwrap(), collection);
//! ```

mod binary;
mod json;

pub use json::JsonSerializable;

use crate::error::{CollectionError, Result};

/// Leading bytes of every binary payload.
pub const MAGIC: [u8; 4] = *b"SCOL";

/// The format version this crate writes. Newer versions are rejected.
pub const FORMAT_VERSION: u8 = 1;

const HEADER_LENGTH: usize = MAGIC.len() + 2;

/// Which collection variant a payload holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum Layout {
    Indexed = 0,
    Keyed = 1,
}

impl Layout {
    const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Indexed),
            1 => Some(Self::Keyed),
            _ => None,
        }
    }
}

/// Exact binary persistence of a collection.
///
/// # Laws
///
/// ```text
/// C::from_bytes(&c.serialize()?)? == c
/// ```
pub trait BinarySerializable: Sized {
    /// Encodes the collection's keys, values and order.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotSerializable`] when a value cannot be
    /// encoded.
    fn serialize(&self) -> Result<Vec<u8>>;

    /// Replaces this collection's contents with the decoded payload.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Deserialization`] when the payload is
    /// malformed, of another version or layout, or incompatible with this
    /// collection's element type. The collection is left unchanged.
    fn deserialize(&mut self, bytes: &[u8]) -> Result<&mut Self>;

    /// Decodes a new collection from `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Deserialization`] when the payload is
    /// malformed, of another version or layout.
    fn from_bytes(bytes: &[u8]) -> Result<Self>;
}

/// Prefixes the header to the bincode encoding of `payload`.
pub(crate) fn encode_envelope<P>(layout: Layout, payload: &P) -> Result<Vec<u8>>
where
    P: serde::Serialize + ?Sized,
{
    use bincode::Options;

    let body = bincode::options()
        .serialize(payload)
        .map_err(CollectionError::not_serializable)?;
    let mut bytes = Vec::with_capacity(HEADER_LENGTH + body.len());
    bytes.extend_from_slice(&MAGIC);
    bytes.push(FORMAT_VERSION);
    bytes.push(layout as u8);
    bytes.extend_from_slice(&body);
    tracing::debug!(?layout, bytes = bytes.len(), "encoded collection envelope");
    Ok(bytes)
}

/// Checks the header and decodes the payload that follows it.
pub(crate) fn decode_envelope<P>(layout: Layout, bytes: &[u8]) -> Result<P>
where
    P: serde::de::DeserializeOwned,
{
    use bincode::Options;

    if bytes.len() < HEADER_LENGTH {
        return Err(CollectionError::deserialization(format!(
            "payload of {} bytes is shorter than the {HEADER_LENGTH}-byte header",
            bytes.len()
        )));
    }
    let (header, body) = bytes.split_at(HEADER_LENGTH);
    if header[..MAGIC.len()] != MAGIC {
        return Err(CollectionError::deserialization("missing SCOL magic"));
    }
    let version = header[MAGIC.len()];
    if version != FORMAT_VERSION {
        return Err(CollectionError::deserialization(format!(
            "unsupported format version {version}, expected {FORMAT_VERSION}"
        )));
    }
    let tag = header[MAGIC.len() + 1];
    match Layout::from_tag(tag) {
        Some(found) if found == layout => {}
        Some(found) => {
            return Err(CollectionError::deserialization(format!(
                "payload holds a {found:?} collection, expected {layout:?}"
            )));
        }
        None => {
            return Err(CollectionError::deserialization(format!(
                "unknown layout tag {tag}"
            )));
        }
    }
    tracing::debug!(?layout, bytes = bytes.len(), "decoding collection envelope");
    bincode::options()
        .deserialize(body)
        .map_err(CollectionError::deserialization)
}
