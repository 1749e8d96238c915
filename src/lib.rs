//! # strict-collections
//!
//! Strictly typed collections with ordered storage for Rust.
//!
//! ## Overview
//!
//! Every collection holds values of exactly one element type, checked at run
//! time on every mutation on top of the compile-time generic parameter. The
//! crate provides:
//!
//! - **Collections**: [`IndexedCollection`](collection::IndexedCollection), a dense
//!   position-keyed sequence, and [`KeyedCollection`](collection::KeyedCollection),
//!   an insertion-ordered map
//! - **Element Typing**: the [`Element`](element::Element) trait, runtime
//!   [`ElementType`](element::ElementType) tags and the dynamic
//!   [`Value`](element::Value)
//! - **Iteration**: restartable strict traversal over values and entries
//! - **Sorting**: stable in-place and copy-producing ordering
//! - **Reactive Snapshots**: replayable observables over a collection's values
//! - **Serialization**: a versioned binary envelope and a JSON projection
//!
//! Failing operations are atomic: an `Err` leaves the collection unchanged.
//!
//! ## Feature Flags
//!
//! - `serde` (default): binary envelope, JSON projection and serde impls
//! - `reactive` (default): observables
//! - `arc`: thread-shareable observables
//! - `fxhash` / `ahash`: alternative hashers for the key index
//! - `full`: `serde`, `reactive` and `arc`
//!
//! ## Example
//!
//! ```rust
//! use strict_collections::prelude::*;
//!
//! let mut scores = KeyedCollection::new();
//! scores.set("alice", 3).unwrap().set("bob", 1).unwrap();
//! scores.sort().unwrap();
//!
//! assert_eq!(scores.to_entries(), vec![("bob", 1), ("alice", 3)]);
//! assert!(scores.exists(|_, score| *score > 2));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the collections, their contracts and the element model.
///
/// # Usage
///
/// ```rust
/// use strict_collections::prelude::*;
/// ```
pub mod prelude {
    pub use crate::collection::{Collection, IndexedCollection, KeyedCollection};
    pub use crate::element::{Element, ElementType, Value};
    pub use crate::error::CollectionError;
    pub use crate::iteration::{StrictIterable, StrictKeyedIterable};
    pub use crate::sort::Sortable;

    #[cfg(feature = "reactive")]
    pub use crate::reactive::{Observable, Observer, Subscription, ToObservable};

    #[cfg(feature = "serde")]
    pub use crate::codec::{BinarySerializable, JsonSerializable};
}

pub mod collection;
pub mod element;
pub mod error;
pub mod iteration;
pub mod sort;

#[cfg(feature = "reactive")]
pub mod reactive;

#[cfg(feature = "serde")]
pub mod codec;
