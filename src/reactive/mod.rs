//! Push-based view of a collection's values.
//!
//! [`ToObservable::to_observable`] captures a snapshot of a collection's
//! values. Each subscription synchronously replays that snapshot to an
//! [`Observer`] and then signals completion. Later mutations of the source
//! collection never reach an existing observable.
//!
//! # Examples
//!
//! ```rust
//! use strict_collections::prelude::*;
//!
//! let mut collection = IndexedCollection::from_values([1, 2, 3]).unwrap();
//! let observable = collection.to_observable();
//! collection.set(0, 100).unwrap();
//!
//! let mut seen = Vec::new();
//! observable.subscribe(|value: &i32| seen.push(*value));
//! assert_eq!(seen, vec![1, 2, 3]);
//! ```

use std::fmt;

use crate::iteration::StrictIterable;

/// Shared ownership for observable snapshots.
///
/// `std::sync::Arc` with the `arc` feature, `std::rc::Rc` otherwise.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

#[cfg(feature = "arc")]
type ClosedFlag = std::sync::atomic::AtomicBool;

#[cfg(not(feature = "arc"))]
type ClosedFlag = std::cell::Cell<bool>;

#[cfg(feature = "arc")]
fn close(flag: &ClosedFlag) {
    flag.store(true, std::sync::atomic::Ordering::Release);
}

#[cfg(not(feature = "arc"))]
fn close(flag: &ClosedFlag) {
    flag.set(true);
}

#[cfg(feature = "arc")]
fn is_set(flag: &ClosedFlag) -> bool {
    flag.load(std::sync::atomic::Ordering::Acquire)
}

#[cfg(not(feature = "arc"))]
fn is_set(flag: &ClosedFlag) -> bool {
    flag.get()
}

/// Receives the values an [`Observable`] emits.
///
/// Implemented for every `FnMut(&T)`, which ignores completion.
pub trait Observer<T> {
    /// Called once per emitted value, in order.
    fn on_next(&mut self, value: &T);

    /// Called after the last value unless the subscription was closed first.
    fn on_completed(&mut self) {}
}

impl<T, F> Observer<T> for F
where
    F: FnMut(&T),
{
    fn on_next(&mut self, value: &T) {
        self(value);
    }
}

/// Handle to one subscription.
///
/// Clones share the same state, so an observer holding a clone can stop its
/// own emission.
#[derive(Clone)]
pub struct Subscription {
    closed: ReferenceCounter<ClosedFlag>,
}

impl Subscription {
    fn new() -> Self {
        Self {
            closed: ReferenceCounter::new(ClosedFlag::new(false)),
        }
    }

    /// Stops further emission. Idempotent.
    pub fn unsubscribe(&self) {
        close(&self.closed);
    }

    /// Returns `true` once the subscription was unsubscribed or completed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        is_set(&self.closed)
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Subscription")
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// A finite, replayable source of values.
///
/// # Type Parameters
///
/// * `T` - The type of the emitted values.
pub struct Observable<T> {
    snapshot: ReferenceCounter<[T]>,
}

impl<T> Observable<T> {
    /// Creates an observable that emits `values` in order.
    #[must_use]
    pub fn from_values(values: Vec<T>) -> Self {
        Self {
            snapshot: ReferenceCounter::from(values),
        }
    }

    /// Returns the number of values each subscription emits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    /// Returns `true` if subscriptions complete without emitting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    /// Emits every value to `observer`, then completes.
    pub fn subscribe<O>(&self, observer: O) -> Subscription
    where
        O: Observer<T>,
    {
        self.subscribe_with(|_| observer)
    }

    /// Builds the observer from the subscription handle, then emits.
    ///
    /// The observer may call [`Subscription::unsubscribe`] on its handle from
    /// inside `on_next`; no value is emitted after that and `on_completed` is
    /// not called.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strict_collections::reactive::{Observable, Subscription};
    ///
    /// let observable = Observable::from_values(vec![1, 2, 3, 4]);
    /// let mut seen = Vec::new();
    /// let subscription = observable.subscribe_with(|handle: Subscription| {
    ///     move |value: &i32| {
    ///         seen.push(*value);
    ///         if *value == 2 {
    ///             handle.unsubscribe();
    ///         }
    ///     }
    /// });
    /// assert!(subscription.is_closed());
    /// ```
    pub fn subscribe_with<O, B>(&self, build: B) -> Subscription
    where
        O: Observer<T>,
        B: FnOnce(Subscription) -> O,
    {
        let subscription = Subscription::new();
        let mut observer = build(subscription.clone());
        let mut emitted = 0_usize;
        for value in self.snapshot.iter() {
            if subscription.is_closed() {
                break;
            }
            observer.on_next(value);
            emitted += 1;
        }
        if subscription.is_closed() {
            tracing::trace!(emitted, "subscription closed before completion");
        } else {
            observer.on_completed();
            subscription.unsubscribe();
            tracing::trace!(emitted, "subscription completed");
        }
        subscription
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            snapshot: ReferenceCounter::clone(&self.snapshot),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Observable")
            .field("snapshot", &&*self.snapshot)
            .finish()
    }
}

/// Conversion of a strict collection into an [`Observable`].
pub trait ToObservable: StrictIterable {
    /// Captures the current values as an observable.
    fn to_observable(&self) -> Observable<Self::Item> {
        Observable::from_values(self.iter().cloned().collect())
    }
}

impl<C: StrictIterable> ToObservable for C {}

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(Observable<i32>: Send, Sync);
#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(Subscription: Send, Sync);

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(Observable<i32>: Send, Sync);
#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(Subscription: Send, Sync);

// =============================================================================
// Tests
// =============================================================================
