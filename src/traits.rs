//! Common traits for keyed heaps
//!
//! This module provides the contracts a keyed priority queue is built on:
//!
//! - [`Priority`]: Totally ordered numeric priorities with two reserved sentinels
//! - [`Entry`]: User-supplied values exposing a unique key and a priority
//! - [`KeyedHeap`]: The priority-queue API (insert, peek, pop, update, delete, union)
//!
//! Unlike `BinaryHeap`, elements are addressed by key rather than by handle,
//! so a caller can re-prioritize or remove any entry it knows the key of.

use std::fmt;
use std::hash::Hash;

use crate::error::HeapError;
use crate::order::Orientation;

/// A numeric priority usable by a keyed heap
///
/// Each priority type reserves two values that stand in for −∞ and +∞.
/// The heap uses them internally to force an entry to the top before
/// removing it, so callers may never insert them directly:
/// [`is_admissible`](Priority::is_admissible) must reject both sentinels
/// (and NaN, for floating point types).
///
/// For integers the sentinels are `MIN` and `MAX`; those two values cannot be
/// used as caller priorities.
pub trait Priority: Copy + PartialOrd + fmt::Debug {
    /// Sentinel ordered below every admissible priority
    const NEG_INFINITY: Self;

    /// Sentinel ordered above every admissible priority
    const INFINITY: Self;

    /// Returns true if a caller may use this value as a priority
    fn is_admissible(self) -> bool;
}

macro_rules! impl_float_priority {
    ($($t:ty),*) => {
        $(
            impl Priority for $t {
                const NEG_INFINITY: Self = <$t>::NEG_INFINITY;
                const INFINITY: Self = <$t>::INFINITY;

                #[inline]
                fn is_admissible(self) -> bool {
                    self.is_finite()
                }
            }
        )*
    };
}

macro_rules! impl_int_priority {
    ($($t:ty),*) => {
        $(
            impl Priority for $t {
                const NEG_INFINITY: Self = <$t>::MIN;
                const INFINITY: Self = <$t>::MAX;

                #[inline]
                fn is_admissible(self) -> bool {
                    self != <$t>::MIN && self != <$t>::MAX
                }
            }
        )*
    };
}

impl_float_priority!(f32, f64);
impl_int_priority!(i32, i64, isize);

/// A value stored in a keyed heap
///
/// Keys must be unique within one heap; inserting a second entry with a key
/// that is already present fails with [`HeapError::DuplicateKey`].
///
/// # Example
///
/// ```rust
/// use keyed_heaps::Entry;
///
/// struct Task {
///     id: u32,
///     deadline: f64,
/// }
///
/// impl Entry for Task {
///     type Key = u32;
///     type Priority = f64;
///
///     fn key(&self) -> u32 {
///         self.id
///     }
///
///     fn priority(&self) -> f64 {
///         self.deadline
///     }
/// }
/// ```
pub trait Entry {
    /// Unique identifier used for lookups, updates and deletion
    type Key: Hash + Eq + Clone + fmt::Debug;

    /// Ordering value
    type Priority: Priority;

    /// Returns the key of this entry
    fn key(&self) -> Self::Key;

    /// Returns the priority of this entry
    fn priority(&self) -> Self::Priority;
}

/// `(key, priority)` pairs are entries
impl<K, P> Entry for (K, P)
where
    K: Hash + Eq + Clone + fmt::Debug,
    P: Priority,
{
    type Key = K;
    type Priority = P;

    #[inline]
    fn key(&self) -> K {
        self.0.clone()
    }

    #[inline]
    fn priority(&self) -> P {
        self.1
    }
}

/// Keyed, mergeable priority queue
///
/// The orientation chosen at construction decides whether the smallest or the
/// largest priority comes out first. All operations validate their arguments
/// before mutating, so an `Err` leaves the heap unchanged.
///
/// # Example
///
/// ```rust
/// use keyed_heaps::{FibonacciHeap, KeyedHeap, Orientation};
///
/// let mut heap = FibonacciHeap::new(Orientation::MinOrder);
/// heap.insert(("a", 10)).unwrap();
/// heap.insert(("b", 4)).unwrap();
/// heap.insert(("c", 8)).unwrap();
///
/// heap.update_priority(("a", 1)).unwrap();
/// assert_eq!(heap.peek().unwrap(), &("a", 1));
/// assert_eq!(heap.pop().unwrap(), ("a", 1));
/// assert_eq!(heap.pop().unwrap(), ("b", 4));
/// ```
pub trait KeyedHeap<E: Entry> {
    /// Creates a new empty heap with the given orientation
    fn new(orientation: Orientation) -> Self
    where
        Self: Sized;

    /// Returns the orientation fixed at construction
    fn orientation(&self) -> Orientation;

    /// Returns the number of entries in the heap
    fn len(&self) -> usize;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts an entry
    ///
    /// # Errors
    /// - [`HeapError::InvalidPriority`] if the priority is not admissible
    /// - [`HeapError::DuplicateKey`] if the key is already present
    ///
    /// # Time Complexity
    /// O(1) worst case for the Fibonacci heap.
    fn insert(&mut self, entry: E) -> Result<(), HeapError>;

    /// Returns the entry that would be popped next without removing it
    ///
    /// # Errors
    /// [`HeapError::Empty`] if the heap has no entries.
    fn peek(&self) -> Result<&E, HeapError>;

    /// Removes and returns the best entry under the heap's orientation
    ///
    /// # Errors
    /// [`HeapError::Empty`] if the heap has no entries.
    ///
    /// # Time Complexity
    /// O(log n) amortized for the Fibonacci heap.
    fn pop(&mut self) -> Result<E, HeapError>;

    /// Replaces the entry with the same key, moving it up or down as needed
    ///
    /// Returns the entry that was replaced.
    ///
    /// # Errors
    /// - [`HeapError::InvalidPriority`] if the new priority is not admissible
    /// - [`HeapError::UnknownKey`] if no entry has this key
    fn update_priority(&mut self, entry: E) -> Result<E, HeapError>;

    /// Removes and returns the entry with the given key
    ///
    /// # Errors
    /// [`HeapError::UnknownKey`] if no entry has this key.
    fn delete(&mut self, key: &E::Key) -> Result<E, HeapError>;

    /// Moves every entry of `other` into this heap, leaving `other` empty
    ///
    /// # Errors
    /// [`HeapError::DuplicateKey`] if any key is present in both heaps.
    /// Neither heap is modified in that case.
    fn union(&mut self, other: &mut Self) -> Result<(), HeapError>
    where
        Self: Sized;
}
