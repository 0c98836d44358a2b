//! Thread-safe wrapper around [`FibonacciHeap`]
//!
//! Every mutating call takes the instance's write lock for its whole duration
//! (consolidation included); reads such as `peek` and `len` share a read lock.
//! Calls are therefore linearizable in lock-acquisition order. No fairness
//! among entries of equal priority is promised.

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};

use crate::error::HeapError;
use crate::fibonacci::FibonacciHeap;
use crate::order::Orientation;
use crate::traits::{Entry, KeyedHeap};

/// A [`FibonacciHeap`] guarded by a single reader-writer lock
///
/// # Example
///
/// ```rust
/// use keyed_heaps::{Orientation, SyncFibonacciHeap};
/// use std::sync::Arc;
/// use std::thread;
///
/// let heap = Arc::new(SyncFibonacciHeap::new(Orientation::MinOrder));
/// let workers: Vec<_> = (0..4)
///     .map(|t| {
///         let heap = Arc::clone(&heap);
///         thread::spawn(move || {
///             for i in 0..10 {
///                 heap.insert((t * 10 + i, i)).unwrap();
///             }
///         })
///     })
///     .collect();
/// for worker in workers {
///     worker.join().unwrap();
/// }
/// assert_eq!(heap.len(), 40);
/// assert_eq!(heap.pop().unwrap().1, 0);
/// ```
pub struct SyncFibonacciHeap<E: Entry> {
    inner: RwLock<FibonacciHeap<E>>,
}

impl<E: Entry> SyncFibonacciHeap<E> {
    /// Creates an empty heap with the given orientation
    pub fn new(orientation: Orientation) -> Self {
        Self::from_heap(FibonacciHeap::new(orientation))
    }

    /// Wraps an existing heap
    pub fn from_heap(heap: FibonacciHeap<E>) -> Self {
        Self {
            inner: RwLock::new(heap),
        }
    }

    /// Returns the wrapped heap
    pub fn into_inner(self) -> FibonacciHeap<E> {
        self.inner.into_inner()
    }

    pub fn orientation(&self) -> Orientation {
        self.inner.read().orientation()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn contains_key(&self, key: &E::Key) -> bool {
        self.inner.read().contains_key(key)
    }

    /// See [`KeyedHeap::insert`]
    pub fn insert(&self, entry: E) -> Result<(), HeapError> {
        self.inner.write().insert(entry)
    }

    /// Returns a read guard on the entry that would be popped next
    ///
    /// Writers block until the guard is dropped.
    pub fn peek(&self) -> Result<MappedRwLockReadGuard<'_, E>, HeapError> {
        RwLockReadGuard::try_map(self.inner.read(), |heap| heap.peek().ok())
            .map_err(|_| HeapError::Empty)
    }

    /// Returns a copy of the entry that would be popped next
    pub fn peek_cloned(&self) -> Result<E, HeapError>
    where
        E: Clone,
    {
        self.inner.read().peek().cloned()
    }

    /// See [`KeyedHeap::pop`]
    pub fn pop(&self) -> Result<E, HeapError> {
        self.inner.write().pop()
    }

    /// See [`KeyedHeap::update_priority`]
    pub fn update_priority(&self, entry: E) -> Result<E, HeapError> {
        self.inner.write().update_priority(entry)
    }

    /// See [`KeyedHeap::delete`]
    pub fn delete(&self, key: &E::Key) -> Result<E, HeapError> {
        self.inner.write().delete(key)
    }

    /// Moves every entry of `other` into this heap
    ///
    /// Both write locks are taken in address order, so concurrent
    /// `a.union(&b)` and `b.union(&a)` cannot deadlock. A heap unioned with
    /// itself shares every key with itself and fails unless empty.
    pub fn union(&self, other: &Self) -> Result<(), HeapError> {
        if std::ptr::eq(self, other) {
            return if self.is_empty() {
                Ok(())
            } else {
                Err(HeapError::DuplicateKey)
            };
        }

        let (mut this, mut that) = if (self as *const Self) < (other as *const Self) {
            let this = self.inner.write();
            (this, other.inner.write())
        } else {
            let that = other.inner.write();
            (self.inner.write(), that)
        };
        this.union(&mut that)
    }

    /// Removes every entry
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// See [`FibonacciHeap::check_invariants`]
    #[doc(hidden)]
    pub fn check_invariants(&self) -> Result<(), String> {
        self.inner.read().check_invariants()
    }
}

impl<E: Entry> Default for SyncFibonacciHeap<E> {
    fn default() -> Self {
        Self::new(Orientation::default())
    }
}

impl<E: Entry> From<FibonacciHeap<E>> for SyncFibonacciHeap<E> {
    fn from(heap: FibonacciHeap<E>) -> Self {
        Self::from_heap(heap)
    }
}
