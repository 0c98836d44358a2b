//! Keyed Mergeable Heaps for Rust
//!
//! This crate provides a keyed Fibonacci heap: a priority queue whose entries
//! are addressed by a unique key, so that any entry can be re-prioritized or
//! removed without holding a handle to it.
//!
//! # Features
//!
//! - **Fibonacci Heap**: O(1) insert; O(1) amortized priority improvement
//!   (decrease-key on a min-heap); O(log n) amortized pop and delete;
//!   union in O(m) for m moved entries
//! - **Min or max order**: chosen once at construction via [`Orientation`]
//! - **Arena storage**: nodes live in a slot map and link to each other by
//!   generational handles, so the heap itself needs no `unsafe`
//! - **Thread-safe wrapper**: [`SyncFibonacciHeap`] guards one heap with a
//!   reader-writer lock
//!
//! # Example
//!
//! ```rust
//! use keyed_heaps::{FibonacciHeap, KeyedHeap, Orientation};
//!
//! let mut heap = FibonacciHeap::new(Orientation::MinOrder);
//! for (key, priority) in [(1, 7), (2, 3), (3, 9), (4, 1), (5, 5)] {
//!     heap.insert((key, priority)).unwrap();
//! }
//! heap.update_priority((3, 0)).unwrap();
//! assert_eq!(heap.peek().unwrap(), &(3, 0));
//!
//! let order: Vec<_> = heap.drain_sorted().map(|(key, _)| key).collect();
//! assert_eq!(order, vec![3, 4, 2, 5, 1]);
//! ```

pub mod error;
pub mod fibonacci;
pub mod order;
mod storage;
pub mod sync;
pub mod traits;

// Re-export the main types for convenience
pub use error::HeapError;
pub use fibonacci::FibonacciHeap;
pub use order::Orientation;
pub use sync::SyncFibonacciHeap;
pub use traits::{Entry, KeyedHeap, Priority};
