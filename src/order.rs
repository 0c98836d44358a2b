//! Heap orientation
//!
//! A heap is either min-ordered or max-ordered for its whole lifetime. The
//! comparison used by the heap is resolved once from the [`Orientation`] and
//! stored as a plain function pointer, so hot paths never branch on the
//! orientation again.

use std::cmp::Ordering;

use crate::traits::Priority;

/// Which end of the priority range comes out first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Smallest priority first
    #[default]
    MinOrder,
    /// Largest priority first
    MaxOrder,
}

/// Strict "comes out before" predicate for a given orientation
pub type Precedes<P> = fn(P, P) -> bool;

fn less<P: Priority>(a: P, b: P) -> bool {
    a < b
}

fn greater<P: Priority>(a: P, b: P) -> bool {
    a > b
}

impl Orientation {
    /// Returns the strict predicate `precedes(a, b)`: true iff `a` must come out before `b`
    #[inline]
    pub fn precedes<P: Priority>(self) -> Precedes<P> {
        match self {
            Orientation::MinOrder => less::<P>,
            Orientation::MaxOrder => greater::<P>,
        }
    }

    /// Returns the sentinel that outranks every admissible priority
    ///
    /// −∞ for a min-ordered heap, +∞ for a max-ordered one.
    #[inline]
    pub fn top_sentinel<P: Priority>(self) -> P {
        match self {
            Orientation::MinOrder => P::NEG_INFINITY,
            Orientation::MaxOrder => P::INFINITY,
        }
    }

    /// Compares two priorities in extraction order
    ///
    /// `Ordering::Less` means `a` comes out first.
    pub fn compare<P: Priority>(self, a: P, b: P) -> Ordering {
        let precedes = self.precedes::<P>();
        if precedes(a, b) {
            Ordering::Less
        } else if precedes(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Returns the opposite orientation
    pub fn reversed(self) -> Self {
        match self {
            Orientation::MinOrder => Orientation::MaxOrder,
            Orientation::MaxOrder => Orientation::MinOrder,
        }
    }
}
