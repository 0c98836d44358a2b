//! Error type shared by every heap operation

use thiserror::Error;

/// Error type for keyed heap operations
///
/// Every fallible operation validates its input before touching the structure,
/// so receiving one of these means the heap is exactly as it was before the call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeapError {
    /// Peek or pop on a heap with no entries
    #[error("heap is empty")]
    Empty,

    /// The key is already present (insert), or the key sets of two heaps intersect (union)
    #[error("duplicate key is not allowed")]
    DuplicateKey,

    /// No entry with the given key is present
    #[error("no entry with the given key")]
    UnknownKey,

    /// The priority is NaN or one of the values reserved for internal use
    #[error("priority is NaN or reserved for internal use")]
    InvalidPriority,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(HeapError::Empty.to_string(), "heap is empty");
        assert_eq!(
            HeapError::DuplicateKey.to_string(),
            "duplicate key is not allowed"
        );
        assert_eq!(
            HeapError::UnknownKey.to_string(),
            "no entry with the given key"
        );
        assert!(HeapError::InvalidPriority.to_string().contains("reserved"));
    }

    #[test]
    fn test_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: E) {}
        assert_error(HeapError::Empty);
    }
}
