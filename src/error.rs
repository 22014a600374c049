//! Error types for seqsync.
//!
//! Data-structure misuse (stale handles, out-of-range directory indices)
//! is a caller bug and panics; applying an edit script to a sequence whose
//! state diverged from the differ's bookkeeping is the one user-facing
//! failure and surfaces as [`ApplyError`].

use thiserror::Error;

/// Errors from applying a modification to a live sequence.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ApplyError {
    /// A modification addressed a position the sequence does not have;
    /// the consumer's state no longer matches the edit script.
    #[error("index {index} out of bounds for sequence of length {len}")]
    OutOfBounds {
        /// Start index the modification addressed.
        index: usize,
        /// Length of the sequence at that point.
        len: usize,
    },

    /// A replace carried differently sized old and new item slices.
    #[error("replace carries {old} old items but {new} new items")]
    ReplaceLength {
        /// Number of old items carried.
        old: usize,
        /// Number of new items carried.
        new: usize,
    },
}

/// Result type alias for apply operations.
pub type ApplyResult<T = ()> = Result<T, ApplyError>;

#[cfg(test)]
mod tests {
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(ApplyError: Send, Sync);

    #[test]
    fn test_error_display() {
        let err = ApplyError::OutOfBounds { index: 4, len: 2 };
        assert_eq!(err.to_string(), "index 4 out of bounds for sequence of length 2");

        let err = ApplyError::ReplaceLength { old: 2, new: 1 };
        assert_eq!(err.to_string(), "replace carries 2 old items but 1 new items");
    }
}
