//! seqsync - Minimal structural edit scripts for live sequences
//!
//! Computes the ordered sequence of structural edits (add / remove /
//! replace / move) that transforms a source sequence into a target
//! sequence, so a caller can incrementally or eagerly apply those edits to
//! a live, mutable sequence instead of replacing it wholesale.
//!
//! ## Diff engines
//!
//! - [`sorted`]: two-cursor linear merge for sequences that are both
//!   pre-ordered by the same key order. O(n+m), never emits Move.
//! - [`trailing`]: order-agnostic, duplicate-tolerant equality matching
//!   with a trailing-marker heuristic that keeps the Move count low when
//!   the relative order of clusters is already correct.
//!
//! Both engines are lazy single-pass iterators over [`Modification`]
//! values, restricted by a [`Capabilities`] set: a caller that only wants
//! removals gets exactly the removals, with all index bookkeeping adjusted
//! as if nothing else were permitted.
//!
//! ## Supporting structures
//!
//! - [`IndexDirectory`]: live index cells that stay correct while planned
//!   inserts, removes and moves shift the sequence underneath them.
//! - [`LinkedBucketList`]: one node arena threaded into a global order and
//!   per-key FIFO buckets, the differs' O(1) working set.
//!
//! ## Usage
//!
//! ```
//! use seqsync::{Capabilities, apply, trailing};
//!
//! let mut live = vec![4, 9, 5];
//!
//! for modification in trailing::diff(live.clone(), vec![5, 9, 4], Capabilities::ALL) {
//!     apply::apply(&mut live, modification).unwrap();
//! }
//! assert_eq!(live, vec![5, 9, 4]);
//! ```

// =============================================================================
// Modules
// =============================================================================

/// Capability set restricting what a differ may emit
pub mod capabilities;

/// The edit-script element and its statistics
pub mod modification;

/// Live index bookkeeping for in-flight edit scripts
pub mod index_directory;

/// Dual-linked, key-bucketed working-set list
pub mod bucket_list;

/// Sorted-merge differ
pub mod sorted;

/// Equality-trailing differ
pub mod trailing;

/// Applying modification sequences to a `Vec`
pub mod apply;

/// Error types
pub mod error;

// =============================================================================
// Re-exports
// =============================================================================

pub use bucket_list::{LinkedBucketList, NodeId};
pub use capabilities::Capabilities;
pub use error::{ApplyError, ApplyResult};
pub use index_directory::{EntryMode, IndexDirectory, IndexEntry};
pub use modification::{Action, Items, Modification, ModificationStats};
pub use sorted::SortedModifications;
pub use trailing::TrailingModifications;

// =============================================================================
// Tests
// =============================================================================
