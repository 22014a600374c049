//! Sorted-merge differ.
//!
//! Diffs two sequences that are both pre-ordered by the same key order,
//! with a two-cursor linear scan: a left-only key becomes a Remove, a
//! right-only key becomes an Add, a matched key becomes a Replace. The
//! synchronized prefix length is the only bookkeeping required, because
//! sorted inputs never need Move operations.
//!
//! # Precondition
//!
//! Both inputs must actually be ordered by the supplied comparison.
//! This is not checked: unsorted input produces an internally consistent
//! but semantically wrong edit script, never a panic.
//!
//! # Complexity
//!
//! Time O(n+m), single pass, no backtracking; space O(1) beyond the two
//! cursors.

use std::cmp::Ordering;
use std::iter::Fuse;

use crate::capabilities::Capabilities;
use crate::modification::{Modification, ModificationStats};

// =============================================================================
// Entry points
// =============================================================================

/// Diff two key-projected, pre-sorted sequences using the key type's
/// natural order.
///
/// ```
/// use seqsync::{Capabilities, Modification, sorted};
///
/// let mods: Vec<_> = sorted::diff_by_key(
///     [1, 3],
///     [(1, "one"), (2, "two"), (3, "three")],
///     |left| *left,
///     |right| right.0,
///     Capabilities::INSERT,
/// )
/// .collect();
/// assert_eq!(mods, vec![Modification::add(1, (2, "two"))]);
/// ```
pub fn diff_by_key<L, R, K, FL, FR>(
    left: impl IntoIterator<Item = L>,
    right: impl IntoIterator<Item = R>,
    left_key: FL,
    right_key: FR,
    capabilities: Capabilities,
) -> SortedModifications<
    impl Iterator<Item = L>,
    impl Iterator<Item = R>,
    impl FnMut(&L, &R) -> Ordering,
>
where
    K: Ord,
    FL: FnMut(&L) -> K,
    FR: FnMut(&R) -> K,
{
    diff_by(left, right, left_key, right_key, K::cmp, capabilities)
}

/// Diff two key-projected, pre-sorted sequences with an explicit key
/// comparison (e.g. a reversed one for descending inputs).
pub fn diff_by<L, R, K, FL, FR, C>(
    left: impl IntoIterator<Item = L>,
    right: impl IntoIterator<Item = R>,
    mut left_key: FL,
    mut right_key: FR,
    mut compare: C,
    capabilities: Capabilities,
) -> SortedModifications<
    impl Iterator<Item = L>,
    impl Iterator<Item = R>,
    impl FnMut(&L, &R) -> Ordering,
>
where
    FL: FnMut(&L) -> K,
    FR: FnMut(&R) -> K,
    C: FnMut(&K, &K) -> Ordering,
{
    SortedModifications::new(
        left.into_iter(),
        right.into_iter(),
        move |l: &L, r: &R| compare(&left_key(l), &right_key(r)),
        capabilities,
    )
}

/// Diff two pre-sorted sequences of one type ordered by its natural order.
pub fn diff<T: Ord>(
    left: impl IntoIterator<Item = T>,
    right: impl IntoIterator<Item = T>,
    capabilities: Capabilities,
) -> SortedModifications<
    impl Iterator<Item = T>,
    impl Iterator<Item = T>,
    impl FnMut(&T, &T) -> Ordering,
> {
    diff_with(left, right, T::cmp, capabilities)
}

/// Diff two pre-sorted sequences of one type with an explicit comparison.
pub fn diff_with<T, C>(
    left: impl IntoIterator<Item = T>,
    right: impl IntoIterator<Item = T>,
    compare: C,
    capabilities: Capabilities,
) -> SortedModifications<impl Iterator<Item = T>, impl Iterator<Item = T>, C>
where
    C: FnMut(&T, &T) -> Ordering,
{
    SortedModifications::new(left.into_iter(), right.into_iter(), compare, capabilities)
}

// =============================================================================
// Iterator
// =============================================================================

/// Lazy modification sequence produced by the sorted-merge differ.
///
/// Single-pass and non-restartable; all bookkeeping for an element is
/// committed before it is yielded, so applying each element immediately
/// (direct mode) and collecting everything first (batched mode) produce
/// the same final sequence.
pub struct SortedModifications<LI, RI, C>
where
    LI: Iterator,
    RI: Iterator,
{
    left: Fuse<LI>,
    right: Fuse<RI>,
    compare: C,
    capabilities: Capabilities,
    left_cur: Option<LI::Item>,
    right_cur: Option<RI::Item>,
    /// Count of already-synchronized positions: the index right before
    /// which the next unmatched left item sits, and at which the next
    /// unmatched right item is inserted.
    synced: usize,
    primed: bool,
    stats: ModificationStats,
}

impl<LI, RI, C> SortedModifications<LI, RI, C>
where
    LI: Iterator,
    RI: Iterator,
    C: FnMut(&LI::Item, &RI::Item) -> Ordering,
{
    fn new(left: LI, right: RI, compare: C, capabilities: Capabilities) -> Self {
        Self {
            left: left.fuse(),
            right: right.fuse(),
            compare,
            capabilities,
            left_cur: None,
            right_cur: None,
            synced: 0,
            primed: false,
            stats: ModificationStats::default(),
        }
    }

    /// Counters over the modifications yielded so far.
    pub fn stats(&self) -> ModificationStats {
        self.stats
    }

    fn emit(&mut self, modification: Modification<RI::Item, LI::Item>) -> Option<Modification<RI::Item, LI::Item>> {
        self.stats.record(&modification);
        Some(modification)
    }
}

impl<LI, RI, C> Iterator for SortedModifications<LI, RI, C>
where
    LI: Iterator,
    RI: Iterator,
    C: FnMut(&LI::Item, &RI::Item) -> Ordering,
{
    type Item = Modification<RI::Item, LI::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.primed {
            self.left_cur = self.left.next();
            self.right_cur = self.right.next();
            self.primed = true;
        }

        let caps = self.capabilities;
        loop {
            match (&self.left_cur, &self.right_cur) {
                (None, None) => return None,

                // Right side exhausted: flush the rest of the left side.
                (Some(_), None) => {
                    let left_item = self.left_cur.take().expect("cursor is positioned");
                    self.left_cur = self.left.next();
                    if caps.can_remove() {
                        return self.emit(Modification::remove(self.synced, left_item));
                    }
                    self.synced += 1;
                }

                // Left side exhausted: flush the rest of the right side.
                (None, Some(_)) => {
                    let right_item = self.right_cur.take().expect("cursor is positioned");
                    self.right_cur = self.right.next();
                    if caps.can_insert() {
                        let index = self.synced;
                        self.synced += 1;
                        return self.emit(Modification::add(index, right_item));
                    }
                }

                (Some(left_item), Some(right_item)) => match (self.compare)(left_item, right_item) {
                    // Left item has no counterpart at this position.
                    Ordering::Less => {
                        let left_item = self.left_cur.take().expect("cursor is positioned");
                        self.left_cur = self.left.next();
                        if caps.can_remove() {
                            return self.emit(Modification::remove(self.synced, left_item));
                        }
                        self.synced += 1;
                    }
                    // Right item has no counterpart yet.
                    Ordering::Greater => {
                        let right_item = self.right_cur.take().expect("cursor is positioned");
                        self.right_cur = self.right.next();
                        if caps.can_insert() {
                            let index = self.synced;
                            self.synced += 1;
                            return self.emit(Modification::add(index, right_item));
                        }
                    }
                    // Matched pair.
                    Ordering::Equal => {
                        let left_item = self.left_cur.take().expect("cursor is positioned");
                        let right_item = self.right_cur.take().expect("cursor is positioned");
                        self.left_cur = self.left.next();
                        self.right_cur = self.right.next();
                        let index = self.synced;
                        self.synced += 1;
                        if caps.can_replace() {
                            return self.emit(Modification::replace(index, left_item, right_item));
                        }
                    }
                },
            }
        }
    }
}
