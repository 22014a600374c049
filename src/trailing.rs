//! Equality-trailing differ.
//!
//! Diffs two sequences that may be arbitrarily ordered and may contain
//! duplicate keys, matching items by key equality while keeping the Move
//! count low for clusters whose relative order is already correct.
//!
//! # Algorithm
//!
//! The differ walks both sequences in lockstep. Each step appends the
//! newest item of each side into a pending [`LinkedBucketList`] keyed by
//! the item's projection, then asks whether the *oldest* pending node with
//! the same key exists on the other side. Duplicate keys therefore match
//! first-occurrence-to-first-occurrence (FIFO per bucket).
//!
//! On a match, the left item either stays where it is (its current index
//! is already past the highest index synced so far) or moves up to that
//! watermark index. Matched right items act as trailing markers: pending
//! right items that arrived just before them inherit the matched left item
//! as their *anchor* and must eventually be inserted immediately before
//! it. Anchors keep later insertions clustered next to the items they
//! trailed in the target sequence instead of being dumped at the end.
//!
//! Index bookkeeping runs through an [`IndexDirectory`]: every pending
//! left item holds a directory entry whose position stays current while
//! planned moves, removes and inserts shift the sequence underneath it.
//!
//! Once both sides are exhausted, unmatched left items are removed in
//! descending index order (earlier removal indices stay valid), then
//! unmatched right items are added in pending order, each at its anchor's
//! current index or at the end.
//!
//! # Complexity
//!
//! Amortized O(n+m) list work via hashing and O(1) unlink, plus
//! O(affected span) directory renumbering per structural edit.

use std::collections::VecDeque;
use std::hash::Hash;
use std::iter::Fuse;

use crate::bucket_list::{LinkedBucketList, NodeId};
use crate::capabilities::Capabilities;
use crate::index_directory::{IndexDirectory, IndexEntry};
use crate::modification::{Modification, ModificationStats};

// =============================================================================
// Entry points
// =============================================================================

/// Diff two key-projected sequences by key equality.
///
/// The left item type must be `Clone`: a matched left item can surface in
/// a Replace and in a Move for the same pair. Right items are moved out
/// exactly once. Custom equality is expressed by projecting into a key
/// type with the desired `Eq + Hash`.
///
/// ```
/// use seqsync::{Capabilities, trailing};
///
/// let mods: Vec<_> = trailing::diff_by_key(
///     ["apple", "banana"],
///     [(1, "banana"), (2, "apple")],
///     |left| left.len(),
///     |right| right.1.len(),
///     Capabilities::INSERT_REMOVE,
/// )
/// .collect();
/// assert_eq!(mods.len(), 1); // one Move, nothing inserted or removed
/// ```
pub fn diff_by_key<L, R, K, FL, FR>(
    left: impl IntoIterator<Item = L>,
    right: impl IntoIterator<Item = R>,
    left_key: FL,
    right_key: FR,
    capabilities: Capabilities,
) -> TrailingModifications<impl Iterator<Item = L>, impl Iterator<Item = R>, K, FL, FR>
where
    L: Clone,
    K: Eq + Hash + Clone,
    FL: FnMut(&L) -> K,
    FR: FnMut(&R) -> K,
{
    TrailingModifications::new(
        left.into_iter(),
        right.into_iter(),
        left_key,
        right_key,
        capabilities,
    )
}

/// Diff two sequences of one type, each item acting as its own key.
pub fn diff<T>(
    left: impl IntoIterator<Item = T>,
    right: impl IntoIterator<Item = T>,
    capabilities: Capabilities,
) -> TrailingModifications<
    impl Iterator<Item = T>,
    impl Iterator<Item = T>,
    T,
    impl FnMut(&T) -> T,
    impl FnMut(&T) -> T,
>
where
    T: Clone + Eq + Hash,
{
    diff_by_key(left, right, T::clone, T::clone, capabilities)
}

// =============================================================================
// Pending-side state
// =============================================================================

/// A left item awaiting its match, with the live index cell tracking where
/// it currently sits. Outlives its pending-list node: matched right items
/// keep anchoring to it.
struct LeftSlot<L> {
    item: Option<L>,
    entry: IndexEntry,
}

/// A right item awaiting its match. A set anchor means this item must end
/// up immediately before that left item.
struct RightSlot<R> {
    item: Option<R>,
    anchor: Option<usize>,
}

#[derive(Clone, Copy)]
enum Phase {
    Unprimed,
    Scan,
    Removals(Option<NodeId>),
    Additions(Option<NodeId>),
    Done,
}

// =============================================================================
// Iterator
// =============================================================================

/// Lazy modification sequence produced by the equality-trailing differ.
///
/// Single-pass and non-restartable. All index bookkeeping for an element
/// is committed before the element is staged, so applying each element
/// immediately (direct mode) and collecting everything first (batched
/// mode) produce the same final sequence.
pub struct TrailingModifications<LI, RI, K, FL, FR>
where
    LI: Iterator,
    RI: Iterator,
    K: Eq + Hash + Clone,
{
    left: Fuse<LI>,
    right: Fuse<RI>,
    left_key: FL,
    right_key: FR,
    capabilities: Capabilities,

    directory: IndexDirectory,
    /// Floating entry tracking the highest left index synced so far;
    /// detached until the first match.
    watermark: IndexEntry,
    lefts: Vec<LeftSlot<LI::Item>>,
    rights: Vec<RightSlot<RI::Item>>,
    /// Pending-left working set; values index into `lefts`.
    pending_left: LinkedBucketList<K, usize>,
    /// Pending-right working set; values index into `rights`.
    pending_right: LinkedBucketList<K, usize>,

    left_cur: Option<LI::Item>,
    right_cur: Option<RI::Item>,
    phase: Phase,
    /// Staged modifications; one scan step can surface several.
    queue: VecDeque<Modification<RI::Item, LI::Item>>,
    /// Length of the consumer's sequence across the removal and addition
    /// flushes.
    remaining_len: usize,
    stats: ModificationStats,
}

impl<LI, RI, K, FL, FR> TrailingModifications<LI, RI, K, FL, FR>
where
    LI: Iterator,
    LI::Item: Clone,
    RI: Iterator,
    K: Eq + Hash + Clone,
    FL: FnMut(&LI::Item) -> K,
    FR: FnMut(&RI::Item) -> K,
{
    fn new(left: LI, right: RI, left_key: FL, right_key: FR, capabilities: Capabilities) -> Self {
        let mut directory = IndexDirectory::new();
        let watermark = directory.add_floating();
        Self {
            left: left.fuse(),
            right: right.fuse(),
            left_key,
            right_key,
            capabilities,
            directory,
            watermark,
            lefts: Vec::new(),
            rights: Vec::new(),
            pending_left: LinkedBucketList::new(),
            pending_right: LinkedBucketList::new(),
            left_cur: None,
            right_cur: None,
            phase: Phase::Unprimed,
            queue: VecDeque::new(),
            remaining_len: 0,
            stats: ModificationStats::default(),
        }
    }

    /// Counters over the modifications yielded so far.
    pub fn stats(&self) -> ModificationStats {
        self.stats
    }

    /// Advance the state machine by one bounded step, possibly staging
    /// modifications. Returns `false` once fully exhausted.
    fn step(&mut self) -> bool {
        match self.phase {
            Phase::Unprimed => {
                self.left_cur = self.left.next();
                self.right_cur = self.right.next();
                self.phase = Phase::Scan;
                true
            }
            Phase::Scan => {
                if self.left_cur.is_none() && self.right_cur.is_none() {
                    self.remaining_len = self.directory.len();
                    self.phase = Phase::Removals(self.pending_left.last());
                    return true;
                }
                self.scan_step();
                true
            }
            Phase::Removals(cursor) => {
                let node = match cursor {
                    Some(node) if self.capabilities.can_remove() => node,
                    _ => {
                        self.phase = Phase::Additions(self.pending_right.first());
                        return true;
                    }
                };
                self.phase = Phase::Removals(self.pending_left.prev(node));

                let pending = *self.pending_left.value(node);
                let index = self
                    .directory
                    .index_of(self.lefts[pending].entry)
                    .expect("pending left entry is registered");
                let item = self.lefts[pending]
                    .item
                    .take()
                    .expect("unmatched left item is still held");
                self.directory.remove(index);
                self.remaining_len -= 1;
                self.queue.push_back(Modification::remove(index, item));
                true
            }
            Phase::Additions(cursor) => {
                let node = match cursor {
                    Some(node) if self.capabilities.can_insert() => node,
                    _ => {
                        self.phase = Phase::Done;
                        return false;
                    }
                };
                self.phase = Phase::Additions(self.pending_right.next(node));

                let pending = *self.pending_right.value(node);
                let index = match self.rights[pending].anchor {
                    Some(anchor) => self
                        .directory
                        .index_of(self.lefts[anchor].entry)
                        .expect("anchor entry is registered"),
                    None => self.remaining_len,
                };
                let item = self.rights[pending]
                    .item
                    .take()
                    .expect("unmatched right item is still held");
                self.directory.insert(index);
                self.remaining_len += 1;
                self.queue.push_back(Modification::add(index, item));
                true
            }
            Phase::Done => false,
        }
    }

    /// One scan iteration: append the newest item of each side into its
    /// pending bucket and try to match the bucket head against the other
    /// side.
    fn scan_step(&mut self) {
        if let Some(right_item) = self.right_cur.take() {
            let key = (self.right_key)(&right_item);
            let pending = self.rights.len();
            self.rights.push(RightSlot { item: Some(right_item), anchor: None });
            let node = self.pending_right.push_back(key, pending);

            // Matching always starts at the oldest pending node with this
            // key, which may predate the one just appended.
            let head = self
                .pending_right
                .bucket_first(self.pending_right.key(node))
                .expect("freshly filled bucket");
            if let Some(left_node) = self.pending_left.bucket_first(self.pending_right.key(head)) {
                self.match_toward_right(left_node, head);
            }
        }

        if let Some(left_item) = self.left_cur.take() {
            let key = (self.left_key)(&left_item);
            let index = self.directory.len();
            let entry = self.directory.add(index);
            let pending = self.lefts.len();
            self.lefts.push(LeftSlot { item: Some(left_item), entry });
            let node = self.pending_left.push_back(key, pending);

            let head = self
                .pending_left
                .bucket_first(self.pending_left.key(node))
                .expect("freshly filled bucket");
            if let Some(right_node) = self.pending_right.bucket_first(self.pending_left.key(head)) {
                self.match_toward_left(head, right_node);
            }
        }

        self.left_cur = self.left.next();
        self.right_cur = self.right.next();
    }

    /// Resolve a match discovered while appending a right item: the
    /// matched left item stays put if it already sits past the watermark,
    /// otherwise it moves up to the watermark index.
    fn match_toward_right(&mut self, left_node: NodeId, right_node: NodeId) {
        let left_slot = *self.pending_left.value(left_node);
        let right_slot = *self.pending_right.value(right_node);
        let entry = self.lefts[left_slot].entry;

        if self.capabilities.can_replace() {
            let old = self.lefts[left_slot]
                .item
                .clone()
                .expect("matched left item is still held");
            let new = self.rights[right_slot]
                .item
                .take()
                .expect("matched right item is still held");
            let index = self.index_of(entry);
            self.queue.push_back(Modification::replace(index, old, new));
        }

        let current = self.index_of(entry);
        let destination = match self.directory.index_of(self.watermark) {
            Some(mark) if current <= mark => mark,
            _ => current,
        };

        // Captured before the matched node unlinks from the global order.
        let trailing = self.pending_right.prev(right_node);

        if self.capabilities.can_move() && current != destination {
            let item = self.lefts[left_slot]
                .item
                .take()
                .expect("matched left item is still held");
            self.directory.relocate(current, destination);
            self.queue
                .push_back(Modification::relocate(current, destination, item));
        }

        self.pending_right.remove(right_node);
        self.pending_left.remove(left_node);

        // Trailing-marker propagation: pending right items sitting just
        // before the matched one, not yet anchored, must land before this
        // left item. Stops at the first already-anchored predecessor.
        let mut cursor = trailing;
        while let Some(node) = cursor {
            let pending = *self.pending_right.value(node);
            if self.rights[pending].anchor.is_none() {
                self.rights[pending].anchor = Some(left_slot);
            }
            cursor = match self.pending_right.prev(node) {
                Some(prev) if self.rights[*self.pending_right.value(prev)].anchor.is_none() => {
                    Some(prev)
                }
                _ => None,
            };
        }

        let settled = self.index_of(entry);
        self.raise_watermark(settled);
    }

    /// Resolve a match discovered while appending a left item: an anchored
    /// right match pulls the left item to its anchor's current index.
    fn match_toward_left(&mut self, left_node: NodeId, right_node: NodeId) {
        let left_slot = *self.pending_left.value(left_node);
        let right_slot = *self.pending_right.value(right_node);
        let entry = self.lefts[left_slot].entry;

        if self.capabilities.can_replace() {
            let old = self.lefts[left_slot]
                .item
                .clone()
                .expect("matched left item is still held");
            let new = self.rights[right_slot]
                .item
                .take()
                .expect("matched right item is still held");
            let index = self.index_of(entry);
            self.queue.push_back(Modification::replace(index, old, new));
        }

        if self.capabilities.can_move() {
            if let Some(anchor) = self.rights[right_slot].anchor {
                let from = self.index_of(entry);
                let to = self
                    .directory
                    .index_of(self.lefts[anchor].entry)
                    .expect("anchor entry is registered");
                let item = self.lefts[left_slot]
                    .item
                    .take()
                    .expect("matched left item is still held");
                self.directory.relocate(from, to);
                self.queue.push_back(Modification::relocate(from, to, item));
            }
        }

        // Predecessors waiting on the same anchor as the matched node (or,
        // like it, on none) re-anchor to this left item, which will sit
        // closer to them.
        let matched_anchor = self.rights[right_slot].anchor;
        let mut cursor = self.pending_right.prev(right_node);
        while let Some(node) = cursor {
            let pending = *self.pending_right.value(node);
            if self.rights[pending].anchor != matched_anchor {
                break;
            }
            self.rights[pending].anchor = Some(left_slot);
            cursor = self.pending_right.prev(node);
        }

        self.pending_left.remove(left_node);
        self.pending_right.remove(right_node);

        let settled = self.index_of(entry);
        self.raise_watermark(settled);
    }

    fn index_of(&self, entry: IndexEntry) -> usize {
        self.directory
            .index_of(entry)
            .expect("matched left entry is registered")
    }

    fn raise_watermark(&mut self, index: usize) {
        let current = self.directory.index_of(self.watermark);
        if current.is_none_or(|mark| index > mark) {
            self.directory.replace_entry(self.watermark, index);
        }
    }
}

impl<LI, RI, K, FL, FR> Iterator for TrailingModifications<LI, RI, K, FL, FR>
where
    LI: Iterator,
    LI::Item: Clone,
    RI: Iterator,
    K: Eq + Hash + Clone,
    FL: FnMut(&LI::Item) -> K,
    FR: FnMut(&RI::Item) -> K,
{
    type Item = Modification<RI::Item, LI::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(modification) = self.queue.pop_front() {
                self.stats.record(&modification);
                return Some(modification);
            }
            if !self.step() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::apply::{apply, apply_all};
    use crate::modification::Action;

    fn run<T: Clone + Eq + Hash + std::fmt::Debug>(
        left: &[T],
        right: &[T],
        capabilities: Capabilities,
    ) -> (Vec<T>, Vec<Modification<T, T>>) {
        let mods: Vec<_> = diff(left.to_vec(), right.to_vec(), capabilities).collect();
        let mut live = left.to_vec();
        apply_all(&mut live, mods.iter().cloned()).expect("differ output applies cleanly");
        (live, mods)
    }

    fn round_trip(left: &[i32], right: &[i32]) {
        // Batched consumption.
        let (live, _) = run(left, right, Capabilities::ALL);
        assert_eq!(live, right, "batched, left={left:?} right={right:?}");

        // Direct consumption: apply each element before pulling the next.
        let mut direct = left.to_vec();
        for modification in diff(left.to_vec(), right.to_vec(), Capabilities::ALL) {
            apply(&mut direct, modification).expect("differ output applies cleanly");
        }
        assert_eq!(direct, right, "direct, left={left:?} right={right:?}");
    }

    #[test]
    fn test_reorder_uses_moves_only() {
        let (live, mods) = run(&[4, 9, 5], &[5, 9, 4], Capabilities::INSERT_REMOVE);
        assert_eq!(live, vec![5, 9, 4]);
        assert!(mods.iter().all(|m| m.action() == Action::Move));
        assert_eq!(mods.len(), 2);
    }

    #[test]
    fn test_reorder_modification_sequence() {
        let (live, mods) = run(&[4, 9, 5], &[5, 9, 4], Capabilities::ALL);
        assert_eq!(live, vec![5, 9, 4]);
        assert_eq!(
            mods,
            vec![
                Modification::replace(1, 9, 9),
                Modification::replace(0, 4, 4),
                Modification::relocate(0, 1, 4),
                Modification::replace(2, 5, 5),
                Modification::relocate(2, 0, 5),
            ]
        );
    }

    #[test]
    fn test_identical_sequences_yield_nothing_structural() {
        let (live, mods) = run(&[1, 2, 3], &[1, 2, 3], Capabilities::INSERT_REMOVE);
        assert_eq!(live, vec![1, 2, 3]);
        assert!(mods.is_empty());

        // With Replace enabled, each matched pair refreshes in place.
        let (live, mods) = run(&[1, 2, 3], &[1, 2, 3], Capabilities::ALL);
        assert_eq!(live, vec![1, 2, 3]);
        assert_eq!(mods.len(), 3);
        assert!(mods.iter().all(|m| m.action() == Action::Replace));
    }

    #[test]
    fn test_duplicate_keys_match_fifo() {
        // left=[A, B, A'] with A and A' equal by key; the earlier A must
        // be the one matched, leaving A' to be removed.
        let left = vec![(0, 'a'), (1, 'b'), (2, 'a')];
        let right = vec![(10, 'a'), (11, 'b')];
        let mods: Vec<_> = diff_by_key(
            left.clone(),
            right,
            |l: &(i32, char)| l.1,
            |r: &(i32, char)| r.1,
            Capabilities::REMOVE,
        )
        .collect();
        assert_eq!(mods, vec![Modification::remove(2, (2, 'a'))]);

        let mut live = left;
        apply_all(&mut live, mods).unwrap();
        assert_eq!(live, vec![(0, 'a'), (1, 'b')]);
    }

    #[test]
    fn test_remove_only_keeps_shared_subset() {
        let (live, mods) = run(&[2, 3, 4], &[2, 4], Capabilities::REMOVE);
        assert_eq!(live, vec![2, 4]);
        assert_eq!(mods, vec![Modification::remove(1, 3)]);
    }

    #[test]
    fn test_insert_only_keeps_existing_items() {
        let (live, mods) = run(&[1, 3], &[1, 2, 3], Capabilities::INSERT);
        assert_eq!(live, vec![1, 2, 3]);
        assert_eq!(mods, vec![Modification::add(1, 2)]);
    }

    #[test]
    fn test_unanchored_extra_items_append_at_end() {
        let (live, mods) = run(&[5, 3], &[5, 0], Capabilities::INSERT);
        assert_eq!(live, vec![5, 3, 0]);
        assert_eq!(mods, vec![Modification::add(2, 0)]);
    }

    #[test]
    fn test_removals_flush_in_descending_index_order() {
        let (live, mods) = run(&[1, 2, 3], &[], Capabilities::ALL);
        assert_eq!(live, Vec::<i32>::new());
        assert_eq!(
            mods,
            vec![
                Modification::remove(2, 3),
                Modification::remove(1, 2),
                Modification::remove(0, 1),
            ]
        );
    }

    #[test]
    fn test_additions_flush_in_pending_order() {
        let (live, mods) = run(&[], &[1, 2], Capabilities::ALL);
        assert_eq!(live, vec![1, 2]);
        assert_eq!(
            mods,
            vec![Modification::add(0, 1), Modification::add(1, 2)]
        );
    }

    #[test]
    fn test_remove_only_with_duplicates_keeps_first_match() {
        let (live, mods) = run(&[0, 0, 1, 0, 1], &[1], Capabilities::REMOVE);
        assert_eq!(live, vec![1]);
        // Descending removal indices keep every pending index valid.
        let indices: Vec<_> = mods.iter().map(|m| m.old_index().unwrap()).collect();
        assert_eq!(indices, vec![4, 3, 1, 0]);
    }

    #[test]
    fn test_round_trip_scenarios() {
        let cases: &[(&[i32], &[i32])] = &[
            (&[9], &[9]),
            (&[9, 9], &[1, 9]),
            (&[9, 6], &[6, 9]),
            (&[4, 4, 9], &[9, 9, 4]),
            (&[4, 9, 5], &[5, 9, 4]),
            (&[3, 4, 9, 5], &[5, 6, 9, 4]),
            (&[4, 9, 5, 6], &[9, 4, 3]),
            (&[9, 6], &[6, 9, 4, 5]),
            (&[9, 0, 6], &[6, 9]),
            (&[9, 5, 6], &[6, 9, 4]),
            (&[9, 5, 6], &[6, 9, 4, 3]),
            (&[4, 9, 5, 6], &[6, 9, 4, 3]),
            (&[5, 4, 3, 2, 1], &[3, 4, 5, 6, 7, 8, 9]),
            (&[3, 4, 9, 5, 6], &[5, 6, 9, 3, 4]),
            (&[0, 0, 0, 0, 1], &[1, 0, 0, 0, 1]),
            (&[0, 0, 1], &[1, 0, 1]),
        ];
        for (left, right) in cases {
            round_trip(left, right);
        }
    }

    #[test]
    fn test_determinism() {
        let left = vec![3, 1, 4, 1, 5, 9, 2, 6];
        let right = vec![2, 7, 1, 8, 2, 8, 1];
        let first: Vec<_> = diff(left.clone(), right.clone(), Capabilities::ALL).collect();
        let second: Vec<_> = diff(left, right, Capabilities::ALL).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_stats_count_yielded_modifications() {
        let mut differ = diff(vec![4, 9, 5], vec![5, 9, 4], Capabilities::ALL);
        let mods: Vec<_> = differ.by_ref().collect();
        let stats = differ.stats();
        assert_eq!(stats.replaced, 3);
        assert_eq!(stats.moved, 2);
        assert_eq!(stats.added + stats.removed, 0);
        assert_eq!(
            mods.len(),
            stats.added + stats.removed + stats.replaced + stats.moved
        );
    }

    #[test]
    fn test_projected_keys_across_item_types() {
        let left = vec!["one", "three"];
        let right = vec![(1, "one"), (2, "two"), (3, "three")];
        let mods: Vec<_> = diff_by_key(
            left,
            right,
            |l: &&str| l.to_string(),
            |r: &(i32, &str)| r.1.to_string(),
            Capabilities::ALL,
        )
        .collect();
        // Matched pairs replace, the new middle item is inserted before
        // its trailing marker.
        assert_eq!(
            mods,
            vec![
                Modification::replace(0, "one", (1, "one")),
                Modification::replace(1, "three", (3, "three")),
                Modification::add(1, (2, "two")),
            ]
        );
    }

    /// Per-key FIFO expectation for Remove-only runs: keep each left item
    /// while its key still has unconsumed occurrences on the right.
    fn remove_only_expectation(left: &[u8], right: &[u8]) -> Vec<u8> {
        let mut budget = rustc_hash::FxHashMap::default();
        for item in right {
            *budget.entry(*item).or_insert(0usize) += 1;
        }
        let mut kept = Vec::new();
        for item in left {
            let remaining = budget.entry(*item).or_insert(0);
            if *remaining > 0 {
                *remaining -= 1;
                kept.push(*item);
            }
        }
        kept
    }

    fn is_subsequence(needle: &[u8], haystack: &[u8]) -> bool {
        let mut iter = haystack.iter();
        needle.iter().all(|n| iter.any(|h| h == n))
    }

    proptest! {
        /// Round trip under All, both consumption modes, with duplicate
        /// keys forced by the tiny alphabet.
        #[test]
        fn prop_round_trip(
            left in proptest::collection::vec(0u8..6, 0..20),
            right in proptest::collection::vec(0u8..6, 0..20),
        ) {
            let mods: Vec<_> = diff(left.clone(), right.clone(), Capabilities::ALL).collect();
            let mut batched = left.clone();
            apply_all(&mut batched, mods).unwrap();
            prop_assert_eq!(&batched, &right);

            let mut direct = left.clone();
            for modification in diff(left, right.clone(), Capabilities::ALL) {
                apply(&mut direct, modification).unwrap();
            }
            prop_assert_eq!(&direct, &right);
        }

        /// Without Replace, matched items survive in place of their right
        /// counterparts; with equal values the outcome is identical.
        #[test]
        fn prop_round_trip_insert_remove(
            left in proptest::collection::vec(0u8..6, 0..20),
            right in proptest::collection::vec(0u8..6, 0..20),
        ) {
            let mods: Vec<_> =
                diff(left.clone(), right.clone(), Capabilities::INSERT_REMOVE).collect();
            let mut live = left;
            apply_all(&mut live, mods).unwrap();
            prop_assert_eq!(live, right);
        }

        /// Remove-only yields exactly the per-key FIFO subset of the left
        /// sequence, order preserved.
        #[test]
        fn prop_remove_only_containment(
            left in proptest::collection::vec(0u8..4, 0..20),
            right in proptest::collection::vec(0u8..4, 0..20),
        ) {
            let mods: Vec<_> = diff(left.clone(), right.clone(), Capabilities::REMOVE).collect();
            let mut live = left.clone();
            apply_all(&mut live, mods).unwrap();
            prop_assert_eq!(live, remove_only_expectation(&left, &right));
        }

        /// Insert-only leaves the left sequence untouched as a subsequence
        /// and adds exactly the unmatched right items.
        #[test]
        fn prop_insert_only_preserves_left(
            left in proptest::collection::vec(0u8..4, 0..20),
            right in proptest::collection::vec(0u8..4, 0..20),
        ) {
            let mods: Vec<_> = diff(left.clone(), right.clone(), Capabilities::INSERT).collect();
            let mut live = left.clone();
            apply_all(&mut live, mods).unwrap();

            prop_assert!(is_subsequence(&left, &live));
            let extras = live.len() - left.len();
            let unmatched = right.len() - remove_only_expectation(&right, &left).len();
            prop_assert_eq!(extras, unmatched);

            let mut live_sorted = live;
            live_sorted.sort_unstable();
            let matched = remove_only_expectation(&right, &left);
            let mut expected: Vec<u8> = left;
            expected.extend(right.iter().filter({
                let mut budget = rustc_hash::FxHashMap::default();
                for item in &matched {
                    *budget.entry(*item).or_insert(0usize) += 1;
                }
                move |item| {
                    let remaining = budget.entry(**item).or_insert(0);
                    if *remaining > 0 {
                        *remaining -= 1;
                        false
                    } else {
                        true
                    }
                }
            }));
            expected.sort_unstable();
            prop_assert_eq!(live_sorted, expected);
        }
    }
}
