//! The edit-script element: one atomic structural change.
//!
//! A [`Modification`] is the typed unit both differs emit and the consumer
//! contract applies. It is a genuine sum type keyed by action, so illegal
//! combinations (an Add carrying old items, a Replace with mismatched
//! counts smuggled through separate fields) are unrepresentable.
//!
//! Item payloads are `SmallVec<[T; 1]>`: the differs emit single-item
//! modifications, multi-item slices exist for batching consumers.

use std::fmt;

use smallvec::{SmallVec, smallvec};

/// Inline payload storage for modification items.
pub type Items<T> = SmallVec<[T; 1]>;

// =============================================================================
// Action
// =============================================================================

/// The action tag of a [`Modification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Add,
    Remove,
    Replace,
    Move,
    Reset,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Add => "Add",
            Action::Remove => "Remove",
            Action::Replace => "Replace",
            Action::Move => "Move",
            Action::Reset => "Reset",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Modification
// =============================================================================

/// One atomic structural operation transforming a source sequence toward a
/// target sequence.
///
/// `N` is the item type of the target (new) side, `O` of the source (old)
/// side; they coincide for same-typed sequences, hence the default.
///
/// # Variants
///
/// - `Add`: insert `items` at `index`.
/// - `Remove`: remove `items.len()` items at `index`.
/// - `Replace`: overwrite `old_items.len()` items at `index` with
///   `new_items`; the position does not change, so old and new index
///   coincide.
/// - `Move`: relocate `items.len()` items from `from` to `to`; the
///   destination addresses the sequence *after* the removal.
/// - `Reset`: discard the whole sequence. Neither differ emits this; it
///   exists for consumers that batch-replace their state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Modification<N, O = N> {
    Add {
        index: usize,
        items: Items<N>,
    },
    Remove {
        index: usize,
        items: Items<O>,
    },
    Replace {
        index: usize,
        old_items: Items<O>,
        new_items: Items<N>,
    },
    Move {
        from: usize,
        to: usize,
        items: Items<O>,
    },
    Reset,
}

impl<N, O> Modification<N, O> {
    /// Single-item insertion at `index`.
    pub fn add(index: usize, item: N) -> Self {
        Self::Add { index, items: smallvec![item] }
    }

    /// Multi-item insertion at `index`.
    pub fn add_many(index: usize, items: impl IntoIterator<Item = N>) -> Self {
        Self::Add { index, items: items.into_iter().collect() }
    }

    /// Single-item removal at `index`.
    pub fn remove(index: usize, item: O) -> Self {
        Self::Remove { index, items: smallvec![item] }
    }

    /// Multi-item removal at `index`.
    pub fn remove_many(index: usize, items: impl IntoIterator<Item = O>) -> Self {
        Self::Remove { index, items: items.into_iter().collect() }
    }

    /// Single-item replacement at `index`.
    pub fn replace(index: usize, old_item: O, new_item: N) -> Self {
        Self::Replace {
            index,
            old_items: smallvec![old_item],
            new_items: smallvec![new_item],
        }
    }

    /// Single-item relocation from `from` to `to`.
    ///
    /// The destination addresses the sequence after the item has been taken
    /// out.
    pub fn relocate(from: usize, to: usize, item: O) -> Self {
        Self::Move { from, to, items: smallvec![item] }
    }

    /// A full reset.
    pub fn reset() -> Self {
        Self::Reset
    }

    /// The action tag of this modification.
    pub fn action(&self) -> Action {
        match self {
            Self::Add { .. } => Action::Add,
            Self::Remove { .. } => Action::Remove,
            Self::Replace { .. } => Action::Replace,
            Self::Move { .. } => Action::Move,
            Self::Reset => Action::Reset,
        }
    }

    /// The source-side index, when the action has one.
    ///
    /// `None` stands in for the flat model's −1 sentinel (Add and Reset).
    pub fn old_index(&self) -> Option<usize> {
        match self {
            Self::Remove { index, .. } | Self::Replace { index, .. } => Some(*index),
            Self::Move { from, .. } => Some(*from),
            Self::Add { .. } | Self::Reset => None,
        }
    }

    /// The target-side index, when the action has one.
    pub fn new_index(&self) -> Option<usize> {
        match self {
            Self::Add { index, .. } | Self::Replace { index, .. } => Some(*index),
            Self::Move { to, .. } => Some(*to),
            Self::Remove { .. } | Self::Reset => None,
        }
    }

    /// The source-side items, when the action carries them.
    pub fn old_items(&self) -> Option<&[O]> {
        match self {
            Self::Remove { items, .. } | Self::Move { items, .. } => Some(items),
            Self::Replace { old_items, .. } => Some(old_items),
            Self::Add { .. } | Self::Reset => None,
        }
    }

    /// The target-side items, when the action carries them.
    pub fn new_items(&self) -> Option<&[N]> {
        match self {
            Self::Add { items, .. } => Some(items),
            Self::Replace { new_items, .. } => Some(new_items),
            Self::Remove { .. } | Self::Move { .. } | Self::Reset => None,
        }
    }

    /// Number of source-side items, when present.
    pub fn old_items_count(&self) -> Option<usize> {
        self.old_items().map(<[O]>::len)
    }

    /// Number of target-side items, when present.
    pub fn new_items_count(&self) -> Option<usize> {
        self.new_items().map(<[N]>::len)
    }
}

impl<N, O> fmt::Display for Modification<N, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn opt(index: Option<usize>) -> i64 {
            index.map_or(-1, |i| i as i64)
        }
        write!(
            f,
            "{}, OldIndex = {}, NewIndex = {}",
            self.action(),
            opt(self.old_index()),
            opt(self.new_index()),
        )
    }
}

// =============================================================================
// Statistics
// =============================================================================

/// Counters over the modifications a differ has yielded so far.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ModificationStats {
    /// Number of Add modifications yielded.
    pub added: usize,
    /// Number of Remove modifications yielded.
    pub removed: usize,
    /// Number of Replace modifications yielded.
    pub replaced: usize,
    /// Number of Move modifications yielded.
    pub moved: usize,
}

impl ModificationStats {
    /// Total structural edits (replacements do not change structure).
    pub fn edit_count(&self) -> usize {
        self.added + self.removed + self.moved
    }

    /// Check whether nothing was yielded at all.
    pub fn is_empty(&self) -> bool {
        self.edit_count() + self.replaced == 0
    }

    pub(crate) fn record<N, O>(&mut self, modification: &Modification<N, O>) {
        match modification.action() {
            Action::Add => self.added += 1,
            Action::Remove => self.removed += 1,
            Action::Replace => self.replaced += 1,
            Action::Move => self.moved += 1,
            // Differs never construct Reset.
            Action::Reset => {}
        }
    }
}
