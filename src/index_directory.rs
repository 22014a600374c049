//! Live index bookkeeping for in-flight edit scripts.
//!
//! A differ that plans inserts, removes and moves ahead of its consumer
//! needs to know where an already-seen item *currently* sits after every
//! edit planned so far. [`IndexDirectory`] issues [`IndexEntry`] handles
//! for tracked positions and keeps every handle current while operations
//! shift positions around it.
//!
//! # Representation
//!
//! Entries live in an arena of cells; a side table maps each position to
//! the entries registered there. A handle is a plain arena id, so reading
//! a position is one slot load, and no entry ever aliases another's
//! storage. Structural operations renumber only the causally affected
//! span of positions, never the whole table.
//!
//! # Complexity
//!
//! `index_of` is O(1); `insert`/`remove`/`relocate` are O(affected span);
//! `add`/`expand` are amortized O(1).

use smallvec::SmallVec;

// =============================================================================
// Handles
// =============================================================================

/// Handle to a tracked position inside an [`IndexDirectory`].
///
/// Cheap to copy and stable for the lifetime of the directory; read the
/// current position through [`IndexDirectory::index_of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexEntry(u32);

/// How an entry participates in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    /// Tracks one item occupying one position; relocated only by the
    /// directory's own structural operations.
    Fixed,
    /// A re-registrable marker (e.g. a differ's synced-index watermark):
    /// the only mode [`IndexDirectory::replace_entry`] accepts. May be
    /// detached (no position yet).
    Floating,
}

struct EntryCell {
    position: Option<usize>,
    mode: EntryMode,
}

// =============================================================================
// IndexDirectory
// =============================================================================

type PositionBucket = SmallVec<[IndexEntry; 1]>;

/// An ordered collection of index entries that stay correct while
/// insert/remove/move operations are applied ahead of a consumer.
///
/// ```
/// use seqsync::IndexDirectory;
///
/// let mut dir = IndexDirectory::new();
/// let a = dir.add(0);
/// let b = dir.add(1);
/// dir.insert(0);
/// assert_eq!(dir.index_of(a), Some(1));
/// assert_eq!(dir.index_of(b), Some(2));
/// ```
#[derive(Default)]
pub struct IndexDirectory {
    cells: Vec<EntryCell>,
    positions: Vec<PositionBucket>,
}

impl IndexDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of positions currently tracked.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Register a fixed entry at `index` and return its handle.
    ///
    /// `index == len()` grows the directory by one position.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn add(&mut self, index: usize) -> IndexEntry {
        assert!(
            index <= self.positions.len(),
            "index {index} out of range for directory of length {}",
            self.positions.len()
        );
        if index == self.positions.len() {
            self.positions.push(PositionBucket::new());
        }
        let entry = self.new_entry(Some(index), EntryMode::Fixed);
        self.positions[index].push(entry);
        entry
    }

    /// Create a detached floating entry.
    ///
    /// The entry has no position until [`replace_entry`](Self::replace_entry)
    /// registers it; [`index_of`](Self::index_of) reads `None` meanwhile.
    pub fn add_floating(&mut self) -> IndexEntry {
        self.new_entry(None, EntryMode::Floating)
    }

    /// Current position of `entry`, or `None` if it is detached (never
    /// registered, or removed since).
    #[inline]
    pub fn index_of(&self, entry: IndexEntry) -> Option<usize> {
        self.cells[entry.0 as usize].position
    }

    /// The mode `entry` was created with.
    #[inline]
    pub fn mode_of(&self, entry: IndexEntry) -> EntryMode {
        self.cells[entry.0 as usize].mode
    }

    /// Open a gap at `at`: every entry at a position ≥ `at` shifts by +1.
    ///
    /// # Panics
    ///
    /// Panics if `at > len()`.
    pub fn insert(&mut self, at: usize) {
        assert!(
            at <= self.positions.len(),
            "index {at} out of range for directory of length {}",
            self.positions.len()
        );
        self.positions.insert(at, PositionBucket::new());
        self.renumber(at..self.positions.len());
    }

    /// Close the position `at`: its entries detach, every entry at a
    /// position > `at` shifts by −1.
    ///
    /// # Panics
    ///
    /// Panics if `at >= len()`.
    pub fn remove(&mut self, at: usize) {
        assert!(
            at < self.positions.len(),
            "index {at} out of range for directory of length {}",
            self.positions.len()
        );
        let detached = self.positions.remove(at);
        for entry in detached {
            self.cells[entry.0 as usize].position = None;
        }
        self.renumber(at..self.positions.len());
    }

    /// Relocate the entry registered at `from` to `to`, shifting only the
    /// entries between the two positions (one step toward `from`).
    ///
    /// The destination addresses the directory after the removal, matching
    /// list-move semantics. Equal indices are a no-op.
    ///
    /// # Panics
    ///
    /// Panics if `from` or `to` is out of range.
    pub fn relocate(&mut self, from: usize, to: usize) {
        let len = self.positions.len();
        assert!(from < len, "index {from} out of range for directory of length {len}");
        assert!(to < len, "index {to} out of range for directory of length {len}");
        if from == to {
            return;
        }
        let bucket = self.positions.remove(from);
        self.positions.insert(to, bucket);
        let (lo, hi) = if from < to { (from, to) } else { (to, from) };
        self.renumber(lo..hi + 1);
    }

    /// Append placeholder positions until `index` is in range, standing in
    /// for untouched pre-existing items the consumer already holds.
    pub fn expand(&mut self, index: usize) {
        while self.positions.len() <= index {
            self.positions.push(PositionBucket::new());
        }
    }

    /// Re-register a floating entry at `new_index`, detaching it from its
    /// previous position first.
    ///
    /// # Panics
    ///
    /// Panics if `entry` is fixed, or if `new_index >= len()`.
    pub fn replace_entry(&mut self, entry: IndexEntry, new_index: usize) {
        assert!(
            self.mode_of(entry) == EntryMode::Floating,
            "replace_entry requires a floating entry"
        );
        assert!(
            new_index < self.positions.len(),
            "index {new_index} out of range for directory of length {}",
            self.positions.len()
        );
        if let Some(old) = self.cells[entry.0 as usize].position {
            self.positions[old].retain(|e| *e != entry);
        }
        self.cells[entry.0 as usize].position = Some(new_index);
        self.positions[new_index].push(entry);
    }

    fn new_entry(&mut self, position: Option<usize>, mode: EntryMode) -> IndexEntry {
        let id = u32::try_from(self.cells.len()).expect("directory entry arena overflow");
        self.cells.push(EntryCell { position, mode });
        IndexEntry(id)
    }

    /// Refresh the stored position of every entry registered inside `span`.
    fn renumber(&mut self, span: std::ops::Range<usize>) {
        let (cells, positions) = (&mut self.cells, &self.positions);
        for (offset, bucket) in positions[span.clone()].iter().enumerate() {
            for entry in bucket {
                cells[entry.0 as usize].position = Some(span.start + offset);
            }
        }
    }
}
