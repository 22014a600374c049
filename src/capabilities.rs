//! Capability set controlling which modifications a differ may emit.
//!
//! Callers restrict a diff run to a subset of {Insert, Remove, Replace}.
//! Move is never granted directly: an item can only be relocated by being
//! taken out and put back, so `can_move` holds exactly when both Insert and
//! Remove are permitted.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Permitted modification kinds for a single diff run.
///
/// A small bit-set; combine with `|`:
///
/// ```
/// use seqsync::Capabilities;
///
/// let caps = Capabilities::INSERT | Capabilities::REMOVE;
/// assert!(caps.can_move());
/// assert!(!caps.can_replace());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub struct Capabilities(u8);

impl Capabilities {
    /// No modifications at all; the differ only advances its bookkeeping.
    pub const NONE: Self = Self(0);
    /// Permit `Add` modifications.
    pub const INSERT: Self = Self(1);
    /// Permit `Remove` modifications.
    pub const REMOVE: Self = Self(1 << 1);
    /// Permit `Replace` modifications for matched pairs.
    pub const REPLACE: Self = Self(1 << 2);
    /// Insert and Remove, which also unlocks Move.
    pub const INSERT_REMOVE: Self = Self(Self::INSERT.0 | Self::REMOVE.0);
    /// Everything.
    pub const ALL: Self = Self(Self::INSERT_REMOVE.0 | Self::REPLACE.0);

    /// Check whether every capability in `other` is present in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn can_insert(self) -> bool {
        self.contains(Self::INSERT)
    }

    #[inline]
    pub const fn can_remove(self) -> bool {
        self.contains(Self::REMOVE)
    }

    #[inline]
    pub const fn can_replace(self) -> bool {
        self.contains(Self::REPLACE)
    }

    /// Move is derived: it requires both Insert and Remove.
    #[inline]
    pub const fn can_move(self) -> bool {
        self.contains(Self::INSERT_REMOVE)
    }
}

impl Default for Capabilities {
    /// Defaults to [`Capabilities::ALL`].
    fn default() -> Self {
        Self::ALL
    }
}

impl BitOr for Capabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Capabilities {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = f.debug_tuple("Capabilities");
        if self.can_insert() {
            parts.field(&"Insert");
        }
        if self.can_remove() {
            parts.field(&"Remove");
        }
        if self.can_replace() {
            parts.field(&"Replace");
        }
        parts.finish()
    }
}
