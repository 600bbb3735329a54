//! Allocation handles.
//!
//! An [`ArenaHandle`] names one allocation: the issuing arena, the block's
//! offset, the requested length, and a stamp unique to that allocation.
//! The stamp lets the arena tell a live handle apart from an older one that
//! happens to point at the same offset after the space was reused.

use std::fmt;
use std::ops::Range;

use glint_core::ArenaId;

/// Reference to a live allocation within an [`Arena`](crate::Arena).
///
/// Handles are plain values and cost nothing to copy, but ownership is a
/// contract: the requester that received the handle is the only one that
/// may access or release it, exactly once. Misuse is detected by the arena
/// and reported as an error rather than corrupting the block table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct ArenaHandle {
    /// Arena that issued this handle.
    pub(crate) arena: ArenaId,
    /// Byte offset of the block within the region.
    pub(crate) offset: usize,
    /// Requested length in bytes (not including alignment padding).
    pub(crate) len: usize,
    /// Allocation stamp, unique within the issuing arena.
    pub(crate) stamp: u64,
}

impl ArenaHandle {
    pub(crate) fn new(arena: ArenaId, offset: usize, len: usize, stamp: u64) -> Self {
        Self {
            arena,
            offset,
            len,
            stamp,
        }
    }

    /// Byte offset of the allocation within the arena region.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Requested length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: zero-sized allocations are rejected.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The byte range `offset..offset + len` this handle covers.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }

    /// Id of the arena that issued this handle.
    pub fn arena(&self) -> ArenaId {
        self.arena
    }

    /// Whether the byte ranges of two handles intersect.
    pub fn overlaps(&self, other: &ArenaHandle) -> bool {
        self.arena == other.arena
            && self.offset < other.offset + other.len
            && other.offset < self.offset + self.len
    }
}

impl fmt::Display for ArenaHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ArenaHandle(arena={}, off={}, len={}, stamp={})",
            self.arena, self.offset, self.len, self.stamp
        )
    }
}
