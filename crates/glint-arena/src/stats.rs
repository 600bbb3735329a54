//! Arena usage statistics.
//!
//! [`ArenaStats`] is a point-in-time copy of the arena's counters. Taking
//! one has no side effects, so diagnostics overlays and sizing decisions
//! can poll it freely.

use std::fmt;

/// Usage counters for one arena.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArenaStats {
    /// Usable capacity in bytes.
    pub total: usize,
    /// Bytes in used blocks, including alignment padding.
    pub used: usize,
    /// Bytes in free blocks. Always `total - used`.
    pub free: usize,
    /// Length of the largest free block: the biggest request that can
    /// currently succeed.
    pub largest_free_block: usize,
    /// Number of free blocks.
    pub free_blocks: usize,
    /// Number of used blocks (live allocations).
    pub used_blocks: usize,
    /// High-water mark of `used` since creation or the last reset.
    pub peak_used: usize,
}

impl ArenaStats {
    /// Percentage of capacity in use, 0..=100.
    pub fn used_pct(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        (self.used * 100 / self.total) as u8
    }

    /// Fragmentation percentage, 0..=100.
    ///
    /// 0 means all free memory is one block; values near 100 mean the free
    /// memory is split into many small pieces. Reported as 0 when nothing
    /// is free.
    pub fn frag_pct(&self) -> u8 {
        if self.free == 0 {
            return 0;
        }
        (100 - self.largest_free_block * 100 / self.free) as u8
    }
}

impl fmt::Display for ArenaStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} bytes used ({}%), largest free {} bytes, frag {}%, {} live blocks",
            self.used,
            self.total,
            self.used_pct(),
            self.largest_free_block,
            self.frag_pct(),
            self.used_blocks
        )
    }
}
