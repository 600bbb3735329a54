//! Arena configuration parameters.

use crate::error::ArenaError;

/// Configuration for a self-managed arena pool.
///
/// Validated at construction; all values are immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Size of the pool requested from the host allocator, in bytes.
    ///
    /// Default: 65_536 (64 KiB). Rounded down to a multiple of `align`.
    pub capacity: usize,

    /// Granularity of every block, in bytes.
    ///
    /// Default: 8. Must be a power of two. Every allocation length is
    /// rounded up to this value and every block starts on it.
    pub align: usize,
}

impl ArenaConfig {
    /// Default pool size: 64 KiB.
    pub const DEFAULT_CAPACITY: usize = 64 * 1024;

    /// Default block alignment.
    pub const DEFAULT_ALIGN: usize = 8;

    /// Create a config for a pool of `capacity` bytes with default alignment.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            align: Self::DEFAULT_ALIGN,
        }
    }

    /// Check that the alignment is usable and the capacity holds at least
    /// one block.
    pub fn validate(&self) -> Result<(), ArenaError> {
        validate_layout(self.capacity, self.align)
    }

    /// Bytes actually usable: `capacity` rounded down to `align`.
    pub fn usable_capacity(&self) -> usize {
        self.capacity & !(self.align - 1)
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

pub(crate) fn validate_layout(len: usize, align: usize) -> Result<(), ArenaError> {
    if !align.is_power_of_two() {
        return Err(ArenaError::InvalidAlignment { align });
    }
    if len < align {
        return Err(ArenaError::RegionTooSmall { len, min: align });
    }
    Ok(())
}

/// Round `size` up to a multiple of `align` (a power of two).
///
/// Returns `None` on overflow.
pub(crate) fn align_up(size: usize, align: usize) -> Option<usize> {
    Some(size.checked_add(align - 1)? & !(align - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_64k_aligned_8() {
        let config = ArenaConfig::default();
        assert_eq!(config.capacity, 64 * 1024);
        assert_eq!(config.align, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn usable_capacity_rounds_down() {
        let config = ArenaConfig::new(1030);
        assert_eq!(config.usable_capacity(), 1024);
    }

    #[test]
    fn non_power_of_two_alignment_rejected() {
        let config = ArenaConfig {
            capacity: 1024,
            align: 12,
        };
        assert_eq!(
            config.validate(),
            Err(ArenaError::InvalidAlignment { align: 12 })
        );
    }

    #[test]
    fn capacity_below_one_block_rejected() {
        let config = ArenaConfig::new(4);
        assert_eq!(
            config.validate(),
            Err(ArenaError::RegionTooSmall { len: 4, min: 8 })
        );
    }

    #[test]
    fn align_up_rounds_and_detects_overflow() {
        assert_eq!(align_up(1, 8), Some(8));
        assert_eq!(align_up(8, 8), Some(8));
        assert_eq!(align_up(9, 8), Some(16));
        assert_eq!(align_up(usize::MAX, 8), None);
    }
}
