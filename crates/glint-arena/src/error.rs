//! Arena-specific error types.

use thiserror::Error;

/// Errors that can occur during arena operations.
///
/// `OutOfMemory` is the only variant a well-behaved caller is expected to
/// handle at run time. `DoubleRelease`, `StaleHandle` and `InvalidHandle`
/// indicate a defect in the caller and are logged at error level when
/// they occur.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ArenaError {
    /// A zero-byte allocation was requested.
    #[error("allocation size must be positive")]
    ZeroSize,
    /// The request can never fit, even in an empty arena.
    #[error("requested {requested} bytes exceeds arena capacity of {capacity} bytes")]
    ExceedsCapacity {
        /// Number of bytes requested.
        requested: usize,
        /// Usable capacity of the arena.
        capacity: usize,
    },
    /// No free block is large enough right now.
    #[error("out of memory: requested {requested} bytes, largest free block {largest_free} bytes")]
    OutOfMemory {
        /// Number of bytes requested.
        requested: usize,
        /// Size of the largest free block at the time of the request.
        largest_free: usize,
    },
    /// The handle's block was already released.
    #[error("double release of block at offset {offset}")]
    DoubleRelease {
        /// Offset encoded in the handle.
        offset: usize,
    },
    /// The handle's block was released; its bytes may no longer be accessed.
    #[error("stale handle for block at offset {offset}")]
    StaleHandle {
        /// Offset encoded in the handle.
        offset: usize,
    },
    /// The handle was issued by a different arena.
    #[error("handle for offset {offset} was issued by another arena")]
    InvalidHandle {
        /// Offset encoded in the handle.
        offset: usize,
    },
    /// The block table failed an integrity check.
    #[error("arena corrupted: {reason}")]
    Corrupted {
        /// Which invariant was violated.
        reason: String,
    },
    /// The region cannot hold a single aligned block.
    #[error("region of {len} bytes is smaller than the minimum of {min} bytes")]
    RegionTooSmall {
        /// Length of the supplied or configured region.
        len: usize,
        /// Minimum usable length.
        min: usize,
    },
    /// Block alignment is not a power of two.
    #[error("alignment {align} is not a power of two")]
    InvalidAlignment {
        /// The rejected alignment.
        align: usize,
    },
    /// The host allocator refused the one-time pool request.
    #[error("host allocator could not provide a pool of {capacity} bytes")]
    HostAllocationFailed {
        /// Requested pool size.
        capacity: usize,
    },
}

impl ArenaError {
    /// Whether this error reports misuse of a handle.
    pub fn is_handle_misuse(&self) -> bool {
        matches!(
            self,
            Self::DoubleRelease { .. } | Self::StaleHandle { .. } | Self::InvalidHandle { .. }
        )
    }
}
