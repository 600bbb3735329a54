//! Backing memory for an arena.
//!
//! A [`Region`] is either a pool the arena requested from the host
//! allocator exactly once (and frees when dropped), or a span supplied by
//! the host that the arena borrows for `'r` and never frees.

use crate::error::ArenaError;

/// The byte region an arena carves blocks from.
#[derive(Debug)]
pub enum Region<'r> {
    /// Self-managed pool, owned by the arena.
    Pool(Box<[u8]>),
    /// Host-supplied span. The host guarantees it outlives the arena.
    External(&'r mut [u8]),
}

impl Region<'static> {
    /// Request one zeroed block of `capacity` bytes from the host allocator.
    ///
    /// This is the only place the arena ever asks the host for memory.
    /// A refusal is reported instead of aborting the process.
    pub fn pool(capacity: usize) -> Result<Self, ArenaError> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(capacity)
            .map_err(|_| ArenaError::HostAllocationFailed { capacity })?;
        bytes.resize(capacity, 0);
        Ok(Self::Pool(bytes.into_boxed_slice()))
    }
}

impl<'r> Region<'r> {
    /// Borrow a host-supplied span.
    pub fn external(bytes: &'r mut [u8]) -> Self {
        Self::External(bytes)
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Whether the region has no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the arena owns this memory.
    pub fn is_pool(&self) -> bool {
        matches!(self, Self::Pool(_))
    }

    /// The whole region as a shared slice.
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Self::Pool(bytes) => bytes,
            Self::External(bytes) => bytes,
        }
    }

    /// The whole region as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            Self::Pool(bytes) => bytes,
            Self::External(bytes) => bytes,
        }
    }
}
