//! The arena allocator.
//!
//! [`Arena`] services allocate/release requests against one fixed region
//! using best-fit with lowest-offset tie-breaking, and merges released
//! blocks with their free neighbours. Every operation is bounded by the
//! number of blocks (`O(log n)` table lookups), never by the region size,
//! except for the byte copy in [`Arena::reallocate`] and zeroing in
//! [`Arena::allocate_zeroed`].
//!
//! A failed operation leaves the arena exactly as it was.

use glint_core::ArenaId;
use log::{debug, error};

use crate::block::{BlockState, BlockTable};
use crate::config::{align_up, validate_layout, ArenaConfig};
use crate::error::ArenaError;
use crate::handle::ArenaHandle;
use crate::region::Region;
use crate::stats::ArenaStats;

/// Fixed-capacity allocator over a single byte region.
///
/// The lifetime `'r` is that of a borrowed host region; arenas over their
/// own pool are `Arena<'static>`.
pub struct Arena<'r> {
    id: ArenaId,
    region: Region<'r>,
    align: usize,
    /// Usable length: region length rounded down to `align`.
    total: usize,
    table: BlockTable,
    used: usize,
    peak_used: usize,
    next_stamp: u64,
}

impl Arena<'static> {
    /// Create an arena over a self-managed pool.
    ///
    /// The pool is requested from the host allocator once, here, and
    /// returned to it when the arena is dropped.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        let region = Region::pool(config.usable_capacity())?;
        Self::with_region(region, config.align)
    }
}

impl<'r> Arena<'r> {
    /// Create an arena over a host-supplied span with default alignment.
    ///
    /// The arena never frees the span; the host keeps ownership and must
    /// keep it alive for `'r`.
    pub fn external(bytes: &'r mut [u8]) -> Result<Self, ArenaError> {
        Self::with_region(Region::external(bytes), ArenaConfig::DEFAULT_ALIGN)
    }

    /// Create an arena over an arbitrary region.
    pub fn with_region(region: Region<'r>, align: usize) -> Result<Self, ArenaError> {
        validate_layout(region.len(), align)?;
        let total = region.len() & !(align - 1);
        debug!(
            "arena: {} bytes ({}), align {align}",
            total,
            if region.is_pool() { "pool" } else { "external" }
        );
        Ok(Self {
            id: ArenaId::next(),
            region,
            align,
            total,
            table: BlockTable::new(total),
            used: 0,
            peak_used: 0,
            next_stamp: 1,
        })
    }

    /// Unique id of this arena.
    pub fn id(&self) -> ArenaId {
        self.id
    }

    /// Usable capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.total
    }

    /// Block alignment in bytes.
    pub fn align(&self) -> usize {
        self.align
    }

    /// Whether the arena's memory was supplied by the host.
    pub fn is_external(&self) -> bool {
        !self.region.is_pool()
    }

    /// Allocate `size` bytes.
    ///
    /// The returned block does not overlap any other live block and stays
    /// reserved until the handle is passed to [`release`](Arena::release).
    /// Its contents are whatever the previous owner left there.
    ///
    /// # Errors
    ///
    /// - [`ArenaError::ZeroSize`] if `size == 0`.
    /// - [`ArenaError::ExceedsCapacity`] if the request could never fit.
    /// - [`ArenaError::OutOfMemory`] if no free block is large enough now.
    pub fn allocate(&mut self, size: usize) -> Result<ArenaHandle, ArenaError> {
        let len = self.block_len(size)?;
        let offset = self
            .table
            .best_fit(len)
            .ok_or_else(|| ArenaError::OutOfMemory {
                requested: size,
                largest_free: self.table.largest_free(),
            })?;

        let stamp = self.next_stamp;
        self.next_stamp += 1;
        self.table.claim(offset, len, stamp);
        self.used += len;
        self.peak_used = self.peak_used.max(self.used);
        debug!("arena {}: allocated {size} bytes at offset {offset}", self.id);
        Ok(ArenaHandle::new(self.id, offset, size, stamp))
    }

    /// Allocate `size` bytes and zero them.
    pub fn allocate_zeroed(&mut self, size: usize) -> Result<ArenaHandle, ArenaError> {
        let handle = self.allocate(size)?;
        self.region.as_mut_slice()[handle.range()].fill(0);
        Ok(handle)
    }

    /// Release a block and merge it with adjacent free blocks.
    ///
    /// # Errors
    ///
    /// - [`ArenaError::InvalidHandle`] if another arena issued the handle.
    /// - [`ArenaError::DoubleRelease`] if the block was already released
    ///   (including by [`reset`](Arena::reset)).
    ///
    /// In both cases the block table is left untouched.
    pub fn release(&mut self, handle: ArenaHandle) -> Result<(), ArenaError> {
        if let Err(e) = self.check_live(&handle) {
            let e = match e {
                ArenaError::StaleHandle { offset } => ArenaError::DoubleRelease { offset },
                other => other,
            };
            error!("arena {}: rejected release of {handle}: {e}", self.id);
            return Err(e);
        }
        let len = self.table.release(handle.offset);
        self.used -= len;
        debug!(
            "arena {}: released {len} bytes at offset {}",
            self.id, handle.offset
        );
        Ok(())
    }

    /// Resize an allocation, preserving the first `min(old, new)` bytes.
    ///
    /// Shrinks and in-place growth keep the offset; otherwise the data is
    /// moved to a new block and the old one is released. On error the
    /// original handle is still live and unchanged.
    pub fn reallocate(
        &mut self,
        handle: ArenaHandle,
        new_size: usize,
    ) -> Result<ArenaHandle, ArenaError> {
        self.check_live(&handle)?;
        let new_len = self.block_len(new_size)?;
        let old_len = self.block_len_at(handle.offset);

        if new_len <= old_len {
            self.table.shrink(handle.offset, new_len);
            self.used -= old_len - new_len;
            return Ok(ArenaHandle { len: new_size, ..handle });
        }

        if self.table.grow_in_place(handle.offset, new_len) {
            self.used += new_len - old_len;
            self.peak_used = self.peak_used.max(self.used);
            return Ok(ArenaHandle { len: new_size, ..handle });
        }

        let moved = self.allocate(new_size)?;
        let keep = handle.len.min(new_size);
        self.region
            .as_mut_slice()
            .copy_within(handle.offset..handle.offset + keep, moved.offset);
        let len = self.table.release(handle.offset);
        self.used -= len;
        Ok(moved)
    }

    /// The bytes of a live allocation.
    pub fn bytes(&self, handle: &ArenaHandle) -> Result<&[u8], ArenaError> {
        self.check_live(handle)?;
        Ok(&self.region.as_slice()[handle.range()])
    }

    /// The bytes of a live allocation, mutably.
    pub fn bytes_mut(&mut self, handle: &ArenaHandle) -> Result<&mut [u8], ArenaError> {
        self.check_live(handle)?;
        Ok(&mut self.region.as_mut_slice()[handle.range()])
    }

    /// Whether `handle` refers to a block that is still allocated.
    pub fn is_live(&self, handle: &ArenaHandle) -> bool {
        self.check_live(handle).is_ok()
    }

    /// Current usage counters.
    pub fn statistics(&self) -> ArenaStats {
        ArenaStats {
            total: self.total,
            used: self.used,
            free: self.total - self.used,
            largest_free_block: self.table.largest_free(),
            free_blocks: self.table.free_count(),
            used_blocks: self.table.used_count(),
            peak_used: self.peak_used,
        }
    }

    /// Release every block at once.
    ///
    /// All outstanding handles become stale; releasing one afterwards is
    /// reported as a double release.
    pub fn reset(&mut self) {
        self.table = BlockTable::new(self.total);
        self.used = 0;
        self.peak_used = 0;
        debug!("arena {}: reset", self.id);
    }

    /// Walk the block table and verify its invariants: blocks tile the
    /// region without gaps or overlap, no two free blocks are adjacent,
    /// the free index matches the table, and the used counter is exact.
    pub fn check_integrity(&self) -> Result<(), ArenaError> {
        let used = self
            .table
            .check()
            .map_err(|reason| ArenaError::Corrupted { reason })?;
        if used != self.used {
            return Err(ArenaError::Corrupted {
                reason: format!(
                    "used counter is {} but blocks hold {used} bytes",
                    self.used
                ),
            });
        }
        Ok(())
    }

    fn block_len(&self, size: usize) -> Result<usize, ArenaError> {
        if size == 0 {
            return Err(ArenaError::ZeroSize);
        }
        match align_up(size, self.align) {
            Some(len) if len <= self.total => Ok(len),
            _ => Err(ArenaError::ExceedsCapacity {
                requested: size,
                capacity: self.total,
            }),
        }
    }

    fn block_len_at(&self, offset: usize) -> usize {
        self.table.get(offset).map_or(0, |b| b.len)
    }

    fn check_live(&self, handle: &ArenaHandle) -> Result<(), ArenaError> {
        let offset = handle.offset;
        if handle.arena != self.id {
            return Err(ArenaError::InvalidHandle { offset });
        }
        match self.table.get(offset) {
            Some(block) if block.state == (BlockState::Used { stamp: handle.stamp }) => Ok(()),
            // Free, reused by a later allocation, or merged into a
            // neighbour: in every case this handle's block was released.
            _ => Err(ArenaError::StaleHandle { offset }),
        }
    }
}

impl std::fmt::Debug for Arena<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("id", &self.id)
            .field("external", &self.is_external())
            .field("stats", &self.statistics())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena(capacity: usize) -> Arena<'static> {
        Arena::new(ArenaConfig::new(capacity)).unwrap()
    }

    #[test]
    fn two_halves_then_oom_then_reuse() {
        let mut a = arena(1024);
        let first = a.allocate(512).unwrap();
        let second = a.allocate(512).unwrap();
        assert_eq!(
            a.allocate(1),
            Err(ArenaError::OutOfMemory {
                requested: 1,
                largest_free: 0
            })
        );
        a.release(first).unwrap();
        let again = a.allocate(512).unwrap();
        assert_eq!(again.offset(), first.offset());
        assert!(!again.overlaps(&second));
    }

    #[test]
    fn zero_size_rejected() {
        let mut a = arena(64);
        assert_eq!(a.allocate(0), Err(ArenaError::ZeroSize));
    }

    #[test]
    fn oversized_request_rejected() {
        let mut a = arena(64);
        assert_eq!(
            a.allocate(65),
            Err(ArenaError::ExceedsCapacity {
                requested: 65,
                capacity: 64
            })
        );
        assert_eq!(
            a.allocate(usize::MAX),
            Err(ArenaError::ExceedsCapacity {
                requested: usize::MAX,
                capacity: 64
            })
        );
    }

    #[test]
    fn failed_allocation_leaves_state_unchanged() {
        let mut a = arena(256);
        let _h = a.allocate(200).unwrap();
        let before = a.statistics();
        assert!(a.allocate(100).is_err());
        assert_eq!(a.statistics(), before);
        a.check_integrity().unwrap();
    }

    #[test]
    fn sizes_are_rounded_to_alignment() {
        let mut a = arena(64);
        let h = a.allocate(3).unwrap();
        assert_eq!(h.len(), 3);
        assert_eq!(a.statistics().used, 8);
        let next = a.allocate(1).unwrap();
        assert_eq!(next.offset(), 8);
    }

    #[test]
    fn double_release_detected() {
        let mut a = arena(256);
        let h = a.allocate(32).unwrap();
        a.release(h).unwrap();
        assert_eq!(a.release(h), Err(ArenaError::DoubleRelease { offset: 0 }));
        a.check_integrity().unwrap();
        assert_eq!(a.statistics().used, 0);
    }

    #[test]
    fn double_release_after_reuse_does_not_free_new_owner() {
        let mut a = arena(256);
        let old = a.allocate(32).unwrap();
        a.release(old).unwrap();
        let new = a.allocate(32).unwrap();
        assert_eq!(new.offset(), old.offset());
        assert_eq!(a.release(old), Err(ArenaError::DoubleRelease { offset: 0 }));
        assert!(a.is_live(&new));
        a.release(new).unwrap();
    }

    #[test]
    fn foreign_handle_rejected() {
        let mut a = arena(128);
        let mut b = arena(128);
        let h = b.allocate(16).unwrap();
        assert_eq!(a.release(h), Err(ArenaError::InvalidHandle { offset: 0 }));
        assert!(b.is_live(&h));
    }

    #[test]
    fn release_all_restores_single_block() {
        let mut a = arena(1024);
        let handles: Vec<_> = (1..=10).map(|i| a.allocate(i * 8).unwrap()).collect();
        let (odd, even): (Vec<_>, Vec<_>) = handles.iter().enumerate().partition(|(i, _)| i % 2 == 1);
        for (_, h) in odd {
            a.release(*h).unwrap();
        }
        assert!(a.statistics().free_blocks > 1);
        for (_, h) in even {
            a.release(*h).unwrap();
        }
        let s = a.statistics();
        assert_eq!(s.free_blocks, 1);
        assert_eq!(s.largest_free_block, 1024);
        assert_eq!(s.used, 0);
    }

    #[test]
    fn best_fit_picks_smallest_hole() {
        let mut a = arena(1024);
        let h0 = a.allocate(64).unwrap();
        let _g0 = a.allocate(8).unwrap();
        let h1 = a.allocate(32).unwrap();
        let _g1 = a.allocate(8).unwrap();
        a.release(h0).unwrap();
        a.release(h1).unwrap();
        let fit = a.allocate(24).unwrap();
        assert_eq!(fit.offset(), h1.offset());
    }

    #[test]
    fn equal_holes_lowest_offset_wins() {
        let mut a = arena(1024);
        let h0 = a.allocate(32).unwrap();
        let _g0 = a.allocate(8).unwrap();
        let h1 = a.allocate(32).unwrap();
        let _g1 = a.allocate(8).unwrap();
        a.release(h1).unwrap();
        a.release(h0).unwrap();
        assert_eq!(a.allocate(32).unwrap().offset(), 0);
    }

    #[test]
    fn bytes_round_trip_and_stale_access() {
        let mut a = arena(128);
        let h = a.allocate(4).unwrap();
        a.bytes_mut(&h).unwrap().copy_from_slice(&[1, 2, 3, 4]);
        assert_eq!(a.bytes(&h).unwrap(), &[1, 2, 3, 4]);
        a.release(h).unwrap();
        assert_eq!(a.bytes(&h), Err(ArenaError::StaleHandle { offset: 0 }));
    }

    #[test]
    fn allocate_zeroed_clears_previous_contents() {
        let mut a = arena(64);
        let h = a.allocate(16).unwrap();
        a.bytes_mut(&h).unwrap().fill(0xFF);
        a.release(h).unwrap();
        let z = a.allocate_zeroed(16).unwrap();
        assert!(a.bytes(&z).unwrap().iter().all(|&b| b == 0));
    }

    #[test]
    fn reallocate_grows_in_place_when_next_is_free() {
        let mut a = arena(256);
        let h = a.allocate(16).unwrap();
        a.bytes_mut(&h).unwrap()[0] = 7;
        let grown = a.reallocate(h, 64).unwrap();
        assert_eq!(grown.offset(), h.offset());
        assert_eq!(grown.len(), 64);
        assert_eq!(a.bytes(&grown).unwrap()[0], 7);
        assert_eq!(a.statistics().used, 64);
        a.check_integrity().unwrap();
    }

    #[test]
    fn reallocate_moves_when_blocked() {
        let mut a = arena(256);
        let h = a.allocate(16).unwrap();
        let _blocker = a.allocate(16).unwrap();
        a.bytes_mut(&h).unwrap().copy_from_slice(&[9; 16]);
        let moved = a.reallocate(h, 32).unwrap();
        assert_ne!(moved.offset(), h.offset());
        assert_eq!(&a.bytes(&moved).unwrap()[..16], &[9; 16]);
        assert!(!a.is_live(&h));
        a.check_integrity().unwrap();
    }

    #[test]
    fn reallocate_shrink_frees_tail() {
        let mut a = arena(256);
        let h = a.allocate(128).unwrap();
        let small = a.reallocate(h, 8).unwrap();
        assert_eq!(small.offset(), 0);
        let s = a.statistics();
        assert_eq!(s.used, 8);
        assert_eq!(s.largest_free_block, 248);
        a.check_integrity().unwrap();
    }

    #[test]
    fn failed_reallocate_keeps_original() {
        let mut a = arena(64);
        let h = a.allocate(32).unwrap();
        let _b = a.allocate(32).unwrap();
        assert!(matches!(
            a.reallocate(h, 48),
            Err(ArenaError::OutOfMemory { .. })
        ));
        assert!(a.is_live(&h));
        a.check_integrity().unwrap();
    }

    #[test]
    fn reset_invalidates_outstanding_handles() {
        let mut a = arena(128);
        let h = a.allocate(64).unwrap();
        a.reset();
        assert_eq!(a.statistics().used, 0);
        assert_eq!(a.release(h), Err(ArenaError::DoubleRelease { offset: 0 }));
        // The fresh allocation at the same offset is not disturbed.
        let fresh = a.allocate(64).unwrap();
        assert!(a.is_live(&fresh));
        assert!(!a.is_live(&h));
    }

    #[test]
    fn peak_used_tracks_high_water_mark() {
        let mut a = arena(256);
        let x = a.allocate(100).unwrap();
        let y = a.allocate(100).unwrap();
        a.release(x).unwrap();
        a.release(y).unwrap();
        let s = a.statistics();
        assert_eq!(s.used, 0);
        assert_eq!(s.peak_used, 208);
    }

    #[test]
    fn external_region_is_borrowed_not_owned() {
        let mut host = vec![0u8; 512];
        {
            let mut a = Arena::external(&mut host).unwrap();
            assert!(a.is_external());
            assert_eq!(a.capacity(), 512);
            let h = a.allocate(4).unwrap();
            a.bytes_mut(&h).unwrap().copy_from_slice(b"glnt");
        }
        assert_eq!(&host[..4], b"glnt");
    }

    #[test]
    fn external_region_rounded_down_to_alignment() {
        let mut host = [0u8; 100];
        let a = Arena::external(&mut host).unwrap();
        assert_eq!(a.capacity(), 96);
    }

    #[test]
    fn tiny_external_region_rejected() {
        let mut host = [0u8; 4];
        assert_eq!(
            Arena::external(&mut host).unwrap_err(),
            ArenaError::RegionTooSmall { len: 4, min: 8 }
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Clone, Debug)]
        enum Op {
            Alloc(usize),
            /// Release the live handle at this index (modulo live count).
            Release(usize),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (1usize..300).prop_map(Op::Alloc),
                any::<usize>().prop_map(Op::Release),
            ]
        }

        proptest! {
            #[test]
            fn live_handles_never_overlap(ops in proptest::collection::vec(op(), 1..200)) {
                let mut a = arena(4096);
                let mut live: Vec<ArenaHandle> = Vec::new();
                for op in ops {
                    match op {
                        Op::Alloc(size) => {
                            if let Ok(h) = a.allocate(size) {
                                for other in &live {
                                    prop_assert!(!h.overlaps(other), "{h} overlaps {other}");
                                }
                                live.push(h);
                            }
                        }
                        Op::Release(i) if !live.is_empty() => {
                            let h = live.swap_remove(i % live.len());
                            prop_assert!(a.release(h).is_ok());
                        }
                        Op::Release(_) => {}
                    }
                    prop_assert!(a.check_integrity().is_ok());
                }
            }

            #[test]
            fn release_all_fully_coalesces(sizes in proptest::collection::vec(1usize..200, 1..40)) {
                let mut a = arena(8192);
                let mut live: Vec<ArenaHandle> =
                    sizes.iter().filter_map(|&s| a.allocate(s).ok()).collect();
                // Release in an interleaved order to exercise both merge directions.
                let mut order = Vec::new();
                while !live.is_empty() {
                    order.push(live.remove(live.len() / 2));
                }
                for h in order {
                    prop_assert!(a.release(h).is_ok());
                }
                let s = a.statistics();
                prop_assert_eq!(s.free_blocks, 1);
                prop_assert_eq!(s.largest_free_block, 8192);
                prop_assert_eq!(s.used, 0);
            }

            #[test]
            fn stats_account_for_every_byte(sizes in proptest::collection::vec(1usize..500, 1..30)) {
                let mut a = arena(4096);
                for s in sizes {
                    let _ = a.allocate(s);
                    let st = a.statistics();
                    prop_assert_eq!(st.used + st.free, st.total);
                    prop_assert!(st.largest_free_block <= st.free);
                }
            }
        }
    }
}
