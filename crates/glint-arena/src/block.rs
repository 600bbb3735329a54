//! Block table: the arena's out-of-band bookkeeping.
//!
//! Blocks are keyed by offset and exactly tile `0..total`. Free blocks are
//! additionally indexed by `(len, offset)` so that the first entry at or
//! above a requested length is the best fit, with the lowest offset winning
//! among equal lengths.
//!
//! Invariant maintained by every mutation: no two free blocks are adjacent.

use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BlockState {
    Free,
    Used { stamp: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Block {
    pub(crate) len: usize,
    pub(crate) state: BlockState,
}

pub(crate) struct BlockTable {
    blocks: BTreeMap<usize, Block>,
    free_index: BTreeSet<(usize, usize)>,
    total: usize,
}

impl BlockTable {
    /// A table with one free block spanning `0..total`.
    pub(crate) fn new(total: usize) -> Self {
        let mut table = Self {
            blocks: BTreeMap::new(),
            free_index: BTreeSet::new(),
            total,
        };
        if total > 0 {
            table.insert_free(0, total);
        }
        table
    }

    pub(crate) fn get(&self, offset: usize) -> Option<&Block> {
        self.blocks.get(&offset)
    }

    /// Offset of the smallest free block of at least `len` bytes.
    pub(crate) fn best_fit(&self, len: usize) -> Option<usize> {
        self.free_index
            .range((len, 0)..)
            .next()
            .map(|&(_, offset)| offset)
    }

    /// Turn the free block at `offset` into a used block of `len` bytes,
    /// splitting off the remainder as a new free block.
    ///
    /// The caller guarantees the block is free and at least `len` long.
    pub(crate) fn claim(&mut self, offset: usize, len: usize, stamp: u64) {
        let free_len = self.remove_free(offset);
        debug_assert!(free_len >= len);
        self.blocks.insert(
            offset,
            Block {
                len,
                state: BlockState::Used { stamp },
            },
        );
        if free_len > len {
            // The block after the old free block is used (or the end), so
            // the remainder cannot be adjacent to another free block.
            self.insert_free(offset + len, free_len - len);
        }
    }

    /// Free the used block at `offset`, merging with free neighbours.
    ///
    /// Returns the length of the block that was released.
    pub(crate) fn release(&mut self, offset: usize) -> usize {
        let Some(block) = self.blocks.remove(&offset) else {
            return 0;
        };
        let released = block.len;
        let mut start = offset;
        let mut len = block.len;

        // Backward: the previous block ends exactly at `offset`.
        let prev = self
            .blocks
            .range(..offset)
            .next_back()
            .map(|(&o, &b)| (o, b));
        if let Some((prev_offset, prev_block)) = prev {
            if prev_block.state == BlockState::Free {
                self.remove_free(prev_offset);
                start = prev_offset;
                len += prev_block.len;
            }
        }

        // Forward.
        let next_offset = offset + block.len;
        if let Some(next_block) = self.blocks.get(&next_offset).copied() {
            if next_block.state == BlockState::Free {
                self.remove_free(next_offset);
                len += next_block.len;
            }
        }

        self.insert_free(start, len);
        released
    }

    /// Extend the used block at `offset` to `new_len` by absorbing the
    /// free block that follows it. Returns `false` (and changes nothing)
    /// if that is not possible.
    pub(crate) fn grow_in_place(&mut self, offset: usize, new_len: usize) -> bool {
        let Some(block) = self.blocks.get(&offset).copied() else {
            return false;
        };
        let next_offset = offset + block.len;
        let Some(next) = self.blocks.get(&next_offset).copied() else {
            return false;
        };
        if next.state != BlockState::Free || block.len + next.len < new_len {
            return false;
        }
        let combined = block.len + next.len;
        self.remove_free(next_offset);
        if let Some(b) = self.blocks.get_mut(&offset) {
            b.len = new_len;
        }
        if combined > new_len {
            self.insert_free(offset + new_len, combined - new_len);
        }
        true
    }

    /// Shrink the used block at `offset` to `new_len`, returning the tail
    /// to the free pool (merged with a following free block).
    pub(crate) fn shrink(&mut self, offset: usize, new_len: usize) {
        let Some(block) = self.blocks.get(&offset).copied() else {
            return;
        };
        if new_len >= block.len {
            return;
        }
        let mut tail_len = block.len - new_len;
        let tail_offset = offset + new_len;
        let next_offset = offset + block.len;
        if let Some(next) = self.blocks.get(&next_offset).copied() {
            if next.state == BlockState::Free {
                self.remove_free(next_offset);
                tail_len += next.len;
            }
        }
        if let Some(b) = self.blocks.get_mut(&offset) {
            b.len = new_len;
        }
        self.insert_free(tail_offset, tail_len);
    }

    pub(crate) fn largest_free(&self) -> usize {
        self.free_index
            .iter()
            .next_back()
            .map_or(0, |&(len, _)| len)
    }

    pub(crate) fn free_count(&self) -> usize {
        self.free_index.len()
    }

    pub(crate) fn used_count(&self) -> usize {
        self.blocks.len() - self.free_index.len()
    }

    /// Verify tiling, adjacency and index consistency.
    pub(crate) fn check(&self) -> Result<usize, String> {
        let mut cursor = 0usize;
        let mut prev_free = false;
        let mut free_seen = 0usize;
        let mut used_bytes = 0usize;
        for (&offset, block) in &self.blocks {
            if offset != cursor {
                return Err(format!(
                    "block at {offset} does not start where the previous ended ({cursor})"
                ));
            }
            if block.len == 0 {
                return Err(format!("zero-length block at {offset}"));
            }
            match block.state {
                BlockState::Free => {
                    if prev_free {
                        return Err(format!("adjacent free blocks ending at {offset}"));
                    }
                    if !self.free_index.contains(&(block.len, offset)) {
                        return Err(format!("free block at {offset} missing from index"));
                    }
                    free_seen += 1;
                    prev_free = true;
                }
                BlockState::Used { .. } => {
                    used_bytes += block.len;
                    prev_free = false;
                }
            }
            cursor = offset + block.len;
        }
        if cursor != self.total {
            return Err(format!(
                "blocks cover {cursor} bytes, region has {}",
                self.total
            ));
        }
        if free_seen != self.free_index.len() {
            return Err(format!(
                "free index holds {} entries, table holds {free_seen} free blocks",
                self.free_index.len()
            ));
        }
        Ok(used_bytes)
    }

    #[cfg(test)]
    pub(crate) fn layout(&self) -> Vec<(usize, usize, bool)> {
        self.blocks
            .iter()
            .map(|(&o, b)| (o, b.len, b.state == BlockState::Free))
            .collect()
    }

    fn insert_free(&mut self, offset: usize, len: usize) {
        self.blocks.insert(
            offset,
            Block {
                len,
                state: BlockState::Free,
            },
        );
        self.free_index.insert((len, offset));
    }

    fn remove_free(&mut self, offset: usize) -> usize {
        let len = self.blocks.remove(&offset).map_or(0, |b| b.len);
        self.free_index.remove(&(len, offset));
        len
    }
}
