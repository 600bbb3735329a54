//! Benchmark workloads for the Glint arena and capability resolver.
//!
//! - [`churn_script`]: a deterministic allocate/release sequence derived
//!   from a seed, shaped like widget creation and teardown.
//! - [`run_churn`]: replays a script against an arena.
//! - [`replay`]: the same, continuing from existing live handles.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use glint_arena::{Arena, ArenaError, ArenaHandle};
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One step of an arena workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChurnOp {
    /// Allocate this many bytes.
    Allocate(usize),
    /// Release the live block at this index (modulo the live count).
    Release(usize),
}

/// Build a reproducible script of `len` operations.
///
/// Sizes follow a widget-like mix: mostly small state blocks, some
/// medium buffers, rare large ones. Roughly 55% of steps allocate.
pub fn churn_script(seed: u64, len: usize) -> Vec<ChurnOp> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            let roll = rng.next_u32() % 100;
            if roll < 55 {
                let size = match rng.next_u32() % 20 {
                    0 => 512 + (rng.next_u32() % 1536) as usize,
                    1..=4 => 128 + (rng.next_u32() % 384) as usize,
                    _ => 16 + (rng.next_u32() % 112) as usize,
                };
                ChurnOp::Allocate(size)
            } else {
                ChurnOp::Release(rng.next_u32() as usize)
            }
        })
        .collect()
}

/// Replay `script` against `arena`, returning the handles still live.
///
/// Allocation failures are expected under pressure and skipped. A failed
/// release means the arena lost track of a live block and is returned.
pub fn run_churn(
    arena: &mut Arena<'_>,
    script: &[ChurnOp],
) -> Result<Vec<ArenaHandle>, ArenaError> {
    let mut live = Vec::new();
    replay(arena, &mut live, script)?;
    Ok(live)
}

/// Replay `script` against `arena`, releasing from and adding to `live`.
pub fn replay(
    arena: &mut Arena<'_>,
    live: &mut Vec<ArenaHandle>,
    script: &[ChurnOp],
) -> Result<(), ArenaError> {
    for op in script {
        match *op {
            ChurnOp::Allocate(size) => {
                if let Ok(h) = arena.allocate(size) {
                    live.push(h);
                }
            }
            ChurnOp::Release(i) if !live.is_empty() => {
                let h = live.swap_remove(i % live.len());
                arena.release(h)?;
            }
            ChurnOp::Release(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_arena::ArenaConfig;

    #[test]
    fn scripts_are_reproducible() {
        assert_eq!(churn_script(7, 200), churn_script(7, 200));
        assert_ne!(churn_script(7, 200), churn_script(8, 200));
    }

    #[test]
    fn churn_leaves_a_consistent_arena() {
        let mut arena = Arena::new(ArenaConfig::new(16 * 1024)).unwrap();
        let live = run_churn(&mut arena, &churn_script(42, 2000)).unwrap();
        arena.check_integrity().unwrap();
        assert_eq!(arena.statistics().used_blocks, live.len());
        for h in live {
            arena.release(h).unwrap();
        }
        assert_eq!(arena.statistics().free_blocks, 1);
    }

    #[test]
    fn release_failures_are_reported() {
        let mut arena = Arena::new(ArenaConfig::new(4096)).unwrap();
        let mut live = run_churn(&mut arena, &[ChurnOp::Allocate(64)]).unwrap();
        arena.reset();
        assert!(matches!(
            replay(&mut arena, &mut live, &[ChurnOp::Release(0)]),
            Err(ArenaError::DoubleRelease { .. })
        ));
        assert!(live.is_empty());
    }
}
