//! A lock-guarded arena for hosts that drive the toolkit from more than
//! one thread.
//!
//! The toolkit itself is single-threaded. When a host nevertheless splits
//! work (say an input thread and a render thread), every block-table
//! mutation must pass through one mutual-exclusion boundary. [`SharedArena`]
//! is that boundary: a `parking_lot::Mutex` around an owned-pool arena.
//! Allocation and release may block under contention; they never wait
//! for memory to become free.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::arena::Arena;
use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::handle::ArenaHandle;
use crate::stats::ArenaStats;

/// Cloneable, thread-safe handle to one pool arena.
#[derive(Clone)]
pub struct SharedArena {
    inner: Arc<Mutex<Arena<'static>>>,
}

impl SharedArena {
    /// Create a pool arena and wrap it for sharing.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        Ok(Self::from_arena(Arena::new(config)?))
    }

    /// Wrap an existing pool arena.
    pub fn from_arena(arena: Arena<'static>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(arena)),
        }
    }

    /// See [`Arena::allocate`].
    pub fn allocate(&self, size: usize) -> Result<ArenaHandle, ArenaError> {
        self.inner.lock().allocate(size)
    }

    /// See [`Arena::release`].
    pub fn release(&self, handle: ArenaHandle) -> Result<(), ArenaError> {
        self.inner.lock().release(handle)
    }

    /// See [`Arena::statistics`].
    pub fn statistics(&self) -> ArenaStats {
        self.inner.lock().statistics()
    }

    /// Run `f` with exclusive access to the arena, e.g. to read or write
    /// an allocation's bytes.
    pub fn with<R>(&self, f: impl FnOnce(&mut Arena<'static>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl std::fmt::Debug for SharedArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedArena")
            .field("stats", &self.statistics())
            .finish()
    }
}

// Compile-time assertion: SharedArena can cross and be shared between threads.
const _: () = {
    #[allow(dead_code)]
    fn assert_send_sync<T: Send + Sync>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send_sync::<SharedArena>();
    }
};
