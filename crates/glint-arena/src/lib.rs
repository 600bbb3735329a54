//! Fixed-capacity arena allocation for Glint.
//!
//! One [`Arena`] owns (or borrows) a single contiguous byte region that is
//! carved once at startup and never grows. Every dynamic allocation the
//! toolkit makes, from widget state to draw buffers and caches, is served
//! from it, so every caller must be prepared for [`ArenaError::OutOfMemory`].
//!
//! # Architecture
//!
//! ```text
//! Arena<'r>
//! ├── Region<'r>       (owned pool, or a borrowed host span)
//! ├── BlockTable       (offset → block, exactly tiling the region)
//! │   └── free index   ((len, offset) ordered, drives best-fit)
//! └── ArenaStats       (total / used / free / largest free block)
//!
//! SharedArena = Arc<Mutex<Arena<'static>>>   (single lock boundary)
//! ```
//!
//! # Allocation policy
//!
//! Best fit: the smallest free block that can hold the (aligned) request;
//! on equal sizes the lowest offset wins, which keeps behaviour
//! deterministic across runs. Released blocks merge with free neighbours
//! on both sides, so releasing everything always restores a single free
//! block spanning the whole region.
//!
//! Bookkeeping lives beside the region, not inside it; the only in-region
//! overhead is alignment padding, which is accounted as used.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
mod block;
pub mod config;
pub mod error;
pub mod handle;
pub mod region;
pub mod shared;
pub mod stats;

// Public re-exports for the primary API surface.
pub use arena::Arena;
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use handle::ArenaHandle;
pub use region::Region;
pub use shared::SharedArena;
pub use stats::ArenaStats;
