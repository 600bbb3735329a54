//! Arena state reserved once at startup.
//!
//! The draw buffer is required. Caches and scratch buffers are optional:
//! they exist only when their capability resolved on, and if the arena
//! cannot hold one the runtime starts without it rather than failing.

use std::fmt;

use glint_arena::ArenaHandle;
use glint_caps::{Capabilities, CapabilitySet};
use smallvec::SmallVec;

/// Bytes of bookkeeping per image cache entry.
pub const IMAGE_CACHE_ENTRY_BYTES: usize = 32;

/// Bytes reserved for the gradient cache.
pub const GRADIENT_CACHE_BYTES: usize = 1024;

/// Kinds of startup state, in reservation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateKind {
    /// Pixel buffer the renderer draws into.
    DrawBuffer,
    /// Rendered shadow masks.
    ShadowCache,
    /// Decoded image descriptors.
    ImageCache,
    /// One row of pixels for rotated and zoomed images.
    TransformBuffer,
    /// Rendered gradient lines.
    GradientCache,
}

impl StateKind {
    /// Whether startup fails when this state does not fit.
    pub fn is_required(self) -> bool {
        self == Self::DrawBuffer
    }

    /// Short name for logs and errors.
    pub fn name(self) -> &'static str {
        match self {
            Self::DrawBuffer => "draw buffer",
            Self::ShadowCache => "shadow cache",
            Self::ImageCache => "image cache",
            Self::TransformBuffer => "transform buffer",
            Self::GradientCache => "gradient cache",
        }
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One reserved block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reservation {
    /// What the block holds.
    pub kind: StateKind,
    /// The arena block.
    pub handle: ArenaHandle,
}

/// What to reserve for `caps`, with sizes, in order.
pub(crate) fn plan(caps: &CapabilitySet) -> SmallVec<[(StateKind, usize); 5]> {
    let bpp = caps.color_depth().bytes_per_pixel();
    let mut plan = SmallVec::new();
    plan.push((StateKind::DrawBuffer, caps.draw_buffer_bytes()));
    if let Some(bytes) = caps.shadow_cache_size() {
        plan.push((StateKind::ShadowCache, bytes));
    }
    if let Some(entries) = caps.image_cache_entries() {
        plan.push((StateKind::ImageCache, entries * IMAGE_CACHE_ENTRY_BYTES));
    }
    if caps.has(Capabilities::IMAGE_TRANSFORM) {
        plan.push((
            StateKind::TransformBuffer,
            usize::from(caps.display().hor_res) * bpp,
        ));
    }
    if caps.has(Capabilities::GRADIENT_CACHE) {
        plan.push((StateKind::GradientCache, GRADIENT_CACHE_BYTES));
    }
    plan
}
