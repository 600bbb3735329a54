//! Capabilities compiled into this build.
//!
//! Each cargo feature of this crate compiles in one capability group.
//! The set is a constant, so code that branches on
//! `compiled().contains(..)` is eliminated by the optimiser when the group
//! is off. Run-time resolution then rejects any request for a capability
//! outside this set.
//!
//! | Feature           | Capabilities                          |
//! |-------------------|---------------------------------------|
//! | `draw-complex`    | draw-complex, blend-modes, gradient-cache |
//! | `shadow`          | shadow, shadow-cache                  |
//! | `image-transform` | image-transform                       |
//! | `animation`       | animation                             |
//! | `gpu`             | gpu, gpu-dma2d                        |
//! | `widgets-basic`   | arc .. table                          |
//! | `widgets-extra`   | calendar .. win                       |
//! | (always)          | image-cache, opa-scale, filesystem, img-indexed, img-alpha |

use crate::capability::Capabilities;

/// Capabilities that exist in every build.
const ALWAYS: Capabilities = Capabilities::IMAGE_CACHE
    .union(Capabilities::OPA_SCALE)
    .union(Capabilities::FILESYSTEM)
    .union(Capabilities::IMG_INDEXED)
    .union(Capabilities::IMG_ALPHA);

/// The capability groups compiled into this build.
pub const fn compiled() -> Capabilities {
    let mut caps = ALWAYS;
    if cfg!(feature = "draw-complex") {
        caps = caps
            .union(Capabilities::DRAW_COMPLEX)
            .union(Capabilities::BLEND_MODES)
            .union(Capabilities::GRADIENT_CACHE);
    }
    if cfg!(feature = "shadow") {
        caps = caps
            .union(Capabilities::SHADOW)
            .union(Capabilities::SHADOW_CACHE);
    }
    if cfg!(feature = "image-transform") {
        caps = caps.union(Capabilities::IMAGE_TRANSFORM);
    }
    if cfg!(feature = "animation") {
        caps = caps.union(Capabilities::ANIMATION);
    }
    if cfg!(feature = "gpu") {
        caps = caps.union(Capabilities::GPU).union(Capabilities::GPU_DMA2D);
    }
    if cfg!(feature = "widgets-basic") {
        caps = caps.union(Capabilities::BASIC_WIDGETS);
    }
    if cfg!(feature = "widgets-extra") {
        caps = caps.union(Capabilities::EXTRA_WIDGETS);
    }
    caps
}
