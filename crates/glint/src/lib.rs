//! Glint: a capability-gated embedded UI core with a fixed-capacity arena.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Glint sub-crates. For most firmware, adding `glint` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! # #[cfg(all(feature = "draw-complex", feature = "widgets-basic"))]
//! # fn main() {
//! use glint::prelude::*;
//!
//! let raw = RawConfig::from_toml_str(r#"
//!     [memory]
//!     pool_size = 32768
//!
//!     [tick]
//!     custom = false
//!
//!     [widgets]
//!     label = true
//!     slider = true
//! "#).unwrap();
//!
//! let tick = ManualTick::new();
//! let mut ui = Runtime::start(&raw, tick.clone()).unwrap();
//! assert_eq!(ui.capabilities().get("widget:slider"), Some(true));
//!
//! let slider = ui.create_widget(WidgetKind::Slider).unwrap();
//! assert!(ui.create_widget(WidgetKind::Chart).is_err());
//!
//! tick.inc(30);
//! assert!(ui.poll().is_some());
//! ui.destroy_widget(slider).unwrap();
//! # }
//! # #[cfg(not(all(feature = "draw-complex", feature = "widgets-basic")))]
//! # fn main() {}
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `glint-core` | Ticks, ids, colour depth |
//! | [`arena`] | `glint-arena` | Fixed-capacity allocator and statistics |
//! | [`caps`] | `glint-caps` | Raw configuration and capability resolution |
//! | [`runtime`] | `glint-runtime` | Startup, widgets, refresh timing |
//!
//! # Cargo features
//!
//! Capability groups are compiled in through the features `draw-complex`,
//! `shadow`, `image-transform`, `animation`, `gpu`, `widgets-basic` and
//! `widgets-extra`, which this crate forwards to `glint-runtime` and from
//! there to `glint-caps`. All of them are on by default. To trim a build,
//! disable default features and list the groups the firmware uses:
//!
//! ```toml
//! glint = { version = "0.1", default-features = false, features = ["draw-complex", "widgets-basic"] }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Ticks, identifiers and colour depth (`glint-core`).
pub use glint_core as types;

/// Fixed-capacity arena allocation (`glint-arena`).
///
/// Most users reach the arena through [`runtime::Runtime`]; use this
/// module directly for custom state outside widgets.
pub use glint_arena as arena;

/// Raw configuration and capability resolution (`glint-caps`).
pub use glint_caps as caps;

/// Startup, widget state and refresh timing (`glint-runtime`).
pub use glint_runtime as runtime;

/// Common imports for typical Glint usage.
///
/// ```rust
/// use glint::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use glint_core::{ColorDepth, FnTick, ManualTick, Tick, TickMode, TickSource, WidgetId};

    // Arena
    pub use glint_arena::{Arena, ArenaConfig, ArenaError, ArenaHandle, ArenaStats, SharedArena};

    // Capabilities
    pub use glint_caps::{
        resolve, Capabilities, CapabilitySet, ConfigError, MemoryStrategy, RawConfig, WidgetKind,
    };

    // Runtime
    pub use glint_runtime::{InitError, RefreshEvent, Runtime, RuntimeError, StateKind};
}
