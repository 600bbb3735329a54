//! Core types and traits for the Glint embedded UI core.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the primitives shared across the Glint workspace: identifiers, the
//! millisecond tick type and [`TickSource`] trait, and colour depth.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod color;
pub mod id;
pub mod tick;

pub use color::{ColorDepth, ColorDepthError};
pub use id::{ArenaId, WidgetId};
pub use tick::{FnTick, ManualTick, Tick, TickMode, TickSource};
