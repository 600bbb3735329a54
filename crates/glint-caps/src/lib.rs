//! Capability resolution for Glint.
//!
//! Turns a flat [`RawConfig`] (feature switches, sizing parameters, font
//! and widget selection) into an immutable [`CapabilitySet`] exactly once,
//! before any memory is allocated. Downstream code holds a reference to the
//! set and asks it whether optional state should exist at all; nothing
//! reads process-wide flags.
//!
//! Resolution enforces the cross-feature rules the raw flags cannot
//! express on their own:
//!
//! - a widget or draw feature whose dependency is off is a
//!   [`ConfigError`], never silently disabled;
//! - a cache with size zero and a cache whose flag is off normalise to the
//!   same disabled state;
//! - an external memory region and a self-managed pool are mutually
//!   exclusive.
//!
//! Capability groups are also gated at build time through this crate's
//! cargo features (see [`compiled()`]). Asking for a capability whose code
//! was compiled out fails resolution with [`ConfigError::NotCompiled`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod capability;
pub mod compiled;
pub mod error;
pub mod font;
pub mod raw;
pub mod resolve;
mod rules;
pub mod set;
pub mod widget;

pub use capability::Capabilities;
pub use compiled::compiled;
pub use error::ConfigError;
pub use font::FontSet;
pub use raw::RawConfig;
pub use resolve::{resolve, MIN_ARENA_BYTES};
pub use set::{CapabilitySet, DisplayGeometry, MemoryStrategy, TickMode};
pub use widget::WidgetKind;
