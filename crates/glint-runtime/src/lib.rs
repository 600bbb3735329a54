//! Startup, widget state and refresh timing for Glint.
//!
//! Ties the capability resolver and the arena together: a [`Runtime`] is
//! built from a raw configuration and a host tick source, reserves its
//! startup state from the arena, and then serves widget creation and
//! refresh polling for the life of the firmware.
//!
//! # Memory strategies
//!
//! - [`Runtime::start`] requests a pool from the host allocator once.
//! - [`Runtime::start_in`] borrows a host region (for example a static
//!   buffer in a dedicated RAM bank) and never frees it.
//!
//! # Tick sources
//!
//! `tick.custom = true` expects a clock function such as
//! [`FnTick`](glint_core::FnTick); `false` expects a
//! [`ManualTick`](glint_core::ManualTick) the host advances from a timer
//! interrupt. Any other pairing is refused at startup.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod refresh;
pub mod runtime;
pub mod state;
pub mod widgets;

pub use error::{InitError, RuntimeError};
pub use refresh::{RefreshEvent, RefreshTimer};
pub use runtime::Runtime;
pub use state::{Reservation, StateKind, GRADIENT_CACHE_BYTES, IMAGE_CACHE_ENTRY_BYTES};
pub use widgets::{state_size, LiveWidget, BASE_STATE_BYTES};
