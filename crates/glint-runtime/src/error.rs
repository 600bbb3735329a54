//! Startup and runtime errors.

use glint_arena::ArenaError;
use glint_caps::{ConfigError, WidgetKind};
use glint_core::{TickMode, WidgetId};
use thiserror::Error;

/// Errors that halt [`Runtime`](crate::Runtime) startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InitError {
    /// The configuration did not resolve.
    #[error("configuration rejected: {0}")]
    Config(#[from] ConfigError),
    /// The arena could not be created over the configured memory.
    #[error("arena setup failed: {0}")]
    Arena(#[from] ArenaError),
    /// An external region is configured but the host supplied none.
    #[error("memory.external declares {len} bytes but no region was supplied")]
    RegionRequired {
        /// Declared region length.
        len: usize,
    },
    /// The host supplied a region but the configuration asks for a pool.
    #[error("a {supplied}-byte region was supplied but memory is configured as a pool")]
    RegionNotConfigured {
        /// Length of the supplied region.
        supplied: usize,
    },
    /// The supplied region is shorter than the configuration declares.
    #[error("memory.external declares {declared} bytes but the region holds {supplied}")]
    RegionTooShort {
        /// Declared region length.
        declared: usize,
        /// Supplied region length.
        supplied: usize,
    },
    /// The tick source does not implement the configured tick mode.
    #[error("tick.custom selects a {configured} but a {supplied} was supplied")]
    TickModeMismatch {
        /// Mode selected by the configuration.
        configured: TickMode,
        /// Mode of the supplied source.
        supplied: TickMode,
    },
    /// Required state did not fit in the arena.
    #[error("required {what} of {bytes} bytes does not fit: {source}")]
    OutOfMemory {
        /// What was being reserved.
        what: &'static str,
        /// Bytes requested.
        bytes: usize,
        /// The arena's refusal.
        #[source]
        source: ArenaError,
    },
}

/// Errors from operations on a running [`Runtime`](crate::Runtime).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    /// The widget kind is not enabled in the resolved capabilities.
    #[error("{kind} is disabled in this configuration")]
    WidgetDisabled {
        /// The requested kind.
        kind: WidgetKind,
    },
    /// No live widget has this id.
    #[error("no live widget with id {id}")]
    UnknownWidget {
        /// The unknown id.
        id: WidgetId,
    },
    /// The arena refused the request.
    #[error(transparent)]
    Arena(#[from] ArenaError),
}
