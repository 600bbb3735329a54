//! Configuration errors detected during resolution.

use glint_core::ColorDepthError;
use thiserror::Error;

/// Contradictory or invalid configuration.
///
/// Every variant is fatal to startup: the toolkit refuses to run with
/// settings it cannot honour rather than silently dropping features.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The configuration text could not be parsed.
    #[error("cannot parse configuration: {reason}")]
    Parse {
        /// Parser message.
        reason: String,
    },
    /// A flag name does not name any capability.
    #[error("unknown capability '{name}'")]
    UnknownCapability {
        /// The unrecognised name.
        name: String,
    },
    /// A cache capability was set directly instead of through its size.
    #[error("'{name}' is derived from its cache size and cannot be set as a flag")]
    DerivedCapability {
        /// The capability name.
        name: String,
    },
    /// An enabled capability requires another that is off.
    #[error("{capability} requires {requires}, which is disabled")]
    MissingDependency {
        /// The capability that was requested.
        capability: String,
        /// The capability it depends on.
        requires: String,
    },
    /// An enabled capability was compiled out of this build.
    #[error("{capability} is not compiled into this build")]
    NotCompiled {
        /// The capability that was requested.
        capability: String,
    },
    /// Both a self-managed pool and an external region were configured.
    #[error("memory.pool_size ({pool} bytes) and memory.external ({external} bytes) are mutually exclusive")]
    ConflictingMemory {
        /// Configured pool size.
        pool: usize,
        /// Configured external region length.
        external: usize,
    },
    /// The arena would be too small to be useful.
    #[error("arena of {size} bytes is below the minimum of {min} bytes")]
    ArenaTooSmall {
        /// Configured arena size.
        size: usize,
        /// Minimum arena size.
        min: usize,
    },
    /// Block alignment is not a power of two.
    #[error("memory.align {align} is not a power of two")]
    InvalidAlignment {
        /// The rejected alignment.
        align: usize,
    },
    /// The display draw buffer cannot fit in the arena.
    #[error("draw buffer of {buffer} bytes does not fit in an arena of {arena} bytes")]
    DrawBufferTooLarge {
        /// Bytes the draw buffer needs.
        buffer: usize,
        /// Arena size.
        arena: usize,
    },
    /// Colour depth has no colour type.
    #[error(transparent)]
    ColorDepth(#[from] ColorDepthError),
    /// Byte-swapped colour only exists for 16-bit colour.
    #[error("color.swap_16 requires a 16-bit colour depth, got {depth}")]
    SwapRequires16Bit {
        /// Configured depth.
        depth: u8,
    },
    /// Display geometry is degenerate.
    #[error("invalid display geometry: {reason}")]
    InvalidDisplay {
        /// Which dimension is invalid.
        reason: String,
    },
    /// The refresh period is zero.
    #[error("tick.refresh_period_ms must be at least 1")]
    InvalidRefreshPeriod,
    /// A font size that the toolkit does not ship.
    #[error("font size {size} is not a built-in font (even sizes 8 to 48)")]
    InvalidFontSize {
        /// The rejected size.
        size: u8,
    },
    /// No font is enabled.
    #[error("at least one font must be enabled")]
    NoFonts,
    /// The default font is not among the enabled fonts.
    #[error("default font size {size} is not enabled")]
    DefaultFontDisabled {
        /// The configured default size.
        size: u8,
    },
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse {
            reason: e.message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependency_message_names_both_sides() {
        let e = ConfigError::MissingDependency {
            capability: "widget:slider".into(),
            requires: "draw-complex".into(),
        };
        assert_eq!(
            e.to_string(),
            "widget:slider requires draw-complex, which is disabled"
        );
    }

    #[test]
    fn color_depth_error_is_transparent() {
        let e: ConfigError = ColorDepthError { bits: 24 }.into();
        assert!(e.to_string().contains("24"));
    }
}
