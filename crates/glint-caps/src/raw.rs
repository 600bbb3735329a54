//! Raw, unvalidated configuration input.
//!
//! [`RawConfig`] mirrors the flat settings surface a firmware build
//! provides: colour, memory, tick, display, draw features, fonts and
//! per-widget switches. It is plain data with defaults; nothing is checked
//! until [`resolve`](crate::resolve()) runs.
//!
//! It can be built in code, loaded from TOML, or assembled from
//! `name = bool` pairs:
//!
//! ```toml
//! [memory]
//! pool_size = 65536
//!
//! [draw]
//! complex = true
//! shadow = true
//! shadow_cache_size = 2048
//!
//! [widgets]
//! label = true
//! btn = true
//! slider = true
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use crate::capability::Capabilities;
use crate::error::ConfigError;

/// Colour settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawColor {
    /// Bits per pixel: 1, 8, 16 or 32. Default: 16.
    pub depth: u8,
    /// Swap the two bytes of RGB565 for byte-oriented display links.
    pub swap_16: bool,
}

impl Default for RawColor {
    fn default() -> Self {
        Self {
            depth: 16,
            swap_16: false,
        }
    }
}

/// Memory strategy settings. At most one of the two fields may be set;
/// if neither is, a pool of [`RawMemory::DEFAULT_POOL_SIZE`] is used.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawMemory {
    /// Size of a self-managed pool requested from the host allocator once.
    pub pool_size: Option<usize>,
    /// Length of a host-supplied region handed over at startup.
    pub external: Option<usize>,
    /// Block alignment. Default: 8.
    pub align: usize,
}

impl RawMemory {
    /// Pool size used when no strategy is configured: 64 KiB.
    pub const DEFAULT_POOL_SIZE: usize = 64 * 1024;
}

impl Default for RawMemory {
    fn default() -> Self {
        Self {
            pool_size: None,
            external: None,
            align: 8,
        }
    }
}

/// Tick and refresh settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawTick {
    /// `true` (default): the host supplies a clock function. `false`: the
    /// host advances a manual tick counter from a periodic interrupt.
    pub custom: bool,
    /// Display refresh period in milliseconds. Default: 30.
    pub refresh_period_ms: u32,
}

impl Default for RawTick {
    fn default() -> Self {
        Self {
            custom: true,
            refresh_period_ms: 30,
        }
    }
}

/// Display geometry.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawDisplay {
    /// Horizontal resolution in pixels. Default: 320.
    pub hor_res: u16,
    /// Vertical resolution in pixels. Default: 240.
    pub ver_res: u16,
    /// Rows of pixels in the draw buffer. Default: 10.
    pub draw_buffer_lines: u16,
}

impl Default for RawDisplay {
    fn default() -> Self {
        Self {
            hor_res: 320,
            ver_res: 240,
            draw_buffer_lines: 10,
        }
    }
}

/// Draw-engine features and cache sizes.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawDraw {
    /// Complex draw engine. Default: on when the `draw-complex` group is
    /// compiled in.
    pub complex: bool,
    /// Box shadows.
    pub shadow: bool,
    /// Shadow cache size in bytes; 0 disables the cache.
    pub shadow_cache_size: usize,
    /// Image rotation and zoom.
    pub image_transform: bool,
    /// Image cache size in entries; 0 disables the cache.
    pub image_cache_size: usize,
    /// Blend modes.
    pub blend_modes: bool,
    /// Opacity scaling.
    pub opa_scale: bool,
    /// Animation engine. Default: on when the `animation` group is
    /// compiled in.
    pub animation: bool,
    /// Generic GPU hook.
    pub gpu: bool,
    /// STM32 DMA2D acceleration (requires `gpu`).
    pub gpu_dma2d: bool,
    /// File-system image sources.
    pub filesystem: bool,
    /// Indexed-colour image formats.
    pub img_indexed: bool,
    /// Alpha-only image formats.
    pub img_alpha: bool,
}

impl Default for RawDraw {
    fn default() -> Self {
        Self {
            complex: cfg!(feature = "draw-complex"),
            shadow: false,
            shadow_cache_size: 0,
            image_transform: false,
            image_cache_size: 0,
            blend_modes: false,
            opa_scale: false,
            animation: cfg!(feature = "animation"),
            gpu: false,
            gpu_dma2d: false,
            filesystem: false,
            img_indexed: false,
            img_alpha: false,
        }
    }
}

/// Font selection.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawFonts {
    /// Enabled built-in sizes. Default: `[12, 14, 16, 24]`.
    pub enabled: Vec<u8>,
    /// Default font size. Default: 14.
    pub default: u8,
}

impl Default for RawFonts {
    fn default() -> Self {
        Self {
            enabled: vec![12, 14, 16, 24],
            default: 14,
        }
    }
}

/// The complete raw configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// Colour settings.
    pub color: RawColor,
    /// Memory strategy.
    pub memory: RawMemory,
    /// Tick source and refresh period.
    pub tick: RawTick,
    /// Display geometry.
    pub display: RawDisplay,
    /// Draw features and caches.
    pub draw: RawDraw,
    /// Fonts.
    pub fonts: RawFonts,
    /// Per-widget switches keyed by widget name (`"slider"`). Widgets not
    /// listed are off.
    pub widgets: IndexMap<String, bool>,
}

impl RawConfig {
    /// Parse a TOML document. Missing sections and keys take their
    /// defaults; unknown keys are rejected.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Start from the defaults and apply `name = bool` flags in order.
    ///
    /// Names are capability names as accepted by
    /// [`Capabilities::by_name`].
    pub fn from_flags(flags: &[(&str, bool)]) -> Result<Self, ConfigError> {
        let mut raw = Self::default();
        for &(name, on) in flags {
            raw.set_flag(name, on)?;
        }
        Ok(raw)
    }

    /// Set one boolean capability switch by name.
    pub fn set_flag(&mut self, name: &str, on: bool) -> Result<(), ConfigError> {
        let cap = Capabilities::by_name(name).ok_or_else(|| ConfigError::UnknownCapability {
            name: name.to_string(),
        })?;
        if let Some(widget) = name.strip_prefix("widget:") {
            self.widgets.insert(widget.to_string(), on);
            return Ok(());
        }
        let slot = draw_switch(&mut self.draw, cap).ok_or_else(|| {
            ConfigError::DerivedCapability {
                name: name.to_string(),
            }
        })?;
        *slot = on;
        Ok(())
    }

    /// Enable or disable a widget by name.
    pub fn with_widget(mut self, name: &str, on: bool) -> Self {
        self.widgets.insert(name.to_string(), on);
        self
    }
}

/// The boolean field backing a settable draw capability.
fn draw_switch(d: &mut RawDraw, cap: Capabilities) -> Option<&mut bool> {
    let slot = if cap == Capabilities::DRAW_COMPLEX {
        &mut d.complex
    } else if cap == Capabilities::SHADOW {
        &mut d.shadow
    } else if cap == Capabilities::IMAGE_TRANSFORM {
        &mut d.image_transform
    } else if cap == Capabilities::BLEND_MODES {
        &mut d.blend_modes
    } else if cap == Capabilities::OPA_SCALE {
        &mut d.opa_scale
    } else if cap == Capabilities::ANIMATION {
        &mut d.animation
    } else if cap == Capabilities::GPU {
        &mut d.gpu
    } else if cap == Capabilities::GPU_DMA2D {
        &mut d.gpu_dma2d
    } else if cap == Capabilities::FILESYSTEM {
        &mut d.filesystem
    } else if cap == Capabilities::IMG_INDEXED {
        &mut d.img_indexed
    } else if cap == Capabilities::IMG_ALPHA {
        &mut d.img_alpha
    } else {
        // Cache capabilities follow their sizes.
        return None;
    };
    Some(slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let raw = RawConfig::default();
        assert_eq!(raw.color.depth, 16);
        assert_eq!(raw.draw.complex, cfg!(feature = "draw-complex"));
        assert_eq!(raw.draw.animation, cfg!(feature = "animation"));
        assert!(!raw.draw.shadow);
        assert!(raw.tick.custom);
        assert_eq!(raw.fonts.enabled, vec![12, 14, 16, 24]);
        assert_eq!(raw.fonts.default, 14);
        assert_eq!(raw.memory.pool_size, None);
        assert_eq!(raw.tick.refresh_period_ms, 30);
        assert!(raw.widgets.is_empty());
    }

    #[test]
    fn toml_overrides_and_defaults() {
        let raw = RawConfig::from_toml_str(
            r#"
            [memory]
            pool_size = 32768

            [draw]
            shadow = true
            shadow_cache_size = 1024

            [fonts]
            enabled = [12, 14, 16, 24]

            [widgets]
            label = true
            slider = true
            "#,
        )
        .unwrap();
        assert_eq!(raw.memory.pool_size, Some(32768));
        assert_eq!(raw.memory.align, 8);
        assert!(raw.draw.shadow);
        assert_eq!(raw.draw.complex, RawDraw::default().complex);
        assert_eq!(raw.fonts.enabled, vec![12, 14, 16, 24]);
        assert_eq!(raw.fonts.default, 14);
        assert_eq!(raw.widgets.get("slider"), Some(&true));
        assert_eq!(
            raw.widgets.keys().collect::<Vec<_>>(),
            vec!["label", "slider"]
        );
    }

    #[test]
    fn toml_unknown_key_rejected() {
        let err = RawConfig::from_toml_str("[draw]\nwobble = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn flags_set_fields_and_widgets() {
        let raw =
            RawConfig::from_flags(&[("widget:slider", true), ("draw_complex", false)]).unwrap();
        assert!(!raw.draw.complex);
        assert_eq!(raw.widgets.get("slider"), Some(&true));
    }

    #[test]
    fn unknown_flag_rejected() {
        assert_eq!(
            RawConfig::from_flags(&[("warp-drive", true)]),
            Err(ConfigError::UnknownCapability {
                name: "warp-drive".into()
            })
        );
    }

    #[test]
    fn derived_cache_flag_rejected() {
        assert_eq!(
            RawConfig::from_flags(&[("shadow-cache", true)]),
            Err(ConfigError::DerivedCapability {
                name: "shadow-cache".into()
            })
        );
    }
}
