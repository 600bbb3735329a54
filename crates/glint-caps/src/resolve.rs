//! One-shot resolution of a [`RawConfig`] into a [`CapabilitySet`].

use glint_core::ColorDepth;
use log::{debug, info, warn};

use crate::capability::Capabilities;
use crate::compiled::compiled;
use crate::error::ConfigError;
use crate::font::FontSet;
use crate::raw::{RawConfig, RawDraw, RawMemory};
use crate::rules::{needs_draw_complex, widget_requires, FEATURE_REQUIRES};
use crate::set::{CapabilitySet, DisplayGeometry, MemoryStrategy, TickMode};
use crate::widget::WidgetKind;

/// Smallest arena resolution accepts, in bytes.
pub const MIN_ARENA_BYTES: usize = 1024;

/// Validate `raw` and freeze it into a [`CapabilitySet`].
///
/// Pure and deterministic: the same input always yields an equal result
/// or the same error. When several rules are violated, the first one in
/// the order below is reported:
///
/// 1. colour depth and byte swap
/// 2. memory strategy, arena size and alignment
/// 3. refresh period and display geometry
/// 4. fonts
/// 5. capability names, then build-time availability
/// 6. feature dependencies, then widget dependencies in
///    [`WidgetKind::ALL`] order
/// 7. the draw buffer fitting in the arena
pub fn resolve(raw: &RawConfig) -> Result<CapabilitySet, ConfigError> {
    // 1. Colour.
    let color = ColorDepth::try_from(raw.color.depth)?;
    if raw.color.swap_16 && color != ColorDepth::Sixteen {
        return Err(ConfigError::SwapRequires16Bit {
            depth: raw.color.depth,
        });
    }

    // 2. Memory.
    let memory = memory_strategy(&raw.memory)?;
    if memory.arena_size() < MIN_ARENA_BYTES {
        return Err(ConfigError::ArenaTooSmall {
            size: memory.arena_size(),
            min: MIN_ARENA_BYTES,
        });
    }
    if !raw.memory.align.is_power_of_two() {
        return Err(ConfigError::InvalidAlignment {
            align: raw.memory.align,
        });
    }

    // 3. Timing and display.
    if raw.tick.refresh_period_ms == 0 {
        return Err(ConfigError::InvalidRefreshPeriod);
    }
    let display = DisplayGeometry {
        hor_res: raw.display.hor_res,
        ver_res: raw.display.ver_res,
        draw_buffer_lines: raw.display.draw_buffer_lines,
    };
    check_display(display)?;

    // 4. Fonts.
    let fonts = font_set(&raw.fonts.enabled, raw.fonts.default)?;

    // 5. Requested capabilities.
    let requested = requested_caps(raw)?;
    if let Some(missing) = (requested - compiled()).names().into_iter().next() {
        return Err(ConfigError::NotCompiled {
            capability: missing,
        });
    }

    // 6. Dependencies.
    check_dependencies(requested)?;

    // 7. The draw buffer must leave the arena usable.
    let buffer = usize::from(display.hor_res)
        * usize::from(display.draw_buffer_lines)
        * color.bytes_per_pixel();
    if buffer > memory.arena_size() {
        return Err(ConfigError::DrawBufferTooLarge {
            buffer,
            arena: memory.arena_size(),
        });
    }

    let caps = requested | derived_caches(&raw.draw, requested);
    let set = CapabilitySet {
        caps,
        memory,
        align: raw.memory.align,
        color,
        color_swap: raw.color.swap_16,
        tick: if raw.tick.custom {
            TickMode::Custom
        } else {
            TickMode::Manual
        },
        refresh_period_ms: raw.tick.refresh_period_ms,
        display,
        fonts,
        shadow_cache_size: if caps.contains(Capabilities::SHADOW_CACHE) {
            raw.draw.shadow_cache_size
        } else {
            0
        },
        image_cache_entries: raw.draw.image_cache_size,
    };
    info!(
        "resolved {} capabilities ({} widgets), {}, {}",
        set.names().len(),
        set.widgets().count(),
        set.memory(),
        set.color_depth()
    );
    debug!("capabilities: {}", set.names().join(", "));
    Ok(set)
}

fn memory_strategy(mem: &RawMemory) -> Result<MemoryStrategy, ConfigError> {
    match (mem.pool_size, mem.external) {
        (Some(pool), Some(external)) => Err(ConfigError::ConflictingMemory { pool, external }),
        (None, Some(len)) => Ok(MemoryStrategy::External { len }),
        (Some(size), None) => Ok(MemoryStrategy::Pool { size }),
        (None, None) => Ok(MemoryStrategy::Pool {
            size: RawMemory::DEFAULT_POOL_SIZE,
        }),
    }
}

fn check_display(display: DisplayGeometry) -> Result<(), ConfigError> {
    let reason = if display.hor_res == 0 || display.ver_res == 0 {
        format!(
            "resolution {}x{} has a zero dimension",
            display.hor_res, display.ver_res
        )
    } else if display.draw_buffer_lines == 0 {
        "draw buffer must hold at least one line".to_string()
    } else if display.draw_buffer_lines > display.ver_res {
        format!(
            "draw buffer of {} lines exceeds the vertical resolution {}",
            display.draw_buffer_lines, display.ver_res
        )
    } else {
        return Ok(());
    };
    Err(ConfigError::InvalidDisplay { reason })
}

fn font_set(enabled: &[u8], default: u8) -> Result<FontSet, ConfigError> {
    if let Some(&size) = enabled.iter().find(|&&s| !FontSet::is_builtin(s)) {
        return Err(ConfigError::InvalidFontSize { size });
    }
    if enabled.is_empty() {
        return Err(ConfigError::NoFonts);
    }
    if !enabled.contains(&default) {
        return Err(ConfigError::DefaultFontDisabled { size: default });
    }
    Ok(FontSet::new(enabled, default))
}

/// Capabilities switched on directly by the raw settings.
fn requested_caps(raw: &RawConfig) -> Result<Capabilities, ConfigError> {
    let d = &raw.draw;
    let mut caps = Capabilities::empty();
    for (on, cap) in [
        (d.complex, Capabilities::DRAW_COMPLEX),
        (d.shadow, Capabilities::SHADOW),
        (d.image_transform, Capabilities::IMAGE_TRANSFORM),
        (d.blend_modes, Capabilities::BLEND_MODES),
        (d.opa_scale, Capabilities::OPA_SCALE),
        (d.animation, Capabilities::ANIMATION),
        (d.gpu, Capabilities::GPU),
        (d.gpu_dma2d, Capabilities::GPU_DMA2D),
        (d.filesystem, Capabilities::FILESYSTEM),
        (d.img_indexed, Capabilities::IMG_INDEXED),
        (d.img_alpha, Capabilities::IMG_ALPHA),
    ] {
        caps.set(cap, on);
    }
    for (name, &on) in &raw.widgets {
        let widget = WidgetKind::from_name(name).ok_or_else(|| ConfigError::UnknownCapability {
            name: format!("widget:{name}"),
        })?;
        if on {
            caps |= widget.capability();
        }
    }
    Ok(caps)
}

fn check_dependencies(caps: Capabilities) -> Result<(), ConfigError> {
    let missing = |capability: String, requires: Capabilities| ConfigError::MissingDependency {
        capability,
        requires: requires.name().unwrap_or_default(),
    };
    for &(feature, requires) in FEATURE_REQUIRES {
        if caps.contains(feature) && !caps.contains(requires) {
            return Err(missing(feature.name().unwrap_or_default(), requires));
        }
    }
    for widget in WidgetKind::ALL {
        if !caps.contains(widget.capability()) {
            continue;
        }
        if needs_draw_complex(widget) && !caps.contains(Capabilities::DRAW_COMPLEX) {
            return Err(missing(widget.to_string(), Capabilities::DRAW_COMPLEX));
        }
        if let Some(dep) = widget_requires(widget)
            .iter()
            .find(|dep| !caps.contains(dep.capability()))
        {
            return Err(missing(widget.to_string(), dep.capability()));
        }
    }
    Ok(())
}

/// Cache capabilities that follow from the enabled features and sizes.
///
/// A cache of size zero and a cache whose feature is off both come out
/// absent.
fn derived_caches(draw: &RawDraw, caps: Capabilities) -> Capabilities {
    let mut derived = Capabilities::empty();
    if draw.shadow_cache_size > 0 {
        if caps.contains(Capabilities::SHADOW) {
            derived |= Capabilities::SHADOW_CACHE;
        } else {
            warn!(
                "shadow_cache_size = {} ignored: shadow is disabled",
                draw.shadow_cache_size
            );
        }
    }
    if draw.image_cache_size > 0 {
        derived |= Capabilities::IMAGE_CACHE;
    }
    if caps.contains(Capabilities::DRAW_COMPLEX) {
        derived |= Capabilities::GRADIENT_CACHE;
    }
    derived
}
