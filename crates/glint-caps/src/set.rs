//! The resolved, immutable capability set.

use std::fmt;

use glint_core::ColorDepth;
pub use glint_core::TickMode;

use crate::capability::Capabilities;
use crate::font::FontSet;
use crate::widget::WidgetKind;

/// How the arena obtains its memory. Exactly one strategy is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemoryStrategy {
    /// A pool of `size` bytes requested once from the host allocator.
    Pool {
        /// Pool size in bytes.
        size: usize,
    },
    /// A host-supplied region of `len` bytes, borrowed for the arena's
    /// lifetime.
    External {
        /// Region length in bytes.
        len: usize,
    },
}

impl MemoryStrategy {
    /// Arena size in bytes under this strategy.
    pub fn arena_size(self) -> usize {
        match self {
            Self::Pool { size } => size,
            Self::External { len } => len,
        }
    }
}

impl fmt::Display for MemoryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pool { size } => write!(f, "pool of {size} bytes"),
            Self::External { len } => write!(f, "external region of {len} bytes"),
        }
    }
}


/// Display size and draw buffer depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DisplayGeometry {
    /// Horizontal resolution in pixels.
    pub hor_res: u16,
    /// Vertical resolution in pixels.
    pub ver_res: u16,
    /// Rows of pixels in the draw buffer.
    pub draw_buffer_lines: u16,
}

/// Everything resolution decided, frozen.
///
/// Produced once by [`resolve`](crate::resolve()) and then only read.
/// Consumers hold a reference (or an `Arc`) and ask it whether their
/// optional state should exist; a capability that is off here has no
/// arena bytes reserved for it anywhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapabilitySet {
    pub(crate) caps: Capabilities,
    pub(crate) memory: MemoryStrategy,
    pub(crate) align: usize,
    pub(crate) color: ColorDepth,
    pub(crate) color_swap: bool,
    pub(crate) tick: TickMode,
    pub(crate) refresh_period_ms: u32,
    pub(crate) display: DisplayGeometry,
    pub(crate) fonts: FontSet,
    pub(crate) shadow_cache_size: usize,
    pub(crate) image_cache_entries: usize,
}

impl CapabilitySet {
    /// All enabled capabilities.
    pub fn capabilities(&self) -> Capabilities {
        self.caps
    }

    /// Whether every flag in `caps` is enabled.
    pub fn has(&self, caps: Capabilities) -> bool {
        self.caps.contains(caps)
    }

    /// Look a capability up by name.
    ///
    /// Returns `None` for names that do not denote a capability, so a
    /// typo is distinguishable from a disabled feature.
    pub fn get(&self, name: &str) -> Option<bool> {
        Capabilities::by_name(name).map(|cap| self.has(cap))
    }

    /// Whether the given widget is compiled in and enabled.
    pub fn widget_enabled(&self, widget: WidgetKind) -> bool {
        self.has(widget.capability())
    }

    /// Enabled widgets, in [`WidgetKind::ALL`] order.
    pub fn widgets(&self) -> impl Iterator<Item = WidgetKind> + '_ {
        WidgetKind::ALL
            .into_iter()
            .filter(|w| self.widget_enabled(*w))
    }

    /// Names of all enabled capabilities.
    pub fn names(&self) -> Vec<String> {
        self.caps.names()
    }

    /// The chosen memory strategy.
    pub fn memory(&self) -> MemoryStrategy {
        self.memory
    }

    /// Arena size in bytes.
    pub fn arena_size(&self) -> usize {
        self.memory.arena_size()
    }

    /// Arena block alignment in bytes.
    pub fn align(&self) -> usize {
        self.align
    }

    /// Colour depth.
    pub fn color_depth(&self) -> ColorDepth {
        self.color
    }

    /// Whether RGB565 bytes are swapped.
    pub fn color_swap(&self) -> bool {
        self.color_swap
    }

    /// Tick mode.
    pub fn tick_mode(&self) -> TickMode {
        self.tick
    }

    /// Display refresh period in milliseconds.
    pub fn refresh_period_ms(&self) -> u32 {
        self.refresh_period_ms
    }

    /// Display geometry.
    pub fn display(&self) -> DisplayGeometry {
        self.display
    }

    /// Bytes the draw buffer occupies.
    pub fn draw_buffer_bytes(&self) -> usize {
        usize::from(self.display.hor_res)
            * usize::from(self.display.draw_buffer_lines)
            * self.color.bytes_per_pixel()
    }

    /// Enabled fonts.
    pub fn fonts(&self) -> FontSet {
        self.fonts
    }

    /// Shadow cache size in bytes, or `None` when the cache is disabled.
    ///
    /// `shadow` off and `shadow_cache_size = 0` both land here as `None`.
    pub fn shadow_cache_size(&self) -> Option<usize> {
        self.has(Capabilities::SHADOW_CACHE)
            .then_some(self.shadow_cache_size)
    }

    /// Image cache capacity in entries, or `None` when disabled.
    pub fn image_cache_entries(&self) -> Option<usize> {
        self.has(Capabilities::IMAGE_CACHE)
            .then_some(self.image_cache_entries)
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} capabilities, {}, {}, {}x{}, fonts {}",
            self.caps.names().len(),
            self.memory,
            self.color,
            self.display.hor_res,
            self.display.ver_res,
            self.fonts
        )
    }
}
