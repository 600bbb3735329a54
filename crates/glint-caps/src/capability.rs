//! The capability flag set and its name table.

use bitflags::bitflags;

use crate::widget::WidgetKind;

bitflags! {
    /// One bit per capability the toolkit can be built with.
    ///
    /// Draw and cache capabilities occupy the low bits, widgets the bits
    /// from 16 upwards.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u64 {
        /// Anti-aliased arcs, rounded corners, masks and gradients.
        const DRAW_COMPLEX = 1 << 0;
        /// Box shadows.
        const SHADOW = 1 << 1;
        /// Cache of rendered shadow masks.
        const SHADOW_CACHE = 1 << 2;
        /// Image rotation and zoom.
        const IMAGE_TRANSFORM = 1 << 3;
        /// Cache of decoded images.
        const IMAGE_CACHE = 1 << 4;
        /// Additive/subtractive blending.
        const BLEND_MODES = 1 << 5;
        /// Whole-object opacity scaling.
        const OPA_SCALE = 1 << 6;
        /// Animation engine.
        const ANIMATION = 1 << 7;
        /// Generic GPU hook.
        const GPU = 1 << 8;
        /// STM32 DMA2D acceleration.
        const GPU_DMA2D = 1 << 9;
        /// File-system image sources.
        const FILESYSTEM = 1 << 10;
        /// Indexed-colour image formats.
        const IMG_INDEXED = 1 << 11;
        /// Alpha-only image formats.
        const IMG_ALPHA = 1 << 12;
        /// Cache of rendered gradients (exists only with the complex engine).
        const GRADIENT_CACHE = 1 << 13;

        /// Arc widget.
        const WIDGET_ARC = 1 << 16;
        /// Bar widget.
        const WIDGET_BAR = 1 << 17;
        /// Button widget.
        const WIDGET_BTN = 1 << 18;
        /// Button matrix widget.
        const WIDGET_BTNMATRIX = 1 << 19;
        /// Canvas widget.
        const WIDGET_CANVAS = 1 << 20;
        /// Checkbox widget.
        const WIDGET_CHECKBOX = 1 << 21;
        /// Drop-down widget.
        const WIDGET_DROPDOWN = 1 << 22;
        /// Image widget.
        const WIDGET_IMG = 1 << 23;
        /// Label widget.
        const WIDGET_LABEL = 1 << 24;
        /// Line widget.
        const WIDGET_LINE = 1 << 25;
        /// Roller widget.
        const WIDGET_ROLLER = 1 << 26;
        /// Slider widget.
        const WIDGET_SLIDER = 1 << 27;
        /// Switch widget.
        const WIDGET_SWITCH = 1 << 28;
        /// Text area widget.
        const WIDGET_TEXTAREA = 1 << 29;
        /// Table widget.
        const WIDGET_TABLE = 1 << 30;
        /// Calendar widget.
        const WIDGET_CALENDAR = 1 << 31;
        /// Chart widget.
        const WIDGET_CHART = 1 << 32;
        /// Colour wheel widget.
        const WIDGET_COLORWHEEL = 1 << 33;
        /// Image button widget.
        const WIDGET_IMGBTN = 1 << 34;
        /// Keyboard widget.
        const WIDGET_KEYBOARD = 1 << 35;
        /// LED widget.
        const WIDGET_LED = 1 << 36;
        /// List widget.
        const WIDGET_LIST = 1 << 37;
        /// Menu widget.
        const WIDGET_MENU = 1 << 38;
        /// Meter widget.
        const WIDGET_METER = 1 << 39;
        /// Message box widget.
        const WIDGET_MSGBOX = 1 << 40;
        /// Spin box widget.
        const WIDGET_SPINBOX = 1 << 41;
        /// Spinner widget.
        const WIDGET_SPINNER = 1 << 42;
        /// Tab view widget.
        const WIDGET_TABVIEW = 1 << 43;
        /// Tile view widget.
        const WIDGET_TILEVIEW = 1 << 44;
        /// Window widget.
        const WIDGET_WIN = 1 << 45;

        /// All building-block widgets.
        const BASIC_WIDGETS = (1 << 31) - (1 << 16);
        /// All composed widgets.
        const EXTRA_WIDGETS = (1 << 46) - (1 << 31);
        /// Every widget.
        const WIDGETS = Self::BASIC_WIDGETS.bits() | Self::EXTRA_WIDGETS.bits();
    }
}

/// Capability names for the non-widget flags, in bit order.
const FEATURE_NAMES: [(&str, Capabilities); 14] = [
    ("draw-complex", Capabilities::DRAW_COMPLEX),
    ("shadow", Capabilities::SHADOW),
    ("shadow-cache", Capabilities::SHADOW_CACHE),
    ("image-transform", Capabilities::IMAGE_TRANSFORM),
    ("image-cache", Capabilities::IMAGE_CACHE),
    ("blend-modes", Capabilities::BLEND_MODES),
    ("opa-scale", Capabilities::OPA_SCALE),
    ("animation", Capabilities::ANIMATION),
    ("gpu", Capabilities::GPU),
    ("gpu-dma2d", Capabilities::GPU_DMA2D),
    ("filesystem", Capabilities::FILESYSTEM),
    ("img-indexed", Capabilities::IMG_INDEXED),
    ("img-alpha", Capabilities::IMG_ALPHA),
    ("gradient-cache", Capabilities::GRADIENT_CACHE),
];

impl Capabilities {
    /// Look up a single capability by name.
    ///
    /// Feature names are kebab-case (`"draw-complex"`); underscores are
    /// accepted too (`"draw_complex"`). Widgets use a `widget:` prefix
    /// (`"widget:slider"`). This differs from the generated
    /// [`from_name`](Self::from_name), which takes constant identifiers
    /// such as `"WIDGET_SLIDER"`.
    pub fn by_name(name: &str) -> Option<Self> {
        if let Some(widget) = name.strip_prefix("widget:") {
            return WidgetKind::from_name(widget).map(WidgetKind::capability);
        }
        let normalised = name.replace('_', "-");
        FEATURE_NAMES
            .iter()
            .find(|(n, _)| *n == normalised)
            .map(|&(_, cap)| cap)
    }

    /// Name of a single capability flag, or `None` for composite or
    /// empty values.
    pub fn name(self) -> Option<String> {
        if let Some(&(n, _)) = FEATURE_NAMES.iter().find(|(_, cap)| *cap == self) {
            return Some(n.to_string());
        }
        WidgetKind::ALL
            .into_iter()
            .find(|w| w.capability() == self)
            .map(|w| w.to_string())
    }

    /// Names of every single flag set in `self`, features first, then
    /// widgets, each in bit order.
    pub fn names(self) -> Vec<String> {
        let features = FEATURE_NAMES
            .iter()
            .filter(|(_, cap)| self.contains(*cap))
            .map(|(n, _)| n.to_string());
        let widgets = WidgetKind::ALL
            .into_iter()
            .filter(|w| self.contains(w.capability()))
            .map(|w| w.to_string());
        features.chain(widgets).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_ranges_partition_widgets() {
        assert!(Capabilities::BASIC_WIDGETS.contains(Capabilities::WIDGET_ARC));
        assert!(Capabilities::BASIC_WIDGETS.contains(Capabilities::WIDGET_TABLE));
        assert!(!Capabilities::BASIC_WIDGETS.contains(Capabilities::WIDGET_CALENDAR));
        assert!(Capabilities::EXTRA_WIDGETS.contains(Capabilities::WIDGET_CALENDAR));
        assert!(Capabilities::EXTRA_WIDGETS.contains(Capabilities::WIDGET_WIN));
        assert!(!Capabilities::WIDGETS.intersects(Capabilities::DRAW_COMPLEX));
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(
            Capabilities::by_name("widget:slider"),
            Some(Capabilities::WIDGET_SLIDER)
        );
        assert_eq!(
            Capabilities::by_name("draw_complex"),
            Some(Capabilities::DRAW_COMPLEX)
        );
        assert_eq!(
            Capabilities::by_name("image-transform"),
            Some(Capabilities::IMAGE_TRANSFORM)
        );
        assert_eq!(Capabilities::by_name("widget:nope"), None);
        assert_eq!(Capabilities::by_name("hyperdrive"), None);
    }

    #[test]
    fn generated_lookup_uses_constant_identifiers() {
        assert_eq!(
            Capabilities::from_name("WIDGET_SLIDER"),
            Some(Capabilities::WIDGET_SLIDER)
        );
        assert_eq!(Capabilities::from_name("widget:slider"), None);
        assert_eq!(
            Capabilities::by_name("widget:slider"),
            Capabilities::from_name("WIDGET_SLIDER")
        );
    }

    #[test]
    fn single_flag_names() {
        assert_eq!(Capabilities::SHADOW.name().as_deref(), Some("shadow"));
        assert_eq!(
            Capabilities::WIDGET_MSGBOX.name().as_deref(),
            Some("widget:msgbox")
        );
        assert_eq!(Capabilities::WIDGETS.name(), None);
    }

    #[test]
    fn names_lists_features_then_widgets() {
        let caps = Capabilities::WIDGET_LABEL | Capabilities::DRAW_COMPLEX | Capabilities::SHADOW;
        assert_eq!(
            caps.names(),
            vec!["draw-complex", "shadow", "widget:label"]
        );
    }
}
