//! Dependency tables between capabilities.

use crate::capability::Capabilities;
use crate::widget::WidgetKind;

/// Widgets that are built out of other widgets.
pub(crate) const WIDGET_REQUIRES: &[(WidgetKind, &[WidgetKind])] = &[
    (WidgetKind::Checkbox, &[WidgetKind::Label]),
    (WidgetKind::Dropdown, &[WidgetKind::Label]),
    (WidgetKind::Roller, &[WidgetKind::Label]),
    (WidgetKind::TextArea, &[WidgetKind::Label]),
    (WidgetKind::Table, &[WidgetKind::Label]),
    (WidgetKind::Calendar, &[WidgetKind::ButtonMatrix]),
    (WidgetKind::ImageButton, &[WidgetKind::Image]),
    (
        WidgetKind::Keyboard,
        &[WidgetKind::ButtonMatrix, WidgetKind::TextArea],
    ),
    (WidgetKind::List, &[WidgetKind::Label, WidgetKind::Button]),
    (
        WidgetKind::MsgBox,
        &[WidgetKind::Label, WidgetKind::Button, WidgetKind::ButtonMatrix],
    ),
    (WidgetKind::SpinBox, &[WidgetKind::TextArea]),
    (WidgetKind::Spinner, &[WidgetKind::Arc]),
    (WidgetKind::TabView, &[WidgetKind::ButtonMatrix]),
    (WidgetKind::Window, &[WidgetKind::Label, WidgetKind::Button]),
];

/// Widgets that only render with the complex draw engine.
pub(crate) const NEEDS_DRAW_COMPLEX: &[WidgetKind] = &[
    WidgetKind::Arc,
    WidgetKind::Slider,
    WidgetKind::Switch,
    WidgetKind::Chart,
    WidgetKind::ColorWheel,
    WidgetKind::Meter,
    WidgetKind::Spinner,
];

/// Draw features and the feature each one builds on.
pub(crate) const FEATURE_REQUIRES: &[(Capabilities, Capabilities)] = &[
    (Capabilities::SHADOW, Capabilities::DRAW_COMPLEX),
    (Capabilities::IMAGE_TRANSFORM, Capabilities::DRAW_COMPLEX),
    (Capabilities::BLEND_MODES, Capabilities::DRAW_COMPLEX),
    (Capabilities::GPU_DMA2D, Capabilities::GPU),
];

/// Direct requirements of `widget`, empty for standalone widgets.
pub(crate) fn widget_requires(widget: WidgetKind) -> &'static [WidgetKind] {
    match WIDGET_REQUIRES.iter().find(|(w, _)| *w == widget) {
        Some(&(_, deps)) => deps,
        None => &[],
    }
}

/// Whether `widget` draws with the complex engine.
pub(crate) fn needs_draw_complex(widget: WidgetKind) -> bool {
    NEEDS_DRAW_COMPLEX.contains(&widget)
}
