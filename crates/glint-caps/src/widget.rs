//! Widget kinds known to the toolkit.

use std::fmt;

use crate::capability::Capabilities;

/// Every widget the toolkit can compile in.
///
/// Basic widgets are building blocks; extra widgets are composed from
/// them and carry widget-on-widget dependencies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WidgetKind {
    /// Arc.
    Arc,
    /// Progress bar.
    Bar,
    /// Push button.
    Button,
    /// Matrix of buttons.
    ButtonMatrix,
    /// Pixel canvas.
    Canvas,
    /// Checkbox.
    Checkbox,
    /// Drop-down list.
    Dropdown,
    /// Image.
    Image,
    /// Text label.
    Label,
    /// Poly-line.
    Line,
    /// Roller selector.
    Roller,
    /// Slider.
    Slider,
    /// On/off switch.
    Switch,
    /// Text area.
    TextArea,
    /// Table.
    Table,
    /// Calendar.
    Calendar,
    /// Chart.
    Chart,
    /// Colour wheel.
    ColorWheel,
    /// Image button.
    ImageButton,
    /// On-screen keyboard.
    Keyboard,
    /// LED indicator.
    Led,
    /// List.
    List,
    /// Menu.
    Menu,
    /// Gauge meter.
    Meter,
    /// Message box.
    MsgBox,
    /// Numeric spin box.
    SpinBox,
    /// Loading spinner.
    Spinner,
    /// Tab view.
    TabView,
    /// Tile view.
    TileView,
    /// Window.
    Window,
}

impl WidgetKind {
    /// All widget kinds, basic widgets first.
    pub const ALL: [WidgetKind; 30] = [
        Self::Arc,
        Self::Bar,
        Self::Button,
        Self::ButtonMatrix,
        Self::Canvas,
        Self::Checkbox,
        Self::Dropdown,
        Self::Image,
        Self::Label,
        Self::Line,
        Self::Roller,
        Self::Slider,
        Self::Switch,
        Self::TextArea,
        Self::Table,
        Self::Calendar,
        Self::Chart,
        Self::ColorWheel,
        Self::ImageButton,
        Self::Keyboard,
        Self::Led,
        Self::List,
        Self::Menu,
        Self::Meter,
        Self::MsgBox,
        Self::SpinBox,
        Self::Spinner,
        Self::TabView,
        Self::TileView,
        Self::Window,
    ];

    /// Short configuration name, e.g. `"slider"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Arc => "arc",
            Self::Bar => "bar",
            Self::Button => "btn",
            Self::ButtonMatrix => "btnmatrix",
            Self::Canvas => "canvas",
            Self::Checkbox => "checkbox",
            Self::Dropdown => "dropdown",
            Self::Image => "img",
            Self::Label => "label",
            Self::Line => "line",
            Self::Roller => "roller",
            Self::Slider => "slider",
            Self::Switch => "switch",
            Self::TextArea => "textarea",
            Self::Table => "table",
            Self::Calendar => "calendar",
            Self::Chart => "chart",
            Self::ColorWheel => "colorwheel",
            Self::ImageButton => "imgbtn",
            Self::Keyboard => "keyboard",
            Self::Led => "led",
            Self::List => "list",
            Self::Menu => "menu",
            Self::Meter => "meter",
            Self::MsgBox => "msgbox",
            Self::SpinBox => "spinbox",
            Self::Spinner => "spinner",
            Self::TabView => "tabview",
            Self::TileView => "tileview",
            Self::Window => "win",
        }
    }

    /// Look a widget up by its configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.name() == name)
    }

    /// The capability flag that gates this widget.
    pub fn capability(self) -> Capabilities {
        match self {
            Self::Arc => Capabilities::WIDGET_ARC,
            Self::Bar => Capabilities::WIDGET_BAR,
            Self::Button => Capabilities::WIDGET_BTN,
            Self::ButtonMatrix => Capabilities::WIDGET_BTNMATRIX,
            Self::Canvas => Capabilities::WIDGET_CANVAS,
            Self::Checkbox => Capabilities::WIDGET_CHECKBOX,
            Self::Dropdown => Capabilities::WIDGET_DROPDOWN,
            Self::Image => Capabilities::WIDGET_IMG,
            Self::Label => Capabilities::WIDGET_LABEL,
            Self::Line => Capabilities::WIDGET_LINE,
            Self::Roller => Capabilities::WIDGET_ROLLER,
            Self::Slider => Capabilities::WIDGET_SLIDER,
            Self::Switch => Capabilities::WIDGET_SWITCH,
            Self::TextArea => Capabilities::WIDGET_TEXTAREA,
            Self::Table => Capabilities::WIDGET_TABLE,
            Self::Calendar => Capabilities::WIDGET_CALENDAR,
            Self::Chart => Capabilities::WIDGET_CHART,
            Self::ColorWheel => Capabilities::WIDGET_COLORWHEEL,
            Self::ImageButton => Capabilities::WIDGET_IMGBTN,
            Self::Keyboard => Capabilities::WIDGET_KEYBOARD,
            Self::Led => Capabilities::WIDGET_LED,
            Self::List => Capabilities::WIDGET_LIST,
            Self::Menu => Capabilities::WIDGET_MENU,
            Self::Meter => Capabilities::WIDGET_METER,
            Self::MsgBox => Capabilities::WIDGET_MSGBOX,
            Self::SpinBox => Capabilities::WIDGET_SPINBOX,
            Self::Spinner => Capabilities::WIDGET_SPINNER,
            Self::TabView => Capabilities::WIDGET_TABVIEW,
            Self::TileView => Capabilities::WIDGET_TILEVIEW,
            Self::Window => Capabilities::WIDGET_WIN,
        }
    }

    /// Whether this is one of the composed "extra" widgets.
    pub fn is_extra(self) -> bool {
        Capabilities::EXTRA_WIDGETS.contains(self.capability())
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "widget:{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for w in WidgetKind::ALL {
            assert_eq!(WidgetKind::from_name(w.name()), Some(w));
        }
        assert_eq!(WidgetKind::from_name("sprocket"), None);
    }

    #[test]
    fn capabilities_are_distinct() {
        let mut seen = Capabilities::empty();
        for w in WidgetKind::ALL {
            assert!(!seen.intersects(w.capability()), "{w} shares a flag");
            seen |= w.capability();
        }
        assert_eq!(seen, Capabilities::WIDGETS);
    }

    #[test]
    fn extra_classification() {
        assert!(!WidgetKind::Slider.is_extra());
        assert!(WidgetKind::MsgBox.is_extra());
        assert!(WidgetKind::Meter.is_extra());
    }

    #[test]
    fn display_uses_capability_name() {
        assert_eq!(WidgetKind::Slider.to_string(), "widget:slider");
    }
}
