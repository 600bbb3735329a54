//! Live widget instances and the arena blocks holding their state.

use glint_arena::ArenaHandle;
use glint_caps::WidgetKind;
use glint_core::WidgetId;
use indexmap::IndexMap;

/// Bytes every widget carries: geometry, style pointer, flags, parent link.
pub const BASE_STATE_BYTES: usize = 40;

/// Bytes of arena state one widget of `kind` needs.
pub fn state_size(kind: WidgetKind) -> usize {
    let extra = match kind {
        WidgetKind::Line | WidgetKind::Led | WidgetKind::Switch => 8,
        WidgetKind::Button | WidgetKind::Checkbox | WidgetKind::Image => 16,
        WidgetKind::Arc | WidgetKind::Bar | WidgetKind::Slider | WidgetKind::Spinner => 24,
        WidgetKind::Label | WidgetKind::ImageButton | WidgetKind::Canvas => 32,
        WidgetKind::Roller | WidgetKind::Dropdown | WidgetKind::SpinBox => 40,
        WidgetKind::ButtonMatrix | WidgetKind::TextArea | WidgetKind::ColorWheel => 48,
        WidgetKind::List | WidgetKind::Menu | WidgetKind::Window | WidgetKind::MsgBox => 48,
        WidgetKind::Table | WidgetKind::Chart | WidgetKind::Meter => 64,
        WidgetKind::Calendar | WidgetKind::Keyboard => 64,
        WidgetKind::TabView | WidgetKind::TileView => 56,
    };
    BASE_STATE_BYTES + extra
}

/// A widget owned by the runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiveWidget {
    /// What the widget is.
    pub kind: WidgetKind,
    /// Its state block.
    pub handle: ArenaHandle,
}

/// Id-ordered table of live widgets.
#[derive(Debug, Default)]
pub(crate) struct WidgetTable {
    live: IndexMap<WidgetId, LiveWidget>,
    next_id: u32,
}

impl WidgetTable {
    pub(crate) fn insert(&mut self, widget: LiveWidget) -> WidgetId {
        let id = WidgetId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.live.insert(id, widget);
        id
    }

    pub(crate) fn get(&self, id: WidgetId) -> Option<&LiveWidget> {
        self.live.get(&id)
    }

    pub(crate) fn remove(&mut self, id: WidgetId) -> Option<LiveWidget> {
        // Keep creation order for iteration.
        self.live.shift_remove(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.live.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (WidgetId, &LiveWidget)> {
        self.live.iter().map(|(id, w)| (*id, w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_state_beyond_the_base() {
        for kind in WidgetKind::ALL {
            assert!(state_size(kind) > BASE_STATE_BYTES, "{kind}");
        }
    }

    #[test]
    fn composite_widgets_are_larger_than_their_parts() {
        assert!(state_size(WidgetKind::MsgBox) > state_size(WidgetKind::Button));
        assert!(state_size(WidgetKind::Keyboard) > state_size(WidgetKind::TextArea));
    }
}
