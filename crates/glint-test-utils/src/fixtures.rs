//! Reusable configuration profiles.
//!
//! - [`reference_board`]: the stock 320x240 board the defaults follow,
//!   with its ten widgets and a host clock function.
//! - [`minimal_board`]: defaults with a label, the smallest useful UI.
//! - [`dashboard_board`]: gauges, shadows and image caches on a 480x272
//!   panel.
//! - [`tight_board`]: a pool only just big enough for the draw buffer.
//!
//! All profiles except [`reference_board`] run on a manual tick counter,
//! so tests can drive them with a `ManualTick`.

use glint_caps::RawConfig;

/// Widgets enabled on the reference board.
pub const REFERENCE_WIDGETS: [&str; 10] = [
    "arc", "bar", "btn", "btnmatrix", "img", "label", "slider", "switch", "meter", "msgbox",
];

/// The reference board: 64 KiB pool, 16-bit colour, a host clock, the
/// complex engine with animations, fonts 12/14/16/24 and ten widgets.
/// Shadows, transforms, caches and GPU hooks are off.
pub fn reference_board() -> RawConfig {
    let mut raw = REFERENCE_WIDGETS
        .iter()
        .fold(RawConfig::default(), |raw, name| raw.with_widget(name, true));
    raw.memory.pool_size = Some(64 * 1024);
    raw.tick.custom = true;
    raw.draw.complex = true;
    raw.draw.animation = true;
    raw.fonts.enabled = vec![12, 14, 16, 24];
    raw.fonts.default = 14;
    raw
}

/// Defaults on a manual tick.
fn manual_board() -> RawConfig {
    let mut raw = RawConfig::default();
    raw.tick.custom = false;
    raw
}

/// Defaults plus the label widget.
pub fn minimal_board() -> RawConfig {
    manual_board().with_widget("label", true)
}

/// A feature-rich profile that resolves with default cargo features.
pub fn dashboard_board() -> RawConfig {
    let mut raw = with_widgets(&[
        "label", "btn", "btnmatrix", "arc", "bar", "meter", "spinner", "msgbox", "chart",
    ]);
    raw.memory.pool_size = Some(96 * 1024);
    raw.display.hor_res = 480;
    raw.display.ver_res = 272;
    raw.display.draw_buffer_lines = 20;
    raw.draw.shadow = true;
    raw.draw.shadow_cache_size = 4096;
    raw.draw.image_transform = true;
    raw.draw.image_cache_size = 8;
    raw.fonts.enabled = vec![12, 14, 20];
    raw
}

/// A pool of `pool_size` bytes with a one-line draw buffer (640 bytes at
/// the default 320 pixels and 16-bit colour).
pub fn tight_board(pool_size: usize) -> RawConfig {
    let mut raw = manual_board();
    raw.memory.pool_size = Some(pool_size);
    raw.display.draw_buffer_lines = 1;
    raw
}

/// Defaults plus the named widgets.
pub fn with_widgets(names: &[&str]) -> RawConfig {
    names
        .iter()
        .fold(manual_board(), |raw, name| raw.with_widget(name, true))
}
