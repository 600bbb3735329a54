//! Millisecond ticks and the [`TickSource`] collaborator.
//!
//! The toolkit never reads a clock directly. It polls a [`TickSource`]
//! supplied by the host: either a [`ManualTick`] that the host advances
//! from a periodic interrupt, or an [`FnTick`] wrapping a host function
//! such as a board's `millis()`.
//!
//! Ticks are 32-bit milliseconds and wrap after roughly 49.7 days.
//! Always compare ticks through [`Tick::elapsed_since`], which is
//! wrap-safe, never with `<` on the raw values.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// A point in time, in milliseconds since an arbitrary host epoch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tick(pub u32);

impl Tick {
    /// Milliseconds elapsed from `earlier` to `self`, modulo 2^32.
    ///
    /// Correct across a single wrap of the counter.
    pub fn elapsed_since(self, earlier: Tick) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// This tick advanced by `ms` milliseconds (wrapping).
    pub fn after(self, ms: u32) -> Tick {
        Tick(self.0.wrapping_add(ms))
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

impl From<u32> for Tick {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// How the host drives time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TickMode {
    /// The host advances a counter from a periodic interrupt.
    Manual,
    /// The host supplies a clock function.
    Custom,
}

impl fmt::Display for TickMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Manual => "manual tick counter",
            Self::Custom => "custom clock function",
        })
    }
}

/// Host-provided monotonic millisecond clock.
///
/// Implementations must return values that are monotonically
/// non-decreasing (modulo wrap) and must not have side effects
/// observable by the toolkit.
pub trait TickSource {
    /// Current time.
    fn now(&self) -> Tick;

    /// The tick mode this source implements. Clock functions are
    /// [`TickMode::Custom`]; counters the host advances by hand override
    /// this with [`TickMode::Manual`].
    fn mode(&self) -> TickMode {
        TickMode::Custom
    }
}

impl<T: TickSource + ?Sized> TickSource for Box<T> {
    fn now(&self) -> Tick {
        (**self).now()
    }

    fn mode(&self) -> TickMode {
        (**self).mode()
    }
}

impl<T: TickSource + ?Sized> TickSource for &T {
    fn now(&self) -> Tick {
        (**self).now()
    }

    fn mode(&self) -> TickMode {
        (**self).mode()
    }
}

/// A tick counter advanced explicitly by the host.
///
/// Clones share the same counter, so the host keeps one clone in its
/// timer interrupt (calling [`inc`](ManualTick::inc)) and hands another
/// to the runtime.
#[derive(Clone, Debug, Default)]
pub struct ManualTick {
    ms: Arc<AtomicU32>,
}

impl ManualTick {
    /// Create a counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a counter starting at `start`.
    pub fn starting_at(start: Tick) -> Self {
        Self {
            ms: Arc::new(AtomicU32::new(start.0)),
        }
    }

    /// Advance the counter by `ms` milliseconds (wrapping).
    pub fn inc(&self, ms: u32) {
        // fetch_add on AtomicU32 wraps on overflow.
        self.ms.fetch_add(ms, Ordering::Release);
    }
}

impl TickSource for ManualTick {
    fn now(&self) -> Tick {
        Tick(self.ms.load(Ordering::Acquire))
    }

    fn mode(&self) -> TickMode {
        TickMode::Manual
    }
}

/// Adapts a host function returning milliseconds into a [`TickSource`].
pub struct FnTick<F> {
    read: F,
}

impl<F: Fn() -> u32> FnTick<F> {
    /// Wrap `read`, which is called on every [`TickSource::now`].
    pub fn new(read: F) -> Self {
        Self { read }
    }
}

impl<F: Fn() -> u32> TickSource for FnTick<F> {
    fn now(&self) -> Tick {
        Tick((self.read)())
    }
}

impl<F> fmt::Debug for FnTick<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTick").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn elapsed_handles_wrap() {
        let before = Tick(u32::MAX - 5);
        let after = before.after(10);
        assert_eq!(after, Tick(4));
        assert_eq!(after.elapsed_since(before), 10);
    }

    #[test]
    fn manual_tick_clones_share_counter() {
        let host = ManualTick::new();
        let runtime_side = host.clone();
        host.inc(16);
        host.inc(17);
        assert_eq!(runtime_side.now(), Tick(33));
    }

    #[test]
    fn manual_tick_wraps() {
        let t = ManualTick::starting_at(Tick(u32::MAX));
        t.inc(2);
        assert_eq!(t.now(), Tick(1));
    }

    #[test]
    fn fn_tick_reads_host_clock() {
        let clock = Cell::new(100u32);
        let source = FnTick::new(|| clock.get());
        assert_eq!(source.now(), Tick(100));
        clock.set(250);
        assert_eq!(source.now(), Tick(250));
    }

    #[test]
    fn boxed_source_forwards() {
        let t = ManualTick::starting_at(Tick(42));
        let boxed: Box<dyn TickSource> = Box::new(t);
        assert_eq!(boxed.now(), Tick(42));
        assert_eq!(boxed.mode(), TickMode::Manual);
    }

    #[test]
    fn sources_report_their_mode() {
        assert_eq!(ManualTick::new().mode(), TickMode::Manual);
        assert_eq!(FnTick::new(|| 7).mode(), TickMode::Custom);
        let manual = ManualTick::new();
        assert_eq!((&manual).mode(), TickMode::Manual);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn after_then_elapsed_is_identity(start in any::<u32>(), ms in any::<u32>()) {
                let t = Tick(start);
                prop_assert_eq!(t.after(ms).elapsed_since(t), ms);
            }
        }
    }
}
