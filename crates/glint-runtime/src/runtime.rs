//! The running toolkit instance.
//!
//! [`Runtime`] is what a host creates once at boot. Startup runs in a
//! fixed order:
//!
//! 1. resolve the raw configuration into a [`CapabilitySet`] and check
//!    the tick source against the configured
//!    [`TickMode`](glint_core::TickMode);
//! 2. create the arena over the configured memory strategy;
//! 3. reserve the draw buffer (required) and optional caches;
//! 4. start the refresh timer at the current tick.
//!
//! After that the host calls [`poll`](Runtime::poll) from its main loop and
//! creates widgets on demand. Every block the runtime allocates comes from
//! the one arena; dropping the runtime releases the pool (or hands the
//! external region back to the host untouched by any free).

use std::sync::Arc;

use glint_arena::{Arena, ArenaConfig, ArenaError, ArenaHandle, ArenaStats, Region};
use glint_caps::{resolve, CapabilitySet, MemoryStrategy, RawConfig, WidgetKind};
use glint_core::{Tick, TickSource, WidgetId};
use log::{debug, error, info, warn};
use smallvec::SmallVec;

use crate::error::{InitError, RuntimeError};
use crate::refresh::{RefreshEvent, RefreshTimer};
use crate::state::{plan, Reservation, StateKind};
use crate::widgets::{state_size, LiveWidget, WidgetTable};

/// A configured, running toolkit instance.
///
/// `'r` is the lifetime of a host-supplied memory region; runtimes over
/// their own pool are `Runtime<'static>`.
pub struct Runtime<'r> {
    caps: Arc<CapabilitySet>,
    arena: Arena<'r>,
    tick: Box<dyn TickSource + 'r>,
    timer: RefreshTimer,
    reserved: SmallVec<[Reservation; 5]>,
    degraded: SmallVec<[StateKind; 4]>,
    widgets: WidgetTable,
}

impl Runtime<'static> {
    /// Start with a self-managed pool.
    ///
    /// # Errors
    ///
    /// [`InitError::RegionRequired`] if the configuration selects an
    /// external region, [`InitError::TickModeMismatch`] if `tick` does not
    /// implement the configured tick mode; otherwise any resolution, arena
    /// or draw buffer failure.
    pub fn start(raw: &RawConfig, tick: impl TickSource + 'static) -> Result<Self, InitError> {
        let caps = resolve(raw)?;
        check_tick_mode(&caps, &tick)?;
        let arena = match caps.memory() {
            MemoryStrategy::Pool { size } => Arena::new(ArenaConfig {
                capacity: size,
                align: caps.align(),
            })?,
            MemoryStrategy::External { len } => return Err(InitError::RegionRequired { len }),
        };
        Self::boot(caps, arena, Box::new(tick))
    }
}

impl<'r> Runtime<'r> {
    /// Start over a host-supplied region.
    ///
    /// The configuration must select `memory.external`, and `region` must
    /// be at least as long as declared. Only the declared length is used.
    /// The region is never freed by the runtime.
    pub fn start_in(
        raw: &RawConfig,
        region: &'r mut [u8],
        tick: impl TickSource + 'r,
    ) -> Result<Self, InitError> {
        let caps = resolve(raw)?;
        check_tick_mode(&caps, &tick)?;
        let declared = match caps.memory() {
            MemoryStrategy::External { len } => len,
            MemoryStrategy::Pool { .. } => {
                return Err(InitError::RegionNotConfigured {
                    supplied: region.len(),
                })
            }
        };
        if region.len() < declared {
            return Err(InitError::RegionTooShort {
                declared,
                supplied: region.len(),
            });
        }
        let region = Region::external(&mut region[..declared]);
        let arena = Arena::with_region(region, caps.align())?;
        Self::boot(caps, arena, Box::new(tick))
    }

    fn boot(
        caps: CapabilitySet,
        mut arena: Arena<'r>,
        tick: Box<dyn TickSource + 'r>,
    ) -> Result<Self, InitError> {
        let mut reserved = SmallVec::new();
        let mut degraded = SmallVec::new();
        for (kind, bytes) in plan(&caps) {
            match arena.allocate_zeroed(bytes) {
                Ok(handle) => reserved.push(Reservation { kind, handle }),
                Err(source) if kind.is_required() => {
                    return Err(InitError::OutOfMemory {
                        what: kind.name(),
                        bytes,
                        source,
                    })
                }
                Err(e) => {
                    warn!("{kind} of {bytes} bytes skipped, running without it: {e}");
                    degraded.push(kind);
                }
            }
        }

        let timer = RefreshTimer::new(caps.refresh_period_ms(), tick.now());
        info!("runtime started: {caps}; arena {}", arena.statistics());
        Ok(Self {
            caps: Arc::new(caps),
            arena,
            tick,
            timer,
            reserved,
            degraded,
            widgets: WidgetTable::default(),
        })
    }

    /// The resolved capabilities.
    pub fn capabilities(&self) -> &CapabilitySet {
        &self.caps
    }

    /// A shared handle to the resolved capabilities, for consumers that
    /// outlive a borrow of the runtime.
    pub fn shared_capabilities(&self) -> Arc<CapabilitySet> {
        Arc::clone(&self.caps)
    }

    /// Current arena usage.
    pub fn memory(&self) -> ArenaStats {
        self.arena.statistics()
    }

    /// Optional state that was enabled but did not fit at startup.
    pub fn degraded(&self) -> &[StateKind] {
        &self.degraded
    }

    /// The block reserved for `kind`, if any.
    pub fn reservation(&self, kind: StateKind) -> Option<ArenaHandle> {
        self.reserved
            .iter()
            .find(|r| r.kind == kind)
            .map(|r| r.handle)
    }

    /// The bytes of a startup reservation, or `None` if `kind` was not
    /// reserved.
    ///
    /// # Errors
    ///
    /// The arena's error if the reservation's handle no longer resolves.
    pub fn state_bytes_mut(&mut self, kind: StateKind) -> Result<Option<&mut [u8]>, ArenaError> {
        match self.reservation(kind) {
            Some(handle) => self.arena.bytes_mut(&handle).map(Some),
            None => Ok(None),
        }
    }

    /// The draw buffer.
    ///
    /// Empty only if the reservation was lost, which is logged.
    pub fn draw_buffer_mut(&mut self) -> &mut [u8] {
        match self.state_bytes_mut(StateKind::DrawBuffer) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => &mut [],
            Err(e) => {
                error!("draw buffer unavailable: {e}");
                &mut []
            }
        }
    }

    /// Read the tick source and report a refresh if one is due.
    pub fn poll(&mut self) -> Option<RefreshEvent> {
        let now = self.tick.now();
        let event = self.timer.poll(now)?;
        debug!("refresh #{} at {now}", event.count);
        Some(event)
    }

    /// Current tick.
    pub fn now(&self) -> Tick {
        self.tick.now()
    }

    /// Create a widget, allocating its zeroed state block.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::WidgetDisabled`] if `kind` is not enabled, or the
    /// arena's error if its state does not fit.
    pub fn create_widget(&mut self, kind: WidgetKind) -> Result<WidgetId, RuntimeError> {
        if !self.caps.widget_enabled(kind) {
            return Err(RuntimeError::WidgetDisabled { kind });
        }
        let handle = self.arena.allocate_zeroed(state_size(kind))?;
        let id = self.widgets.insert(LiveWidget { kind, handle });
        debug!("created {kind} #{id} at offset {}", handle.offset());
        Ok(id)
    }

    /// Destroy a widget and release its state.
    pub fn destroy_widget(&mut self, id: WidgetId) -> Result<(), RuntimeError> {
        let widget = self
            .widgets
            .remove(id)
            .ok_or(RuntimeError::UnknownWidget { id })?;
        self.arena.release(widget.handle)?;
        debug!("destroyed {} #{id}", widget.kind);
        Ok(())
    }

    /// Kind of a live widget.
    pub fn widget_kind(&self, id: WidgetId) -> Result<WidgetKind, RuntimeError> {
        self.widgets
            .get(id)
            .map(|w| w.kind)
            .ok_or(RuntimeError::UnknownWidget { id })
    }

    /// State bytes of a live widget.
    pub fn widget_state_mut(&mut self, id: WidgetId) -> Result<&mut [u8], RuntimeError> {
        let widget = *self
            .widgets
            .get(id)
            .ok_or(RuntimeError::UnknownWidget { id })?;
        Ok(self.arena.bytes_mut(&widget.handle)?)
    }

    /// Number of live widgets.
    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    /// Live widgets in creation order.
    pub fn widgets(&self) -> impl Iterator<Item = (WidgetId, WidgetKind)> + '_ {
        self.widgets.iter().map(|(id, w)| (id, w.kind))
    }

    /// Destroy every widget, keeping startup reservations.
    pub fn clear_widgets(&mut self) -> Result<(), RuntimeError> {
        let ids: Vec<WidgetId> = self.widgets.iter().map(|(id, _)| id).collect();
        for id in ids {
            self.destroy_widget(id)?;
        }
        Ok(())
    }
}

fn check_tick_mode(caps: &CapabilitySet, tick: &impl TickSource) -> Result<(), InitError> {
    let (configured, supplied) = (caps.tick_mode(), tick.mode());
    if configured == supplied {
        Ok(())
    } else {
        Err(InitError::TickModeMismatch {
            configured,
            supplied,
        })
    }
}

impl std::fmt::Debug for Runtime<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("arena", &self.arena)
            .field("widgets", &self.widgets.len())
            .field("degraded", &self.degraded)
            .finish_non_exhaustive()
    }
}
