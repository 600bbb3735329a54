//! Display refresh pacing driven by the host tick.

use glint_core::Tick;

/// A display refresh is due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshEvent {
    /// Tick at which the refresh was detected.
    pub at: Tick,
    /// Milliseconds since the previous refresh (or since start).
    pub elapsed_ms: u32,
    /// Refreshes performed so far, including this one.
    pub count: u64,
}

/// Fires once per refresh period.
///
/// The timer never catches up on missed periods: if the host polls late,
/// one refresh is reported and the next period starts from that poll.
/// Elapsed time is computed wrap-safely, so a tick counter rolling over
/// `u32::MAX` does not stall or flood refreshes.
#[derive(Clone, Debug)]
pub struct RefreshTimer {
    period_ms: u32,
    last: Tick,
    count: u64,
}

impl RefreshTimer {
    /// A timer whose first period starts at `start`.
    pub fn new(period_ms: u32, start: Tick) -> Self {
        Self {
            period_ms,
            last: start,
            count: 0,
        }
    }

    /// Refresh period in milliseconds.
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Refreshes reported so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Report a refresh if a full period has elapsed by `now`.
    pub fn poll(&mut self, now: Tick) -> Option<RefreshEvent> {
        let elapsed_ms = now.elapsed_since(self.last);
        if elapsed_ms < self.period_ms {
            return None;
        }
        self.last = now;
        self.count += 1;
        Some(RefreshEvent {
            at: now,
            elapsed_ms,
            count: self.count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_period() {
        let mut timer = RefreshTimer::new(30, Tick(0));
        assert_eq!(timer.poll(Tick(10)), None);
        assert_eq!(timer.poll(Tick(29)), None);
        let ev = timer.poll(Tick(30)).unwrap();
        assert_eq!(ev.elapsed_ms, 30);
        assert_eq!(ev.count, 1);
        assert_eq!(timer.poll(Tick(31)), None);
        assert!(timer.poll(Tick(60)).is_some());
    }

    #[test]
    fn late_poll_reports_one_refresh() {
        let mut timer = RefreshTimer::new(30, Tick(0));
        let ev = timer.poll(Tick(100)).unwrap();
        assert_eq!(ev.elapsed_ms, 100);
        assert_eq!(timer.poll(Tick(110)), None);
        assert_eq!(timer.count(), 1);
    }

    #[test]
    fn survives_counter_wrap() {
        let start = Tick(u32::MAX - 10);
        let mut timer = RefreshTimer::new(30, start);
        assert_eq!(timer.poll(start.after(20)), None);
        let ev = timer.poll(start.after(30)).unwrap();
        assert_eq!(ev.at, Tick(19));
        assert_eq!(ev.elapsed_ms, 30);
    }
}
