//! Tick-based deadlines.

use col_core::Tick;

/// A deadline `duration` ticks after it was started.
///
/// An unstarted timer is never expired.  `duration == 0` expires on the
/// tick it was started.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Timer {
    pub duration: u64,
    started:      Option<Tick>,
}

impl Timer {
    pub fn new(duration: u64) -> Self {
        Self { duration, started: None }
    }

    /// Start (or restart) the timer at `now`.
    #[inline]
    pub fn start(&mut self, now: Tick) {
        self.started = Some(now);
    }

    #[inline]
    pub fn reset(&mut self) {
        self.started = None;
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.started.is_some()
    }

    #[inline]
    pub fn is_expired(&self, now: Tick) -> bool {
        match self.started {
            Some(at) => now.since(at) >= self.duration,
            None     => false,
        }
    }

    /// Ticks until expiry, `0` once expired, `None` if not started.
    pub fn remaining(&self, now: Tick) -> Option<u64> {
        self.started.map(|at| self.duration.saturating_sub(now.since(at)))
    }
}
