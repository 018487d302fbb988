//! Simulation time model.
//!
//! One `Tick` is one simulation frame.  The scheduler, every agent's Act
//! tree, and the plan channel all advance exactly once per tick, so timeouts
//! and movement speeds are expressed in ticks rather than seconds.
//! `SimClock` keeps the mapping to elapsed game time for display.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` frames after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Frames elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and converts it to elapsed game time.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Game milliseconds represented by one tick.  Default: 16 (≈60 fps).
    pub tick_duration_ms: u32,
    /// The current tick, advanced once per scheduler pass.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_duration_ms: u32) -> Self {
        Self { tick_duration_ms, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick + 1;
    }

    /// Elapsed game milliseconds since tick 0.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.current_tick.0 * self.tick_duration_ms as u64
    }

    /// How many ticks span `ms` milliseconds (rounded up, never zero).
    #[inline]
    pub fn ticks_for_ms(&self, ms: u64) -> u64 {
        ms.div_ceil(self.tick_duration_ms.max(1) as u64).max(1)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.elapsed_ms() / 1_000;
        write!(f, "{} ({}m{:02}s)", self.current_tick, secs / 60, secs % 60)
    }
}

// ── SchedulerConfig ───────────────────────────────────────────────────────────

/// Top-level scheduler configuration.
///
/// Applications usually load this from JSON (with the `serde` feature) and
/// hand it to the scheduler builder.  Every field has a default.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SchedulerConfig {
    /// Total ticks `Scheduler::run` simulates.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Game milliseconds per tick.
    pub tick_duration_ms: u32,

    /// Maximum plan requests the channel resolves per tick.  Requests beyond
    /// the budget wait for later ticks.
    pub plan_budget_per_tick: usize,

    /// Ticks a planning act waits for a response before resubmitting.
    pub plan_timeout_ticks: u64,

    /// Resubmissions a planning act makes before failing permanently.
    pub plan_max_timeouts: u32,

    /// Node-expansion budget carried by each plan request.
    pub plan_max_expansions: u32,

    /// Deliver a tick summary to observers every N ticks.  0 disables.
    pub output_interval_ticks: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            total_ticks:           1_000,
            seed:                  0,
            tick_duration_ms:      16,
            plan_budget_per_tick:  32,
            plan_timeout_ticks:    30,
            plan_max_timeouts:     3,
            plan_max_expansions:   4_096,
            output_interval_ticks: 1,
        }
    }
}

impl SchedulerConfig {
    /// The tick at which `Scheduler::run` stops (exclusive).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_ms)
    }

    /// Reject configurations that would stall planning forever.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_duration_ms == 0 {
            return Err(CoreError::Config("tick_duration_ms must be positive".into()));
        }
        if self.plan_budget_per_tick == 0 {
            return Err(CoreError::Config("plan_budget_per_tick must be positive".into()));
        }
        if self.plan_timeout_ticks == 0 {
            return Err(CoreError::Config("plan_timeout_ticks must be positive".into()));
        }
        Ok(())
    }
}
