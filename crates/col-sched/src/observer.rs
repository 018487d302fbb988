//! Scheduler observer trait for progress reporting and data collection.

use col_agent::AgentStore;
use col_core::Tick;
use col_task::{ScriptSlots, TaskEvent};

/// Counters for one processed tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub tick:           Tick,
    /// Scripts ticked this tick (tasked and idle).
    pub scripts_ticked: usize,
    pub succeeded:      usize,
    pub failed:         usize,
    /// Tasks queued across all factions after the tick.
    pub queued_tasks:   usize,
    pub plans_solved:   usize,
    pub plans_pending:  usize,
}

/// Callbacks invoked by [`Scheduler::run`][crate::Scheduler::run] at key
/// points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct Progress { interval: u64 }
///
/// impl SchedulerObserver for Progress {
///     fn on_tick_end(&mut self, summary: &TickSummary) {
///         if summary.tick.0 % self.interval == 0 {
///             println!("{}: {} tasks queued", summary.tick, summary.queued_tasks);
///         }
///     }
/// }
/// ```
pub trait SchedulerObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per task lifecycle event, in the order the managers
    /// recorded them, after the tick's processing.
    fn on_task_event(&mut self, _event: &TaskEvent) {}

    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called every `config.output_interval_ticks` ticks with read-only
    /// access to agent state and installed scripts.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &AgentStore, _slots: &ScriptSlots) {}

    /// Called once after the final tick of [`Scheduler::run`][crate::Scheduler::run].
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SchedulerObserver`] that does nothing.
pub struct NoopObserver;

impl SchedulerObserver for NoopObserver {}
