//! The `Scheduler` struct and its tick loop.

use std::collections::BTreeMap;

use col_act::Status;
use col_agent::{AgentRngs, AgentStatus};
use col_core::{AgentId, FactionId, SchedulerConfig, SimClock, TaskId, Tick};
use col_plan::Planner;
use col_task::{Colony, ScriptSlots, Task, TaskManager};
use tracing::{debug, info, trace};

use crate::{SchedError, SchedResult, SchedulerObserver, TickSummary};

/// The main scheduler.
///
/// `Scheduler<P>` owns the colony, every faction's [`TaskManager`], and one
/// script slot per agent, and drives the four-phase tick loop:
///
/// 1. **Broadcast**: world events since the last tick go to every task.
/// 2. **Manage**: each manager (ascending faction) runs cleanup and
///    assignment, installing scripts for idle agents.
/// 3. **Act**: each live agent's script is ticked once, ascending
///    `AgentId`.  Finished scripts are removed, their outstanding plan
///    requests withdrawn, and reported to the agent's faction manager.
/// 4. **Plan**: up to `plan_budget_per_tick` pending plan requests are
///    solved; answers are picked up by their acts next tick.
///
/// Create via [`SchedulerBuilder`][crate::SchedulerBuilder].
pub struct Scheduler<P: Planner> {
    pub config: SchedulerConfig,

    pub clock: SimClock,

    /// Agents, world, and plan channel.  Acts get `&mut Colony`.
    pub colony: Colony,

    /// Per-agent deterministic RNGs, separate for the split-borrow pattern.
    pub rngs: AgentRngs,

    /// Installed scripts, indexed by `AgentId`.
    pub slots: ScriptSlots,

    pub(crate) managers: BTreeMap<FactionId, TaskManager>,

    pub(crate) planner: P,
}

impl<P: Planner> Scheduler<P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`.
    pub fn run<O: SchedulerObserver>(&mut self, observer: &mut O) -> SchedResult<()> {
        info!(
            agents = self.colony.agents.count,
            factions = self.managers.len(),
            end = %self.config.end_tick(),
            "scheduler run started"
        );
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer);
        }
        observer.on_sim_end(self.clock.current_tick);
        info!(tick = %self.clock.current_tick, queued = self.queued_tasks(), "scheduler run finished");
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SchedulerObserver>(&mut self, n: u64, observer: &mut O) -> SchedResult<()> {
        for _ in 0..n {
            self.step(observer);
        }
        Ok(())
    }

    /// Queue `task` with `faction`'s manager.
    pub fn add_task(&mut self, faction: FactionId, task: impl Task + 'static) -> SchedResult<TaskId> {
        let manager = self.managers.get_mut(&faction).ok_or(SchedError::UnknownFaction(faction))?;
        Ok(manager.add_task(task, &*self.colony.world)?)
    }

    /// Cancel a queued task.  Its scripts fail on the next tick.
    pub fn cancel_task(&mut self, faction: FactionId, id: TaskId) -> SchedResult<()> {
        let manager = self.managers.get_mut(&faction).ok_or(SchedError::UnknownFaction(faction))?;
        Ok(manager.cancel(id)?)
    }

    /// Kill `agent` now.
    ///
    /// Its script is dropped, its plan requests are withdrawn, and its
    /// manager handles the task it was running before this returns.
    pub fn kill_agent(&mut self, agent: AgentId) -> SchedResult<Option<TaskId>> {
        if !self.colony.agents.contains(agent) {
            return Err(SchedError::UnknownAgent(agent));
        }
        let i = agent.index();
        self.colony.agents.status[i] = AgentStatus::Dead;
        self.slots.take(agent);
        let withdrawn = self.colony.plans.cancel_all(agent);

        let faction = self.colony.agents.faction[i];
        let task = self.managers.get_mut(&faction).and_then(|m| m.on_agent_death(agent));
        info!(agent = %agent, task = ?task, withdrawn, "agent died");
        Ok(task)
    }

    pub fn manager(&self, faction: FactionId) -> Option<&TaskManager> {
        self.managers.get(&faction)
    }

    pub fn manager_mut(&mut self, faction: FactionId) -> Option<&mut TaskManager> {
        self.managers.get_mut(&faction)
    }

    pub fn managers(&self) -> impl Iterator<Item = &TaskManager> + '_ {
        self.managers.values()
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn queued_tasks(&self) -> usize {
        self.managers.values().map(TaskManager::len).sum()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SchedulerObserver>(&mut self, observer: &mut O) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        let summary = self.process_tick(now);
        for manager in self.managers.values_mut() {
            for event in manager.drain_events() {
                observer.on_task_event(&event);
            }
        }
        observer.on_tick_end(&summary);

        if self.config.output_interval_ticks > 0 && now.0.is_multiple_of(self.config.output_interval_ticks) {
            observer.on_snapshot(now, &self.colony.agents, &self.slots);
        }
        self.clock.advance();
    }

    fn process_tick(&mut self, now: Tick) -> TickSummary {
        let mut summary = TickSummary { tick: now, ..TickSummary::default() };

        // ── Phase 1: broadcast world events ───────────────────────────────
        let events = self.colony.world.drain_events();
        if !events.is_empty() {
            trace!(tick = %now, events = events.len(), "broadcasting world events");
            for manager in self.managers.values_mut() {
                manager.broadcast(&events);
            }
        }

        // ── Phase 2: cleanup and assignment ───────────────────────────────
        for manager in self.managers.values_mut() {
            manager.tick(now, &self.colony, &mut self.slots, &mut self.rngs);
        }
        for agent in self.slots.drain_displaced() {
            self.colony.plans.cancel_all(agent);
        }

        // ── Phase 3: tick scripts (ascending AgentId) ─────────────────────
        for i in 0..self.colony.agents.count {
            let agent = AgentId(i as u32);
            if !self.colony.agents.is_alive(agent) {
                continue;
            }
            let Some(script) = self.slots.get_mut(agent) else {
                continue;
            };
            summary.scripts_ticked += 1;
            let status = script.tick(agent, now, &mut self.colony, self.rngs.get_mut(agent));
            if !status.is_terminal() {
                continue;
            }

            match status {
                Status::Success => summary.succeeded += 1,
                _               => summary.failed += 1,
            }
            let Some(script) = self.slots.take(agent) else {
                continue;
            };
            let withdrawn = self.colony.plans.cancel_all(agent);
            trace!(agent = %agent, script = script.name(), %status, withdrawn, "script finished");
            let faction = self.colony.agents.faction[i];
            if let Some(manager) = self.managers.get_mut(&faction) {
                manager.on_script_finished(agent, &script, status, &mut self.colony);
            }
        }

        // ── Phase 4: solve plan requests ──────────────────────────────────
        let Colony { plans, world, .. } = &mut self.colony;
        summary.plans_solved = plans.pump(&self.planner, world.navigable(), self.config.plan_budget_per_tick);
        summary.plans_pending = plans.pending_len();
        summary.queued_tasks = self.queued_tasks();

        debug!(
            tick = %now,
            scripts = summary.scripts_ticked,
            succeeded = summary.succeeded,
            failed = summary.failed,
            solved = summary.plans_solved,
            "tick processed"
        );
        summary
    }
}
