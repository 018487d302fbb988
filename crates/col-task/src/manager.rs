//! `TaskManager`: one faction's work queue and its per-tick assignment loop.
//!
//! # Per-tick algorithm
//!
//! ```text
//! tick(now)
//!   ├─ 1. cleanup
//!   │     ├─ is_complete          → retire (Completed)
//!   │     ├─ should_delete        → retire (Deleted)
//!   │     └─ assigned agents that died or became infeasible
//!   │           → cancel their scripts, count a failure,
//!   │             retire if should_delete || !should_retry
//!   └─ 2. assignment, for each idle agent of this faction (ascending id)
//!         ├─ candidates: below max_assignable, permitted category, feasible,
//!         │              cost < UNREACHABLE_COST
//!         ├─ pick lowest cost; ties → higher priority → lower task id
//!         ├─ create_script → install and initialize
//!         │     None → counts as a failure, agent stays idle this tick
//!         └─ no candidate → IdleBehavior (only if the slot is empty)
//! ```
//!
//! Retiring a task runs `on_dequeued` exactly once, releases every claim the
//! task still holds, and cancels every script running it.  Cancelled scripts
//! fail on their owner's next tick.

use std::collections::BTreeMap;

use col_act::FailureReason;
use col_agent::AgentRngs;
use col_core::{AgentId, FactionId, TaskId, TaskPriority, Tick, VoxelCoord};
use tracing::{debug, info, warn};

use crate::{
    CancelToken, Claims, Colony, DesignationLedger, IdleBehavior, NoIdle, Script, ScriptSlots, Task,
    TaskEnv, TaskError, TaskEvent, TaskEventKind, TaskMeta, TaskOrigin, TaskResult, TaskStats,
    UNREACHABLE_COST, World, WorldEvent,
};

// ── Bookkeeping ───────────────────────────────────────────────────────────────

struct TaskEntry {
    task:      Box<dyn Task>,
    /// Agents running this task, with the token that cancels their script.
    assigned:  BTreeMap<AgentId, CancelToken>,
    stats:     TaskStats,
    announced: bool,
}

struct EventLog {
    faction: FactionId,
    now:     Tick,
    events:  Vec<TaskEvent>,
}

impl EventLog {
    fn push(
        &mut self,
        task:   TaskId,
        name:   &str,
        kind:   TaskEventKind,
        agent:  Option<AgentId>,
        reason: Option<FailureReason>,
    ) {
        self.events.push(TaskEvent {
            tick: self.now,
            faction: self.faction,
            task,
            name: name.to_owned(),
            kind,
            agent,
            reason,
        });
    }
}

/// Read-only summary of a queued task.
#[derive(Clone, Debug)]
pub struct TaskInfo<'a> {
    pub id:       TaskId,
    pub meta:     &'a TaskMeta,
    pub assigned: usize,
    pub stats:    TaskStats,
}

/// Negative costs clamp to zero; NaN is unreachable.
#[inline]
fn sanitize_cost(cost: f32) -> f32 {
    if cost.is_nan() { UNREACHABLE_COST } else { cost.max(0.0) }
}

// ── TaskManager ───────────────────────────────────────────────────────────────

pub struct TaskManager {
    faction: FactionId,
    next_id: TaskId,
    tasks:   BTreeMap<TaskId, TaskEntry>,
    ledger:  DesignationLedger,
    idle:    Box<dyn IdleBehavior>,
    log:     EventLog,
}

impl TaskManager {
    pub fn new(faction: FactionId) -> Self {
        Self {
            faction,
            next_id: TaskId(0),
            tasks:   BTreeMap::new(),
            ledger:  DesignationLedger::new(),
            idle:    Box::new(NoIdle),
            log:     EventLog { faction, now: Tick::ZERO, events: Vec::new() },
        }
    }

    /// Use `idle` for agents that find no feasible task.
    pub fn with_idle_behavior(mut self, idle: impl IdleBehavior + 'static) -> Self {
        self.idle = Box::new(idle);
        self
    }

    pub fn faction(&self) -> FactionId {
        self.faction
    }

    // ── Queue ─────────────────────────────────────────────────────────────

    pub fn add_task(&mut self, task: impl Task + 'static, world: &dyn World) -> TaskResult<TaskId> {
        self.add_boxed(Box::new(task), world)
    }

    /// Queue `task`, running its `on_enqueued` hook.
    ///
    /// If the hook fails, every claim it made is rolled back and the task
    /// is dropped.
    pub fn add_boxed(&mut self, mut task: Box<dyn Task>, world: &dyn World) -> TaskResult<TaskId> {
        let id = self.next_id;
        let mut claims = Claims::new(&mut self.ledger, id);
        if let Err(e) = task.on_enqueued(&mut claims, world) {
            claims.release_all();
            warn!(faction = %self.faction, name = %task.meta().name, error = %e, "task rejected");
            return Err(e);
        }
        self.next_id = id.next();

        info!(faction = %self.faction, task = %id, name = %task.meta().name, "task enqueued");
        self.log.push(id, &task.meta().name, TaskEventKind::Enqueued, None, None);
        self.tasks.insert(id, TaskEntry {
            task,
            assigned: BTreeMap::new(),
            stats: TaskStats::default(),
            announced: false,
        });
        Ok(id)
    }

    /// Remove `id` now.  Agents running it fail on their next tick.
    pub fn cancel(&mut self, id: TaskId) -> TaskResult<()> {
        let entry = self.tasks.remove(&id).ok_or(TaskError::UnknownTask(id))?;
        self.retire(id, entry, TaskEventKind::Cancelled);
        Ok(())
    }

    // ── Per-tick ──────────────────────────────────────────────────────────

    /// Forward world changes to every queued task.
    pub fn broadcast(&mut self, events: &[WorldEvent]) {
        if events.is_empty() {
            return;
        }
        for entry in self.tasks.values_mut() {
            for event in events {
                entry.task.on_world_event(event);
            }
        }
    }

    /// Cleanup pass, then assignment pass.
    pub fn tick(&mut self, now: Tick, colony: &Colony, slots: &mut ScriptSlots, rngs: &mut AgentRngs) {
        self.log.now = now;
        self.cleanup(now, colony);
        self.assign(now, colony, slots, rngs);
    }

    fn cleanup(&mut self, now: Tick, colony: &Colony) {
        let mut retiring = Vec::new();
        {
            let Self { tasks, ledger, log, .. } = self;
            for (&id, entry) in tasks.iter_mut() {
                let env = TaskEnv::new(now, id, colony, ledger);
                if entry.task.is_complete(&env) {
                    retiring.push((id, TaskEventKind::Completed));
                    continue;
                }
                if entry.task.should_delete(&entry.stats) {
                    retiring.push((id, TaskEventKind::Deleted));
                    continue;
                }

                let mut dropped = Vec::new();
                for &agent in entry.assigned.keys() {
                    let still = match colony.agent(agent) {
                        Some(view) => view.status.is_alive() && entry.task.is_feasible(&view, &env).is_feasible(),
                        None       => false,
                    };
                    if !still {
                        dropped.push(agent);
                    }
                }
                if dropped.is_empty() {
                    continue;
                }

                for agent in dropped {
                    if let Some(token) = entry.assigned.remove(&agent) {
                        token.cancel();
                    }
                    entry.stats.failures += 1;
                    debug!(task = %id, agent = %agent, "assigned task became infeasible");
                    log.push(id, &entry.task.meta().name, TaskEventKind::Unassigned, Some(agent), Some(FailureReason::Infeasible));
                }
                if entry.task.should_delete(&entry.stats) || !entry.task.should_retry(&entry.stats) {
                    retiring.push((id, TaskEventKind::Deleted));
                }
            }
        }

        for (id, kind) in retiring {
            if let Some(entry) = self.tasks.remove(&id) {
                self.retire(id, entry, kind);
            }
        }
    }

    fn assign(&mut self, now: Tick, colony: &Colony, slots: &mut ScriptSlots, rngs: &mut AgentRngs) {
        let Self { faction, tasks, ledger, idle, log, .. } = self;

        for agent in colony.agents.agent_ids() {
            let Some(view) = colony.agent(agent) else {
                continue;
            };
            if view.faction != *faction || !view.status.can_work() || !slots.is_idle(agent) {
                continue;
            }

            // ── Choose ────────────────────────────────────────────────────
            let mut best: Option<(TaskId, f32, TaskPriority)> = None;
            for (&id, entry) in tasks.iter_mut() {
                let (cap, category, priority) = {
                    let meta = entry.task.meta();
                    (meta.max_assignable, meta.category, meta.priority)
                };
                if entry.assigned.len() >= cap as usize
                    || entry.assigned.contains_key(&agent)
                    || !view.can_perform(category)
                {
                    continue;
                }
                let env = TaskEnv::new(now, id, colony, ledger);
                if !entry.task.is_feasible(&view, &env).is_feasible() {
                    continue;
                }
                let cost = sanitize_cost(entry.task.compute_cost(&view, &env));
                if cost >= UNREACHABLE_COST {
                    continue;
                }
                let better = match best {
                    None                  => true,
                    Some((_, c, p))       => cost < c || (cost == c && priority > p),
                };
                if better {
                    best = Some((id, cost, priority));
                }
            }

            // ── Attach ────────────────────────────────────────────────────
            let Some((id, cost, _)) = best else {
                if slots.get(agent).is_none_or(Script::is_finished) {
                    slots.take(agent);
                    if let Some(root) = idle.idle_script(&view, colony, rngs.get_mut(agent)) {
                        slots.install(agent, Script::new(None, root, now));
                    }
                }
                continue;
            };
            let Some(entry) = tasks.get_mut(&id) else {
                continue;
            };

            let env = TaskEnv::new(now, id, colony, ledger);
            entry.stats.assignments += 1;
            match entry.task.create_script(&view, &env, rngs.get_mut(agent)) {
                Some(root) => {
                    let script = Script::new(Some(id), root, now);
                    entry.assigned.insert(agent, script.token());
                    slots.install(agent, script);
                    debug!(task = %id, agent = %agent, cost, "task assigned");
                    log.push(id, &entry.task.meta().name, TaskEventKind::Assigned, Some(agent), None);
                }
                None => {
                    entry.stats.failures += 1;
                    debug!(task = %id, agent = %agent, "no script could be built");
                    let reason = FailureReason::Other("no script".into());
                    log.push(id, &entry.task.meta().name, TaskEventKind::Failed, Some(agent), Some(reason));
                }
            }
        }
    }

    /// Report that `agent`'s script reached a terminal status.
    ///
    /// Untasked scripts and scripts of tasks already retired are ignored.
    pub fn on_script_finished(&mut self, agent: AgentId, script: &Script, status: col_act::Status, colony: &mut Colony) {
        let Some(id) = script.task() else {
            return;
        };
        let Some(entry) = self.tasks.get_mut(&id) else {
            return;
        };
        if entry.assigned.remove(&agent).is_none() {
            return;
        }

        let meta = entry.task.meta();
        let retire = match status {
            col_act::Status::Running => None,
            col_act::Status::Success => {
                entry.stats.successes += 1;
                if let Some(boredom) = colony.agents.boredom.get_mut(agent.index()) {
                    *boredom += meta.boredom_cost;
                }
                debug!(task = %id, agent = %agent, "script succeeded");
                self.log.push(id, &meta.name, TaskEventKind::Succeeded, Some(agent), None);
                None
            }
            col_act::Status::Fail => {
                entry.stats.failures += 1;
                let reason = script.failure_reason().cloned();
                debug!(task = %id, agent = %agent, reason = ?reason, "script failed");
                self.log.push(id, &meta.name, TaskEventKind::Failed, Some(agent), reason.clone());

                if reason == Some(FailureReason::Unreachable) && meta.origin == TaskOrigin::Player {
                    if !entry.announced {
                        entry.announced = true;
                        colony.world.announce(format!("{} cancelled: target is unreachable", meta.name));
                        info!(task = %id, name = %meta.name, "unreachable player task cancelled");
                    }
                    Some(TaskEventKind::Cancelled)
                } else if entry.task.should_delete(&entry.stats) || !entry.task.should_retry(&entry.stats) {
                    Some(TaskEventKind::Deleted)
                } else {
                    None
                }
            }
        };

        if let Some(kind) = retire {
            if let Some(entry) = self.tasks.remove(&id) {
                self.retire(id, entry, kind);
            }
        }
    }

    /// Handle `agent` dying.  Runs synchronously so no claim outlives the
    /// agent's task.  Returns the task the agent was running, if any.
    pub fn on_agent_death(&mut self, agent: AgentId) -> Option<TaskId> {
        let id = self
            .tasks
            .iter()
            .find(|(_, entry)| entry.assigned.contains_key(&agent))
            .map(|(id, _)| *id)?;

        let entry = self.tasks.get_mut(&id)?;
        if let Some(token) = entry.assigned.remove(&agent) {
            token.cancel();
        }
        let reason = FailureReason::Other("agent died".into());
        self.log.push(id, &entry.task.meta().name, TaskEventKind::Unassigned, Some(agent), Some(reason));

        if !entry.task.meta().reassign_on_death {
            if let Some(entry) = self.tasks.remove(&id) {
                self.retire(id, entry, TaskEventKind::Cancelled);
            }
        }
        Some(id)
    }

    fn retire(&mut self, id: TaskId, mut entry: TaskEntry, kind: TaskEventKind) {
        for (&agent, token) in &entry.assigned {
            token.cancel();
            self.log.push(id, &entry.task.meta().name, TaskEventKind::Unassigned, Some(agent), Some(FailureReason::Cancelled));
        }

        let mut claims = Claims::new(&mut self.ledger, id);
        entry.task.on_dequeued(&mut claims);
        let leaked = claims.release_all();
        if leaked > 0 {
            debug!(task = %id, leaked, "released claims left by on_dequeued");
        }

        info!(faction = %self.faction, task = %id, name = %entry.task.meta().name, outcome = %kind, "task retired");
        self.log.push(id, &entry.task.meta().name, kind, None, None);
    }

    /// Take the buffered lifecycle events.
    pub fn drain_events(&mut self) -> Vec<TaskEvent> {
        std::mem::take(&mut self.log.events)
    }

    // ── Introspection ─────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.contains_key(&id)
    }

    /// Every queued task in id order.
    pub fn tasks(&self) -> impl Iterator<Item = TaskInfo<'_>> + '_ {
        self.tasks.iter().map(|(&id, entry)| TaskInfo {
            id,
            meta:     entry.task.meta(),
            assigned: entry.assigned.len(),
            stats:    entry.stats,
        })
    }

    pub fn info(&self, id: TaskId) -> Option<TaskInfo<'_>> {
        let entry = self.tasks.get(&id)?;
        Some(TaskInfo { id, meta: entry.task.meta(), assigned: entry.assigned.len(), stats: entry.stats })
    }

    /// Agents currently running `id`, ascending.
    pub fn assigned_agents(&self, id: TaskId) -> Vec<AgentId> {
        self.tasks.get(&id).map(|e| e.assigned.keys().copied().collect()).unwrap_or_default()
    }

    /// The task `agent` is working on, if any.
    pub fn assigned_task(&self, agent: AgentId) -> Option<TaskId> {
        self.tasks
            .iter()
            .find(|(_, entry)| entry.assigned.contains_key(&agent))
            .map(|(id, _)| *id)
    }

    pub fn camera_zoom_location(&self, id: TaskId) -> Option<VoxelCoord> {
        self.tasks.get(&id)?.task.camera_zoom_location()
    }

    pub fn ledger(&self) -> &DesignationLedger {
        &self.ledger
    }
}
