//! The `Task` trait: the extension point for kinds of work.
//!
//! A task decides who may do it ([`Task::is_feasible`]), how attractive it
//! is to a given agent ([`Task::compute_cost`]), and what that agent should
//! actually do ([`Task::create_script`]).  The [`TaskManager`] drives the
//! rest of the lifecycle through the remaining hooks.
//!
//! [`TaskManager`]: crate::TaskManager

use col_act::BoxAct;
use col_agent::AgentView;
use col_core::{AgentRng, TaskCategory, TaskPriority, VoxelCoord};

use crate::{Claims, Colony, TaskEnv, TaskResult, World, WorldEvent};

/// Cost meaning "cannot sensibly be done by this agent".  Candidates at or
/// above it are never selected.
pub const UNREACHABLE_COST: f32 = 1.0e10;

/// Failed script runs after which a task without `auto_retry` is deleted.
pub const DEFAULT_MAX_FAILURES: u32 = 2;

// ── TaskMeta ──────────────────────────────────────────────────────────────────

/// Who asked for the task.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum TaskOrigin {
    /// Ordered by the player; unreachable failures cancel it and are
    /// announced.
    Player,
    #[default]
    Automatic,
}

/// The static description of a task.
#[derive(Clone, Debug)]
pub struct TaskMeta {
    pub name:              String,
    pub category:          TaskCategory,
    pub priority:          TaskPriority,
    /// Added to the agent's boredom when it completes a run.
    pub boredom_cost:      f32,
    /// Agents that may work on the task at the same time.
    pub max_assignable:    u32,
    /// Keep the task queued no matter how often its scripts fail.
    pub auto_retry:        bool,
    /// Keep the task queued for others when its agent dies.
    pub reassign_on_death: bool,
    pub origin:            TaskOrigin,
}

impl TaskMeta {
    pub fn new(name: impl Into<String>, category: TaskCategory) -> Self {
        Self {
            name:              name.into(),
            category,
            priority:          TaskPriority::default(),
            boredom_cost:      0.0,
            max_assignable:    category.default_max_assignable(),
            auto_retry:        false,
            reassign_on_death: true,
            origin:            TaskOrigin::default(),
        }
    }

    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn boredom_cost(mut self, cost: f32) -> Self {
        self.boredom_cost = cost.max(0.0);
        self
    }

    pub fn max_assignable(mut self, n: u32) -> Self {
        self.max_assignable = n;
        self
    }

    pub fn auto_retry(mut self, yes: bool) -> Self {
        self.auto_retry = yes;
        self
    }

    pub fn reassign_on_death(mut self, yes: bool) -> Self {
        self.reassign_on_death = yes;
        self
    }

    pub fn origin(mut self, origin: TaskOrigin) -> Self {
        self.origin = origin;
        self
    }
}

// ── Feasibility / stats ───────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Feasibility {
    Feasible,
    Infeasible,
}

impl Feasibility {
    #[inline]
    pub fn is_feasible(self) -> bool {
        self == Feasibility::Feasible
    }

    #[inline]
    pub fn from_bool(ok: bool) -> Self {
        if ok { Feasibility::Feasible } else { Feasibility::Infeasible }
    }
}

/// Counters kept by the manager for each queued task.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub assignments: u32,
    pub successes:   u32,
    pub failures:    u32,
}

// ── Task trait ────────────────────────────────────────────────────────────────

/// A kind of schedulable work.
///
/// Implementations customise feasibility, cost, and script generation; the
/// remaining hooks have defaults.
///
/// # Lifecycle
///
/// 1. [`on_enqueued`][Self::on_enqueued] once, when added to a manager.  The
///    task claims its designations here; an error rejects the task.
/// 2. Any number of assignments, each building a fresh script.
/// 3. [`on_dequeued`][Self::on_dequeued] exactly once, when the task is
///    completed, deleted, or cancelled.  The manager releases any claim the
///    hook leaves behind.
pub trait Task {
    fn meta(&self) -> &TaskMeta;

    /// Can `agent` attempt this task now?
    ///
    /// Called for every idle (agent, task) pair each tick and for every
    /// assigned agent in the cleanup pass, so expensive checks should go
    /// through a [`FeasibilityCache`][crate::FeasibilityCache].
    fn is_feasible(&mut self, agent: &AgentView<'_>, env: &TaskEnv<'_>) -> Feasibility;

    /// Non-negative cost of `agent` doing this task; lower is preferred.
    /// [`UNREACHABLE_COST`] when it cannot sensibly be costed.
    fn compute_cost(&self, agent: &AgentView<'_>, env: &TaskEnv<'_>) -> f32;

    /// Build a fresh act tree for `agent`.  `None` counts as an immediate
    /// failure of this assignment.
    fn create_script(
        &mut self,
        agent: &AgentView<'_>,
        env:   &TaskEnv<'_>,
        rng:   &mut AgentRng,
    ) -> Option<BoxAct<Colony>>;

    /// Done, regardless of who is working on it.
    fn is_complete(&self, env: &TaskEnv<'_>) -> bool;

    /// Checked before [`should_retry`][Self::should_retry].
    fn should_delete(&self, stats: &TaskStats) -> bool {
        !self.meta().auto_retry && stats.failures >= DEFAULT_MAX_FAILURES
    }

    /// After a failed run, keep the task queued for another attempt?
    fn should_retry(&self, _stats: &TaskStats) -> bool {
        true
    }

    fn on_enqueued(&mut self, _claims: &mut Claims<'_>, _world: &dyn World) -> TaskResult<()> {
        Ok(())
    }

    fn on_dequeued(&mut self, claims: &mut Claims<'_>) {
        claims.release_all();
    }

    /// World change notification.  Use it to invalidate caches only.
    fn on_world_event(&mut self, _event: &WorldEvent) {}

    /// Where a UI camera should look for this task.
    fn camera_zoom_location(&self) -> Option<VoxelCoord> {
        None
    }
}
