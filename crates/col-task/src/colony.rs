//! `Colony`: the environment every act tree runs against, and `TaskEnv`,
//! the read-only view handed to task callbacks.

use col_agent::{AgentStore, AgentView};
use col_core::{Affordances, AgentId, TaskId, Tick, VoxelCoord};
use col_plan::{PlanChannel, PlanEnv, PlanSettings};

use crate::{DesignationKind, DesignationLedger, ResourceKey, World};

// ── Colony ────────────────────────────────────────────────────────────────────

/// Agents, world, and plan channel, owned together so one `&mut Colony`
/// gives an act everything it may touch.
pub struct Colony {
    pub agents:        AgentStore,
    pub world:         Box<dyn World>,
    pub plans:         PlanChannel,
    /// Timeout and retry settings for plan acts built by tasks.
    pub plan_settings: PlanSettings,
}

impl Colony {
    pub fn new(agents: AgentStore, world: Box<dyn World>) -> Self {
        Self { agents, world, plans: PlanChannel::new(), plan_settings: PlanSettings::default() }
    }

    pub fn with_plan_settings(mut self, settings: PlanSettings) -> Self {
        self.plan_settings = settings;
        self
    }

    #[inline]
    pub fn agent(&self, agent: AgentId) -> Option<AgentView<'_>> {
        self.agents.view(agent)
    }
}

impl PlanEnv for Colony {
    fn plans(&mut self) -> &mut PlanChannel {
        &mut self.plans
    }

    fn position(&self, agent: AgentId) -> Option<VoxelCoord> {
        self.agents.position.get(agent.index()).copied()
    }

    fn affordances(&self, agent: AgentId) -> Affordances {
        self.agents.affordances.get(agent.index()).copied().unwrap_or(Affordances::NONE)
    }

    fn can_traverse(&self, from: VoxelCoord, to: VoxelCoord, affordances: Affordances) -> bool {
        self.world.can_traverse(from, to, affordances)
    }

    fn move_agent(&mut self, agent: AgentId, to: VoxelCoord) -> bool {
        match self.agents.position.get_mut(agent.index()) {
            Some(pos) => {
                *pos = to;
                true
            }
            None => false,
        }
    }
}

// ── TaskEnv ───────────────────────────────────────────────────────────────────

/// Read-only state passed to [`Task`][crate::Task] callbacks.
///
/// Built by the task manager for each call; `task` is the id of the task
/// being asked, so it can check its own claims.
#[derive(Copy, Clone)]
pub struct TaskEnv<'a> {
    pub now:    Tick,
    pub task:   TaskId,
    pub colony: &'a Colony,
    pub ledger: &'a DesignationLedger,
}

impl<'a> TaskEnv<'a> {
    #[inline]
    pub fn new(now: Tick, task: TaskId, colony: &'a Colony, ledger: &'a DesignationLedger) -> Self {
        Self { now, task, colony, ledger }
    }

    #[inline]
    pub fn world(&self) -> &'a dyn World {
        &*self.colony.world
    }

    /// Is `(key, kind)` still designated to the task being asked?
    #[inline]
    pub fn holds(&self, key: ResourceKey, kind: DesignationKind) -> bool {
        self.ledger.holder(key, kind) == Some(self.task)
    }
}
