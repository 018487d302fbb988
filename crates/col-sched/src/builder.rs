//! Fluent builder for constructing a [`Scheduler`].

use std::collections::BTreeMap;

use col_agent::{AgentRngs, AgentStore};
use col_core::{FactionId, SchedulerConfig};
use col_plan::{PlanSettings, Planner};
use col_task::{Colony, ScriptSlots, TaskManager, World};

use crate::{SchedError, SchedResult, Scheduler};

/// Fluent builder for [`Scheduler<P>`].
///
/// # Required inputs
///
/// - [`SchedulerConfig`]: total ticks, seed, plan budget and timeouts, …
/// - [`AgentStore`] + [`AgentRngs`]: from [`col_agent::AgentStoreBuilder`]
/// - a [`World`]: the host world (e.g. [`col_task::GridWorld`])
/// - `P: Planner`: the path planner (e.g. [`col_plan::AStarPlanner`])
///
/// # Optional inputs
///
/// | Method            | Default                                              |
/// |-------------------|------------------------------------------------------|
/// | `.manager(m)`     | A plain `TaskManager` for every faction with agents  |
///
/// # Example
///
/// ```rust,ignore
/// let (store, rngs) = AgentStoreBuilder::new(n, seed).build();
/// let mut sched = SchedulerBuilder::new(config, store, rngs, GridWorld::new(32, 4, 32), AStarPlanner)
///     .manager(TaskManager::new(FactionId(0)).with_idle_behavior(Wander))
///     .build()?;
/// sched.run(&mut NoopObserver)?;
/// ```
pub struct SchedulerBuilder<P: Planner> {
    config:   SchedulerConfig,
    agents:   AgentStore,
    rngs:     AgentRngs,
    world:    Box<dyn World>,
    planner:  P,
    managers: BTreeMap<FactionId, TaskManager>,
}

impl<P: Planner> SchedulerBuilder<P> {
    pub fn new(
        config:  SchedulerConfig,
        agents:  AgentStore,
        rngs:    AgentRngs,
        world:   impl World + 'static,
        planner: P,
    ) -> Self {
        Self {
            config,
            agents,
            rngs,
            world: Box::new(world),
            planner,
            managers: BTreeMap::new(),
        }
    }

    /// Use a preconfigured manager for its faction.
    ///
    /// Factions that have agents but no manager get a default one; a manager
    /// may also be supplied for a faction with no agents yet.
    pub fn manager(mut self, manager: TaskManager) -> Self {
        self.managers.insert(manager.faction(), manager);
        self
    }

    /// Validate inputs and return a ready-to-run [`Scheduler`].
    pub fn build(self) -> SchedResult<Scheduler<P>> {
        self.config.validate()?;

        let agent_count = self.agents.count;
        if self.rngs.len() != agent_count {
            return Err(SchedError::AgentCountMismatch {
                expected: agent_count,
                got:      self.rngs.len(),
                what:     "agent rngs",
            });
        }

        let mut managers = self.managers;
        for &faction in &self.agents.faction {
            managers.entry(faction).or_insert_with(|| TaskManager::new(faction));
        }

        let settings = PlanSettings {
            timeout_ticks:  self.config.plan_timeout_ticks,
            max_timeouts:   self.config.plan_max_timeouts,
            max_expansions: self.config.plan_max_expansions,
        };
        let colony = Colony::new(self.agents, self.world).with_plan_settings(settings);

        Ok(Scheduler {
            clock:   self.config.make_clock(),
            config:  self.config,
            slots:   ScriptSlots::new(agent_count),
            colony,
            rngs:    self.rngs,
            managers,
            planner: self.planner,
        })
    }
}
