//! Stock task kinds: dig a voxel, gather an entity.
//!
//! Both claim their target in `on_enqueued`, memoise "is the target still
//! there?" in a [`FeasibilityCache`], and build a plan → walk → work script.

use col_act::{
    ActContext, BoxAct, Call, Domain, FAILURE_REASON, FailureReason, IntoBoxAct, Sequence, Status, Wait,
};
use col_agent::AgentView;
use col_core::{AgentRng, EntityId, TaskCategory, VoxelCoord};
use col_plan::{FollowPath, PlanAct, PlanGoal};

use crate::{
    Claims, Colony, DesignationKind, Feasibility, FeasibilityCache, ResourceKey, Task, TaskEnv,
    TaskError, TaskMeta, TaskResult, UNREACHABLE_COST, World, WorldEvent,
};

/// Ticks of work before a dug voxel is removed.
pub const DEFAULT_DIG_TICKS: u64 = 5;

// ── DigTask ───────────────────────────────────────────────────────────────────

/// Remove a solid voxel.  The digger stands on any face-neighbour, so a
/// change to any neighbour re-opens the feasibility check.
pub struct DigTask {
    meta:       TaskMeta,
    voxel:      VoxelCoord,
    work_ticks: u64,
    cache:      FeasibilityCache,
}

impl DigTask {
    pub fn new(voxel: VoxelCoord) -> Self {
        let cache = voxel
            .neighbors()
            .into_iter()
            .fold(FeasibilityCache::new().watch_voxel(voxel), FeasibilityCache::watch_voxel);
        Self {
            meta:       TaskMeta::new(format!("dig {voxel}"), TaskCategory::Dig),
            voxel,
            work_ticks: DEFAULT_DIG_TICKS,
            cache,
        }
    }

    pub fn with_meta(mut self, meta: TaskMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn work_ticks(mut self, ticks: u64) -> Self {
        self.work_ticks = ticks;
        self
    }

    pub fn voxel(&self) -> VoxelCoord {
        self.voxel
    }

    #[inline]
    fn key(&self) -> ResourceKey {
        ResourceKey::Voxel(self.voxel)
    }
}

impl Task for DigTask {
    fn meta(&self) -> &TaskMeta {
        &self.meta
    }

    fn is_feasible(&mut self, agent: &AgentView<'_>, env: &TaskEnv<'_>) -> Feasibility {
        if !agent.can_perform(self.meta.category) || !env.holds(self.key(), DesignationKind::Dig) {
            return Feasibility::Infeasible;
        }
        let voxel = self.voxel;
        let world = env.world();
        let diggable = self.cache.get_or_compute(|| {
            world.is_solid(voxel) && voxel.neighbors().iter().any(|&n| world.is_valid(n) && !world.is_solid(n))
        });
        Feasibility::from_bool(diggable)
    }

    fn compute_cost(&self, agent: &AgentView<'_>, env: &TaskEnv<'_>) -> f32 {
        if !env.world().is_solid(self.voxel) {
            return UNREACHABLE_COST;
        }
        agent.position.manhattan(self.voxel) as f32
    }

    fn create_script(&mut self, _agent: &AgentView<'_>, env: &TaskEnv<'_>, _rng: &mut AgentRng) -> Option<BoxAct<Colony>> {
        let voxel = self.voxel;
        let still_solid = move |ctx: &ActContext<'_, Colony>| ctx.env.world.is_solid(voxel);
        let remove = Call::<Colony>::new("remove-voxel", move |ctx| {
            ctx.env.world.set_solid(voxel, false);
            Status::Success
        });

        Some(
            Sequence::new(vec![
                PlanAct::new(PlanGoal::Adjacent(voxel), env.colony.plan_settings).boxed(),
                FollowPath::new().boxed(),
                Domain::new(still_solid, Wait::new(self.work_ticks).boxed()).boxed(),
                remove.boxed(),
            ])
            .boxed(),
        )
    }

    fn is_complete(&self, env: &TaskEnv<'_>) -> bool {
        !env.world().is_solid(self.voxel)
    }

    fn on_enqueued(&mut self, claims: &mut Claims<'_>, world: &dyn World) -> TaskResult<()> {
        if !world.is_solid(self.voxel) {
            return Err(TaskError::Rejected(format!("{} is not solid", self.voxel)));
        }
        claims.claim(self.key(), DesignationKind::Dig)
    }

    fn on_world_event(&mut self, event: &WorldEvent) {
        self.cache.on_event(event);
    }

    fn camera_zoom_location(&self) -> Option<VoxelCoord> {
        Some(self.voxel)
    }
}

// ── GatherTask ────────────────────────────────────────────────────────────────

/// Walk to an entity, remove it, and add `count` of its tag to the
/// stockpile.
pub struct GatherTask {
    meta:   TaskMeta,
    entity: EntityId,
    count:  u32,
    /// Where the entity was when the task was queued.
    at:     Option<VoxelCoord>,
    cache:  FeasibilityCache,
}

impl GatherTask {
    pub fn new(entity: EntityId, count: u32) -> Self {
        Self {
            meta:  TaskMeta::new(format!("gather {entity}"), TaskCategory::Gather),
            entity,
            count,
            at:    None,
            cache: FeasibilityCache::new().watch_entity(entity),
        }
    }

    pub fn with_meta(mut self, meta: TaskMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    #[inline]
    fn key(&self) -> ResourceKey {
        ResourceKey::Entity(self.entity)
    }
}

impl Task for GatherTask {
    fn meta(&self) -> &TaskMeta {
        &self.meta
    }

    fn is_feasible(&mut self, agent: &AgentView<'_>, env: &TaskEnv<'_>) -> Feasibility {
        if !agent.can_perform(self.meta.category) || !env.holds(self.key(), DesignationKind::Gather) {
            return Feasibility::Infeasible;
        }
        let entity = self.entity;
        let world = env.world();
        Feasibility::from_bool(self.cache.get_or_compute(|| world.entity_position(entity).is_some()))
    }

    fn compute_cost(&self, agent: &AgentView<'_>, env: &TaskEnv<'_>) -> f32 {
        match env.world().entity_position(self.entity) {
            Some(at) => agent.position.manhattan(at) as f32,
            None     => UNREACHABLE_COST,
        }
    }

    fn create_script(&mut self, _agent: &AgentView<'_>, env: &TaskEnv<'_>, _rng: &mut AgentRng) -> Option<BoxAct<Colony>> {
        let at = env.world().entity_position(self.entity)?;
        let (entity, count) = (self.entity, self.count);
        let pick_up = Call::<Colony>::new("pick-up", move |ctx| {
            let world = &mut ctx.env.world;
            let Some(tag) = world.entity_tag(entity).map(str::to_owned) else {
                ctx.blackboard.set(FAILURE_REASON, FailureReason::TargetGone);
                return Status::Fail;
            };
            world.remove_entity(entity);
            world.add_resources(&tag, count);
            Status::Success
        });

        Some(
            Sequence::new(vec![
                PlanAct::new(PlanGoal::Exact(at), env.colony.plan_settings).boxed(),
                FollowPath::new().boxed(),
                pick_up.boxed(),
            ])
            .boxed(),
        )
    }

    fn is_complete(&self, env: &TaskEnv<'_>) -> bool {
        env.world().entity_position(self.entity).is_none()
    }

    fn on_enqueued(&mut self, claims: &mut Claims<'_>, world: &dyn World) -> TaskResult<()> {
        self.at = world.entity_position(self.entity);
        if self.at.is_none() {
            return Err(TaskError::Rejected(format!("{} does not exist", self.entity)));
        }
        claims.claim(self.key(), DesignationKind::Gather)
    }

    fn on_world_event(&mut self, event: &WorldEvent) {
        self.cache.on_event(event);
    }

    fn camera_zoom_location(&self) -> Option<VoxelCoord> {
        self.at
    }
}
