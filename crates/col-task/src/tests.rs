//! Unit tests for col-task.

#[cfg(test)]
mod support {
    use std::cell::Cell;
    use std::rc::Rc;

    use col_act::{BoxAct, Call, FAILURE_REASON, FailureReason, IntoBoxAct, Status};
    use col_agent::{AgentRngs, AgentStoreBuilder, AgentView};
    use col_core::{AgentId, AgentRng, TaskCategory, Tick};
    use col_plan::AStarPlanner;

    use crate::{
        Claims, Colony, DesignationKind, Feasibility, GridWorld, ResourceKey, ScriptSlots, Task, TaskEnv,
        TaskManager, TaskMeta, TaskResult, World,
    };

    /// Shared switches a test keeps after handing its task to a manager.
    #[derive(Clone)]
    pub struct Flags {
        pub feasible: Rc<Cell<bool>>,
        pub complete: Rc<Cell<bool>>,
        pub dequeued: Rc<Cell<u32>>,
        pub scripts:  Rc<Cell<u32>>,
    }

    impl Flags {
        pub fn new() -> Self {
            Self {
                feasible: Rc::new(Cell::new(true)),
                complete: Rc::new(Cell::new(false)),
                dequeued: Rc::new(Cell::new(0)),
                scripts:  Rc::new(Cell::new(0)),
            }
        }
    }

    /// Configurable task whose scripts report a fixed outcome.
    pub struct Stub {
        pub meta:     TaskMeta,
        pub cost:     f32,
        /// `Running` scripts never finish.
        pub outcome:  Status,
        pub reason:   Option<FailureReason>,
        pub scripted: bool,
        pub claims:   Vec<ResourceKey>,
        pub flags:    Flags,
    }

    impl Stub {
        pub fn new(name: &str) -> Self {
            Self {
                meta:     TaskMeta::new(name, TaskCategory::Other),
                cost:     1.0,
                outcome:  Status::Running,
                reason:   None,
                scripted: true,
                claims:   Vec::new(),
                flags:    Flags::new(),
            }
        }

        pub fn with_meta(mut self, f: impl FnOnce(TaskMeta) -> TaskMeta) -> Self {
            self.meta = f(self.meta);
            self
        }

        pub fn cost(mut self, cost: f32) -> Self {
            self.cost = cost;
            self
        }

        pub fn outcome(mut self, outcome: Status) -> Self {
            self.outcome = outcome;
            self
        }

        pub fn fails_with(mut self, reason: FailureReason) -> Self {
            self.outcome = Status::Fail;
            self.reason = Some(reason);
            self
        }

        pub fn no_script(mut self) -> Self {
            self.scripted = false;
            self
        }

        pub fn claim(mut self, key: ResourceKey) -> Self {
            self.claims.push(key);
            self
        }

        pub fn flags(&self) -> Flags {
            self.flags.clone()
        }
    }

    impl Task for Stub {
        fn meta(&self) -> &TaskMeta {
            &self.meta
        }

        fn is_feasible(&mut self, _agent: &AgentView<'_>, _env: &TaskEnv<'_>) -> Feasibility {
            Feasibility::from_bool(self.flags.feasible.get())
        }

        fn compute_cost(&self, _agent: &AgentView<'_>, _env: &TaskEnv<'_>) -> f32 {
            self.cost
        }

        fn create_script(&mut self, _: &AgentView<'_>, _: &TaskEnv<'_>, _: &mut AgentRng) -> Option<BoxAct<Colony>> {
            if !self.scripted {
                return None;
            }
            self.flags.scripts.set(self.flags.scripts.get() + 1);
            let (outcome, reason) = (self.outcome, self.reason.clone());
            Some(
                Call::<Colony>::new("stub", move |ctx| {
                    if let Some(reason) = &reason {
                        ctx.blackboard.set(FAILURE_REASON, reason.clone());
                    }
                    outcome
                })
                .boxed(),
            )
        }

        fn is_complete(&self, _env: &TaskEnv<'_>) -> bool {
            self.flags.complete.get()
        }

        fn on_enqueued(&mut self, claims: &mut Claims<'_>, _world: &dyn World) -> TaskResult<()> {
            for key in &self.claims {
                claims.claim(*key, DesignationKind::Build)?;
            }
            Ok(())
        }

        fn on_dequeued(&mut self, claims: &mut Claims<'_>) {
            self.flags.dequeued.set(self.flags.dequeued.get() + 1);
            claims.release_all();
        }
    }

    /// Runs the manager and agents the way the scheduler does.
    pub struct Rig {
        pub colony:   Colony,
        pub slots:    ScriptSlots,
        pub rngs:     AgentRngs,
        pub manager:  TaskManager,
        pub now:      Tick,
        /// `(agent, status, reason)` of every script that finished.
        pub finished: Vec<(AgentId, Status, Option<FailureReason>)>,
    }

    impl Rig {
        pub fn new(agents: usize, world: GridWorld) -> Self {
            let (store, rngs) = AgentStoreBuilder::new(agents, 11).build();
            Self {
                colony:   Colony::new(store, Box::new(world)),
                slots:    ScriptSlots::new(agents),
                rngs,
                manager:  TaskManager::new(col_core::FactionId(0)),
                now:      Tick::ZERO,
                finished: Vec::new(),
            }
        }

        pub fn add(&mut self, task: impl Task + 'static) -> col_core::TaskId {
            match self.manager.add_task(task, &*self.colony.world) {
                Ok(id) => id,
                Err(e) => panic!("task rejected: {e}"),
            }
        }

        pub fn step(&mut self) {
            let events = self.colony.world.drain_events();
            self.manager.broadcast(&events);
            self.manager.tick(self.now, &self.colony, &mut self.slots, &mut self.rngs);
            for agent in self.slots.drain_displaced() {
                self.colony.plans.cancel_all(agent);
            }

            for agent in self.colony.agents.agent_ids().collect::<Vec<_>>() {
                if !self.colony.agents.is_alive(agent) {
                    continue;
                }
                let Some(script) = self.slots.get_mut(agent) else {
                    continue;
                };
                let status = script.tick(agent, self.now, &mut self.colony, self.rngs.get_mut(agent));
                if status.is_terminal() {
                    if let Some(script) = self.slots.take(agent) {
                        self.colony.plans.cancel_all(agent);
                        self.finished.push((agent, status, script.failure_reason().cloned()));
                        self.manager.on_script_finished(agent, &script, status, &mut self.colony);
                    }
                }
            }

            let Colony { plans, world, .. } = &mut self.colony;
            plans.pump(&AStarPlanner, world.navigable(), usize::MAX);
            self.now = self.now.offset(1);
        }

        pub fn run(&mut self, ticks: usize) {
            for _ in 0..ticks {
                self.step();
            }
        }

        pub fn kinds(&mut self) -> Vec<crate::TaskEventKind> {
            self.manager.drain_events().into_iter().map(|e| e.kind).collect()
        }
    }

    pub fn flat(x: i32, z: i32) -> GridWorld {
        GridWorld::new(x, 3, z)
    }
}

#[cfg(test)]
mod ledger_tests {
    use col_core::{EntityId, TaskId, VoxelCoord};

    use crate::{Claims, DesignationKind, DesignationLedger, ResourceKey, TaskError};

    const V: ResourceKey = ResourceKey::Voxel(VoxelCoord::new(1, 0, 1));

    #[test]
    fn claim_and_release() {
        let mut ledger = DesignationLedger::new();
        let mut claims = Claims::new(&mut ledger, TaskId(3));
        claims.claim(V, DesignationKind::Dig).unwrap();
        assert_eq!(claims.holder(V, DesignationKind::Dig), Some(TaskId(3)));
        assert!(claims.release(V, DesignationKind::Dig));
        assert!(!claims.release(V, DesignationKind::Dig));
        assert!(ledger.is_empty());
    }

    #[test]
    fn second_holder_is_rejected() {
        let mut ledger = DesignationLedger::new();
        Claims::new(&mut ledger, TaskId(0)).claim(V, DesignationKind::Dig).unwrap();

        let err = Claims::new(&mut ledger, TaskId(1)).claim(V, DesignationKind::Dig).unwrap_err();
        assert!(matches!(err, TaskError::DoubleDesignation { holder: TaskId(0), .. }));
        assert_eq!(ledger.holder(V, DesignationKind::Dig), Some(TaskId(0)));
    }

    #[test]
    fn reclaim_by_holder_is_noop() {
        let mut ledger = DesignationLedger::new();
        let mut claims = Claims::new(&mut ledger, TaskId(0));
        claims.claim(V, DesignationKind::Dig).unwrap();
        claims.claim(V, DesignationKind::Dig).unwrap();
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn kinds_are_independent() {
        let mut ledger = DesignationLedger::new();
        Claims::new(&mut ledger, TaskId(0)).claim(V, DesignationKind::Dig).unwrap();
        Claims::new(&mut ledger, TaskId(1)).claim(V, DesignationKind::Build).unwrap();
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn other_task_cannot_release() {
        let mut ledger = DesignationLedger::new();
        Claims::new(&mut ledger, TaskId(0)).claim(V, DesignationKind::Dig).unwrap();
        assert!(!Claims::new(&mut ledger, TaskId(1)).release(V, DesignationKind::Dig));
        assert!(ledger.is_designated(V, DesignationKind::Dig));
    }

    #[test]
    fn release_all_only_touches_own_claims() {
        let mut ledger = DesignationLedger::new();
        let e = ResourceKey::Entity(EntityId(4));
        {
            let mut claims = Claims::new(&mut ledger, TaskId(0));
            claims.claim(V, DesignationKind::Dig).unwrap();
            claims.claim(e, DesignationKind::Gather).unwrap();
        }
        Claims::new(&mut ledger, TaskId(1)).claim(V, DesignationKind::Build).unwrap();

        assert_eq!(ledger.held_by(TaskId(0)).len(), 2);
        assert_eq!(Claims::new(&mut ledger, TaskId(0)).release_all(), 2);
        assert_eq!(ledger.held_by(TaskId(1)), vec![(V, DesignationKind::Build)]);
    }
}

#[cfg(test)]
mod grid_tests {
    use col_core::{Affordances, VoxelCoord};
    use col_plan::Navigable;

    use crate::{GridWorld, World, WorldEvent};

    #[test]
    fn floor_and_ledges_are_standable() {
        let world = GridWorld::new(4, 3, 4).with_solid(VoxelCoord::new(1, 0, 1));
        assert!(world.is_passable(VoxelCoord::new(0, 0, 0), Affordances::WALK));
        assert!(!world.is_passable(VoxelCoord::new(1, 0, 1), Affordances::WALK));
        assert!(world.is_passable(VoxelCoord::new(1, 1, 1), Affordances::WALK));
        assert!(!world.is_passable(VoxelCoord::new(2, 1, 2), Affordances::WALK));
        assert!(world.is_passable(VoxelCoord::new(2, 1, 2), Affordances::FLY));
        assert!(!world.is_passable(VoxelCoord::new(4, 0, 0), Affordances::FLY));
    }

    #[test]
    fn level_change_needs_climb() {
        let world = GridWorld::new(4, 3, 4).with_solid(VoxelCoord::new(1, 0, 1));
        let (from, to) = (VoxelCoord::new(0, 0, 1), VoxelCoord::new(1, 1, 1));
        assert!(!world.can_traverse(from, to, Affordances::WALK));
        assert!(world.can_traverse(from, to, Affordances::WALK | Affordances::CLIMB));
    }

    #[test]
    fn mutations_emit_events() {
        let mut world = GridWorld::new(4, 3, 4).with_solid(VoxelCoord::new(1, 0, 1));
        let e = world.spawn_entity("wood", VoxelCoord::new(2, 0, 2));
        assert!(world.drain_events().is_empty());

        world.set_solid(VoxelCoord::new(1, 0, 1), false);
        world.set_solid(VoxelCoord::new(1, 0, 1), false);
        assert!(world.remove_entity(e));
        assert_eq!(world.drain_events(), vec![
            WorldEvent::VoxelChanged(VoxelCoord::new(1, 0, 1)),
            WorldEvent::EntityRemoved(e),
        ]);
        assert!(world.drain_events().is_empty());
    }

    #[test]
    fn find_entity_picks_nearest_then_lowest_id() {
        let mut world = GridWorld::new(8, 1, 8);
        let far = world.spawn_entity("wood", VoxelCoord::new(7, 0, 7));
        let a = world.spawn_entity("wood", VoxelCoord::new(1, 0, 0));
        let _b = world.spawn_entity("wood", VoxelCoord::new(0, 0, 1));
        world.spawn_entity("stone", VoxelCoord::new(0, 0, 0));

        assert_eq!(world.find_entity("wood", VoxelCoord::default()), Some(a));
        assert_eq!(world.find_entity("wood", VoxelCoord::new(7, 0, 6)), Some(far));
        assert_eq!(world.find_entity("iron", VoxelCoord::default()), None);
    }

    #[test]
    fn stockpile() {
        let mut world = GridWorld::new(1, 1, 1);
        world.add_resources("wood", 3);
        assert!(world.has_resources("wood", 3));
        assert!(!world.take_resources("wood", 4));
        assert!(world.take_resources("wood", 2));
        assert_eq!(world.stockpile().count("wood"), 1);
    }
}

#[cfg(test)]
mod cache_tests {
    use col_core::{EntityId, VoxelCoord};

    use crate::{FeasibilityCache, WorldEvent};

    #[test]
    fn computes_once_until_invalidated() {
        let v = VoxelCoord::new(2, 0, 2);
        let mut cache = FeasibilityCache::new().watch_voxel(v);
        let mut calls = 0;
        assert!(cache.get_or_compute(|| { calls += 1; true }));
        assert!(cache.get_or_compute(|| { calls += 1; false }));
        assert_eq!(calls, 1);

        assert!(!cache.on_event(&WorldEvent::VoxelChanged(VoxelCoord::new(0, 0, 0))));
        assert!(!cache.on_event(&WorldEvent::EntityRemoved(EntityId(0))));
        assert_eq!(cache.cached(), Some(true));

        assert!(cache.on_event(&WorldEvent::VoxelChanged(v)));
        assert_eq!(cache.cached(), None);
        assert!(!cache.get_or_compute(|| false));
    }
}

#[cfg(test)]
mod script_tests {
    use col_act::{Always, FailureReason, IntoBoxAct, Status};
    use col_core::{AgentId, TaskId, Tick};

    use super::support::{Rig, flat};
    use crate::{Script, ScriptSlots};

    #[test]
    fn cancelled_script_fails_without_ticking() {
        let mut rig = Rig::new(1, flat(2, 2));
        let mut script = Script::new(Some(TaskId(0)), Always::running().boxed(), Tick::ZERO);
        let token = script.token();
        let agent = AgentId(0);

        assert_eq!(script.tick(agent, Tick(1), &mut rig.colony, rig.rngs.get_mut(agent)), Status::Running);
        token.cancel();
        assert_eq!(script.tick(agent, Tick(2), &mut rig.colony, rig.rngs.get_mut(agent)), Status::Fail);
        assert_eq!(script.failure_reason(), Some(&FailureReason::Cancelled));
        assert!(script.is_finished());
    }

    #[test]
    fn finished_script_latches() {
        let mut rig = Rig::new(1, flat(2, 2));
        let mut script = Script::new(None, Always::success().boxed(), Tick::ZERO);
        let agent = AgentId(0);
        assert_eq!(script.tick(agent, Tick(0), &mut rig.colony, rig.rngs.get_mut(agent)), Status::Success);
        script.token().cancel();
        assert_eq!(script.tick(agent, Tick(1), &mut rig.colony, rig.rngs.get_mut(agent)), Status::Success);
    }

    #[test]
    fn slots_idle_rules() {
        let mut slots = ScriptSlots::new(2);
        let a = AgentId(0);
        assert!(slots.is_idle(a));

        slots.install(a, Script::new(Some(TaskId(1)), Always::running().boxed(), Tick::ZERO));
        assert!(!slots.is_idle(a));
        assert_eq!(slots.task_of(a), Some(TaskId(1)));

        // Cancelled but not yet ticked: still busy.
        if let Some(s) = slots.get(a) {
            s.token().cancel();
        }
        assert!(!slots.is_idle(a));
        assert_eq!(slots.task_of(a), None);

        slots.install(a, Script::new(None, Always::running().boxed(), Tick::ZERO));
        assert!(slots.is_idle(a));
        assert!(slots.install(AgentId(9), Script::new(None, Always::running().boxed(), Tick::ZERO)).is_none());
    }

    #[test]
    fn replacing_a_running_script_is_recorded() {
        let mut rig = Rig::new(2, flat(2, 2));
        let mut slots = ScriptSlots::new(2);
        let (a, b) = (AgentId(0), AgentId(1));

        slots.install(a, Script::new(None, Always::running().boxed(), Tick::ZERO));
        slots.install(b, Script::new(None, Always::success().boxed(), Tick::ZERO));
        if let Some(done) = slots.get_mut(b) {
            done.tick(b, Tick::ZERO, &mut rig.colony, rig.rngs.get_mut(b));
        }
        assert!(slots.drain_displaced().is_empty());

        slots.install(a, Script::new(Some(TaskId(3)), Always::running().boxed(), Tick(1)));
        slots.install(b, Script::new(Some(TaskId(4)), Always::running().boxed(), Tick(1)));
        assert_eq!(slots.drain_displaced(), vec![a]);
        assert!(slots.drain_displaced().is_empty());
    }
}

#[cfg(test)]
mod manager_tests {
    use col_act::{FailureReason, Status};
    use col_core::{AgentId, CategorySet, FactionId, TaskCategory, TaskId, TaskPriority, VoxelCoord};

    use super::support::{Stub, Rig, flat};
    use crate::{ResourceKey, TaskError, TaskEventKind, TaskOrigin, UNREACHABLE_COST};

    const V: ResourceKey = ResourceKey::Voxel(VoxelCoord::new(1, 0, 1));
    const W: ResourceKey = ResourceKey::Voxel(VoxelCoord::new(2, 0, 2));

    #[test]
    fn enqueue_claims_and_rejects_duplicates() {
        let mut rig = Rig::new(1, flat(4, 4));
        let id = rig.add(Stub::new("a").claim(V));
        assert_eq!(rig.manager.ledger().held_by(id).len(), 1);

        // Claims W then collides on V: W must be rolled back.
        let err = rig
            .manager
            .add_task(Stub::new("b").claim(W).claim(V), &*rig.colony.world)
            .unwrap_err();
        assert!(matches!(err, TaskError::DoubleDesignation { holder, .. } if holder == id));
        assert_eq!(rig.manager.ledger().len(), 1);
        assert_eq!(rig.manager.len(), 1);
        assert_eq!(rig.kinds(), vec![TaskEventKind::Enqueued]);
    }

    #[test]
    fn respects_max_assignable() {
        let mut rig = Rig::new(5, flat(4, 4));
        let id = rig.add(Stub::new("crowd").with_meta(|m| m.max_assignable(2)));
        rig.run(3);
        assert_eq!(rig.manager.assigned_agents(id), vec![AgentId(0), AgentId(1)]);
        assert!(rig.slots.get(AgentId(2)).is_none());
    }

    #[test]
    fn single_slot_goes_to_one_agent() {
        let mut rig = Rig::new(2, flat(4, 4));
        let id = rig.add(Stub::new("solo"));
        rig.step();
        assert_eq!(rig.manager.assigned_agents(id).len(), 1);
        let attached = (0..2).filter(|&i| rig.slots.task_of(AgentId(i)) == Some(id)).count();
        assert_eq!(attached, 1);
    }

    #[test]
    fn prefers_cheapest_then_priority() {
        let mut rig = Rig::new(1, flat(4, 4));
        let _dear = rig.add(Stub::new("dear").cost(5.0).with_meta(|m| m.priority(TaskPriority::Urgent)));
        let low = rig.add(Stub::new("low").cost(2.0).with_meta(|m| m.priority(TaskPriority::Low)));
        let high = rig.add(Stub::new("high").cost(2.0).with_meta(|m| m.priority(TaskPriority::High)));
        rig.step();
        assert_eq!(rig.manager.assigned_task(AgentId(0)), Some(high));
        assert_ne!(rig.manager.assigned_task(AgentId(0)), Some(low));
    }

    #[test]
    fn equal_candidates_go_to_lowest_id() {
        let mut rig = Rig::new(1, flat(4, 4));
        let first = rig.add(Stub::new("first"));
        let _second = rig.add(Stub::new("second"));
        rig.step();
        assert_eq!(rig.manager.assigned_task(AgentId(0)), Some(first));
    }

    #[test]
    fn unreachable_cost_is_never_chosen() {
        let mut rig = Rig::new(1, flat(4, 4));
        let far = rig.add(Stub::new("far").cost(UNREACHABLE_COST));
        let nan = rig.add(Stub::new("nan").cost(f32::NAN));
        rig.run(2);
        assert_eq!(rig.manager.assigned_task(AgentId(0)), None);

        let negative = rig.add(Stub::new("negative").cost(-3.0));
        rig.step();
        assert_eq!(rig.manager.assigned_task(AgentId(0)), Some(negative));
        assert!(rig.manager.contains(far) && rig.manager.contains(nan));
    }

    #[test]
    fn permissions_gate_assignment() {
        let mut rig = Rig::new(2, flat(4, 4));
        rig.colony.agents.permissions[0] = CategorySet::EMPTY.with(TaskCategory::Dig);
        let id = rig.add(Stub::new("other"));
        rig.step();
        assert_eq!(rig.manager.assigned_agents(id), vec![AgentId(1)]);
    }

    #[test]
    fn other_factions_are_ignored() {
        let mut rig = Rig::new(2, flat(4, 4));
        rig.colony.agents.faction[0] = FactionId(1);
        let id = rig.add(Stub::new("ours").with_meta(|m| m.max_assignable(2)));
        rig.step();
        assert_eq!(rig.manager.assigned_agents(id), vec![AgentId(1)]);
    }

    #[test]
    fn cancel_fails_script_next_tick_and_dequeues_once() {
        let mut rig = Rig::new(1, flat(4, 4));
        let stub = Stub::new("doomed").claim(V);
        let flags = stub.flags();
        let id = rig.add(stub);
        rig.step();
        assert_eq!(rig.slots.task_of(AgentId(0)), Some(id));

        rig.manager.cancel(id).unwrap();
        assert_eq!(flags.dequeued.get(), 1);
        assert!(rig.manager.ledger().is_empty());
        assert!(matches!(rig.manager.cancel(id), Err(TaskError::UnknownTask(_))));

        rig.step();
        assert_eq!(rig.finished, vec![(AgentId(0), Status::Fail, Some(FailureReason::Cancelled))]);
        assert!(rig.slots.get(AgentId(0)).is_none());
        assert_eq!(flags.dequeued.get(), 1);
        assert!(rig.kinds().contains(&TaskEventKind::Cancelled));
    }

    #[test]
    fn completion_retires_task() {
        let mut rig = Rig::new(1, flat(4, 4));
        let stub = Stub::new("done").claim(V);
        let flags = stub.flags();
        let id = rig.add(stub);
        rig.step();
        flags.complete.set(true);
        rig.step();

        assert!(!rig.manager.contains(id));
        assert_eq!(flags.dequeued.get(), 1);
        assert!(rig.manager.ledger().is_empty());
        let kinds = rig.kinds();
        assert_eq!(kinds.last(), Some(&TaskEventKind::Completed));
        assert!(kinds.contains(&TaskEventKind::Unassigned));
    }

    #[test]
    fn repeated_failure_deletes() {
        let mut rig = Rig::new(1, flat(4, 4));
        let stub = Stub::new("flaky").fails_with(FailureReason::Other("boom".into()));
        let flags = stub.flags();
        let id = rig.add(stub);

        rig.step();
        assert!(rig.manager.contains(id));
        rig.step();
        assert!(!rig.manager.contains(id));
        assert_eq!(flags.scripts.get(), 2);
        assert_eq!(flags.dequeued.get(), 1);
        assert_eq!(rig.kinds().last(), Some(&TaskEventKind::Deleted));
    }

    #[test]
    fn auto_retry_keeps_failing_task() {
        let mut rig = Rig::new(1, flat(4, 4));
        let id = rig.add(Stub::new("stubborn").outcome(Status::Fail).with_meta(|m| m.auto_retry(true)));
        rig.run(6);
        assert!(rig.manager.contains(id));
        assert_eq!(rig.manager.info(id).map(|i| i.stats.failures), Some(6));
    }

    #[test]
    fn unreachable_player_task_is_cancelled_and_announced_once() {
        let mut rig = Rig::new(2, flat(4, 4));
        let stub = Stub::new("dig there")
            .fails_with(FailureReason::Unreachable)
            .with_meta(|m| m.origin(TaskOrigin::Player).max_assignable(2));
        let flags = stub.flags();
        let id = rig.add(stub);
        rig.run(3);

        assert!(!rig.manager.contains(id));
        assert_eq!(flags.dequeued.get(), 1);
        assert_eq!(rig.colony.world.announcements().len(), 1);
        assert_eq!(rig.kinds().iter().filter(|k| **k == TaskEventKind::Cancelled).count(), 1);
    }

    #[test]
    fn unreachable_automatic_task_follows_retry_rules() {
        let mut rig = Rig::new(1, flat(4, 4));
        let id = rig.add(Stub::new("auto").fails_with(FailureReason::Unreachable));
        rig.step();
        assert!(rig.manager.contains(id));
    }

    #[test]
    fn missing_script_counts_as_failure() {
        let mut rig = Rig::new(1, flat(4, 4));
        let id = rig.add(Stub::new("empty").no_script().with_meta(|m| m.auto_retry(true)));
        rig.step();
        assert!(rig.slots.get(AgentId(0)).is_none());
        assert_eq!(rig.manager.assigned_agents(id), Vec::<AgentId>::new());
        assert_eq!(rig.manager.info(id).map(|i| i.stats), Some(crate::TaskStats {
            assignments: 1,
            successes:   0,
            failures:    1,
        }));
        assert_eq!(rig.kinds(), vec![TaskEventKind::Enqueued, TaskEventKind::Failed]);
    }

    #[test]
    fn success_adds_boredom() {
        let mut rig = Rig::new(1, flat(4, 4));
        rig.add(Stub::new("chore").outcome(Status::Success).with_meta(|m| m.boredom_cost(0.5).auto_retry(true)));
        rig.run(2);
        assert!((rig.colony.agents.boredom[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn death_without_reassign_cancels() {
        let mut rig = Rig::new(2, flat(4, 4));
        let stub = Stub::new("escort").claim(V).with_meta(|m| m.reassign_on_death(false));
        let flags = stub.flags();
        let id = rig.add(stub);
        rig.step();

        assert_eq!(rig.manager.on_agent_death(AgentId(0)), Some(id));
        assert!(!rig.manager.contains(id));
        assert_eq!(flags.dequeued.get(), 1);
        assert!(rig.manager.ledger().is_empty());
    }

    #[test]
    fn death_with_reassign_hands_task_over() {
        let mut rig = Rig::new(2, flat(4, 4));
        let id = rig.add(Stub::new("haul"));
        rig.step();
        assert_eq!(rig.manager.assigned_agents(id), vec![AgentId(0)]);

        rig.colony.agents.status[0] = col_agent::AgentStatus::Dead;
        rig.manager.on_agent_death(AgentId(0));
        rig.step();
        assert_eq!(rig.manager.assigned_agents(id), vec![AgentId(1)]);
    }

    #[test]
    fn infeasible_assignee_is_dropped() {
        let mut rig = Rig::new(1, flat(4, 4));
        let stub = Stub::new("fickle").with_meta(|m| m.auto_retry(true));
        let flags = stub.flags();
        let id = rig.add(stub);
        rig.step();
        flags.feasible.set(false);
        rig.step();

        assert_eq!(rig.manager.assigned_agents(id), Vec::<AgentId>::new());
        assert_eq!(rig.finished, vec![(AgentId(0), Status::Fail, Some(FailureReason::Cancelled))]);
        assert!(rig.manager.contains(id));
    }

    #[test]
    fn sleeping_agents_are_not_assigned() {
        let mut rig = Rig::new(1, flat(4, 4));
        rig.colony.agents.status[0] = col_agent::AgentStatus::Sleeping;
        rig.add(Stub::new("night shift"));
        rig.step();
        assert!(rig.slots.get(AgentId(0)).is_none());
    }

    #[test]
    fn introspection() {
        let mut rig = Rig::new(1, flat(4, 4));
        let a = rig.add(Stub::new("a"));
        let b = rig.add(Stub::new("b"));
        rig.step();

        let infos: Vec<_> = rig.manager.tasks().map(|i| (i.id, i.meta.name.clone(), i.assigned)).collect();
        assert_eq!(infos, vec![(a, "a".to_string(), 1), (b, "b".to_string(), 0)]);
        assert_eq!(rig.manager.camera_zoom_location(a), None);
        assert_eq!(rig.manager.camera_zoom_location(TaskId(99)), None);
    }
}

#[cfg(test)]
mod idle_tests {
    use col_act::{Always, BoxAct, IntoBoxAct};
    use col_agent::AgentView;
    use col_core::{AgentId, AgentRng, VoxelCoord};
    use col_plan::{PlanAct, PlanGoal};

    use super::support::{Stub, Rig, flat};
    use crate::{Colony, IdleBehavior};

    struct Loiter;

    impl IdleBehavior for Loiter {
        fn idle_script(&mut self, _: &AgentView<'_>, _: &Colony, _: &mut AgentRng) -> Option<BoxAct<Colony>> {
            Some(Always::running().boxed())
        }
    }

    #[test]
    fn idle_script_yields_to_tasks() {
        let mut rig = Rig::new(1, flat(4, 4));
        rig.manager = crate::TaskManager::new(col_core::FactionId(0)).with_idle_behavior(Loiter);
        rig.step();
        let script = rig.slots.get(AgentId(0));
        assert!(script.is_some_and(|s| s.task().is_none()));

        let id = rig.add(Stub::new("work"));
        rig.step();
        assert_eq!(rig.slots.task_of(AgentId(0)), Some(id));
    }

    struct Wander;

    impl IdleBehavior for Wander {
        fn idle_script(&mut self, _: &AgentView<'_>, colony: &Colony, _: &mut AgentRng) -> Option<BoxAct<Colony>> {
            Some(PlanAct::new(PlanGoal::Exact(VoxelCoord::new(3, 0, 3)), colony.plan_settings).boxed())
        }
    }

    #[test]
    fn displaced_idle_script_leaves_no_plan_behind() {
        let mut rig = Rig::new(1, flat(4, 4));
        rig.manager = crate::TaskManager::new(col_core::FactionId(0)).with_idle_behavior(Wander);
        rig.step(); // idle plan submitted and solved
        assert_eq!(rig.colony.plans.inbox_len(AgentId(0)), 1);

        let id = rig.add(Stub::new("work"));
        rig.step();
        assert_eq!(rig.slots.task_of(AgentId(0)), Some(id));
        assert_eq!(rig.colony.plans.inbox_len(AgentId(0)), 0);
        assert_eq!(rig.colony.plans.pending_len(), 0);
        assert_eq!(rig.colony.plans.stats().cancelled, 1);
    }
}

#[cfg(test)]
mod kinds_tests {
    use col_core::{Affordances, AgentId, TaskId, Tick, VoxelCoord};

    use super::support::Rig;
    use crate::{
        DesignationKind, DesignationLedger, DigTask, GatherTask, GridWorld, ResourceKey, Task, TaskEnv, TaskError,
        TaskEventKind, TaskMeta, TaskOrigin, UNREACHABLE_COST, World,
    };

    #[test]
    fn dig_walks_over_and_removes_voxel() {
        let target = VoxelCoord::new(3, 0, 0);
        let mut rig = Rig::new(1, GridWorld::new(6, 3, 6).with_solid(target));
        let id = rig.add(DigTask::new(target).work_ticks(2));
        assert!(rig.manager.ledger().is_designated(ResourceKey::Voxel(target), DesignationKind::Dig));
        assert_eq!(rig.manager.camera_zoom_location(id), Some(target));

        rig.run(40);
        assert!(!rig.colony.world.is_solid(target));
        assert!(rig.colony.agents.position[0].is_adjacent(target));
        assert!(!rig.manager.contains(id));
        assert!(rig.manager.ledger().is_empty());
        let kinds = rig.kinds();
        assert!(kinds.contains(&TaskEventKind::Succeeded));
        assert_eq!(kinds.last(), Some(&TaskEventKind::Completed));
    }

    #[test]
    fn enclosed_dig_opens_up_when_a_neighbour_is_dug() {
        let target = VoxelCoord::new(2, 0, 2);
        let walls = [(1, 2), (3, 2), (2, 1), (2, 3)].map(|(x, z)| VoxelCoord::new(x, 0, z));
        let world = walls.iter().fold(GridWorld::new(5, 1, 5).with_solid(target), |w, &v| w.with_solid(v));
        let mut rig = Rig::new(1, world);
        let id = rig.add(DigTask::new(target).work_ticks(1));

        rig.run(3);
        assert!(rig.manager.assigned_agents(id).is_empty());

        rig.colony.world.set_solid(walls[2], false);
        rig.run(60);
        assert!(!rig.colony.world.is_solid(target));
        assert!(!rig.manager.contains(id));
    }

    #[test]
    fn dug_voxel_costs_unreachable() {
        let target = VoxelCoord::new(1, 0, 1);
        let mut rig = Rig::new(1, GridWorld::new(4, 2, 4).with_solid(target));
        let task = DigTask::new(target);
        let ledger = DesignationLedger::new();
        let agent = AgentId(0);

        let cost = |colony: &crate::Colony| {
            let view = colony.agent(agent).unwrap();
            task.compute_cost(&view, &TaskEnv::new(Tick::ZERO, TaskId(0), colony, &ledger))
        };
        assert_eq!(cost(&rig.colony), 2.0);

        rig.colony.world.set_solid(target, false);
        assert_eq!(cost(&rig.colony), UNREACHABLE_COST);
    }

    #[test]
    fn dig_rejects_open_voxel() {
        let mut rig = Rig::new(1, GridWorld::new(4, 2, 4));
        let err = rig.manager.add_task(DigTask::new(VoxelCoord::new(1, 0, 1)), &*rig.colony.world).unwrap_err();
        assert!(matches!(err, TaskError::Rejected(_)));
    }

    #[test]
    fn same_voxel_cannot_be_dug_twice() {
        let target = VoxelCoord::new(2, 0, 2);
        let mut rig = Rig::new(1, GridWorld::new(4, 2, 4).with_solid(target));
        rig.add(DigTask::new(target));
        let err = rig.manager.add_task(DigTask::new(target), &*rig.colony.world).unwrap_err();
        assert!(matches!(err, TaskError::DoubleDesignation { kind: DesignationKind::Dig, .. }));
    }

    #[test]
    fn unreachable_player_dig_is_cancelled_with_one_announcement() {
        // Floating voxel: none of its neighbours can be stood on by a walker.
        let target = VoxelCoord::new(4, 2, 4);
        let mut rig = Rig::new(1, GridWorld::new(8, 3, 8).with_solid(target));
        let meta = TaskMeta::new("dig the sky", col_core::TaskCategory::Dig).origin(TaskOrigin::Player);
        let id = rig.add(DigTask::new(target).with_meta(meta));

        rig.run(10);
        assert!(!rig.manager.contains(id));
        assert!(rig.manager.ledger().is_empty());
        assert!(rig.colony.world.is_solid(target));
        assert_eq!(rig.colony.world.announcements().len(), 1);
        let cancelled = rig.kinds().into_iter().filter(|k| *k == TaskEventKind::Cancelled).count();
        assert_eq!(cancelled, 1);
    }

    #[test]
    fn flyer_reaches_floating_voxel() {
        let target = VoxelCoord::new(4, 2, 4);
        let mut rig = Rig::new(1, GridWorld::new(8, 3, 8).with_solid(target));
        rig.colony.agents.affordances[0] = Affordances::FLY;
        let id = rig.add(DigTask::new(target).work_ticks(1));
        rig.run(40);
        assert!(!rig.manager.contains(id));
        assert!(!rig.colony.world.is_solid(target));
    }

    #[test]
    fn gather_collects_entity() {
        let mut world = GridWorld::new(6, 1, 6);
        let wood = world.spawn_entity("wood", VoxelCoord::new(4, 0, 2));
        let mut rig = Rig::new(1, world);
        let id = rig.add(GatherTask::new(wood, 3));
        assert_eq!(rig.manager.camera_zoom_location(id), Some(VoxelCoord::new(4, 0, 2)));

        rig.run(30);
        assert_eq!(rig.colony.agents.position[0], VoxelCoord::new(4, 0, 2));
        assert!(rig.colony.world.entity_position(wood).is_none());
        assert!(rig.colony.world.has_resources("wood", 3));
        assert!(!rig.manager.contains(id));
        assert!(rig.manager.ledger().is_empty());
    }

    #[test]
    fn gather_target_removed_elsewhere_completes_task() {
        let mut world = GridWorld::new(6, 1, 6);
        let wood = world.spawn_entity("wood", VoxelCoord::new(5, 0, 5));
        let mut rig = Rig::new(1, world);
        let id = rig.add(GatherTask::new(wood, 1));
        rig.step();

        rig.colony.world.remove_entity(wood);
        rig.step();
        assert!(!rig.manager.contains(id));
        assert!(!rig.colony.world.has_resources("wood", 1));
        assert!(rig.slots.get(AgentId(0)).is_none());
    }
}
