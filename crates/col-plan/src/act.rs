//! Acts that talk to the plan channel and move agents along paths.

use col_act::{Act, ActContext, FAILURE_REASON, FailureReason, Key, Slot, Status, Timer};
use col_core::{Affordances, AgentId, RequestId, VoxelCoord};
use tracing::{debug, warn};

use crate::{Path, PlanChannel, PlanGoal, PlanRequest, request::DEFAULT_MAX_EXPANSIONS};

/// Where [`PlanAct`] leaves the path for [`FollowPath`].
pub const PATH: Key<Path> = Key::new(Slot::Path);

// ── PlanEnv ───────────────────────────────────────────────────────────────────

/// What the plan and movement acts need from their environment.
pub trait PlanEnv {
    fn plans(&mut self) -> &mut PlanChannel;

    fn position(&self, agent: AgentId) -> Option<VoxelCoord>;

    fn affordances(&self, agent: AgentId) -> Affordances;

    fn can_traverse(&self, from: VoxelCoord, to: VoxelCoord, affordances: Affordances) -> bool;

    /// Put `agent` on `to`.  `false` if the agent does not exist.
    fn move_agent(&mut self, agent: AgentId, to: VoxelCoord) -> bool;
}

// ── PlanSettings ──────────────────────────────────────────────────────────────

/// Timeout and retry knobs for [`PlanAct`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlanSettings {
    /// Ticks to wait for a response before resubmitting.
    pub timeout_ticks:  u64,
    /// Timeouts tolerated before the act fails.
    pub max_timeouts:   u32,
    pub max_expansions: u32,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self { timeout_ticks: 30, max_timeouts: 3, max_expansions: DEFAULT_MAX_EXPANSIONS }
    }
}

// ── PlanAct ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum PlanState {
    Idle,
    Waiting(RequestId),
    Done(Status),
}

/// Requests a path and waits for it without blocking.
///
/// Each tick it polls the channel.  If no answer arrives within
/// `timeout_ticks` the request is cancelled and resubmitted; after
/// `max_timeouts` timeouts the act fails.  A solver failure fails the act at
/// once.  Both failures record [`FailureReason::Unreachable`].  On success
/// the path is stored under [`PATH`].
pub struct PlanAct {
    goal:     PlanGoal,
    settings: PlanSettings,
    timer:    Timer,
    timeouts: u32,
    state:    PlanState,
    /// Request left waiting when the act was re-initialized.
    orphan:   Option<RequestId>,
}

impl PlanAct {
    pub fn new(goal: PlanGoal, settings: PlanSettings) -> Self {
        Self {
            goal,
            settings,
            timer:    Timer::new(settings.timeout_ticks),
            timeouts: 0,
            state:    PlanState::Idle,
            orphan:   None,
        }
    }

    /// Timeouts seen in the current run.
    pub fn timeouts(&self) -> u32 {
        self.timeouts
    }

    fn finish<E>(&mut self, ctx: &mut ActContext<'_, E>, status: Status) -> Status {
        if status == Status::Fail {
            ctx.blackboard.set(FAILURE_REASON, FailureReason::Unreachable);
        }
        self.state = PlanState::Done(status);
        status
    }

    fn submit<E: PlanEnv>(&mut self, ctx: &mut ActContext<'_, E>) -> Status {
        if let Some(orphan) = self.orphan.take() {
            ctx.env.plans().cancel(orphan);
        }
        let Some(start) = ctx.env.position(ctx.agent) else {
            return self.finish(ctx, Status::Fail);
        };
        let request = PlanRequest::new(ctx.agent, start, self.goal)
            .affordances(ctx.env.affordances(ctx.agent))
            .max_expansions(self.settings.max_expansions);

        match ctx.env.plans().submit(request) {
            Ok(id) => {
                self.timer.start(ctx.now);
                self.state = PlanState::Waiting(id);
                Status::Running
            }
            Err(e) => {
                warn!(agent = %ctx.agent, error = %e, "plan request rejected");
                self.finish(ctx, Status::Fail)
            }
        }
    }
}

impl<E: PlanEnv> Act<E> for PlanAct {
    fn name(&self) -> &str {
        "plan"
    }

    fn initialize(&mut self) {
        if let PlanState::Waiting(id) = self.state {
            self.orphan = Some(id);
        }
        self.timer.reset();
        self.timeouts = 0;
        self.state = PlanState::Idle;
    }

    fn tick(&mut self, ctx: &mut ActContext<'_, E>) -> Status {
        let id = match self.state {
            PlanState::Done(status) => return status,
            PlanState::Idle         => return self.submit(ctx),
            PlanState::Waiting(id)  => id,
        };

        if let Some(response) = ctx.env.plans().poll(ctx.agent, id) {
            return match response.outcome {
                Ok(path) => {
                    ctx.blackboard.set(PATH, path);
                    self.finish(ctx, Status::Success)
                }
                Err(why) => {
                    debug!(agent = %ctx.agent, %why, "no path");
                    self.finish(ctx, Status::Fail)
                }
            };
        }

        if !self.timer.is_expired(ctx.now) {
            return Status::Running;
        }

        ctx.env.plans().cancel(id);
        self.timeouts += 1;
        if self.timeouts >= self.settings.max_timeouts {
            debug!(agent = %ctx.agent, timeouts = self.timeouts, "plan timed out");
            return self.finish(ctx, Status::Fail);
        }
        self.submit(ctx)
    }
}

// ── FollowPath ────────────────────────────────────────────────────────────────

/// Walks the path stored under [`PATH`], one step every `ticks_per_step`
/// ticks.
///
/// Fails with [`FailureReason::Unreachable`] if the next step is no longer
/// traversable, and with [`FailureReason::Other`] if no path was stored.
pub struct FollowPath {
    ticks_per_step: u64,
    waited:         u64,
    index:          usize,
    path:           Option<Path>,
    failed:         bool,
}

impl FollowPath {
    pub fn new() -> Self {
        Self { ticks_per_step: 1, waited: 0, index: 0, path: None, failed: false }
    }

    /// Slow movement down to one step per `ticks` ticks (minimum 1).
    pub fn ticks_per_step(mut self, ticks: u64) -> Self {
        self.ticks_per_step = ticks.max(1);
        self
    }
}

impl Default for FollowPath {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: PlanEnv> Act<E> for FollowPath {
    fn name(&self) -> &str {
        "follow-path"
    }

    fn initialize(&mut self) {
        self.waited = 0;
        self.index = 0;
        self.path = None;
        self.failed = false;
    }

    fn tick(&mut self, ctx: &mut ActContext<'_, E>) -> Status {
        if self.failed {
            return Status::Fail;
        }
        if self.path.is_none() {
            match ctx.blackboard.take(PATH) {
                Some(path) => self.path = Some(path),
                None => {
                    ctx.blackboard.set(FAILURE_REASON, FailureReason::Other("no path to follow".into()));
                    self.failed = true;
                    return Status::Fail;
                }
            }
        }
        let Some(path) = &self.path else {
            return Status::Fail;
        };
        let Some(&next) = path.steps.get(self.index) else {
            return Status::Success;
        };

        self.waited += 1;
        if self.waited < self.ticks_per_step {
            return Status::Running;
        }
        self.waited = 0;

        let agent = ctx.agent;
        let affordances = ctx.env.affordances(agent);
        let moved = ctx.env.position(agent).is_some_and(|here| ctx.env.can_traverse(here, next, affordances))
            && ctx.env.move_agent(agent, next);
        if !moved {
            ctx.blackboard.set(FAILURE_REASON, FailureReason::Unreachable);
            self.failed = true;
            return Status::Fail;
        }

        self.index += 1;
        if self.index >= path.len() { Status::Success } else { Status::Running }
    }
}
