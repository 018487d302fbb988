//! Installed act trees and the per-agent slots that hold them.

use std::cell::Cell;
use std::rc::Rc;

use col_act::{ActContext, Blackboard, BoxAct, FAILURE_REASON, FailureReason, Status};
use col_core::{AgentId, AgentRng, TaskId, Tick};

use crate::Colony;

// ── CancelToken ───────────────────────────────────────────────────────────────

/// Shared flag that makes a script fail on its next tick.
///
/// The manager keeps a clone for every agent it assigned, so cancelling a
/// task never has to reach into the tree itself.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn cancel(&self) {
        self.0.set(true);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

// ── Script ────────────────────────────────────────────────────────────────────

/// An agent's active act tree plus the state that travels with it.
pub struct Script {
    /// `None` for idle-behavior scripts.
    task:       Option<TaskId>,
    root:       BoxAct<Colony>,
    blackboard: Blackboard,
    cancel:     CancelToken,
    started:    Tick,
    finished:   Option<Status>,
}

impl Script {
    /// Wrap and initialize `root`.
    pub fn new(task: Option<TaskId>, mut root: BoxAct<Colony>, now: Tick) -> Self {
        root.initialize();
        Self {
            task,
            root,
            blackboard: Blackboard::new(),
            cancel:     CancelToken::new(),
            started:    now,
            finished:   None,
        }
    }

    pub fn task(&self) -> Option<TaskId> {
        self.task
    }

    pub fn name(&self) -> &str {
        self.root.name()
    }

    pub fn started(&self) -> Tick {
        self.started
    }

    pub fn token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    /// Recorded failure reason, if any node left one.
    pub fn failure_reason(&self) -> Option<&FailureReason> {
        self.blackboard.get(FAILURE_REASON)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// `true` once the tree reported a terminal status or was cancelled.
    pub fn is_finished(&self) -> bool {
        self.finished.is_some() || self.is_cancelled()
    }

    /// Advance the tree by one tick.
    ///
    /// A cancelled script reports `Fail` without ticking the tree and records
    /// [`FailureReason::Cancelled`].
    pub fn tick(&mut self, agent: AgentId, now: Tick, colony: &mut Colony, rng: &mut AgentRng) -> Status {
        if let Some(done) = self.finished {
            return done;
        }
        if self.cancel.is_cancelled() {
            self.blackboard.set(FAILURE_REASON, FailureReason::Cancelled);
            self.finished = Some(Status::Fail);
            return Status::Fail;
        }

        let mut ctx = ActContext::new(agent, now, colony, &mut self.blackboard, rng);
        let status = self.root.tick(&mut ctx);
        if status.is_terminal() {
            self.finished = Some(status);
        }
        status
    }
}

// ── ScriptSlots ───────────────────────────────────────────────────────────────

/// One optional script per agent, indexed by `AgentId`.
pub struct ScriptSlots {
    slots:     Vec<Option<Script>>,
    /// Agents whose unfinished script was replaced since the last drain.
    displaced: Vec<AgentId>,
}

impl ScriptSlots {
    pub fn new(count: usize) -> Self {
        Self { slots: (0..count).map(|_| None).collect(), displaced: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, agent: AgentId) -> Option<&Script> {
        self.slots.get(agent.index())?.as_ref()
    }

    pub fn get_mut(&mut self, agent: AgentId) -> Option<&mut Script> {
        self.slots.get_mut(agent.index())?.as_mut()
    }

    /// Install `script`, returning whatever it replaced.
    ///
    /// Replacing a script that had not finished records `agent` for
    /// [`drain_displaced`][Self::drain_displaced].
    pub fn install(&mut self, agent: AgentId, script: Script) -> Option<Script> {
        let old = self.slots.get_mut(agent.index())?.replace(script);
        if old.as_ref().is_some_and(|s| !s.is_finished()) {
            self.displaced.push(agent);
        }
        old
    }

    /// Agents whose running script was replaced.  Whatever those scripts
    /// left outstanding (plan requests) belongs to nobody now.
    pub fn drain_displaced(&mut self) -> Vec<AgentId> {
        std::mem::take(&mut self.displaced)
    }

    pub fn take(&mut self, agent: AgentId) -> Option<Script> {
        self.slots.get_mut(agent.index())?.take()
    }

    /// Can the manager hand `agent` a task?  True for an empty slot, a script
    /// that already reported its result, or an idle-behavior script.
    ///
    /// A cancelled script that has not been ticked yet keeps its agent busy
    /// until it reports `Fail`.
    pub fn is_idle(&self, agent: AgentId) -> bool {
        match self.get(agent) {
            None         => true,
            Some(script) => script.finished.is_some() || script.task.is_none(),
        }
    }

    /// The task `agent` is currently running, if any.
    pub fn task_of(&self, agent: AgentId) -> Option<TaskId> {
        self.get(agent).and_then(|s| if s.is_finished() { None } else { s.task })
    }
}
