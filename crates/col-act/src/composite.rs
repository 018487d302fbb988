//! Composite acts: nodes that own and schedule children.
//!
//! Every composite initializes a child on first entry rather than up front,
//! ticks at most the children it is currently running, and latches its
//! terminal status until it is initialized again.

use crate::{Act, ActContext, BoxAct, FAILURE_REASON, FailureReason, Status};

// ── Sequence ──────────────────────────────────────────────────────────────────

/// Runs children in order, one active child per tick.
///
/// Fails as soon as a child fails; succeeds once the last child succeeds.
/// Advancing to the next child costs one tick, so a sequence of `n`
/// immediately-successful children succeeds on tick `n`.  An empty sequence
/// succeeds immediately.
pub struct Sequence<E> {
    children: Vec<BoxAct<E>>,
    current:  usize,
    entered:  bool,
    done:     Option<Status>,
}

impl<E> Sequence<E> {
    pub fn new(children: Vec<BoxAct<E>>) -> Self {
        Self { children, current: 0, entered: false, done: None }
    }

    /// Index of the child that will be ticked next.
    pub fn current(&self) -> usize {
        self.current
    }
}

impl<E> Act<E> for Sequence<E> {
    fn name(&self) -> &str {
        "sequence"
    }

    fn initialize(&mut self) {
        self.current = 0;
        self.entered = false;
        self.done = None;
    }

    fn tick(&mut self, ctx: &mut ActContext<'_, E>) -> Status {
        if let Some(done) = self.done {
            return done;
        }
        let Some(child) = self.children.get_mut(self.current) else {
            self.done = Some(Status::Success);
            return Status::Success;
        };
        if !self.entered {
            child.initialize();
            self.entered = true;
        }

        match child.tick(ctx) {
            Status::Running => Status::Running,
            Status::Fail => {
                self.done = Some(Status::Fail);
                Status::Fail
            }
            Status::Success => {
                self.current += 1;
                self.entered = false;
                if self.current >= self.children.len() {
                    self.done = Some(Status::Success);
                    Status::Success
                } else {
                    Status::Running
                }
            }
        }
    }
}

// ── Select ────────────────────────────────────────────────────────────────────

/// Tries children in order until one succeeds.
///
/// Succeeds with the first successful child, without initializing or
/// ticking any later one.  Fails once every child has failed.  An empty
/// select fails immediately.
pub struct Select<E> {
    children: Vec<BoxAct<E>>,
    current:  usize,
    entered:  bool,
    done:     Option<Status>,
}

impl<E> Select<E> {
    pub fn new(children: Vec<BoxAct<E>>) -> Self {
        Self { children, current: 0, entered: false, done: None }
    }

    pub fn current(&self) -> usize {
        self.current
    }
}

impl<E> Act<E> for Select<E> {
    fn name(&self) -> &str {
        "select"
    }

    fn initialize(&mut self) {
        self.current = 0;
        self.entered = false;
        self.done = None;
    }

    fn tick(&mut self, ctx: &mut ActContext<'_, E>) -> Status {
        if let Some(done) = self.done {
            return done;
        }
        let Some(child) = self.children.get_mut(self.current) else {
            self.done = Some(Status::Fail);
            return Status::Fail;
        };
        if !self.entered {
            child.initialize();
            self.entered = true;
        }

        match child.tick(ctx) {
            Status::Running => Status::Running,
            Status::Success => {
                self.done = Some(Status::Success);
                Status::Success
            }
            Status::Fail => {
                self.current += 1;
                self.entered = false;
                if self.current >= self.children.len() {
                    self.done = Some(Status::Fail);
                    Status::Fail
                } else {
                    Status::Running
                }
            }
        }
    }
}

// ── Parallel ──────────────────────────────────────────────────────────────────

/// When a [`Parallel`] reports success.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum ParallelPolicy {
    /// Succeed once every child has succeeded.
    #[default]
    AllSucceed,
    /// Succeed as soon as any child succeeds; the rest are abandoned.
    FirstSuccess,
}

/// Ticks every unfinished child on every tick.
///
/// Any child failing fails the whole node under either policy.  Children
/// that already finished are not ticked again.  An empty parallel succeeds.
pub struct Parallel<E> {
    children: Vec<BoxAct<E>>,
    results:  Vec<Status>,
    policy:   ParallelPolicy,
    started:  bool,
    done:     Option<Status>,
}

impl<E> Parallel<E> {
    pub fn new(policy: ParallelPolicy, children: Vec<BoxAct<E>>) -> Self {
        let results = vec![Status::Running; children.len()];
        Self { children, results, policy, started: false, done: None }
    }

    pub fn policy(&self) -> ParallelPolicy {
        self.policy
    }
}

impl<E> Act<E> for Parallel<E> {
    fn name(&self) -> &str {
        "parallel"
    }

    fn initialize(&mut self) {
        self.results.fill(Status::Running);
        self.started = false;
        self.done = None;
    }

    fn tick(&mut self, ctx: &mut ActContext<'_, E>) -> Status {
        if let Some(done) = self.done {
            return done;
        }
        if !self.started {
            self.children.iter_mut().for_each(|c| c.initialize());
            self.started = true;
        }

        for (child, result) in self.children.iter_mut().zip(self.results.iter_mut()) {
            if result.is_terminal() {
                continue;
            }
            *result = child.tick(ctx);
            match (*result, self.policy) {
                (Status::Fail, _) => {
                    self.done = Some(Status::Fail);
                    return Status::Fail;
                }
                (Status::Success, ParallelPolicy::FirstSuccess) => {
                    self.done = Some(Status::Success);
                    return Status::Success;
                }
                _ => {}
            }
        }

        if self.results.iter().all(|r| *r == Status::Success) {
            self.done = Some(Status::Success);
            Status::Success
        } else {
            Status::Running
        }
    }
}

// ── Domain ────────────────────────────────────────────────────────────────────

/// Guard predicate evaluated by [`Domain`] before every tick of its child.
pub type Guard<E> = Box<dyn FnMut(&ActContext<'_, E>) -> bool>;

/// Runs a child only while a condition holds.
///
/// The predicate is checked on every tick, before the child.  The first
/// time it returns `false` the domain fails without ticking the child and
/// records [`FailureReason::Infeasible`] on the blackboard.
pub struct Domain<E> {
    predicate: Guard<E>,
    child:     BoxAct<E>,
    entered:   bool,
    done:      Option<Status>,
}

impl<E> Domain<E> {
    pub fn new(
        predicate: impl FnMut(&ActContext<'_, E>) -> bool + 'static,
        child:     BoxAct<E>,
    ) -> Self {
        Self { predicate: Box::new(predicate), child, entered: false, done: None }
    }
}

impl<E> Act<E> for Domain<E> {
    fn name(&self) -> &str {
        "domain"
    }

    fn initialize(&mut self) {
        self.entered = false;
        self.done = None;
    }

    fn tick(&mut self, ctx: &mut ActContext<'_, E>) -> Status {
        if let Some(done) = self.done {
            return done;
        }
        if !(self.predicate)(&*ctx) {
            ctx.blackboard.set(FAILURE_REASON, FailureReason::Infeasible);
            self.done = Some(Status::Fail);
            return Status::Fail;
        }
        if !self.entered {
            self.child.initialize();
            self.entered = true;
        }

        let status = self.child.tick(ctx);
        if status.is_terminal() {
            self.done = Some(status);
        }
        status
    }
}

// ── Repeat ────────────────────────────────────────────────────────────────────

/// How many runs a [`Repeat`] performs.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RepeatLimit {
    Times(u32),
    Forever,
}

/// Re-runs its child, re-initializing it between runs.
///
/// A finished run costs the tick it finished on; the next run starts on
/// the following tick.  With `stop_on_failure` a failed run fails the
/// repeat; otherwise failures count as completed runs.  `Times(n)`
/// succeeds after `n` completed runs, `Forever` never finishes on its own
/// and its run count saturates at `u32::MAX`.
pub struct Repeat<E> {
    child:           BoxAct<E>,
    limit:           RepeatLimit,
    stop_on_failure: bool,
    pub(crate) completed: u32,
    entered:         bool,
    done:            Option<Status>,
}

impl<E> Repeat<E> {
    pub fn new(limit: RepeatLimit, child: BoxAct<E>) -> Self {
        Self { child, limit, stop_on_failure: false, completed: 0, entered: false, done: None }
    }

    /// Fail the whole repeat on the first failed run.
    pub fn stop_on_failure(mut self) -> Self {
        self.stop_on_failure = true;
        self
    }

    /// Runs finished since the last `initialize`.
    pub fn completed(&self) -> u32 {
        self.completed
    }
}

impl<E> Act<E> for Repeat<E> {
    fn name(&self) -> &str {
        "repeat"
    }

    fn initialize(&mut self) {
        self.completed = 0;
        self.entered = false;
        self.done = None;
    }

    fn tick(&mut self, ctx: &mut ActContext<'_, E>) -> Status {
        if let Some(done) = self.done {
            return done;
        }
        if self.limit == RepeatLimit::Times(0) {
            self.done = Some(Status::Success);
            return Status::Success;
        }
        if !self.entered {
            self.child.initialize();
            self.entered = true;
        }

        match self.child.tick(ctx) {
            Status::Running => Status::Running,
            Status::Fail if self.stop_on_failure => {
                self.done = Some(Status::Fail);
                Status::Fail
            }
            Status::Success | Status::Fail => {
                self.completed = self.completed.saturating_add(1);
                self.entered = false;
                match self.limit {
                    RepeatLimit::Times(n) if self.completed >= n => {
                        self.done = Some(Status::Success);
                        Status::Success
                    }
                    _ => Status::Running,
                }
            }
        }
    }
}
