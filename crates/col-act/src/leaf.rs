//! Small general-purpose acts.

use crate::{Act, ActContext, BoxAct, Status, Timer};

// ── Condition ─────────────────────────────────────────────────────────────────

/// Succeeds or fails immediately depending on a predicate.
pub struct Condition<E> {
    name:      String,
    predicate: Box<dyn FnMut(&ActContext<'_, E>) -> bool>,
}

impl<E> Condition<E> {
    pub fn new(
        name:      impl Into<String>,
        predicate: impl FnMut(&ActContext<'_, E>) -> bool + 'static,
    ) -> Self {
        Self { name: name.into(), predicate: Box::new(predicate) }
    }
}

impl<E> Act<E> for Condition<E> {
    fn name(&self) -> &str {
        &self.name
    }

    fn tick(&mut self, ctx: &mut ActContext<'_, E>) -> Status {
        Status::from_bool((self.predicate)(&*ctx))
    }
}

// ── Call ──────────────────────────────────────────────────────────────────────

/// Runs a closure every tick and reports whatever it returns.
///
/// The closure carries any state it needs; `initialize` does not reset it.
/// Use [`Wrap`][crate::Wrap] for restartable multi-step procedures.
pub struct Call<E> {
    name: String,
    f:    Box<dyn FnMut(&mut ActContext<'_, E>) -> Status>,
}

impl<E> Call<E> {
    pub fn new(
        name: impl Into<String>,
        f:    impl FnMut(&mut ActContext<'_, E>) -> Status + 'static,
    ) -> Self {
        Self { name: name.into(), f: Box::new(f) }
    }
}

impl<E> Act<E> for Call<E> {
    fn name(&self) -> &str {
        &self.name
    }

    fn tick(&mut self, ctx: &mut ActContext<'_, E>) -> Status {
        (self.f)(ctx)
    }
}

// ── Wait ──────────────────────────────────────────────────────────────────────

/// Runs for `ticks` ticks after its first tick, then succeeds.
///
/// `Wait::new(0)` succeeds on its first tick.
pub struct Wait {
    timer: Timer,
}

impl Wait {
    pub fn new(ticks: u64) -> Self {
        Self { timer: Timer::new(ticks) }
    }
}

impl<E> Act<E> for Wait {
    fn name(&self) -> &str {
        "wait"
    }

    fn initialize(&mut self) {
        self.timer.reset();
    }

    fn tick(&mut self, ctx: &mut ActContext<'_, E>) -> Status {
        if !self.timer.is_started() {
            self.timer.start(ctx.now);
        }
        if self.timer.is_expired(ctx.now) { Status::Success } else { Status::Running }
    }
}

// ── Always ────────────────────────────────────────────────────────────────────

/// Reports a fixed status every tick.
#[derive(Copy, Clone, Debug)]
pub struct Always(pub Status);

impl Always {
    pub fn success() -> Self {
        Always(Status::Success)
    }

    pub fn fail() -> Self {
        Always(Status::Fail)
    }

    /// Never finishes.
    pub fn running() -> Self {
        Always(Status::Running)
    }
}

impl<E> Act<E> for Always {
    fn name(&self) -> &str {
        self.0.as_str()
    }

    fn tick(&mut self, _ctx: &mut ActContext<'_, E>) -> Status {
        self.0
    }
}

// ── Invert ────────────────────────────────────────────────────────────────────

/// Swaps its child's `Success` and `Fail`.
pub struct Invert<E> {
    child:   BoxAct<E>,
    entered: bool,
}

impl<E> Invert<E> {
    pub fn new(child: BoxAct<E>) -> Self {
        Self { child, entered: false }
    }
}

impl<E> Act<E> for Invert<E> {
    fn name(&self) -> &str {
        "invert"
    }

    fn initialize(&mut self) {
        self.entered = false;
    }

    fn tick(&mut self, ctx: &mut ActContext<'_, E>) -> Status {
        if !self.entered {
            self.child.initialize();
            self.entered = true;
        }
        match self.child.tick(ctx) {
            Status::Running => Status::Running,
            Status::Success => Status::Fail,
            Status::Fail    => Status::Success,
        }
    }
}
