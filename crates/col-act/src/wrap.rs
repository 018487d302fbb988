//! Adapting externally written step functions into acts.

use crate::{Act, ActContext, Status};

/// One instance of a lazy step sequence.  Each call advances one step;
/// `None` means the sequence is exhausted.
pub type Steps<E> = Box<dyn FnMut(&mut ActContext<'_, E>) -> Option<Status>>;

/// Box a step closure.
pub fn steps<E, F>(f: F) -> Steps<E>
where
    F: FnMut(&mut ActContext<'_, E>) -> Option<Status> + 'static,
{
    Box::new(f)
}

/// Turns a lazy sequence of [`Status`] values into an act.
///
/// The factory is called to produce a fresh sequence on the first tick
/// after each `initialize`, so the only way to restart a `Wrap` is to
/// initialize it again.  The act finishes on the first terminal status the
/// sequence yields.  A sequence that runs out without one counts as
/// success.  Infinite sequences are allowed.
///
/// ```rust
/// use col_act::{Status, Wrap};
///
/// // Two running steps, then done.
/// let act: Wrap<()> = Wrap::statuses("three-step", || {
///     [Status::Running, Status::Running, Status::Success].into_iter()
/// });
/// ```
pub struct Wrap<E> {
    name:    String,
    factory: Box<dyn FnMut() -> Steps<E>>,
    steps:   Option<Steps<E>>,
    done:    Option<Status>,
}

impl<E: 'static> Wrap<E> {
    pub fn new(
        name:    impl Into<String>,
        factory: impl FnMut() -> Steps<E> + 'static,
    ) -> Self {
        Self { name: name.into(), factory: Box::new(factory), steps: None, done: None }
    }

    /// Wrap a factory of context-free status iterators.
    pub fn statuses<I, F>(name: impl Into<String>, mut factory: F) -> Self
    where
        I: Iterator<Item = Status> + 'static,
        F: FnMut() -> I + 'static,
    {
        Self::new(name, move || {
            let mut iter = factory();
            steps(move |_| iter.next())
        })
    }
}

impl<E> Act<E> for Wrap<E> {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self) {
        self.steps = None;
        self.done = None;
    }

    fn tick(&mut self, ctx: &mut ActContext<'_, E>) -> Status {
        if let Some(done) = self.done {
            return done;
        }
        let current = self.steps.get_or_insert_with(|| (self.factory)());
        let status = current(ctx).unwrap_or(Status::Success);
        if status.is_terminal() {
            self.done = Some(status);
            self.steps = None;
        }
        status
    }
}
