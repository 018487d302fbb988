//! The `Act` trait: the extension point for leaf behaviors.

use col_core::{AgentId, AgentRng, Tick};

use crate::{Blackboard, Status};

/// Everything an act can touch during one tick.
///
/// Built by the owner of the tree for each tick and dropped afterwards, so
/// acts never hold on to world borrows across frames.
pub struct ActContext<'a, E> {
    /// The agent this tree belongs to.
    pub agent: AgentId,

    /// The current frame.
    pub now: Tick,

    /// The shared environment (world, agents, plan channel, …).
    pub env: &'a mut E,

    /// Values passed between nodes of this tree.
    pub blackboard: &'a mut Blackboard,

    /// The agent's deterministic RNG.
    pub rng: &'a mut AgentRng,
}

impl<'a, E> ActContext<'a, E> {
    #[inline]
    pub fn new(
        agent:      AgentId,
        now:        Tick,
        env:        &'a mut E,
        blackboard: &'a mut Blackboard,
        rng:        &'a mut AgentRng,
    ) -> Self {
        Self { agent, now, env, blackboard, rng }
    }
}

/// A node of a per-agent behavior tree.
///
/// Implementors keep whatever progress state they need in `self`, reset it
/// in [`initialize`][Self::initialize], and advance it by at most one step
/// per [`tick`][Self::tick].  `tick` must never block.
///
/// # Example
///
/// ```rust
/// use col_act::{Act, ActContext, Status};
///
/// /// Succeeds after being ticked `n` times.
/// struct CountDown { n: u32, left: u32 }
///
/// impl<E> Act<E> for CountDown {
///     fn initialize(&mut self) {
///         self.left = self.n;
///     }
///
///     fn tick(&mut self, _ctx: &mut ActContext<'_, E>) -> Status {
///         if self.left <= 1 {
///             return Status::Success;
///         }
///         self.left -= 1;
///         Status::Running
///     }
/// }
/// ```
pub trait Act<E> {
    /// Short label for logs.
    fn name(&self) -> &str {
        "act"
    }

    /// Reset to the start-of-run state.  Called before the first tick and
    /// again whenever a parent restarts this node.
    fn initialize(&mut self) {}

    /// Advance one step.
    fn tick(&mut self, ctx: &mut ActContext<'_, E>) -> Status;
}

/// An owned, type-erased act.  Parents own their children through this.
pub type BoxAct<E> = Box<dyn Act<E>>;

impl<E> Act<E> for BoxAct<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn initialize(&mut self) {
        (**self).initialize();
    }

    fn tick(&mut self, ctx: &mut ActContext<'_, E>) -> Status {
        (**self).tick(ctx)
    }
}

/// `act.boxed()` sugar for building trees.
pub trait IntoBoxAct<E> {
    fn boxed(self) -> BoxAct<E>;
}

impl<E, A: Act<E> + 'static> IntoBoxAct<E> for A {
    #[inline]
    fn boxed(self) -> BoxAct<E> {
        Box::new(self)
    }
}
