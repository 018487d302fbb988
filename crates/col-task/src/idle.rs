//! Fallback behavior for agents with nothing to do.

use col_act::BoxAct;
use col_agent::AgentView;
use col_core::AgentRng;

use crate::Colony;

/// Builds an untasked script for an agent that found no feasible task.
///
/// Idle scripts are replaced as soon as a task becomes available.
pub trait IdleBehavior {
    fn idle_script(&mut self, agent: &AgentView<'_>, colony: &Colony, rng: &mut AgentRng) -> Option<BoxAct<Colony>>;
}

/// Leaves idle agents alone.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoIdle;

impl IdleBehavior for NoIdle {
    fn idle_script(&mut self, _: &AgentView<'_>, _: &Colony, _: &mut AgentRng) -> Option<BoxAct<Colony>> {
        None
    }
}
