use thiserror::Error;

use col_core::{AgentId, VoxelCoord};

/// Why the planner could not produce a path.  Delivered inside a
/// [`PlanResponse`][crate::PlanResponse], never raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanFailure {
    #[error("no path to the goal exists")]
    NoPath,

    #[error("search budget exhausted after {expansions} expansions")]
    BudgetExhausted { expansions: u32 },

    #[error("start voxel {0} is not passable")]
    InvalidStart(VoxelCoord),
}

/// Misuse of the plan channel.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("plan request has no requester")]
    InvalidRequester,

    #[error("plan request from {0} has a zero search budget")]
    ZeroBudget(AgentId),
}

pub type PlanResult<T> = Result<T, PlanError>;
