use col_core::{AgentId, CoreError, FactionId};
use col_task::TaskError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchedError {
    #[error("scheduler configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("no task manager for faction {0}")]
    UnknownFaction(FactionId),

    #[error("agent {0} is not in the colony")]
    UnknownAgent(AgentId),

    #[error(transparent)]
    Task(#[from] TaskError),
}

pub type SchedResult<T> = Result<T, SchedError>;
