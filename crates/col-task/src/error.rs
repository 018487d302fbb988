use thiserror::Error;

use col_core::{AgentId, CoreError, TaskId};

use crate::{DesignationKind, ResourceKey};

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("{key} already carries a {kind:?} designation held by {holder}")]
    DoubleDesignation {
        key:    ResourceKey,
        kind:   DesignationKind,
        holder: TaskId,
    },

    #[error("task {0} is not queued")]
    UnknownTask(TaskId),

    #[error("agent {0} is not in the colony")]
    UnknownAgent(AgentId),

    #[error("task rejected: {0}")]
    Rejected(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type TaskResult<T> = Result<T, TaskError>;
