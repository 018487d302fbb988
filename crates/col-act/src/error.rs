use thiserror::Error;

use crate::Slot;

/// Errors raised by blackboard access.
#[derive(Debug, Error)]
pub enum ActError {
    #[error("blackboard slot {0:?} is empty")]
    MissingValue(Slot),

    #[error("blackboard slot {0:?} holds a value of a different type")]
    WrongType(Slot),
}

pub type ActResult<T> = Result<T, ActError>;
