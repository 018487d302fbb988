//! Task lifecycle events, buffered by the manager for observers.

use std::fmt;

use col_act::FailureReason;
use col_core::{AgentId, FactionId, TaskId, Tick};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TaskEventKind {
    /// Added to the queue (`on_enqueued` succeeded).
    Enqueued,
    /// An agent took the task and received a script.
    Assigned,
    /// An agent stopped working on the task without finishing a run
    /// (infeasible, died, or the script was cancelled).
    Unassigned,
    /// An agent's script succeeded.
    Succeeded,
    /// An agent's script failed or could not be built.
    Failed,
    /// Left the queue because its completion predicate held.
    Completed,
    /// Left the queue because its delete/retry predicates said so.
    Deleted,
    /// Left the queue by explicit cancellation or agent death.
    Cancelled,
}

impl TaskEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskEventKind::Enqueued   => "enqueued",
            TaskEventKind::Assigned   => "assigned",
            TaskEventKind::Unassigned => "unassigned",
            TaskEventKind::Succeeded  => "succeeded",
            TaskEventKind::Failed     => "failed",
            TaskEventKind::Completed  => "completed",
            TaskEventKind::Deleted    => "deleted",
            TaskEventKind::Cancelled  => "cancelled",
        }
    }

    /// `true` for the kinds that remove the task from the queue.
    pub fn is_removal(self) -> bool {
        matches!(self, TaskEventKind::Completed | TaskEventKind::Deleted | TaskEventKind::Cancelled)
    }
}

impl fmt::Display for TaskEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TaskEvent {
    pub tick:    Tick,
    pub faction: FactionId,
    pub task:    TaskId,
    pub name:    String,
    pub kind:    TaskEventKind,
    pub agent:   Option<AgentId>,
    pub reason:  Option<FailureReason>,
}
