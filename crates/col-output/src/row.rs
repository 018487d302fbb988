//! Plain data row types written by output backends.

/// One task lifecycle event.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskEventRow {
    pub tick:    u64,
    pub faction: u16,
    pub task:    u64,
    pub name:    String,
    pub kind:    &'static str,
    /// `u32::MAX` when the event concerns no particular agent.
    pub agent:   u32,
    /// Empty when no failure reason was recorded.
    pub reason:  String,
}

/// Summary statistics for one scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:           u64,
    pub elapsed_ms:     u64,
    pub scripts_ticked: u64,
    pub succeeded:      u64,
    pub failed:         u64,
    pub queued_tasks:   u64,
    pub plans_solved:   u64,
    pub plans_pending:  u64,
}

/// One agent's state at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id: u32,
    pub tick:     u64,
    pub x:        i32,
    pub y:        i32,
    pub z:        i32,
    pub status:   &'static str,
    /// Task the agent's script is running; `u64::MAX` for none.
    pub task:     u64,
    pub boredom:  f32,
}
