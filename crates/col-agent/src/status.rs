//! Agent liveness status.

/// Whether an agent can currently act.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentStatus {
    #[default]
    Active,
    /// Asleep: keeps its slot but no task is feasible for it.
    Sleeping,
    /// Dead: never ticked or assigned again.
    Dead,
}

impl AgentStatus {
    #[inline]
    pub fn is_alive(self) -> bool {
        !matches!(self, AgentStatus::Dead)
    }

    #[inline]
    pub fn can_work(self) -> bool {
        matches!(self, AgentStatus::Active)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AgentStatus::Active   => "active",
            AgentStatus::Sleeping => "sleeping",
            AgentStatus::Dead     => "dead",
        }
    }
}
