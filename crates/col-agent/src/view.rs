//! Read-only agent snapshot.

use col_core::{AgentId, Affordances, CategorySet, FactionId, TaskCategory, VoxelCoord};

use crate::{AgentStatus, Inventory};

/// Everything a task may inspect about one agent when judging feasibility,
/// computing cost, or building a script.
#[derive(Clone, Copy, Debug)]
pub struct AgentView<'a> {
    pub id:          AgentId,
    pub position:    VoxelCoord,
    pub status:      AgentStatus,
    pub faction:     FactionId,
    pub permissions: CategorySet,
    pub affordances: Affordances,
    pub inventory:   &'a Inventory,
    pub boredom:     f32,
}

impl AgentView<'_> {
    /// Awake, alive, and permitted to do `category` work.
    #[inline]
    pub fn can_perform(&self, category: TaskCategory) -> bool {
        self.status.can_work() && self.permissions.contains(category)
    }
}
