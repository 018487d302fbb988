//! Memoised target validity, invalidated by world events.

use col_core::{EntityId, VoxelCoord};

use crate::WorldEvent;

/// Caches the agent-independent half of a feasibility check ("is my target
/// still there?") until a relevant [`WorldEvent`] arrives.
#[derive(Clone, Debug, Default)]
pub struct FeasibilityCache {
    valid:    Option<bool>,
    voxels:   Vec<VoxelCoord>,
    entities: Vec<EntityId>,
}

impl FeasibilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate when `voxel` changes.
    pub fn watch_voxel(mut self, voxel: VoxelCoord) -> Self {
        self.voxels.push(voxel);
        self
    }

    /// Invalidate when `entity` is removed.
    pub fn watch_entity(mut self, entity: EntityId) -> Self {
        self.entities.push(entity);
        self
    }

    /// The cached value, computing it with `check` on a miss.
    pub fn get_or_compute(&mut self, check: impl FnOnce() -> bool) -> bool {
        *self.valid.get_or_insert_with(check)
    }

    pub fn cached(&self) -> Option<bool> {
        self.valid
    }

    pub fn invalidate(&mut self) {
        self.valid = None;
    }

    /// Invalidate if `event` concerns a watched resource.  Returns `true` if
    /// it did.
    pub fn on_event(&mut self, event: &WorldEvent) -> bool {
        let relevant = self.voxels.iter().any(|v| event.touches_voxel(*v))
            || self.entities.iter().any(|e| event.touches_entity(*e));
        if relevant {
            self.invalidate();
        }
        relevant
    }
}
