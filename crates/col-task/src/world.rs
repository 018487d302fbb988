//! The world collaborator seen by tasks and acts.
//!
//! Voxel storage, entities, and stockpiles belong to the host application.
//! The scheduler only needs the queries below plus a stream of change
//! notifications, which it drains once per tick and broadcasts to every
//! queued task so they can invalidate cached feasibility.

use col_core::{EntityId, VoxelCoord};
use col_plan::Navigable;

/// A fire-and-forget change notification.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum WorldEvent {
    /// A voxel changed material (dug out, built, collapsed, …).
    VoxelChanged(VoxelCoord),
    /// An entity left the world.
    EntityRemoved(EntityId),
}

impl WorldEvent {
    /// Does this event concern `voxel`?
    pub fn touches_voxel(&self, voxel: VoxelCoord) -> bool {
        matches!(*self, WorldEvent::VoxelChanged(v) if v == voxel)
    }

    pub fn touches_entity(&self, entity: EntityId) -> bool {
        matches!(*self, WorldEvent::EntityRemoved(e) if e == entity)
    }
}

/// Host-provided world.
///
/// Read queries are used by feasibility and cost functions; the mutating
/// methods are called by leaf acts.  Every mutation must push the matching
/// [`WorldEvent`].
pub trait World: Navigable {
    /// This world as plain terrain, for the planner.
    fn navigable(&self) -> &dyn Navigable;

    /// `true` if `voxel` lies inside the world.
    fn is_valid(&self, voxel: VoxelCoord) -> bool;

    fn is_solid(&self, voxel: VoxelCoord) -> bool;

    fn set_solid(&mut self, voxel: VoxelCoord, solid: bool);

    fn entity_position(&self, entity: EntityId) -> Option<VoxelCoord>;

    fn entity_tag(&self, entity: EntityId) -> Option<&str>;

    /// Nearest entity carrying `tag` (Manhattan distance, lowest id on ties).
    fn find_entity(&self, tag: &str, near: VoxelCoord) -> Option<EntityId>;

    fn remove_entity(&mut self, entity: EntityId) -> bool;

    /// Does the shared stockpile hold at least `count` of `tag`?
    fn has_resources(&self, tag: &str, count: u32) -> bool;

    fn add_resources(&mut self, tag: &str, count: u32);

    /// Take `count` of `tag` from the stockpile; `false` and no change if
    /// there is not enough.
    fn take_resources(&mut self, tag: &str, count: u32) -> bool;

    /// Player-facing message sink.
    fn announce(&mut self, message: String);

    /// Messages announced so far, for worlds that keep them.
    fn announcements(&self) -> &[String] {
        &[]
    }

    /// Events since the last drain, oldest first.
    fn drain_events(&mut self) -> Vec<WorldEvent>;
}
