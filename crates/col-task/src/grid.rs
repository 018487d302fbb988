//! `GridWorld`: a bounded in-memory voxel world.
//!
//! Small enough for tests and demos: a box of voxels that are either solid
//! or open, a set of tagged entities, one shared stockpile, and a log of
//! announcements.
//!
//! # Movement rules
//!
//! An open voxel can be stood on if it is on the floor (`y == 0`) or has a
//! solid voxel below it.  Flyers can occupy any open voxel.  Changing level
//! requires `CLIMB` or `FLY`.

use std::collections::{BTreeMap, BTreeSet};

use col_agent::Inventory;
use col_core::{Affordances, EntityId, VoxelCoord};
use col_plan::Navigable;

use crate::{World, WorldEvent};

#[derive(Clone, Debug)]
struct Entity {
    tag:      String,
    position: VoxelCoord,
}

pub struct GridWorld {
    size:          VoxelCoord,
    solid:         BTreeSet<VoxelCoord>,
    entities:      BTreeMap<EntityId, Entity>,
    next_entity:   u32,
    stockpile:     Inventory,
    announcements: Vec<String>,
    events:        Vec<WorldEvent>,
}

impl GridWorld {
    /// An empty world spanning `0..x`, `0..y`, `0..z`.
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self {
            size:          VoxelCoord::new(x.max(1), y.max(1), z.max(1)),
            solid:         BTreeSet::new(),
            entities:      BTreeMap::new(),
            next_entity:   0,
            stockpile:     Inventory::new(),
            announcements: Vec::new(),
            events:        Vec::new(),
        }
    }

    pub fn size(&self) -> VoxelCoord {
        self.size
    }

    /// Make `voxel` solid without emitting an event (world setup).
    pub fn with_solid(mut self, voxel: VoxelCoord) -> Self {
        if self.is_valid(voxel) {
            self.solid.insert(voxel);
        }
        self
    }

    pub fn spawn_entity(&mut self, tag: impl Into<String>, position: VoxelCoord) -> EntityId {
        let id = EntityId(self.next_entity);
        self.next_entity += 1;
        self.entities.insert(id, Entity { tag: tag.into(), position });
        id
    }

    pub fn stockpile(&self) -> &Inventory {
        &self.stockpile
    }

    pub fn solid_count(&self) -> usize {
        self.solid.len()
    }
}

impl Navigable for GridWorld {
    fn is_passable(&self, voxel: VoxelCoord, affordances: Affordances) -> bool {
        if !self.is_valid(voxel) || self.solid.contains(&voxel) {
            return false;
        }
        affordances.contains(Affordances::FLY)
            || voxel.y == 0
            || self.solid.contains(&voxel.offset(0, -1, 0))
    }

    fn can_traverse(&self, from: VoxelCoord, to: VoxelCoord, affordances: Affordances) -> bool {
        let level_change = from.y != to.y;
        self.is_passable(to, affordances)
            && (!level_change
                || affordances.contains(Affordances::CLIMB)
                || affordances.contains(Affordances::FLY))
    }
}

impl World for GridWorld {
    fn navigable(&self) -> &dyn Navigable {
        self
    }

    fn is_valid(&self, v: VoxelCoord) -> bool {
        (0..self.size.x).contains(&v.x) && (0..self.size.y).contains(&v.y) && (0..self.size.z).contains(&v.z)
    }

    fn is_solid(&self, voxel: VoxelCoord) -> bool {
        self.solid.contains(&voxel)
    }

    fn set_solid(&mut self, voxel: VoxelCoord, solid: bool) {
        if !self.is_valid(voxel) {
            return;
        }
        let changed = if solid { self.solid.insert(voxel) } else { self.solid.remove(&voxel) };
        if changed {
            self.events.push(WorldEvent::VoxelChanged(voxel));
        }
    }

    fn entity_position(&self, entity: EntityId) -> Option<VoxelCoord> {
        self.entities.get(&entity).map(|e| e.position)
    }

    fn entity_tag(&self, entity: EntityId) -> Option<&str> {
        self.entities.get(&entity).map(|e| e.tag.as_str())
    }

    fn find_entity(&self, tag: &str, near: VoxelCoord) -> Option<EntityId> {
        self.entities
            .iter()
            .filter(|(_, e)| e.tag == tag)
            .min_by_key(|(id, e)| (e.position.manhattan(near), **id))
            .map(|(id, _)| *id)
    }

    fn remove_entity(&mut self, entity: EntityId) -> bool {
        let removed = self.entities.remove(&entity).is_some();
        if removed {
            self.events.push(WorldEvent::EntityRemoved(entity));
        }
        removed
    }

    fn has_resources(&self, tag: &str, count: u32) -> bool {
        self.stockpile.has(tag, count)
    }

    fn add_resources(&mut self, tag: &str, count: u32) {
        self.stockpile.add(tag, count);
    }

    fn take_resources(&mut self, tag: &str, count: u32) -> bool {
        self.stockpile.remove(tag, count)
    }

    fn announce(&mut self, message: String) {
        self.announcements.push(message);
    }

    fn announcements(&self) -> &[String] {
        &self.announcements
    }

    fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }
}
