//! Synthetic quarry world used by the demo.

use col_core::{EntityId, VoxelCoord};
use col_task::GridWorld;

pub const WIDTH: i32 = 16;
pub const DEPTH: i32 = 16;

/// A 16 × 4 × 16 floor with a rock face along the far wall and a few loose
/// stones scattered in front of it.
///
/// Returns the world, the rock face voxels, and the stones.
pub fn build_quarry() -> (GridWorld, Vec<VoxelCoord>, Vec<EntityId>) {
    let face: Vec<VoxelCoord> = (2..WIDTH - 2)
        .flat_map(|x| (0..2).map(move |y| VoxelCoord::new(x, y, DEPTH - 1)))
        .collect();

    let mut world = face.iter().fold(GridWorld::new(WIDTH, 4, DEPTH), |w, &v| w.with_solid(v));

    let stones = [(3, 6), (8, 9), (12, 4)]
        .into_iter()
        .map(|(x, z)| world.spawn_entity("stone", VoxelCoord::new(x, 0, z)))
        .collect();

    (world, face, stones)
}
