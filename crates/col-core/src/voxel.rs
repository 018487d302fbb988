//! Integer voxel coordinates.
//!
//! The world is a grid of unit voxels; `y` is up.  Costs throughout the
//! scheduler are expressed as squared Euclidean distance between voxels so
//! no square root is ever taken on the hot path.

use std::fmt;

/// The six face-adjacent offsets, in a fixed order so searches are
/// deterministic.
const FACE_OFFSETS: [(i32, i32, i32); 6] = [
    ( 1,  0,  0),
    (-1,  0,  0),
    ( 0,  0,  1),
    ( 0,  0, -1),
    ( 0,  1,  0),
    ( 0, -1,  0),
];

/// A voxel position in world space.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoxelCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelCoord {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Translate by `(dx, dy, dz)`.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Squared Euclidean distance, as `f32` so it can be used as a cost.
    #[inline]
    pub fn distance_sq(self, other: VoxelCoord) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        let dz = (self.z - other.z) as f32;
        dx * dx + dy * dy + dz * dz
    }

    /// Manhattan distance; an admissible heuristic for 6-connected search.
    #[inline]
    pub fn manhattan(self, other: VoxelCoord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) + self.z.abs_diff(other.z)
    }

    /// The six face-adjacent voxels.
    pub fn neighbors(self) -> [VoxelCoord; 6] {
        FACE_OFFSETS.map(|(dx, dy, dz)| self.offset(dx, dy, dz))
    }

    /// `true` if `other` shares a face with `self`.
    #[inline]
    pub fn is_adjacent(self, other: VoxelCoord) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for VoxelCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
