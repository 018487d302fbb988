//! Movement affordances: which kinds of voxel an agent can traverse.
//!
//! Planners consult the requester's affordances so that, for example, a bird
//! can path through open air while a dwarf needs solid ground underfoot.

/// A small bit set of movement capabilities.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Affordances(u8);

impl Affordances {
    pub const NONE:  Affordances = Affordances(0);
    /// Move across the top of solid ground.
    pub const WALK:  Affordances = Affordances(1 << 0);
    /// Move vertically along solid walls.
    pub const CLIMB: Affordances = Affordances(1 << 1);
    /// Move through open air.
    pub const FLY:   Affordances = Affordances(1 << 2);
    /// Move through water.
    pub const SWIM:  Affordances = Affordances(1 << 3);

    /// `true` if every capability in `other` is present.
    #[inline]
    pub fn contains(self, other: Affordances) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn union(self, other: Affordances) -> Affordances {
        Affordances(self.0 | other.0)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Default for Affordances {
    /// Walking only.
    fn default() -> Self {
        Affordances::WALK
    }
}

impl std::ops::BitOr for Affordances {
    type Output = Affordances;
    #[inline]
    fn bitor(self, rhs: Affordances) -> Affordances {
        self.union(rhs)
    }
}
