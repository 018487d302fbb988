//! Strongly typed identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they work as `BTreeMap`/`HashMap` keys
//! without ceremony.  Agent and faction IDs are dense indices into SoA
//! storage; task and request IDs are monotonically allocated and never reused
//! within a run.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of an agent (colonist or creature) in SoA storage.
    pub struct AgentId(u32);
}

typed_id! {
    /// Identity of a live task inside one `TaskManager`.
    pub struct TaskId(u64);
}

typed_id! {
    /// Identity of a world entity (tree, item, animal, …).
    pub struct EntityId(u32);
}

typed_id! {
    /// Identity of one plan request; pairs a response with its request.
    pub struct RequestId(u64);
}

typed_id! {
    /// Index of a faction (team); each faction owns one task queue.
    pub struct FactionId(u16);
}

impl TaskId {
    /// The ID allocated after `self`.
    #[inline]
    pub fn next(self) -> TaskId {
        TaskId(self.0 + 1)
    }
}

impl RequestId {
    #[inline]
    pub fn next(self) -> RequestId {
        RequestId(self.0 + 1)
    }
}
