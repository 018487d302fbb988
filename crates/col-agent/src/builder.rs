//! Fluent builder for constructing `AgentStore` + `AgentRngs` in one step.
//!
//! ```rust
//! use col_agent::AgentStoreBuilder;
//! use col_core::{CategorySet, TaskCategory};
//!
//! let (store, rngs) = AgentStoreBuilder::new(4, 42)
//!     .permissions(CategorySet::EMPTY.with(TaskCategory::Dig))
//!     .build();
//!
//! assert_eq!(store.count, 4);
//! assert_eq!(rngs.len(), 4);
//! ```

use col_core::{Affordances, CategorySet, FactionId};

use crate::{AgentRngs, AgentStore};

/// Fluent builder for [`AgentStore`] + [`AgentRngs`].
///
/// Every agent starts at the origin, active, in faction 0, permitted every
/// category, walking only.  Per-agent values are written to the `pub` SoA
/// fields after building.
pub struct AgentStoreBuilder {
    count:       usize,
    seed:        u64,
    faction:     FactionId,
    permissions: CategorySet,
    affordances: Affordances,
}

impl AgentStoreBuilder {
    pub fn new(count: usize, seed: u64) -> Self {
        Self {
            count,
            seed,
            faction:     FactionId(0),
            permissions: CategorySet::all(),
            affordances: Affordances::default(),
        }
    }

    /// Faction every agent starts in.
    pub fn faction(mut self, faction: FactionId) -> Self {
        self.faction = faction;
        self
    }

    /// Categories every agent is permitted to perform.
    pub fn permissions(mut self, permissions: CategorySet) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn affordances(mut self, affordances: Affordances) -> Self {
        self.affordances = affordances;
        self
    }

    pub fn build(self) -> (AgentStore, AgentRngs) {
        let store = AgentStore::new(self.count, self.faction, self.permissions, self.affordances);
        let rngs = AgentRngs::new(self.count, self.seed);
        (store, rngs)
    }
}
