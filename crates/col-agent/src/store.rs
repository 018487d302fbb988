//! Core agent storage: `AgentStore` (SoA data) and `AgentRngs` (per-agent RNG).
//!
//! RNGs live in their own struct so the scheduler can hold `&mut AgentRngs`
//! for the agent being ticked while acts mutate `AgentStore` through the
//! shared colony environment.

use col_core::{AgentId, AgentRng, Affordances, CategorySet, FactionId, VoxelCoord};

use crate::{AgentStatus, AgentView, Inventory};

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, indexed by `AgentId`.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all agent state.
///
/// Every `Vec` has exactly `count` elements and `AgentId` is the index into
/// all of them.  Dead agents keep their slot so IDs stay stable.
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Current voxel position.
    pub position: Vec<VoxelCoord>,

    /// Active / sleeping / dead.
    pub status: Vec<AgentStatus>,

    /// Team the agent works for; selects which task queue it draws from.
    pub faction: Vec<FactionId>,

    /// Task categories the agent is allowed to perform.
    pub permissions: Vec<CategorySet>,

    /// Movement capabilities handed to the planner.
    pub affordances: Vec<Affordances>,

    /// Carried items.
    pub inventory: Vec<Inventory>,

    /// Accumulated boredom; completed tasks add their boredom cost here.
    pub boredom: Vec<f32>,
}

impl AgentStore {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// `true` if `agent` indexes a slot in this store.
    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        agent.index() < self.count
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    #[inline]
    pub fn is_alive(&self, agent: AgentId) -> bool {
        self.contains(agent) && self.status[agent.index()].is_alive()
    }

    /// Read-only snapshot of one agent, or `None` for an out-of-range ID.
    pub fn view(&self, agent: AgentId) -> Option<AgentView<'_>> {
        if !self.contains(agent) {
            return None;
        }
        let i = agent.index();
        Some(AgentView {
            id:          agent,
            position:    self.position[i],
            status:      self.status[i],
            faction:     self.faction[i],
            permissions: self.permissions[i],
            affordances: self.affordances[i],
            inventory:   &self.inventory[i],
            boredom:     self.boredom[i],
        })
    }

    pub(crate) fn new(
        count:       usize,
        faction:     FactionId,
        permissions: CategorySet,
        affordances: Affordances,
    ) -> Self {
        Self {
            count,
            position:    vec![VoxelCoord::default(); count],
            status:      vec![AgentStatus::Active; count],
            faction:     vec![faction; count],
            permissions: vec![permissions; count],
            affordances: vec![affordances; count],
            inventory:   vec![Inventory::default(); count],
            boredom:     vec![0.0; count],
        }
    }
}
