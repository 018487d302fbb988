//! Plan requests, responses, goals and paths.

use col_core::{Affordances, AgentId, RequestId, VoxelCoord};

use crate::PlanFailure;

/// Default node-expansion budget for a single search.
pub const DEFAULT_MAX_EXPANSIONS: u32 = 4096;

// ── PlanGoal ──────────────────────────────────────────────────────────────────

/// Where a search may stop.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PlanGoal {
    /// Stand on this voxel.
    Exact(VoxelCoord),
    /// Stand on a face-neighbour of this voxel (e.g. to dig it).
    Adjacent(VoxelCoord),
    /// Stand anywhere within `radius` (Manhattan) of `center`.
    Within { center: VoxelCoord, radius: u32 },
}

impl PlanGoal {
    /// The voxel the goal is built around.
    pub fn anchor(&self) -> VoxelCoord {
        match *self {
            PlanGoal::Exact(v) | PlanGoal::Adjacent(v) => v,
            PlanGoal::Within { center, .. } => center,
        }
    }

    #[inline]
    pub fn is_satisfied(&self, at: VoxelCoord) -> bool {
        match *self {
            PlanGoal::Exact(v)               => at == v,
            PlanGoal::Adjacent(v)            => at.is_adjacent(v),
            PlanGoal::Within { center, radius } => at.manhattan(center) <= radius,
        }
    }

    /// Admissible lower bound on the number of unit steps to the goal.
    #[inline]
    pub fn heuristic(&self, at: VoxelCoord) -> u32 {
        match *self {
            PlanGoal::Exact(v)               => at.manhattan(v),
            PlanGoal::Adjacent(v)            => at.manhattan(v).saturating_sub(1),
            PlanGoal::Within { center, radius } => at.manhattan(center).saturating_sub(radius),
        }
    }
}

// ── Path ──────────────────────────────────────────────────────────────────────

/// An ordered route.  `steps` excludes the start voxel and ends on a voxel
/// that satisfies the goal; an empty path means the start already did.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Path {
    pub steps: Vec<VoxelCoord>,
}

impl Path {
    pub fn new(steps: Vec<VoxelCoord>) -> Self {
        Self { steps }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Final voxel, or `None` for an empty path.
    pub fn destination(&self) -> Option<VoxelCoord> {
        self.steps.last().copied()
    }
}

// ── PlanRequest ───────────────────────────────────────────────────────────────

/// A path query.  The `id` is assigned by
/// [`PlanChannel::submit`][crate::PlanChannel::submit].
#[derive(Clone, Debug)]
pub struct PlanRequest {
    pub id:             RequestId,
    /// Whose inbox the response is delivered to.
    pub requester:      AgentId,
    pub start:          VoxelCoord,
    pub goal:           PlanGoal,
    pub affordances:    Affordances,
    /// Maximum nodes the planner may expand before giving up.
    pub max_expansions: u32,
}

impl PlanRequest {
    pub fn new(requester: AgentId, start: VoxelCoord, goal: PlanGoal) -> Self {
        Self {
            id: RequestId::INVALID,
            requester,
            start,
            goal,
            affordances: Affordances::default(),
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }

    pub fn affordances(mut self, affordances: Affordances) -> Self {
        self.affordances = affordances;
        self
    }

    pub fn max_expansions(mut self, max_expansions: u32) -> Self {
        self.max_expansions = max_expansions;
        self
    }
}

// ── PlanResponse ──────────────────────────────────────────────────────────────

/// The single answer to a [`PlanRequest`].
#[derive(Clone, Debug, PartialEq)]
pub struct PlanResponse {
    pub id:        RequestId,
    pub requester: AgentId,
    pub outcome:   Result<Path, PlanFailure>,
}

impl PlanResponse {
    #[inline]
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}
