//! Terrain and planner traits, plus the default A* implementation.
//!
//! # Pluggability
//!
//! The plan channel calls path search through the [`Planner`] trait and
//! reads terrain through [`Navigable`], so applications can swap in
//! hierarchical planners or their own voxel storage without touching the
//! scheduler.  [`AStarPlanner`] is the default.
//!
//! # Cost units
//!
//! Every move between face-neighbours costs [`Navigable::move_cost`] (one
//! by default).  Budgets count node expansions, not cost.

use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};

use col_core::{Affordances, VoxelCoord};

use crate::{Path, PlanFailure, PlanRequest};

// ── Navigable ─────────────────────────────────────────────────────────────────

/// Read-only terrain queried by planners.
///
/// `Sync` so a batch of requests can be solved on worker threads.
pub trait Navigable: Sync {
    /// Can an agent with `affordances` occupy `voxel`?
    fn is_passable(&self, voxel: VoxelCoord, affordances: Affordances) -> bool;

    /// Can an agent step from `from` to the face-neighbour `to`?
    fn can_traverse(&self, from: VoxelCoord, to: VoxelCoord, affordances: Affordances) -> bool {
        let _ = from;
        self.is_passable(to, affordances)
    }

    fn move_cost(&self, _from: VoxelCoord, _to: VoxelCoord) -> u32 {
        1
    }
}

// ── Planner trait ─────────────────────────────────────────────────────────────

/// Pluggable path search.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`; with the `parallel` feature the
/// channel solves requests concurrently on Rayon worker threads.
pub trait Planner: Send + Sync {
    /// Search for a path satisfying `request.goal`.
    ///
    /// A start that already satisfies the goal yields an empty path.
    fn plan(&self, nav: &dyn Navigable, request: &PlanRequest) -> Result<Path, PlanFailure>;
}

// ── AStarPlanner ──────────────────────────────────────────────────────────────

/// A* over the six face-neighbours of each voxel, guided by the goal's
/// Manhattan heuristic and bounded by the request's expansion budget.
#[derive(Copy, Clone, Debug, Default)]
pub struct AStarPlanner;

impl Planner for AStarPlanner {
    fn plan(&self, nav: &dyn Navigable, request: &PlanRequest) -> Result<Path, PlanFailure> {
        astar(nav, request)
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

fn astar(nav: &dyn Navigable, request: &PlanRequest) -> Result<Path, PlanFailure> {
    let start = request.start;
    let goal = request.goal;
    let aff = request.affordances;

    if !nav.is_passable(start, aff) {
        return Err(PlanFailure::InvalidStart(start));
    }
    if goal.is_satisfied(start) {
        return Ok(Path::default());
    }

    // g[v] = best known cost from start; prev[v] = voxel that reached v.
    let mut g:    HashMap<VoxelCoord, u32>        = HashMap::new();
    let mut prev: HashMap<VoxelCoord, VoxelCoord> = HashMap::new();
    g.insert(start, 0);

    // Min-heap on (f, g, voxel).  The voxel as last key keeps tie-breaking
    // deterministic.
    let mut heap: BinaryHeap<Reverse<(u32, u32, VoxelCoord)>> = BinaryHeap::new();
    heap.push(Reverse((goal.heuristic(start), 0, start)));

    let mut expansions = 0u32;
    while let Some(Reverse((_, cost, node))) = heap.pop() {
        // Skip stale heap entries.
        if g.get(&node).is_some_and(|&best| cost > best) {
            continue;
        }
        if goal.is_satisfied(node) {
            return Ok(reconstruct(&prev, start, node));
        }
        if expansions >= request.max_expansions {
            return Err(PlanFailure::BudgetExhausted { expansions });
        }
        expansions += 1;

        for next in node.neighbors() {
            if !nav.can_traverse(node, next, aff) {
                continue;
            }
            let new_cost = cost.saturating_add(nav.move_cost(node, next));
            let improved = match g.entry(next) {
                Entry::Vacant(slot) => {
                    slot.insert(new_cost);
                    true
                }
                Entry::Occupied(mut slot) if new_cost < *slot.get() => {
                    slot.insert(new_cost);
                    true
                }
                Entry::Occupied(_) => false,
            };
            if improved {
                prev.insert(next, node);
                heap.push(Reverse((new_cost.saturating_add(goal.heuristic(next)), new_cost, next)));
            }
        }
    }

    Err(PlanFailure::NoPath)
}

fn reconstruct(prev: &HashMap<VoxelCoord, VoxelCoord>, start: VoxelCoord, end: VoxelCoord) -> Path {
    let mut steps = Vec::new();
    let mut cur = end;
    while cur != start {
        steps.push(cur);
        match prev.get(&cur) {
            Some(&p) => cur = p,
            None     => break,
        }
    }
    steps.reverse();
    Path::new(steps)
}
