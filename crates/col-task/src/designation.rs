//! The designation ledger: exclusive claims on world resources.
//!
//! A designation maps a `(ResourceKey, DesignationKind)` pair to the one
//! task holding it.  The ledger is owned by a [`TaskManager`] and can only
//! be written through a [`Claims`] handle, which the manager hands to a
//! task's `on_enqueued` / `on_dequeued` hooks.  Everything else gets
//! read-only access.
//!
//! [`TaskManager`]: crate::TaskManager

use std::fmt;

use col_core::{EntityId, TaskId, VoxelCoord};

use crate::{TaskError, TaskResult};

#[cfg(feature = "fx-hash")]
type LedgerMap = rustc_hash::FxHashMap<(ResourceKey, DesignationKind), TaskId>;
#[cfg(not(feature = "fx-hash"))]
type LedgerMap = std::collections::HashMap<(ResourceKey, DesignationKind), TaskId>;

// ── Keys ──────────────────────────────────────────────────────────────────────

/// A claimable world resource.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum ResourceKey {
    Voxel(VoxelCoord),
    Entity(EntityId),
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKey::Voxel(v)  => write!(f, "voxel {v}"),
            ResourceKey::Entity(e) => write!(f, "{e}"),
        }
    }
}

/// What the claim is for.  One resource may carry one designation of each
/// kind at the same time.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum DesignationKind {
    Dig,
    Build,
    Chop,
    Gather,
    Plant,
    Wrangle,
    Attack,
    Craft,
}

// ── DesignationLedger ─────────────────────────────────────────────────────────

#[derive(Default)]
pub struct DesignationLedger {
    claims: LedgerMap,
}

impl DesignationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// The task holding `(key, kind)`, if any.
    #[inline]
    pub fn holder(&self, key: ResourceKey, kind: DesignationKind) -> Option<TaskId> {
        self.claims.get(&(key, kind)).copied()
    }

    #[inline]
    pub fn is_designated(&self, key: ResourceKey, kind: DesignationKind) -> bool {
        self.claims.contains_key(&(key, kind))
    }

    /// Every claim held by `task`, sorted.
    pub fn held_by(&self, task: TaskId) -> Vec<(ResourceKey, DesignationKind)> {
        let mut held: Vec<_> = self
            .claims
            .iter()
            .filter(|(_, holder)| **holder == task)
            .map(|(pair, _)| *pair)
            .collect();
        held.sort();
        held
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub(crate) fn register(&mut self, key: ResourceKey, kind: DesignationKind, task: TaskId) -> TaskResult<()> {
        match self.holder(key, kind) {
            Some(holder) if holder == task => Ok(()),
            Some(holder) => Err(TaskError::DoubleDesignation { key, kind, holder }),
            None => {
                self.claims.insert((key, kind), task);
                Ok(())
            }
        }
    }

    /// Release `(key, kind)` if `task` holds it.
    pub(crate) fn release(&mut self, key: ResourceKey, kind: DesignationKind, task: TaskId) -> bool {
        if self.holder(key, kind) == Some(task) {
            self.claims.remove(&(key, kind));
            true
        } else {
            false
        }
    }

    pub(crate) fn release_all(&mut self, task: TaskId) -> usize {
        let before = self.claims.len();
        self.claims.retain(|_, holder| *holder != task);
        before - self.claims.len()
    }
}

// ── Claims ────────────────────────────────────────────────────────────────────

/// Write access to the ledger on behalf of a single task.
///
/// Only the task manager can create one, and only while running that task's
/// lifecycle hooks.
pub struct Claims<'a> {
    ledger: &'a mut DesignationLedger,
    task:   TaskId,
}

impl<'a> Claims<'a> {
    pub(crate) fn new(ledger: &'a mut DesignationLedger, task: TaskId) -> Self {
        Self { ledger, task }
    }

    /// The task these claims are made for.
    pub fn task(&self) -> TaskId {
        self.task
    }

    /// Designate `(key, kind)` for this task.
    ///
    /// Fails with [`TaskError::DoubleDesignation`] if another task already
    /// holds the pair.  Claiming a pair this task already holds is a no-op.
    pub fn claim(&mut self, key: ResourceKey, kind: DesignationKind) -> TaskResult<()> {
        self.ledger.register(key, kind, self.task)
    }

    pub fn release(&mut self, key: ResourceKey, kind: DesignationKind) -> bool {
        self.ledger.release(key, kind, self.task)
    }

    /// Release everything this task holds.
    pub fn release_all(&mut self) -> usize {
        self.ledger.release_all(self.task)
    }

    pub fn holder(&self, key: ResourceKey, kind: DesignationKind) -> Option<TaskId> {
        self.ledger.holder(key, kind)
    }
}
