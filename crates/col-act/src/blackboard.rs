//! Typed key/value store shared by the nodes of one script.
//!
//! Keys are an enumerated [`Slot`] paired with the Rust type stored in it,
//! so a lookup through a [`Key<T>`] can only ever yield a `T`.  Values are
//! stored type-erased, the same way a component map keyed by `TypeId` would
//! hold them.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use crate::{ActError, ActResult};

// ── Slot ──────────────────────────────────────────────────────────────────────

/// Well-known blackboard locations.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Slot {
    /// A planned route (written by plan acts, read by path followers).
    Path,
    /// The voxel the current task is working on.
    TargetVoxel,
    /// The entity the current task is working on.
    TargetEntity,
    /// An item tag being carried or fetched.
    Item,
    /// Why the tree failed, when a node knows.
    FailureReason,
    /// Application-defined slots.
    Custom(u16),
}

// ── Key ───────────────────────────────────────────────────────────────────────

/// A [`Slot`] tagged with the type stored in it.
///
/// ```rust
/// use col_act::{Blackboard, Key, Slot};
///
/// const STEPS: Key<u32> = Key::new(Slot::Custom(0));
///
/// let mut bb = Blackboard::new();
/// bb.set(STEPS, 3);
/// assert_eq!(bb.get(STEPS), Some(&3));
/// ```
pub struct Key<T> {
    pub slot: Slot,
    _marker:  PhantomData<fn() -> T>,
}

impl<T> Key<T> {
    pub const fn new(slot: Slot) -> Self {
        Self { slot, _marker: PhantomData }
    }
}

impl<T> Clone for Key<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Key<T> {}

impl<T> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({:?})", self.slot)
    }
}

// ── FailureReason ─────────────────────────────────────────────────────────────

/// Why a script failed.  Written to [`FAILURE_REASON`] by whichever node
/// detected the failure; the task manager uses it when deciding to retry.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum FailureReason {
    /// No route to the target could be found.
    Unreachable,
    /// The target no longer exists or changed under the task.
    TargetGone,
    /// A domain guard stopped holding.
    Infeasible,
    /// The script was cancelled from outside.
    Cancelled,
    Other(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Unreachable => f.write_str("unreachable"),
            FailureReason::TargetGone  => f.write_str("target-gone"),
            FailureReason::Infeasible  => f.write_str("infeasible"),
            FailureReason::Cancelled   => f.write_str("cancelled"),
            FailureReason::Other(why)  => f.write_str(why),
        }
    }
}

pub const FAILURE_REASON: Key<FailureReason> = Key::new(Slot::FailureReason);

// ── Blackboard ────────────────────────────────────────────────────────────────

/// Per-script value store.
#[derive(Default)]
pub struct Blackboard {
    values: HashMap<Slot, Box<dyn Any>>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value`, replacing whatever was in the slot.
    pub fn set<T: 'static>(&mut self, key: Key<T>, value: T) {
        self.values.insert(key.slot, Box::new(value));
    }

    /// `None` if the slot is empty or holds another type.
    pub fn get<T: 'static>(&self, key: Key<T>) -> Option<&T> {
        self.values.get(&key.slot)?.downcast_ref::<T>()
    }

    pub fn get_mut<T: 'static>(&mut self, key: Key<T>) -> Option<&mut T> {
        self.values.get_mut(&key.slot)?.downcast_mut::<T>()
    }

    /// Like [`get`][Self::get] but tells an empty slot from a mistyped one.
    pub fn require<T: 'static>(&self, key: Key<T>) -> ActResult<&T> {
        match self.values.get(&key.slot) {
            None        => Err(ActError::MissingValue(key.slot)),
            Some(value) => value.downcast_ref::<T>().ok_or(ActError::WrongType(key.slot)),
        }
    }

    /// Remove and return the value.  A mistyped value is left in place.
    pub fn take<T: 'static>(&mut self, key: Key<T>) -> Option<T> {
        if !self.values.get(&key.slot)?.is::<T>() {
            return None;
        }
        let boxed = self.values.remove(&key.slot)?;
        boxed.downcast::<T>().ok().map(|b| *b)
    }

    #[inline]
    pub fn contains(&self, slot: Slot) -> bool {
        self.values.contains_key(&slot)
    }

    pub fn remove(&mut self, slot: Slot) -> bool {
        self.values.remove(&slot).is_some()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Blackboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut slots: Vec<_> = self.values.keys().collect();
        slots.sort_by_key(|s| format!("{s:?}"));
        f.debug_struct("Blackboard").field("slots", &slots).finish()
    }
}
