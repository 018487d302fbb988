//! Task categories, priorities, and per-agent category permissions.

use std::fmt;

/// What kind of work a task represents.
///
/// Agents carry a [`CategorySet`] of the categories they are permitted to
/// perform; a task whose category is not in the set is infeasible for them.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TaskCategory {
    Dig,
    BuildBlock,
    BuildZone,
    BuildObject,
    Chop,
    Craft,
    Gather,
    Plant,
    Wrangle,
    Attack,
    Cook,
    Research,
    Other,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 13] = [
        TaskCategory::Dig,
        TaskCategory::BuildBlock,
        TaskCategory::BuildZone,
        TaskCategory::BuildObject,
        TaskCategory::Chop,
        TaskCategory::Craft,
        TaskCategory::Gather,
        TaskCategory::Plant,
        TaskCategory::Wrangle,
        TaskCategory::Attack,
        TaskCategory::Cook,
        TaskCategory::Research,
        TaskCategory::Other,
    ];

    #[inline]
    fn bit(self) -> u16 {
        1 << (self as u16)
    }

    /// Lower-case label used in logs and CSV output.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskCategory::Dig         => "dig",
            TaskCategory::BuildBlock  => "build_block",
            TaskCategory::BuildZone   => "build_zone",
            TaskCategory::BuildObject => "build_object",
            TaskCategory::Chop        => "chop",
            TaskCategory::Craft       => "craft",
            TaskCategory::Gather      => "gather",
            TaskCategory::Plant       => "plant",
            TaskCategory::Wrangle     => "wrangle",
            TaskCategory::Attack      => "attack",
            TaskCategory::Cook        => "cook",
            TaskCategory::Research    => "research",
            TaskCategory::Other       => "other",
        }
    }

    /// Typical concurrency cap for tasks of this category.  Individual tasks
    /// may override it.
    pub fn default_max_assignable(self) -> u32 {
        match self {
            TaskCategory::Attack | TaskCategory::Wrangle => 3,
            TaskCategory::BuildZone | TaskCategory::BuildObject => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── TaskPriority ──────────────────────────────────────────────────────────────

/// Ordered task priority.  `Eventually < Low < Medium < High < Urgent`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TaskPriority {
    Eventually,
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

// ── CategorySet ───────────────────────────────────────────────────────────────

/// A compact set of [`TaskCategory`] values (one bit per category).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategorySet(u16);

impl CategorySet {
    pub const EMPTY: CategorySet = CategorySet(0);

    /// Every category permitted.
    pub fn all() -> Self {
        TaskCategory::ALL.into_iter().collect()
    }

    #[inline]
    pub fn contains(self, category: TaskCategory) -> bool {
        self.0 & category.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, category: TaskCategory) {
        self.0 |= category.bit();
    }

    #[inline]
    pub fn remove(&mut self, category: TaskCategory) {
        self.0 &= !category.bit();
    }

    /// Builder-style insert.
    #[inline]
    pub fn with(mut self, category: TaskCategory) -> Self {
        self.insert(category);
        self
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<TaskCategory> for CategorySet {
    fn from_iter<I: IntoIterator<Item = TaskCategory>>(iter: I) -> Self {
        let mut set = CategorySet::EMPTY;
        for category in iter {
            set.insert(category);
        }
        set
    }
}
