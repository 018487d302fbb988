//! `col-task`: tasks, designations, and the per-faction task manager.
//!
//! A [`Task`] is a unit of work agents may be assigned to.  Each faction's
//! [`TaskManager`] owns its queued tasks and a [`DesignationLedger`] that
//! maps every claimed resource to the one task holding it.  Once per tick
//! the manager drops finished or hopeless tasks, then hands each idle agent
//! the cheapest feasible task and installs the act tree the task builds for
//! it as that agent's [`Script`].
//!
//! # Crate layout
//!
//! | Module          | Contents                                                        |
//! |-----------------|-----------------------------------------------------------------|
//! | [`task`]        | `Task` trait, `TaskMeta`, `TaskOrigin`, `Feasibility`, `TaskStats` |
//! | [`manager`]     | `TaskManager`, `TaskInfo`                                       |
//! | [`designation`] | `DesignationLedger`, `Claims`, `ResourceKey`, `DesignationKind` |
//! | [`script`]      | `Script`, `ScriptSlots`, `CancelToken`                          |
//! | [`colony`]      | `Colony` (act environment), `TaskEnv` (task callback view)      |
//! | [`world`]       | `World` trait, `WorldEvent`                                     |
//! | [`grid`]        | `GridWorld`: bounded in-memory voxel world                     |
//! | [`cache`]       | `FeasibilityCache`                                              |
//! | [`event`]       | `TaskEvent`, `TaskEventKind`                                    |
//! | [`idle`]        | `IdleBehavior`, `NoIdle`                                        |
//! | [`kinds`]       | `DigTask`, `GatherTask`                                         |
//! | [`error`]       | `TaskError`, `TaskResult<T>`                                    |
//!
//! # Designations
//!
//! Only code holding a [`Claims`] handle can change the ledger, and the
//! manager only hands one out inside `on_enqueued` and `on_dequeued`.  A
//! second claim on a held `(resource, kind)` pair is an error, and every
//! claim a task holds is released when it leaves the queue.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                          |
//! |-----------|-------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for the ledger maps.  |

pub mod cache;
pub mod colony;
pub mod designation;
pub mod error;
pub mod event;
pub mod grid;
pub mod idle;
pub mod kinds;
pub mod manager;
pub mod script;
pub mod task;
pub mod world;

#[cfg(test)]
mod tests;

pub use cache::FeasibilityCache;
pub use colony::{Colony, TaskEnv};
pub use designation::{Claims, DesignationKind, DesignationLedger, ResourceKey};
pub use error::{TaskError, TaskResult};
pub use event::{TaskEvent, TaskEventKind};
pub use grid::GridWorld;
pub use idle::{IdleBehavior, NoIdle};
pub use kinds::{DEFAULT_DIG_TICKS, DigTask, GatherTask};
pub use manager::{TaskInfo, TaskManager};
pub use script::{CancelToken, Script, ScriptSlots};
pub use task::{DEFAULT_MAX_FAILURES, Feasibility, Task, TaskMeta, TaskOrigin, TaskStats, UNREACHABLE_COST};
pub use world::{World, WorldEvent};
