//! `col-core`: foundational types for the colony task scheduler.
//!
//! Every other `col-*` crate depends on this one.  It has no `col-*`
//! dependencies and only `rand` and `thiserror` (plus optional `serde`)
//! from the outside.
//!
//! # What lives here
//!
//! | Module          | Contents                                                    |
//! |-----------------|-------------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `TaskId`, `EntityId`, `RequestId`, `FactionId`   |
//! | [`voxel`]       | `VoxelCoord`, squared distance, neighbourhoods              |
//! | [`time`]        | `Tick`, `SimClock`, `SchedulerConfig`                       |
//! | [`rng`]         | `AgentRng` (per-agent deterministic RNG)                    |
//! | [`category`]    | `TaskCategory`, `TaskPriority`, `CategorySet`               |
//! | [`affordance`]  | `Affordances` movement capability set                       |
//! | [`error`]       | `CoreError`, `CoreResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod affordance;
pub mod category;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod voxel;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use affordance::Affordances;
pub use category::{CategorySet, TaskCategory, TaskPriority};
pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, EntityId, FactionId, RequestId, TaskId};
pub use rng::AgentRng;
pub use time::{SchedulerConfig, SimClock, Tick};
pub use voxel::VoxelCoord;
