//! `col-agent`: Structure-of-Arrays agent storage for the colony scheduler.
//!
//! Agents are an external collaborator of the scheduler: it only needs their
//! position, capabilities, sleep/death status, and inventory.  This crate
//! models exactly that surface.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`status`]      | `AgentStatus` (`Active`, `Sleeping`, `Dead`)              |
//! | [`inventory`]   | `Inventory`: tagged item counts                          |
//! | [`store`]       | `AgentStore` (SoA arrays), `AgentRngs` (per-agent RNG)    |
//! | [`view`]        | `AgentView`: read-only snapshot handed to tasks          |
//! | [`builder`]     | `AgentStoreBuilder` (fluent construction)                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on value types.          |

pub mod builder;
pub mod inventory;
pub mod status;
pub mod store;
pub mod view;

#[cfg(test)]
mod tests;

pub use builder::AgentStoreBuilder;
pub use inventory::Inventory;
pub use status::AgentStatus;
pub use store::{AgentRngs, AgentStore};
pub use view::AgentView;
