//! `col-sched`: tick loop orchestrator for the colony task scheduler.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Broadcast: drain WorldEvents and hand them to every queued task.
//!   ② Manage:    each faction's TaskManager drops finished tasks and
//!                 assigns idle agents (ascending FactionId).
//!   ③ Act:       tick every live agent's script once (ascending AgentId);
//!                 report finished scripts to the agent's manager.
//!   ④ Plan:      solve up to plan_budget_per_tick pending plan requests.
//! ```
//!
//! Everything runs on one thread except the optional plan batch; acts and
//! task callbacks never block.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | Solves each tick's plan batch on Rayon's thread pool.    |
//! | `fx-hash`  | FxHash for the designation ledgers.                      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use col_agent::AgentStoreBuilder;
//! use col_core::{FactionId, SchedulerConfig, VoxelCoord};
//! use col_plan::AStarPlanner;
//! use col_sched::{NoopObserver, SchedulerBuilder};
//! use col_task::{DigTask, GridWorld};
//!
//! let (store, rngs) = AgentStoreBuilder::new(4, 42).build();
//! let world = GridWorld::new(16, 4, 16).with_solid(VoxelCoord::new(5, 0, 5));
//! let mut sched = SchedulerBuilder::new(config, store, rngs, world, AStarPlanner).build()?;
//! sched.add_task(FactionId(0), DigTask::new(VoxelCoord::new(5, 0, 5)))?;
//! sched.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod scheduler;


pub use builder::SchedulerBuilder;
pub use error::{SchedError, SchedResult};
pub use observer::{NoopObserver, SchedulerObserver, TickSummary};
pub use scheduler::Scheduler;
