//! `col-plan`: asynchronous path planning for acts.
//!
//! Acts never search for paths themselves.  A [`PlanAct`] submits a
//! [`PlanRequest`] to the [`PlanChannel`] and reports `Running` while it
//! polls; the scheduler pumps the channel once per tick with a [`Planner`]
//! over the world's [`Navigable`] terrain.  The answer lands in the
//! requester's inbox, where the act picks it up on a later tick and stores
//! the [`Path`] for a [`FollowPath`] to walk.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`request`]  | `PlanGoal`, `PlanRequest`, `PlanResponse`, `Path`          |
//! | [`planner`]  | `Navigable`, `Planner`, `AStarPlanner`                     |
//! | [`channel`]  | `PlanChannel`, `ChannelStats`                              |
//! | [`act`]      | `PlanEnv`, `PlanSettings`, `PlanAct`, `FollowPath`, `PATH` |
//! | [`error`]    | `PlanFailure`, `PlanError`, `PlanResult<T>`                |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | Solves each pumped batch on Rayon's thread pool.         |

pub mod act;
pub mod channel;
pub mod error;
pub mod planner;
pub mod request;


pub use act::{FollowPath, PATH, PlanAct, PlanEnv, PlanSettings};
pub use channel::{ChannelStats, PlanChannel};
pub use error::{PlanError, PlanFailure, PlanResult};
pub use planner::{AStarPlanner, Navigable, Planner};
pub use request::{Path, PlanGoal, PlanRequest, PlanResponse};
