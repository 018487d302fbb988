//! `col-act`: the cooperative behavior-tree engine.
//!
//! An [`Act`] is a resumable state machine.  The owning agent calls
//! [`Act::tick`] exactly once per frame; each call advances one step and
//! reports [`Status::Running`], [`Status::Success`], or [`Status::Fail`].
//! Nothing here ever blocks: an act waiting on a timer, on movement, or on a
//! plan response simply reports `Running` and is ticked again next frame.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                        |
//! |-----------------|-----------------------------------------------------------------|
//! | [`status`]      | `Status` tri-state result                                       |
//! | [`act`]         | `Act` trait, `BoxAct`, `ActContext`, `IntoBoxAct`               |
//! | [`composite`]   | `Sequence`, `Select`, `Parallel`, `Domain`, `Repeat`            |
//! | [`wrap`]        | `Wrap`: adapts an external lazy sequence of `Status`           |
//! | [`leaf`]        | `Condition`, `Call`, `Wait`, `Always`, `Invert`                 |
//! | [`blackboard`]  | `Blackboard`, `Key<T>`, `Slot`, `FailureReason`                 |
//! | [`timer`]       | `Timer`: tick-based deadline                                   |
//! | [`error`]       | `ActError`, `ActResult<T>`                                      |
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized ──initialize()──▶ Running ──tick()…──▶ Success | Fail
//!        ▲                                                    │
//!        └────────────────── initialize() ◀───────────────────┘
//! ```
//!
//! Composites initialize a child only when they first enter it, so branches
//! of a `Select` that are never reached are never initialized.  Once an act
//! has reported a terminal status it keeps reporting it, without ticking its
//! children, until it is initialized again.
//!
//! The engine is generic over an environment type `E` (the world the acts
//! operate on).  The scheduler instantiates it with its `Colony`; tests use
//! plain counters.

pub mod act;
pub mod blackboard;
pub mod composite;
pub mod error;
pub mod leaf;
pub mod status;
pub mod timer;
pub mod wrap;


pub use act::{Act, ActContext, BoxAct, IntoBoxAct};
pub use blackboard::{Blackboard, FAILURE_REASON, FailureReason, Key, Slot};
pub use composite::{Domain, Guard, Parallel, ParallelPolicy, Repeat, RepeatLimit, Select, Sequence};
pub use error::{ActError, ActResult};
pub use leaf::{Always, Call, Condition, Invert, Wait};
pub use status::Status;
pub use timer::Timer;
pub use wrap::{Steps, Wrap, steps};
