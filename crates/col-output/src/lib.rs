//! `col-output`: scheduler output writers.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                                                   |
//! |-----------|---------|-----------------------------------------------------------------|
//! | *(none)*  | CSV     | `task_events.csv`, `tick_summaries.csv`, `agent_snapshots.csv`  |
//! | `sqlite`  | SQLite  | `output.db`                                                     |
//!
//! Both implement [`OutputWriter`] and are driven by [`SchedOutputObserver`],
//! which implements `col_sched::SchedulerObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use col_output::{CsvWriter, SchedOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SchedOutputObserver::new(writer, &config);
//! sched.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SchedOutputObserver;
pub use row::{AgentSnapshotRow, TaskEventRow, TickSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
