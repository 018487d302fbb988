//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `task_events.csv`
//! - `tick_summaries.csv`
//! - `agent_snapshots.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, TaskEventRow, TickSummaryRow};

pub const TASK_EVENT_HEADERS: [&str; 7] = ["tick", "faction", "task", "name", "kind", "agent", "reason"];

pub const TICK_SUMMARY_HEADERS: [&str; 8] = [
    "tick",
    "elapsed_ms",
    "scripts_ticked",
    "succeeded",
    "failed",
    "queued_tasks",
    "plans_solved",
    "plans_pending",
];

pub const SNAPSHOT_HEADERS: [&str; 8] = ["agent_id", "tick", "x", "y", "z", "status", "task", "boredom"];

/// Writes scheduler output to three CSV files.
pub struct CsvWriter {
    events:    Writer<File>,
    summaries: Writer<File>,
    snapshots: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(dir.join("task_events.csv"))?;
        events.write_record(TASK_EVENT_HEADERS)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(TICK_SUMMARY_HEADERS)?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADERS)?;

        Ok(Self { events, summaries, snapshots, finished: false })
    }
}

/// Empty cell for "none" sentinels.
fn optional<T: PartialEq + ToString>(value: T, none: T) -> String {
    if value == none { String::new() } else { value.to_string() }
}

impl OutputWriter for CsvWriter {
    fn write_task_events(&mut self, rows: &[TaskEventRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[
                row.tick.to_string(),
                row.faction.to_string(),
                row.task.to_string(),
                row.name.clone(),
                row.kind.to_string(),
                optional(row.agent, u32::MAX),
                row.reason.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.elapsed_ms.to_string(),
            row.scripts_ticked.to_string(),
            row.succeeded.to_string(),
            row.failed.to_string(),
            row.queued_tasks.to_string(),
            row.plans_solved.to_string(),
            row.plans_pending.to_string(),
        ])?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.z.to_string(),
                row.status.to_string(),
                optional(row.task, u64::MAX),
                format!("{:.3}", row.boredom),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.summaries.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}
