//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `task_events`, `tick_summaries`, and `agent_snapshots`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, TaskEventRow, TickSummaryRow};

/// Writes scheduler output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS task_events (
                 tick    INTEGER NOT NULL,
                 faction INTEGER NOT NULL,
                 task    INTEGER NOT NULL,
                 name    TEXT    NOT NULL,
                 kind    TEXT    NOT NULL,
                 agent   INTEGER,
                 reason  TEXT
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick           INTEGER PRIMARY KEY,
                 elapsed_ms     INTEGER NOT NULL,
                 scripts_ticked INTEGER NOT NULL,
                 succeeded      INTEGER NOT NULL,
                 failed         INTEGER NOT NULL,
                 queued_tasks   INTEGER NOT NULL,
                 plans_solved   INTEGER NOT NULL,
                 plans_pending  INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS agent_snapshots (
                 agent_id INTEGER NOT NULL,
                 tick     INTEGER NOT NULL,
                 x        INTEGER NOT NULL,
                 y        INTEGER NOT NULL,
                 z        INTEGER NOT NULL,
                 status   TEXT    NOT NULL,
                 task     INTEGER,
                 boredom  REAL    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_task_events(&mut self, rows: &[TaskEventRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO task_events (tick, faction, task, name, kind, agent, reason) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                let agent = (row.agent != u32::MAX).then_some(row.agent);
                let reason = (!row.reason.is_empty()).then_some(row.reason.as_str());
                stmt.execute(rusqlite::params![
                    row.tick as i64,
                    row.faction,
                    row.task as i64,
                    row.name,
                    row.kind,
                    agent,
                    reason,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, elapsed_ms, scripts_ticked, succeeded, failed, queued_tasks, plans_solved, plans_pending) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                row.tick as i64,
                row.elapsed_ms as i64,
                row.scripts_ticked as i64,
                row.succeeded as i64,
                row.failed as i64,
                row.queued_tasks as i64,
                row.plans_solved as i64,
                row.plans_pending as i64,
            ],
        )?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO agent_snapshots (agent_id, tick, x, y, z, status, task, boredom) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for row in rows {
                let task = (row.task != u64::MAX).then_some(row.task as i64);
                stmt.execute(rusqlite::params![
                    row.agent_id,
                    row.tick as i64,
                    row.x,
                    row.y,
                    row.z,
                    row.status,
                    task,
                    row.boredom as f64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
