//! `SchedOutputObserver<W>`: bridges `SchedulerObserver` to an `OutputWriter`.

use col_agent::AgentStore;
use col_core::{AgentId, SchedulerConfig, Tick};
use col_sched::{SchedulerObserver, TickSummary};
use col_task::{ScriptSlots, TaskEvent};

use crate::row::{AgentSnapshotRow, TaskEventRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SchedulerObserver`] that writes task events, tick summaries, and
/// agent snapshots to any [`OutputWriter`] backend.
///
/// Task events are buffered during a tick and written as one batch when the
/// tick ends.  Errors from the writer are stored internally because
/// observer methods have no return value; check
/// [`take_error`][Self::take_error] after the run.
pub struct SchedOutputObserver<W: OutputWriter> {
    writer:           W,
    tick_duration_ms: u32,
    pending:          Vec<TaskEventRow>,
    last_error:       Option<OutputError>,
}

impl<W: OutputWriter> SchedOutputObserver<W> {
    pub fn new(writer: W, config: &SchedulerConfig) -> Self {
        Self {
            writer,
            tick_duration_ms: config.tick_duration_ms,
            pending:          Vec::new(),
            last_error:       None,
        }
    }

    /// Take the stored write error (if any).  `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl From<&TaskEvent> for TaskEventRow {
    fn from(event: &TaskEvent) -> Self {
        Self {
            tick:    event.tick.0,
            faction: event.faction.0,
            task:    event.task.0,
            name:    event.name.clone(),
            kind:    event.kind.as_str(),
            agent:   event.agent.map_or(AgentId::INVALID.0, |a| a.0),
            reason:  event.reason.as_ref().map(ToString::to_string).unwrap_or_default(),
        }
    }
}

impl<W: OutputWriter> SchedulerObserver for SchedOutputObserver<W> {
    fn on_task_event(&mut self, event: &TaskEvent) {
        self.pending.push(event.into());
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        if !self.pending.is_empty() {
            let rows = std::mem::take(&mut self.pending);
            let result = self.writer.write_task_events(&rows);
            self.store_err(result);
        }

        let row = TickSummaryRow {
            tick:           summary.tick.0,
            elapsed_ms:     summary.tick.0 * self.tick_duration_ms as u64,
            scripts_ticked: summary.scripts_ticked as u64,
            succeeded:      summary.succeeded as u64,
            failed:         summary.failed as u64,
            queued_tasks:   summary.queued_tasks as u64,
            plans_solved:   summary.plans_solved as u64,
            plans_pending:  summary.plans_pending as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore, slots: &ScriptSlots) {
        let rows: Vec<AgentSnapshotRow> = agents
            .agent_ids()
            .map(|agent| {
                let i = agent.index();
                let pos = agents.position[i];
                AgentSnapshotRow {
                    agent_id: agent.0,
                    tick:     tick.0,
                    x:        pos.x,
                    y:        pos.y,
                    z:        pos.z,
                    status:   agents.status[i].as_str(),
                    task:     slots.task_of(agent).map_or(u64::MAX, |t| t.0),
                    boredom:  agents.boredom[i],
                }
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
