//! The plan channel: many requesters, one solver, per-requester inboxes.
//!
//! # Contract
//!
//! * [`submit`][PlanChannel::submit] returns a [`RequestId`] immediately and
//!   never runs a search.
//! * [`pump`][PlanChannel::pump] is called once per tick by the scheduler.
//!   It solves up to `budget` pending requests in submission order and drops
//!   each response into its requester's inbox.
//! * [`poll`][PlanChannel::poll] is non-blocking and hands a response out at
//!   most once.
//! * [`cancel`][PlanChannel::cancel] removes a request whether it is still
//!   pending or already answered, so a stale answer is never delivered.
//!
//! Order between different requesters is not guaranteed; each request gets
//! exactly one response, delivered only to the agent that asked.

use std::collections::{HashMap, VecDeque};

use col_core::{AgentId, RequestId};
use tracing::{debug, trace};

use crate::{Navigable, PlanError, PlanRequest, PlanResponse, PlanResult, Planner};

/// Running totals, for summaries and tests.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ChannelStats {
    pub submitted: u64,
    pub solved:    u64,
    pub delivered: u64,
    pub cancelled: u64,
}

/// Request/response queue between acts and the planner.
pub struct PlanChannel {
    next_id: RequestId,
    pending: VecDeque<PlanRequest>,
    inboxes: HashMap<AgentId, Vec<PlanResponse>>,
    stats:   ChannelStats,
}

impl Default for PlanChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanChannel {
    pub fn new() -> Self {
        Self {
            next_id: RequestId(0),
            pending: VecDeque::new(),
            inboxes: HashMap::new(),
            stats:   ChannelStats::default(),
        }
    }

    // ── Requester side ────────────────────────────────────────────────────

    /// Queue `request` and return its freshly assigned id.
    pub fn submit(&mut self, mut request: PlanRequest) -> PlanResult<RequestId> {
        if request.requester == AgentId::INVALID {
            return Err(PlanError::InvalidRequester);
        }
        if request.max_expansions == 0 {
            return Err(PlanError::ZeroBudget(request.requester));
        }

        let id = self.next_id;
        self.next_id = id.next();
        request.id = id;

        trace!(request = %id, agent = %request.requester, goal = ?request.goal, "plan submitted");
        self.pending.push_back(request);
        self.stats.submitted += 1;
        Ok(id)
    }

    /// Take the response to `id` out of `requester`'s inbox, if it arrived.
    pub fn poll(&mut self, requester: AgentId, id: RequestId) -> Option<PlanResponse> {
        let inbox = self.inboxes.get_mut(&requester)?;
        let pos = inbox.iter().position(|r| r.id == id)?;
        let response = inbox.swap_remove(pos);
        if inbox.is_empty() {
            self.inboxes.remove(&requester);
        }
        self.stats.delivered += 1;
        Some(response)
    }

    /// Withdraw `id`.  Returns `true` if anything was removed.
    pub fn cancel(&mut self, id: RequestId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|r| r.id != id);
        let mut removed = self.pending.len() != before;

        if !removed {
            for inbox in self.inboxes.values_mut() {
                if let Some(pos) = inbox.iter().position(|r| r.id == id) {
                    inbox.swap_remove(pos);
                    removed = true;
                    break;
                }
            }
            self.inboxes.retain(|_, inbox| !inbox.is_empty());
        }

        if removed {
            trace!(request = %id, "plan cancelled");
            self.stats.cancelled += 1;
        }
        removed
    }

    /// Drop every pending request and undelivered response of `requester`.
    pub fn cancel_all(&mut self, requester: AgentId) -> usize {
        let before = self.pending.len();
        self.pending.retain(|r| r.requester != requester);
        let dropped = before - self.pending.len()
            + self.inboxes.remove(&requester).map_or(0, |inbox| inbox.len());
        self.stats.cancelled += dropped as u64;
        dropped
    }

    // ── Solver side ───────────────────────────────────────────────────────

    /// Solve up to `budget` pending requests and deliver their responses.
    ///
    /// With the `parallel` feature the batch is solved on Rayon's thread
    /// pool; responses are still delivered in submission order.
    pub fn pump(&mut self, planner: &dyn Planner, nav: &dyn Navigable, budget: usize) -> usize {
        let n = budget.min(self.pending.len());
        if n == 0 {
            return 0;
        }
        let batch: Vec<PlanRequest> = self.pending.drain(..n).collect();

        #[cfg(not(feature = "parallel"))]
        let outcomes: Vec<_> = batch.iter().map(|req| planner.plan(nav, req)).collect();

        #[cfg(feature = "parallel")]
        let outcomes: Vec<_> = {
            use rayon::prelude::*;
            batch.par_iter().map(|req| planner.plan(nav, req)).collect()
        };

        for (req, outcome) in batch.into_iter().zip(outcomes) {
            match &outcome {
                Ok(path) => debug!(request = %req.id, agent = %req.requester, steps = path.len(), "plan solved"),
                Err(why) => debug!(request = %req.id, agent = %req.requester, %why, "plan failed"),
            }
            self.inboxes.entry(req.requester).or_default().push(PlanResponse {
                id:        req.id,
                requester: req.requester,
                outcome,
            });
        }
        self.stats.solved += n as u64;
        n
    }

    // ── Introspection ─────────────────────────────────────────────────────

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, id: RequestId) -> bool {
        self.pending.iter().any(|r| r.id == id)
    }

    /// Responses waiting for `requester` to poll them.
    pub fn inbox_len(&self, requester: AgentId) -> usize {
        self.inboxes.get(&requester).map_or(0, Vec::len)
    }

    pub fn stats(&self) -> ChannelStats {
        self.stats
    }
}
