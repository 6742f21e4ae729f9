//! Per-tick observable output
//!
//! A [`TickRecord`] is what the reporter sees: the tick, the one action that
//! fired, and the state of every admitted process that has not been purged.

use crate::context::SimContext;
use crate::scheduler::StepOutcome;
use core_types::{ProcessId, ProcessState, StepAction};
use serde::{Deserialize, Serialize};

/// `(id, state)` pair in a tick snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSnapshot {
    pub id: ProcessId,
    pub state: ProcessState,
}

/// Observable result of one tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRecord {
    pub tick: u64,
    pub action: StepAction,
    /// Process the action applied to, if any
    pub subject: Option<ProcessId>,
    /// Ready queue (head first), then the running process, then blocked
    /// processes in the order they blocked. A process that finished on this
    /// tick is listed last, once, as `Done`.
    pub processes: Vec<ProcessSnapshot>,
}

impl TickRecord {
    pub(crate) fn capture(tick: u64, outcome: &StepOutcome, ctx: &SimContext) -> Self {
        let mut ids: Vec<ProcessId> = ctx.ready_queue().iter().collect();
        ids.extend(ctx.running());
        ids.extend(ctx.blocked().iter().copied());
        if outcome.action == StepAction::Finish {
            ids.extend(outcome.subject);
        }

        let processes = ids
            .into_iter()
            .filter_map(|id| {
                ctx.process(id).map(|p| ProcessSnapshot {
                    id,
                    state: p.state(),
                })
            })
            .collect();

        Self {
            tick,
            action: outcome.action,
            subject: outcome.subject,
            processes,
        }
    }

    /// State of `id` in this snapshot, if it was listed
    pub fn state_of(&self, id: ProcessId) -> Option<ProcessState> {
        self.processes
            .iter()
            .find(|snap| snap.id == id)
            .map(|snap| snap.state)
    }

    /// Number of listed processes in `state`
    pub fn count_in(&self, state: ProcessState) -> usize {
        self.processes.iter().filter(|snap| snap.state == state).count()
    }
}
