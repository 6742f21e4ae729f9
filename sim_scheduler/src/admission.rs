//! Admission subsystem
//!
//! Holds every process that has not arrived yet and releases it into the
//! ready queue once the clock reaches its arrival tick.

use crate::context::SimContext;
use core_types::{ProcessDescriptor, ProcessId, ProcessState};
use std::collections::VecDeque;
use tracing::debug;

/// Processes released by one call to [`Admission::activate`]
///
/// A non-empty batch is what makes an idle CPU spend the tick settling
/// instead of dispatching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdmissionBatch {
    admitted: Vec<ProcessId>,
}

impl AdmissionBatch {
    pub fn is_empty(&self) -> bool {
        self.admitted.is_empty()
    }

    pub fn len(&self) -> usize {
        self.admitted.len()
    }

    /// Admitted processes in admission order
    pub fn processes(&self) -> &[ProcessId] {
        &self.admitted
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingArrival {
    arrival: u64,
    process: ProcessId,
}

/// Arrival gate
#[derive(Debug, Clone)]
pub struct Admission {
    /// Not-yet-arrived processes, by arrival tick then input order
    pending: VecDeque<PendingArrival>,
}

impl Admission {
    /// Creates the gate for a process set given in input order
    pub fn new(descriptors: &[ProcessDescriptor]) -> Self {
        let mut pending: Vec<PendingArrival> = descriptors
            .iter()
            .map(|d| PendingArrival {
                arrival: d.arrival,
                process: d.id,
            })
            .collect();
        // Stable: same-tick arrivals keep input order.
        pending.sort_by_key(|p| p.arrival);

        Self {
            pending: pending.into(),
        }
    }

    /// Moves every arrived process into the ready queue
    ///
    /// Processes are admitted in ascending arrival order; ties keep input
    /// order. Already-admitted processes are never touched again.
    pub fn activate(&mut self, current_tick: u64, ctx: &mut SimContext) -> AdmissionBatch {
        let mut batch = AdmissionBatch::default();

        while let Some(next) = self.pending.front().copied() {
            if next.arrival > current_tick {
                break;
            }
            self.pending.pop_front();

            let process = ctx.process_mut(next.process);
            assert_eq!(
                process.state(),
                ProcessState::New,
                "process {} admitted twice",
                next.process
            );
            process.set_state(ProcessState::Ready);
            ctx.ready.enqueue(next.process);
            batch.admitted.push(next.process);

            debug!(
                tick = current_tick,
                process = %next.process,
                arrival = next.arrival,
                "admitted"
            );
        }

        batch
    }

    /// Returns true while any process has not arrived yet
    pub fn has_more_arrivals(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Number of processes still waiting to arrive
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Arrival tick of the next process to arrive
    pub fn next_arrival(&self) -> Option<u64> {
        self.pending.front().map(|p| p.arrival)
    }
}
