//! # I/O Subsystem
//!
//! A bank of countdown timers keyed by process id.
//!
//! Every blocked process owns exactly one outstanding operation. Operations
//! run in parallel: each [`IoSubsystem::advance`] takes one tick off every
//! operation, and each one that reaches zero is removed and raises an
//! interrupt. The subsystem never looks at process state.

use crate::interrupt::{Interrupt, InterruptQueue};
use core_types::ProcessId;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One in-flight I/O operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoOperation {
    pub process: ProcessId,
    pub remaining: u64,
}

/// Outstanding I/O operations in submission order
#[derive(Debug, Clone, Default)]
pub struct IoSubsystem {
    operations: Vec<IoOperation>,
}

impl IoSubsystem {
    pub fn new() -> Self {
        Self {
            operations: Vec::new(),
        }
    }

    /// Registers a new I/O operation for `process`
    ///
    /// # Panics
    ///
    /// Panics if the process already has an outstanding operation or if
    /// `duration` is zero. Both mean the scheduler state is corrupt.
    pub fn submit(&mut self, process: ProcessId, duration: u64) {
        assert!(
            !self.is_outstanding(process),
            "process {} already has an outstanding I/O operation",
            process
        );
        assert!(
            duration > 0,
            "process {} submitted a zero-length I/O operation",
            process
        );
        self.operations.push(IoOperation {
            process,
            remaining: duration,
        });
    }

    /// Advances every outstanding operation by one tick
    ///
    /// Completed operations are removed and raise an interrupt, in
    /// submission order. Returns how many completed.
    pub fn advance(&mut self, current_tick: u64, interrupts: &mut InterruptQueue) -> usize {
        let mut completed = 0;

        self.operations.retain_mut(|op| {
            op.remaining -= 1;
            if op.remaining > 0 {
                return true;
            }
            interrupts.raise(Interrupt {
                process: op.process,
                raised_at: current_tick,
            });
            debug!(tick = current_tick, process = %op.process, "I/O complete");
            completed += 1;
            false
        });

        completed
    }

    /// Returns true if `process` has an operation in flight
    pub fn is_outstanding(&self, process: ProcessId) -> bool {
        self.operations.iter().any(|op| op.process == process)
    }

    /// Ticks left on the operation for `process`
    pub fn remaining_for(&self, process: ProcessId) -> Option<u64> {
        self.operations
            .iter()
            .find(|op| op.process == process)
            .map(|op| op.remaining)
    }

    pub fn outstanding_count(&self) -> usize {
        self.operations.len()
    }

    pub fn is_idle(&self) -> bool {
        self.operations.is_empty()
    }

    /// In-flight operations, oldest submission first
    pub fn operations(&self) -> &[IoOperation] {
        &self.operations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(raw: u64) -> ProcessId {
        ProcessId::new(raw)
    }

    #[test]
    fn test_operation_completes_after_duration() {
        let mut io = IoSubsystem::new();
        let mut interrupts = InterruptQueue::new();
        io.submit(pid(1), 2);

        assert_eq!(io.advance(1, &mut interrupts), 0);
        assert_eq!(io.remaining_for(pid(1)), Some(1));
        assert!(interrupts.is_empty());

        assert_eq!(io.advance(2, &mut interrupts), 1);
        assert!(io.is_idle());
        let raised = interrupts.take().unwrap();
        assert_eq!(raised.process, pid(1));
        assert_eq!(raised.raised_at, 2);
    }

    #[test]
    fn test_parallel_operations_count_down_independently() {
        let mut io = IoSubsystem::new();
        let mut interrupts = InterruptQueue::new();
        io.submit(pid(1), 3);
        io.submit(pid(2), 1);

        io.advance(1, &mut interrupts);
        assert_eq!(io.outstanding_count(), 1);
        assert_eq!(interrupts.take().unwrap().process, pid(2));

        io.advance(2, &mut interrupts);
        io.advance(3, &mut interrupts);
        assert_eq!(interrupts.take().unwrap().process, pid(1));
        assert!(io.is_idle());
    }

    #[test]
    fn test_same_tick_completions_keep_submission_order() {
        let mut io = IoSubsystem::new();
        let mut interrupts = InterruptQueue::new();
        io.submit(pid(7), 2);
        io.submit(pid(3), 1);
        io.advance(1, &mut interrupts);
        io.submit(pid(5), 1);

        io.advance(2, &mut interrupts);
        let order: Vec<ProcessId> = interrupts.iter().map(|i| i.process).collect();
        assert_eq!(order, vec![pid(3), pid(7), pid(5)]);
    }

    #[test]
    #[should_panic(expected = "already has an outstanding I/O operation")]
    fn test_double_submit_panics() {
        let mut io = IoSubsystem::new();
        io.submit(pid(1), 2);
        io.submit(pid(1), 4);
    }

    #[test]
    #[should_panic(expected = "zero-length")]
    fn test_zero_duration_panics() {
        let mut io = IoSubsystem::new();
        io.submit(pid(1), 0);
    }

    #[test]
    fn test_resubmit_after_completion() {
        let mut io = IoSubsystem::new();
        let mut interrupts = InterruptQueue::new();
        io.submit(pid(1), 1);
        io.advance(1, &mut interrupts);
        io.submit(pid(1), 1);
        assert!(io.is_outstanding(pid(1)));
    }
}
