//! Interrupt queue between the I/O subsystem and the scheduler core
//!
//! Strict FIFO. Only the I/O subsystem raises interrupts and only the
//! scheduler core takes them, so both ends are crate-private.

use core_types::ProcessId;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Completion notice for one I/O operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interrupt {
    /// Process whose I/O completed
    pub process: ProcessId,
    /// Tick on which the operation reached zero
    pub raised_at: u64,
}

/// FIFO of pending interrupts
#[derive(Debug, Clone, Default)]
pub struct InterruptQueue {
    pending: VecDeque<Interrupt>,
}

impl InterruptQueue {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    /// Returns the number of pending interrupts
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Iterates pending interrupts, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Interrupt> {
        self.pending.iter()
    }

    /// Appends an interrupt (producer side)
    pub(crate) fn raise(&mut self, interrupt: Interrupt) {
        self.pending.push_back(interrupt);
    }

    /// Takes the oldest interrupt (consumer side)
    pub(crate) fn take(&mut self) -> Option<Interrupt> {
        self.pending.pop_front()
    }
}
