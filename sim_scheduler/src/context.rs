//! Shared simulation state
//!
//! Everything the components of a tick read or mutate lives here: the
//! process population, the ready queue, the CPU slot, the blocked list and
//! the interrupt queue. Components receive `&mut SimContext` for the duration
//! of their call; nothing is global.

use crate::clock::SimClock;
use crate::interrupt::InterruptQueue;
use core_types::{Process, ProcessDescriptor, ProcessId, ProcessState};
use std::collections::{BTreeMap, VecDeque};

/// Ready queue
///
/// Strict FIFO: processes are enqueued at the back and dispatched from the
/// front. A process returning from I/O rejoins at the back.
#[derive(Debug, Clone, Default)]
pub struct ReadyQueue {
    queue: VecDeque<ProcessId>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub(crate) fn enqueue(&mut self, process: ProcessId) {
        self.queue.push_back(process);
    }

    pub(crate) fn dequeue(&mut self) -> Option<ProcessId> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Iterates queued processes, head first
    pub fn iter(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.queue.iter().copied()
    }

    pub fn contains(&self, process: ProcessId) -> bool {
        self.queue.contains(&process)
    }
}

/// Per-state process counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateCounts {
    pub new: usize,
    pub ready: usize,
    pub processing: usize,
    pub blocked: usize,
    pub done: usize,
}

impl StateCounts {
    pub fn total(&self) -> usize {
        self.new + self.ready + self.processing + self.blocked + self.done
    }
}

/// Simulation context
#[derive(Debug, Clone)]
pub struct SimContext {
    clock: SimClock,
    processes: BTreeMap<ProcessId, Process>,
    pub(crate) ready: ReadyQueue,
    pub(crate) running: Option<ProcessId>,
    /// Blocked processes in the order they blocked
    pub(crate) blocked: Vec<ProcessId>,
    pub(crate) interrupts: InterruptQueue,
}

impl SimContext {
    /// Builds a context holding every process in the `New` state
    ///
    /// # Panics
    ///
    /// Panics if two descriptors share an id. The loader rejects duplicate
    /// ids, so reaching this is a caller bug.
    pub fn new(descriptors: &[ProcessDescriptor]) -> Self {
        let mut processes = BTreeMap::new();
        for descriptor in descriptors {
            let previous = processes.insert(descriptor.id, Process::from_descriptor(descriptor));
            assert!(
                previous.is_none(),
                "duplicate process id {} in simulation input",
                descriptor.id
            );
        }

        Self {
            clock: SimClock::new(),
            processes,
            ready: ReadyQueue::new(),
            running: None,
            blocked: Vec::new(),
            interrupts: InterruptQueue::new(),
        }
    }

    /// Current tick
    pub fn tick(&self) -> u64 {
        self.clock.current()
    }

    pub(crate) fn advance_clock(&mut self) -> u64 {
        self.clock.advance()
    }

    /// Returns a process by id
    pub fn process(&self, id: ProcessId) -> Option<&Process> {
        self.processes.get(&id)
    }

    /// Returns a process by id for mutation
    ///
    /// # Panics
    ///
    /// Panics if the id is unknown; every id flowing through the queues
    /// comes from this table.
    pub(crate) fn process_mut(&mut self, id: ProcessId) -> &mut Process {
        self.processes
            .get_mut(&id)
            .unwrap_or_else(|| panic!("unknown process id {}", id))
    }

    /// Iterates every process in id order
    pub fn processes(&self) -> impl Iterator<Item = &Process> {
        self.processes.values()
    }

    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    pub fn ready_queue(&self) -> &ReadyQueue {
        &self.ready
    }

    /// Process currently holding the CPU
    pub fn running(&self) -> Option<ProcessId> {
        self.running
    }

    /// Blocked processes in the order they blocked
    pub fn blocked(&self) -> &[ProcessId] {
        &self.blocked
    }

    pub fn interrupts(&self) -> &InterruptQueue {
        &self.interrupts
    }

    /// True when nothing is ready, running, blocked or waiting on an interrupt
    pub fn is_quiescent(&self) -> bool {
        self.ready.is_empty()
            && self.running.is_none()
            && self.blocked.is_empty()
            && self.interrupts.is_empty()
    }

    /// Counts processes per lifecycle state
    pub fn state_counts(&self) -> StateCounts {
        let mut counts = StateCounts::default();
        for process in self.processes.values() {
            match process.state() {
                ProcessState::New => counts.new += 1,
                ProcessState::Ready => counts.ready += 1,
                ProcessState::Processing => counts.processing += 1,
                ProcessState::Blocked => counts.blocked += 1,
                ProcessState::Done => counts.done += 1,
            }
        }
        counts
    }
}
