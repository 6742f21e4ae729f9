//! Process records and lifecycle states

use crate::ProcessId;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Lifecycle state of a simulated process
///
/// `New → Ready → Processing → {Blocked → Ready → Processing}* → Done`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Loaded but not yet arrived
    New,
    /// Waiting in the ready queue for the CPU
    Ready,
    /// Currently holding the CPU
    Processing,
    /// Waiting for an outstanding I/O operation
    Blocked,
    /// Finished; never scheduled again
    Done,
}

/// A single I/O demand of a process
///
/// The operation starts once the process has consumed `offset` CPU ticks
/// and keeps it blocked for `duration` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoEvent {
    /// Cumulative CPU ticks consumed when the I/O is issued
    pub offset: u64,
    /// Ticks the I/O operation takes to complete
    pub duration: u64,
}

impl IoEvent {
    pub fn new(offset: u64, duration: u64) -> Self {
        Self { offset, duration }
    }
}

/// Input record for one process
///
/// Produced by the loader, validated before the simulation starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDescriptor {
    /// Unique process identifier
    pub id: ProcessId,
    /// Tick at which the process becomes eligible for admission
    pub arrival: u64,
    /// Total CPU ticks the process needs
    pub cpu_time: u64,
    /// I/O demands, in trigger order
    #[serde(default)]
    pub io_events: Vec<IoEvent>,
}

impl ProcessDescriptor {
    /// Creates a descriptor with no I/O demands
    pub fn new(id: u64, arrival: u64, cpu_time: u64) -> Self {
        Self {
            id: ProcessId::new(id),
            arrival,
            cpu_time,
            io_events: Vec::new(),
        }
    }

    /// Appends an I/O demand
    pub fn with_io(mut self, offset: u64, duration: u64) -> Self {
        self.io_events.push(IoEvent::new(offset, duration));
        self
    }
}

/// Live process record
///
/// Only the scheduler core mutates a process. `remaining_cpu` only ever goes
/// down, and only while the process holds the CPU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    id: ProcessId,
    arrival: u64,
    total_cpu: u64,
    remaining_cpu: u64,
    io_events: VecDeque<IoEvent>,
    io_completed: usize,
    state: ProcessState,
}

impl Process {
    /// Creates a new process in the `New` state
    pub fn from_descriptor(descriptor: &ProcessDescriptor) -> Self {
        Self {
            id: descriptor.id,
            arrival: descriptor.arrival,
            total_cpu: descriptor.cpu_time,
            remaining_cpu: descriptor.cpu_time,
            io_events: descriptor.io_events.iter().copied().collect(),
            io_completed: 0,
            state: ProcessState::New,
        }
    }

    pub fn id(&self) -> ProcessId {
        self.id
    }

    pub fn arrival(&self) -> u64 {
        self.arrival
    }

    pub fn total_cpu(&self) -> u64 {
        self.total_cpu
    }

    pub fn remaining_cpu(&self) -> u64 {
        self.remaining_cpu
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    /// I/O demands not yet satisfied, head first
    pub fn pending_io(&self) -> &VecDeque<IoEvent> {
        &self.io_events
    }

    /// Number of I/O operations that have completed for this process
    pub fn io_completed(&self) -> usize {
        self.io_completed
    }

    /// CPU ticks consumed so far across all dispatches
    pub fn consumed_cpu(&self) -> u64 {
        self.total_cpu - self.remaining_cpu
    }

    /// Returns the head I/O demand if its trigger offset has been reached
    pub fn io_due(&self) -> Option<IoEvent> {
        self.io_events
            .front()
            .copied()
            .filter(|event| event.offset == self.consumed_cpu())
    }

    /// Updates the lifecycle state
    pub fn set_state(&mut self, state: ProcessState) {
        self.state = state;
    }

    /// Consumes one CPU tick
    ///
    /// # Panics
    ///
    /// Panics if no CPU time remains.
    pub fn consume_tick(&mut self) {
        assert!(
            self.remaining_cpu > 0,
            "process {} consumed a tick with no CPU time remaining",
            self.id
        );
        self.remaining_cpu -= 1;
    }

    /// Drops the satisfied head I/O demand
    ///
    /// # Panics
    ///
    /// Panics if the process has no pending I/O demand.
    pub fn complete_io(&mut self) -> IoEvent {
        let event = self
            .io_events
            .pop_front()
            .unwrap_or_else(|| panic!("process {} completed I/O it never requested", self.id));
        self.io_completed += 1;
        event
    }
}
