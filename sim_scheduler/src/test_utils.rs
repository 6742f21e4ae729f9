//! Test utilities for scheduler scenarios
//!
//! Helpers for building process sets and reading action/state sequences
//! out of a run. Shared by unit tests here and the integration test crate.

use crate::{Simulation, TickRecord};
use core_types::{ProcessDescriptor, ProcessId, ProcessState, StepAction};

/// Builds descriptors with ids assigned in order from `(arrival, cpu_time)`
pub fn processes(specs: &[(u64, u64)]) -> Vec<ProcessDescriptor> {
    specs
        .iter()
        .enumerate()
        .map(|(i, &(arrival, cpu))| ProcessDescriptor::new(i as u64, arrival, cpu))
        .collect()
}

/// Runs a process set to completion and returns every tick record
pub fn run(descriptors: &[ProcessDescriptor]) -> Vec<TickRecord> {
    Simulation::new(descriptors).run_to_completion()
}

/// Action of every tick, in order
pub fn actions(records: &[TickRecord]) -> Vec<StepAction> {
    records.iter().map(|r| r.action).collect()
}

/// State of `id` on every tick where it was listed
pub fn states_of(records: &[TickRecord], id: u64) -> Vec<ProcessState> {
    let id = ProcessId::new(id);
    records.iter().filter_map(|r| r.state_of(id)).collect()
}

/// First tick on which `action` fired for `id`
pub fn tick_of(records: &[TickRecord], id: u64, action: StepAction) -> Option<u64> {
    let id = ProcessId::new(id);
    records
        .iter()
        .find(|r| r.action == action && r.subject == Some(id))
        .map(|r| r.tick)
}
