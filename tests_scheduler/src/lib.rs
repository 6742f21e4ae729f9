//! Scheduler Integration Test Utilities
//!
//! Shared helpers for the cross-crate tests under `tests/`.
//!
//! ## Test Philosophy
//!
//! - **Checked stepping**: every tick of every run is checked against the
//!   state-machine invariants, not just the final result
//! - **Determinism**: the same input must always produce the same trace
//! - **End to end**: loader, core and reporter are exercised together

use core_types::{ProcessDescriptor, ProcessState};
use sim_scheduler::{Simulation, TickRecord};

/// Upper bound on ticks needed to finish `descriptors`
///
/// Every tick either spends CPU, waits on I/O, handles an admission or an
/// interrupt, or waits for an arrival; the sum of all of those bounds the run.
pub fn tick_bound(descriptors: &[ProcessDescriptor]) -> u64 {
    let last_arrival = descriptors.iter().map(|d| d.arrival).max().unwrap_or(0);
    let work: u64 = descriptors
        .iter()
        .map(|d| {
            let io: u64 = d.io_events.iter().map(|e| e.duration + 2).sum();
            d.cpu_time + io + 3
        })
        .sum();
    last_arrival + work + 1
}

/// Runs to completion, checking invariants after every tick
///
/// # Panics
///
/// Panics if any invariant fails or the run does not finish within
/// [`tick_bound`].
pub fn run_checked(descriptors: &[ProcessDescriptor]) -> (Simulation, Vec<TickRecord>) {
    let bound = tick_bound(descriptors);
    let mut sim = Simulation::new(descriptors);
    let mut records = Vec::new();

    while !sim.is_finished() {
        assert!(
            sim.current_tick() < bound,
            "run did not finish within {} ticks",
            bound
        );
        let record = sim.tick();
        check_tick(&sim, descriptors.len(), &record);
        records.push(record);
    }

    (sim, records)
}

/// Per-tick invariants
pub fn check_tick(sim: &Simulation, population: usize, record: &TickRecord) {
    let ctx = sim.context();
    let counts = ctx.state_counts();

    assert_eq!(
        counts.total(),
        population,
        "tick {}: process count changed",
        record.tick
    );
    assert!(
        counts.processing <= 1,
        "tick {}: {} processes on the CPU",
        record.tick,
        counts.processing
    );
    assert_eq!(
        counts.processing,
        usize::from(ctx.running().is_some()),
        "tick {}: running slot disagrees with process states",
        record.tick
    );
    assert_eq!(counts.ready, ctx.ready_queue().len());
    assert_eq!(counts.blocked, ctx.blocked().len());
    // A blocked process is either still counting down or waiting for its
    // interrupt to be handled.
    assert_eq!(
        counts.blocked,
        sim.io().outstanding_count() + ctx.interrupts().len(),
        "tick {}: blocked processes without I/O or interrupt",
        record.tick
    );
    assert!(record.count_in(ProcessState::Processing) <= 1);
    assert_eq!(record.tick, ctx.tick());
}

/// Builds a descriptor with I/O events from `(offset, duration)` pairs
pub fn with_io(id: u64, arrival: u64, cpu_time: u64, io: &[(u64, u64)]) -> ProcessDescriptor {
    io.iter().fold(
        ProcessDescriptor::new(id, arrival, cpu_time),
        |desc, &(offset, duration)| desc.with_io(offset, duration),
    )
}
