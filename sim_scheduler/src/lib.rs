//! # Simulated Scheduler
//!
//! This crate runs a discrete-time simulation of a single CPU shared by a
//! set of processes that arrive over time and block for I/O.
//!
//! ## Purpose
//!
//! - Deterministic: same process set, same action log, every run
//! - Inspectable: all state is reachable through [`SimContext`]
//! - Fast: no real time passes unless the host decides to pace ticks
//!
//! ## Tick Order
//!
//! Each [`Simulation::tick`] runs, in order:
//!
//! 1. [`Admission::activate`] releases every arrived process
//! 2. [`IoSubsystem::advance`] counts down I/O and raises interrupts
//! 3. [`Scheduler::step`] picks the one action for the tick
//! 4. A [`TickRecord`] is captured for the reporter
//!
//! Hosts poll [`Simulation::is_finished`] before each tick.

pub mod admission;
pub mod clock;
pub mod context;
pub mod interrupt;
pub mod io;
pub mod scheduler;
pub mod snapshot;
pub mod stats;
pub mod test_utils;

pub use admission::{Admission, AdmissionBatch};
pub use context::{ReadyQueue, SimContext, StateCounts};
pub use interrupt::{Interrupt, InterruptQueue};
pub use io::{IoOperation, IoSubsystem};
pub use scheduler::{ScheduleEvent, Scheduler, StepOutcome};
pub use snapshot::{ProcessSnapshot, TickRecord};
pub use stats::{ProcessStats, RunSummary};

use core_types::{ProcessDescriptor, StepAction};
use std::convert::Infallible;
use tracing::trace;

/// A complete simulation run
///
/// Owns the shared context and the three components that act on it.
#[derive(Debug)]
pub struct Simulation {
    ctx: SimContext,
    admission: Admission,
    io: IoSubsystem,
    scheduler: Scheduler,
    idle_ticks: u64,
    cpu_ticks: u64,
}

impl Simulation {
    /// Creates a simulation over an already-validated process set
    ///
    /// Descriptors are taken in input order; that order breaks ties between
    /// processes arriving on the same tick.
    pub fn new(descriptors: &[ProcessDescriptor]) -> Self {
        Self {
            ctx: SimContext::new(descriptors),
            admission: Admission::new(descriptors),
            io: IoSubsystem::new(),
            scheduler: Scheduler::new(),
            idle_ticks: 0,
            cpu_ticks: 0,
        }
    }

    /// Termination predicate
    ///
    /// True once nothing is left to arrive, run, wait on I/O or interrupt.
    pub fn is_finished(&self) -> bool {
        !self.admission.has_more_arrivals() && self.ctx.is_quiescent() && self.io.is_idle()
    }

    /// Runs one tick and returns what happened
    pub fn tick(&mut self) -> TickRecord {
        let tick = self.ctx.advance_clock();

        let batch = self.admission.activate(tick, &mut self.ctx);
        self.io.advance(tick, &mut self.ctx.interrupts);
        let outcome = self.scheduler.step(&mut self.ctx, &mut self.io, &batch);

        if outcome.action == StepAction::Idle {
            self.idle_ticks += 1;
        }
        if outcome.cpu_consumed {
            self.cpu_ticks += 1;
        }

        let record = TickRecord::capture(tick, &outcome, &self.ctx);
        trace!(tick, action = %record.action, "tick");
        record
    }

    /// Ticks until finished, or until `max_ticks` ticks have run
    ///
    /// Calls `observer` with every record. Returns the number of ticks run.
    pub fn run_with<F>(&mut self, max_ticks: Option<u64>, mut observer: F) -> u64
    where
        F: FnMut(&TickRecord),
    {
        let result: Result<u64, Infallible> = self.try_run_with(max_ticks, |record| {
            observer(record);
            Ok(())
        });
        match result {
            Ok(ran) => ran,
            Err(never) => match never {},
        }
    }

    /// Like [`Simulation::run_with`], but stops at the first observer error
    ///
    /// The tick that produced the error has already been applied.
    pub fn try_run_with<F, E>(&mut self, max_ticks: Option<u64>, mut observer: F) -> Result<u64, E>
    where
        F: FnMut(&TickRecord) -> Result<(), E>,
    {
        let mut ran = 0;
        while !self.is_finished() {
            if max_ticks.is_some_and(|max| ran >= max) {
                break;
            }
            let record = self.tick();
            ran += 1;
            observer(&record)?;
        }
        Ok(ran)
    }

    /// Ticks until finished and collects every record
    pub fn run_to_completion(&mut self) -> Vec<TickRecord> {
        let mut records = Vec::new();
        self.run_with(None, |record| records.push(record.clone()));
        records
    }

    pub fn context(&self) -> &SimContext {
        &self.ctx
    }

    pub fn admission(&self) -> &Admission {
        &self.admission
    }

    pub fn io(&self) -> &IoSubsystem {
        &self.io
    }

    /// Current tick
    pub fn current_tick(&self) -> u64 {
        self.ctx.tick()
    }

    pub fn audit_log(&self) -> &[ScheduleEvent] {
        self.scheduler.audit_log()
    }

    /// Builds statistics for the run so far
    pub fn summary(&self) -> RunSummary {
        RunSummary::build(
            self.ctx.tick(),
            self.idle_ticks,
            self.cpu_ticks,
            self.ctx.processes(),
            self.scheduler.audit_log(),
        )
    }
}
