//! # Scheduler Core
//!
//! The per-tick decision procedure of a single non-preemptive CPU.
//!
//! ## Design
//!
//! - **One action per tick**: every call to [`Scheduler::step`] fires
//!   exactly one branch and reports it as a [`StepAction`].
//! - **No preemption**: once dispatched, a process keeps the CPU until it
//!   blocks for I/O or finishes.
//! - **Settling delay**: a tick on which processes were admitted to an idle
//!   CPU is spent on the admission itself; dispatch happens on a later tick.
//! - **Strict FIFO**: the ready queue and the interrupt queue are both
//!   served head first; returning processes join the ready tail.
//!
//! ## Precedence
//!
//! CPU idle: admit, then interrupt, then dispatch, then idle.
//! CPU busy: I/O trigger, then continue, then finish.
//!
//! Invariant violations (dispatching onto a busy CPU, an interrupt for a
//! process that is not blocked) panic: they mean the state machine is
//! corrupt and continuing would only hide it.

use crate::admission::AdmissionBatch;
use crate::context::SimContext;
use crate::interrupt::Interrupt;
use crate::io::IoSubsystem;
use core_types::{IoEvent, ProcessId, ProcessState, StepAction};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of one scheduler step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub action: StepAction,
    /// Process the action applied to, if any
    pub subject: Option<ProcessId>,
    /// True if a CPU tick was consumed this step
    pub cpu_consumed: bool,
}

impl StepOutcome {
    fn new(action: StepAction, subject: Option<ProcessId>, cpu_consumed: bool) -> Self {
        Self {
            action,
            subject,
            cpu_consumed,
        }
    }
}

/// Scheduling event for the audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleEvent {
    /// Process entered the ready queue from `New`
    Admitted { process: ProcessId, tick: u64 },
    /// Process was placed on the CPU
    Dispatched { process: ProcessId, tick: u64 },
    /// Process issued I/O and left the CPU
    Blocked {
        process: ProcessId,
        io: IoEvent,
        tick: u64,
    },
    /// Interrupt handled; process is ready again
    Reinstated { process: ProcessId, tick: u64 },
    /// Process consumed all of its CPU time
    Finished { process: ProcessId, tick: u64 },
}

impl ScheduleEvent {
    pub fn process(&self) -> ProcessId {
        match self {
            ScheduleEvent::Admitted { process, .. }
            | ScheduleEvent::Dispatched { process, .. }
            | ScheduleEvent::Blocked { process, .. }
            | ScheduleEvent::Reinstated { process, .. }
            | ScheduleEvent::Finished { process, .. } => *process,
        }
    }

    pub fn tick(&self) -> u64 {
        match self {
            ScheduleEvent::Admitted { tick, .. }
            | ScheduleEvent::Dispatched { tick, .. }
            | ScheduleEvent::Blocked { tick, .. }
            | ScheduleEvent::Reinstated { tick, .. }
            | ScheduleEvent::Finished { tick, .. } => *tick,
        }
    }
}

/// Non-preemptive FIFO scheduler
#[derive(Debug, Default)]
pub struct Scheduler {
    audit_log: Vec<ScheduleEvent>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            audit_log: Vec::new(),
        }
    }

    /// Runs the decision procedure for the current tick
    ///
    /// Must be called after admission and I/O advancement for the same tick.
    pub fn step(
        &mut self,
        ctx: &mut SimContext,
        io: &mut IoSubsystem,
        admitted: &AdmissionBatch,
    ) -> StepOutcome {
        let tick = ctx.tick();
        for &process in admitted.processes() {
            self.audit_log
                .push(ScheduleEvent::Admitted { process, tick });
        }

        match ctx.running {
            Some(current) => self.run_current(ctx, io, current),
            None => self.choose_for_idle_cpu(ctx, io, admitted),
        }
    }

    /// Returns a reference to the audit log
    pub fn audit_log(&self) -> &[ScheduleEvent] {
        &self.audit_log
    }

    /// Clears the audit log
    pub fn clear_audit_log(&mut self) {
        self.audit_log.clear();
    }

    fn choose_for_idle_cpu(
        &mut self,
        ctx: &mut SimContext,
        io: &mut IoSubsystem,
        admitted: &AdmissionBatch,
    ) -> StepOutcome {
        if !admitted.is_empty() {
            return StepOutcome::new(StepAction::Admit, None, false);
        }

        if let Some(interrupt) = ctx.interrupts.take() {
            return self.handle_interrupt(ctx, interrupt);
        }

        if let Some(next) = ctx.ready.dequeue() {
            return self.dispatch(ctx, io, next);
        }

        StepOutcome::new(StepAction::Idle, None, false)
    }

    fn handle_interrupt(&mut self, ctx: &mut SimContext, interrupt: Interrupt) -> StepOutcome {
        let tick = ctx.tick();
        let id = interrupt.process;

        let process = ctx.process_mut(id);
        assert_eq!(
            process.state(),
            ProcessState::Blocked,
            "interrupt for process {} which is not blocked",
            id
        );
        let satisfied = process.complete_io();
        process.set_state(ProcessState::Ready);

        ctx.blocked.retain(|&blocked| blocked != id);
        ctx.ready.enqueue(id);

        debug!(
            tick,
            process = %id,
            raised_at = interrupt.raised_at,
            io_offset = satisfied.offset,
            "interrupt handled"
        );
        self.audit_log
            .push(ScheduleEvent::Reinstated { process: id, tick });

        StepOutcome::new(StepAction::Interrupt, Some(id), false)
    }

    fn dispatch(&mut self, ctx: &mut SimContext, io: &mut IoSubsystem, id: ProcessId) -> StepOutcome {
        let tick = ctx.tick();
        assert!(
            ctx.running.is_none(),
            "dispatch of process {} while the CPU is busy",
            id
        );

        let process = ctx.process_mut(id);
        assert_eq!(
            process.state(),
            ProcessState::Ready,
            "dispatch of process {} which is not ready",
            id
        );
        process.set_state(ProcessState::Processing);
        ctx.running = Some(id);
        self.audit_log
            .push(ScheduleEvent::Dispatched { process: id, tick });
        debug!(tick, process = %id, "dispatched");

        // Trigger already reached before this dispatch (offset 0, or two
        // demands at the same offset): block without consuming CPU.
        if let Some(event) = ctx.process_mut(id).io_due() {
            self.block(ctx, io, id, event);
            return StepOutcome::new(StepAction::IoBlock, Some(id), false);
        }

        let process = ctx.process_mut(id);
        process.consume_tick();
        if let Some(event) = process.io_due() {
            self.block(ctx, io, id, event);
            return StepOutcome::new(StepAction::IoBlock, Some(id), true);
        }

        StepOutcome::new(StepAction::Dispatch, Some(id), true)
    }

    fn run_current(&mut self, ctx: &mut SimContext, io: &mut IoSubsystem, id: ProcessId) -> StepOutcome {
        let tick = ctx.tick();
        let process = ctx.process_mut(id);
        debug_assert_eq!(process.state(), ProcessState::Processing);

        if let Some(event) = process.io_due() {
            self.block(ctx, io, id, event);
            return StepOutcome::new(StepAction::IoBlock, Some(id), false);
        }

        if process.remaining_cpu() > 0 {
            process.consume_tick();
            return StepOutcome::new(StepAction::Continue, Some(id), true);
        }

        process.set_state(ProcessState::Done);
        ctx.running = None;
        debug!(tick, process = %id, "finished");
        self.audit_log
            .push(ScheduleEvent::Finished { process: id, tick });

        StepOutcome::new(StepAction::Finish, Some(id), false)
    }

    fn block(&mut self, ctx: &mut SimContext, io: &mut IoSubsystem, id: ProcessId, event: IoEvent) {
        let tick = ctx.tick();
        ctx.process_mut(id).set_state(ProcessState::Blocked);
        ctx.running = None;
        ctx.blocked.push(id);
        io.submit(id, event.duration);

        debug!(
            tick,
            process = %id,
            io_offset = event.offset,
            io_duration = event.duration,
            "blocked on I/O"
        );
        self.audit_log.push(ScheduleEvent::Blocked {
            process: id,
            io: event,
            tick,
        });
    }
}
