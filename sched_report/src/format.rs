//! Pure formatting helpers

use core_types::{Process, ProcessState, StepAction};
use sim_scheduler::{RunSummary, TickRecord};
use std::fmt::Write;

/// Single-character state code used on the tick line
pub fn state_char(state: ProcessState) -> char {
    match state {
        ProcessState::New => 'n',
        ProcessState::Ready => 'r',
        ProcessState::Processing => 'p',
        ProcessState::Blocked => 'b',
        ProcessState::Done => 'd',
    }
}

/// Fixed-width action label
pub fn action_label(action: StepAction) -> &'static str {
    match action {
        StepAction::Admit => "[  admit]",
        StepAction::Interrupt => "[ inrtpt]",
        StepAction::Dispatch => "[  begin]",
        StepAction::Continue => "[contRun]",
        StepAction::IoBlock => "[  ioReq]",
        StepAction::Finish => "[ finish]",
        StepAction::Idle => "[*noAct*]",
    }
}

/// Formats one tick: right-aligned tick, label, then `<id><state>` pairs
///
/// ```
/// use core_types::{ProcessId, ProcessState, StepAction};
/// use sched_report::format_tick_line;
/// use sim_scheduler::{ProcessSnapshot, TickRecord};
///
/// let record = TickRecord {
///     tick: 2,
///     action: StepAction::Dispatch,
///     subject: Some(ProcessId::new(0)),
///     processes: vec![ProcessSnapshot { id: ProcessId::new(0), state: ProcessState::Processing }],
/// };
/// assert_eq!(format_tick_line(&record), "    2\t[  begin]\t0p ");
/// ```
pub fn format_tick_line(record: &TickRecord) -> String {
    let mut line = format!("{:>5}\t{}\t", record.tick, action_label(record.action));
    for snap in &record.processes {
        let _ = write!(line, "{}{} ", snap.id, state_char(snap.state));
    }
    line
}

/// Tabular dump of live process records
///
/// `REM` is the CPU time still owed, `S` the state character and `IO` the
/// I/O demands not yet satisfied, as `offset:duration`.
pub fn render_process_table<'a>(processes: impl IntoIterator<Item = &'a Process>) -> String {
    let mut out = String::from("ID | AT | CPU | REM | S | IO\n");
    for p in processes {
        let io = if p.pending_io().is_empty() {
            "-".to_string()
        } else {
            p.pending_io()
                .iter()
                .map(|e| format!("{}:{}", e.offset, e.duration))
                .collect::<Vec<_>>()
                .join(" ")
        };
        let _ = writeln!(
            out,
            "{} | {} | {} | {} | {} | {}",
            p.id(),
            p.arrival(),
            p.total_cpu(),
            p.remaining_cpu(),
            state_char(p.state()),
            io
        );
    }
    out
}

/// Multi-line end-of-run summary
pub fn format_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "ticks={} idle={} cpu={} utilization={:.1}% completed={}/{}",
        summary.ticks,
        summary.idle_ticks,
        summary.cpu_ticks,
        summary.cpu_utilization() * 100.0,
        summary.completed(),
        summary.processes.len()
    );
    let _ = writeln!(
        out,
        "mean_turnaround={} mean_waiting={}",
        mean_or_dash(summary.mean_turnaround()),
        mean_or_dash(summary.mean_waiting())
    );
    for p in &summary.processes {
        let _ = writeln!(
            out,
            "  {}: arrival={} admitted={} first_run={} finished={} turnaround={} waiting={} blocked={}",
            p.id,
            p.arrival,
            tick_or_dash(p.admitted_at),
            tick_or_dash(p.first_dispatch_at),
            tick_or_dash(p.finished_at),
            tick_or_dash(p.turnaround()),
            tick_or_dash(p.waiting_ticks()),
            p.blocked_ticks
        );
    }
    out
}

fn tick_or_dash(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn mean_or_dash(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}
