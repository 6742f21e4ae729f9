//! Run statistics
//!
//! Derived after the fact from the scheduler audit log and the final
//! process table. Nothing here feeds back into scheduling.

use crate::scheduler::ScheduleEvent;
use core_types::{Process, ProcessId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Timing of one process over a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStats {
    pub id: ProcessId,
    pub arrival: u64,
    pub cpu_time: u64,
    pub io_count: usize,
    pub admitted_at: Option<u64>,
    pub first_dispatch_at: Option<u64>,
    pub finished_at: Option<u64>,
    /// Ticks spent between blocking and the interrupt being handled
    pub blocked_ticks: u64,
}

impl ProcessStats {
    /// Ticks from arrival to finish
    pub fn turnaround(&self) -> Option<u64> {
        self.finished_at.map(|done| done.saturating_sub(self.arrival))
    }

    /// Turnaround not spent on the CPU or blocked on I/O
    pub fn waiting_ticks(&self) -> Option<u64> {
        self.turnaround().map(|t| {
            t.saturating_sub(self.cpu_time)
                .saturating_sub(self.blocked_ticks)
        })
    }
}

/// Aggregate view of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub idle_ticks: u64,
    /// Ticks on which a CPU tick was consumed
    pub cpu_ticks: u64,
    pub processes: Vec<ProcessStats>,
}

impl RunSummary {
    pub(crate) fn build<'a>(
        ticks: u64,
        idle_ticks: u64,
        cpu_ticks: u64,
        processes: impl Iterator<Item = &'a Process>,
        audit_log: &[ScheduleEvent],
    ) -> Self {
        let mut stats: Vec<ProcessStats> = processes
            .map(|p| ProcessStats {
                id: p.id(),
                arrival: p.arrival(),
                cpu_time: p.total_cpu(),
                io_count: p.io_completed() + p.pending_io().len(),
                admitted_at: None,
                first_dispatch_at: None,
                finished_at: None,
                blocked_ticks: 0,
            })
            .collect();

        let index: HashMap<ProcessId, usize> =
            stats.iter().enumerate().map(|(i, s)| (s.id, i)).collect();
        let mut blocked_since: HashMap<ProcessId, u64> = HashMap::new();

        for event in audit_log {
            let Some(&slot) = index.get(&event.process()) else {
                continue;
            };
            let entry = &mut stats[slot];
            match event {
                ScheduleEvent::Admitted { tick, .. } => entry.admitted_at = Some(*tick),
                ScheduleEvent::Dispatched { tick, .. } => {
                    entry.first_dispatch_at.get_or_insert(*tick);
                }
                ScheduleEvent::Blocked { process, tick, .. } => {
                    blocked_since.insert(*process, *tick);
                }
                ScheduleEvent::Reinstated { process, tick } => {
                    if let Some(since) = blocked_since.remove(process) {
                        entry.blocked_ticks += tick - since;
                    }
                }
                ScheduleEvent::Finished { tick, .. } => entry.finished_at = Some(*tick),
            }
        }

        Self {
            ticks,
            idle_ticks,
            cpu_ticks,
            processes: stats,
        }
    }

    /// Processes that reached `Done`
    pub fn completed(&self) -> usize {
        self.processes
            .iter()
            .filter(|p| p.finished_at.is_some())
            .count()
    }

    /// Fraction of ticks on which the CPU did work, in `[0, 1]`
    pub fn cpu_utilization(&self) -> f64 {
        if self.ticks == 0 {
            return 0.0;
        }
        self.cpu_ticks as f64 / self.ticks as f64
    }

    pub fn mean_turnaround(&self) -> Option<f64> {
        mean(self.processes.iter().filter_map(|p| p.turnaround()))
    }

    pub fn mean_waiting(&self) -> Option<f64> {
        mean(self.processes.iter().filter_map(|p| p.waiting_ticks()))
    }

    pub fn process(&self, id: ProcessId) -> Option<&ProcessStats> {
        self.processes.iter().find(|p| p.id == id)
    }
}

fn mean(values: impl Iterator<Item = u64>) -> Option<f64> {
    let (sum, count) = values.fold((0u64, 0u64), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum as f64 / count as f64)
}
