//! Scheduling Invariant Tests
//!
//! Properties that must hold for every workload, checked over a spread of
//! mixed process sets.

use core_types::{ProcessDescriptor, ProcessId, ProcessState, StepAction};
use sim_scheduler::test_utils::{actions, processes, tick_of};
use tests_scheduler::{run_checked, with_io};

fn workloads() -> Vec<Vec<ProcessDescriptor>> {
    vec![
        processes(&[(0, 1)]),
        processes(&[(0, 3), (0, 2), (0, 1)]),
        processes(&[(5, 2), (0, 4), (2, 1)]),
        vec![
            with_io(0, 0, 5, &[(1, 3), (2, 1), (4, 2)]),
            with_io(1, 1, 3, &[(0, 2)]),
            ProcessDescriptor::new(2, 2, 2),
            with_io(3, 10, 2, &[(1, 1), (1, 1)]),
        ],
        vec![
            with_io(0, 0, 6, &[(2, 5)]),
            with_io(1, 0, 6, &[(2, 5)]),
            with_io(2, 0, 6, &[(2, 5)]),
            with_io(3, 4, 1, &[]),
        ],
    ]
}

/// Every checked run ends with every process done and its work accounted for
#[test]
fn test_every_process_completes_all_work() {
    for descs in workloads() {
        let (sim, _) = run_checked(&descs);
        let ctx = sim.context();

        for desc in &descs {
            let process = ctx.process(desc.id).unwrap();
            assert_eq!(process.state(), ProcessState::Done);
            assert_eq!(process.remaining_cpu(), 0);
            assert_eq!(process.io_completed(), desc.io_events.len());
            assert!(process.pending_io().is_empty());
        }
        assert!(ctx.is_quiescent());
        assert!(sim.io().is_idle());
    }
}

#[test]
fn test_cpu_ticks_match_total_demand() {
    for descs in workloads() {
        let (sim, records) = run_checked(&descs);
        let summary = sim.summary();
        let demand: u64 = descs.iter().map(|d| d.cpu_time).sum();

        assert_eq!(summary.cpu_ticks, demand);
        assert_eq!(summary.ticks, records.len() as u64);
        assert_eq!(
            summary.idle_ticks,
            actions(&records)
                .iter()
                .filter(|&&a| a == StepAction::Idle)
                .count() as u64
        );
    }
}

#[test]
fn test_exactly_one_action_per_tick() {
    for descs in workloads() {
        let (_, records) = run_checked(&descs);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.tick, i as u64 + 1);
        }
    }
}

#[test]
fn test_completion_timing_without_io() {
    for arrival in [0, 1, 2, 7] {
        for cpu in 1..=5 {
            let (_, records) = run_checked(&processes(&[(arrival, cpu)]));
            let admitted = tick_of(&records, 0, StepAction::Admit).unwrap();
            let finished = tick_of(&records, 0, StepAction::Finish);

            assert_eq!(admitted, arrival.max(1));
            assert_eq!(finished, Some(admitted + cpu + 1));
        }
    }
}

#[test]
fn test_runs_are_deterministic() {
    for descs in workloads() {
        let (first_sim, first) = run_checked(&descs);
        let (second_sim, second) = run_checked(&descs);

        assert_eq!(first, second);
        assert_eq!(first_sim.audit_log(), second_sim.audit_log());
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

#[test]
fn test_never_more_than_one_dispatch_between_finishes() {
    for descs in workloads() {
        let (_, records) = run_checked(&descs);
        let mut on_cpu: Option<ProcessId> = None;

        for record in &records {
            match record.action {
                StepAction::Dispatch => {
                    assert!(on_cpu.is_none(), "tick {}: CPU already busy", record.tick);
                    on_cpu = record.subject;
                }
                StepAction::Continue => assert_eq!(on_cpu, record.subject),
                StepAction::Finish | StepAction::IoBlock => {
                    if on_cpu.is_some() {
                        assert_eq!(on_cpu, record.subject);
                    }
                    on_cpu = None;
                }
                StepAction::Admit | StepAction::Interrupt | StepAction::Idle => {
                    assert!(on_cpu.is_none(), "tick {}: CPU was busy", record.tick);
                }
            }
        }
    }
}

/// Ties in arrival keep input order
#[test]
fn test_admission_order_for_simultaneous_arrivals() {
    let descs = vec![
        ProcessDescriptor::new(7, 0, 1),
        ProcessDescriptor::new(3, 0, 1),
        ProcessDescriptor::new(5, 0, 1),
    ];
    let (_, records) = run_checked(&descs);

    let order: Vec<u64> = records[0].processes.iter().map(|s| s.id.as_u64()).collect();
    assert_eq!(order, vec![7, 3, 5]);

    let dispatched: Vec<u64> = records
        .iter()
        .filter(|r| r.action == StepAction::Dispatch)
        .filter_map(|r| r.subject.map(|id| id.as_u64()))
        .collect();
    assert_eq!(dispatched, vec![7, 3, 5]);
}

/// A process back from I/O queues behind processes already waiting
#[test]
fn test_returning_process_joins_ready_tail() {
    let descs = vec![with_io(0, 0, 3, &[(1, 1)]), ProcessDescriptor::new(1, 0, 1)];
    let (_, records) = run_checked(&descs);

    assert_eq!(
        actions(&records),
        vec![
            StepAction::Admit,
            StepAction::IoBlock,
            StepAction::Interrupt,
            StepAction::Dispatch,
            StepAction::Finish,
            StepAction::Dispatch,
            StepAction::Continue,
            StepAction::Finish,
        ]
    );
    // Interrupt is handled ahead of the waiting dispatch.
    assert_eq!(records[2].subject, Some(ProcessId::new(0)));
    assert_eq!(records[3].subject, Some(ProcessId::new(1)));
    let ready: Vec<u64> = records[2].processes.iter().map(|s| s.id.as_u64()).collect();
    assert_eq!(ready, vec![1, 0]);
}

#[test]
fn test_admission_precedes_interrupt() {
    let descs = vec![with_io(0, 0, 2, &[(1, 1)]), ProcessDescriptor::new(1, 3, 1)];
    let (_, records) = run_checked(&descs);

    assert_eq!(records[2].tick, 3);
    assert_eq!(records[2].action, StepAction::Admit);
    assert_eq!(records[3].action, StepAction::Interrupt);
    assert_eq!(records[4].action, StepAction::Dispatch);
    assert_eq!(records[4].subject, Some(ProcessId::new(1)));
}

/// Arrivals while the CPU is busy join the queue without an admit tick
#[test]
fn test_busy_cpu_admits_silently() {
    let (_, records) = run_checked(&processes(&[(0, 3), (3, 1)]));

    assert_eq!(
        actions(&records),
        vec![
            StepAction::Admit,
            StepAction::Dispatch,
            StepAction::Continue,
            StepAction::Continue,
            StepAction::Finish,
            StepAction::Dispatch,
            StepAction::Finish,
        ]
    );
    assert_eq!(
        records[2].state_of(ProcessId::new(1)),
        Some(ProcessState::Ready)
    );
}

#[test]
fn test_finished_processes_drop_out_of_snapshots() {
    let (_, records) = run_checked(&processes(&[(0, 1), (0, 2)]));
    let finish = tick_of(&records, 0, StepAction::Finish).unwrap() as usize;

    assert_eq!(
        records[finish - 1].state_of(ProcessId::new(0)),
        Some(ProcessState::Done)
    );
    for record in &records[finish..] {
        assert_eq!(record.state_of(ProcessId::new(0)), None);
    }
}
