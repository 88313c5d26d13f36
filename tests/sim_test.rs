/*!
 * Simulation Engine Tests
 * Tick-loop scenarios: arrivals, I/O interleaving, termination, containment
 */

use pretty_assertions::assert_eq;
use schedsim::{
    Pcb, Pid, Policy, ProcessState, ProcessTable, Scheduler, Simulation, Tick,
};
use std::collections::BTreeMap;

fn pcb(pid: Pid, priority: u32, burst: Tick, arrival: Tick) -> Pcb {
    Pcb::new(pid, priority, burst, BTreeMap::new(), arrival).unwrap()
}

fn pcb_io(pid: Pid, priority: u32, burst: Tick, arrival: Tick, io: &[(Tick, Tick)]) -> Pcb {
    Pcb::new(pid, priority, burst, io.iter().copied().collect(), arrival).unwrap()
}

fn run(policy: Policy, processes: Vec<Pcb>) -> Simulation {
    let mut sim = Simulation::new(policy.build().unwrap());
    sim.add_processes(processes).unwrap();
    sim.run();
    sim
}

fn pid_sequence(sim: &Simulation) -> Vec<Option<Pid>> {
    sim.history().pids().collect()
}

#[test]
fn test_single_process_runs_to_completion() {
    let sim = run(Policy::Priority, vec![pcb(1, 1, 5, 0)]);

    assert_eq!(pid_sequence(&sim), vec![Some(1); 5]);
    let p = sim.table().get(1).unwrap();
    assert_eq!(p.completion_time, Some(5));
    assert_eq!(p.waiting_time, 0);
    assert_eq!(p.state, ProcessState::Terminated);
    assert_eq!(p.execution_intervals.len(), 1);
    assert_eq!(p.execution_intervals[0].start, 0);
    assert_eq!(p.execution_intervals[0].end, 5);
}

#[test]
fn test_priority_two_process_scenario() {
    let sim = run(Policy::Priority, vec![pcb(1, 1, 3, 0), pcb(2, 2, 3, 0)]);

    let expected: Vec<Option<Pid>> = [1, 1, 1, 2, 2, 2].iter().map(|&p| Some(p)).collect();
    assert_eq!(pid_sequence(&sim), expected);

    let p2 = sim.table().get(2).unwrap();
    assert_eq!(p2.waiting_time, 3);
    assert_eq!(p2.completion_time, Some(6));
    assert_eq!(sim.table().get(1).unwrap().completion_time, Some(3));
}

#[test]
fn test_round_robin_alternates_in_quantum_blocks() {
    let sim = run(
        Policy::RoundRobin { time_quantum: 2 },
        vec![pcb(1, 1, 4, 0), pcb(2, 1, 4, 0)],
    );

    let expected: Vec<Option<Pid>> =
        [1, 1, 2, 2, 1, 1, 2, 2].iter().map(|&p| Some(p)).collect();
    assert_eq!(pid_sequence(&sim), expected);
    assert_eq!(sim.table().get(1).unwrap().completion_time, Some(6));
    assert_eq!(sim.table().get(2).unwrap().completion_time, Some(8));
}

#[test]
fn test_io_blocks_after_threshold_and_resumes() {
    let sim = run(Policy::Priority, vec![pcb_io(1, 1, 5, 0, &[(2, 3)])]);

    // Two ticks of CPU, three full ticks blocked, then the rest of the burst
    let expected = vec![
        Some(1),
        Some(1),
        None,
        None,
        None,
        Some(1),
        Some(1),
        Some(1),
    ];
    assert_eq!(pid_sequence(&sim), expected);

    let p = sim.table().get(1).unwrap();
    assert_eq!(p.completion_time, Some(8));
    assert_eq!(p.execution_intervals.len(), 2);
    assert_eq!((p.execution_intervals[0].start, p.execution_intervals[0].end), (0, 2));
    assert_eq!((p.execution_intervals[1].start, p.execution_intervals[1].end), (5, 8));
}

#[test]
fn test_history_records_terminated_state_on_final_tick() {
    let sim = run(Policy::Priority, vec![pcb(1, 1, 2, 0)]);

    let entries = sim.history().entries();
    assert_eq!(entries[0].state, Some(ProcessState::Running));
    assert_eq!(entries[1].state, Some(ProcessState::Terminated));
}

#[test]
fn test_late_arrival_leaves_cpu_idle() {
    let sim = run(Policy::Sjf, vec![pcb(1, 1, 2, 3)]);

    let expected = vec![None, None, None, Some(1), Some(1)];
    assert_eq!(pid_sequence(&sim), expected);
    assert_eq!(sim.table().get(1).unwrap().completion_time, Some(5));
}

#[test]
fn test_empty_simulation_completes_immediately() {
    let mut sim = Simulation::new(Policy::Priority.build().unwrap());
    sim.run();
    assert!(sim.history().is_empty());
}

#[test]
fn test_max_ticks_bounds_the_run() {
    let mut sim = Simulation::new(Policy::Priority.build().unwrap()).with_max_ticks(4);
    sim.add_process(pcb(1, 1, 10, 0)).unwrap();
    sim.run();

    assert_eq!(sim.history().len(), 4);
    let p = sim.table().get(1).unwrap();
    assert_eq!(p.completion_time, None);
    assert_eq!(p.state, ProcessState::Running);
    assert_eq!(p.executed_time, 4);
    assert_eq!(p.remaining_time, 6);
}

#[test]
fn test_duplicate_pid_rejected_before_run() {
    let mut sim = Simulation::new(Policy::Priority.build().unwrap());
    sim.add_process(pcb(1, 1, 5, 0)).unwrap();
    assert!(sim.add_process(pcb(1, 2, 3, 0)).is_err());
}

#[test]
fn test_rerun_is_deterministic() {
    let processes = vec![
        pcb_io(1, 3, 6, 0, &[(2, 2)]),
        pcb(2, 1, 4, 1),
        pcb(3, 5, 3, 2),
    ];
    let mut sim = Simulation::new(
        Policy::Mlfq {
            time_quantum: 2,
            num_queues: 3,
        }
        .build()
        .unwrap(),
    );
    sim.add_processes(processes).unwrap();

    let first = sim.run().clone();
    let second = sim.run().clone();
    assert_eq!(first, second);
}

/// A scheduler that panics on selection; the engine must contain it.
struct FaultyScheduler;

impl Scheduler for FaultyScheduler {
    fn name(&self) -> &'static str {
        "faulty"
    }
    fn add(&mut self, _pid: Pid) {}
    fn block(&mut self, _pid: Pid) {}
    fn reconcile_io(&mut self, _table: &mut ProcessTable) {}
    fn age(&mut self, _table: &mut ProcessTable) {}
    fn terminate(&mut self, _pid: Pid, _tick: Tick, _table: &mut ProcessTable) {}
    fn select(&mut self, _table: &ProcessTable) -> Option<Pid> {
        panic!("broken policy")
    }
    fn terminated(&self) -> &[Pid] {
        &[]
    }
    fn reset(&mut self) {}
}

#[test]
fn test_panicking_scheduler_yields_idle_ticks() {
    let mut sim = Simulation::new(Box::new(FaultyScheduler)).with_max_ticks(3);
    sim.add_process(pcb(1, 1, 5, 0)).unwrap();
    sim.run();

    assert_eq!(pid_sequence(&sim), vec![None, None, None]);
    assert_eq!(sim.table().get(1).unwrap().state, ProcessState::Ready);
}
