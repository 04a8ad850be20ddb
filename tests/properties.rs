use rand::prelude::*;
use sched_sim::{
    CellState, Policy, ProcessSpec, Quantum, SimulationParams, SimulationResult, simulate,
};

const POLICIES: [Policy; 3] = [Policy::Fcfs, Policy::RoundRobin, Policy::PriorityRoundRobin];

fn random_workload(rng: &mut StdRng) -> Vec<ProcessSpec> {
    let n = rng.random_range(1..=8);
    (1..=n)
        .map(|pid| {
            let spec = ProcessSpec::new(pid, rng.random_range(0..12), rng.random_range(1..=6));
            if rng.random_bool(0.8) {
                spec.with_priority(rng.random_range(0..4))
            } else {
                spec
            }
        })
        .collect()
}

fn check_invariants(specs: &[ProcessSpec], result: &SimulationResult) {
    let timeline = &result.timeline;

    let total_burst: i64 = specs.iter().map(|s| s.burst).sum();
    assert_eq!(timeline.executing_ticks() as i64, total_burst);

    let last_finish = result.processes.iter().map(|p| p.finish_tick).max();
    assert_eq!(last_finish, Some(timeline.len() as u64 - 1));

    for (spec, p) in specs.iter().zip(&result.processes) {
        assert_eq!(p.pid as i64, spec.pid);
        assert_eq!(p.turnaround, p.waiting + p.burst);
        assert_eq!(p.turnaround, p.finish_tick - p.arrival);
        assert!(p.start_tick >= p.arrival);
        assert!(p.start_tick + p.burst <= p.finish_tick);
        assert_eq!(p.finish_index, p.finish_tick - 1);

        let row = timeline.row(p.pid).expect("pid on timeline");
        let executing = row.iter().filter(|&&c| c == CellState::Executing).count();
        assert_eq!(executing as u64, p.burst);
        assert_eq!(row[p.finish_tick as usize], CellState::Finished);
        assert_eq!(row[p.start_tick as usize], CellState::Executing);
        assert!(
            row[..p.arrival as usize].iter().all(|&c| c == CellState::Idle),
            "P{} shown before its arrival",
            p.pid
        );
    }

    // Exactly one process executes on every non-idle tick.
    for snapshot in timeline.snapshots() {
        let executing = snapshot.iter().filter(|&&c| c == CellState::Executing).count();
        assert!(executing <= 1);
    }

    let n = result.processes.len() as f64;
    let mean_waiting = result.processes.iter().map(|p| p.waiting as f64).sum::<f64>() / n;
    assert!((result.average_waiting - mean_waiting).abs() < 1e-9);
}

#[test]
fn random_workloads_hold_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..300 {
        let specs = random_workload(&mut rng);
        let quantum = Quantum::new(rng.random_range(1..=4)).expect("valid quantum");
        for policy in POLICIES {
            let result = simulate(&SimulationParams::new(policy, quantum), &specs)
                .expect("valid workload");
            check_invariants(&specs, &result);
        }
    }
}

#[test]
fn fcfs_bursts_are_contiguous() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let specs = random_workload(&mut rng);
        let result = simulate(&SimulationParams::fcfs(), &specs).expect("valid workload");
        for p in &result.processes {
            let row = result.timeline.row(p.pid).expect("pid on timeline");
            let start = p.start_tick as usize;
            let end = start + p.burst as usize;
            assert!(row[start..end].iter().all(|&c| c == CellState::Executing));
            assert_eq!(p.finish_tick as usize, end);
        }
    }
}

#[test]
fn runs_are_repeatable_and_leave_input_untouched() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let specs = random_workload(&mut rng);
        let before = specs.clone();
        for policy in POLICIES {
            let params = SimulationParams::new(policy, Quantum::DEFAULT);
            let first = simulate(&params, &specs).expect("valid workload");
            let second = simulate(&params, &specs).expect("valid workload");
            assert_eq!(first, second);
            assert_eq!(
                first.average_waiting.to_bits(),
                second.average_waiting.to_bits()
            );
        }
        assert_eq!(specs, before);
    }
}

#[test]
fn single_priority_band_matches_round_robin() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..100 {
        let specs: Vec<_> = random_workload(&mut rng)
            .into_iter()
            .map(|s| s.with_priority(1))
            .collect();
        let quantum = Quantum::new(rng.random_range(1..=4)).expect("valid quantum");

        let rr = simulate(&SimulationParams::round_robin(quantum), &specs).expect("valid");
        let prr =
            simulate(&SimulationParams::priority_round_robin(quantum), &specs).expect("valid");
        assert_eq!(rr.timeline, prr.timeline);
        assert_eq!(rr.average_waiting, prr.average_waiting);
    }
}
