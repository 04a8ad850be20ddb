use std::{env, error::Error, fs};

use rand::prelude::*;
use sched_sim::{
    Policy, ProcessSpec, Quantum, SimulationParams, SimulationResult, Workload, simulate,
    sweep_quantum,
};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let workload = match env::args().nth(1) {
        Some(path) => Workload::from_json(&fs::read_to_string(&path)?)?,
        None => Workload {
            params: SimulationParams::round_robin(Quantum::DEFAULT),
            processes: bernoulli_processes(20, 0.4, 0.3, 2, 6, 0),
        },
    };
    let quantum = workload.params.quantum;

    for policy in [Policy::Fcfs, Policy::RoundRobin, Policy::PriorityRoundRobin] {
        let result = simulate(&SimulationParams::new(policy, quantum), &workload.processes)?;
        print_result(&result);
    }

    let sweep = sweep_quantum(&workload.processes)?;
    println!("Quantum sweep (Round Robin):");
    for point in &sweep.points {
        let marker = if point.quantum == sweep.optimal.quantum { " <- optimal" } else { "" };
        println!("  q={:<2} AWT {:.2}{marker}", point.quantum.get(), point.average_waiting);
    }
    Ok(())
}

fn print_result(result: &SimulationResult) {
    match result.policy {
        Policy::Fcfs => println!("== {}", result.policy),
        _ => println!("== {} (quantum {})", result.policy, result.quantum),
    }

    println!("PID | CT | WT | CO | FI");
    for p in &result.processes {
        println!(
            "P{:<2} | {:>2} | {:>2} | {:>2} | {:>2}",
            p.pid, p.turnaround, p.waiting, p.start_tick, p.finish_index
        );
    }
    println!("Average turnaround: {:.2} ticks", result.average_turnaround);
    println!("Average waiting: {:.2} ticks", result.average_waiting);

    for row in result.timeline.grid() {
        let quoted: Vec<_> = row.iter().map(|cell| format!("\"{cell}\"")).collect();
        println!("{}", quoted.join(","));
    }
    println!();
}

// One arrival per tick with probability `p_arrival`, short or long bursts,
// priorities in 1..=3.
fn bernoulli_processes(
    ticks: i64,
    p_arrival: f64,
    p_short: f64,
    short_burst: i64,
    long_burst: i64,
    seed: u64,
) -> Vec<ProcessSpec> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut processes = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let burst = if rng.random::<f64>() < p_short {
                short_burst
            } else {
                long_burst
            };

            let pid = processes.len() as i64 + 1;
            processes.push(ProcessSpec::new(pid, t, burst).with_priority(rng.random_range(1..=3)));
        }
    }

    if processes.is_empty() {
        processes.push(ProcessSpec::new(1, 0, long_burst));
    }
    processes
}
