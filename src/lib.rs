//! Tick-level simulation of FCFS, Round Robin and priority Round Robin CPU
//! scheduling over a small synthetic workload.
//!
//! ```
//! use sched_sim::{ProcessSpec, SimulationParams, simulate};
//!
//! let workload = [ProcessSpec::new(1, 0, 4), ProcessSpec::new(2, 1, 3)];
//! let result = simulate(&SimulationParams::fcfs(), &workload).unwrap();
//! assert_eq!(result.average_waiting, 1.5);
//! ```

pub mod core;
pub mod error;
pub mod params;
pub mod scheduler;
pub mod sim;

pub use error::{Result, SimError};
pub use params::{Policy, Quantum, SimulationParams, Workload};
pub use scheduler::Scheduler;
pub use sim::{
    CellState, ProcessResult, ProcessSpec, QuantumSweep, Sim, SimulationResult, SweepReport,
    Timeline,
};

use scheduler::{FcfsScheduler, PriorityRrScheduler, RoundRobinScheduler};

/// Run one simulation with the policy and quantum in `params`. The workload
/// is only read; every run works on its own copy.
pub fn simulate(params: &SimulationParams, processes: &[ProcessSpec]) -> Result<SimulationResult> {
    let result = match params.policy {
        Policy::Fcfs => Sim::<FcfsScheduler>::new(processes, params.quantum)?.run(),
        Policy::RoundRobin => Sim::<RoundRobinScheduler>::new(processes, params.quantum)?.run(),
        Policy::PriorityRoundRobin => {
            Sim::<PriorityRrScheduler>::new(processes, params.quantum)?.run()
        }
    };
    Ok(result)
}

/// Round Robin over quanta 1..=10, picking the lowest average waiting time.
pub fn sweep_quantum(processes: &[ProcessSpec]) -> Result<SweepReport> {
    QuantumSweep::default().run(processes)
}
