use average::{Estimate, Mean};
use serde::Serialize;

use super::timeline::Timeline;
use crate::{
    core::{Pid, Priority, SchedCtx, Ticks},
    params::{Policy, Quantum},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessResult {
    pub pid: Pid,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub priority: Priority,
    pub finish_tick: Ticks,
    pub turnaround: Ticks,
    pub waiting: Ticks,
    pub start_tick: Ticks,
    /// Tick of the `Finished` marker found on the timeline, minus one. Not
    /// the same metric as `finish_tick`, even though a correct run has
    /// `finish_index == finish_tick - 1`.
    pub finish_index: Ticks,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub policy: Policy,
    pub quantum: Quantum,
    pub processes: Vec<ProcessResult>,
    pub average_turnaround: f64,
    pub average_waiting: f64,
    pub timeline: Timeline,
}

impl SimulationResult {
    pub fn process(&self, pid: Pid) -> Option<&ProcessResult> {
        self.processes.iter().find(|p| p.pid == pid)
    }
}

/// Derive per-process metrics from a finished run. Processes come out in
/// input order.
pub fn aggregate(
    ctx: &SchedCtx,
    timeline: Timeline,
    policy: Policy,
    quantum: Quantum,
) -> SimulationResult {
    let processes: Vec<ProcessResult> = ctx
        .procs
        .iter()
        .map(|proc| {
            let finish_tick = ctx
                .finish_map
                .get(&proc.pid)
                .copied()
                .expect("Finished process missing from finish map");
            let turnaround = finish_tick - proc.arrival;
            let waiting = turnaround - proc.burst;

            let start_tick = proc.first_execution.unwrap_or_else(|| {
                log::warn!("P{} finished without ever being dispatched", proc.pid);
                debug_assert!(false, "P{} was never dispatched", proc.pid);
                finish_tick - proc.burst
            });

            let finish_index = timeline
                .finish_marker(proc.pid)
                .map(|tick| tick.saturating_sub(1))
                .unwrap_or(finish_tick);

            ProcessResult {
                pid: proc.pid,
                arrival: proc.arrival,
                burst: proc.burst,
                priority: proc.priority,
                finish_tick,
                turnaround,
                waiting,
                start_tick,
                finish_index,
            }
        })
        .collect();

    let average_turnaround = avg(processes.iter().map(|p| p.turnaround as f64));
    let average_waiting = avg(processes.iter().map(|p| p.waiting as f64));

    SimulationResult {
        policy,
        quantum,
        processes,
        average_turnaround,
        average_waiting,
        timeline,
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().estimate()
}

/// Round to two decimals, the precision averages are compared at.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
