use super::{
    process::{ProcessSpec, build_records},
    report::{SimulationResult, aggregate},
    timeline::Timeline,
};
use crate::{
    core::{ProcId, SchedCoreEvent, driver::SchedCore},
    error::Result,
    params::Quantum,
    scheduler::Scheduler,
};

/// One simulation run over a private copy of the workload.
pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
    // Sorted by arrival, ties in input order
    backlog: Vec<ProcId>,
    backlog_cursor: usize,
    timeline: Timeline,
    quantum: Quantum,
}

impl<S: Scheduler> Sim<S> {
    pub fn new(specs: &[ProcessSpec], quantum: Quantum) -> Result<Self> {
        let records = build_records(specs)?;

        let mut backlog: Vec<ProcId> = (0..records.len()).collect();
        // Stable, so equal arrivals keep input order
        backlog.sort_by_key(|&id| records[id].arrival);

        let timeline = Timeline::new(records.iter().map(|r| r.pid).collect());

        Ok(Self {
            core: SchedCore::<S>::new(records, quantum),
            backlog,
            backlog_cursor: 0,
            timeline,
            quantum,
        })
    }

    /// Run one tick: admit, dispatch, snapshot, charge, admit again, then
    /// settle the slice.
    pub fn step(&mut self) -> Vec<SchedCoreEvent> {
        let mut events = Vec::new();

        self.handle_arrivals(&mut events);
        self.core.try_dispatch(&mut events);
        self.timeline.record(&self.core.ctx);
        self.core.tick(&mut events);
        // Arrivals on the boundary queue ahead of an expired slice
        self.handle_arrivals(&mut events);
        self.core.end_tick(&mut events);

        for event in &events {
            log::trace!("{} {:?}", self.core.scheduler.policy(), event);
        }
        events
    }

    fn handle_arrivals(&mut self, events: &mut Vec<SchedCoreEvent>) {
        let now = self.core.now();
        while let Some(&proc_id) = self.backlog.get(self.backlog_cursor) {
            if self.core.ctx.proc(proc_id).arrival > now {
                break;
            }
            self.backlog_cursor += 1;
            self.core.admit(proc_id, events);
        }
    }

    pub fn all_completed(&self) -> bool {
        self.core.ctx.all_finished()
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn run(mut self) -> SimulationResult {
        let policy = self.core.scheduler.policy();
        log::debug!(
            "{policy} run: {} processes, quantum {}",
            self.core.ctx.procs.len(),
            self.quantum
        );

        while !self.all_completed() {
            self.step();
        }

        self.timeline.mark_finished(&self.core.ctx.finish_map);
        let result = aggregate(&self.core.ctx, self.timeline, policy, self.quantum);

        log::debug!(
            "{policy} done after {} ticks: ACT {:.2}, AWT {:.2}",
            self.core.now(),
            result.average_turnaround,
            result.average_waiting
        );
        result
    }
}
