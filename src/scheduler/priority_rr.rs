use std::{cmp::Reverse, collections::BTreeMap};

use super::{ENQ_PREEMPT, EnqueueFlags, Policy, ProcId, Quantum, SchedCtx, Scheduler};
use crate::core::{DsqId, Priority, Ticks};

/// Strict priority across bands, Round Robin inside a band.
///
/// Every distinct priority gets its own FIFO DSQ, created the first time a
/// process of that priority is queued. Dispatch scans bands from the most
/// urgent down and takes the head of the first non-empty one.
pub struct PriorityRrScheduler {
    // Reverse so iteration visits the highest priority first
    bands: BTreeMap<Reverse<Priority>, DsqId>,
    quantum: Ticks,
}

impl PriorityRrScheduler {
    fn band(&mut self, ctx: &mut SchedCtx, priority: Priority) -> DsqId {
        *self
            .bands
            .entry(Reverse(priority))
            .or_insert_with(|| ctx.create_dsq())
    }
}

impl Scheduler for PriorityRrScheduler {
    fn init(_ctx: &mut SchedCtx, quantum: Quantum) -> Self {
        Self {
            bands: BTreeMap::new(),
            quantum: quantum.get(),
        }
    }

    fn policy(&self) -> Policy {
        Policy::PriorityRoundRobin
    }

    fn enqueue(&mut self, ctx: &mut SchedCtx, proc_id: ProcId, flags: EnqueueFlags) {
        let priority = ctx.proc(proc_id).priority;
        let dsq = self.band(ctx, priority);
        if flags & ENQ_PREEMPT != 0 {
            log::trace!(
                "P{} back to tail of band {priority}",
                ctx.proc(proc_id).pid
            );
        }
        ctx.dsq_push_back(dsq, proc_id);
    }

    fn dispatch(&mut self, ctx: &mut SchedCtx) -> Option<ProcId> {
        let dsq = self
            .bands
            .values()
            .copied()
            .find(|&dsq| !ctx.dsq_is_empty(dsq))?;
        ctx.dsq_pop_front(dsq)
    }

    fn should_preempt(&self, ctx: &SchedCtx, arriving: ProcId, running: ProcId) -> bool {
        ctx.proc(arriving).priority > ctx.proc(running).priority
    }

    fn slice_expired(&self, ctx: &SchedCtx, running: ProcId) -> bool {
        ctx.proc(running).consumed_timeslice >= self.quantum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProcessRecord;
    use crate::scheduler::ENQ_WAKEUP;

    fn setup() -> (SchedCtx, PriorityRrScheduler) {
        let mut ctx = SchedCtx::new(vec![
            ProcessRecord::new(1, 0, 3, 1),
            ProcessRecord::new(2, 0, 3, 5),
            ProcessRecord::new(3, 0, 3, 1),
            ProcessRecord::new(4, 0, 3, -2),
        ]);
        let quantum = Quantum::new(2).expect("valid quantum");
        let sched = PriorityRrScheduler::init(&mut ctx, quantum);
        (ctx, sched)
    }

    #[test]
    fn dispatch_scans_bands_from_most_urgent() {
        let (mut ctx, mut sched) = setup();
        for proc_id in [3, 0, 1, 2] {
            ctx.mark_ready(proc_id);
            sched.enqueue(&mut ctx, proc_id, ENQ_WAKEUP);
        }

        let mut order = Vec::new();
        while let Some(proc_id) = sched.dispatch(&mut ctx) {
            order.push(ctx.proc(proc_id).pid);
        }
        assert_eq!(order, vec![2, 1, 3, 4]);
    }

    #[test]
    fn preemption_needs_strictly_higher_priority() {
        let (ctx, sched) = setup();
        assert!(sched.should_preempt(&ctx, 1, 0));
        assert!(!sched.should_preempt(&ctx, 2, 0));
        assert!(!sched.should_preempt(&ctx, 0, 1));
    }
}
