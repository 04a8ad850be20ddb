use super::{EnqueueFlags, Policy, ProcId, Quantum, SchedCtx, Scheduler};
use crate::core::Ticks;

pub struct RoundRobinScheduler {
    quantum: Ticks,
}

impl Scheduler for RoundRobinScheduler {
    fn init(_ctx: &mut SchedCtx, quantum: Quantum) -> Self {
        Self {
            quantum: quantum.get(),
        }
    }

    fn policy(&self) -> Policy {
        Policy::RoundRobin
    }

    fn enqueue(&mut self, ctx: &mut SchedCtx, proc_id: ProcId, _flags: EnqueueFlags) {
        let dsq = ctx.global_dsq();
        ctx.dsq_push_back(dsq, proc_id);
    }

    fn dispatch(&mut self, ctx: &mut SchedCtx) -> Option<ProcId> {
        ctx.dsq_pop_front(ctx.global_dsq())
    }

    fn slice_expired(&self, ctx: &SchedCtx, running: ProcId) -> bool {
        ctx.proc(running).consumed_timeslice >= self.quantum
    }
}
