use super::{EnqueueFlags, Policy, ProcId, Quantum, SchedCtx, Scheduler};

/// Non-preemptive, arrival-ordered. The head of the global DSQ runs to
/// completion.
pub struct FcfsScheduler;

impl Scheduler for FcfsScheduler {
    fn init(_ctx: &mut SchedCtx, _quantum: Quantum) -> Self {
        Self
    }

    fn policy(&self) -> Policy {
        Policy::Fcfs
    }

    fn enqueue(&mut self, ctx: &mut SchedCtx, proc_id: ProcId, _flags: EnqueueFlags) {
        let dsq = ctx.global_dsq();
        ctx.dsq_push_back(dsq, proc_id);
    }

    fn dispatch(&mut self, ctx: &mut SchedCtx) -> Option<ProcId> {
        ctx.dsq_pop_front(ctx.global_dsq())
    }
}
