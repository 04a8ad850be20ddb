pub mod fcfs;
pub mod priority_rr;
pub mod round_robin;

use crate::{
    core::state::{ProcId, SchedCtx},
    params::{Policy, Quantum},
};
pub use fcfs::FcfsScheduler;
pub use priority_rr::PriorityRrScheduler;
pub use round_robin::RoundRobinScheduler;

pub type EnqueueFlags = u64;

// First admission from the arrival backlog
pub const ENQ_WAKEUP: EnqueueFlags = 1 << 0;
// Displaced by a more urgent arrival
pub const ENQ_PREEMPT: EnqueueFlags = 1 << 1;
// Slice expired with work left
pub const ENQ_REENQ: EnqueueFlags = 1 << 2;

/// A single-CPU scheduling discipline.
///
/// The driver owns the tick loop; implementations only decide where ready
/// processes queue up, who runs next, and when the running process must give
/// the CPU back.
pub trait Scheduler {
    fn init(ctx: &mut SchedCtx, quantum: Quantum) -> Self;

    fn policy(&self) -> Policy;

    /// Queue a Ready process. The process is not in any DSQ yet.
    fn enqueue(&mut self, ctx: &mut SchedCtx, proc_id: ProcId, flags: EnqueueFlags);

    /// Pop the process that should run next, if any is ready.
    fn dispatch(&mut self, ctx: &mut SchedCtx) -> Option<ProcId>;

    /// Called when `arriving` is admitted while `running` holds the CPU.
    fn should_preempt(&self, _ctx: &SchedCtx, _arriving: ProcId, _running: ProcId) -> bool {
        false
    }

    /// Called after every charged tick the running process survives.
    fn slice_expired(&self, _ctx: &SchedCtx, _running: ProcId) -> bool {
        false
    }
}
