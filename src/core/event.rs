use crate::core::{Pid, Ticks};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedCoreEvent {
    Admitted {
        pid: Pid,
        tick: Ticks,
    },
    Dispatched {
        pid: Pid,
        tick: Ticks,
    },
    // A strictly more urgent arrival took the CPU away
    Preempted {
        pid: Pid,
        by: Pid,
        tick: Ticks,
    },
    SliceExpired {
        pid: Pid,
        tick: Ticks,
    },
    Completed {
        pid: Pid,
        tick: Ticks,
    },
    // CPU idle even after dispatch()
    CpuIdle {
        tick: Ticks,
    },
}
