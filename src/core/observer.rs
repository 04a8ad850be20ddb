use super::state::{ProcState, SchedCtx};

#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SchedCtx) {
        self.step += 1;

        if let Some(proc_id) = ctx.current {
            let proc = ctx.proc(proc_id);
            debug_assert_eq!(
                proc.state,
                ProcState::Running,
                "current P{} must be Running",
                proc.pid
            );
            debug_assert!(
                !ctx.proc_in_any_dsq(proc_id),
                "Running P{} must not appear in any DSQ",
                proc.pid
            );
        }

        for (proc_id, proc) in ctx.procs.iter().enumerate() {
            debug_assert!(
                proc.remaining <= proc.burst,
                "P{} remaining {} exceeds burst {}",
                proc.pid,
                proc.remaining,
                proc.burst
            );
            debug_assert_eq!(
                proc.finished,
                proc.remaining == 0 && ctx.finish_map.contains_key(&proc.pid),
                "P{} finished flag out of sync with finish map",
                proc.pid
            );

            match proc.state {
                ProcState::Unarrived => debug_assert!(
                    proc.arrival > ctx.now,
                    "P{} arrived at {} but was never admitted",
                    proc.pid,
                    proc.arrival
                ),
                ProcState::Ready => debug_assert!(
                    ctx.proc_in_any_dsq(proc_id),
                    "Ready P{} is not queued",
                    proc.pid
                ),
                ProcState::Running => debug_assert_eq!(
                    ctx.current,
                    Some(proc_id),
                    "P{} Running but not current",
                    proc.pid
                ),
                ProcState::Finished => debug_assert!(
                    !ctx.proc_in_any_dsq(proc_id),
                    "Finished P{} still queued",
                    proc.pid
                ),
            }
        }

        for (&proc_id, &dsq_id) in &ctx.proc_to_dsq {
            if let Some(dsq) = ctx.dsqs.get(dsq_id) {
                debug_assert!(
                    dsq.contains(proc_id),
                    "proc_to_dsq claims P{proc_id} in DSQ {dsq_id:?}, but queue does not contain it"
                );
            } else {
                debug_assert!(false, "proc_to_dsq references unknown DSQ {dsq_id:?}");
            }
        }
    }
}
