use super::{
    event::SchedCoreEvent,
    observer::Observer,
    state::{ProcId, ProcessRecord, SchedCtx, Ticks},
};
use crate::{
    params::Quantum,
    scheduler::{ENQ_PREEMPT, ENQ_REENQ, ENQ_WAKEUP, Scheduler},
};

/// Single-CPU core: owns the context and the scheduler, and applies the
/// scheduler's decisions one tick at a time.
pub struct SchedCore<S: Scheduler> {
    pub ctx: SchedCtx,
    pub scheduler: S,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(procs: Vec<ProcessRecord>, quantum: Quantum) -> Self {
        let mut ctx = SchedCtx::new(procs);
        let scheduler = S::init(&mut ctx, quantum);
        let observer = Observer::new();
        Self {
            ctx,
            scheduler,
            observer,
        }
    }

    /// Make an arrived process Ready. If the scheduler wants the newcomer to
    /// displace the running process, the running process loses the CPU and
    /// its slice on the spot.
    pub fn admit(&mut self, proc_id: ProcId, events: &mut Vec<SchedCoreEvent>) {
        self.ctx.mark_ready(proc_id);
        let pid = self.ctx.proc(proc_id).pid;
        events.push(SchedCoreEvent::Admitted {
            pid,
            tick: self.ctx.now,
        });

        self.scheduler.enqueue(&mut self.ctx, proc_id, ENQ_WAKEUP);

        let Some(running) = self.ctx.current else {
            return;
        };
        // An expired slice is re-queued by end_tick, behind every arrival of
        // this tick.
        if self.scheduler.slice_expired(&self.ctx, running)
            || !self.scheduler.should_preempt(&self.ctx, proc_id, running)
        {
            return;
        }

        self.ctx.take_current();
        self.scheduler.enqueue(&mut self.ctx, running, ENQ_PREEMPT);
        events.push(SchedCoreEvent::Preempted {
            pid: self.ctx.proc(running).pid,
            by: pid,
            tick: self.ctx.now,
        });
    }

    /// Give the CPU work if it is idle.
    pub fn try_dispatch(&mut self, events: &mut Vec<SchedCoreEvent>) {
        if !self.ctx.cpu_is_idle() {
            return;
        }

        let tick = self.ctx.now;
        match self.scheduler.dispatch(&mut self.ctx) {
            Some(proc_id) => {
                self.ctx.set_running(proc_id);
                events.push(SchedCoreEvent::Dispatched {
                    pid: self.ctx.proc(proc_id).pid,
                    tick,
                });
            }
            // Scheduler left CPU idle.
            None => events.push(SchedCoreEvent::CpuIdle { tick }),
        }
    }

    /// Charge one unit of service to the running process and advance the
    /// clock. Returns the process if that unit was its last one; its finish
    /// tick is the boundary after the unit.
    pub fn tick(&mut self, events: &mut Vec<SchedCoreEvent>) -> Option<ProcId> {
        let charged = self.ctx.charge_current();
        self.ctx.advance_time(1);

        let proc_id = charged?;
        if self.ctx.proc(proc_id).remaining > 0 {
            return None;
        }

        let now = self.ctx.now;
        self.ctx.mark_finished(proc_id, now);
        events.push(SchedCoreEvent::Completed {
            pid: self.ctx.proc(proc_id).pid,
            tick: now,
        });
        Some(proc_id)
    }

    /// Close the tick: re-queue the running process at the tail if its slice
    /// ran out. Must run after the tick's arrivals were admitted so they
    /// queue ahead of it.
    pub fn end_tick(&mut self, events: &mut Vec<SchedCoreEvent>) {
        if let Some(running) = self.ctx.current {
            if self.scheduler.slice_expired(&self.ctx, running) {
                self.ctx.take_current();
                self.scheduler.enqueue(&mut self.ctx, running, ENQ_REENQ);
                events.push(SchedCoreEvent::SliceExpired {
                    pid: self.ctx.proc(running).pid,
                    tick: self.ctx.now,
                });
            }
        }

        self.observer.observe(&self.ctx);
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}
