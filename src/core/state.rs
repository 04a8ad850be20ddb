use rustc_hash::FxHashMap;
use serde::Serialize;
use slotmap::{SlotMap, new_key_type};
use std::collections::VecDeque;

// Index into the process arena, which keeps input order
pub type ProcId = usize;
pub type Pid = u32;
pub type Ticks = u64;
pub type Priority = i32;

new_key_type! {
    pub struct DsqId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProcState {
    Unarrived,
    Ready,
    Running,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: Pid,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub priority: Priority,
    pub remaining: Ticks,
    pub first_execution: Option<Ticks>,
    pub finished: bool,
    pub state: ProcState,
    // Ticks charged since the last dispatch; reset on preemption
    pub consumed_timeslice: Ticks,
}

impl ProcessRecord {
    pub fn new(pid: Pid, arrival: Ticks, burst: Ticks, priority: Priority) -> Self {
        Self {
            pid,
            arrival,
            burst,
            priority,
            remaining: burst,
            first_execution: None,
            finished: false,
            state: ProcState::Unarrived,
            consumed_timeslice: 0,
        }
    }
}

/// FIFO dispatch queue.
#[derive(Debug, Default)]
pub struct Dsq {
    procs: VecDeque<ProcId>,
}

impl Dsq {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, proc_id: ProcId) -> bool {
        self.procs.contains(&proc_id)
    }

    pub fn is_empty(&self) -> bool {
        self.procs.is_empty()
    }
}

#[derive(Debug)]
pub struct SchedCtx {
    pub now: Ticks,
    pub current: Option<ProcId>,
    pub procs: Vec<ProcessRecord>,
    pub dsqs: SlotMap<DsqId, Dsq>,
    pub proc_to_dsq: FxHashMap<ProcId, DsqId>,
    pub global_dsq_id: DsqId,
    pub finish_map: FxHashMap<Pid, Ticks>,

    pid_index: FxHashMap<Pid, ProcId>,
}

impl SchedCtx {
    pub fn new(procs: Vec<ProcessRecord>) -> Self {
        let mut dsqs = SlotMap::with_key();
        let global_dsq_id = dsqs.insert(Dsq::new());

        let pid_index = procs
            .iter()
            .enumerate()
            .map(|(id, proc)| (proc.pid, id))
            .collect();

        Self {
            now: 0,
            current: None,
            procs,
            dsqs,
            proc_to_dsq: FxHashMap::default(),
            global_dsq_id,
            finish_map: FxHashMap::default(),
            pid_index,
        }
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn create_dsq(&mut self) -> DsqId {
        self.dsqs.insert(Dsq::new())
    }

    pub fn dsq_push_back(&mut self, dsq_id: DsqId, proc_id: ProcId) {
        assert!(
            !self.proc_to_dsq.contains_key(&proc_id),
            "P{} already present in some DSQ",
            self.procs[proc_id].pid
        );

        let proc = self.proc(proc_id);
        debug_assert_eq!(
            proc.state,
            ProcState::Ready,
            "P{} must be Ready when enqueued",
            proc.pid
        );

        let dsq = self.dsqs.get_mut(dsq_id).expect("Unknown DSQ");
        dsq.procs.push_back(proc_id);
        self.proc_to_dsq.insert(proc_id, dsq_id);
    }

    pub fn dsq_pop_front(&mut self, dsq_id: DsqId) -> Option<ProcId> {
        let proc_id = self.dsqs.get_mut(dsq_id)?.procs.pop_front()?;

        let removed = self.proc_to_dsq.remove(&proc_id);
        debug_assert!(removed.is_some(), "P{proc_id} missing DSQ membership");

        Some(proc_id)
    }

    pub fn dsq_is_empty(&self, dsq_id: DsqId) -> bool {
        self.dsqs.get(dsq_id).is_none_or(Dsq::is_empty)
    }

    pub fn proc_in_any_dsq(&self, proc_id: ProcId) -> bool {
        self.proc_to_dsq.contains_key(&proc_id)
    }

    pub fn proc(&self, proc_id: ProcId) -> &ProcessRecord {
        &self.procs[proc_id]
    }

    pub fn proc_mut(&mut self, proc_id: ProcId) -> &mut ProcessRecord {
        &mut self.procs[proc_id]
    }

    pub fn proc_by_pid(&self, pid: Pid) -> Option<&ProcessRecord> {
        self.pid_index.get(&pid).map(|&id| &self.procs[id])
    }

    pub fn global_dsq(&self) -> DsqId {
        self.global_dsq_id
    }

    pub fn cpu_is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn all_finished(&self) -> bool {
        self.procs.iter().all(|proc| proc.finished)
    }

    pub fn mark_ready(&mut self, proc_id: ProcId) {
        let proc = self.proc_mut(proc_id);
        debug_assert!(
            proc.state != ProcState::Finished,
            "Finished P{} cannot become ready",
            proc.pid
        );
        proc.state = ProcState::Ready;
    }

    // Return previous state
    pub fn set_running(&mut self, proc_id: ProcId) -> ProcState {
        debug_assert!(
            !self.proc_to_dsq.contains_key(&proc_id),
            "Running P{proc_id} must not be enqueued"
        );
        debug_assert!(self.current.is_none(), "CPU already running a process");

        let now = self.now;
        self.current = Some(proc_id);
        let proc = self.proc_mut(proc_id);
        let prev_state = proc.state;
        proc.state = ProcState::Running;
        proc.consumed_timeslice = 0;
        if proc.first_execution.is_none() {
            proc.first_execution = Some(now);
        }
        prev_state
    }

    // Take the current process off the CPU and make it Ready again
    pub fn take_current(&mut self) -> Option<ProcId> {
        let proc_id = self.current.take()?;
        let proc = self.proc_mut(proc_id);
        proc.state = ProcState::Ready;
        proc.consumed_timeslice = 0;
        Some(proc_id)
    }

    // Charge one tick of service to the current process
    pub fn charge_current(&mut self) -> Option<ProcId> {
        let proc_id = self.current?;
        let proc = self.proc_mut(proc_id);
        debug_assert!(proc.remaining > 0, "P{} charged past its burst", proc.pid);
        proc.remaining = proc.remaining.saturating_sub(1);
        proc.consumed_timeslice = proc.consumed_timeslice.saturating_add(1);
        Some(proc_id)
    }

    pub fn mark_finished(&mut self, proc_id: ProcId, finish_tick: Ticks) {
        debug_assert!(
            !self.proc_to_dsq.contains_key(&proc_id),
            "Finishing P{proc_id} that is still enqueued"
        );

        if self.current == Some(proc_id) {
            self.current = None;
        }

        let proc = &mut self.procs[proc_id];
        debug_assert!(
            proc.state == ProcState::Running,
            "P{} must have been running before marked finished",
            proc.pid
        );
        debug_assert_eq!(proc.remaining, 0, "P{} finished with work left", proc.pid);

        proc.state = ProcState::Finished;
        proc.finished = true;
        proc.consumed_timeslice = 0;
        self.finish_map.insert(proc.pid, finish_tick);
    }
}
