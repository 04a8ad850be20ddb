use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::core::{Pid, ProcState, SchedCtx, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CellState {
    Executing,
    ReadyWaiting,
    Idle,
    Finished,
}

impl CellState {
    /// Single-letter code used by the Gantt exports.
    pub fn code(self) -> &'static str {
        match self {
            CellState::Executing => "E",
            CellState::ReadyWaiting => "L",
            CellState::Finished => "F",
            CellState::Idle => "",
        }
    }
}

/// One column of the Gantt chart: a state for every process, in input
/// order.
pub type Snapshot = Vec<CellState>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timeline {
    pids: Vec<Pid>,
    snapshots: Vec<Snapshot>,
}

impl Timeline {
    pub fn new(pids: Vec<Pid>) -> Self {
        Self {
            pids,
            snapshots: Vec::new(),
        }
    }

    /// Snapshot every process as of the tick about to be charged.
    pub fn record(&mut self, ctx: &SchedCtx) {
        debug_assert_eq!(
            self.snapshots.len() as Ticks,
            ctx.now,
            "timeline must grow by exactly one snapshot per tick"
        );

        let snapshot = ctx
            .procs
            .iter()
            .map(|proc| match proc.state {
                ProcState::Running => CellState::Executing,
                ProcState::Ready if proc.remaining > 0 && proc.arrival <= ctx.now => {
                    CellState::ReadyWaiting
                }
                _ => CellState::Idle,
            })
            .collect();
        self.snapshots.push(snapshot);
    }

    /// Overwrite each finished process's cell at its finish tick, growing the
    /// timeline with idle snapshots when the tick lies past the end.
    pub fn mark_finished(&mut self, finish_map: &FxHashMap<Pid, Ticks>) {
        let mut finishes: Vec<_> = finish_map.iter().map(|(&pid, &tick)| (tick, pid)).collect();
        finishes.sort_unstable();

        for (tick, pid) in finishes {
            let Some(column) = self.column(pid) else {
                continue;
            };
            let tick = tick as usize;
            while self.snapshots.len() <= tick {
                self.snapshots.push(vec![CellState::Idle; self.pids.len()]);
            }
            self.snapshots[tick][column] = CellState::Finished;
        }
    }

    fn column(&self, pid: Pid) -> Option<usize> {
        self.pids.iter().position(|&p| p == pid)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn pids(&self) -> &[Pid] {
        &self.pids
    }

    pub fn snapshot(&self, tick: usize) -> Option<&Snapshot> {
        self.snapshots.get(tick)
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn state(&self, tick: usize, pid: Pid) -> Option<CellState> {
        let column = self.column(pid)?;
        self.snapshots.get(tick).map(|snapshot| snapshot[column])
    }

    /// The process's row across the whole run.
    pub fn row(&self, pid: Pid) -> Option<Vec<CellState>> {
        let column = self.column(pid)?;
        Some(self.snapshots.iter().map(|s| s[column]).collect())
    }

    pub fn executing_ticks(&self) -> usize {
        self.snapshots
            .iter()
            .flatten()
            .filter(|&&cell| cell == CellState::Executing)
            .count()
    }

    /// First tick carrying the `Finished` marker for `pid`.
    pub fn finish_marker(&self, pid: Pid) -> Option<Ticks> {
        let column = self.column(pid)?;
        self.snapshots
            .iter()
            .position(|s| s[column] == CellState::Finished)
            .map(|tick| tick as Ticks)
    }

    /// Rectangular export shape: a header row of tick indices, then one row
    /// per process.
    pub fn grid(&self) -> Vec<Vec<String>> {
        let mut header = Vec::with_capacity(self.len() + 1);
        header.push("Process".to_string());
        header.extend((0..self.len()).map(|tick| tick.to_string()));

        let mut grid = Vec::with_capacity(self.pids.len() + 1);
        grid.push(header);
        for (column, pid) in self.pids.iter().enumerate() {
            let mut row = Vec::with_capacity(self.len() + 1);
            row.push(format!("P{pid}"));
            row.extend(self.snapshots.iter().map(|s| s[column].code().to_string()));
            grid.push(row);
        }
        grid
    }
}
