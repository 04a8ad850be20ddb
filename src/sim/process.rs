use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::{
    core::{Pid, ProcessRecord},
    error::{Result, SimError},
};

/// Largest accepted arrival or burst. The timeline keeps one snapshot per
/// tick, so these bound its length.
pub const MAX_TICKS: i64 = 1_000_000;

/// Caller-supplied process description. Signed so bad input can be rejected
/// instead of wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub pid: i64,
    pub arrival: i64,
    pub burst: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

impl ProcessSpec {
    pub fn new(pid: i64, arrival: i64, burst: i64) -> Self {
        Self {
            pid,
            arrival,
            burst,
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    fn to_record(&self) -> Result<ProcessRecord> {
        let pid = Pid::try_from(self.pid)
            .ok()
            .filter(|&pid| pid >= 1)
            .ok_or(SimError::InvalidPid { pid: self.pid })?;
        let arrival = u64::try_from(self.arrival).map_err(|_| SimError::NegativeArrival {
            pid: self.pid,
            arrival: self.arrival,
        })?;
        if self.arrival > MAX_TICKS {
            return Err(SimError::ArrivalTooLate {
                pid: self.pid,
                arrival: self.arrival,
                max: MAX_TICKS,
            });
        }
        let burst = u64::try_from(self.burst)
            .ok()
            .filter(|&burst| burst >= 1)
            .ok_or(SimError::InvalidBurst {
                pid: self.pid,
                burst: self.burst,
            })?;
        if self.burst > MAX_TICKS {
            return Err(SimError::BurstTooLong {
                pid: self.pid,
                burst: self.burst,
                max: MAX_TICKS,
            });
        }

        Ok(ProcessRecord::new(
            pid,
            arrival,
            burst,
            self.priority.unwrap_or_default(),
        ))
    }
}

/// Validate a workload and build the engine's private records, in input
/// order.
pub fn build_records(specs: &[ProcessSpec]) -> Result<Vec<ProcessRecord>> {
    if specs.is_empty() {
        return Err(SimError::EmptyWorkload);
    }

    let mut seen = FxHashSet::default();
    specs
        .iter()
        .map(|spec| {
            let record = spec.to_record()?;
            if !seen.insert(record.pid) {
                return Err(SimError::DuplicatePid { pid: spec.pid });
            }
            Ok(record)
        })
        .collect()
}
