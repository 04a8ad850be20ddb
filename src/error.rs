use thiserror::Error;

/// Input rejected before a simulation starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("workload contains no processes")]
    EmptyWorkload,

    #[error("pid {pid} is invalid, pids start at 1")]
    InvalidPid { pid: i64 },

    #[error("pid {pid} appears more than once")]
    DuplicatePid { pid: i64 },

    #[error("P{pid} has burst {burst}, bursts must be at least 1")]
    InvalidBurst { pid: i64, burst: i64 },

    #[error("P{pid} has negative arrival {arrival}")]
    NegativeArrival { pid: i64, arrival: i64 },

    #[error("P{pid} arrives at {arrival}, arrivals must be at most {max}")]
    ArrivalTooLate { pid: i64, arrival: i64, max: i64 },

    #[error("P{pid} has burst {burst}, bursts must be at most {max}")]
    BurstTooLong { pid: i64, burst: i64, max: i64 },

    #[error("quantum must be at least 1, got {0}")]
    InvalidQuantum(i64),
}

pub type Result<T> = std::result::Result<T, SimError>;
