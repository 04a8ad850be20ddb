use std::{fmt, num::NonZeroU64};

use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    core::Ticks,
    error::{Result, SimError},
    sim::ProcessSpec,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    Fcfs,
    RoundRobin,
    PriorityRoundRobin,
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Policy::Fcfs => "FCFS",
            Policy::RoundRobin => "Round Robin",
            Policy::PriorityRoundRobin => "Priority Round Robin",
        };
        f.write_str(name)
    }
}

/// Maximum contiguous ticks a process may hold the CPU under the Round Robin
/// disciplines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantum(NonZeroU64);

impl Quantum {
    pub const DEFAULT: Quantum = Quantum(NonZeroU64::new(3).unwrap());

    pub fn new(ticks: i64) -> Result<Self> {
        u64::try_from(ticks)
            .ok()
            .and_then(NonZeroU64::new)
            .map(Quantum)
            .ok_or(SimError::InvalidQuantum(ticks))
    }

    /// Lenient form used for user-typed values: anything below 1 becomes the
    /// default quantum.
    pub fn or_default(ticks: i64) -> Self {
        Self::new(ticks).unwrap_or_default()
    }

    /// Reads the leading integer of a form field, so `"2.5"` and `"4x"`
    /// read as 2 and 4. No leading digits means the default quantum.
    pub fn parse_or_default(input: &str) -> Self {
        let input = input.trim_start();
        let sign = usize::from(input.starts_with(['+', '-']));
        let digits = input[sign..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if digits == 0 {
            return Self::default();
        }
        input[..sign + digits]
            .parse::<i64>()
            .map(Self::or_default)
            .unwrap_or_default()
    }

    pub fn get(self) -> Ticks {
        self.0.get()
    }
}

impl Default for Quantum {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Quantum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Accepts numbers, numeric strings or garbage; garbage falls back to the
// default the same way a bad form field does.
impl<'de> Deserialize<'de> for Quantum {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
                .map(Quantum::or_default)
                .unwrap_or_default(),
            serde_json::Value::String(s) => Quantum::parse_or_default(&s),
            _ => Quantum::default(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationParams {
    pub policy: Policy,
    #[serde(default)]
    pub quantum: Quantum,
}

impl SimulationParams {
    pub fn new(policy: Policy, quantum: Quantum) -> Self {
        Self { policy, quantum }
    }

    pub fn fcfs() -> Self {
        Self::new(Policy::Fcfs, Quantum::default())
    }

    pub fn round_robin(quantum: Quantum) -> Self {
        Self::new(Policy::RoundRobin, quantum)
    }

    pub fn priority_round_robin(quantum: Quantum) -> Self {
        Self::new(Policy::PriorityRoundRobin, quantum)
    }
}

/// A complete simulation request, as loaded from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    #[serde(flatten)]
    pub params: SimulationParams,
    pub processes: Vec<ProcessSpec>,
}

impl Workload {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
