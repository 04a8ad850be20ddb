use std::ops::RangeInclusive;

use serde::Serialize;

use super::{driver::Sim, process::ProcessSpec, report::round2};
use crate::{error::Result, params::Quantum, scheduler::RoundRobinScheduler};

/// Average waiting time of one Round Robin run, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    pub quantum: Quantum,
    pub average_waiting: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepReport {
    pub points: Vec<SweepPoint>,
    pub optimal: SweepPoint,
}

/// Re-runs Round Robin over a range of quanta to find the one with the
/// lowest average waiting time.
#[derive(Debug, Clone)]
pub struct QuantumSweep {
    quanta: RangeInclusive<i64>,
}

impl Default for QuantumSweep {
    fn default() -> Self {
        Self { quanta: 1..=10 }
    }
}

impl QuantumSweep {
    pub fn new(quanta: RangeInclusive<i64>) -> Self {
        Self { quanta }
    }

    pub fn run(&self, specs: &[ProcessSpec]) -> Result<SweepReport> {
        let points = self
            .quanta
            .clone()
            .map(|q| {
                let quantum = Quantum::new(q)?;
                let result = Sim::<RoundRobinScheduler>::new(specs, quantum)?.run();
                let point = SweepPoint {
                    quantum,
                    average_waiting: round2(result.average_waiting),
                };
                log::debug!("sweep q={quantum}: AWT {:.2}", point.average_waiting);
                Ok(point)
            })
            .collect::<Result<Vec<_>>>()?;

        // Empty range: default quantum, unknown waiting time
        let optimal = optimal(&points).unwrap_or(SweepPoint {
            quantum: Quantum::default(),
            average_waiting: f64::NAN,
        });

        Ok(SweepReport { points, optimal })
    }
}

/// Strictly lowest average waiting time; ties go to the smaller quantum no
/// matter where they appear in `points`.
pub fn optimal(points: &[SweepPoint]) -> Option<SweepPoint> {
    points.iter().copied().min_by(|a, b| {
        a.average_waiting
            .total_cmp(&b.average_waiting)
            .then_with(|| a.quantum.get().cmp(&b.quantum.get()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(q: i64, awt: f64) -> SweepPoint {
        SweepPoint {
            quantum: Quantum::new(q).expect("valid quantum"),
            average_waiting: awt,
        }
    }

    #[test]
    fn tie_goes_to_smallest_quantum() {
        let points = vec![point(5, 3.0), point(4, 3.5), point(2, 3.0), point(7, 3.01)];
        assert_eq!(optimal(&points), Some(point(2, 3.0)));
    }

    #[test]
    fn strictly_smaller_wins_over_smaller_quantum() {
        let points = vec![point(1, 4.2), point(3, 2.99), point(2, 3.0)];
        assert_eq!(optimal(&points), Some(point(3, 2.99)));
    }

    #[test]
    fn empty_points_have_no_optimum() {
        assert_eq!(optimal(&[]), None);
    }

    #[test]
    fn sweep_reports_every_quantum() {
        let specs = vec![ProcessSpec::new(1, 0, 5), ProcessSpec::new(2, 1, 3)];
        let report = QuantumSweep::default().run(&specs).expect("valid workload");

        let quanta: Vec<_> = report.points.iter().map(|p| p.quantum.get()).collect();
        assert_eq!(quanta, (1..=10).collect::<Vec<_>>());
        assert!(report.points.contains(&report.optimal));
    }

    #[test]
    fn sweep_rejects_bad_range() {
        let specs = vec![ProcessSpec::new(1, 0, 1)];
        assert!(QuantumSweep::new(0..=2).run(&specs).is_err());
    }
}
