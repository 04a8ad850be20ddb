pub mod driver;
pub mod process;
pub mod report;
pub mod sweep;
pub mod timeline;

pub use driver::Sim;
pub use process::{MAX_TICKS, ProcessSpec};
pub use report::{ProcessResult, SimulationResult};
pub use sweep::{QuantumSweep, SweepPoint, SweepReport};
pub use timeline::{CellState, Snapshot, Timeline};
