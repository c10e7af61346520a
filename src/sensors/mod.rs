//! Caller-side handling of the two sensor streams feeding the solver.

pub mod readings;
pub mod sample;

pub use readings::SensorReadings;
pub use sample::{SensorKind, SensorSample};
