use nalgebra::Vector3;

use super::sample::{SensorKind, SensorSample};
use crate::{
    algorithms::orientation::{Orientation, RotationFrame, Solver},
    error::DegenerateInputError,
};

/// Latest vector seen on each sensor stream.
///
/// Both start at zero, so nothing resolves until an accelerometer and a
/// magnetometer sample have each arrived at least once. Newer samples simply
/// replace older ones; there is no buffering or smoothing.
#[derive(Debug, Clone, Default)]
pub struct SensorReadings {
    pub gravity: Vector3<f64>,
    pub geomagnetic: Vector3<f64>,
    pub last_timestamp: Option<f64>,
}

impl SensorReadings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `sample` and re-solve with the current pair of vectors.
    pub fn update(
        &mut self,
        sample: &SensorSample,
        solver: &Solver,
    ) -> Result<(RotationFrame, Orientation), DegenerateInputError> {
        match sample.kind {
            SensorKind::Accelerometer => self.gravity = sample.values,
            SensorKind::MagneticField => self.geomagnetic = sample.values,
        }
        if sample.timestamp.is_some() {
            self.last_timestamp = sample.timestamp;
        }

        self.solve(solver)
    }

    pub fn solve(
        &self,
        solver: &Solver,
    ) -> Result<(RotationFrame, Orientation), DegenerateInputError> {
        solver
            .solve(&self.gravity, &self.geomagnetic)
            .map_err(|err| {
                log::debug!("no orientation for current readings: {}", err);
                err
            })
    }

    /// Total acceleration currently reported, in m/s².
    pub fn acceleration_magnitude(&self) -> f64 {
        self.gravity.norm()
    }
}
