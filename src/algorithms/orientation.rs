use std::f64::consts::TAU;

use nalgebra::{Matrix3, Vector3};

use crate::{config::SolverConfig, error::DegenerateInputError};

/// Orthonormal matrix mapping device coordinates onto an east/north/up world frame.
///
/// Row 0 points east, row 1 points (magnetic) north and row 2 points up,
/// all expressed in device coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationFrame(Matrix3<f64>);

impl RotationFrame {
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.0
    }

    /// Flattened row-major view: `R[0..3]` is east, `R[3..6]` north, `R[6..9]` up.
    pub fn as_array(&self) -> [f64; 9] {
        let m = &self.0;
        [
            m.m11, m.m12, m.m13, //
            m.m21, m.m22, m.m23, //
            m.m31, m.m32, m.m33,
        ]
    }

    pub fn east(&self) -> Vector3<f64> {
        self.0.row(0).transpose()
    }

    pub fn north(&self) -> Vector3<f64> {
        self.0.row(1).transpose()
    }

    pub fn up(&self) -> Vector3<f64> {
        self.0.row(2).transpose()
    }

    /// Express a device-frame vector in world (east, north, up) coordinates.
    pub fn to_world(&self, device: &Vector3<f64>) -> Vector3<f64> {
        self.0 * device
    }
}

/// Device attitude in radians.
///
/// * `azimuth` in (-π, π]: 0 when the device Y axis points at magnetic north,
///   growing clockwise seen from above (toward east).
/// * `pitch` in [-π/2, π/2]: negative when the top edge is raised.
/// * `roll` in [-π, π]: negative when the right edge is raised.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub azimuth: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl Orientation {
    pub fn from_frame(frame: &RotationFrame) -> Self {
        let r = frame.as_array();
        Self {
            azimuth: r[1].atan2(r[4]),
            // rounding in the normalisation can push |R[7]| just past 1
            pitch: (-r[7]).clamp(-1.0, 1.0).asin(),
            roll: (-r[6]).atan2(r[8]),
        }
    }

    /// Azimuth mapped into [0, 2π).
    pub fn heading(&self) -> f64 {
        let heading = self.azimuth.rem_euclid(TAU);
        if heading >= TAU {
            0.0
        } else {
            heading
        }
    }

    /// `[azimuth, pitch, roll]` in degrees, for display.
    pub fn to_degrees(&self) -> [f64; 3] {
        [
            self.azimuth.to_degrees(),
            self.pitch.to_degrees(),
            self.roll.to_degrees(),
        ]
    }
}

/// Stateless orientation solver parameterised by a [`SolverConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Build the east/north/up frame from a gravity and a geomagnetic reading,
    /// then extract azimuth, pitch and roll from it.
    pub fn solve(
        &self,
        gravity: &Vector3<f64>,
        geomagnetic: &Vector3<f64>,
    ) -> Result<(RotationFrame, Orientation), DegenerateInputError> {
        let frame = self.rotation_frame(gravity, geomagnetic)?;
        Ok((frame, Orientation::from_frame(&frame)))
    }

    pub fn rotation_frame(
        &self,
        gravity: &Vector3<f64>,
        geomagnetic: &Vector3<f64>,
    ) -> Result<RotationFrame, DegenerateInputError> {
        let epsilon = self.config.epsilon;

        if !gravity.iter().all(|v| v.is_finite()) {
            return Err(DegenerateInputError::NonFinite { input: "gravity" });
        }
        if !geomagnetic.iter().all(|v| v.is_finite()) {
            return Err(DegenerateInputError::NonFinite {
                input: "geomagnetic",
            });
        }

        // finite components can still overflow once squared
        let gravity_norm = gravity.norm();
        if !gravity_norm.is_finite() {
            return Err(DegenerateInputError::NonFinite {
                input: "gravity magnitude",
            });
        }

        if let Some(threshold) = self.config.free_fall_threshold {
            if gravity_norm < threshold {
                return Err(DegenerateInputError::FreeFall {
                    magnitude: gravity_norm,
                    threshold,
                });
            }
        }

        // east = B x A, vanishes when the field is (anti-)parallel to gravity
        let h = geomagnetic.cross(gravity);
        let h_norm = h.norm();
        if !h_norm.is_finite() {
            return Err(DegenerateInputError::NonFinite {
                input: "geomagnetic x gravity",
            });
        }
        if h_norm < epsilon {
            return Err(DegenerateInputError::ParallelInputs { magnitude: h_norm });
        }
        let east = h / h_norm;

        if gravity_norm < epsilon {
            return Err(DegenerateInputError::ZeroGravity {
                magnitude: gravity_norm,
            });
        }
        let up = gravity / gravity_norm;

        // a near-cancelling cross product leaves rounding drift along `up`
        let east = (east - up * east.dot(&up)).normalize();
        let north = up.cross(&east);

        Ok(RotationFrame(Matrix3::from_rows(&[
            east.transpose(),
            north.transpose(),
            up.transpose(),
        ])))
    }
}

/// Solve with the default thresholds.
pub fn solve(
    gravity: &Vector3<f64>,
    geomagnetic: &Vector3<f64>,
) -> Result<(RotationFrame, Orientation), DegenerateInputError> {
    Solver::default().solve(gravity, geomagnetic)
}
