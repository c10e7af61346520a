use nalgebra::{Matrix3, Vector3};

use super::orientation::{RotationFrame, Solver};
use crate::error::DegenerateInputError;

/// Rotation about the east axis that takes the horizontal north direction onto
/// the geomagnetic field vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inclination {
    pub matrix: Matrix3<f64>,
}

impl Inclination {
    /// Inclination of `geomagnetic` against a frame already solved from it.
    ///
    /// `frame` must come from a successful solve with this same `geomagnetic`,
    /// which guarantees the field is non-zero and finite.
    pub fn from_frame(frame: &RotationFrame, geomagnetic: &Vector3<f64>) -> Self {
        let field = geomagnetic / geomagnetic.norm();
        let c = field.dot(&frame.north());
        let s = field.dot(&frame.up());

        #[rustfmt::skip]
        let matrix = Matrix3::new(
            1.0, 0.0, 0.0,
            0.0, c,   s,
            0.0, -s,  c,
        );
        Self { matrix }
    }

    /// Magnetic dip in radians, `atan2(I[5], I[4])`.
    ///
    /// Negative when the field points below the horizon, which is the case in
    /// the northern hemisphere.
    pub fn angle(&self) -> f64 {
        self.matrix.m23.atan2(self.matrix.m22)
    }
}

impl Solver {
    /// Inclination of `geomagnetic` relative to the world frame built from the same inputs.
    pub fn inclination(
        &self,
        gravity: &Vector3<f64>,
        geomagnetic: &Vector3<f64>,
    ) -> Result<Inclination, DegenerateInputError> {
        let frame = self.rotation_frame(gravity, geomagnetic)?;
        Ok(Inclination::from_frame(&frame, geomagnetic))
    }
}

pub fn inclination(
    gravity: &Vector3<f64>,
    geomagnetic: &Vector3<f64>,
) -> Result<Inclination, DegenerateInputError> {
    Solver::default().inclination(gravity, geomagnetic)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_reference_dip() {
        let gravity = Vector3::new(0.0, 0.0, 9.8);
        let geomagnetic = Vector3::new(0.0, 10.0, -40.0);

        let inclination = inclination(&gravity, &geomagnetic).unwrap();

        assert_relative_eq!(inclination.angle(), (-40.0f64).atan2(10.0), epsilon = 1e-12);
    }

    #[test]
    fn test_matrix_is_rotation() {
        let inclination =
            inclination(&Vector3::new(1.0, 2.0, 9.0), &Vector3::new(14.0, 9.0, -30.0)).unwrap();
        let m = inclination.matrix;

        assert_relative_eq!(m * m.transpose(), Matrix3::identity(), epsilon = 1e-12);
        assert_relative_eq!(m.determinant(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_dip_independent_of_heading() {
        let gravity = Vector3::new(0.0, 0.0, 9.8);
        let a = inclination(&gravity, &Vector3::new(0.0, 10.0, -40.0)).unwrap();
        let b = inclination(&gravity, &Vector3::new(-10.0, 0.0, -40.0)).unwrap();

        assert_relative_eq!(a.angle(), b.angle(), epsilon = 1e-12);
    }

    #[test]
    fn test_horizontal_field_has_zero_dip() {
        let inclination =
            inclination(&Vector3::new(0.0, 0.0, 9.8), &Vector3::new(0.0, 25.0, 0.0)).unwrap();
        assert_relative_eq!(inclination.angle(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_from_solved_frame_matches_solver() {
        let gravity = Vector3::new(0.5, -1.2, 9.6);
        let geomagnetic = Vector3::new(8.0, 21.0, -37.0);

        let (frame, _) = Solver::default().solve(&gravity, &geomagnetic).unwrap();
        let reused = Inclination::from_frame(&frame, &geomagnetic);

        assert_eq!(reused, inclination(&gravity, &geomagnetic).unwrap());
    }

    #[test]
    fn test_non_finite_field_fails() {
        let gravity = Vector3::new(0.0, 0.0, 9.8);
        assert!(inclination(&gravity, &Vector3::new(f64::NAN, 10.0, -40.0)).is_err());
        assert!(inclination(&gravity, &Vector3::new(0.0, f64::INFINITY, -40.0)).is_err());
    }

    #[test]
    fn test_degenerate_inputs_fail() {
        let gravity = Vector3::new(0.0, 0.0, 9.8);
        assert!(inclination(&gravity, &Vector3::new(0.0, 0.0, -50.0)).is_err());
        assert!(inclination(&Vector3::zeros(), &Vector3::new(0.0, 10.0, -40.0)).is_err());
        // nearly vertical field still resolves, the dip approaches -90 degrees
        let steep = inclination(&gravity, &Vector3::new(0.0, 1e-3, -50.0)).unwrap();
        assert!(steep.angle() < -FRAC_PI_2 + 1e-3);
    }
}
