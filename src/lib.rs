//! Device orientation (azimuth, pitch, roll) from a gravity vector and a
//! geomagnetic vector.
//!
//! ```
//! use compass::{solve, Vector3};
//!
//! let gravity = Vector3::new(0.0, 0.0, 9.8);
//! let geomagnetic = Vector3::new(0.0, 10.0, -40.0);
//!
//! let (_frame, orientation) = solve(&gravity, &geomagnetic).unwrap();
//! assert!(orientation.azimuth.abs() < 1e-9);
//! ```

pub mod algorithms;
pub mod config;
pub mod error;
pub mod sensors;

pub use algorithms::{inclination, solve, Inclination, Orientation, RotationFrame, Solver};
pub use config::SolverConfig;
pub use error::{ConfigError, DegenerateInputError, SampleParseError};
pub use nalgebra::Vector3;
pub use sensors::{SensorKind, SensorReadings, SensorSample};
