//! Collection of geometric algorithms which turn raw sensor vectors into
//! attitude estimates. Everything here is pure and stateless.

pub mod inclination;
pub mod orientation;

pub use inclination::{inclination, Inclination};
pub use orientation::{solve, Orientation, RotationFrame, Solver};
