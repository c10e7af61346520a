use std::str::FromStr;

use nalgebra::Vector3;

use crate::error::SampleParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// Gravity/acceleration in m/s²
    Accelerometer,
    /// Magnetic field in µT
    MagneticField,
}

impl FromStr for SensorKind {
    type Err = SampleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "acc" | "accel" | "accelerometer" => Ok(Self::Accelerometer),
            "m" | "mag" | "magnetic" | "magnetometer" => Ok(Self::MagneticField),
            other => Err(SampleParseError::UnknownKind(other.to_string())),
        }
    }
}

/// A single 3-axis reading from one of the two sensor streams.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSample {
    pub kind: SensorKind,
    pub timestamp: Option<f64>,
    pub values: Vector3<f64>,
}

impl SensorSample {
    pub fn accelerometer(values: Vector3<f64>) -> Self {
        Self {
            kind: SensorKind::Accelerometer,
            timestamp: None,
            values,
        }
    }

    pub fn magnetic_field(values: Vector3<f64>) -> Self {
        Self {
            kind: SensorKind::MagneticField,
            timestamp: None,
            values,
        }
    }

    pub fn at(self, timestamp: f64) -> Self {
        Self {
            timestamp: Some(timestamp),
            ..self
        }
    }
}

/// Parses `kind,x,y,z` or `timestamp,kind,x,y,z`.
impl FromStr for SensorSample {
    type Err = SampleParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();

        let (timestamp, kind, xyz) = match fields.as_slice() {
            [kind, x, y, z] => (None, kind, [x, y, z]),
            [timestamp, kind, x, y, z] => (Some(parse_number(timestamp)?), kind, [x, y, z]),
            _ => return Err(SampleParseError::FieldCount(fields.len())),
        };

        Ok(Self {
            kind: kind.parse()?,
            timestamp,
            values: Vector3::new(
                parse_number(xyz[0])?,
                parse_number(xyz[1])?,
                parse_number(xyz[2])?,
            ),
        })
    }
}

fn parse_number(value: &str) -> Result<f64, SampleParseError> {
    let number: f64 = value.parse().map_err(|source| SampleParseError::Number {
        value: value.to_string(),
        source,
    })?;
    // `f64::from_str` happily accepts "NaN" and "inf"
    if !number.is_finite() {
        return Err(SampleParseError::NonFinite {
            value: value.to_string(),
        });
    }
    Ok(number)
}
