use thiserror::Error;

/// The gravity/geomagnetic pair cannot span an orthonormal frame.
///
/// This is the only way a solve can fail. Each variant carries the magnitude
/// that fell below its threshold so callers can log something useful.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DegenerateInputError {
    /// `geomagnetic × gravity` vanished: the inputs are (anti-)parallel or one is ~zero.
    #[error("gravity and geomagnetic vectors are parallel or near zero (|H| = {magnitude})")]
    ParallelInputs { magnitude: f64 },

    #[error("gravity vector is near zero (|A| = {magnitude})")]
    ZeroGravity { magnitude: f64 },

    /// A component of an input, or a magnitude derived from it, is NaN or infinite.
    #[error("{input} is not finite")]
    NonFinite { input: &'static str },

    /// Only raised when a free-fall threshold is configured.
    #[error("gravity magnitude {magnitude} is below the free-fall threshold {threshold}")]
    FreeFall { magnitude: f64, threshold: f64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {message}")]
    Invalid { message: String },
}

impl ConfigError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Failure to turn a text line into a [`SensorSample`](crate::sensors::SensorSample).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleParseError {
    #[error("expected 4 or 5 comma separated fields, found {0}")]
    FieldCount(usize),

    #[error("unknown sensor kind `{0}`")]
    UnknownKind(String),

    #[error("invalid number `{value}`: {source}")]
    Number {
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("non-finite value `{value}`")]
    NonFinite { value: String },
}
