use std::{fs, path::Path};

use serde::Deserialize;

use crate::error::ConfigError;

/// Magnitude below which a cross product or gravity vector counts as zero.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Standard gravity used to derive the platform free-fall threshold (m/s²).
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Thresholds used by [`Solver`](crate::algorithms::orientation::Solver).
///
/// ```toml
/// epsilon = 1e-6
/// free_fall_threshold = 0.981
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    pub epsilon: f64,
    /// Reject gravity readings weaker than this (m/s²). Disabled when `None`.
    pub free_fall_threshold: Option<f64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            free_fall_threshold: None,
        }
    }
}

impl SolverConfig {
    /// Mirrors the mobile platform behaviour: gravity under 10% of standard is free fall.
    pub fn with_platform_free_fall() -> Self {
        Self {
            free_fall_threshold: Some(0.1 * STANDARD_GRAVITY),
            ..Self::default()
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        log::debug!("loaded solver config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(ConfigError::invalid(format!(
                "epsilon must be finite and positive, got {}",
                self.epsilon
            )));
        }
        if let Some(threshold) = self.free_fall_threshold {
            if !(threshold.is_finite() && threshold >= 0.0) {
                return Err(ConfigError::invalid(format!(
                    "free_fall_threshold must be finite and non-negative, got {threshold}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = SolverConfig::from_toml_str("").unwrap();
        assert_eq!(config, SolverConfig::default());
    }

    #[test]
    fn parses_all_fields() {
        let config =
            SolverConfig::from_toml_str("epsilon = 0.001\nfree_fall_threshold = 0.5\n").unwrap();
        assert_eq!(config.epsilon, 0.001);
        assert_eq!(config.free_fall_threshold, Some(0.5));
    }

    #[test]
    fn rejects_non_positive_epsilon() {
        let err = SolverConfig::from_toml_str("epsilon = 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        let err = SolverConfig::from_toml_str("epsilon = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn rejects_negative_free_fall_threshold() {
        let err = SolverConfig::from_toml_str("free_fall_threshold = -2.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = SolverConfig::from_toml_str("tolerance = 1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn platform_free_fall_is_ten_percent_of_gravity() {
        let config = SolverConfig::with_platform_free_fall();
        assert!((config.free_fall_threshold.unwrap() - 0.981).abs() < 1e-12);
        assert_eq!(config.epsilon, DEFAULT_EPSILON);
    }
}
