//! Errors raised while turning configuration into a runnable scenario.
//!
//! Per-frame stepping never fails; everything that can go wrong is caught
//! here, once, when the scenario is built.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("`{name}` must be strictly positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("`{name}` must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("`{name}` must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("orbit needs at least one phase sample")]
    EmptyOrbit,

    #[error("`{name}` needs {expected} components, got {got}")]
    VectorLength {
        name: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("removal radius {removal} exceeds absorption radius {absorption}")]
    RemovalOutsideAbsorption { removal: f64, absorption: f64 },
}

/// Accept `value` if it is finite and > 0
pub fn positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    let value = finite(name, value)?;
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { name, value });
    }
    Ok(value)
}

/// Accept `value` if it is finite and >= 0
pub fn non_negative(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    let value = finite(name, value)?;
    if value < 0.0 {
        return Err(ConfigError::Negative { name, value });
    }
    Ok(value)
}

pub fn finite(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { name, value });
    }
    Ok(value)
}
