//! High-level runtime engine settings
//!
//! Seed, headless run length and viewer tick used when building and
//! running a `Scenario`

use crate::configuration::error::ConfigError;

/// Viewer tick when the scenario does not set one
pub const DEFAULT_INTERVAL_MS: u64 = 80;

#[derive(Debug, Clone)]
pub struct Engine {
    pub seed: u64,        // seed actually used, drawn from entropy if not configured
    pub frames: usize,    // headless run length
    pub interval_ms: u64, // viewer frame interval
}

impl Engine {
    /// A zero tick would stall the viewer's fixed timestep
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_ms == 0 {
            return Err(ConfigError::NonPositive {
                name: "interval_ms",
                value: 0.0,
            });
        }
        Ok(())
    }
}
