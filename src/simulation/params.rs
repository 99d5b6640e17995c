//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds the runtime constants:
//! - orbit geometry (center, radii, samples per revolution),
//! - emission rate and speed,
//! - absorption and removal thresholds,
//! - display period used to convert frames into simulated hours

use crate::configuration::error::{self, ConfigError};
use super::states::NVec3;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub center: NVec3,              // orbit center
    pub emitter_radius: f64,        // emitter orbit and shell radius
    pub absorber_radius: f64,       // absorber orbit radius
    pub orbit_period: usize,        // phase samples per revolution
    pub particles_per_frame: usize, // emission rate
    pub wind_speed: f64,            // emission speed
    pub particle_life: u64,         // lifetime cap, not consulted by the field
    pub absorption_radius: f64,     // redirect threshold
    pub absorption_speed: f64,      // pull speed
    pub removal_radius: f64,        // delete threshold
    pub period: f64,                // hours per orbit
}

impl Parameters {
    /// Distance the emitter covers per frame: 2π r_e / samples
    pub fn orbital_speed(emitter_radius: f64, orbit_period: usize) -> f64 {
        2.0 * std::f64::consts::PI * emitter_radius / orbit_period.max(1) as f64
    }

    /// Simulated hours per frame
    pub fn frame_time(&self) -> f64 {
        self.period / self.orbit_period as f64
    }

    /// Simulated hours shown for `frame`, counted within the current orbit
    pub fn sim_time(&self, frame: usize) -> f64 {
        (frame % self.orbit_period) as f64 * self.frame_time()
    }

    /// Only the display period lives here alone; the orbit and the field
    /// check their own values when they are constructed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        error::positive("period", self.period)?;
        Ok(())
    }
}

impl Default for Parameters {
    fn default() -> Self {
        let emitter_radius = 1.2;
        let orbit_period = 120;
        Self {
            center: NVec3::zeros(),
            emitter_radius,
            absorber_radius: 3.0,
            orbit_period,
            particles_per_frame: 400,
            wind_speed: Self::orbital_speed(emitter_radius, orbit_period),
            particle_life: 1000,
            absorption_radius: 2.5,
            absorption_speed: 0.05,
            removal_radius: 0.1,
            period: 4.8,
        }
    }
}
