//! Circular, counter-phased orbits of the emitter and the absorber
//!
//! Both bodies share one phase table of `orbit_period` samples covering a
//! full revolution (endpoint excluded). The absorber sits half a turn
//! ahead of the emitter on its own, different, radius.

use std::f64::consts::PI;

use crate::configuration::error::{self, ConfigError};
use super::states::NVec3;

/// Positions of both bodies for a single frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPositions {
    pub emitter: NVec3,
    pub absorber: NVec3,
}

#[derive(Debug, Clone)]
pub struct OrbitKinematics {
    center: NVec3,
    emitter_radius: f64,
    absorber_radius: f64,
    phases: Vec<f64>, // theta_k = 2 pi k / n
}

impl OrbitKinematics {
    pub fn new(
        center: NVec3,
        emitter_radius: f64,
        absorber_radius: f64,
        orbit_period: usize,
    ) -> Result<Self, ConfigError> {
        for c in center.iter() {
            error::finite("center", *c)?;
        }
        let emitter_radius = error::positive("emitter_radius", emitter_radius)?;
        let absorber_radius = error::positive("absorber_radius", absorber_radius)?;
        if orbit_period == 0 {
            return Err(ConfigError::EmptyOrbit);
        }

        let step = 2.0 * PI / orbit_period as f64;
        let phases = (0..orbit_period).map(|k| k as f64 * step).collect();

        Ok(Self {
            center,
            emitter_radius,
            absorber_radius,
            phases,
        })
    }

    pub fn orbit_period(&self) -> usize {
        self.phases.len()
    }

    pub fn emitter_radius(&self) -> f64 {
        self.emitter_radius
    }

    /// Emitter and absorber positions at `frame`; any index is valid, it
    /// wraps around the phase table
    pub fn positions(&self, frame: usize) -> OrbitPositions {
        let theta = self.phases[frame % self.phases.len()];
        OrbitPositions {
            emitter: self.on_circle(self.emitter_radius, theta),
            absorber: self.on_circle(self.absorber_radius, theta + PI),
        }
    }

    fn on_circle(&self, radius: f64, theta: f64) -> NVec3 {
        self.center + radius * NVec3::new(theta.cos(), theta.sin(), 0.0)
    }
}
