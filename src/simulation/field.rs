//! The particle pool and its life cycle
//!
//! `ParticleField` is the only owner of the live particles. New ones come
//! from [`ParticleField::emit`]; [`ParticleField::advance`] moves them,
//! bends the ones near the absorber toward it and drops the ones it
//! swallowed. There is no other way in or out of the pool.

use std::f64::consts::TAU;

use rand::Rng;
use tracing::trace;

use crate::configuration::error::{self, ConfigError};
use super::states::{NVec3, Particle};

/// Field constants, fixed for the lifetime of a `ParticleField`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    pub wind_speed: f64,        // speed of freshly emitted particles
    pub absorption_radius: f64, // redirect inside this distance
    pub absorption_speed: f64,  // speed toward the absorber once redirected
    pub removal_radius: f64,    // delete inside this distance
}

impl FieldParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        error::non_negative("wind_speed", self.wind_speed)?;
        let absorption = error::positive("absorption_radius", self.absorption_radius)?;
        error::non_negative("absorption_speed", self.absorption_speed)?;
        let removal = error::positive("removal_radius", self.removal_radius)?;
        if removal > absorption {
            return Err(ConfigError::RemovalOutsideAbsorption { removal, absorption });
        }
        Ok(())
    }
}

/// What one call to [`ParticleField::advance`] did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    pub redirected: usize, // inside the absorption radius (removed ones included)
    pub removed: usize,    // inside the removal radius
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    params: FieldParams,
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Empty field
    pub fn new(params: FieldParams) -> Result<Self, ConfigError> {
        Self::with_particles(params, Vec::new())
    }

    /// Field starting from an explicit pool, for tests and benchmarks
    pub fn with_particles(params: FieldParams, particles: Vec<Particle>) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self { params, particles })
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Copy of every live position, in pool order
    pub fn positions(&self) -> Vec<NVec3> {
        self.particles.iter().map(|p| p.x).collect()
    }

    /// Spawn `count` particles on the sphere of `shell_radius` around
    /// `origin`, each moving radially outward at the wind speed.
    ///
    /// The polar angle is `acos(u)` with `u` uniform in [-1, 1), which
    /// spreads points evenly over the sphere area instead of bunching them
    /// at the poles.
    ///
    /// `shell_radius` must be > 0; this is only checked in debug builds.
    pub fn emit<R: Rng>(&mut self, rng: &mut R, origin: NVec3, count: usize, shell_radius: f64) {
        if count == 0 {
            return;
        }
        debug_assert!(shell_radius > 0.0, "shell radius must be positive");

        let wind = self.params.wind_speed;
        self.particles.reserve(count);
        for _ in 0..count {
            let azimuth: f64 = rng.gen_range(0.0..TAU);
            let polar = rng.gen_range(-1.0_f64..1.0).acos();

            // unit direction, shared by the spawn offset and the initial velocity
            let (sin_p, cos_p) = polar.sin_cos();
            let dir = NVec3::new(azimuth.cos() * sin_p, azimuth.sin() * sin_p, cos_p);

            self.particles.push(Particle::new(origin + shell_radius * dir, wind * dir));
        }
    }

    /// Advance every particle by one step relative to `absorber`.
    pub fn advance(&mut self, absorber: NVec3) -> AdvanceReport {
        if self.particles.is_empty() {
            return AdvanceReport::default();
        }
        let FieldParams {
            absorption_radius,
            absorption_speed,
            removal_radius,
            ..
        } = self.params;

        // Drift and age: x_n+1 = x_n + v_n
        for p in self.particles.iter_mut() {
            p.x += p.v;
            p.age += 1;
        }

        // One distance per particle, taken after the drift. Redirection only
        // touches velocities, so the same snapshot serves both masks below.
        let distances: Vec<f64> = self
            .particles
            .iter()
            .map(|p| (p.x - absorber).norm())
            .collect();

        // Pull: overwrite the velocity of anything inside the absorption radius
        let mut report = AdvanceReport::default();
        for (p, &d) in self.particles.iter_mut().zip(distances.iter()) {
            if d < absorption_radius {
                // sitting exactly on the absorber: any fixed unit vector will do
                let dir = (absorber - p.x).try_normalize(0.0).unwrap_or_else(NVec3::x);
                p.v = absorption_speed * dir;
                report.redirected += 1;
            }
        }

        // Remove: retain visits the pool in order, so the mask lines up
        let before = self.particles.len();
        let mut alive = distances.iter().map(|&d| d >= removal_radius);
        self.particles.retain(|_| alive.next().unwrap_or(true));
        report.removed = before - self.particles.len();

        trace!(
            redirected = report.redirected,
            removed = report.removed,
            live = self.particles.len(),
            "advance"
        );
        report
    }
}
