//! One simulation tick: orbit -> emit -> advance -> snapshot
//!
//! `FrameStepper` owns the orbit, the particle field and the random
//! source. Renderers call [`FrameStepper::step`] once per frame and only
//! ever see the returned [`FrameSnapshot`] or shared borrows.

use rand::rngs::StdRng;
use tracing::debug;

use crate::configuration::error::ConfigError;
use super::field::{AdvanceReport, FieldParams, ParticleField};
use super::orbit::OrbitKinematics;
use super::params::Parameters;
use super::states::NVec3;

/// Live particle positions handed to a renderer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleSnapshot {
    pub positions: Vec<NVec3>,
    pub count: usize,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub frame: usize,
    pub emitter: NVec3,
    pub absorber: NVec3,
    pub particles: ParticleSnapshot,
    pub emitted: usize,
    pub report: AdvanceReport,
}

#[derive(Debug, Clone)]
pub struct FrameStepper {
    orbit: OrbitKinematics,
    field: ParticleField,
    rng: StdRng,
    particles_per_frame: usize,
}

impl FrameStepper {
    /// Build the orbit and the empty field from `params`, rejecting bad
    /// values before the first frame
    pub fn new(params: &Parameters, rng: StdRng) -> Result<Self, ConfigError> {
        params.validate()?;
        let orbit = OrbitKinematics::new(
            params.center,
            params.emitter_radius,
            params.absorber_radius,
            params.orbit_period,
        )?;
        let field = ParticleField::new(FieldParams {
            wind_speed: params.wind_speed,
            absorption_radius: params.absorption_radius,
            absorption_speed: params.absorption_speed,
            removal_radius: params.removal_radius,
        })?;

        Ok(Self {
            orbit,
            field,
            rng,
            particles_per_frame: params.particles_per_frame,
        })
    }

    pub fn orbit(&self) -> &OrbitKinematics {
        &self.orbit
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Run frame `frame` and return what should be drawn for it
    pub fn step(&mut self, frame: usize) -> FrameSnapshot {
        let pos = self.orbit.positions(frame);

        // shell radius = emitter orbit radius
        self.field.emit(
            &mut self.rng,
            pos.emitter,
            self.particles_per_frame,
            self.orbit.emitter_radius(),
        );
        let report = self.field.advance(pos.absorber);

        let positions = self.field.positions();
        debug!(
            frame,
            emitted = self.particles_per_frame,
            redirected = report.redirected,
            removed = report.removed,
            live = positions.len(),
            "step"
        );

        FrameSnapshot {
            frame,
            emitter: pos.emitter,
            absorber: pos.absorber,
            particles: ParticleSnapshot {
                count: positions.len(),
                positions,
            },
            emitted: self.particles_per_frame,
            report,
        }
    }
}
