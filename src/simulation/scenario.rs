//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - engine settings (`Engine`)
//! - physical parameters (`Parameters`)
//! - the frame stepper with its orbit, empty particle field and seeded RNG
//!
//! Drivers in `visualization` take a `Scenario` and step it frame by frame.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::configuration::config::ScenarioConfig;
use crate::configuration::error::ConfigError;
use crate::simulation::engine::{Engine, DEFAULT_INTERVAL_MS};
use crate::simulation::params::Parameters;
use crate::simulation::states::NVec3;
use crate::simulation::stepper::FrameStepper;

/// Runtime bundle built from a [`ScenarioConfig`]
#[derive(Debug, Clone)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub stepper: FrameStepper,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        let p_cfg = cfg.parameters;

        if p_cfg.center.len() != 3 {
            return Err(ConfigError::VectorLength {
                name: "center",
                expected: 3,
                got: p_cfg.center.len(),
            });
        }

        // Parameters (runtime) from ParametersConfig
        let parameters = Parameters {
            center: NVec3::new(p_cfg.center[0], p_cfg.center[1], p_cfg.center[2]),
            emitter_radius: p_cfg.emitter_radius,
            absorber_radius: p_cfg.absorber_radius,
            orbit_period: p_cfg.orbit_period,
            particles_per_frame: p_cfg.particles_per_frame,
            wind_speed: p_cfg
                .wind_speed
                .unwrap_or_else(|| Parameters::orbital_speed(p_cfg.emitter_radius, p_cfg.orbit_period)),
            particle_life: p_cfg.particle_life,
            absorption_radius: p_cfg.absorption_radius,
            absorption_speed: p_cfg.absorption_speed,
            removal_radius: p_cfg.removal_radius,
            period: p_cfg.period,
        };

        // Engine (runtime) from EngineConfig; an absent seed is drawn once and
        // kept so the run can be replayed
        let e_cfg = cfg.engine;
        let engine = Engine {
            seed: e_cfg.seed.unwrap_or_else(rand::random),
            frames: e_cfg.frames.unwrap_or(parameters.orbit_period),
            interval_ms: e_cfg.interval_ms.unwrap_or(DEFAULT_INTERVAL_MS),
        };

        Self::from_parts(engine, parameters)
    }

    /// Assemble a scenario from runtime values directly
    pub fn from_parts(engine: Engine, parameters: Parameters) -> Result<Self, ConfigError> {
        engine.validate()?;
        let stepper = FrameStepper::new(&parameters, StdRng::seed_from_u64(engine.seed))?;

        info!(
            seed = engine.seed,
            orbit_period = parameters.orbit_period,
            particles_per_frame = parameters.particles_per_frame,
            wind_speed = parameters.wind_speed,
            "scenario ready"
        );
        warn!(
            particle_life = parameters.particle_life,
            "particle_life is configured but particles are never culled by age"
        );

        Ok(Self {
            engine,
            parameters,
            stepper,
        })
    }
}
