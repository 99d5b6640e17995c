pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Particle, NVec3};
pub use simulation::params::Parameters;
pub use simulation::engine::Engine;
pub use simulation::orbit::{OrbitKinematics, OrbitPositions};
pub use simulation::field::{AdvanceReport, FieldParams, ParticleField};
pub use simulation::stepper::{FrameSnapshot, FrameStepper, ParticleSnapshot};
pub use simulation::scenario::Scenario;

pub use configuration::config::{EngineConfig, ParametersConfig, ScenarioConfig};
pub use configuration::error::ConfigError;

pub use visualization::{headless::{run_headless, RunSummary}, particles_vis3d::run_3d};

pub use benchmark::benchmark::{bench_advance, bench_frames};
