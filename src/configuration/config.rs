//! Configuration types for loading particle-wind scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – run options (seed, headless frame count, viewer tick)
//! - [`ParametersConfig`] – orbit geometry, emission and absorption constants
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! The default scenario shipped in `scenarios/default.yaml`:
//!
//! ```yaml
//! engine:
//!   seed: 42                # omit for a fresh random seed every run
//!   frames: 1200            # frames stepped by the headless driver
//!   interval_ms: 80         # viewer tick
//!
//! parameters:
//!   center: [0.0, 0.0, 0.0]
//!   emitter_radius: 1.2     # orbit radius of the emitter, also its shell radius
//!   absorber_radius: 3.0    # orbit radius of the absorber
//!   orbit_period: 120       # phase samples per revolution
//!   particles_per_frame: 400
//!   wind_speed: 0.0628      # optional, defaults to the emitter orbital speed
//!   particle_life: 1000     # carried but not used for culling
//!   absorption_radius: 2.5
//!   absorption_speed: 0.05
//!   removal_radius: 0.1
//!   period: 4.8             # hours per orbit, display only
//! ```
//!
//! Nothing here is validated; [`crate::Scenario::build_scenario`] maps this
//! into the runtime [`crate::Parameters`] and rejects bad values.

use serde::Deserialize;

/// Run options that do not change the physics
#[derive(Deserialize, Debug, Clone, Default)]
pub struct EngineConfig {
    pub seed: Option<u64>,        // deterministic seed, `None` draws one from entropy
    pub frames: Option<usize>,    // headless run length, defaults to one orbit
    pub interval_ms: Option<u64>, // viewer frame interval
}

/// Physical and geometric constants for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub center: Vec<f64>,           // orbit center
    pub emitter_radius: f64,        // emitter orbit radius
    pub absorber_radius: f64,       // absorber orbit radius
    pub orbit_period: usize,        // samples per revolution
    pub particles_per_frame: usize, // emitted each step
    pub wind_speed: Option<f64>,    // emission speed
    pub particle_life: u64,         // lifetime cap (inert)
    pub absorption_radius: f64,     // redirect threshold
    pub absorption_speed: f64,      // pull speed inside the absorption radius
    pub removal_radius: f64,        // delete threshold
    pub period: f64,                // hours per orbit
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig, // run options
    pub parameters: ParametersConfig, // physics
}
