//! Core state types for the particle wind.
//!
//! A `Particle` bundles position, velocity and age so the three can never
//! drift out of step; the pool is a plain `Vec<Particle>` owned by
//! [`super::field::ParticleField`].

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: NVec3,  // position
    pub v: NVec3,  // velocity, applied once per step
    pub age: u64,  // steps survived
}

impl Particle {
    /// Fresh particle, age 0
    pub fn new(x: NVec3, v: NVec3) -> Self {
        Self { x, v, age: 0 }
    }
}
