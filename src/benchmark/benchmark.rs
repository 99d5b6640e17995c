use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::configuration::error::ConfigError;
use crate::simulation::field::ParticleField;
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec3, Particle};
use crate::simulation::stepper::FrameStepper;

/// Helper to build a manual pool of size `n`, spread around the origin
/// with small outward velocities, no rand needed
fn make_particles(n: usize) -> Vec<Particle> {
    let mut particles = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        let x = NVec3::new(
            (i_f * 0.37).sin() * 5.0,
            (i_f * 0.13).cos() * 5.0,
            (i_f * 0.07).sin() * 5.0,
        );
        particles.push(Particle::new(x, 0.01 * x));
    }

    particles
}

/// Time a single `advance` for a range of pool sizes
pub fn bench_advance() -> Result<(), ConfigError> {
    let ns = [1_000, 10_000, 100_000, 400_000, 1_600_000];
    let steps = 5;
    let params = Parameters::default();
    let absorber = NVec3::new(-params.absorber_radius, 0.0, 0.0);

    // same field constants a real run would use
    let field_params = *FrameStepper::new(&params, StdRng::seed_from_u64(42))?.field().params();

    for n in ns {
        let mut field = ParticleField::with_particles(field_params, make_particles(n))?;

        // Warm up
        field.advance(absorber);

        let t0 = Instant::now();
        for _ in 0..steps {
            field.advance(absorber);
        }
        let per_step = t0.elapsed().as_secs_f64() / steps as f64;

        info!("N = {n:8}, advance = {per_step:8.6} s, live after = {}", field.len());
    }
    Ok(())
}

/// Time full frames with the default parameters; the pool grows every
/// frame, so later orbits are slower
pub fn bench_frames() -> Result<(), ConfigError> {
    let params = Parameters::default();
    let mut stepper = FrameStepper::new(&params, StdRng::seed_from_u64(42))?;
    let orbits = 5;

    for orbit in 0..orbits {
        let t0 = Instant::now();
        for k in 0..params.orbit_period {
            stepper.step(orbit * params.orbit_period + k);
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / params.orbit_period as f64;

        info!("orbit {orbit}: {ms:8.3} ms/frame, live = {}", stepper.field().len());
    }
    Ok(())
}
