use rand::rngs::StdRng;
use rand::SeedableRng;

use windsim::{
    run_headless, ConfigError, Engine, FieldParams, FrameStepper, NVec3, OrbitKinematics, Parameters, Particle,
    ParticleField, Scenario, ScenarioConfig,
};

/// Field constants matching the default scenario
pub fn test_field_params() -> FieldParams {
    FieldParams {
        wind_speed: Parameters::orbital_speed(1.2, 120),
        absorption_radius: 2.5,
        absorption_speed: 0.05,
        removal_radius: 0.1,
    }
}

/// Field seeded with particles that do not move
pub fn still_field(positions: &[NVec3]) -> ParticleField {
    let particles = positions.iter().map(|x| Particle::new(*x, NVec3::zeros())).collect();
    ParticleField::with_particles(test_field_params(), particles).unwrap()
}

pub fn test_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

pub fn assert_close(a: &NVec3, b: &NVec3, tol: f64) {
    assert!((a - b).norm() < tol, "{:?} != {:?}", a, b);
}

// ==================================================================================
// Orbit tests
// ==================================================================================

#[test]
fn orbit_frame_zero_is_opposite_phase() {
    let orbit = OrbitKinematics::new(NVec3::zeros(), 1.2, 3.0, 120).unwrap();
    let pos = orbit.positions(0);

    assert_close(&pos.emitter, &NVec3::new(1.2, 0.0, 0.0), 1e-12);
    assert_close(&pos.absorber, &NVec3::new(-3.0, 0.0, 0.0), 1e-12);
}

#[test]
fn orbit_quarter_turn_and_offset_center() {
    let center = NVec3::new(1.0, -2.0, 0.5);
    let orbit = OrbitKinematics::new(center, 1.0, 2.0, 4).unwrap();
    let pos = orbit.positions(1);

    assert_close(&pos.emitter, &(center + NVec3::new(0.0, 1.0, 0.0)), 1e-12);
    assert_close(&pos.absorber, &(center + NVec3::new(0.0, -2.0, 0.0)), 1e-12);
}

#[test]
fn orbit_wraps_frame_index() {
    let orbit = OrbitKinematics::new(NVec3::zeros(), 1.2, 3.0, 120).unwrap();

    assert_eq!(orbit.positions(7), orbit.positions(7 + 120));
    assert_eq!(orbit.positions(0), orbit.positions(120 * 1000));
}

#[test]
fn orbit_rejects_bad_geometry() {
    assert!(matches!(
        OrbitKinematics::new(NVec3::zeros(), 0.0, 3.0, 120),
        Err(ConfigError::NonPositive { name: "emitter_radius", .. })
    ));
    assert!(matches!(
        OrbitKinematics::new(NVec3::zeros(), 1.2, -1.0, 120),
        Err(ConfigError::NonPositive { name: "absorber_radius", .. })
    ));
    assert!(matches!(
        OrbitKinematics::new(NVec3::zeros(), 1.2, 3.0, 0),
        Err(ConfigError::EmptyOrbit)
    ));
    assert!(matches!(
        OrbitKinematics::new(NVec3::new(f64::NAN, 0.0, 0.0), 1.2, 3.0, 120),
        Err(ConfigError::NonFinite { name: "center", .. })
    ));
}

// ==================================================================================
// Emission tests
// ==================================================================================

#[test]
fn emit_places_particles_on_shell() {
    let mut field = ParticleField::new(test_field_params()).unwrap();
    let origin = NVec3::new(1.2, 0.0, 0.0);
    let wind = test_field_params().wind_speed;

    field.emit(&mut test_rng(), origin, 500, 1.2);

    assert_eq!(field.len(), 500);
    for p in field.particles() {
        assert!(((p.x - origin).norm() - 1.2).abs() < 1e-9);
        assert!((p.v.norm() - wind).abs() < 1e-12);
        assert_eq!(p.age, 0);

        // velocity is radial: same direction as the spawn offset
        let out = (p.x - origin).normalize();
        assert!((p.v.normalize().dot(&out) - 1.0).abs() < 1e-9);
    }
}

#[test]
fn emit_zero_is_noop() {
    let mut field = ParticleField::new(test_field_params()).unwrap();
    field.emit(&mut test_rng(), NVec3::zeros(), 0, 1.0);
    assert!(field.is_empty());
}

#[test]
fn emit_appends_to_existing_pool() {
    let mut field = still_field(&[NVec3::new(5.0, 5.0, 5.0)]);
    field.emit(&mut test_rng(), NVec3::zeros(), 3, 1.0);

    assert_eq!(field.len(), 4);
    assert_eq!(field.particles()[0].x, NVec3::new(5.0, 5.0, 5.0));
}

#[test]
fn emit_does_not_cluster_at_poles() {
    let n = 20_000;
    let mut field = ParticleField::new(test_field_params()).unwrap();
    field.emit(&mut test_rng(), NVec3::zeros(), n, 1.0);

    // z of a unit shell point is cos(polar)
    let polar = field.particles().iter().filter(|p| p.x.z.abs() > 0.9).count();
    let fraction = polar as f64 / n as f64;

    // uniform area gives 0.10, uniform angle would give ~0.29
    assert!((fraction - 0.1).abs() < 0.02, "pole fraction {}", fraction);
}

#[test]
fn emit_is_reproducible_per_seed() {
    let mut a = ParticleField::new(test_field_params()).unwrap();
    let mut b = ParticleField::new(test_field_params()).unwrap();
    a.emit(&mut StdRng::seed_from_u64(3), NVec3::zeros(), 50, 1.0);
    b.emit(&mut StdRng::seed_from_u64(3), NVec3::zeros(), 50, 1.0);

    assert_eq!(a.particles(), b.particles());
}

// ==================================================================================
// Advance tests
// ==================================================================================

#[test]
fn advance_empty_pool_is_noop() {
    let mut field = ParticleField::new(test_field_params()).unwrap();
    let report = field.advance(NVec3::zeros());

    assert!(field.is_empty());
    assert_eq!(report.redirected, 0);
    assert_eq!(report.removed, 0);
}

#[test]
fn advance_still_particle_only_ages() {
    let x = NVec3::new(10.0, 0.0, 0.0);
    let mut field = still_field(&[x]);

    field.advance(NVec3::zeros());

    let p = &field.particles()[0];
    assert_eq!(p.x, x);
    assert_eq!(p.v, NVec3::zeros());
    assert_eq!(p.age, 1);
}

#[test]
fn advance_integrates_before_measuring() {
    // starts inside the removal radius but drifts out of both thresholds
    let absorber = NVec3::zeros();
    let particles = vec![Particle::new(NVec3::new(0.05, 0.0, 0.0), NVec3::new(3.0, 0.0, 0.0))];
    let mut field = ParticleField::with_particles(test_field_params(), particles).unwrap();

    let report = field.advance(absorber);

    assert_eq!(report.removed, 0);
    assert_eq!(report.redirected, 0);
    let p = &field.particles()[0];
    assert_close(&p.x, &NVec3::new(3.05, 0.0, 0.0), 1e-12);
    assert_eq!(p.v, NVec3::new(3.0, 0.0, 0.0));
}

#[test]
fn advance_redirects_inside_absorption_radius() {
    let absorber = NVec3::new(-3.0, 0.0, 0.0);
    let x = absorber + NVec3::new(0.0, 2.4, 0.0);
    let mut field = still_field(&[x]);

    let report = field.advance(absorber);

    assert_eq!(report.redirected, 1);
    assert_eq!(report.removed, 0);
    assert_eq!(field.len(), 1);

    let p = &field.particles()[0];
    assert!((p.v.norm() - 0.05).abs() < 1e-12);
    let toward = (absorber - p.x).normalize();
    assert!((p.v.normalize().dot(&toward) - 1.0).abs() < 1e-12);
}

#[test]
fn advance_overwrites_instead_of_accumulating() {
    let absorber = NVec3::zeros();
    // moving fast away, lands at distance 2.0 after the drift
    let particles = vec![Particle::new(NVec3::new(1.0, 0.0, 0.0), NVec3::new(1.0, 0.0, 0.0))];
    let mut field = ParticleField::with_particles(test_field_params(), particles).unwrap();

    field.advance(absorber);

    assert_close(&field.particles()[0].v, &NVec3::new(-0.05, 0.0, 0.0), 1e-12);
}

#[test]
fn advance_leaves_far_particles_alone() {
    let absorber = NVec3::zeros();
    let v = NVec3::new(0.0, 0.1, 0.0);
    let particles = vec![Particle::new(NVec3::new(2.5, 0.0, 0.0), v)];
    let mut field = ParticleField::with_particles(test_field_params(), particles).unwrap();

    let report = field.advance(absorber);

    // drifts to ~2.502, just outside the absorption radius
    assert_eq!(report.redirected, 0);
    assert_eq!(field.particles()[0].v, v);
}

#[test]
fn advance_thresholds_are_strict() {
    let absorber = NVec3::zeros();
    let on_absorption = NVec3::new(2.5, 0.0, 0.0);
    let on_removal = NVec3::new(0.0, 0.0, 0.1);
    let mut field = still_field(&[on_absorption, on_removal]);

    let report = field.advance(absorber);

    // exactly on the absorption radius: not pulled
    // exactly on the removal radius: pulled but kept
    assert_eq!(report.redirected, 1);
    assert_eq!(report.removed, 0);
    assert_eq!(field.len(), 2);
    assert_eq!(field.particles()[0].v, NVec3::zeros());
    assert_close(&field.particles()[1].v, &NVec3::new(0.0, 0.0, -0.05), 1e-12);
}

#[test]
fn advance_removes_inside_removal_radius() {
    let absorber = NVec3::new(-3.0, 0.0, 0.0);
    let field_positions = [
        absorber + NVec3::new(0.05, 0.0, 0.0), // removed
        absorber + NVec3::new(0.0, 0.0, -0.09), // removed
        absorber + NVec3::new(0.0, 1.0, 0.0),   // redirected, kept
        NVec3::new(20.0, 0.0, 0.0),             // untouched
    ];
    let mut field = still_field(&field_positions);

    let report = field.advance(absorber);

    assert_eq!(report.removed, 2);
    assert_eq!(report.redirected, 3);
    assert_eq!(field.len(), 2);

    // survivors keep their relative order and their own velocity/age
    let kept = field.particles();
    assert_eq!(kept[0].x, field_positions[2]);
    assert!((kept[0].v.norm() - 0.05).abs() < 1e-12);
    assert_eq!(kept[1].x, field_positions[3]);
    assert_eq!(kept[1].v, NVec3::zeros());
    assert!(kept.iter().all(|p| p.age == 1));
}

#[test]
fn advance_particle_on_absorber_is_guarded() {
    let absorber = NVec3::new(1.0, 2.0, 3.0);
    let mut field = still_field(&[absorber]);

    let report = field.advance(absorber);

    assert_eq!(report.removed, 1);
    assert!(field.is_empty());
}

#[test]
fn field_rejects_bad_params() {
    let mut p = test_field_params();
    p.removal_radius = 3.0;
    assert!(matches!(
        ParticleField::new(p),
        Err(ConfigError::RemovalOutsideAbsorption { .. })
    ));

    let mut p = test_field_params();
    p.absorption_radius = 0.0;
    assert!(matches!(
        ParticleField::new(p),
        Err(ConfigError::NonPositive { name: "absorption_radius", .. })
    ));

    let mut p = test_field_params();
    p.absorption_speed = -0.1;
    assert!(matches!(
        ParticleField::new(p),
        Err(ConfigError::Negative { name: "absorption_speed", .. })
    ));
}

// ==================================================================================
// Stepper tests
// ==================================================================================

#[test]
fn stepper_single_particle_scenario() {
    let params = Parameters {
        particles_per_frame: 1,
        ..Parameters::default()
    };
    let mut stepper = FrameStepper::new(&params, test_rng()).unwrap();

    let snap = stepper.step(0);

    assert_close(&snap.emitter, &NVec3::new(1.2, 0.0, 0.0), 1e-12);
    assert_close(&snap.absorber, &NVec3::new(-3.0, 0.0, 0.0), 1e-12);
    assert_eq!(snap.particles.count, 1);
    assert_eq!(snap.particles.positions.len(), 1);
    assert_eq!(snap.report.redirected, 0);
    assert_eq!(snap.report.removed, 0);

    // spawned on the shell then drifted one step outward at wind speed
    let p = &stepper.field().particles()[0];
    let r = (p.x - snap.emitter).norm();
    assert!((r - (1.2 + params.wind_speed)).abs() < 1e-9);
    assert!((p.v.norm() - params.wind_speed).abs() < 1e-12);
    assert_eq!(p.age, 1);
}

#[test]
fn stepper_grows_by_emission_rate_while_far() {
    let params = Parameters {
        particles_per_frame: 25,
        ..Parameters::default()
    };
    let mut stepper = FrameStepper::new(&params, test_rng()).unwrap();

    for frame in 0..3 {
        let snap = stepper.step(frame);
        assert_eq!(snap.emitted, 25);
        assert_eq!(snap.particles.count, 25 * (frame + 1));
    }
}

#[test]
fn stepper_is_deterministic_per_seed() {
    let params = Parameters {
        particles_per_frame: 50,
        ..Parameters::default()
    };
    let mut a = FrameStepper::new(&params, StdRng::seed_from_u64(11)).unwrap();
    let mut b = FrameStepper::new(&params, StdRng::seed_from_u64(11)).unwrap();

    for frame in 0..240 {
        assert_eq!(a.step(frame), b.step(frame));
    }
}

#[test]
fn stepper_pool_accounting_over_many_frames() {
    let params = Parameters {
        particles_per_frame: 40,
        ..Parameters::default()
    };
    let mut stepper = FrameStepper::new(&params, test_rng()).unwrap();

    let mut expected = 0;
    for frame in 0..360 {
        let snap = stepper.step(frame);
        expected = expected + snap.emitted - snap.report.removed;
        assert_eq!(snap.particles.count, expected);
        assert_eq!(snap.particles.count, stepper.field().len());
    }
}

#[test]
fn stepper_rejects_bad_parameters() {
    let params = Parameters {
        period: 0.0,
        ..Parameters::default()
    };
    assert!(matches!(
        FrameStepper::new(&params, test_rng()),
        Err(ConfigError::NonPositive { name: "period", .. })
    ));

    let params = Parameters {
        emitter_radius: -1.2,
        ..Parameters::default()
    };
    assert!(FrameStepper::new(&params, test_rng()).is_err());
}

#[test]
fn sim_time_counts_within_orbit() {
    let params = Parameters::default();

    assert_eq!(params.sim_time(0), 0.0);
    assert!((params.sim_time(60) - 2.4).abs() < 1e-12);
    assert!((params.sim_time(125) - 0.2).abs() < 1e-12);
}

// ==================================================================================
// Configuration / scenario tests
// ==================================================================================

const DEFAULT_YAML: &str = include_str!("../scenarios/default.yaml");

#[test]
fn default_yaml_builds_default_scenario() {
    let cfg: ScenarioConfig = serde_yaml::from_str(DEFAULT_YAML).unwrap();
    let scenario = Scenario::build_scenario(cfg).unwrap();
    let defaults = Parameters::default();

    assert_eq!(scenario.engine.seed, 42);
    assert_eq!(scenario.engine.frames, 1200);
    assert_eq!(scenario.engine.interval_ms, 80);
    assert_eq!(scenario.parameters.orbit_period, defaults.orbit_period);
    assert!((scenario.parameters.wind_speed - defaults.wind_speed).abs() < 1e-12);
    assert_eq!(scenario.parameters.particles_per_frame, 400);
}

#[test]
fn minimal_yaml_uses_engine_defaults() {
    let yaml = r#"
parameters:
  center: [0.0, 0.0, 0.0]
  emitter_radius: 1.0
  absorber_radius: 2.0
  orbit_period: 60
  particles_per_frame: 10
  wind_speed: 0.2
  particle_life: 10
  absorption_radius: 1.0
  absorption_speed: 0.1
  removal_radius: 0.1
  period: 1.0
"#;
    let cfg: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();
    let scenario = Scenario::build_scenario(cfg).unwrap();

    assert_eq!(scenario.engine.frames, 60);
    assert_eq!(scenario.engine.interval_ms, 80);
    assert_eq!(scenario.parameters.wind_speed, 0.2);
}

#[test]
fn scenario_rejects_bad_center() {
    let mut cfg: ScenarioConfig = serde_yaml::from_str(DEFAULT_YAML).unwrap();
    cfg.parameters.center = vec![0.0, 0.0];

    assert!(matches!(
        Scenario::build_scenario(cfg),
        Err(ConfigError::VectorLength { name: "center", expected: 3, got: 2 })
    ));
}

#[test]
fn scenario_rejects_zero_interval() {
    let mut cfg: ScenarioConfig = serde_yaml::from_str(DEFAULT_YAML).unwrap();
    cfg.engine.interval_ms = Some(0);

    assert!(matches!(
        Scenario::build_scenario(cfg),
        Err(ConfigError::NonPositive { name: "interval_ms", .. })
    ));
}

#[test]
fn stepper_exposes_its_configuration() {
    let params = Parameters::default();
    let stepper = FrameStepper::new(&params, test_rng()).unwrap();

    assert_eq!(stepper.orbit().orbit_period(), 120);
    assert_eq!(stepper.field().params(), &test_field_params());
}

#[test]
fn scenario_rejects_removal_outside_absorption() {
    let mut cfg: ScenarioConfig = serde_yaml::from_str(DEFAULT_YAML).unwrap();
    cfg.parameters.removal_radius = 5.0;

    assert!(Scenario::build_scenario(cfg).is_err());
}

#[test]
fn headless_run_reports_totals() {
    let params = Parameters {
        particles_per_frame: 20,
        ..Parameters::default()
    };
    let engine = Engine {
        seed: 5,
        frames: 240,
        interval_ms: 80,
    };
    let mut scenario = Scenario::from_parts(engine, params).unwrap();

    let summary = run_headless(&mut scenario, 240);

    assert_eq!(summary.frames, 240);
    assert_eq!(summary.emitted, 240 * 20);
    assert_eq!(summary.live, summary.emitted - summary.removed);
    assert_eq!(summary.live, scenario.stepper.field().len());
}
