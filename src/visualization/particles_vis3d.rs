use std::time::Duration;

use bevy::log::LogPlugin;
use bevy::math::primitives::{Cuboid, Sphere};
use bevy::prelude::*;

use crate::simulation::scenario::Scenario;
use crate::simulation::states::NVec3;
use crate::simulation::stepper::FrameSnapshot;

/// Scenario plus the driver state: next frame to run and the last snapshot
#[derive(Resource)]
struct Viewer {
    scenario: Scenario,
    next_frame: usize,
    snapshot: Option<FrameSnapshot>,
}

#[derive(Component)]
struct Emitter;

#[derive(Component)]
struct Absorber;

#[derive(Component)]
struct SimTimeText;

/// World-space → screen-space scaling factor for positions and radii
const SCALE3D: f32 = 50.0;

/// Distance of the camera from the orbit plane along +Z
const CAMERA_DISTANCE: f32 = 1500.0;

/// Length of the tick drawn for each particle, in world units
const PARTICLE_MARK: f32 = 0.03;

const EMITTER_SIZE: f32 = 0.15;
const ABSORBER_SIZE: f32 = 0.08;

fn to_screen(p: &NVec3) -> Vec3 {
    Vec3::new(p.x as f32, p.y as f32, p.z as f32) * SCALE3D
}

/// Open a window and step `scenario` once every `engine.interval_ms`
pub fn run_3d(scenario: Scenario) {
    tracing::info!(
        interval_ms = scenario.engine.interval_ms,
        "run_3d: starting Bevy 3D viewer"
    );
    let interval = Duration::from_millis(scenario.engine.interval_ms);

    App::new()
        .insert_resource(Viewer {
            scenario,
            next_frame: 0,
            snapshot: None,
        })
        .insert_resource(Time::<Fixed>::from_duration(interval))
        // the binary already installed a tracing subscriber
        .add_plugins(DefaultPlugins.build().disable::<LogPlugin>())
        .add_systems(Startup, setup_3d)
        .add_systems(FixedUpdate, step_frame)
        .add_systems(Update, (sync_bodies_3d, draw_particles, update_sim_time))
        .run();
}

/// Startup system: camera over the orbit plane, axes, both bodies, time label
fn setup_3d(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    viewer: Res<Viewer>,
) {
    // Looking straight down the orbit axis
    commands.spawn(Camera3dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(1.0, 1.0, 1.0)),
            ..Default::default()
        },
        transform: Transform::from_xyz(0.0, 0.0, CAMERA_DISTANCE).looking_at(Vec3::ZERO, Vec3::Y),
        ..Default::default()
    });

    spawn_axes(&mut commands, &mut meshes, &mut materials);

    let start = viewer.scenario.stepper.orbit().positions(0);

    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Sphere::new(EMITTER_SIZE * SCALE3D).mesh()),
            material: materials.add(StandardMaterial {
                base_color: Color::srgb(1.0, 0.0, 0.0),
                unlit: true,
                ..Default::default()
            }),
            transform: Transform::from_translation(to_screen(&start.emitter)),
            ..Default::default()
        },
        Emitter,
    ));

    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Sphere::new(ABSORBER_SIZE * SCALE3D).mesh()),
            material: materials.add(StandardMaterial {
                base_color: Color::srgb(0.0, 0.0, 1.0),
                unlit: true,
                ..Default::default()
            }),
            transform: Transform::from_translation(to_screen(&start.absorber)),
            ..Default::default()
        },
        Absorber,
    ));

    commands.spawn((
        TextBundle::from_section(
            "",
            TextStyle {
                font_size: 20.0,
                color: Color::BLACK,
                ..Default::default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..Default::default()
        }),
        SimTimeText,
    ));
}

/// Fixed-rate system: run one simulation frame
fn step_frame(mut viewer: ResMut<Viewer>) {
    let Viewer {
        scenario,
        next_frame,
        snapshot,
    } = &mut *viewer;

    *snapshot = Some(scenario.stepper.step(*next_frame));
    *next_frame = next_frame.wrapping_add(1);
}

fn sync_bodies_3d(
    viewer: Res<Viewer>,
    mut emitters: Query<&mut Transform, (With<Emitter>, Without<Absorber>)>,
    mut absorbers: Query<&mut Transform, (With<Absorber>, Without<Emitter>)>,
) {
    let Some(snapshot) = &viewer.snapshot else {
        return;
    };
    for mut transform in &mut emitters {
        transform.translation = to_screen(&snapshot.emitter);
    }
    for mut transform in &mut absorbers {
        transform.translation = to_screen(&snapshot.absorber);
    }
}

/// Particles are too many for one entity each, so they are redrawn as
/// short gizmo ticks every frame
fn draw_particles(viewer: Res<Viewer>, mut gizmos: Gizmos) {
    let Some(snapshot) = &viewer.snapshot else {
        return;
    };
    let color = Color::srgba(0.12, 0.47, 0.71, 0.3);
    let mark = Vec3::X * PARTICLE_MARK * SCALE3D;

    for p in &snapshot.particles.positions {
        let at = to_screen(p);
        gizmos.line(at, at + mark, color);
    }
}

fn update_sim_time(viewer: Res<Viewer>, mut texts: Query<&mut Text, With<SimTimeText>>) {
    let Some(snapshot) = &viewer.snapshot else {
        return;
    };
    let hours = viewer.scenario.parameters.sim_time(snapshot.frame);

    for mut text in &mut texts {
        text.sections[0].value = format!("Simulation Time: {hours:.2} hours");
    }
}

// =========================================================================================
// Draw 3D axes for visual reference
// =========================================================================================

fn spawn_axes(commands: &mut Commands, meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>) {
    // Axis length and thickness, in *world* units
    let axis_len = 20.0 * SCALE3D;
    let axis_thickness = 0.009 * SCALE3D;

    let axes = [
        (Vec3::new(axis_len, axis_thickness, axis_thickness), Color::srgb(0.6, 0.6, 0.6)),
        (Vec3::new(axis_thickness, axis_len, axis_thickness), Color::srgb(0.6, 0.6, 0.6)),
        (Vec3::new(axis_thickness, axis_thickness, axis_len), Color::srgb(0.6, 0.6, 0.6)),
    ];

    for (size, color) in axes {
        // Cuboid is centered at its transform origin, so this puts it crossing the world origin
        commands.spawn(PbrBundle {
            mesh: meshes.add(Cuboid::from_size(size).mesh()),
            material: materials.add(StandardMaterial {
                base_color: color,
                unlit: true,
                ..Default::default()
            }),
            transform: Transform::from_xyz(0.0, 0.0, 0.0),
            ..Default::default()
        });
    }
}
