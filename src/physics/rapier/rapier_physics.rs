use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::config::GameConfig;
use crate::core::system::system_order::PrePhysicsSet;
use crate::physics::gravity::tilt::{apply_tilt_gravity, SceneGravity};

pub struct PhysicsSetupPlugin; // our wrapper to configure Rapier & arena

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        let cfg = app.world().get_resource::<GameConfig>().cloned().unwrap_or_default();
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(
            cfg.physics.pixels_per_meter,
        ));
        if cfg.physics.rapier_debug {
            app.add_plugins(RapierDebugRenderPlugin::default());
        }
        app.add_systems(Startup, spawn_arena).add_systems(
            Update,
            sync_rapier_gravity
                .after(apply_tilt_gravity)
                .in_set(PrePhysicsSet),
        );
    }
}

/// Marker for the static edge loop keeping balls on screen.
#[derive(Component)]
pub struct ArenaBounds;

/// Corners of the playable rectangle (counter-clockwise from bottom-left), window-centered,
/// with the top edge pulled down by `hud_inset`.
pub fn arena_corners(width: f32, height: f32, hud_inset: f32) -> [Vec2; 4] {
    let hw = width * 0.5;
    let hh = height * 0.5;
    let top = hh - hud_inset.max(0.0);
    [
        Vec2::new(-hw, -hh),
        Vec2::new(hw, -hh),
        Vec2::new(hw, top),
        Vec2::new(-hw, top),
    ]
}

/// Scene gravity is expressed in m/s^2; Rapier integrates in pixels.
#[inline]
pub fn simulation_gravity(scene: Vec2, pixels_per_meter: f32) -> Vec2 {
    scene * pixels_per_meter
}

fn spawn_arena(mut commands: Commands, cfg: Res<GameConfig>) {
    let corners = arena_corners(cfg.window.width, cfg.window.height, cfg.board.hud_inset);
    let indices: Vec<[u32; 2]> = vec![[0, 1], [1, 2], [2, 3], [3, 0]];
    commands.spawn((
        Name::new("ArenaBounds"),
        ArenaBounds,
        RigidBody::Fixed,
        Collider::polyline(corners.to_vec(), Some(indices)),
        Friction::coefficient(cfg.physics.friction),
        Restitution::coefficient(cfg.physics.restitution),
        Transform::IDENTITY,
        GlobalTransform::default(),
    ));
}

fn sync_rapier_gravity(
    gravity: Res<SceneGravity>,
    cfg: Res<GameConfig>,
    mut q_cfg: Query<&mut RapierConfiguration>,
) {
    // RapierConfiguration lives on the rapier context entity (queried, not a resource).
    let Ok(mut rapier_cfg) = q_cfg.single_mut() else {
        return;
    };
    let g = simulation_gravity(gravity.0, cfg.physics.pixels_per_meter);
    if rapier_cfg.gravity != g {
        rapier_cfg.gravity = g;
    }
}
