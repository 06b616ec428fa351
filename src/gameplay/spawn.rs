use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::components::{Ball, BallCircleVisual, BallColor, BallId, BallIdAllocator, BallRadius};
use crate::core::config::{GameConfig, PhysicsConfig};
use crate::rendering::materials::materials::{BallDisplayMaterials, BallMaterialsInitSet, CircleMesh};

const LOG_TARGET: &str = "spawn";

pub struct BallSpawnPlugin;

impl Plugin for BallSpawnPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BallIdAllocator>()
            .add_systems(Startup, spawn_ball_grid.after(BallMaterialsInitSet));
    }
}

/// Grid cell centers, window-centered: columns step one diameter from the left wall, rows step
/// one diameter from `bottom_margin` up to just below the HUD strip.
pub fn grid_positions(
    width: f32,
    height: f32,
    radius: f32,
    bottom_margin: f32,
    hud_inset: f32,
) -> Vec<Vec2> {
    if radius <= 0.0 {
        return Vec::new();
    }
    let diameter = radius * 2.0;
    let hw = width * 0.5;
    let hh = height * 0.5;
    let x_end = hw - radius;
    let y_end = hh - hud_inset.max(0.0) - radius;
    let mut out = Vec::new();
    let mut x = -hw + radius;
    while x < x_end {
        let mut y = -hh + bottom_margin.max(radius);
        while y < y_end {
            out.push(Vec2::new(x, y));
            y += diameter;
        }
        x += diameter;
    }
    out
}

/// Spawns one ball: dynamic circle body, no bounce or friction, rotation locked, collision
/// events on so the contact graph sees it. The circle mesh child is attached when visuals exist.
pub fn spawn_ball_entity(
    commands: &mut Commands,
    id: BallId,
    color: BallColor,
    position: Vec2,
    radius: f32,
    physics: &PhysicsConfig,
    visuals: Option<(&CircleMesh, &BallDisplayMaterials)>,
) -> Entity {
    let mut entity = commands.spawn((
        Ball::new(id),
        color,
        BallRadius(radius),
        Transform::from_translation(position.extend(0.0)),
        GlobalTransform::default(),
        Visibility::default(),
        RigidBody::Dynamic,
        Collider::ball(radius),
        Restitution::coefficient(physics.restitution),
        Friction::coefficient(physics.friction),
        LockedAxes::ROTATION_LOCKED,
        Velocity::zero(),
        ActiveEvents::COLLISION_EVENTS,
    ));
    if let Some((mesh, materials)) = visuals {
        if let Some(material) = materials.get(color) {
            entity.with_children(|parent| {
                parent.spawn((
                    BallCircleVisual,
                    Mesh2d(mesh.0.clone()),
                    MeshMaterial2d(material.clone()),
                    Transform::from_scale(Vec3::splat(radius * 2.0)),
                ));
            });
        }
    }
    entity.id()
}

fn spawn_ball_grid(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    mut ids: ResMut<BallIdAllocator>,
    mesh: Option<Res<CircleMesh>>,
    materials: Option<Res<BallDisplayMaterials>>,
) {
    let b = &cfg.board;
    let colors = b.colors.clamp(1, BallColor::ALL.len());
    let mut rng = match b.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let visuals = mesh.as_deref().zip(materials.as_deref());
    let positions = grid_positions(
        cfg.window.width,
        cfg.window.height,
        b.ball_radius,
        b.grid_bottom_margin,
        b.hud_inset,
    );
    for pos in positions.iter() {
        let color = BallColor::from_index(rng.gen_range(0..colors));
        let id = ids.allocate();
        spawn_ball_entity(&mut commands, id, color, *pos, b.ball_radius, &cfg.physics, visuals);
    }
    info!(
        target: LOG_TARGET,
        "spawned {} balls (radius={:.1} colors={} seed={:?})",
        positions.len(),
        b.ball_radius,
        colors,
        b.seed
    );
}
