use bevy::prelude::*;

use crate::core::config::GameConfig;
use crate::rendering::palette::palette::BACKGROUND_TILE;

const BACKGROUND_Z: f32 = -1.0;
const TILE_SIZE: f32 = 64.0;

/// Marker for the checkerboard root.
#[derive(Component)]
pub struct Background;

pub struct BackgroundPlugin;
impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_checkerboard);
    }
}

/// Centers of the lit squares of a checkerboard covering a window-centered `width` x `height`
/// area. The bottom-left square is lit.
pub fn checker_cells(width: f32, height: f32, tile: f32) -> Vec<Vec2> {
    if tile <= 0.0 {
        return Vec::new();
    }
    let cols = (width / tile).ceil() as i32;
    let rows = (height / tile).ceil() as i32;
    let origin = Vec2::new(-width * 0.5, -height * 0.5) + Vec2::splat(tile * 0.5);
    let mut cells = Vec::with_capacity((cols * rows / 2 + 1).max(0) as usize);
    for row in 0..rows {
        for col in 0..cols {
            if (row + col) % 2 == 0 {
                cells.push(origin + Vec2::new(col as f32, row as f32) * tile);
            }
        }
    }
    cells
}

fn spawn_checkerboard(mut commands: Commands, cfg: Res<GameConfig>) {
    let cells = checker_cells(cfg.window.width, cfg.window.height, TILE_SIZE);
    commands
        .spawn((
            Name::new("Background"),
            Background,
            Transform::from_xyz(0.0, 0.0, BACKGROUND_Z),
            Visibility::default(),
        ))
        .with_children(|parent| {
            for center in cells {
                parent.spawn((
                    Sprite {
                        color: BACKGROUND_TILE,
                        custom_size: Some(Vec2::splat(TILE_SIZE)),
                        ..Default::default()
                    },
                    Transform::from_translation(center.extend(0.0)),
                ));
            }
        });
}
