use bevy::prelude::*;

use crate::core::components::BallColor;

/// Display colors, indexed by `BallColor::index`.
pub const BASE_COLORS: [Color; 5] = [
    Color::srgb(0.15, 0.45, 1.0),  // Blue
    Color::srgb(0.20, 0.85, 0.35), // Green
    Color::srgb(0.65, 0.30, 0.95), // Purple
    Color::srgb(1.0, 0.20, 0.22),  // Red
    Color::srgb(1.0, 0.90, 0.20),  // Yellow
];

/// Checkerboard tint behind the balls.
pub const BACKGROUND_TILE: Color = Color::srgba(1.0, 1.0, 1.0, 0.2);

#[inline]
pub fn color_for(color: BallColor) -> Color {
    BASE_COLORS[color.index() % BASE_COLORS.len()]
}
