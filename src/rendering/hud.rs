use bevy::prelude::*;

use crate::core::config::GameConfig;
use crate::core::system::system_order::PostPhysicsAdjustSet;
use crate::gameplay::score::Score;

#[derive(Component)]
pub struct ScoreLabel;

pub struct HudPlugin;
impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_score_label)
            .add_systems(Update, update_score_label.in_set(PostPhysicsAdjustSet));
    }
}

/// Decimal digits grouped by thousands: `1234567` -> `1,234,567`.
pub fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

pub fn score_text(value: u64, separator: char) -> String {
    format!("SCORE: {}", group_thousands(value, separator))
}

fn spawn_score_label(mut commands: Commands, cfg: Res<GameConfig>) {
    if !cfg.hud.visible {
        return;
    }
    commands.spawn((
        ScoreLabel,
        Text::new(score_text(0, cfg.hud.thousands_separator)),
        TextFont {
            font_size: cfg.hud.font_size,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            top: Val::Px(20.0),
            ..default()
        },
    ));
}

fn update_score_label(
    score: Res<Score>,
    cfg: Res<GameConfig>,
    mut q_label: Query<&mut Text, With<ScoreLabel>>,
) {
    if !score.is_changed() {
        return;
    }
    let text = score_text(score.value(), cfg.hud.thousands_separator);
    for mut label in q_label.iter_mut() {
        if label.as_str() != text {
            *label = Text::new(text.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_by_thousands() {
        assert_eq!(group_thousands(0, ','), "0");
        assert_eq!(group_thousands(999, ','), "999");
        assert_eq!(group_thousands(1_000, ','), "1,000");
        assert_eq!(group_thousands(65_536, ','), "65,536");
        assert_eq!(group_thousands(1_234_567, '.'), "1.234.567");
    }

    #[test]
    fn label_text() {
        assert_eq!(score_text(131_072, ','), "SCORE: 131,072");
    }
}
