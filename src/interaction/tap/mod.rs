//! Tap handling: pointer release -> topmost ball -> match set -> score + removal.
//!
//! Taps are resolved one at a time, in arrival order, inside a single system run. A resolved
//! match marks its balls dead before the next tap is looked at, so two taps landing in the same
//! frame never see (or score) the same ball twice.

use bevy::prelude::*;

use crate::core::components::{Ball, BallColor, BallRadius};
use crate::core::config::GameConfig;
use crate::core::system::system_order::PrePhysicsSet;
use crate::gameplay::score::{Score, ScoreRule};
use crate::physics::matching::contact_graph::{track_ball_contacts, ContactGraph};
use crate::physics::matching::match_finder::{find_matches, snapshot_balls, SceneAdjacency};

const LOG_TARGET: &str = "tap";

/// A single tap, already converted to world coordinates.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TapInput {
    pub world_pos: Vec2,
}

/// Emitted after a qualifying match has been scored and its balls removed.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct MatchCleared {
    pub color: BallColor,
    pub ball_count: usize,
    pub score_delta: u64,
    pub total_score: u64,
}

/// What one tap did to the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapOutcome {
    /// No live ball under the point.
    Missed,
    /// Ball hit, but its group is smaller than the scoring threshold. Nothing changed.
    BelowThreshold { ball: Entity, match_size: usize },
    /// Group scored and removed.
    Cleared {
        color: BallColor,
        removed: Vec<Entity>,
        score_delta: u64,
    },
}

type TapQueryItem<'a> = (
    Entity,
    &'a mut Ball,
    &'a BallColor,
    &'a BallRadius,
    &'a Transform,
);

pub struct TapPlugin;

impl Plugin for TapPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TapInput>()
            .add_event::<MatchCleared>()
            .add_systems(
                Update,
                (
                    emit_taps_from_pointer,
                    resolve_taps.after(track_ball_contacts),
                )
                    .chain()
                    .in_set(PrePhysicsSet),
            );
    }
}

/// Topmost live ball whose circle contains `point`: highest z wins, then the most recently
/// spawned (largest id), which is the one drawn last.
pub fn pick_topmost_ball<'a, I>(point: Vec2, iter: I) -> Option<Entity>
where
    I: IntoIterator<Item = (Entity, &'a Ball, &'a BallRadius, &'a Transform)>,
{
    let mut best: Option<(Entity, f32, crate::core::components::BallId)> = None;
    for (entity, ball, radius, tf) in iter {
        if !ball.alive {
            continue;
        }
        let d2 = tf.translation.truncate().distance_squared(point);
        if !d2.is_finite() || d2 > radius.0 * radius.0 {
            continue;
        }
        let z = tf.translation.z;
        let replace = match best {
            None => true,
            Some((_, best_z, best_id)) => z > best_z || (z == best_z && ball.id > best_id),
        };
        if replace {
            best = Some((entity, z, ball.id));
        }
    }
    best.map(|(e, _, _)| e)
}

/// Runs the per-tap protocol against the live ball set. Matched balls are marked dead here;
/// despawning is left to the caller.
pub fn resolve_tap(
    point: Vec2,
    balls: &mut Query<TapQueryItem<'_>>,
    cfg: &GameConfig,
    rule: &ScoreRule,
    score: &mut Score,
    contacts: &ContactGraph,
) -> TapOutcome {
    let picked = pick_topmost_ball(
        point,
        balls.iter().map(|(e, b, _, r, t)| (e, b, r, t)),
    );
    let Some(tapped) = picked else {
        return TapOutcome::Missed;
    };
    let Ok((_, _, _, radius, _)) = balls.get(tapped) else {
        return TapOutcome::Missed;
    };
    let adjacency = SceneAdjacency::from_config(&cfg.matching, radius.0, contacts);
    let snapshot = snapshot_balls(balls.iter().map(|(e, b, c, _, t)| (e, b, c, t)));
    let Some(matched) = find_matches(tapped, &snapshot, &adjacency) else {
        return TapOutcome::Missed;
    };

    if !rule.qualifies(matched.len()) {
        return TapOutcome::BelowThreshold {
            ball: tapped,
            match_size: matched.len(),
        };
    }

    let score_delta = rule.award(score, matched.len());
    for &e in matched.entities() {
        if let Ok((_, mut ball, _, _, _)) = balls.get_mut(e) {
            ball.alive = false;
        }
    }
    TapOutcome::Cleared {
        color: matched.color(),
        removed: matched.entities().to_vec(),
        score_delta,
    }
}

pub fn resolve_taps(
    mut taps: EventReader<TapInput>,
    mut balls: Query<TapQueryItem<'_>>,
    cfg: Res<GameConfig>,
    rule: Res<ScoreRule>,
    mut score: ResMut<Score>,
    mut contacts: ResMut<ContactGraph>,
    mut cleared: EventWriter<MatchCleared>,
    mut commands: Commands,
) {
    for tap in taps.read() {
        // Copy out so the resource is only flagged changed when a match actually scores.
        let mut working = *score;
        let outcome = resolve_tap(tap.world_pos, &mut balls, &cfg, &rule, &mut working, &contacts);
        match outcome {
            TapOutcome::Missed => {
                debug!(target: LOG_TARGET, "tap at ({:.1},{:.1}) hit no ball", tap.world_pos.x, tap.world_pos.y);
            }
            TapOutcome::BelowThreshold { ball, match_size } => {
                debug!(target: LOG_TARGET, "tap on {ball:?}: group of {match_size} below threshold {}", rule.min_match);
            }
            TapOutcome::Cleared {
                color,
                removed,
                score_delta,
            } => {
                *score = working;
                for e in removed.iter() {
                    contacts.remove(*e);
                    commands.entity(*e).despawn();
                }
                info!(
                    target: LOG_TARGET,
                    "cleared {} {:?} balls: +{} (total {})",
                    removed.len(),
                    color,
                    score_delta,
                    score.value()
                );
                cleared.write(MatchCleared {
                    color,
                    ball_count: removed.len(),
                    score_delta,
                    total_score: score.value(),
                });
            }
        }
    }
}

fn pointer_world_pos(
    camera_q: &Query<(&Camera, &GlobalTransform)>,
    screen_pos: Vec2,
) -> Option<Vec2> {
    let (camera, cam_tf) = camera_q.iter().next()?;
    camera.viewport_to_world_2d(cam_tf, screen_pos).ok()
}

/// Input adapter: one `TapInput` per released touch, or per left-button release at the cursor.
fn emit_taps_from_pointer(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    touches: Option<Res<Touches>>,
    windows_q: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    mut taps: EventWriter<TapInput>,
) {
    if let Some(touches) = touches.as_deref() {
        for touch in touches.iter_just_released() {
            if let Some(world_pos) = pointer_world_pos(&camera_q, touch.position()) {
                taps.write(TapInput { world_pos });
            }
        }
    }
    let released = buttons
        .as_deref()
        .map(|b| b.just_released(MouseButton::Left))
        .unwrap_or(false);
    if !released {
        return;
    }
    let Ok(window) = windows_q.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    if let Some(world_pos) = pointer_world_pos(&camera_q, cursor) {
        taps.write(TapInput { world_pos });
    }
}
