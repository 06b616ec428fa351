use bevy::prelude::*;
use marble_match::core::components::{Ball, BallColor, BallId, BallRadius};
use marble_match::core::config::{AdjacencyMode, GameConfig};
use marble_match::gameplay::score::{Score, ScorePlugin};
use marble_match::interaction::tap::{MatchCleared, TapInput, TapPlugin};
use marble_match::physics::matching::contact_graph::{ContactGraph, ContactGraphPlugin};

const R: f32 = 10.0;

fn test_app(modify: impl FnOnce(&mut GameConfig)) -> App {
    let mut cfg = GameConfig::default();
    modify(&mut cfg);
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(cfg);
    // No physics or rendering; balls are placed by hand and taps injected as events.
    app.add_plugins((ScorePlugin, ContactGraphPlugin, TapPlugin));
    app
}

fn spawn_ball(app: &mut App, id: u64, pos: Vec2, color: BallColor) -> Entity {
    app.world_mut()
        .spawn((
            Ball::new(BallId(id)),
            color,
            BallRadius(R),
            Transform::from_xyz(pos.x, pos.y, 0.0),
            GlobalTransform::default(),
        ))
        .id()
}

fn tap(app: &mut App, at: Vec2) {
    app.world_mut().send_event(TapInput { world_pos: at });
    app.update();
}

fn live_balls(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query::<&Ball>().iter(world).filter(|b| b.alive).count()
}

fn score(app: &App) -> u64 {
    app.world().resource::<Score>().value()
}

fn drain_cleared(app: &mut App) -> Vec<MatchCleared> {
    app.world_mut()
        .resource_mut::<Events<MatchCleared>>()
        .drain()
        .collect()
}

/// Five same-colored balls in a touching row, tapped at one end.
fn chain_of_five(app: &mut App) -> Vec<Entity> {
    (0..5)
        .map(|i| spawn_ball(app, i, Vec2::new(i as f32 * 2.0 * R, 0.0), BallColor::Red))
        .collect()
}

#[test]
fn chain_of_five_scores_32_and_clears() {
    let mut app = test_app(|_| {});
    chain_of_five(&mut app);
    // Unrelated neighbor of another color survives.
    spawn_ball(&mut app, 10, Vec2::new(0.0, 2.0 * R), BallColor::Blue);
    app.update();

    tap(&mut app, Vec2::ZERO);

    assert_eq!(score(&app), 32);
    assert_eq!(live_balls(&mut app), 1);
    let cleared = drain_cleared(&mut app);
    assert_eq!(cleared.len(), 1);
    assert_eq!(cleared[0].color, BallColor::Red);
    assert_eq!(cleared[0].ball_count, 5);
    assert_eq!(cleared[0].score_delta, 32);
    assert_eq!(cleared[0].total_score, 32);
}

#[test]
fn tapping_an_emptied_spot_changes_nothing() {
    let mut app = test_app(|_| {});
    chain_of_five(&mut app);
    app.update();
    tap(&mut app, Vec2::ZERO);
    assert_eq!(score(&app), 32);
    drain_cleared(&mut app);

    tap(&mut app, Vec2::ZERO);
    assert_eq!(score(&app), 32);
    assert!(drain_cleared(&mut app).is_empty());
}

#[test]
fn pair_is_below_threshold() {
    let mut app = test_app(|_| {});
    spawn_ball(&mut app, 0, Vec2::ZERO, BallColor::Green);
    spawn_ball(&mut app, 1, Vec2::new(2.0 * R, 0.0), BallColor::Green);
    app.update();

    tap(&mut app, Vec2::ZERO);
    assert_eq!(score(&app), 0);
    assert_eq!(live_balls(&mut app), 2);
    assert!(drain_cleared(&mut app).is_empty());
}

#[test]
fn two_taps_in_one_frame_do_not_double_count() {
    let mut app = test_app(|_| {});
    chain_of_five(&mut app);
    app.update();

    app.world_mut().send_event(TapInput { world_pos: Vec2::ZERO });
    app.world_mut().send_event(TapInput {
        world_pos: Vec2::new(4.0 * R, 0.0),
    });
    app.update();

    assert_eq!(score(&app), 32);
    assert_eq!(drain_cleared(&mut app).len(), 1);
}

#[test]
fn gap_splits_the_group() {
    let mut app = test_app(|_| {});
    for i in 0..3 {
        spawn_ball(&mut app, i, Vec2::new(i as f32 * 2.0 * R, 0.0), BallColor::Yellow);
    }
    // 2.5r gap past the third ball: outside the 10% tolerance.
    for i in 0..3 {
        let x = 4.0 * R + 2.5 * R + i as f32 * 2.0 * R;
        spawn_ball(&mut app, 3 + i, Vec2::new(x, 0.0), BallColor::Yellow);
    }
    app.update();

    tap(&mut app, Vec2::ZERO);
    assert_eq!(score(&app), 8);
    assert_eq!(live_balls(&mut app), 3);
}

#[test]
fn contact_mode_follows_the_contact_graph() {
    let mut app = test_app(|cfg| cfg.matching.adjacency = AdjacencyMode::Contact);
    // Spread out so distance alone would never link them.
    let e: Vec<Entity> = (0..3)
        .map(|i| spawn_ball(&mut app, i, Vec2::new(i as f32 * 10.0 * R, 0.0), BallColor::Purple))
        .collect();
    app.update();

    tap(&mut app, Vec2::ZERO);
    assert_eq!(score(&app), 0);

    {
        let mut graph = app.world_mut().resource_mut::<ContactGraph>();
        graph.connect(e[0], e[1]);
        graph.connect(e[1], e[2]);
    }
    tap(&mut app, Vec2::ZERO);
    assert_eq!(score(&app), 8);
    assert_eq!(live_balls(&mut app), 0);
    assert_eq!(app.world().resource::<ContactGraph>().edge_count(), 0);
}

#[test]
fn min_match_comes_from_config() {
    let mut app = test_app(|cfg| cfg.scoring.min_match = 2);
    spawn_ball(&mut app, 0, Vec2::ZERO, BallColor::Blue);
    spawn_ball(&mut app, 1, Vec2::new(2.0 * R, 0.0), BallColor::Blue);
    app.update();

    tap(&mut app, Vec2::new(2.0 * R, 0.0));
    assert_eq!(score(&app), 4);
}
