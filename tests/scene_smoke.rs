use bevy::prelude::*;
use marble_match::core::components::{Ball, BallColor};
use marble_match::gameplay::spawn::grid_positions;
use marble_match::interaction::tap::TapInput;
use marble_match::physics::gravity::tilt::SceneGravity;
use marble_match::{GameConfig, Score, SceneLogicPlugin};

fn headless_scene(seed: u64) -> App {
    let mut cfg = GameConfig::default();
    cfg.board.seed = Some(seed);
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(cfg);
    app.add_plugins(SceneLogicPlugin);
    app.update();
    app
}

fn live_balls(app: &mut App) -> Vec<(Vec2, BallColor)> {
    let world = app.world_mut();
    world
        .query::<(&Ball, &BallColor, &Transform)>()
        .iter(world)
        .filter(|(b, _, _)| b.alive)
        .map(|(_, c, t)| (t.translation.truncate(), *c))
        .collect()
}

#[test]
fn scene_starts_with_full_grid_and_default_gravity() {
    let mut app = headless_scene(1);
    let cfg = app.world().resource::<GameConfig>().clone();
    let expected = grid_positions(
        cfg.window.width,
        cfg.window.height,
        cfg.board.ball_radius,
        cfg.board.grid_bottom_margin,
        cfg.board.hud_inset,
    );
    assert_eq!(live_balls(&mut app).len(), expected.len());
    assert_eq!(app.world().resource::<SceneGravity>().0, Vec2::new(0.0, -9.8));
    assert_eq!(app.world().resource::<Score>().value(), 0);
}

#[test]
fn same_seed_same_layout() {
    let mut a = headless_scene(42);
    let mut b = headless_scene(42);
    let mut la = live_balls(&mut a);
    let mut lb = live_balls(&mut b);
    let key = |p: &(Vec2, BallColor)| ((p.0.x * 10.0) as i64, (p.0.y * 10.0) as i64);
    la.sort_by_key(key);
    lb.sort_by_key(key);
    assert_eq!(la, lb);
}

#[test]
fn tap_on_grid_removes_a_scoring_group_or_nothing() {
    let mut app = headless_scene(7);
    let balls = live_balls(&mut app);
    let before = balls.len();

    for (pos, _) in balls.iter().take(12) {
        let score_before = app.world().resource::<Score>().value();
        let live_before = live_balls(&mut app).len();
        app.world_mut().send_event(TapInput { world_pos: *pos });
        app.update();
        let removed = live_before - live_balls(&mut app).len();
        let gained = app.world().resource::<Score>().value() - score_before;
        if removed == 0 {
            assert_eq!(gained, 0);
        } else {
            assert!(removed >= 3, "removed {removed} balls");
            assert_eq!(gained, 1u64 << removed.min(16));
        }
    }
    assert!(live_balls(&mut app).len() <= before);
}
