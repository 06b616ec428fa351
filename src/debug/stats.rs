#[cfg(feature = "debug")]
use crate::core::components::{Ball, BallColor};
#[cfg(feature = "debug")]
use bevy::prelude::*;

/// Snapshot of the board for periodic logging.
#[cfg(feature = "debug")]
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct DebugStats {
    pub frame_counter: u64,
    pub fps: f32,
    pub alive: usize,
    pub per_color: [usize; BallColor::COUNT],
}

#[cfg(feature = "debug")]
pub fn count_alive<'a, I>(iter: I) -> (usize, [usize; BallColor::COUNT])
where
    I: IntoIterator<Item = (&'a Ball, &'a BallColor)>,
{
    let mut per_color = [0usize; BallColor::COUNT];
    let mut alive = 0;
    for (ball, color) in iter {
        if ball.alive {
            alive += 1;
            per_color[color.index()] += 1;
        }
    }
    (alive, per_color)
}

#[cfg(feature = "debug")]
pub fn debug_stats_collect_system(
    time: Res<Time>,
    mut stats: ResMut<DebugStats>,
    q_balls: Query<(&Ball, &BallColor)>,
) {
    stats.frame_counter += 1;
    let dt = time.delta_secs().max(1e-6);
    let inst_fps = 1.0 / dt;
    if stats.fps == 0.0 {
        stats.fps = inst_fps;
    } else {
        stats.fps = stats.fps * 0.9 + inst_fps * 0.1;
    }
    let (alive, per_color) = count_alive(q_balls.iter());
    stats.alive = alive;
    stats.per_color = per_color;
}

#[cfg(all(test, feature = "debug"))]
mod tests {
    use super::*;
    use crate::core::components::BallId;

    #[test]
    fn counts_only_alive_balls() {
        let a = Ball::new(BallId(0));
        let b = Ball { id: BallId(1), alive: false };
        let c = Ball::new(BallId(2));
        let (alive, per) = count_alive([
            (&a, &BallColor::Red),
            (&b, &BallColor::Red),
            (&c, &BallColor::Blue),
        ]);
        assert_eq!(alive, 2);
        assert_eq!(per[BallColor::Red.index()], 1);
        assert_eq!(per[BallColor::Blue.index()], 1);
    }
}
