#[cfg(feature = "debug")]
use super::stats::DebugStats;
#[cfg(feature = "debug")]
use crate::core::components::BallColor;
#[cfg(feature = "debug")]
use crate::gameplay::score::Score;
#[cfg(feature = "debug")]
use crate::physics::gravity::tilt::SceneGravity;
#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
#[derive(Resource, Deref, DerefMut)]
pub struct DebugLogTimer(pub Timer);
#[cfg(feature = "debug")]
impl Default for DebugLogTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(1.0, TimerMode::Repeating))
    }
}

#[cfg(feature = "debug")]
pub fn debug_logging_system(
    time: Res<Time>,
    mut timer: ResMut<DebugLogTimer>,
    stats: Res<DebugStats>,
    score: Res<Score>,
    gravity: Res<SceneGravity>,
) {
    if !timer.tick(time.delta()).just_finished() {
        return;
    }
    let colors: Vec<String> = BallColor::ALL
        .iter()
        .map(|c| format!("{:?}={}", c, stats.per_color[c.index()]))
        .collect();
    info!(
        target: "debug",
        "SIM frame={} t={:.1}s fps={:.1} balls={} [{}] score={} gravity=({:.1},{:.1})",
        stats.frame_counter,
        time.elapsed_secs(),
        stats.fps,
        stats.alive,
        colors.join(" "),
        score.value(),
        gravity.0.x,
        gravity.0.y
    );
}
