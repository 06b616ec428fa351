use crate::core::config::GameConfig;
use crate::gameplay::score::Score;
use bevy::prelude::*;

const LOG_TARGET: &str = "session";

#[derive(Resource, Deref, DerefMut)]
struct AutoCloseTimer(Timer);

/// Ends the session after `window.autoClose` seconds (0 disables), or on Escape, and logs the
/// final score on the way out.
pub struct AutoClosePlugin;

impl Plugin for AutoClosePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_autoclose)
            .add_systems(Update, (check_autoclose, exit_on_escape))
            .add_systems(Last, log_session_summary);
    }
}

fn setup_autoclose(mut commands: Commands, cfg: Res<GameConfig>) {
    let secs = cfg.window.auto_close;
    if secs > 0.0 {
        info!(target: LOG_TARGET, seconds = secs, "AutoClose: will exit after {secs} seconds");
        commands.insert_resource(AutoCloseTimer(Timer::from_seconds(secs, TimerMode::Once)));
    }
}

fn check_autoclose(
    time: Res<Time>,
    mut timer: Option<ResMut<AutoCloseTimer>>,
    mut ev_exit: EventWriter<AppExit>,
) {
    if let Some(t) = timer.as_mut() {
        t.tick(time.delta());
        if t.just_finished() {
            info!(target: LOG_TARGET, "AutoClose: timer finished, requesting app exit");
            ev_exit.write(AppExit::Success);
        }
    }
}

fn exit_on_escape(keys: Option<Res<ButtonInput<KeyCode>>>, mut exit: EventWriter<AppExit>) {
    if keys.is_some_and(|k| k.just_pressed(KeyCode::Escape)) {
        exit.write(AppExit::Success);
    }
}

fn log_session_summary(
    mut exits: EventReader<AppExit>,
    score: Option<Res<Score>>,
    mut logged: Local<bool>,
) {
    if exits.read().next().is_none() || *logged {
        return;
    }
    *logged = true;
    let total = score.map(|s| s.value()).unwrap_or(0);
    info!(target: LOG_TARGET, "session over, final score {total}");
}
