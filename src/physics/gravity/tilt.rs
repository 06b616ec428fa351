//! Tilt -> gravity mapping.
//!
//! The accelerometer is treated as a polled register: a producer publishes samples on its own
//! cadence and the mapper reads whatever is latest once per frame. No smoothing is applied, so
//! sensor jitter shows up unchanged in the gravity vector.

use std::sync::{Arc, RwLock};

use bevy::prelude::*;

use crate::core::config::GameConfig;
use crate::core::system::system_order::PrePhysicsSet;

const LOG_TARGET: &str = "tilt";

/// One accelerometer reading: lateral acceleration in units of g along the device x / y axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltSample {
    pub ax: f32,
    pub ay: f32,
}
impl TiltSample {
    pub const fn new(ax: f32, ay: f32) -> Self {
        Self { ax, ay }
    }
}

/// Rotates device tilt into screen-space gravity: `(ay * -G, ax * G)`.
#[inline]
pub fn tilt_to_gravity(sample: TiltSample, scale: f32) -> Vec2 {
    Vec2::new(sample.ay * -scale, sample.ax * scale)
}

/// Source of tilt samples. `latest_sample` must never block.
pub trait MotionSensor: Send + Sync + 'static {
    fn start(&mut self);
    fn latest_sample(&self) -> Option<TiltSample>;
}

/// Cloneable latest-value register. Producers hold a clone and `publish`; the game polls it.
#[derive(Clone, Debug, Default)]
pub struct TiltRegister {
    latest: Arc<RwLock<Option<TiltSample>>>,
    started: bool,
}
impl TiltRegister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, sample: TiltSample) {
        // A poisoned lock only means a producer panicked mid-write; the Option is still valid.
        let mut slot = self.latest.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(sample);
    }
}
impl MotionSensor for TiltRegister {
    fn start(&mut self) {
        self.started = true;
    }

    fn latest_sample(&self) -> Option<TiltSample> {
        if !self.started {
            return None;
        }
        *self.latest.read().unwrap_or_else(|e| e.into_inner())
    }
}

/// The sensor the scene polls.
#[derive(Resource)]
pub struct MotionSensorSource(pub Box<dyn MotionSensor>);
impl MotionSensorSource {
    pub fn new(sensor: impl MotionSensor) -> Self {
        Self(Box::new(sensor))
    }
}

/// Handle kept for the keyboard emulator so it can publish into the same register the scene reads.
#[derive(Resource, Clone)]
pub struct KeyboardTiltRegister(pub TiltRegister);

/// World gravity in m/s^2. Last-known-good: only replaced when a sample exists.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Deref)]
pub struct SceneGravity(pub Vec2);

pub struct TiltGravityPlugin;

impl Plugin for TiltGravityPlugin {
    fn build(&self, app: &mut App) {
        let cfg = app.world().get_resource::<GameConfig>().cloned().unwrap_or_default();
        app.insert_resource(SceneGravity(cfg.initial_gravity()));
        if !app.world().contains_resource::<MotionSensorSource>() {
            let register = TiltRegister::new();
            if cfg.tilt.keyboard_emulation {
                app.insert_resource(KeyboardTiltRegister(register.clone()));
            }
            app.insert_resource(MotionSensorSource::new(register));
        }
        app.add_systems(Startup, start_motion_sensor).add_systems(
            Update,
            (
                emulate_tilt_from_keys.run_if(resource_exists::<KeyboardTiltRegister>),
                apply_tilt_gravity,
            )
                .chain()
                .in_set(PrePhysicsSet),
        );
    }
}

fn start_motion_sensor(mut sensor: ResMut<MotionSensorSource>) {
    sensor.0.start();
    info!(target: LOG_TARGET, "motion sensor started");
}

/// Polls the sensor and overwrites scene gravity when a sample is available.
pub fn apply_tilt_gravity(
    sensor: Res<MotionSensorSource>,
    cfg: Res<GameConfig>,
    mut gravity: ResMut<SceneGravity>,
) {
    let Some(sample) = sensor.0.latest_sample() else {
        return;
    };
    let g = tilt_to_gravity(sample, cfg.tilt.gravity_scale);
    gravity.set_if_neq(SceneGravity(g));
}

/// Arrow keys pick the screen direction gravity should point at; with nothing held the board
/// rests flat-upright (gravity straight down). The direction is converted back into the device
/// sample that would produce it so the regular mapping path is exercised.
fn emulate_tilt_from_keys(keys: Option<Res<ButtonInput<KeyCode>>>, register: Res<KeyboardTiltRegister>) {
    let Some(keys) = keys else { return };
    let mut dir = Vec2::ZERO;
    if keys.pressed(KeyCode::ArrowLeft) {
        dir.x -= 1.0;
    }
    if keys.pressed(KeyCode::ArrowRight) {
        dir.x += 1.0;
    }
    if keys.pressed(KeyCode::ArrowUp) {
        dir.y += 1.0;
    }
    if keys.pressed(KeyCode::ArrowDown) {
        dir.y -= 1.0;
    }
    let dir = if dir == Vec2::ZERO { Vec2::NEG_Y } else { dir.normalize() };
    register.0.publish(sample_for_direction(dir));
}

/// Inverse of [`tilt_to_gravity`] for a unit screen direction.
#[inline]
pub fn sample_for_direction(dir: Vec2) -> TiltSample {
    TiltSample::new(dir.y, -dir.x)
}
