// This file is part of Marble Match.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::core::system::system_order::{PostPhysicsAdjustSet, PrePhysicsSet};
use crate::debug::DebugPlugin;
use crate::gameplay::score::ScorePlugin;
use crate::gameplay::spawn::BallSpawnPlugin;
use crate::interaction::session::auto_close::AutoClosePlugin;
use crate::interaction::tap::TapPlugin;
use crate::physics::gravity::tilt::TiltGravityPlugin;
use crate::physics::matching::contact_graph::ContactGraphPlugin;
use crate::physics::rapier::rapier_physics::PhysicsSetupPlugin;
use crate::rendering::background::background::BackgroundPlugin;
use crate::rendering::camera::CameraPlugin;
use crate::rendering::hud::HudPlugin;
use crate::rendering::materials::materials::MaterialsPlugin;

/// Scene rules without window, renderer or physics stepping: ball registry, tilt mapping,
/// contact bookkeeping, scoring and tap resolution. Runs headless under `MinimalPlugins`.
pub struct SceneLogicPlugin;

impl Plugin for SceneLogicPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (PrePhysicsSet, PostPhysicsAdjustSet.after(PrePhysicsSet)),
        )
        .add_plugins((
            TiltGravityPlugin,
            ContactGraphPlugin,
            ScorePlugin,
            BallSpawnPlugin,
            TapPlugin,
        ));
    }
}

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            CameraPlugin,
            MaterialsPlugin,
            BackgroundPlugin,
            HudPlugin,
            SceneLogicPlugin,
            PhysicsSetupPlugin,
            DebugPlugin,
            AutoClosePlugin,
        ));
    }
}
