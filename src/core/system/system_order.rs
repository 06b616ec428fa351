//! Central system ordering labels to make update sequence explicit.
//! Stages (high-level):
//! 1. PrePhysics (tilt -> gravity, contact bookkeeping, tap resolution)
//! 2. Rapier (handled by plugin in PostUpdate)
//! 3. PostPhysicsAdjust (read-only observers: HUD, debug stats)
//! 4. Rendering (implicit)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PrePhysicsSet; // gravity + world mutation before the physics step

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PostPhysicsAdjustSet; // observers of the settled world
