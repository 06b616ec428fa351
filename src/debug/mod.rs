//! Debug module: feature gated stats logging & contact overlay.
//! Built only when compiled with `--features debug`.

#[cfg(feature = "debug")]
mod logging;
#[cfg(feature = "debug")]
mod overlay;
#[cfg(feature = "debug")]
pub mod stats;

#[cfg(feature = "debug")]
use crate::core::system::system_order::PostPhysicsAdjustSet;
use bevy::prelude::*;

pub struct DebugPlugin;
impl Plugin for DebugPlugin {
    #[allow(unused_variables)]
    fn build(&self, app: &mut App) {
        #[cfg(feature = "debug")]
        {
            use logging::{debug_logging_system, DebugLogTimer};
            use overlay::draw_contact_edges;
            use stats::{debug_stats_collect_system, DebugStats};

            app.init_resource::<DebugStats>()
                .init_resource::<DebugLogTimer>()
                .add_systems(
                    Update,
                    (debug_stats_collect_system, debug_logging_system)
                        .chain()
                        .in_set(PostPhysicsAdjustSet),
                )
                .add_systems(Update, draw_contact_edges.in_set(PostPhysicsAdjustSet));
        }
    }
}
