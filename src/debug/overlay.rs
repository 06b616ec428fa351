#[cfg(feature = "debug")]
use crate::core::config::GameConfig;
#[cfg(feature = "debug")]
use crate::physics::matching::contact_graph::ContactGraph;
#[cfg(feature = "debug")]
use bevy::prelude::*;

/// Draws a line between every pair of balls the physics engine reports touching.
#[cfg(feature = "debug")]
pub fn draw_contact_edges(
    cfg: Res<GameConfig>,
    graph: Res<ContactGraph>,
    q_tf: Query<&GlobalTransform>,
    mut gizmos: Gizmos,
) {
    if !cfg.draw_contacts {
        return;
    }
    for (a, b) in graph.edges() {
        let (Ok(ta), Ok(tb)) = (q_tf.get(a), q_tf.get(b)) else {
            continue;
        };
        gizmos.line_2d(
            ta.translation().truncate(),
            tb.translation().truncate(),
            Color::srgba(1.0, 1.0, 1.0, 0.6),
        );
    }
}
