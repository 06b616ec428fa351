use bevy::prelude::*;
use bevy_rapier2d::prelude::CollisionEvent;
use smallvec::SmallVec;
use std::collections::HashMap;

use crate::core::components::Ball;
use crate::core::system::system_order::PrePhysicsSet;

/// Live ball-ball contact topology, rebuilt incrementally from Rapier collision events.
/// Wall contacts are not recorded.
#[derive(Resource, Default, Debug, Clone)]
pub struct ContactGraph {
    // Circles of equal radius touch at most six others; spills to the heap past that.
    edges: HashMap<Entity, SmallVec<[Entity; 6]>>,
}

impl ContactGraph {
    pub fn connect(&mut self, a: Entity, b: Entity) {
        if a == b {
            return;
        }
        let la = self.edges.entry(a).or_default();
        if !la.contains(&b) {
            la.push(b);
        }
        let lb = self.edges.entry(b).or_default();
        if !lb.contains(&a) {
            lb.push(a);
        }
    }

    pub fn disconnect(&mut self, a: Entity, b: Entity) {
        self.unlink(a, b);
        self.unlink(b, a);
    }

    fn unlink(&mut self, from: Entity, to: Entity) {
        if let Some(list) = self.edges.get_mut(&from) {
            list.retain(|e| *e != to);
            if list.is_empty() {
                self.edges.remove(&from);
            }
        }
    }

    /// Drops every edge touching `e` (ball removed from the world).
    pub fn remove(&mut self, e: Entity) {
        if let Some(neighbors) = self.edges.remove(&e) {
            for n in neighbors {
                self.unlink(n, e);
            }
        }
    }

    pub fn touching(&self, a: Entity, b: Entity) -> bool {
        a != b && self.neighbors(a).contains(&b)
    }

    pub fn neighbors(&self, e: Entity) -> &[Entity] {
        self.edges.get(&e).map(|l| l.as_slice()).unwrap_or(&[])
    }

    /// Each undirected edge once.
    pub fn edges(&self) -> impl Iterator<Item = (Entity, Entity)> + '_ {
        self.edges
            .iter()
            .flat_map(|(a, list)| list.iter().map(move |b| (*a, *b)))
            .filter(|(a, b)| a < b)
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }
}

pub struct ContactGraphPlugin;

impl Plugin for ContactGraphPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ContactGraph>()
            .add_event::<CollisionEvent>()
            .add_systems(Update, track_ball_contacts.in_set(PrePhysicsSet));
    }
}

/// Folds this frame's collision start/stop events into the graph.
pub fn track_ball_contacts(
    mut collisions: EventReader<CollisionEvent>,
    balls: Query<&Ball>,
    mut graph: ResMut<ContactGraph>,
) {
    for ev in collisions.read() {
        match ev {
            CollisionEvent::Started(e1, e2, _flags) => {
                let live = |e: &Entity| balls.get(*e).map(|b| b.alive).unwrap_or(false);
                if live(e1) && live(e2) {
                    graph.connect(*e1, *e2);
                }
            }
            // Stop events may name entities that are already gone; unlinking is harmless.
            CollisionEvent::Stopped(e1, e2, _flags) => graph.disconnect(*e1, *e2),
        }
    }
}
