//! Same-color connected component search from a tapped ball.
//!
//! The search is a depth-first traversal over an [`Adjacency`] relation restricted to the start
//! ball's color. Both relations are symmetric, so the resulting set does not depend on traversal
//! order. Every call returns a fresh [`MatchSet`]; nothing is retained between taps.

use bevy::prelude::*;

use crate::core::components::{Ball, BallColor, BallId};
use crate::core::config::{AdjacencyMode, MatchingConfig};
use crate::physics::matching::contact_graph::ContactGraph;

/// Immutable per-tap view of one live ball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallSnapshot {
    pub entity: Entity,
    pub id: BallId,
    pub color: BallColor,
    pub position: Vec2,
}

/// Snapshot of every alive ball. Dead balls (matched earlier this frame) are skipped.
pub fn snapshot_balls<'a, I>(iter: I) -> Vec<BallSnapshot>
where
    I: IntoIterator<Item = (Entity, &'a Ball, &'a BallColor, &'a Transform)>,
{
    iter.into_iter()
        .filter(|(_, ball, _, _)| ball.alive)
        .map(|(entity, ball, color, tf)| BallSnapshot {
            entity,
            id: ball.id,
            color: *color,
            position: tf.translation.truncate(),
        })
        .collect()
}

pub trait Adjacency {
    /// Relation between two distinct balls.
    fn touching(&self, a: &BallSnapshot, b: &BallSnapshot) -> bool;

    /// A ball is never its own neighbor.
    fn adjacent(&self, a: &BallSnapshot, b: &BallSnapshot) -> bool {
        a.entity != b.entity && self.touching(a, b)
    }
}

/// Circles count as touching when their centers are closer than `2r` widened by `tolerance`,
/// compared squared: `d^2 < (2r)^2 * tolerance`.
#[derive(Debug, Clone, Copy)]
pub struct DistanceAdjacency {
    threshold_sq: f32,
}
impl DistanceAdjacency {
    pub fn new(radius: f32, tolerance: f32) -> Self {
        let diameter = radius * 2.0;
        Self {
            threshold_sq: diameter * diameter * tolerance,
        }
    }
}
impl Adjacency for DistanceAdjacency {
    #[inline]
    fn touching(&self, a: &BallSnapshot, b: &BallSnapshot) -> bool {
        a.position.distance_squared(b.position) < self.threshold_sq
    }
}

/// Touching iff the physics engine currently reports the colliders in contact.
#[derive(Debug, Clone, Copy)]
pub struct ContactAdjacency<'a>(pub &'a ContactGraph);
impl Adjacency for ContactAdjacency<'_> {
    #[inline]
    fn touching(&self, a: &BallSnapshot, b: &BallSnapshot) -> bool {
        self.0.touching(a.entity, b.entity)
    }
}

/// Adjacency picked by `matching.adjacency`.
#[derive(Debug, Clone, Copy)]
pub enum SceneAdjacency<'a> {
    Distance(DistanceAdjacency),
    Contact(ContactAdjacency<'a>),
}
impl<'a> SceneAdjacency<'a> {
    pub fn from_config(cfg: &MatchingConfig, radius: f32, contacts: &'a ContactGraph) -> Self {
        match cfg.adjacency {
            AdjacencyMode::Distance => {
                SceneAdjacency::Distance(DistanceAdjacency::new(radius, cfg.tolerance))
            }
            AdjacencyMode::Contact => SceneAdjacency::Contact(ContactAdjacency(contacts)),
        }
    }
}
impl Adjacency for SceneAdjacency<'_> {
    fn touching(&self, a: &BallSnapshot, b: &BallSnapshot) -> bool {
        match self {
            SceneAdjacency::Distance(d) => d.touching(a, b),
            SceneAdjacency::Contact(c) => c.touching(a, b),
        }
    }
}

/// Balls found connected and same-colored to a start ball, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSet {
    color: BallColor,
    members: Vec<Entity>,
}
impl MatchSet {
    pub fn color(&self) -> BallColor {
        self.color
    }
    pub fn len(&self) -> usize {
        self.members.len()
    }
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
    pub fn contains(&self, e: Entity) -> bool {
        self.members.contains(&e)
    }
    pub fn entities(&self) -> &[Entity] {
        &self.members
    }
}

/// Connected same-color component containing `start`, or `None` when `start` is not among
/// `balls`. A ball without same-color neighbors yields a set of size one.
///
/// Every frontier ball is compared against every ball of its color, so the cost is
/// O(frontier * same-color count).
pub fn find_matches<A: Adjacency>(
    start: Entity,
    balls: &[BallSnapshot],
    adjacency: &A,
) -> Option<MatchSet> {
    let origin = balls.iter().find(|b| b.entity == start)?;
    let candidates: Vec<&BallSnapshot> = balls.iter().filter(|b| b.color == origin.color).collect();

    let mut visited = vec![false; candidates.len()];
    let mut stack: Vec<usize> = Vec::new();
    let mut members = Vec::new();

    if let Some(i) = candidates.iter().position(|b| b.entity == start) {
        visited[i] = true;
        stack.push(i);
        members.push(start);
    }
    while let Some(current) = stack.pop() {
        let here = candidates[current];
        for (j, other) in candidates.iter().enumerate() {
            if visited[j] || !adjacency.adjacent(here, other) {
                continue;
            }
            visited[j] = true;
            members.push(other.entity);
            stack.push(j);
        }
    }

    Some(MatchSet {
        color: origin.color,
        members,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: f32 = 10.0;

    fn balls(specs: &[(BallColor, Vec2)]) -> Vec<BallSnapshot> {
        let mut world = World::new();
        specs
            .iter()
            .enumerate()
            .map(|(i, (color, position))| BallSnapshot {
                entity: world.spawn_empty().id(),
                id: BallId(i as u64),
                color: *color,
                position: *position,
            })
            .collect()
    }

    fn dist() -> DistanceAdjacency {
        DistanceAdjacency::new(R, 1.1)
    }

    #[test]
    fn ball_is_not_its_own_neighbor() {
        let b = balls(&[(BallColor::Red, Vec2::ZERO)]);
        assert!(!dist().adjacent(&b[0], &b[0]));
        let set = find_matches(b[0].entity, &b, &dist()).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains(b[0].entity));
    }

    #[test]
    fn threshold_is_two_radii_with_tolerance() {
        let b = balls(&[
            (BallColor::Red, Vec2::ZERO),
            (BallColor::Red, Vec2::new(2.0 * R, 0.0)),
            (BallColor::Red, Vec2::new(0.0, 2.5 * R)),
        ]);
        let a = dist();
        assert!(a.adjacent(&b[0], &b[1]), "exactly 2r apart touches");
        assert!(!a.adjacent(&b[0], &b[2]), "2.5r apart does not");
        // sqrt(1.1) * 2r ~= 2.0976r: just inside / just outside.
        let near = balls(&[(BallColor::Red, Vec2::ZERO), (BallColor::Red, Vec2::new(20.9, 0.0))]);
        let far = balls(&[(BallColor::Red, Vec2::ZERO), (BallColor::Red, Vec2::new(21.0, 0.0))]);
        assert!(a.adjacent(&near[0], &near[1]));
        assert!(!a.adjacent(&far[0], &far[1]));
    }

    #[test]
    fn chain_is_found_from_either_end() {
        let b = balls(&[
            (BallColor::Blue, Vec2::new(0.0, 0.0)),
            (BallColor::Blue, Vec2::new(20.0, 0.0)),
            (BallColor::Blue, Vec2::new(40.0, 0.0)),
            (BallColor::Blue, Vec2::new(60.0, 0.0)),
        ]);
        let from_a = find_matches(b[0].entity, &b, &dist()).unwrap();
        let from_d = find_matches(b[3].entity, &b, &dist()).unwrap();
        assert_eq!(from_a.len(), 4);
        assert!(from_a.contains(b[3].entity));
        assert!(from_d.contains(b[0].entity));
        assert_eq!(from_a.entities()[0], b[0].entity);
    }

    #[test]
    fn other_colors_break_the_chain() {
        let b = balls(&[
            (BallColor::Green, Vec2::new(0.0, 0.0)),
            (BallColor::Yellow, Vec2::new(20.0, 0.0)),
            (BallColor::Green, Vec2::new(40.0, 0.0)),
        ]);
        let set = find_matches(b[0].entity, &b, &dist()).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.color(), BallColor::Green);
    }

    #[test]
    fn dense_cluster_terminates_with_every_member_once() {
        let mut specs = Vec::new();
        for i in 0..6 {
            for j in 0..6 {
                specs.push((BallColor::Purple, Vec2::new(i as f32 * 5.0, j as f32 * 5.0)));
            }
        }
        let b = balls(&specs);
        let set = find_matches(b[7].entity, &b, &dist()).unwrap();
        assert_eq!(set.len(), 36);
        let mut seen = set.entities().to_vec();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 36);
    }

    #[test]
    fn unknown_start_yields_none() {
        let b = balls(&[(BallColor::Red, Vec2::ZERO)]);
        let stranger = Entity::from_raw(999);
        assert!(find_matches(stranger, &b, &dist()).is_none());
    }

    #[test]
    fn contact_adjacency_follows_graph_not_distance() {
        // Far apart on screen, but the physics engine says a-b and b-c touch.
        let b = balls(&[
            (BallColor::Red, Vec2::new(0.0, 0.0)),
            (BallColor::Red, Vec2::new(500.0, 0.0)),
            (BallColor::Red, Vec2::new(1000.0, 0.0)),
            (BallColor::Red, Vec2::new(5.0, 0.0)),
        ]);
        let mut graph = ContactGraph::default();
        graph.connect(b[0].entity, b[1].entity);
        graph.connect(b[1].entity, b[2].entity);
        let set = find_matches(b[2].entity, &b, &ContactAdjacency(&graph)).unwrap();
        assert_eq!(set.len(), 3);
        assert!(!set.contains(b[3].entity));
    }

    #[test]
    fn scene_adjacency_dispatches_on_mode() {
        let graph = ContactGraph::default();
        let mut cfg = MatchingConfig::default();
        assert!(matches!(
            SceneAdjacency::from_config(&cfg, R, &graph),
            SceneAdjacency::Distance(_)
        ));
        cfg.adjacency = AdjacencyMode::Contact;
        let b = balls(&[(BallColor::Red, Vec2::ZERO), (BallColor::Red, Vec2::new(1.0, 0.0))]);
        let adj = SceneAdjacency::from_config(&cfg, R, &graph);
        assert!(!adj.adjacent(&b[0], &b[1]), "overlapping but no reported contact");
    }
}
