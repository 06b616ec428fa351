use bevy::prelude::*;

/// Session-unique ball identifier. Allocated once at spawn, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BallId(pub u64);

/// Logical ball state (holds physics body & collider on the same entity).
///
/// `alive` flips to false the moment a match removes the ball; the entity itself is
/// despawned when the frame's commands are applied. Everything that looks at balls
/// must skip dead ones so a second tap in the same frame sees the updated set.
#[derive(Component, Debug, Clone, Copy)]
pub struct Ball {
    pub id: BallId,
    pub alive: bool,
}
impl Ball {
    pub fn new(id: BallId) -> Self {
        Self { id, alive: true }
    }
}

/// Palette tag. Assigned at spawn and never mutated afterwards.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BallColor {
    Blue,
    Green,
    Purple,
    Red,
    Yellow,
}
impl BallColor {
    pub const COUNT: usize = 5;
    pub const ALL: [BallColor; Self::COUNT] = [
        BallColor::Blue,
        BallColor::Green,
        BallColor::Purple,
        BallColor::Red,
        BallColor::Yellow,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Palette entry for `i`, wrapping past the end.
    #[inline]
    pub fn from_index(i: usize) -> Self {
        Self::ALL[i % Self::ALL.len()]
    }
}

/// Logical radius used both for the collider and rendering scale.
#[derive(Component, Debug, Deref, DerefMut, Copy, Clone)]
pub struct BallRadius(pub f32);

/// Tag component for the circle mesh child used to draw a ball.
#[derive(Component)]
pub struct BallCircleVisual;

/// Hands out ball ids in increasing order for the whole session.
#[derive(Resource, Debug, Default)]
pub struct BallIdAllocator {
    next: u64,
}
impl BallIdAllocator {
    pub fn allocate(&mut self) -> BallId {
        let id = BallId(self.next);
        self.next += 1;
        id
    }
    pub fn issued(&self) -> u64 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_never_repeats() {
        let mut ids = BallIdAllocator::default();
        let a = ids.allocate();
        let b = ids.allocate();
        let c = ids.allocate();
        assert!(a < b && b < c);
        assert_eq!(ids.issued(), 3);
    }

    #[test]
    fn palette_index_wraps() {
        assert_eq!(BallColor::from_index(0), BallColor::Blue);
        assert_eq!(BallColor::from_index(4), BallColor::Yellow);
        assert_eq!(BallColor::from_index(5), BallColor::Blue);
        assert_eq!(BallColor::Purple.index(), 2);
    }
}
