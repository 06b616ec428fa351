use bevy::prelude::*;

use crate::core::config::{GameConfig, ScoringConfig};

/// Cumulative score. Only ever grows.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Score(u64);
impl Score {
    pub fn value(&self) -> u64 {
        self.0
    }

    fn add(&mut self, delta: u64) {
        self.0 = self.0.saturating_add(delta);
    }
}

/// Exponential bonus rule: `2^min(m, cap)` for matches of at least `min_match` balls.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRule {
    pub min_match: usize,
    pub exponent_cap: u32,
}
impl Default for ScoreRule {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}
impl ScoreRule {
    pub fn from_config(cfg: &ScoringConfig) -> Self {
        Self {
            min_match: cfg.min_match,
            exponent_cap: cfg.exponent_cap.min(63),
        }
    }

    #[inline]
    pub fn qualifies(&self, match_size: usize) -> bool {
        match_size >= self.min_match && match_size > 0
    }

    /// Points for a match of `match_size` balls; zero below the threshold.
    pub fn bonus(&self, match_size: usize) -> u64 {
        if !self.qualifies(match_size) {
            return 0;
        }
        let exp = (match_size as u64).min(self.exponent_cap as u64);
        1u64 << exp
    }

    /// Adds the bonus for `match_size` to `score`, returning the delta.
    pub fn award(&self, score: &mut Score, match_size: usize) -> u64 {
        let delta = self.bonus(match_size);
        score.add(delta);
        delta
    }
}

pub struct ScorePlugin;

impl Plugin for ScorePlugin {
    fn build(&self, app: &mut App) {
        let rule = app
            .world()
            .get_resource::<GameConfig>()
            .map(|cfg| ScoreRule::from_config(&cfg.scoring))
            .unwrap_or_default();
        app.init_resource::<Score>().insert_resource(rule);
    }
}
