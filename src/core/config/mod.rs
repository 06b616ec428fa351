pub mod config;

pub use config::{
    AdjacencyMode, BoardConfig, GameConfig, HudConfig, MatchingConfig, PhysicsConfig, ScoringConfig,
    TiltConfig, WindowConfig,
};
