pub mod app;
pub mod core;
pub mod debug;
pub mod gameplay;
pub mod interaction;
pub mod physics;
pub mod rendering;

// Curated re-exports
pub use app::game::{GamePlugin, SceneLogicPlugin};
pub use core::components::{Ball, BallColor, BallId, BallRadius};
pub use core::config::{GameConfig, WindowConfig};
pub use gameplay::score::Score;
