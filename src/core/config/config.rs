use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 540.0,
            height: 960.0,
            title: "Marble Match".into(),
            auto_close: 0.0,
        }
    }
}

/// Grid layout of the starting field.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BoardConfig {
    /// Shared by every ball.
    pub ball_radius: f32,
    /// Strip at the top of the window kept free of balls (edge loop starts below it).
    pub hud_inset: f32,
    /// Distance from the bottom edge to the first grid row.
    pub grid_bottom_margin: f32,
    /// How many palette colors are in play (1..=5).
    pub colors: usize,
    /// Fixed RNG seed for a reproducible color layout; random when absent.
    pub seed: Option<u64>,
}
impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            ball_radius: 24.0,
            hud_inset: 100.0,
            grid_bottom_margin: 100.0,
            colors: 5,
            seed: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Scene gravity is in m/s^2; Rapier gets it scaled by this factor.
    pub pixels_per_meter: f32,
    pub restitution: f32,
    pub friction: f32,
    pub rapier_debug: bool,
}
impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            restitution: 0.0,
            friction: 0.0,
            rapier_debug: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TiltConfig {
    /// G in `gravity = (ay * -G, ax * G)`.
    pub gravity_scale: f32,
    /// Arrow keys stand in for the accelerometer on desktop.
    pub keyboard_emulation: bool,
    /// Gravity used until the first sensor sample arrives.
    pub initial_gravity: [f32; 2],
}
impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            gravity_scale: 50.0,
            keyboard_emulation: true,
            initial_gravity: [0.0, -9.8],
        }
    }
}

/// Which relation links two same-colored balls during match finding.
///
/// Written as a string in RON (`"distance"` or `"contact"`): layered loading goes through
/// `ron::Value`, which keeps strings but drops bare enum identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdjacencyMode {
    /// Center distance below `(2r)^2 * tolerance`, scanned over every live ball of the color.
    #[default]
    Distance,
    /// The physics engine currently reports the two colliders touching.
    Contact,
}

impl<'de> Deserialize<'de> for AdjacencyMode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.to_ascii_lowercase().as_str() {
            "distance" => Ok(AdjacencyMode::Distance),
            "contact" => Ok(AdjacencyMode::Contact),
            other => Err(serde::de::Error::custom(format!(
                "unknown adjacency '{other}', expected \"distance\" or \"contact\""
            ))),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MatchingConfig {
    pub adjacency: AdjacencyMode,
    pub tolerance: f32,
}
impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            adjacency: AdjacencyMode::Distance,
            tolerance: 1.1,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    pub min_match: usize,
    pub exponent_cap: u32,
}
impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_match: 3,
            exponent_cap: 16,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HudConfig {
    pub visible: bool,
    pub font_size: f32,
    pub thousands_separator: char,
}
impl Default for HudConfig {
    fn default() -> Self {
        Self {
            visible: true,
            font_size: 36.0,
            thousands_separator: ',',
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub board: BoardConfig,
    pub physics: PhysicsConfig,
    pub tilt: TiltConfig,
    pub matching: MatchingConfig,
    pub scoring: ScoringConfig,
    pub hud: HudConfig,
    pub draw_contacts: bool,
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    /// Loads every readable file in order, merging later maps over earlier ones key by key.
    /// Returns the config, the paths actually used, and one message per failure.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let existing = bm.iter_mut().find(|(ek, _)| **ek == k).map(|(_, ev)| ev);
                        if let Some(ev) = existing {
                            merge_value(ev, v);
                        } else {
                            bm.insert(k, v);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.display().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        match merged {
            Some(val) => match val.into_rust::<GameConfig>() {
                Ok(cfg) => (cfg, used, errors),
                Err(e) => {
                    errors.push(format!(
                        "failed to deserialize merged config; using defaults: {e}"
                    ));
                    (GameConfig::default(), used, errors)
                }
            },
            None => (GameConfig::default(), used, errors),
        }
    }

    pub fn initial_gravity(&self) -> Vec2 {
        Vec2::from_array(self.tilt.initial_gravity)
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }
        let b = &self.board;
        if b.ball_radius <= 0.0 {
            w.push("board.ball_radius must be > 0".into());
        } else if b.ball_radius * 2.0 > self.window.width {
            w.push(format!(
                "board.ball_radius {} wider than the window; no column fits",
                b.ball_radius
            ));
        }
        if b.hud_inset < 0.0 {
            w.push("board.hud_inset negative".into());
        }
        if b.hud_inset + b.grid_bottom_margin >= self.window.height {
            w.push(format!(
                "board.hud_inset + grid_bottom_margin ({}) leaves no room for rows",
                b.hud_inset + b.grid_bottom_margin
            ));
        }
        if b.colors == 0 || b.colors > 5 {
            w.push(format!("board.colors {} outside 1..=5; clamped", b.colors));
        }
        if self.physics.pixels_per_meter <= 0.0 {
            w.push("physics.pixels_per_meter must be > 0".into());
        }
        if !(0.0..=1.0).contains(&self.physics.restitution) {
            w.push(format!(
                "physics.restitution {} outside 0..1",
                self.physics.restitution
            ));
        }
        if self.physics.friction < 0.0 {
            w.push("physics.friction negative".into());
        }
        if self.tilt.gravity_scale <= 0.0 {
            w.push(format!(
                "tilt.gravity_scale {} <= 0; tilting will not move balls as expected",
                self.tilt.gravity_scale
            ));
        }
        if self.matching.tolerance < 1.0 {
            w.push(format!(
                "matching.tolerance {} < 1.0; resting neighbors may not count as touching",
                self.matching.tolerance
            ));
        }
        if self.scoring.min_match == 0 {
            w.push("scoring.min_match 0 -> every tap on a ball clears it".into());
        }
        if self.scoring.exponent_cap > 63 {
            w.push(format!(
                "scoring.exponent_cap {} exceeds 63; clamped to fit u64",
                self.scoring.exponent_cap
            ));
        }
        if self.hud.font_size <= 0.0 {
            w.push("hud.font_size must be > 0".into());
        }
        w
    }
}
