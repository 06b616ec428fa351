use std::path::PathBuf;

use anyhow::{bail, Result};
use bevy::prelude::*;
use clap::Parser;

use marble_match::{GameConfig, GamePlugin};

const DEFAULT_CONFIG_LAYERS: [&str; 2] = ["assets/config/game.ron", "assets/config/game.local.ron"];

#[derive(Parser, Debug)]
#[command(about = "Tilt the board, tap groups of three or more same-colored marbles", version)]
struct Args {
    /// RON config layer; repeat to stack (later files override earlier keys).
    /// Defaults to assets/config/game.ron + assets/config/game.local.ron.
    #[arg(long = "config")]
    config: Vec<PathBuf>,
    /// Fixed seed for the starting color layout.
    #[arg(long)]
    seed: Option<u64>,
}

/// What config loading found, logged once the log plugin is up.
#[derive(Resource, Debug, Default)]
struct ConfigLoadReport {
    used: Vec<String>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

fn main() -> Result<()> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let args = Args::parse();
    let explicit = !args.config.is_empty();
    let paths: Vec<PathBuf> = if explicit {
        args.config.clone()
    } else {
        // Default layers are optional; only stack the ones present.
        DEFAULT_CONFIG_LAYERS
            .iter()
            .map(PathBuf::from)
            .filter(|p| p.exists())
            .collect()
    };
    let (mut cfg, used, errors) = GameConfig::load_layered(&paths);
    if explicit && used.is_empty() {
        bail!("no --config file could be loaded: {}", errors.join("; "));
    }
    if args.seed.is_some() {
        cfg.board.seed = args.seed;
    }
    let report = ConfigLoadReport {
        used,
        errors,
        warnings: cfg.validate(),
    };

    let exit = App::new()
        .insert_resource(cfg.clone())
        .insert_resource(report)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(GamePlugin)
        .add_systems(Startup, log_config_report)
        .run();

    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => bail!("app exited with error code {code}"),
    }
}

fn log_config_report(report: Res<ConfigLoadReport>) {
    if report.used.is_empty() {
        info!(target: "config", "no config file found, using built-in defaults");
    } else {
        info!(target: "config", "config layers: {}", report.used.join(", "));
    }
    for e in &report.errors {
        warn!(target: "config", "{e}");
    }
    for w in &report.warnings {
        warn!(target: "config", "validation: {w}");
    }
}
