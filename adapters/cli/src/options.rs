//! Command-line options and game configuration loading.

use std::{fs, path::Path, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use physnake_core::{GameConfig, SpawnPolicy};

/// Snake on a grid, with food that tumbles under rigid-body physics.
#[derive(Debug, Parser)]
#[command(name = "physnake", version)]
pub(crate) struct Cli {
    /// TOML file with game settings; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Playfield width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Playfield height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Edge length of a grid cell in pixels.
    #[arg(long)]
    grid_size: Option<u32>,

    /// Snake steps per second at the start of a session.
    #[arg(long)]
    fps: Option<u32>,

    /// Seed for food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Probability that a spawned food item shrinks the snake.
    #[arg(long)]
    shrink_chance: Option<f32>,

    /// Print frame timing once per second.
    #[arg(long)]
    pub(crate) show_fps: bool,

    /// Render as fast as possible instead of waiting for the display.
    #[arg(long)]
    pub(crate) no_vsync: bool,
}

impl Cli {
    /// Resolves the configuration file and flag overrides into a validated config.
    pub(crate) fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => GameConfig::default(),
        };
        self.apply_overrides(&mut config);
        config
            .validate()
            .context("invalid game configuration")?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut GameConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(probability) = self.shrink_chance {
            config.spawn_policy = SpawnPolicy::ShrinkChance { probability };
        }
    }
}

fn load_config(path: &Path) -> Result<GameConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse config file {}", path.display()))
}
