//! Configuration types for a single game session.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Playfield;

/// Tunable parameters of a game session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the playfield in world units.
    pub width: u32,
    /// Height of the playfield in world units.
    pub height: u32,
    /// Edge length of a grid cell in world units.
    pub grid_size: u32,
    /// Number of segments the snake starts with.
    pub initial_snake_length: u32,
    /// Snake steps per second at session start.
    pub fps: u32,
    /// Slowest speed accepted by speed changes.
    pub min_fps: u32,
    /// Fastest speed accepted by speed changes.
    pub max_fps: u32,
    /// Score awarded for each ordinary food item.
    pub points_per_food: u32,
    /// Segments removed by a shrink food item.
    pub shrink_segments: u32,
    /// Upper bound on simulation steps replayed by a single frame.
    pub max_catch_up_steps: u32,
    /// Seed for food placement and kind selection.
    pub seed: u64,
    /// Rule used to choose the kind of each spawned food item.
    pub spawn_policy: SpawnPolicy,
    /// Rigid-body tuning for food items.
    pub physics: PhysicsConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
            grid_size: 20,
            initial_snake_length: 3,
            fps: 10,
            min_fps: 3,
            max_fps: 30,
            points_per_food: 10,
            shrink_segments: 2,
            max_catch_up_steps: 8,
            seed: 0x5eed_f00d_cafe_d00d,
            spawn_policy: SpawnPolicy::AlwaysOrdinary,
            physics: PhysicsConfig::default(),
        }
    }
}

impl GameConfig {
    /// Playfield described by this configuration.
    #[must_use]
    pub const fn playfield(&self) -> Playfield {
        Playfield::new(self.width, self.height, self.grid_size)
    }

    /// Clamps a requested speed into the configured range.
    #[must_use]
    pub fn clamp_fps(&self, fps: u32) -> u32 {
        fps.clamp(self.min_fps, self.max_fps)
    }

    /// Checks that the configuration describes a playable session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::ZeroGridSize);
        }
        if self.width % self.grid_size != 0 || self.height % self.grid_size != 0 {
            return Err(ConfigError::MisalignedPlayfield {
                width: self.width,
                height: self.height,
                grid_size: self.grid_size,
            });
        }
        if self.width < self.grid_size || self.height < self.grid_size {
            return Err(ConfigError::EmptyPlayfield {
                width: self.width,
                height: self.height,
            });
        }
        if self.initial_snake_length == 0 {
            return Err(ConfigError::ZeroInitialLength);
        }
        if self.min_fps == 0 || self.min_fps > self.max_fps {
            return Err(ConfigError::InvalidSpeedRange {
                min: self.min_fps,
                max: self.max_fps,
            });
        }
        if self.max_catch_up_steps == 0 {
            return Err(ConfigError::ZeroCatchUp);
        }
        self.spawn_policy.validate()?;
        self.physics.validate()
    }
}

/// Rule used to pick the kind of each spawned food item.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum SpawnPolicy {
    /// Every food item is ordinary.
    AlwaysOrdinary,
    /// Each food item is a shrink item with the given probability.
    ShrinkChance {
        /// Probability in `[0, 1]` of spawning a shrink item.
        probability: f32,
    },
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self::AlwaysOrdinary
    }
}

impl SpawnPolicy {
    fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::AlwaysOrdinary => Ok(()),
            Self::ShrinkChance { probability } => {
                if probability.is_finite() && (0.0..=1.0).contains(&probability) {
                    Ok(())
                } else {
                    Err(ConfigError::InvalidProbability { probability })
                }
            }
        }
    }
}

/// Rigid-body tuning applied to food items and the boundary walls.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity in world units per second squared; positive y points down.
    pub gravity: Vec2,
    /// Bounciness of food items.
    pub restitution: f32,
    /// Surface friction of food items.
    pub friction: f32,
    /// Mass density of food items.
    pub density: f32,
    /// Linear velocity damping applied to food items.
    pub linear_damping: f32,
    /// Simulated seconds advanced by one physics update.
    pub timestep_seconds: f32,
    /// Largest per-axis speed, in world units per second, of a spawn impulse.
    pub max_impulse: f32,
    /// Thickness of the static walls surrounding the playfield in world units.
    pub wall_thickness: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 980.0),
            restitution: 0.6,
            friction: 0.005,
            density: 0.001,
            linear_damping: 0.6,
            timestep_seconds: 1.0 / 60.0,
            max_impulse: 150.0,
            wall_thickness: 20.0,
        }
    }
}

impl PhysicsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let finite = self.gravity.is_finite()
            && self.restitution.is_finite()
            && self.friction.is_finite()
            && self.density.is_finite()
            && self.linear_damping.is_finite()
            && self.timestep_seconds.is_finite()
            && self.max_impulse.is_finite()
            && self.wall_thickness.is_finite();
        if !finite {
            return Err(ConfigError::InvalidPhysics("values must be finite"));
        }
        if self.timestep_seconds <= 0.0 {
            return Err(ConfigError::InvalidPhysics("timestep must be positive"));
        }
        if self.density <= 0.0 {
            return Err(ConfigError::InvalidPhysics("density must be positive"));
        }
        if self.wall_thickness <= 0.0 {
            return Err(ConfigError::InvalidPhysics("wall thickness must be positive"));
        }
        if self.restitution < 0.0 || self.friction < 0.0 || self.linear_damping < 0.0 {
            return Err(ConfigError::InvalidPhysics(
                "restitution, friction and damping must not be negative",
            ));
        }
        if self.max_impulse < 0.0 {
            return Err(ConfigError::InvalidPhysics("impulse must not be negative"));
        }
        Ok(())
    }
}

/// Reasons a [`GameConfig`] cannot be used to start a session.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Grid cells must have a positive edge length.
    #[error("grid size must be positive")]
    ZeroGridSize,
    /// Playfield dimensions must be whole multiples of the grid size.
    #[error("playfield {width}x{height} is not a multiple of grid size {grid_size}")]
    MisalignedPlayfield {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
        /// Configured grid size.
        grid_size: u32,
    },
    /// Playfield must contain at least one cell.
    #[error("playfield {width}x{height} contains no grid cells")]
    EmptyPlayfield {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// The snake must start with at least one segment.
    #[error("initial snake length must be at least one segment")]
    ZeroInitialLength,
    /// Speed bounds must be positive and ordered.
    #[error("speed range {min}..={max} is invalid")]
    InvalidSpeedRange {
        /// Configured minimum speed.
        min: u32,
        /// Configured maximum speed.
        max: u32,
    },
    /// The catch-up cap must allow at least one step per frame.
    #[error("max catch-up steps must be at least one")]
    ZeroCatchUp,
    /// Spawn probabilities must lie in `[0, 1]`.
    #[error("shrink probability {probability} is outside [0, 1]")]
    InvalidProbability {
        /// Configured probability.
        probability: f32,
    },
    /// Physics tuning is unusable.
    #[error("invalid physics configuration: {0}")]
    InvalidPhysics(&'static str),
}
