//! Game configuration
//!
//! Loaded from a TOML file, then adjusted by environment variables:
//!
//! - `CHROMA_SEED`: base seed for enemy wander targets
//! - `CHROMA_GRID_SIZE`: navigation grid spacing in world units
//!
//! # Example Config File
//!
//! ```toml
//! seed = 7
//! grid_size = 32.0
//!
//! [physics]
//! timestep = 0.016666668
//! max_substeps = 4
//!
//! [enemy]
//! detection_range = 180.0
//! widen_rate = 10.0
//! max_detection_range = 260.0
//!
//! [spray]
//! ray_count = 12
//! lifetime = 6.0
//! ```

use crate::bomb::BombConfig;
use crate::error::{GameError, Result};
use crate::spray::SprayConfig;
use chroma_ai::EnemyConfig;
use chroma_physics::PhysicsConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_SEED: &str = "CHROMA_SEED";
pub const ENV_GRID_SIZE: &str = "CHROMA_GRID_SIZE";

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Base seed; each enemy derives its own from this
    pub seed: u64,
    /// Navigation grid spacing
    pub grid_size: f32,
    /// Navigation edge reach as a multiple of `grid_size`
    pub neighbor_factor: f32,
    pub physics: PhysicsConfig,
    pub enemy: EnemyConfig,
    pub spray: SprayConfig,
    pub bomb: BombConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            grid_size: 32.0,
            neighbor_factor: 1.5,
            physics: PhysicsConfig::default(),
            enemy: EnemyConfig::default(),
            spray: SprayConfig::default(),
            bomb: BombConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_grid_size(mut self, grid_size: f32) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_enemy(mut self, enemy: EnemyConfig) -> Self {
        self.enemy = enemy;
        self
    }

    pub fn with_spray(mut self, spray: SprayConfig) -> Self {
        self.spray = spray;
        self
    }

    pub fn with_bomb(mut self, bomb: BombConfig) -> Self {
        self.bomb = bomb;
        self
    }

    pub fn with_physics(mut self, physics: PhysicsConfig) -> Self {
        self.physics = physics;
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file and apply environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config: Self = toml::from_str(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded game config from {}", path.display());
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides, for running without a file
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup. Unparseable values are ignored
    /// with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_SEED) {
            match value.trim().parse() {
                Ok(seed) => {
                    self.seed = seed;
                    log::info!("Seed from env: {}", seed);
                }
                Err(_) => log::warn!("Ignoring {}={:?}: not an integer", ENV_SEED, value),
            }
        }

        if let Some(value) = lookup(ENV_GRID_SIZE) {
            match value.trim().parse() {
                Ok(grid_size) => {
                    self.grid_size = grid_size;
                    log::info!("Grid size from env: {}", grid_size);
                }
                Err(_) => log::warn!("Ignoring {}={:?}: not a number", ENV_GRID_SIZE, value),
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(GameError::InvalidConfig(msg));

        if !(self.grid_size.is_finite() && self.grid_size > 0.0) {
            return invalid(format!("grid_size must be positive, got {}", self.grid_size));
        }
        if !(self.neighbor_factor.is_finite() && self.neighbor_factor > 0.0) {
            return invalid(format!(
                "neighbor_factor must be positive, got {}",
                self.neighbor_factor
            ));
        }
        if self.spray.max_vertices < 3 {
            return invalid(format!(
                "spray.max_vertices must be at least 3, got {}",
                self.spray.max_vertices
            ));
        }
        if !(self.bomb.radius.is_finite() && self.bomb.radius > 0.0) {
            return invalid(format!("bomb.radius must be positive, got {}", self.bomb.radius));
        }
        self.physics
            .validate()
            .map_err(|e| GameError::InvalidConfig(e.to_string()))
    }
}
