//! Game error types

use chroma_physics::PhysicsError;
use thiserror::Error;

/// Errors raised while loading configuration or building a level.
///
/// Nothing in the per-frame loop returns these; runtime anomalies degrade to
/// a no-op instead.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to parse level: {0}")]
    LevelParse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid level: {0}")]
    InvalidLevel(String),

    #[error("Physics error: {0}")]
    Physics(#[from] PhysicsError),
}

/// Result type for game operations
pub type Result<T> = std::result::Result<T, GameError>;
