//! Error types for the physics adapter

use crate::layers::EntityTag;
use thiserror::Error;

/// Physics adapter errors
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// Entity has no body in this world
    #[error("Entity has no physics body: {0}")]
    EntityNotInPhysics(EntityTag),

    /// An entity with this tag already owns a body
    #[error("Entity already has a physics body: {0}")]
    DuplicateEntity(EntityTag),

    /// Invalid configuration
    #[error("Invalid physics configuration: {0}")]
    InvalidConfig(String),

    /// Shape creation failed
    #[error("Failed to create collision shape: {0}")]
    ShapeCreationFailed(String),
}

/// Result type for physics operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
