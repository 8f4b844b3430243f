//! Physics configuration

use serde::{Deserialize, Serialize};

/// Solver velocity iterations used when none are configured
pub const DEFAULT_VELOCITY_ITERATIONS: usize = 6;

/// Solver position iterations used when none are configured
pub const DEFAULT_POSITION_ITERATIONS: usize = 2;

/// Physics world configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity vector (top-down, so zero by default)
    pub gravity: [f32; 2],

    /// Fixed timestep for physics simulation
    pub timestep: f32,

    /// Maximum number of substeps per frame
    pub max_substeps: u32,

    /// Enable continuous collision detection for dynamic bodies
    pub ccd_enabled: bool,

    /// Solver iterations for velocity
    pub velocity_iterations: usize,

    /// Solver iterations for position
    pub position_iterations: usize,

    /// Enable sleeping for inactive bodies
    pub sleeping_enabled: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, 0.0],
            timestep: 1.0 / 60.0,
            max_substeps: 4,
            ccd_enabled: false,
            velocity_iterations: DEFAULT_VELOCITY_ITERATIONS,
            position_iterations: DEFAULT_POSITION_ITERATIONS,
            sleeping_enabled: true,
        }
    }
}

impl PhysicsConfig {
    /// Set gravity
    pub fn with_gravity(mut self, x: f32, y: f32) -> Self {
        self.gravity = [x, y];
        self
    }

    /// Set timestep
    pub fn with_timestep(mut self, timestep: f32) -> Self {
        self.timestep = timestep;
        self
    }

    /// Set maximum substeps per `step` call
    pub fn with_max_substeps(mut self, max_substeps: u32) -> Self {
        self.max_substeps = max_substeps;
        self
    }

    /// Set solver iterations
    pub fn with_iterations(mut self, velocity: usize, position: usize) -> Self {
        self.velocity_iterations = velocity;
        self.position_iterations = position;
        self
    }

    /// Check the values a world cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if !(self.timestep.is_finite() && self.timestep > 0.0) {
            return Err(crate::PhysicsError::InvalidConfig(format!(
                "timestep must be positive, got {}",
                self.timestep
            )));
        }
        if self.max_substeps == 0 {
            return Err(crate::PhysicsError::InvalidConfig(
                "max_substeps must be at least 1".into(),
            ));
        }
        if !self.gravity.iter().all(|g| g.is_finite()) {
            return Err(crate::PhysicsError::InvalidConfig("gravity must be finite".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_top_down() {
        let config = PhysicsConfig::default();
        assert_eq!(config.gravity, [0.0, 0.0]);
        assert_eq!(config.velocity_iterations, 6);
        assert_eq!(config.position_iterations, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_timestep() {
        assert!(PhysicsConfig::default().with_timestep(0.0).validate().is_err());
        assert!(PhysicsConfig::default().with_timestep(f32::NAN).validate().is_err());
        assert!(PhysicsConfig::default().with_max_substeps(0).validate().is_err());
    }
}
