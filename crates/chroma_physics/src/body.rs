//! Rigid body descriptions

use crate::convert;
use chroma_math::Vec2;
use rapier2d::prelude as rapier;
use serde::{Deserialize, Serialize};

/// Type of rigid body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyType {
    /// Never moves, infinite mass
    Static,
    /// Fully simulated
    #[default]
    Dynamic,
    /// Moved by setting its velocity
    Kinematic,
}

impl From<BodyType> for rapier::RigidBodyType {
    fn from(t: BodyType) -> Self {
        match t {
            BodyType::Static => rapier::RigidBodyType::Fixed,
            BodyType::Dynamic => rapier::RigidBodyType::Dynamic,
            BodyType::Kinematic => rapier::RigidBodyType::KinematicVelocityBased,
        }
    }
}

/// Description for creating a rigid body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyDesc {
    pub body_type: BodyType,
    /// Initial position
    pub position: Vec2,
    /// Initial rotation in radians
    pub rotation: f32,
    pub linear_velocity: Vec2,
    /// Linear damping (floor friction in a top-down world)
    pub linear_damping: f32,
    /// Mass added on top of what the colliders contribute
    pub additional_mass: f32,
    /// Characters never spin from contacts
    pub lock_rotation: bool,
    pub ccd_enabled: bool,
    pub can_sleep: bool,
}

impl Default for BodyDesc {
    fn default() -> Self {
        Self {
            body_type: BodyType::Dynamic,
            position: Vec2::ZERO,
            rotation: 0.0,
            linear_velocity: Vec2::ZERO,
            linear_damping: 0.0,
            additional_mass: 0.0,
            lock_rotation: false,
            ccd_enabled: false,
            can_sleep: true,
        }
    }
}

impl BodyDesc {
    /// Create a static body description
    pub fn fixed() -> Self {
        Self {
            body_type: BodyType::Static,
            ..Default::default()
        }
    }

    /// Create a dynamic body description
    pub fn dynamic() -> Self {
        Self {
            body_type: BodyType::Dynamic,
            ..Default::default()
        }
    }

    /// Dynamic body with locked rotation, used by the player and enemies
    pub fn character() -> Self {
        Self {
            body_type: BodyType::Dynamic,
            lock_rotation: true,
            can_sleep: false,
            ..Default::default()
        }
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, angle: f32) -> Self {
        self.rotation = angle;
        self
    }

    pub fn with_linear_velocity(mut self, velocity: Vec2) -> Self {
        self.linear_velocity = velocity;
        self
    }

    pub fn with_linear_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping;
        self
    }

    pub fn with_additional_mass(mut self, mass: f32) -> Self {
        self.additional_mass = mass;
        self
    }

    pub fn with_ccd(mut self, enabled: bool) -> Self {
        self.ccd_enabled = enabled;
        self
    }

    /// Build a Rapier rigid body builder
    pub(crate) fn to_rapier_builder(&self, user_data: u128) -> rapier::RigidBodyBuilder {
        let mut builder = rapier::RigidBodyBuilder::new(self.body_type.into())
            .translation(convert::vector(self.position))
            .rotation(self.rotation)
            .linvel(convert::vector(self.linear_velocity))
            .linear_damping(self.linear_damping)
            .ccd_enabled(self.ccd_enabled)
            .can_sleep(self.can_sleep)
            .user_data(user_data);

        if self.lock_rotation {
            builder = builder.lock_rotations();
        }
        if self.additional_mass > 0.0 {
            builder = builder.additional_mass(self.additional_mass);
        }

        builder
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.position.is_finite()
            && self.rotation.is_finite()
            && self.linear_velocity.is_finite()
            && self.linear_damping.is_finite()
    }
}
