//! Thrown paint bombs

use chroma_math::Vec2;
use chroma_physics::{BodyDesc, ColliderDesc, ColliderShape, EntityTag, PhysicsWorld, Result};
use serde::{Deserialize, Serialize};

/// Bomb tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BombConfig {
    pub radius: f32,
    /// Seconds before the bomb cloud disappears
    pub lifetime: f32,
    pub throw_speed: f32,
    pub linear_damping: f32,
    pub mass: f32,
    /// Seconds between throws
    pub cooldown: f32,
}

impl Default for BombConfig {
    fn default() -> Self {
        Self {
            radius: 24.0,
            lifetime: 5.0,
            throw_speed: 240.0,
            linear_damping: 3.0,
            mass: 1.0,
            cooldown: 2.0,
        }
    }
}

impl BombConfig {
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_throw(mut self, speed: f32, damping: f32) -> Self {
        self.throw_speed = speed;
        self.linear_damping = damping;
        self
    }
}

/// Launch a sensor disc from `origin` toward `target`. The body joins the
/// world on the next step.
pub fn throw_bomb(
    physics: &mut PhysicsWorld,
    tag: EntityTag,
    origin: Vec2,
    target: Vec2,
    config: &BombConfig,
) -> Result<()> {
    let velocity = (target - origin).normalize_or_zero() * config.throw_speed;
    physics.queue_spawn(
        tag,
        BodyDesc::dynamic()
            .with_position(origin)
            .with_linear_velocity(velocity)
            .with_linear_damping(config.linear_damping)
            .with_additional_mass(config.mass),
        ColliderDesc::sensor(ColliderShape::circle(config.radius)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chroma_physics::EntityKind;

    #[test]
    fn test_bomb_flies_toward_target_and_slows() {
        let mut physics = PhysicsWorld::default();
        let tag = EntityTag::new(EntityKind::Bomb, 1);
        throw_bomb(&mut physics, tag, Vec2::ZERO, Vec2::new(0.0, 100.0), &BombConfig::default()).unwrap();

        physics.step(1.0 / 60.0);
        let first = physics.linear_velocity(tag).unwrap();
        assert!(first.y > 0.0);
        assert!(first.x.abs() < 1e-4);

        for _ in 0..30 {
            physics.step(1.0 / 60.0);
        }
        let later = physics.linear_velocity(tag).unwrap();
        assert!(later.y < first.y);
        assert!(physics.position(tag).unwrap().y > 0.0);
    }

    #[test]
    fn test_bad_radius_rejected() {
        let mut physics = PhysicsWorld::default();
        let tag = EntityTag::new(EntityKind::Bomb, 1);
        let config = BombConfig::default().with_radius(-1.0);
        assert!(throw_bomb(&mut physics, tag, Vec2::ZERO, Vec2::X, &config).is_err());
    }
}
