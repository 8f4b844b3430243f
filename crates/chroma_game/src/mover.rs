//! Force-driven movement shared by the player and enemies

use chroma_math::Vec2;
use chroma_physics::{EntityTag, PhysicsWorld, Result};
use serde::{Deserialize, Serialize};

/// How hard and how fast a body may be pushed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoverParams {
    /// Force applied at full input
    pub force: f32,
    pub max_speed: f32,
}

impl MoverParams {
    pub fn new(force: f32, max_speed: f32) -> Self {
        Self { force, max_speed }
    }
}

/// Replace the body's force with `input * force` and cap its speed.
///
/// `input` is a pair of movement axes; anything longer than one is scaled
/// down first. Velocity comes from the solver integrating the force against
/// the body's linear damping.
pub fn drive(physics: &mut PhysicsWorld, tag: EntityTag, input: Vec2, params: &MoverParams) -> Result<()> {
    let input = if input.is_finite() {
        input.clamp_length(1.0)
    } else {
        Vec2::ZERO
    };

    physics.reset_forces(tag)?;
    if input != Vec2::ZERO {
        physics.apply_force(tag, input * params.force)?;
    }
    physics.clamp_speed(tag, params.max_speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chroma_physics::{BodyDesc, ColliderDesc, ColliderShape, EntityKind};

    fn world_with_ball() -> (PhysicsWorld, EntityTag) {
        let mut physics = PhysicsWorld::default();
        let tag = EntityTag::new(EntityKind::Player, 1);
        physics
            .spawn(
                tag,
                BodyDesc::character().with_linear_damping(2.0),
                ColliderDesc::new(ColliderShape::circle(0.5)),
            )
            .unwrap();
        (physics, tag)
    }

    #[test]
    fn test_drive_accelerates_along_input() {
        let (mut physics, tag) = world_with_ball();
        let params = MoverParams::new(50.0, 100.0);

        for _ in 0..10 {
            drive(&mut physics, tag, Vec2::new(1.0, 0.0), &params).unwrap();
            physics.step(1.0 / 60.0);
        }

        let velocity = physics.linear_velocity(tag).unwrap();
        assert!(velocity.x > 0.0);
        assert!(velocity.y.abs() < 1e-4);
    }

    #[test]
    fn test_drive_caps_speed() {
        let (mut physics, tag) = world_with_ball();
        physics.set_linear_velocity(tag, Vec2::new(30.0, 40.0)).unwrap();

        drive(&mut physics, tag, Vec2::ZERO, &MoverParams::new(10.0, 5.0)).unwrap();
        let speed = physics.linear_velocity(tag).unwrap().length();
        assert!(speed <= 5.0 + 1e-4);
    }

    #[test]
    fn test_drive_unknown_entity() {
        let (mut physics, _) = world_with_ball();
        let ghost = EntityTag::new(EntityKind::Enemy, 42);
        assert!(drive(&mut physics, ghost, Vec2::X, &MoverParams::new(1.0, 1.0)).is_err());
    }
}
