//! Blinking laser barriers

use chroma_math::Vec2;
use chroma_physics::{BodyDesc, ColliderDesc, ColliderShape, EntityTag, PhysicsWorld, Result};
use serde::{Deserialize, Serialize};

/// Shortest toggle period a level may ask for, in seconds
pub const MIN_LASER_PERIOD: f32 = 1.0e-3;

fn default_thickness() -> f32 {
    4.0
}

fn default_true() -> bool {
    true
}

/// Laser as placed in a level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaserDesc {
    pub start: Vec2,
    pub end: Vec2,
    /// Seconds between toggles; zero or less keeps the laser in its initial state
    #[serde(default)]
    pub period: f32,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default = "default_thickness")]
    pub thickness: f32,
}

/// A laser sensor that switches on and off on a fixed period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Laser {
    pub tag: EntityTag,
    pub start: Vec2,
    pub end: Vec2,
    pub thickness: f32,
    period: f32,
    active: bool,
    elapsed: f32,
}

impl Laser {
    pub fn new(tag: EntityTag, desc: &LaserDesc) -> Self {
        Self {
            tag,
            start: desc.start,
            end: desc.end,
            thickness: desc.thickness,
            period: desc.period,
            active: desc.active,
            elapsed: 0.0,
        }
    }

    /// Add the laser's sensor to the physics world
    pub fn spawn(&self, physics: &mut PhysicsWorld) -> Result<()> {
        let span = self.end - self.start;
        physics.spawn(
            self.tag,
            BodyDesc::fixed()
                .with_position((self.start + self.end) * 0.5)
                .with_rotation(span.angle()),
            ColliderDesc::sensor(ColliderShape::cuboid(span.length() * 0.5, self.thickness * 0.5)),
        )
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the toggle timer. Returns whether the state changed.
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.period.is_finite() || self.period <= 0.0 || !dt.is_finite() || dt <= 0.0 {
            return false;
        }
        self.elapsed += dt;
        let toggles = (self.elapsed / self.period).floor();
        self.elapsed %= self.period;
        // An even count lands back on the same state
        let changed = toggles % 2.0 == 1.0;
        if changed {
            self.active = !self.active;
        }
        changed
    }
}
