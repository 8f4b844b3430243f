//! Line-of-sight queries used by navigation and detection

use chroma_math::{segment_intersects_polygon, Polygon, Vec2};
use chroma_physics::PhysicsWorld;

/// Answers whether the straight segment between two points is unobstructed
pub trait LineOfSight {
    fn is_clear(&self, from: Vec2, to: Vec2) -> bool;
}

/// Sight through the physics world: walls block, sprays and sensors do not
impl LineOfSight for PhysicsWorld {
    fn is_clear(&self, from: Vec2, to: Vec2) -> bool {
        self.query().line_of_sight(from, to)
    }
}

/// Nothing ever blocks
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenSight;

impl LineOfSight for OpenSight {
    fn is_clear(&self, from: Vec2, to: Vec2) -> bool {
        from.is_finite() && to.is_finite()
    }
}

/// Pure-geometry sight against a fixed set of wall polygons
#[derive(Debug, Clone, Default)]
pub struct PolygonSight {
    pub walls: Vec<Polygon>,
}

impl PolygonSight {
    pub fn new(walls: Vec<Polygon>) -> Self {
        Self { walls }
    }
}

impl LineOfSight for PolygonSight {
    fn is_clear(&self, from: Vec2, to: Vec2) -> bool {
        from.is_finite()
            && to.is_finite()
            && !self
                .walls
                .iter()
                .any(|wall| segment_intersects_polygon(from, to, wall))
    }
}

impl<T: LineOfSight + ?Sized> LineOfSight for &T {
    fn is_clear(&self, from: Vec2, to: Vec2) -> bool {
        (**self).is_clear(from, to)
    }
}
