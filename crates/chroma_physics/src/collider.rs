//! Collider shapes and descriptions

use crate::convert;
use crate::error::{PhysicsError, Result};
use crate::layers::CollisionGroups;
use crate::material::PhysicsMaterial;
use chroma_math::{polygon_area, Vec2};
use rapier2d::prelude as rapier;
use serde::{Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};

/// Polygons with less area than this are rejected before reaching Rapier
const MIN_POLYGON_AREA: f32 = 1e-6;

/// Collision shape type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Disc with radius
    Circle { radius: f32 },
    /// Box with half-extents
    Cuboid { half_extents: Vec2 },
    /// Capsule aligned along Y axis
    CapsuleY { half_height: f32, radius: f32 },
    /// Arbitrary simple polygon in body-local coordinates, split into convex
    /// parts on construction
    Polygon { points: Vec<Vec2> },
}

impl Default for ColliderShape {
    fn default() -> Self {
        Self::Cuboid {
            half_extents: Vec2::new(0.5, 0.5),
        }
    }
}

impl ColliderShape {
    pub fn circle(radius: f32) -> Self {
        Self::Circle { radius }
    }

    pub fn cuboid(hx: f32, hy: f32) -> Self {
        Self::Cuboid {
            half_extents: Vec2::new(hx, hy),
        }
    }

    /// Box from full size
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::cuboid(width * 0.5, height * 0.5)
    }

    pub fn capsule(half_height: f32, radius: f32) -> Self {
        Self::CapsuleY { half_height, radius }
    }

    pub fn polygon(points: Vec<Vec2>) -> Self {
        Self::Polygon { points }
    }

    /// Build a Rapier shared shape, rejecting degenerate input
    pub(crate) fn to_rapier(&self) -> Result<rapier::SharedShape> {
        match self {
            Self::Circle { radius } => {
                positive("radius", *radius)?;
                Ok(rapier::SharedShape::ball(*radius))
            }
            Self::Cuboid { half_extents } => {
                positive("half extent", half_extents.x)?;
                positive("half extent", half_extents.y)?;
                Ok(rapier::SharedShape::cuboid(half_extents.x, half_extents.y))
            }
            Self::CapsuleY { half_height, radius } => {
                positive("radius", *radius)?;
                if !(half_height.is_finite() && *half_height >= 0.0) {
                    return Err(PhysicsError::ShapeCreationFailed(format!(
                        "invalid capsule half height {half_height}"
                    )));
                }
                Ok(rapier::SharedShape::capsule_y(*half_height, *radius))
            }
            Self::Polygon { points } => decompose_polygon(points),
        }
    }
}

fn positive(what: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::ShapeCreationFailed(format!("invalid {what} {value}")))
    }
}

/// Convex decomposition of a closed polygon outline.
///
/// Rapier panics on some self-intersecting outlines; the panic is contained
/// and reported as [`PhysicsError::ShapeCreationFailed`].
fn decompose_polygon(points: &[Vec2]) -> Result<rapier::SharedShape> {
    if points.len() < 3 {
        return Err(PhysicsError::ShapeCreationFailed(format!(
            "polygon needs at least 3 vertices, got {}",
            points.len()
        )));
    }
    if !points.iter().all(|p| p.is_finite()) {
        return Err(PhysicsError::ShapeCreationFailed("non-finite polygon vertex".into()));
    }
    let area = polygon_area(points);
    if area < MIN_POLYGON_AREA {
        return Err(PhysicsError::ShapeCreationFailed(format!(
            "polygon area {area} is degenerate"
        )));
    }

    let vertices: Vec<rapier::Point<f32>> = points.iter().map(|p| convert::point(*p)).collect();
    let n = vertices.len() as u32;
    let indices: Vec<[u32; 2]> = (0..n).map(|i| [i, (i + 1) % n]).collect();

    let shape = panic::catch_unwind(AssertUnwindSafe(|| {
        rapier::SharedShape::convex_decomposition(&vertices, &indices)
    }))
    .map_err(|_| PhysicsError::ShapeCreationFailed("convex decomposition panicked".into()))?;

    let parts = shape.as_compound().map(|c| c.shapes().len()).unwrap_or(1);
    if parts == 0 {
        return Err(PhysicsError::ShapeCreationFailed(
            "convex decomposition produced no parts".into(),
        ));
    }
    Ok(shape)
}

/// Description for creating a collider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColliderDesc {
    pub shape: ColliderShape,
    /// Position offset from parent body
    pub offset: Vec2,
    /// Is this a sensor (detection without physical response)
    pub is_sensor: bool,
    pub material: PhysicsMaterial,
    pub collision_groups: CollisionGroups,
}

impl Default for ColliderDesc {
    fn default() -> Self {
        Self {
            shape: ColliderShape::default(),
            offset: Vec2::ZERO,
            is_sensor: false,
            material: PhysicsMaterial::default(),
            collision_groups: CollisionGroups::ALL,
        }
    }
}

impl ColliderDesc {
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            ..Default::default()
        }
    }

    /// Create a sensor (trigger volume)
    pub fn sensor(shape: ColliderShape) -> Self {
        Self {
            shape,
            is_sensor: true,
            ..Default::default()
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_sensor(mut self, is_sensor: bool) -> Self {
        self.is_sensor = is_sensor;
        self
    }

    pub fn with_material(mut self, material: PhysicsMaterial) -> Self {
        self.material = material;
        self
    }

    pub fn with_collision_groups(mut self, groups: CollisionGroups) -> Self {
        self.collision_groups = groups;
        self
    }

    /// Build a Rapier collider builder.
    ///
    /// Every collider reports collision events and runs the contact-pair hook.
    /// Fixed-fixed pairs are enabled so static sensors (sprays) see static
    /// goals.
    pub(crate) fn to_rapier_builder(&self, user_data: u128) -> Result<rapier::ColliderBuilder> {
        let shape = self.shape.to_rapier()?;
        Ok(rapier::ColliderBuilder::new(shape)
            .translation(convert::vector(self.offset))
            .sensor(self.is_sensor)
            .friction(self.material.friction)
            .restitution(self.material.restitution)
            .density(self.material.density)
            .collision_groups(self.collision_groups.to_rapier())
            .active_events(rapier::ActiveEvents::COLLISION_EVENTS)
            .active_hooks(rapier::ActiveHooks::FILTER_CONTACT_PAIRS)
            .active_collision_types(
                rapier::ActiveCollisionTypes::default() | rapier::ActiveCollisionTypes::FIXED_FIXED,
            )
            .user_data(user_data))
    }
}
