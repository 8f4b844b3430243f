//! # chroma_math - 2D Geometry Primitives
//!
//! Vector type and polygon helpers shared by physics, navigation and the
//! spray-shape builder. Everything here is plain `f32` math with no
//! dependency on the physics backend.

pub mod geometry;
pub mod vector;

pub use geometry::*;
pub use vector::*;

/// Common math constants
pub mod consts {
    pub const PI: f32 = core::f32::consts::PI;
    pub const TAU: f32 = PI * 2.0;
    pub const FRAC_PI_2: f32 = PI / 2.0;
    pub const FRAC_PI_3: f32 = PI / 3.0;
    pub const EPSILON: f32 = 1e-6;
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamp value between min and max
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

pub mod prelude {
    pub use crate::geometry::{
        cross, point_in_polygon, point_on_segment, polygon_area, segment_intersects_polygon,
        segments_intersect, Polygon,
    };
    pub use crate::vector::Vec2;
    pub use crate::{clamp, lerp};
}
