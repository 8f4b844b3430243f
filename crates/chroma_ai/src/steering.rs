//! Steering behaviors

use chroma_math::Vec2;
use serde::{Deserialize, Serialize};

/// Movement input produced by a steering behavior.
///
/// `linear` is read as the horizontal/vertical movement axes, the same input a
/// player feeds into the mover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SteeringOutput {
    pub linear: Vec2,
}

impl SteeringOutput {
    /// Zero output
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn new(x: f32, y: f32) -> Self {
        Self {
            linear: Vec2::new(x, y),
        }
    }

    /// Unit direction from `from` to `to`, scaled by `factor`. Zero when the
    /// points coincide.
    pub fn seek(from: Vec2, to: Vec2, factor: f32) -> Self {
        Self {
            linear: (to - from).normalize_or_zero() * factor,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.linear == Vec2::ZERO
    }

    pub fn add(&mut self, other: &SteeringOutput) {
        self.linear += other.linear;
    }

    pub fn scale(&mut self, factor: f32) {
        self.linear *= factor;
    }

    pub fn magnitude(&self) -> f32 {
        self.linear.length()
    }

    /// Limit magnitude
    pub fn limit(&mut self, max: f32) {
        self.linear = self.linear.clamp_length(max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_seek_is_unit_times_factor() {
        let out = SteeringOutput::seek(Vec2::new(1.0, 1.0), Vec2::new(4.0, 5.0), 0.5);
        assert_relative_eq!(out.magnitude(), 0.5, epsilon = 1e-6);
        assert_relative_eq!(out.linear.x, 0.3, epsilon = 1e-6);
        assert_relative_eq!(out.linear.y, 0.4, epsilon = 1e-6);
    }

    #[test]
    fn test_seek_coincident_points() {
        assert!(SteeringOutput::seek(Vec2::ONE, Vec2::ONE, 1.0).is_zero());
    }

    #[test]
    fn test_limit() {
        let mut out = SteeringOutput::new(3.0, 4.0);
        out.limit(1.0);
        assert_relative_eq!(out.magnitude(), 1.0, epsilon = 1e-6);
        out.scale(2.0);
        out.add(&SteeringOutput::new(-1.2, -1.6));
        assert!(out.magnitude() < 1e-5);
    }
}
