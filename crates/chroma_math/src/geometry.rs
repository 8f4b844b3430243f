//! Polygon and segment tests

use crate::vector::Vec2;

/// Tolerance used for boundary and collinearity checks
pub const GEOMETRY_EPSILON: f32 = 1e-5;

/// Closed polygon given by its vertex loop (the last vertex connects back to the first)
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Polygon {
    pub vertices: Vec<Vec2>,
}

impl Polygon {
    pub fn new(vertices: Vec<Vec2>) -> Self {
        Self { vertices }
    }

    /// Axis-aligned rectangle from its min corner and size
    pub fn rect(min: Vec2, size: Vec2) -> Self {
        Self::new(vec![
            min,
            Vec2::new(min.x + size.x, min.y),
            min + size,
            Vec2::new(min.x, min.y + size.y),
        ])
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterate over the edges as `(start, end)` pairs, closing the loop
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point_in_polygon(point, &self.vertices)
    }

    pub fn area(&self) -> f32 {
        polygon_area(&self.vertices)
    }

    /// Axis-aligned bounds as `(min, max)`
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(lo, hi), v| {
            (
                Vec2::new(lo.x.min(v.x), lo.y.min(v.y)),
                Vec2::new(hi.x.max(v.x), hi.y.max(v.y)),
            )
        }))
    }
}

/// Cross product of `(a - o)` and `(b - o)`
#[inline]
pub fn cross(o: Vec2, a: Vec2, b: Vec2) -> f32 {
    (a - o).perp_dot(b - o)
}

/// Unsigned polygon area via the shoelace formula
pub fn polygon_area(vertices: &[Vec2]) -> f32 {
    signed_polygon_area(vertices).abs()
}

/// Signed shoelace area (positive for counter-clockwise loops)
pub fn signed_polygon_area(vertices: &[Vec2]) -> f32 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f32 = (0..n)
        .map(|i| {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice * 0.5
}

/// Whether `point` lies on segment `a`-`b` within [`GEOMETRY_EPSILON`]
pub fn point_on_segment(point: Vec2, a: Vec2, b: Vec2) -> bool {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return point.distance_squared(a) <= GEOMETRY_EPSILON * GEOMETRY_EPSILON;
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    let closest = a + ab * t;
    point.distance_squared(closest) <= GEOMETRY_EPSILON * GEOMETRY_EPSILON
}

/// Even-odd point-in-polygon test. Points on the boundary count as inside.
pub fn point_in_polygon(point: Vec2, vertices: &[Vec2]) -> bool {
    let n = vertices.len();
    if n < 3 || !point.is_finite() {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = vertices[i];
        let vj = vertices[j];

        if point_on_segment(point, vj, vi) {
            return true;
        }

        if (vi.y > point.y) != (vj.y > point.y) {
            let x_cross = vj.x + (point.y - vj.y) * (vi.x - vj.x) / (vi.y - vj.y);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Whether segments `p1`-`p2` and `q1`-`q2` touch or cross
pub fn segments_intersect(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> bool {
    let d1 = cross(q1, q2, p1);
    let d2 = cross(q1, q2, p2);
    let d3 = cross(p1, p2, q1);
    let d4 = cross(p1, p2, q2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    point_on_segment(p1, q1, q2)
        || point_on_segment(p2, q1, q2)
        || point_on_segment(q1, p1, p2)
        || point_on_segment(q2, p1, p2)
}

/// Whether segment `a`-`b` crosses the polygon boundary or lies inside it
pub fn segment_intersects_polygon(a: Vec2, b: Vec2, polygon: &Polygon) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    polygon.edges().any(|(p, q)| segments_intersect(a, b, p, q)) || polygon.contains(a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Polygon {
        Polygon::rect(Vec2::ZERO, Vec2::new(1.0, 1.0))
    }

    #[test]
    fn test_point_in_polygon_interior_and_exterior() {
        let square = unit_square();
        assert!(square.contains(Vec2::new(0.5, 0.5)));
        assert!(!square.contains(Vec2::new(1.5, 0.5)));
        assert!(!square.contains(Vec2::new(-0.1, -0.1)));
    }

    #[test]
    fn test_point_in_polygon_boundary_is_inside() {
        let square = unit_square();
        assert!(square.contains(Vec2::new(0.0, 0.5)));
        assert!(square.contains(Vec2::new(1.0, 1.0)));
        assert!(square.contains(Vec2::new(0.5, 0.0)));
    }

    #[test]
    fn test_point_in_concave_polygon() {
        // L-shape
        let l = Polygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 2.0),
            Vec2::new(0.0, 2.0),
        ]);
        assert!(l.contains(Vec2::new(0.5, 1.5)));
        assert!(!l.contains(Vec2::new(1.5, 1.5)));
    }

    #[test]
    fn test_nan_point_is_outside() {
        assert!(!unit_square().contains(Vec2::new(f32::NAN, 0.5)));
    }

    #[test]
    fn test_shoelace_area() {
        assert_relative_eq!(unit_square().area(), 1.0);
        let tri = [Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(0.0, 3.0)];
        assert_relative_eq!(polygon_area(&tri), 6.0);
        assert!(signed_polygon_area(&tri) > 0.0);
        assert_eq!(polygon_area(&tri[..2]), 0.0);
    }

    #[test]
    fn test_segments_intersect() {
        assert!(segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(2.0, 0.0),
        ));
        assert!(!segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
        ));
    }

    #[test]
    fn test_segment_through_polygon() {
        let wall = Polygon::rect(Vec2::new(4.0, -1.0), Vec2::new(2.0, 2.0));
        assert!(segment_intersects_polygon(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), &wall));
        assert!(!segment_intersects_polygon(Vec2::new(0.0, 5.0), Vec2::new(10.0, 5.0), &wall));
    }
}
