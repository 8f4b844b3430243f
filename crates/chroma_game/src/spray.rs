//! Spray-shape builder
//!
//! A spray cast shoots a fan of rays from the player and turns the hit points
//! into a static sensor polygon the player can hide in. Degenerate fans are
//! dropped quietly: no entity, no error.

use chroma_math::{cross, polygon_area, Vec2};
use chroma_physics::{BodyDesc, ColliderDesc, ColliderShape, EntityTag, PhysicsWorld, RayFan};
use serde::{Deserialize, Serialize};

/// Spray tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SprayConfig {
    pub ray_count: usize,
    /// Length of the fan's center ray before tapering
    pub max_length: f32,
    /// Seconds before the spray disappears
    pub lifetime: f32,
    /// Smallest polygon area that still produces a spray
    pub min_area: f32,
    pub max_vertices: usize,
    /// How far the origin moves toward the first hit
    pub origin_nudge: f32,
    /// Squared distance under which consecutive vertices merge
    pub duplicate_epsilon: f32,
    /// Cross product magnitude under which a vertex counts as collinear
    pub collinear_epsilon: f32,
    /// Fan spread and length taper
    pub fan: RayFan,
}

impl Default for SprayConfig {
    fn default() -> Self {
        Self {
            ray_count: 12,
            max_length: 96.0,
            lifetime: 6.0,
            min_area: 1.0,
            max_vertices: 15,
            origin_nudge: 0.05,
            duplicate_epsilon: 1e-6,
            collinear_epsilon: 1e-6,
            fan: RayFan::default(),
        }
    }
}

impl SprayConfig {
    pub fn with_rays(mut self, count: usize, max_length: f32) -> Self {
        self.ray_count = count;
        self.max_length = max_length;
        self
    }

    pub fn with_lifetime(mut self, seconds: f32) -> Self {
        self.lifetime = seconds;
        self
    }

    pub fn with_min_area(mut self, area: f32) -> Self {
        self.min_area = area;
        self
    }
}

/// Move `origin` a short distance toward the first ray endpoint so the
/// polygon does not start exactly on the caster's edge
pub fn nudge_origin(origin: Vec2, hits: &[Option<Vec2>], distance: f32) -> Vec2 {
    match hits.iter().flatten().next() {
        Some(&first) => origin + (first - origin).normalize_or_zero() * distance,
        None => origin,
    }
}

/// Drop consecutive near-duplicates, including the last/first pair
fn dedup_cyclic(points: Vec<Vec2>, epsilon: f32) -> Vec<Vec2> {
    let mut out: Vec<Vec2> = Vec::with_capacity(points.len());
    for p in points {
        if out.last().map_or(true, |&last| last.distance_squared(p) > epsilon) {
            out.push(p);
        }
    }
    while out.len() > 1 {
        let (first, last) = (out[0], out[out.len() - 1]);
        if first.distance_squared(last) > epsilon {
            break;
        }
        out.pop();
    }
    out
}

/// Drop vertices lying on the line through their neighbours. Neighbours are
/// taken from the input list, so a run of collinear points keeps its ends.
fn drop_collinear(points: &[Vec2], epsilon: f32) -> Vec<Vec2> {
    let n = points.len();
    (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            cross(prev, points[i], next).abs() > epsilon
        })
        .map(|i| points[i])
        .collect()
}

/// Vertex loop for a spray from `origin` and the fan endpoints, or `None`
/// when the shape is too degenerate to keep
pub fn build_spray_polygon(origin: Vec2, hits: &[Option<Vec2>], config: &SprayConfig) -> Option<Vec<Vec2>> {
    let mut points = Vec::with_capacity(hits.len() + 1);
    points.push(origin);
    points.extend(hits.iter().flatten().copied());
    if points.len() < 3 || points.iter().any(|p| !p.is_finite()) {
        return None;
    }

    let points = dedup_cyclic(points, config.duplicate_epsilon);
    let mut points = drop_collinear(&points, config.collinear_epsilon);
    points.truncate(config.max_vertices);
    if points.len() < 3 {
        return None;
    }

    let area = polygon_area(&points);
    if !(area >= config.min_area) {
        log::debug!("spray area {} below minimum {}", area, config.min_area);
        return None;
    }
    Some(points)
}

/// Cast a spray from `origin` toward `aim` and queue its sensor for the next
/// step. Returns whether a spray was created.
pub fn cast_spray(
    physics: &mut PhysicsWorld,
    tag: EntityTag,
    origin: Vec2,
    aim: Vec2,
    config: &SprayConfig,
) -> bool {
    let hits = physics.shoot_ray_fan(origin, aim, config.ray_count, config.max_length, &config.fan);
    let origin = nudge_origin(origin, &hits, config.origin_nudge);

    let Some(points) = build_spray_polygon(origin, &hits, config) else {
        log::debug!("discarding degenerate spray at {:?}", origin);
        return false;
    };

    // Collider points are relative to the body, which sits at the origin
    let local = points.into_iter().map(|p| p - origin).collect();
    let result = physics.queue_spawn(
        tag,
        BodyDesc::fixed().with_position(origin),
        ColliderDesc::sensor(ColliderShape::polygon(local)),
    );

    match result {
        Ok(()) => true,
        Err(err) => {
            log::debug!("discarding spray {}: {}", tag, err);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chroma_physics::EntityKind;

    fn ring(count: usize, radius: f32) -> Vec<Option<Vec2>> {
        (0..count)
            .map(|i| {
                let angle = -0.8 + 1.6 * i as f32 / (count - 1) as f32;
                Some(Vec2::from_angle(angle) * radius)
            })
            .collect()
    }

    #[test]
    fn test_fan_becomes_polygon() {
        let points = build_spray_polygon(Vec2::ZERO, &ring(8, 10.0), &SprayConfig::default()).unwrap();
        assert_eq!(points.len(), 9);
        assert!(polygon_area(&points) > 1.0);
    }

    #[test]
    fn test_too_few_points() {
        let config = SprayConfig::default();
        assert!(build_spray_polygon(Vec2::ZERO, &[Some(Vec2::X)], &config).is_none());
        assert!(build_spray_polygon(Vec2::ZERO, &[None, None, None], &config).is_none());
    }

    #[test]
    fn test_duplicates_removed_including_wrap_around() {
        let hits = vec![
            Some(Vec2::new(10.0, 0.0)),
            Some(Vec2::new(10.0, 0.0)),
            Some(Vec2::new(10.0, 10.0)),
            Some(Vec2::new(0.0, 10.0)),
            Some(Vec2::new(0.0, 0.0)),
        ];
        let points = build_spray_polygon(Vec2::ZERO, &hits, &SprayConfig::default()).unwrap();
        assert_eq!(
            points,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(10.0, 10.0),
                Vec2::new(0.0, 10.0),
            ]
        );
    }

    #[test]
    fn test_collinear_fan_collapses() {
        // 15 collinear points plus an origin on the same line
        let hits: Vec<_> = (1..=15).map(|i| Some(Vec2::new(i as f32, 0.0))).collect();
        assert!(build_spray_polygon(Vec2::ZERO, &hits, &SprayConfig::default()).is_none());

        // Off-line origin keeps only the two ends of the run
        let points = build_spray_polygon(Vec2::new(0.0, 5.0), &hits, &SprayConfig::default()).unwrap();
        assert!(points.len() <= 15);
        assert_eq!(points.len(), 3);
        for pair in points.windows(2) {
            assert!(pair[0].distance_squared(pair[1]) > 1e-6);
        }
    }

    #[test]
    fn test_vertex_cap() {
        let points = build_spray_polygon(Vec2::ZERO, &ring(30, 20.0), &SprayConfig::default()).unwrap();
        assert_eq!(points.len(), 15);
    }

    #[test]
    fn test_min_area() {
        let hits = ring(6, 0.5);
        assert!(build_spray_polygon(Vec2::ZERO, &hits, &SprayConfig::default()).is_none());
        let config = SprayConfig::default().with_min_area(0.01);
        assert!(build_spray_polygon(Vec2::ZERO, &hits, &config).is_some());
    }

    #[test]
    fn test_nudge_toward_first_hit() {
        let hits = vec![None, Some(Vec2::new(0.0, 10.0)), Some(Vec2::new(10.0, 0.0))];
        let nudged = nudge_origin(Vec2::ZERO, &hits, 0.05);
        assert_eq!(nudged, Vec2::new(0.0, 0.05));
        assert_eq!(nudge_origin(Vec2::ONE, &[None], 0.05), Vec2::ONE);
    }

    #[test]
    fn test_cast_spray_spawns_on_next_step() {
        let mut physics = PhysicsWorld::default();
        let tag = EntityTag::new(EntityKind::Spray, 1);

        assert!(cast_spray(&mut physics, tag, Vec2::ZERO, Vec2::X, &SprayConfig::default()));
        assert!(!physics.contains(tag));
        physics.step(1.0 / 60.0);
        assert!(physics.contains(tag));
    }

    #[test]
    fn test_cast_spray_invalid_aim() {
        let mut physics = PhysicsWorld::default();
        let tag = EntityTag::new(EntityKind::Spray, 1);
        assert!(!cast_spray(&mut physics, tag, Vec2::ZERO, Vec2::ZERO, &SprayConfig::default()));
        physics.step(1.0 / 60.0);
        assert!(!physics.contains(tag));
    }
}
