//! Physics queries (segment raycasts, ray fans)

use crate::convert;
use crate::layers::{EntityKind, EntityTag};
use chroma_math::{consts, Vec2};
use rapier2d::prelude as rapier;
use serde::{Deserialize, Serialize};

/// How a ray treats a body it touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RayResponse {
    /// Keep going
    Pass,
    /// Stop here and report the hit
    Block,
}

/// Result of a raycast query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// Entity that stopped the ray (`None` for untagged colliders)
    pub tag: Option<EntityTag>,
    /// Hit point in world space
    pub point: Vec2,
    /// Surface normal at hit point
    pub normal: Vec2,
    /// Position along the segment, 0 at the start and 1 at the end
    pub fraction: f32,
    /// Distance from the segment start
    pub distance: f32,
}

/// Sight lines: sprays and bombs are see-through, sensors and characters are
/// ignored, everything else blocks.
pub fn vision_filter(kind: EntityKind) -> RayResponse {
    match kind {
        EntityKind::Spray
        | EntityKind::Bomb
        | EntityKind::Grate
        | EntityKind::Door
        | EntityKind::Laser
        | EntityKind::Goal
        | EntityKind::Player
        | EntityKind::Enemy => RayResponse::Pass,
        EntityKind::Wall | EntityKind::Collision => RayResponse::Block,
    }
}

/// Only level scenery stops the ray
pub fn wall_filter(kind: EntityKind) -> RayResponse {
    if kind.is_solid_scenery() {
        RayResponse::Block
    } else {
        RayResponse::Pass
    }
}

/// Shape of a spray ray fan.
///
/// Rays span `aim ± spread`. A ray at normalized offset `t ∈ [-1, 1]` reaches
/// `max_length * (tail + (center - tail) * cos(t * π/2))`, so the middle ray
/// is the longest and the edges taper off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RayFan {
    /// Half-angle of the fan in radians
    pub spread: f32,
    /// Length multiplier of the center ray
    pub center_scale: f32,
    /// Length multiplier of the outermost rays
    pub tail_scale: f32,
}

impl Default for RayFan {
    fn default() -> Self {
        Self {
            spread: consts::FRAC_PI_3,
            center_scale: 1.2,
            tail_scale: 0.1,
        }
    }
}

impl RayFan {
    /// Normalized offset of ray `index` out of `count`
    pub fn offset(index: usize, count: usize) -> f32 {
        if count <= 1 {
            return 0.0;
        }
        -1.0 + 2.0 * index as f32 / (count - 1) as f32
    }

    /// Length multiplier for a normalized offset
    pub fn length_scale(&self, offset: f32) -> f32 {
        self.tail_scale + (self.center_scale - self.tail_scale) * (offset * consts::FRAC_PI_2).cos()
    }
}

/// Query interface for the physics world
pub struct PhysicsQuery<'a> {
    pub(crate) query_pipeline: &'a rapier::QueryPipeline,
    pub(crate) colliders: &'a rapier::ColliderSet,
    pub(crate) bodies: &'a rapier::RigidBodySet,
}

impl<'a> PhysicsQuery<'a> {
    /// Cast the segment `start..end` and return the first body `classify`
    /// blocks on.
    ///
    /// Intersections are visited nearest first. Untagged colliders always
    /// block. Non-finite endpoints and zero-length segments never hit.
    pub fn raycast<F>(&self, start: Vec2, end: Vec2, mut classify: F) -> Option<RaycastHit>
    where
        F: FnMut(EntityKind) -> RayResponse,
    {
        let delta = end - start;
        if !start.is_finite() || !end.is_finite() || delta.length_squared() <= consts::EPSILON * consts::EPSILON {
            return None;
        }

        let ray = rapier::Ray::new(convert::point(start), convert::vector(delta));
        let mut hits: Vec<(f32, rapier::ColliderHandle, Vec2)> = Vec::new();

        self.query_pipeline.intersections_with_ray(
            self.bodies,
            self.colliders,
            &ray,
            1.0,
            true,
            rapier::QueryFilter::new(),
            |handle, intersection| {
                hits.push((
                    intersection.time_of_impact,
                    handle,
                    convert::from_vector(&intersection.normal),
                ));
                true
            },
        );

        hits.sort_by(|a, b| a.0.total_cmp(&b.0));

        let length = delta.length();
        hits.into_iter().find_map(|(toi, handle, normal)| {
            let tag = self
                .colliders
                .get(handle)
                .and_then(|c| EntityTag::from_user_data(c.user_data));

            let response = match tag {
                Some(tag) => classify(tag.kind),
                None => RayResponse::Block,
            };

            (response == RayResponse::Block).then(|| RaycastHit {
                tag,
                point: convert::from_point(&ray.point_at(toi)),
                normal,
                fraction: toi,
                distance: toi * length,
            })
        })
    }

    /// Whether the segment is free of anything [`vision_filter`] blocks on
    pub fn line_of_sight(&self, start: Vec2, end: Vec2) -> bool {
        if !start.is_finite() || !end.is_finite() {
            return false;
        }
        self.raycast(start, end, vision_filter).is_none()
    }

    /// Cast `count` rays around `aim` and return where each one stops.
    ///
    /// Each ray ends at the first wall it meets or at its tapered length.
    /// Invalid input yields `None` for every ray.
    pub fn shoot_ray_fan(
        &self,
        origin: Vec2,
        aim: Vec2,
        count: usize,
        max_length: f32,
        fan: &RayFan,
    ) -> Vec<Option<Vec2>> {
        let valid = origin.is_finite()
            && aim.is_finite()
            && aim.length_squared() > consts::EPSILON * consts::EPSILON
            && max_length.is_finite()
            && max_length > 0.0;
        if !valid {
            return vec![None; count];
        }

        let base_angle = aim.angle();
        (0..count)
            .map(|i| {
                let offset = RayFan::offset(i, count);
                let direction = Vec2::from_angle(base_angle + offset * fan.spread);
                let end = origin + direction * (max_length * fan.length_scale(offset));
                match self.raycast(origin, end, wall_filter) {
                    Some(hit) => Some(hit.point),
                    None => Some(end),
                }
            })
            .collect()
    }
}
