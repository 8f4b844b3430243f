//! Physics world - main simulation container

use crate::body::BodyDesc;
use crate::collider::ColliderDesc;
use crate::config::PhysicsConfig;
use crate::convert;
use crate::error::{PhysicsError, Result};
use crate::events::{ChannelEventCollector, ContactEvent, ContactPhase};
use crate::hooks::PassThroughHooks;
use crate::layers::EntityTag;
use crate::query::{PhysicsQuery, RayFan, RayResponse, RaycastHit};
use chroma_math::Vec2;
use rapier2d::prelude as rapier;
use std::collections::HashMap;
use std::num::NonZeroUsize;

/// A body waiting to be inserted at the start of the next step
struct PendingSpawn {
    tag: EntityTag,
    body: rapier::RigidBodyBuilder,
    collider: rapier::ColliderBuilder,
}

/// Tag of a collider that is gone but may still appear in contact events
#[derive(Clone, Copy)]
struct Tombstone {
    tag: EntityTag,
    sensor: bool,
}

/// The main physics world containing all simulation state
pub struct PhysicsWorld {
    config: PhysicsConfig,

    pipeline: rapier::PhysicsPipeline,
    gravity: rapier::Vector<f32>,
    integration_params: rapier::IntegrationParameters,
    islands: rapier::IslandManager,
    broad_phase: rapier::DefaultBroadPhase,
    narrow_phase: rapier::NarrowPhase,
    impulse_joints: rapier::ImpulseJointSet,
    multibody_joints: rapier::MultibodyJointSet,
    ccd_solver: rapier::CCDSolver,
    query_pipeline: rapier::QueryPipeline,
    bodies: rapier::RigidBodySet,
    colliders: rapier::ColliderSet,
    hooks: PassThroughHooks,

    /// Contact events from the last `step`
    events: Vec<ContactEvent>,

    entity_to_body: HashMap<EntityTag, rapier::RigidBodyHandle>,
    entity_to_collider: HashMap<EntityTag, Vec<rapier::ColliderHandle>>,

    pending: Vec<PendingSpawn>,
    removal_queue: Vec<EntityTag>,

    /// Colliders removed since the last simulated substep. Rapier reports
    /// their Stopped events on the following step, after the collider is gone.
    graveyard: HashMap<rapier::ColliderHandle, Tombstone>,

    /// Accumulated time for fixed timestep
    accumulated_time: f32,
}

impl PhysicsWorld {
    /// Create a new physics world
    pub fn new(config: PhysicsConfig) -> Self {
        let gravity = rapier::Vector::new(config.gravity[0], config.gravity[1]);

        let mut integration_params = rapier::IntegrationParameters::default();
        integration_params.dt = config.timestep;
        integration_params.num_solver_iterations =
            NonZeroUsize::new(config.velocity_iterations).unwrap_or(NonZeroUsize::MIN);
        integration_params.num_internal_pgs_iterations = config.position_iterations.max(1);

        Self {
            config,
            pipeline: rapier::PhysicsPipeline::new(),
            gravity,
            integration_params,
            islands: rapier::IslandManager::new(),
            broad_phase: rapier::DefaultBroadPhase::new(),
            narrow_phase: rapier::NarrowPhase::new(),
            impulse_joints: rapier::ImpulseJointSet::new(),
            multibody_joints: rapier::MultibodyJointSet::new(),
            ccd_solver: rapier::CCDSolver::new(),
            query_pipeline: rapier::QueryPipeline::new(),
            bodies: rapier::RigidBodySet::new(),
            colliders: rapier::ColliderSet::new(),
            hooks: PassThroughHooks::default(),
            events: Vec::new(),
            entity_to_body: HashMap::new(),
            entity_to_collider: HashMap::new(),
            pending: Vec::new(),
            removal_queue: Vec::new(),
            graveyard: HashMap::new(),
            accumulated_time: 0.0,
        }
    }

    /// Create a world after checking the configuration
    pub fn try_new(config: PhysicsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Replace the contact-pair filter
    pub fn set_hooks(&mut self, hooks: PassThroughHooks) {
        self.hooks = hooks;
    }

    // ==================== Spawning ====================

    fn build(
        &self,
        tag: EntityTag,
        body: &BodyDesc,
        collider: &ColliderDesc,
    ) -> Result<(rapier::RigidBodyBuilder, rapier::ColliderBuilder)> {
        if !body.is_valid() {
            return Err(PhysicsError::ShapeCreationFailed(format!(
                "non-finite body description for {tag}"
            )));
        }
        let user_data = tag.to_user_data();
        let mut body_builder = body.to_rapier_builder(user_data);
        if self.config.ccd_enabled {
            body_builder = body_builder.ccd_enabled(true);
        }
        let collider_builder = collider.to_rapier_builder(user_data)?;
        Ok((body_builder, collider_builder))
    }

    fn insert(&mut self, tag: EntityTag, body: rapier::RigidBodyBuilder, collider: rapier::ColliderBuilder) {
        let body_handle = self.bodies.insert(body);
        let collider_handle = self
            .colliders
            .insert_with_parent(collider, body_handle, &mut self.bodies);
        self.entity_to_body.insert(tag, body_handle);
        self.entity_to_collider.entry(tag).or_default().push(collider_handle);
    }

    /// Insert a body with one collider right away.
    ///
    /// Call [`sync_query_pipeline`](Self::sync_query_pipeline) before querying
    /// if no step runs in between.
    pub fn spawn(&mut self, tag: EntityTag, body: BodyDesc, collider: ColliderDesc) -> Result<()> {
        if self.contains(tag) || self.pending.iter().any(|p| p.tag == tag) {
            return Err(PhysicsError::DuplicateEntity(tag));
        }
        let (body, collider) = self.build(tag, &body, &collider)?;
        self.insert(tag, body, collider);
        Ok(())
    }

    /// Validate and build the body now, insert it at the start of the next step
    pub fn queue_spawn(&mut self, tag: EntityTag, body: BodyDesc, collider: ColliderDesc) -> Result<()> {
        if self.contains(tag) || self.pending.iter().any(|p| p.tag == tag) {
            return Err(PhysicsError::DuplicateEntity(tag));
        }
        let (body, collider) = self.build(tag, &body, &collider)?;
        self.pending.push(PendingSpawn { tag, body, collider });
        Ok(())
    }

    /// Attach another collider to an existing entity's body
    pub fn attach_collider(&mut self, tag: EntityTag, collider: ColliderDesc) -> Result<()> {
        let body = self.body_handle(tag)?;
        let builder = collider.to_rapier_builder(tag.to_user_data())?;
        let handle = self.colliders.insert_with_parent(builder, body, &mut self.bodies);
        self.entity_to_collider.entry(tag).or_default().push(handle);
        Ok(())
    }

    fn flush_pending(&mut self) {
        for PendingSpawn { tag, body, collider } in std::mem::take(&mut self.pending) {
            self.insert(tag, body, collider);
        }
    }

    /// Remove this entity after the current (or next) step
    pub fn mark_removed(&mut self, tag: EntityTag) {
        if !self.removal_queue.contains(&tag) {
            self.removal_queue.push(tag);
        }
    }

    /// Whether removal of this entity is pending
    pub fn is_marked_removed(&self, tag: EntityTag) -> bool {
        self.removal_queue.contains(&tag)
    }

    /// Remove all physics objects for an entity immediately
    pub fn remove_entity(&mut self, tag: EntityTag) {
        self.pending.retain(|p| p.tag != tag);

        // Remove colliders first
        if let Some(colliders) = self.entity_to_collider.remove(&tag) {
            for handle in colliders {
                if let Some(collider) = self.colliders.remove(handle, &mut self.islands, &mut self.bodies, false) {
                    self.graveyard.insert(
                        handle,
                        Tombstone {
                            tag,
                            sensor: collider.is_sensor(),
                        },
                    );
                }
            }
        }

        if let Some(handle) = self.entity_to_body.remove(&tag) {
            self.bodies.remove(
                handle,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            );
        }
    }

    /// Drop every body, collider and pending spawn
    pub fn clear(&mut self) {
        let tags: Vec<EntityTag> = self.entity_to_body.keys().copied().collect();
        for tag in tags {
            self.remove_entity(tag);
        }
        self.pending.clear();
        self.removal_queue.clear();
        self.events.clear();
        self.accumulated_time = 0.0;
        self.query_pipeline.update(&self.colliders);
    }

    // ==================== Simulation ====================

    /// Advance the simulation by `delta_time`.
    ///
    /// Pending spawns are inserted first, then fixed substeps run while the
    /// accumulator allows. Entities marked removed are dropped afterwards and
    /// the query pipeline is refreshed.
    pub fn step(&mut self, delta_time: f32) {
        self.events.clear();
        self.flush_pending();

        if delta_time.is_finite() && delta_time > 0.0 {
            self.accumulated_time += delta_time;
        }

        let mut steps = 0;
        while self.accumulated_time >= self.config.timestep && steps < self.config.max_substeps {
            self.step_internal();
            self.accumulated_time -= self.config.timestep;
            steps += 1;
        }

        // Do not let a long stall turn into a burst of catch-up steps
        if steps == self.config.max_substeps {
            self.accumulated_time = self.accumulated_time.min(self.config.timestep);
        }

        if steps > 0 {
            self.graveyard.clear();
        }

        for tag in std::mem::take(&mut self.removal_queue) {
            self.remove_entity(tag);
        }

        self.query_pipeline.update(&self.colliders);
    }

    /// Manually sync the query pipeline with current colliders.
    /// Call this after spawning if you need to query before the first step().
    pub fn sync_query_pipeline(&mut self) {
        self.query_pipeline.update(&self.colliders);
    }

    fn step_internal(&mut self) {
        let (event_handler, collision_recv) = ChannelEventCollector::new();

        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &self.hooks,
            &event_handler,
        );

        while let Ok(event) = collision_recv.try_recv() {
            let (h1, h2, phase) = match event {
                rapier::CollisionEvent::Started(h1, h2, _) => (h1, h2, ContactPhase::Begin),
                rapier::CollisionEvent::Stopped(h1, h2, _) => (h1, h2, ContactPhase::End),
            };

            match (self.resolve(h1), self.resolve(h2)) {
                (Some(a), Some(b)) => {
                    log::trace!("contact {:?} {} <-> {}", phase, a.tag, b.tag);
                    self.events.push(ContactEvent {
                        a: a.tag,
                        b: b.tag,
                        phase,
                        sensor: a.sensor || b.sensor,
                    });
                }
                _ => log::trace!("ignoring contact {:?} with an untagged collider", phase),
            }
        }
    }

    /// Tag of a live or recently removed collider
    fn resolve(&self, handle: rapier::ColliderHandle) -> Option<Tombstone> {
        match self.colliders.get(handle) {
            Some(collider) => EntityTag::from_user_data(collider.user_data).map(|tag| Tombstone {
                tag,
                sensor: collider.is_sensor(),
            }),
            None => self.graveyard.get(&handle).copied(),
        }
    }

    // ==================== Events ====================

    /// Contact events produced by the last `step`
    pub fn contact_events(&self) -> &[ContactEvent] {
        &self.events
    }

    /// Take the contact events produced by the last `step`
    pub fn drain_contact_events(&mut self) -> Vec<ContactEvent> {
        std::mem::take(&mut self.events)
    }

    // ==================== Entity access ====================

    pub fn contains(&self, tag: EntityTag) -> bool {
        self.entity_to_body.contains_key(&tag)
    }

    /// Every entity that currently owns a body
    pub fn entities(&self) -> impl Iterator<Item = EntityTag> + '_ {
        self.entity_to_body.keys().copied()
    }

    fn body_handle(&self, tag: EntityTag) -> Result<rapier::RigidBodyHandle> {
        self.entity_to_body
            .get(&tag)
            .copied()
            .ok_or(PhysicsError::EntityNotInPhysics(tag))
    }

    fn body(&self, tag: EntityTag) -> Result<&rapier::RigidBody> {
        let handle = self.body_handle(tag)?;
        self.bodies.get(handle).ok_or(PhysicsError::EntityNotInPhysics(tag))
    }

    fn body_mut(&mut self, tag: EntityTag) -> Result<&mut rapier::RigidBody> {
        let handle = self.body_handle(tag)?;
        self.bodies
            .get_mut(handle)
            .ok_or(PhysicsError::EntityNotInPhysics(tag))
    }

    pub fn position(&self, tag: EntityTag) -> Result<Vec2> {
        self.body(tag).map(|b| convert::from_vector(b.translation()))
    }

    pub fn set_position(&mut self, tag: EntityTag, position: Vec2) -> Result<()> {
        self.body_mut(tag)
            .map(|b| b.set_translation(convert::vector(position), true))
    }

    /// Rotation in radians
    pub fn rotation(&self, tag: EntityTag) -> Result<f32> {
        self.body(tag).map(|b| b.rotation().angle())
    }

    pub fn set_rotation(&mut self, tag: EntityTag, angle: f32) -> Result<()> {
        self.body_mut(tag)
            .map(|b| b.set_rotation(rapier::Rotation::new(angle), true))
    }

    pub fn linear_velocity(&self, tag: EntityTag) -> Result<Vec2> {
        self.body(tag).map(|b| convert::from_vector(b.linvel()))
    }

    pub fn set_linear_velocity(&mut self, tag: EntityTag, velocity: Vec2) -> Result<()> {
        self.body_mut(tag)
            .map(|b| b.set_linvel(convert::vector(velocity), true))
    }

    /// Add a force that persists until [`reset_forces`](Self::reset_forces)
    pub fn apply_force(&mut self, tag: EntityTag, force: Vec2) -> Result<()> {
        self.body_mut(tag)
            .map(|b| b.add_force(convert::vector(force), true))
    }

    pub fn reset_forces(&mut self, tag: EntityTag) -> Result<()> {
        self.body_mut(tag).map(|b| b.reset_forces(true))
    }

    pub fn apply_impulse(&mut self, tag: EntityTag, impulse: Vec2) -> Result<()> {
        self.body_mut(tag)
            .map(|b| b.apply_impulse(convert::vector(impulse), true))
    }

    /// Scale the linear velocity down to `max_speed` if it is faster
    pub fn clamp_speed(&mut self, tag: EntityTag, max_speed: f32) -> Result<()> {
        let body = self.body_mut(tag)?;
        let velocity = convert::from_vector(body.linvel());
        let clamped = velocity.clamp_length(max_speed.max(0.0));
        if clamped != velocity {
            body.set_linvel(convert::vector(clamped), true);
        }
        Ok(())
    }

    // ==================== Queries ====================

    /// Get a query interface for raycasting
    pub fn query(&self) -> PhysicsQuery<'_> {
        PhysicsQuery {
            query_pipeline: &self.query_pipeline,
            colliders: &self.colliders,
            bodies: &self.bodies,
        }
    }

    /// See [`PhysicsQuery::raycast`]
    pub fn raycast<F>(&self, start: Vec2, end: Vec2, classify: F) -> Option<RaycastHit>
    where
        F: FnMut(crate::layers::EntityKind) -> RayResponse,
    {
        self.query().raycast(start, end, classify)
    }

    /// See [`PhysicsQuery::shoot_ray_fan`]
    pub fn shoot_ray_fan(
        &self,
        origin: Vec2,
        aim: Vec2,
        count: usize,
        max_length: f32,
        fan: &RayFan,
    ) -> Vec<Option<Vec2>> {
        self.query().shoot_ray_fan(origin, aim, count, max_length, fan)
    }

    // ==================== Debug ====================

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::ColliderShape;
    use crate::layers::EntityKind;
    use crate::query::{vision_filter, wall_filter};
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    fn wall(world: &mut PhysicsWorld, id: u64, center: Vec2, half: Vec2) -> EntityTag {
        let tag = EntityTag::new(EntityKind::Wall, id);
        world
            .spawn(
                tag,
                BodyDesc::fixed().with_position(center),
                ColliderDesc::new(ColliderShape::cuboid(half.x, half.y)),
            )
            .unwrap();
        tag
    }

    fn sensor(world: &mut PhysicsWorld, kind: EntityKind, id: u64, center: Vec2, half: f32) -> EntityTag {
        let tag = EntityTag::new(kind, id);
        world
            .spawn(
                tag,
                BodyDesc::fixed().with_position(center),
                ColliderDesc::sensor(ColliderShape::cuboid(half, half)),
            )
            .unwrap();
        tag
    }

    fn player(world: &mut PhysicsWorld, position: Vec2) -> EntityTag {
        let tag = EntityTag::new(EntityKind::Player, 0);
        world
            .spawn(
                tag,
                BodyDesc::character().with_position(position),
                ColliderDesc::new(ColliderShape::circle(0.5)),
            )
            .unwrap();
        tag
    }

    #[test]
    fn test_create_world() {
        let world = PhysicsWorld::default();
        assert_eq!(world.body_count(), 0);
        assert_eq!(world.collider_count(), 0);
    }

    #[test]
    fn test_duplicate_spawn_rejected() {
        let mut world = PhysicsWorld::default();
        let tag = wall(&mut world, 1, Vec2::ZERO, Vec2::ONE);
        let again = world.spawn(
            tag,
            BodyDesc::fixed(),
            ColliderDesc::new(ColliderShape::cuboid(1.0, 1.0)),
        );
        assert!(matches!(again, Err(PhysicsError::DuplicateEntity(_))));
    }

    #[test]
    fn test_no_gravity_by_default() {
        let mut world = PhysicsWorld::default();
        let tag = player(&mut world, Vec2::new(0.0, 10.0));
        for _ in 0..30 {
            world.step(DT);
        }
        let pos = world.position(tag).unwrap();
        assert_relative_eq!(pos.y, 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_force_moves_body_and_clamp_speed() {
        let mut world = PhysicsWorld::default();
        let tag = player(&mut world, Vec2::ZERO);
        world.apply_force(tag, Vec2::new(500.0, 0.0)).unwrap();
        for _ in 0..30 {
            world.step(DT);
            world.clamp_speed(tag, 3.0).unwrap();
        }
        assert!(world.position(tag).unwrap().x > 0.5);
        assert!(world.linear_velocity(tag).unwrap().length() <= 3.0 + 1e-4);
    }

    #[test]
    fn test_raycast_hits_wall() {
        let mut world = PhysicsWorld::default();
        let tag = wall(&mut world, 1, Vec2::new(5.0, 0.0), Vec2::new(1.0, 1.0));
        world.sync_query_pipeline();

        let hit = world
            .raycast(Vec2::ZERO, Vec2::new(10.0, 0.0), vision_filter)
            .expect("wall in the way");
        assert_eq!(hit.tag, Some(tag));
        assert_relative_eq!(hit.point.x, 4.0, epsilon = 1e-3);
        assert_relative_eq!(hit.fraction, 0.4, epsilon = 1e-3);
        assert_relative_eq!(hit.distance, 4.0, epsilon = 1e-3);
    }

    #[test]
    fn test_raycast_passes_spray_and_stops_at_wall() {
        let mut world = PhysicsWorld::default();
        sensor(&mut world, EntityKind::Spray, 1, Vec2::new(2.0, 0.0), 0.5);
        let wall_tag = wall(&mut world, 2, Vec2::new(6.0, 0.0), Vec2::new(1.0, 1.0));
        world.sync_query_pipeline();

        let hit = world.raycast(Vec2::ZERO, Vec2::new(10.0, 0.0), vision_filter).unwrap();
        assert_eq!(hit.tag, Some(wall_tag));

        let blocked_by_spray = world
            .raycast(Vec2::ZERO, Vec2::new(10.0, 0.0), |_| RayResponse::Block)
            .unwrap();
        assert_eq!(blocked_by_spray.tag.map(|t| t.kind), Some(EntityKind::Spray));
    }

    #[test]
    fn test_raycast_malformed_input() {
        let mut world = PhysicsWorld::default();
        wall(&mut world, 1, Vec2::ZERO, Vec2::new(5.0, 5.0));
        world.sync_query_pipeline();

        let nan = Vec2::new(f32::NAN, 0.0);
        assert!(world.raycast(nan, Vec2::ONE, vision_filter).is_none());
        assert!(world.raycast(Vec2::ONE, Vec2::new(f32::INFINITY, 0.0), vision_filter).is_none());
        assert!(world.raycast(Vec2::ONE, Vec2::ONE, vision_filter).is_none());
    }

    #[test]
    fn test_ray_fan_stops_at_walls() {
        let mut world = PhysicsWorld::default();
        wall(&mut world, 1, Vec2::new(5.0, 0.0), Vec2::new(0.5, 20.0));
        world.sync_query_pipeline();

        let fan = RayFan::default();
        let ends = world.shoot_ray_fan(Vec2::ZERO, Vec2::X, 5, 10.0, &fan);
        assert_eq!(ends.len(), 5);
        assert!(ends.iter().all(|e| e.is_some()));

        // Center ray would reach 12 units but stops at the wall face
        let center = ends[2].unwrap();
        assert_relative_eq!(center.x, 4.5, epsilon = 1e-3);
        assert_relative_eq!(center.y, 0.0, epsilon = 1e-3);

        // Edge rays are short enough to end before the wall
        let edge = ends[0].unwrap();
        assert_relative_eq!(edge.length(), 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_ray_fan_invalid_input() {
        let world = PhysicsWorld::default();
        let fan = RayFan::default();
        let ends = world.shoot_ray_fan(Vec2::ZERO, Vec2::ZERO, 3, 10.0, &fan);
        assert_eq!(ends, vec![None, None, None]);
        assert!(world.shoot_ray_fan(Vec2::ZERO, Vec2::X, 0, 10.0, &fan).is_empty());
        let ends = world.shoot_ray_fan(Vec2::ZERO, Vec2::X, 2, f32::NAN, &fan);
        assert!(ends.iter().all(|e| e.is_none()));
    }

    #[test]
    fn test_queue_spawn_deferred_until_step() {
        let mut world = PhysicsWorld::default();
        let tag = EntityTag::new(EntityKind::Spray, 3);
        world
            .queue_spawn(
                tag,
                BodyDesc::fixed(),
                ColliderDesc::sensor(ColliderShape::cuboid(1.0, 1.0)),
            )
            .unwrap();
        assert!(!world.contains(tag));
        assert_eq!(world.pending_count(), 1);

        world.step(DT);
        assert!(world.contains(tag));
        assert_eq!(world.pending_count(), 0);
    }

    #[test]
    fn test_sensor_begin_and_end_events() {
        let mut world = PhysicsWorld::default();
        let spray = sensor(&mut world, EntityKind::Spray, 1, Vec2::ZERO, 2.0);
        let player = player(&mut world, Vec2::ZERO);

        world.step(DT);
        let begins: Vec<_> = world.contact_events().iter().filter(|e| e.is_begin()).collect();
        assert_eq!(begins.len(), 1);
        assert!(begins[0].sensor);
        assert!(begins[0].split(EntityKind::Player).is_some());

        // Removal is deferred; the Stopped event arrives on the next step and
        // still resolves to the removed spray.
        world.mark_removed(spray);
        world.step(DT);
        assert!(!world.contains(spray));

        world.step(DT);
        let ends: Vec<_> = world.contact_events().iter().filter(|e| e.is_end()).collect();
        assert_eq!(ends.len(), 1);
        assert_eq!(ends[0].split(EntityKind::Spray), Some((spray, player)));
    }

    #[test]
    fn test_static_sensor_sees_static_sensor() {
        let mut world = PhysicsWorld::default();
        sensor(&mut world, EntityKind::Goal, 1, Vec2::ZERO, 1.0);
        sensor(&mut world, EntityKind::Spray, 2, Vec2::new(0.5, 0.0), 1.0);

        world.step(DT);
        assert!(world
            .contact_events()
            .iter()
            .any(|e| e.is_begin() && e.split(EntityKind::Goal).is_some()));
    }

    #[test]
    fn test_lookup_missing_entity() {
        let world = PhysicsWorld::default();
        let tag = EntityTag::new(EntityKind::Enemy, 9);
        assert!(matches!(world.position(tag), Err(PhysicsError::EntityNotInPhysics(_))));
    }
}
