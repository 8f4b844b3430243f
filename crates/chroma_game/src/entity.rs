//! Player, enemy and short-lived entity records
//!
//! Records hold gameplay state only. Position, velocity and shape live in
//! the physics world and are looked up by tag.

use crate::level::{EnemyKind, EnemySpawn, PlayerSpawn};
use crate::mover::MoverParams;
use chroma_ai::{EnemyConfig, EnemyController};
use chroma_math::Vec2;
use chroma_physics::{
    BodyDesc, ColliderDesc, ColliderShape, EntityTag, PhysicsMaterial, PhysicsWorld, Result,
};
use serde::Serialize;

/// Position and orientation of one entity, for a frontend to draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntitySnapshot {
    pub tag: EntityTag,
    pub position: Vec2,
    pub rotation: f32,
}

/// Counts down to zero
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cooldown {
    remaining: f32,
}

impl Cooldown {
    pub fn ready(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn start(&mut self, seconds: f32) {
        self.remaining = seconds.max(0.0);
    }

    pub fn tick(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.remaining = (self.remaining - dt).max(0.0);
        }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub tag: EntityTag,
    pub spawn: PlayerSpawn,
    pub spray_cooldown: Cooldown,
    pub bomb_cooldown: Cooldown,
}

impl Player {
    pub fn new(tag: EntityTag, spawn: PlayerSpawn) -> Self {
        Self {
            tag,
            spawn,
            spray_cooldown: Cooldown::default(),
            bomb_cooldown: Cooldown::default(),
        }
    }

    pub fn mover(&self) -> MoverParams {
        MoverParams::new(self.spawn.force, self.spawn.max_speed)
    }

    pub(crate) fn spawn_body(&self, physics: &mut PhysicsWorld) -> Result<()> {
        physics.spawn(
            self.tag,
            BodyDesc::character()
                .with_position(self.spawn.position)
                .with_linear_damping(self.spawn.damping),
            ColliderDesc::new(ColliderShape::circle(self.spawn.radius))
                .with_material(PhysicsMaterial::character()),
        )
    }
}

pub struct Enemy {
    pub tag: EntityTag,
    pub name: String,
    pub kind: EnemyKind,
    pub controller: EnemyController,
    mover: MoverParams,
}

impl Enemy {
    pub fn new(tag: EntityTag, spawn: &EnemySpawn, config: EnemyConfig, seed: u64) -> Self {
        Self {
            tag,
            name: spawn.name.clone(),
            kind: spawn.kind,
            controller: EnemyController::new(config, seed),
            mover: MoverParams::new(spawn.force, spawn.max_speed),
        }
    }

    pub fn mover(&self) -> MoverParams {
        self.mover
    }

    /// Cameras are pinned in place; guards walk
    pub fn is_mobile(&self) -> bool {
        self.kind == EnemyKind::Guard
    }

    pub(crate) fn spawn_body(&self, physics: &mut PhysicsWorld, spawn: &EnemySpawn) -> Result<()> {
        let body = match spawn.kind {
            EnemyKind::Guard => BodyDesc::character().with_linear_damping(spawn.damping),
            EnemyKind::Camera => BodyDesc::fixed(),
        };
        physics.spawn(
            self.tag,
            body.with_position(spawn.position),
            ColliderDesc::new(ColliderShape::circle(spawn.radius))
                .with_material(PhysicsMaterial::character()),
        )
    }
}

impl std::fmt::Debug for Enemy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enemy")
            .field("tag", &self.tag)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("state", &self.controller.state())
            .finish()
    }
}

/// A spray or bomb that is removed when its lifetime runs out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Expiring {
    pub tag: EntityTag,
    pub remaining: f32,
}

impl Expiring {
    pub fn new(tag: EntityTag, lifetime: f32) -> Self {
        Self {
            tag,
            remaining: lifetime,
        }
    }

    /// Count down; returns true once expired
    pub fn tick(&mut self, dt: f32) -> bool {
        if dt.is_finite() && dt > 0.0 {
            self.remaining -= dt;
        }
        self.remaining <= 0.0
    }
}
