//! The fixed-step game world
//!
//! [`GameWorld`] owns the physics world, the navigation graph built from the
//! level walls, and every gameplay record. The outer loop feeds it one
//! [`FrameInput`] per frame and polls the resulting flags.
//!
//! Each [`tick`](GameWorld::tick) runs in this order:
//!
//! 1. input signals (reset, debug toggle, exit)
//! 2. player movement, spray and bomb
//! 3. enemy AI, one enemy at a time, against last frame's hidden flag
//! 4. spray/bomb expiry and laser toggling
//! 5. physics step
//! 6. contact resolution

use crate::bomb::throw_bomb;
use crate::config::GameConfig;
use crate::contact::{ContactResolver, ContactScene};
use crate::debug::{DebugDraw, DebugLayer};
use crate::entity::{Enemy, EntitySnapshot, Expiring, Player};
use crate::error::Result;
use crate::goals::GoalBoard;
use crate::input::FrameInput;
use crate::laser::Laser;
use crate::level::{LevelDesc, TileDesc};
use crate::mover::drive;
use crate::spray::cast_spray;
use chroma_ai::{AiContext, NavConfig, NavGraph, WorldBounds};
use chroma_math::Vec2;
use chroma_physics::{
    BodyDesc, ColliderDesc, ColliderShape, EntityKind, EntityTag, PhysicsMaterial, PhysicsWorld,
};
use std::collections::HashSet;

pub struct GameWorld {
    level: LevelDesc,
    config: GameConfig,

    physics: PhysicsWorld,
    nav: NavGraph,
    bounds: WorldBounds,
    resolver: ContactResolver,
    goals: GoalBoard,

    player: Player,
    enemies: Vec<Enemy>,
    lasers: Vec<Laser>,
    active_lasers: HashSet<EntityTag>,
    cameras: HashSet<EntityTag>,
    expiring: Vec<Expiring>,

    /// Hidden flag from the last contact resolution, read by enemy AI
    player_hidden: bool,
    debug_enabled: bool,
    exit_requested: bool,
    frame: u64,
    next_id: u64,
}

impl GameWorld {
    /// Build every level entity, then the navigation graph
    pub fn from_level(level: &LevelDesc, config: GameConfig) -> Result<Self> {
        level.validate()?;
        config.validate()?;

        let mut physics = PhysicsWorld::try_new(config.physics.clone())?;
        let mut next_id = 1u64;
        let mut alloc = |kind: EntityKind| {
            let tag = EntityTag::new(kind, next_id);
            next_id += 1;
            tag
        };

        for wall in &level.walls {
            physics.spawn(
                alloc(EntityKind::Wall),
                BodyDesc::fixed(),
                ColliderDesc::new(ColliderShape::polygon(wall.vertices.clone()))
                    .with_material(PhysicsMaterial::wall()),
            )?;
        }

        for grate in &level.grates {
            spawn_tile(&mut physics, alloc(EntityKind::Grate), grate)?;
        }

        let mut goals = GoalBoard::new();
        for goal in &level.goals {
            let tag = alloc(EntityKind::Goal);
            spawn_tile(
                &mut physics,
                tag,
                &TileDesc {
                    position: goal.position,
                    size: goal.size,
                },
            )?;
            goals.add(tag, goal.pigment);
        }

        if let Some(door) = &level.door {
            spawn_tile(&mut physics, alloc(EntityKind::Door), door)?;
        }

        let mut lasers = Vec::with_capacity(level.lasers.len());
        let mut active_lasers = HashSet::new();
        for desc in &level.lasers {
            let laser = Laser::new(alloc(EntityKind::Laser), desc);
            laser.spawn(&mut physics)?;
            if laser.is_active() {
                active_lasers.insert(laser.tag);
            }
            lasers.push(laser);
        }

        let player = Player::new(alloc(EntityKind::Player), level.player);
        player.spawn_body(&mut physics)?;

        let mut enemies = Vec::with_capacity(level.enemies.len());
        let mut cameras = HashSet::new();
        for (i, spawn) in level.enemies.iter().enumerate() {
            let seed = config.seed.wrapping_add(i as u64);
            let enemy = Enemy::new(alloc(EntityKind::Enemy), spawn, config.enemy, seed);
            enemy.spawn_body(&mut physics, spawn)?;
            if !enemy.is_mobile() {
                cameras.insert(enemy.tag);
            }
            enemies.push(enemy);
        }

        physics.sync_query_pipeline();

        let nav_config = NavConfig::new(config.grid_size, level.width, level.height)
            .with_neighbor_factor(config.neighbor_factor);
        let nav = NavGraph::build(&nav_config, &level.walls, &physics);

        log::info!(
            "Built level '{}': {} bodies, {} nav nodes, {} nav edges, {} enemies",
            level.name,
            physics.body_count(),
            nav.len(),
            nav.edge_count(),
            enemies.len()
        );

        Ok(Self {
            level: level.clone(),
            config,
            physics,
            nav,
            bounds: WorldBounds::new(level.width, level.height),
            resolver: ContactResolver::new(),
            goals,
            player,
            enemies,
            lasers,
            active_lasers,
            cameras,
            expiring: Vec::new(),
            player_hidden: false,
            debug_enabled: false,
            exit_requested: false,
            frame: 0,
            next_id,
        })
    }

    /// Advance one frame
    pub fn tick(&mut self, input: &FrameInput, dt: f32) {
        if input.reset {
            self.reset();
            return;
        }
        if input.toggle_debug {
            self.debug_enabled = !self.debug_enabled;
            log::debug!("Debug drawing {}", if self.debug_enabled { "on" } else { "off" });
        }
        if input.exit {
            self.exit_requested = true;
        }

        self.update_player(input, dt);
        self.update_enemies(dt);
        self.update_timers(dt);

        self.physics.step(dt);

        let events = self.physics.drain_contact_events();
        let mut scene = ContactScene {
            goals: &mut self.goals,
            active_lasers: &self.active_lasers,
            cameras: &self.cameras,
        };
        let was_won = self.resolver.flags().won;
        self.resolver.resolve(&events, &mut scene);
        if !was_won && self.resolver.flags().won {
            log::info!("Level '{}' won on frame {}", self.level.name, self.frame);
        }

        self.player_hidden = self.resolver.is_hidden(self.player.tag);
        self.frame += 1;
    }

    fn alloc(&mut self, kind: EntityKind) -> EntityTag {
        let tag = EntityTag::new(kind, self.next_id);
        self.next_id += 1;
        tag
    }

    fn update_player(&mut self, input: &FrameInput, dt: f32) {
        let tag = self.player.tag;
        self.player.spray_cooldown.tick(dt);
        self.player.bomb_cooldown.tick(dt);

        if let Err(err) = drive(&mut self.physics, tag, input.movement(), &self.player.mover()) {
            log::debug!("Player movement skipped: {}", err);
            return;
        }

        let Ok(position) = self.physics.position(tag) else {
            return;
        };
        let aim = input.cursor - position;
        if aim.is_finite() && aim.length_squared() > f32::EPSILON {
            if let Err(err) = self.physics.set_rotation(tag, aim.angle()) {
                log::debug!("Player rotation skipped: {}", err);
            }
        }

        if input.fire && self.player.spray_cooldown.ready() {
            let spray = self.alloc(EntityKind::Spray);
            let config = self.config.spray;
            if cast_spray(&mut self.physics, spray, position, aim, &config) {
                self.expiring.push(Expiring::new(spray, config.lifetime));
                self.player.spray_cooldown.start(self.player.spawn.shot_cooldown);
            }
        }

        if input.secondary && self.player.bomb_cooldown.ready() {
            let bomb = self.alloc(EntityKind::Bomb);
            let config = self.config.bomb;
            match throw_bomb(&mut self.physics, bomb, position, input.cursor, &config) {
                Ok(()) => {
                    self.expiring.push(Expiring::new(bomb, config.lifetime));
                    self.player.bomb_cooldown.start(config.cooldown);
                }
                Err(err) => log::debug!("Discarding bomb {}: {}", bomb, err),
            }
        }
    }

    fn update_enemies(&mut self, dt: f32) {
        let Ok(player_position) = self.physics.position(self.player.tag) else {
            return;
        };

        for enemy in &mut self.enemies {
            let Ok(position) = self.physics.position(enemy.tag) else {
                continue;
            };
            let ctx = AiContext {
                graph: &self.nav,
                sight: &self.physics,
                player_position,
                player_hidden: self.player_hidden,
                dt,
                bounds: self.bounds,
            };
            let steering = enemy.controller.update(position, &ctx);

            if enemy.is_mobile() {
                if let Err(err) = drive(&mut self.physics, enemy.tag, steering.linear, &enemy.mover()) {
                    log::debug!("Enemy '{}' movement skipped: {}", enemy.name, err);
                    continue;
                }
                // Face the way the controller is steering
                let heading = steering.linear;
                if heading.is_finite() && heading.length_squared() > f32::EPSILON {
                    if let Err(err) = self.physics.set_rotation(enemy.tag, heading.angle()) {
                        log::debug!("Enemy '{}' rotation skipped: {}", enemy.name, err);
                    }
                }
            }
        }
    }

    fn update_timers(&mut self, dt: f32) {
        let physics = &mut self.physics;
        self.expiring.retain_mut(|item| {
            if item.tick(dt) {
                physics.mark_removed(item.tag);
                false
            } else {
                true
            }
        });

        for laser in &mut self.lasers {
            if laser.update(dt) {
                if laser.is_active() {
                    self.active_lasers.insert(laser.tag);
                } else {
                    self.active_lasers.remove(&laser.tag);
                }
            }
        }
    }

    /// Rebuild the level from its description
    pub fn reset(&mut self) {
        match Self::from_level(&self.level, self.config.clone()) {
            Ok(mut world) => {
                world.debug_enabled = self.debug_enabled;
                *self = world;
                log::info!("Level '{}' reset", self.level.name);
            }
            Err(err) => log::error!("Failed to reset level '{}': {}", self.level.name, err),
        }
    }

    // ==================== Outer-loop flags ====================

    pub fn won(&self) -> bool {
        self.resolver.flags().won
    }

    pub fn player_collided_with_enemy(&self) -> bool {
        self.resolver.flags().player_collided_with_enemy
    }

    pub fn hit_by_laser(&self) -> bool {
        self.resolver.flags().hit_by_laser
    }

    pub fn clear_won(&mut self) {
        self.resolver.clear_won();
    }

    pub fn clear_enemy_collision(&mut self) {
        self.resolver.clear_enemy_collision();
    }

    pub fn clear_laser_hit(&mut self) {
        self.resolver.clear_laser_hit();
    }

    pub fn should_exit(&self) -> bool {
        self.exit_requested
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug_enabled
    }

    pub fn is_player_hidden(&self) -> bool {
        self.player_hidden
    }

    // ==================== Inspection ====================

    /// Position and orientation of every entity with a body, ordered by tag
    pub fn snapshots(&self) -> Vec<EntitySnapshot> {
        let mut tags: Vec<EntityTag> = self.physics.entities().collect();
        tags.sort();
        tags.into_iter()
            .filter_map(|tag| {
                Some(EntitySnapshot {
                    tag,
                    position: self.physics.position(tag).ok()?,
                    rotation: self.physics.rotation(tag).ok()?,
                })
            })
            .collect()
    }

    /// Report navigation edges, enemy paths and enemy goals
    pub fn debug_draw(&self, draw: &mut dyn DebugDraw) {
        for (a, b) in self.nav.edges() {
            draw.line(a, b, DebugLayer::NavEdge);
        }
        for enemy in &self.enemies {
            draw.polyline(enemy.controller.last_path(), DebugLayer::Path);
            if let Some(goal) = enemy.controller.current_goal() {
                draw.point(goal, DebugLayer::Goal);
            }
        }
    }

    pub fn player_tag(&self) -> EntityTag {
        self.player.tag
    }

    pub fn player_position(&self) -> Option<Vec2> {
        self.physics.position(self.player.tag).ok()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemy(&self, name: &str) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.name == name)
    }

    pub fn goals(&self) -> &GoalBoard {
        &self.goals
    }

    pub fn nav_graph(&self) -> &NavGraph {
        &self.nav
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.physics
    }

    pub fn resolver(&self) -> &ContactResolver {
        &self.resolver
    }

    pub fn level(&self) -> &LevelDesc {
        &self.level
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Sprays and bombs still alive
    pub fn expiring(&self) -> &[Expiring] {
        &self.expiring
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

fn spawn_tile(physics: &mut PhysicsWorld, tag: EntityTag, tile: &TileDesc) -> chroma_physics::Result<()> {
    physics.spawn(
        tag,
        BodyDesc::fixed().with_position(tile.position),
        ColliderDesc::sensor(ColliderShape::cuboid(tile.size.x * 0.5, tile.size.y * 0.5)),
    )
}

impl std::fmt::Debug for GameWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameWorld")
            .field("level", &self.level.name)
            .field("frame", &self.frame)
            .field("bodies", &self.physics.body_count())
            .field("enemies", &self.enemies.len())
            .field("player_hidden", &self.player_hidden)
            .finish()
    }
}
