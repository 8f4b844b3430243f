//! Contact resolution
//!
//! Turns begin/end contact events from the physics step into game semantics:
//! overlap counters that decide whether the player is hidden, goal filling,
//! and the flags the outer loop polls (caught, lasered, won).
//!
//! Handlers are looked up by the pair of entity kinds involved. Each handler
//! is registered once with its kinds in a fixed order and receives the two
//! tags in that same order regardless of how the event reported them.

use crate::goals::GoalBoard;
use chroma_physics::{ContactEvent, ContactPhase, EntityKind, EntityTag};
use std::collections::{HashMap, HashSet};

/// Overlap counters for one player. Never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactCounters {
    pub spray: u32,
    pub bomb: u32,
    /// Grates and doors next to the player
    pub adjacency: u32,
}

impl ContactCounters {
    /// Covered by paint or a bomb cloud, and not standing next to anything
    /// that gives the player away
    pub fn hidden(&self) -> bool {
        self.adjacency == 0 && (self.spray > 0 || self.bomb > 0)
    }
}

fn bump(counter: &mut u32, phase: ContactPhase, name: &str) {
    match phase {
        ContactPhase::Begin => *counter = counter.saturating_add(1),
        ContactPhase::End => {
            if *counter == 0 {
                log::trace!("{} contact ended with no matching begin", name);
            }
            *counter = counter.saturating_sub(1);
        }
    }
}

/// Flags raised by contacts and cleared by the outer loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactFlags {
    pub won: bool,
    pub player_collided_with_enemy: bool,
    pub hit_by_laser: bool,
    /// Player that opened the door
    pub door_player: Option<EntityTag>,
}

/// World state a handler may read or change besides the resolver itself
pub struct ContactScene<'a> {
    pub goals: &'a mut GoalBoard,
    /// Lasers currently switched on
    pub active_lasers: &'a HashSet<EntityTag>,
    /// Enemies that never catch the player by touch
    pub cameras: &'a HashSet<EntityTag>,
}

type Handler = fn(&mut ContactResolver, &mut ContactScene<'_>, EntityTag, EntityTag, ContactPhase);

/// Dispatches contact events through a `(kind, kind)` handler table
pub struct ContactResolver {
    handlers: HashMap<(EntityKind, EntityKind), Handler>,
    counters: HashMap<EntityTag, ContactCounters>,
    flags: ContactFlags,
}

impl Default for ContactResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactResolver {
    pub fn new() -> Self {
        let mut resolver = Self {
            handlers: HashMap::new(),
            counters: HashMap::new(),
            flags: ContactFlags::default(),
        };

        resolver.register(EntityKind::Player, EntityKind::Spray, |r, _, player, _, phase| {
            bump(&mut r.counters_mut(player).spray, phase, "spray");
        });
        resolver.register(EntityKind::Player, EntityKind::Bomb, |r, _, player, _, phase| {
            bump(&mut r.counters_mut(player).bomb, phase, "bomb");
        });
        resolver.register(EntityKind::Player, EntityKind::Grate, |r, _, player, _, phase| {
            bump(&mut r.counters_mut(player).adjacency, phase, "grate");
        });
        resolver.register(EntityKind::Player, EntityKind::Door, on_player_door);
        resolver.register(EntityKind::Player, EntityKind::Enemy, |r, scene, _, enemy, phase| {
            if phase == ContactPhase::Begin && !scene.cameras.contains(&enemy) {
                log::debug!("player touched {}", enemy);
                r.flags.player_collided_with_enemy = true;
            }
        });
        resolver.register(EntityKind::Player, EntityKind::Laser, |r, scene, _, laser, phase| {
            if phase == ContactPhase::Begin && scene.active_lasers.contains(&laser) {
                log::debug!("player hit by {}", laser);
                r.flags.hit_by_laser = true;
            }
        });
        resolver.register(EntityKind::Spray, EntityKind::Goal, fill_goal);
        resolver.register(EntityKind::Bomb, EntityKind::Goal, fill_goal);

        resolver
    }

    /// Install a handler for contacts between `first` and `second`. The
    /// handler receives the tags in that order.
    pub fn register(&mut self, first: EntityKind, second: EntityKind, handler: Handler) {
        self.handlers.insert((first, second), handler);
    }

    /// Whether any handler covers this pair of kinds, in either order
    pub fn handles(&self, a: EntityKind, b: EntityKind) -> bool {
        self.handlers.contains_key(&(a, b)) || self.handlers.contains_key(&(b, a))
    }

    /// Apply every event from one physics step, in order
    pub fn resolve(&mut self, events: &[ContactEvent], scene: &mut ContactScene<'_>) {
        for event in events {
            self.dispatch(event, scene);
        }
    }

    pub fn dispatch(&mut self, event: &ContactEvent, scene: &mut ContactScene<'_>) {
        let (a, b) = (event.a, event.b);
        let found = self
            .handlers
            .get(&(a.kind, b.kind))
            .map(|&h| (h, a, b))
            .or_else(|| self.handlers.get(&(b.kind, a.kind)).map(|&h| (h, b, a)));

        if let Some((handler, first, second)) = found {
            log::trace!("{:?} {} / {}", event.phase, first, second);
            handler(self, scene, first, second, event.phase);
        }
    }

    fn counters_mut(&mut self, player: EntityTag) -> &mut ContactCounters {
        self.counters.entry(player).or_default()
    }

    pub fn counters(&self, player: EntityTag) -> ContactCounters {
        self.counters.get(&player).copied().unwrap_or_default()
    }

    pub fn is_hidden(&self, player: EntityTag) -> bool {
        self.counters(player).hidden()
    }

    pub fn flags(&self) -> &ContactFlags {
        &self.flags
    }

    pub fn clear_enemy_collision(&mut self) {
        self.flags.player_collided_with_enemy = false;
    }

    pub fn clear_laser_hit(&mut self) {
        self.flags.hit_by_laser = false;
    }

    pub fn clear_won(&mut self) {
        self.flags.won = false;
        self.flags.door_player = None;
    }

    /// Forget all counters and flags
    pub fn reset(&mut self) {
        self.counters.clear();
        self.flags = ContactFlags::default();
    }
}

fn on_player_door(
    resolver: &mut ContactResolver,
    scene: &mut ContactScene<'_>,
    player: EntityTag,
    door: EntityTag,
    phase: ContactPhase,
) {
    bump(&mut resolver.counters_mut(player).adjacency, phase, "door");
    if phase == ContactPhase::Begin && scene.goals.all_satisfied() {
        log::info!("{} reached {} with every goal group satisfied", player, door);
        resolver.flags.won = true;
        resolver.flags.door_player = Some(player);
    }
}

fn fill_goal(
    _resolver: &mut ContactResolver,
    scene: &mut ContactScene<'_>,
    _paint: EntityTag,
    goal: EntityTag,
    phase: ContactPhase,
) {
    if phase == ContactPhase::Begin {
        scene.goals.fill(goal);
    }
}
