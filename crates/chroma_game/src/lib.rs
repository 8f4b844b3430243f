//! Chroma Game - World State and Game Loop
//!
//! Ties physics, navigation and enemy AI into a single fixed-step world.
//!
//! # Features
//!
//! - Level building from a JSON [`LevelDesc`]
//! - Contact resolution through a `(kind, kind)` handler table
//! - Sensor-count hiding in sprays and bomb clouds
//! - Goal groups and the door that ends the level
//! - Spray casting, bomb throwing and blinking lasers
//! - TOML [`GameConfig`] with environment overrides
//!
//! # Example
//!
//! ```ignore
//! use chroma_game::prelude::*;
//!
//! let level = LevelDesc::load("assets/levels/courtyard.json")?;
//! let mut world = GameWorld::from_level(&level, GameConfig::load("assets/config.toml")?)?;
//!
//! loop {
//!     world.tick(&FrameInput::moving(1.0, 0.0), 1.0 / 60.0);
//!     if world.player_collided_with_enemy() {
//!         world.clear_enemy_collision();
//!         world.reset();
//!     }
//!     if world.won() || world.should_exit() {
//!         break;
//!     }
//! }
//! ```

pub mod bomb;
pub mod config;
pub mod contact;
pub mod debug;
pub mod entity;
pub mod error;
pub mod goals;
pub mod input;
pub mod laser;
pub mod level;
pub mod mover;
pub mod spray;
pub mod world;

pub mod prelude {
    pub use crate::bomb::{throw_bomb, BombConfig};
    pub use crate::config::GameConfig;
    pub use crate::contact::{ContactCounters, ContactFlags, ContactResolver, ContactScene};
    pub use crate::debug::{DebugDraw, DebugLayer, DebugLines};
    pub use crate::entity::{Enemy, EntitySnapshot, Expiring, Player};
    pub use crate::error::GameError;
    pub use crate::goals::{Goal, GoalBoard, Pigment, SATISFACTION_THRESHOLD};
    pub use crate::input::FrameInput;
    pub use crate::laser::{Laser, LaserDesc};
    pub use crate::level::{EnemyKind, EnemySpawn, GoalDesc, LevelDesc, PlayerSpawn, TileDesc};
    pub use crate::mover::{drive, MoverParams};
    pub use crate::spray::{build_spray_polygon, cast_spray, SprayConfig};
    pub use crate::world::GameWorld;
    pub use chroma_math::Vec2;
}

pub use error::Result;
pub use prelude::*;
