//! Chroma AI - Navigation and Enemy Behavior
//!
//! This crate provides the enemy side of the stealth simulation.
//!
//! # Features
//!
//! - Grid navigation graph pruned against level walls
//! - A* pathfinding over the graph
//! - Range-based detection with optional widening
//! - Wander/chase state machine driving a movement input
//!
//! # Example
//!
//! ```ignore
//! use chroma_ai::prelude::*;
//!
//! let graph = NavGraph::build(&NavConfig::new(32.0, 640.0, 480.0), &walls, &physics);
//! let mut enemy = EnemyController::new(EnemyConfig::default(), 7);
//!
//! let ctx = AiContext {
//!     graph: &graph,
//!     sight: &physics,
//!     player_position,
//!     player_hidden: false,
//!     dt: 1.0 / 60.0,
//!     bounds: WorldBounds::new(640.0, 480.0),
//! };
//! let steering = enemy.update(enemy_position, &ctx);
//! ```

pub mod controller;
pub mod navigation;
pub mod pathfinding;
pub mod perception;
pub mod sight;
pub mod state_machine;
pub mod steering;

pub mod prelude {
    pub use crate::controller::{AiContext, EnemyConfig, EnemyController, WanderTarget, WorldBounds};
    pub use crate::navigation::{NavConfig, NavEdge, NavGraph, NavNode};
    pub use crate::pathfinding::{find_path, find_route, Route};
    pub use crate::perception::DetectionRange;
    pub use crate::sight::{LineOfSight, OpenSight, PolygonSight};
    pub use crate::state_machine::{AiState, State, StateMachine};
    pub use crate::steering::SteeringOutput;
}

pub use prelude::*;
