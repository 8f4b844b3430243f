//! Chroma Physics - Rapier 2D Integration
//!
//! This crate wraps Rapier 2D for the stealth simulation core.
//!
//! # Features
//!
//! - Static, dynamic and sensor bodies tagged with an [`EntityTag`]
//! - Deferred spawning and end-of-step removal
//! - Segment raycasts with per-kind pass/block classification
//! - Tapered ray fans for spray casting
//! - Begin/end contact events resolved to entity tags
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 PhysicsWorld                     │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────┐ │
//! │  │ RigidBodySet│  │ ColliderSet │  │ Queries │ │
//! │  └─────────────┘  └─────────────┘  └─────────┘ │
//! │  ┌─────────────────────────────────────────────┐│
//! │  │  PhysicsPipeline + PassThroughHooks         ││
//! │  └─────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────┘
//!                        │
//!                        ▼
//!        ContactEvent { a: EntityTag, b: EntityTag }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use chroma_physics::prelude::*;
//!
//! let mut physics = PhysicsWorld::new(PhysicsConfig::default());
//!
//! physics.spawn(
//!     EntityTag::new(EntityKind::Player, 0),
//!     BodyDesc::dynamic().with_position(Vec2::new(10.0, 10.0)),
//!     ColliderDesc::new(ColliderShape::capsule(0.5, 0.5)),
//! )?;
//!
//! physics.step(1.0 / 60.0);
//! for event in physics.contact_events() {
//!     println!("{:?} {:?} {:?}", event.phase, event.a, event.b);
//! }
//! ```

pub mod body;
pub mod collider;
pub mod config;
pub mod error;
pub mod events;
pub mod hooks;
pub mod layers;
pub mod material;
pub mod query;
pub mod world;

pub(crate) mod convert {
    use chroma_math::Vec2;
    use rapier2d::prelude as rapier;

    #[inline]
    pub fn vector(v: Vec2) -> rapier::Vector<f32> {
        rapier::Vector::new(v.x, v.y)
    }

    #[inline]
    pub fn point(v: Vec2) -> rapier::Point<f32> {
        rapier::Point::new(v.x, v.y)
    }

    #[inline]
    pub fn from_vector(v: &rapier::Vector<f32>) -> Vec2 {
        Vec2::new(v.x, v.y)
    }

    #[inline]
    pub fn from_point(p: &rapier::Point<f32>) -> Vec2 {
        Vec2::new(p.x, p.y)
    }
}

pub mod prelude {
    //! Common imports for physics functionality
    pub use crate::body::{BodyDesc, BodyType};
    pub use crate::collider::{ColliderDesc, ColliderShape};
    pub use crate::config::PhysicsConfig;
    pub use crate::error::{PhysicsError, Result};
    pub use crate::events::{ContactEvent, ContactPhase};
    pub use crate::hooks::PassThroughHooks;
    pub use crate::layers::{CollisionGroups, EntityKind, EntityTag};
    pub use crate::material::PhysicsMaterial;
    pub use crate::query::{vision_filter, wall_filter, RayFan, RayResponse, RaycastHit};
    pub use crate::world::PhysicsWorld;
    pub use chroma_math::Vec2;
}

pub use prelude::*;
