//! Entity tags and collision filtering
//!
//! Every collider and body carries an [`EntityTag`] in its Rapier `user_data`:
//! the kind in the high 64 bits (offset by one so that `0` means untagged) and
//! the entity id in the low 64 bits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a body represents in the game world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum EntityKind {
    Player = 0,
    Enemy = 1,
    Wall = 2,
    Spray = 3,
    Bomb = 4,
    Goal = 5,
    Door = 6,
    Grate = 7,
    Laser = 8,
    /// Generic solid scenery that is not part of the level walls
    Collision = 9,
}

impl EntityKind {
    pub const ALL: [EntityKind; 10] = [
        EntityKind::Player,
        EntityKind::Enemy,
        EntityKind::Wall,
        EntityKind::Spray,
        EntityKind::Bomb,
        EntityKind::Goal,
        EntityKind::Door,
        EntityKind::Grate,
        EntityKind::Laser,
        EntityKind::Collision,
    ];

    pub fn from_index(index: u64) -> Option<Self> {
        Self::ALL.get(usize::try_from(index).ok()?).copied()
    }

    #[inline]
    pub fn index(self) -> u64 {
        self as u8 as u64
    }

    /// Collision membership bit for this kind
    #[inline]
    pub fn as_mask(self) -> u32 {
        1 << (self as u8)
    }

    /// Kinds that physically block movement and sight
    pub fn is_solid_scenery(self) -> bool {
        matches!(self, EntityKind::Wall | EntityKind::Collision)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Back-reference from a physics object to its owning entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityTag {
    pub kind: EntityKind,
    pub id: u64,
}

impl EntityTag {
    pub const fn new(kind: EntityKind, id: u64) -> Self {
        Self { kind, id }
    }

    /// Encode into Rapier `user_data`
    pub fn to_user_data(self) -> u128 {
        ((self.kind.index() as u128 + 1) << 64) | self.id as u128
    }

    /// Decode from Rapier `user_data`; `None` for untagged objects
    pub fn from_user_data(user_data: u128) -> Option<Self> {
        let kind_bits = (user_data >> 64) as u64;
        let kind = EntityKind::from_index(kind_bits.checked_sub(1)?)?;
        Some(Self::new(kind, user_data as u64))
    }

    #[inline]
    pub fn is(&self, kind: EntityKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}

/// Collision groups for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionGroups {
    /// Which groups this object belongs to (membership)
    pub memberships: u32,
    /// Which groups this object can collide with (filter)
    pub filter: u32,
}

impl CollisionGroups {
    pub const ALL: Self = Self {
        memberships: u32::MAX,
        filter: u32::MAX,
    };

    pub const NONE: Self = Self {
        memberships: 0,
        filter: 0,
    };

    pub fn new(memberships: u32, filter: u32) -> Self {
        Self { memberships, filter }
    }

    /// Membership of a single kind, colliding with the listed kinds
    pub fn from_kind(kind: EntityKind, collides_with: &[EntityKind]) -> Self {
        let filter = collides_with.iter().fold(0u32, |acc, k| acc | k.as_mask());
        Self {
            memberships: kind.as_mask(),
            filter,
        }
    }

    /// Membership of a single kind, colliding with everything
    pub fn of_kind(kind: EntityKind) -> Self {
        Self {
            memberships: kind.as_mask(),
            filter: u32::MAX,
        }
    }

    pub fn can_collide(&self, other: &CollisionGroups) -> bool {
        (self.memberships & other.filter) != 0 && (other.memberships & self.filter) != 0
    }

    pub fn remove_filter(mut self, kind: EntityKind) -> Self {
        self.filter &= !kind.as_mask();
        self
    }

    pub(crate) fn to_rapier(self) -> rapier2d::prelude::InteractionGroups {
        use rapier2d::prelude::{Group, InteractionGroups};
        InteractionGroups::new(
            Group::from_bits_truncate(self.memberships),
            Group::from_bits_truncate(self.filter),
        )
    }
}

impl Default for CollisionGroups {
    fn default() -> Self {
        Self::ALL
    }
}
