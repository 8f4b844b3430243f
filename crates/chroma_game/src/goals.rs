//! Goal tiles and their color groups

use chroma_physics::EntityTag;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A group counts as satisfied once strictly more than this fraction of its
/// tiles is full
pub const SATISFACTION_THRESHOLD: f32 = 0.8;

/// Goal group color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pigment {
    Cyan,
    Magenta,
    Yellow,
}

impl Pigment {
    pub const ALL: [Pigment; 3] = [Pigment::Cyan, Pigment::Magenta, Pigment::Yellow];
}

impl std::fmt::Display for Pigment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cyan => write!(f, "cyan"),
            Self::Magenta => write!(f, "magenta"),
            Self::Yellow => write!(f, "yellow"),
        }
    }
}

/// One goal tile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub tag: EntityTag,
    pub pigment: Pigment,
    /// Set once and never cleared
    pub full: bool,
}

/// Fill state of every goal tile in a level
#[derive(Debug, Clone, Default)]
pub struct GoalBoard {
    goals: HashMap<EntityTag, Goal>,
}

impl GoalBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tag: EntityTag, pigment: Pigment) {
        self.goals.insert(
            tag,
            Goal {
                tag,
                pigment,
                full: false,
            },
        );
    }

    pub fn get(&self, tag: EntityTag) -> Option<&Goal> {
        self.goals.get(&tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Goal> {
        self.goals.values()
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Mark a tile full. Returns true only the first time.
    pub fn fill(&mut self, tag: EntityTag) -> bool {
        match self.goals.get_mut(&tag) {
            Some(goal) if !goal.full => {
                goal.full = true;
                log::debug!("{} goal {} filled", goal.pigment, tag);
                true
            }
            _ => false,
        }
    }

    /// `(filled, total)` for one group
    pub fn progress(&self, pigment: Pigment) -> (usize, usize) {
        self.goals
            .values()
            .filter(|g| g.pigment == pigment)
            .fold((0, 0), |(filled, total), g| (filled + g.full as usize, total + 1))
    }

    /// Empty groups are satisfied
    pub fn is_satisfied(&self, pigment: Pigment) -> bool {
        let (filled, total) = self.progress(pigment);
        total == 0 || filled as f32 / total as f32 > SATISFACTION_THRESHOLD
    }

    /// Whether the door opens
    pub fn all_satisfied(&self) -> bool {
        Pigment::ALL.iter().all(|&p| self.is_satisfied(p))
    }
}
