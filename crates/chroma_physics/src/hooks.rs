//! Contact-pair filtering
//!
//! Some pairs must be detected (so the contact resolver sees begin/end) but
//! must not push each other apart. [`PassThroughHooks`] strips the solver
//! response from those pairs.

use crate::layers::{EntityKind, EntityTag};
use rapier2d::prelude as rapier;
use std::collections::HashSet;

/// Disables solver response for a configured set of kind pairs
#[derive(Debug, Clone)]
pub struct PassThroughHooks {
    pairs: HashSet<(EntityKind, EntityKind)>,
}

impl Default for PassThroughHooks {
    fn default() -> Self {
        let mut hooks = Self::empty();
        hooks.allow(EntityKind::Player, EntityKind::Spray);
        hooks.allow(EntityKind::Enemy, EntityKind::Spray);
        hooks.allow(EntityKind::Player, EntityKind::Bomb);
        hooks
    }
}

impl PassThroughHooks {
    pub fn empty() -> Self {
        Self {
            pairs: HashSet::new(),
        }
    }

    /// Let `a` and `b` pass through each other (order does not matter)
    pub fn allow(&mut self, a: EntityKind, b: EntityKind) {
        self.pairs.insert(ordered(a, b));
    }

    /// Whether contacts between these kinds get a solver response
    pub fn solver_enabled(&self, a: EntityKind, b: EntityKind) -> bool {
        !self.pairs.contains(&ordered(a, b))
    }
}

fn ordered(a: EntityKind, b: EntityKind) -> (EntityKind, EntityKind) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl rapier::PhysicsHooks for PassThroughHooks {
    fn filter_contact_pair(&self, context: &rapier::PairFilterContext) -> Option<rapier::SolverFlags> {
        let tag_of = |handle: rapier::ColliderHandle| {
            context
                .colliders
                .get(handle)
                .and_then(|c| EntityTag::from_user_data(c.user_data))
        };

        match (tag_of(context.collider1), tag_of(context.collider2)) {
            (Some(a), Some(b)) if !self.solver_enabled(a.kind, b.kind) => {
                Some(rapier::SolverFlags::empty())
            }
            _ => Some(rapier::SolverFlags::COMPUTE_IMPULSES),
        }
    }
}
