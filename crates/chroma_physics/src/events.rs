//! Contact events resolved to entity tags

use crate::layers::{EntityKind, EntityTag};
use rapier2d::prelude as rapier;

/// Whether a contact started or ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactPhase {
    Begin,
    End,
}

/// A begin or end contact between two tagged colliders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEvent {
    pub a: EntityTag,
    pub b: EntityTag,
    pub phase: ContactPhase,
    /// Whether either collider is a sensor
    pub sensor: bool,
}

impl ContactEvent {
    pub fn begin(a: EntityTag, b: EntityTag) -> Self {
        Self {
            a,
            b,
            phase: ContactPhase::Begin,
            sensor: false,
        }
    }

    pub fn end(a: EntityTag, b: EntityTag) -> Self {
        Self {
            a,
            b,
            phase: ContactPhase::End,
            sensor: false,
        }
    }

    pub fn is_begin(&self) -> bool {
        self.phase == ContactPhase::Begin
    }

    pub fn is_end(&self) -> bool {
        self.phase == ContactPhase::End
    }

    /// Kinds of both sides, in event order
    pub fn kinds(&self) -> (EntityKind, EntityKind) {
        (self.a.kind, self.b.kind)
    }

    /// Same event with the two sides swapped
    pub fn swapped(&self) -> Self {
        Self {
            a: self.b,
            b: self.a,
            ..*self
        }
    }

    /// The side of the given kind and the other side, if one matches
    pub fn split(&self, kind: EntityKind) -> Option<(EntityTag, EntityTag)> {
        if self.a.kind == kind {
            Some((self.a, self.b))
        } else if self.b.kind == kind {
            Some((self.b, self.a))
        } else {
            None
        }
    }
}

/// Channel-based event collector for Rapier
pub(crate) struct ChannelEventCollector {
    pub(crate) collision_events: crossbeam_channel::Sender<rapier::CollisionEvent>,
}

impl ChannelEventCollector {
    pub(crate) fn new() -> (Self, crossbeam_channel::Receiver<rapier::CollisionEvent>) {
        let (collision_events, receiver) = crossbeam_channel::unbounded();
        (Self { collision_events }, receiver)
    }
}

impl rapier::EventHandler for ChannelEventCollector {
    fn handle_collision_event(
        &self,
        _bodies: &rapier::RigidBodySet,
        _colliders: &rapier::ColliderSet,
        event: rapier::CollisionEvent,
        _contact_pair: Option<&rapier::ContactPair>,
    ) {
        let _ = self.collision_events.send(event);
    }

    fn handle_contact_force_event(
        &self,
        _dt: f32,
        _bodies: &rapier::RigidBodySet,
        _colliders: &rapier::ColliderSet,
        _contact_pair: &rapier::ContactPair,
        _total_force_magnitude: f32,
    ) {
        // Contact forces are not used
    }
}
