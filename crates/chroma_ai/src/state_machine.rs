//! Finite State Machine (FSM) implementation

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

/// A state in the state machine
pub trait State: Clone + Eq + Hash {
    /// Called when entering this state
    fn on_enter(&self) {}
    /// Called when exiting this state
    fn on_exit(&self) {}
}

/// Enemy behavior states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AiState {
    #[default]
    Wander,
    /// Reserved, never entered
    Patrol,
    /// Reserved, never entered
    Alert,
    Chase,
}

impl State for AiState {
    fn on_enter(&self) {
        log::debug!("enemy entering {:?}", self);
    }
}

/// Transition condition
pub type TransitionCondition<C> = Box<dyn Fn(&C) -> bool + Send + Sync>;

/// A state transition
pub struct Transition<S, C> {
    pub to: S,
    pub condition: TransitionCondition<C>,
}

impl<S, C> Transition<S, C> {
    pub fn new<F>(to: S, condition: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Self {
            to,
            condition: Box::new(condition),
        }
    }

    pub fn should_transition(&self, context: &C) -> bool {
        (self.condition)(context)
    }
}

/// Finite State Machine
pub struct StateMachine<S, C>
where
    S: State,
{
    current: S,
    previous: Option<S>,
    /// Transitions from each state
    transitions: HashMap<S, Vec<Transition<S, C>>>,
    /// Transitions checked from any state
    global_transitions: Vec<Transition<S, C>>,
    /// Seconds spent in the current state
    time_in_state: f32,
}

impl<S, C> StateMachine<S, C>
where
    S: State,
{
    pub fn new(initial: S) -> Self {
        initial.on_enter();
        Self {
            current: initial,
            previous: None,
            transitions: HashMap::new(),
            global_transitions: Vec::new(),
            time_in_state: 0.0,
        }
    }

    pub fn add_transition<F>(&mut self, from: S, to: S, condition: F)
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.transitions
            .entry(from)
            .or_default()
            .push(Transition::new(to, condition));
    }

    /// Add a transition that can occur from any state
    pub fn add_global_transition<F>(&mut self, to: S, condition: F)
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.global_transitions.push(Transition::new(to, condition));
    }

    pub fn current(&self) -> &S {
        &self.current
    }

    pub fn previous(&self) -> Option<&S> {
        self.previous.as_ref()
    }

    pub fn time_in_state(&self) -> f32 {
        self.time_in_state
    }

    pub fn force_transition(&mut self, to: S) {
        self.current.on_exit();
        self.previous = Some(self.current.clone());
        self.current = to;
        self.time_in_state = 0.0;
        self.current.on_enter();
    }

    /// Advance the clock and take the first transition whose condition holds.
    /// Returns whether the state changed.
    pub fn update(&mut self, context: &C, delta_time: f32) -> bool {
        self.time_in_state += delta_time.max(0.0);

        let global = self
            .global_transitions
            .iter()
            .find(|t| self.current != t.to && t.should_transition(context))
            .map(|t| t.to.clone());

        let next = global.or_else(|| {
            self.transitions.get(&self.current).and_then(|transitions| {
                transitions
                    .iter()
                    .find(|t| t.should_transition(context))
                    .map(|t| t.to.clone())
            })
        });

        match next {
            Some(to) => {
                self.force_transition(to);
                true
            }
            None => false,
        }
    }

    pub fn is_in(&self, state: &S) -> bool {
        &self.current == state
    }
}
