//! Player detection

use chroma_math::Vec2;
use serde::{Deserialize, Serialize};

/// Detection radius of one enemy.
///
/// While the player goes unseen the radius grows by `widen_rate` units per
/// second up to `max`; seeing the player snaps it back to `base`. A zero
/// `widen_rate` keeps the radius fixed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionRange {
    pub base: f32,
    pub current: f32,
    pub max: f32,
    pub widen_rate: f32,
    /// Seconds since the player was last detected
    pub time_since_lost: f32,
}

impl Default for DetectionRange {
    fn default() -> Self {
        Self::fixed(250.0)
    }
}

impl DetectionRange {
    /// Range that never widens
    pub fn fixed(range: f32) -> Self {
        Self {
            base: range,
            current: range,
            max: range,
            widen_rate: 0.0,
            time_since_lost: 0.0,
        }
    }

    pub fn widening(base: f32, max: f32, widen_rate: f32) -> Self {
        Self {
            base,
            current: base,
            max: max.max(base),
            widen_rate,
            time_since_lost: 0.0,
        }
    }

    /// Whether an unhidden player at `player` is inside the current radius
    pub fn can_detect(&self, observer: Vec2, player: Vec2, player_hidden: bool) -> bool {
        !player_hidden && observer.distance(player) <= self.current
    }

    /// Run detection for this tick and adjust the radius. Returns whether the
    /// player was detected.
    pub fn update(&mut self, observer: Vec2, player: Vec2, player_hidden: bool, dt: f32) -> bool {
        let detected = self.can_detect(observer, player, player_hidden);
        if detected {
            self.current = self.base;
            self.time_since_lost = 0.0;
        } else if dt.is_finite() && dt > 0.0 {
            self.time_since_lost += dt;
            self.current = (self.current + self.widen_rate * dt).min(self.max);
        }
        detected
    }

    pub fn reset(&mut self) {
        self.current = self.base;
        self.time_since_lost = 0.0;
    }
}
