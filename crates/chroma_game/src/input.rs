//! Per-frame input snapshot

use chroma_math::Vec2;
use serde::{Deserialize, Serialize};

/// Normalized input for one frame.
///
/// Device decoding happens outside the core; the loop only ever sees this
/// struct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameInput {
    /// Horizontal movement axis in [-1, 1]
    pub move_x: f32,
    /// Vertical movement axis in [-1, 1]
    pub move_y: f32,
    /// Cast a spray toward the cursor
    pub fire: bool,
    /// Throw a bomb toward the cursor
    pub secondary: bool,
    pub toggle_debug: bool,
    pub reset: bool,
    pub exit: bool,
    /// Cursor position in world units
    pub cursor: Vec2,
}

impl FrameInput {
    pub fn moving(x: f32, y: f32) -> Self {
        Self {
            move_x: x,
            move_y: y,
            ..Default::default()
        }
    }

    pub fn with_cursor(mut self, cursor: Vec2) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn with_fire(mut self) -> Self {
        self.fire = true;
        self
    }

    pub fn with_secondary(mut self) -> Self {
        self.secondary = true;
        self
    }

    /// Movement axes clamped to [-1, 1]; non-finite axes read as zero
    pub fn movement(&self) -> Vec2 {
        let axis = |v: f32| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
        Vec2::new(axis(self.move_x), axis(self.move_y))
    }
}
