//! Debug drawing hook
//!
//! The world never renders anything itself. A frontend implements
//! [`DebugDraw`] and passes it to
//! [`GameWorld::debug_draw`](crate::world::GameWorld::debug_draw), which
//! reports navigation edges, enemy paths and enemy goals as plain lines and
//! points.
//!
//! # Example
//!
//! ```ignore
//! use chroma_game::debug::{DebugLayer, DebugLines};
//!
//! let mut lines = DebugLines::default();
//! world.debug_draw(&mut lines);
//! for line in lines.on_layer(DebugLayer::Path) {
//!     println!("{:?} -> {:?}", line.a, line.b);
//! }
//! ```

use chroma_math::Vec2;
use serde::{Deserialize, Serialize};

/// What a debug primitive shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebugLayer {
    /// Navigation graph edges
    NavEdge,
    /// Path an enemy is following
    Path,
    /// Position an enemy is heading for
    Goal,
}

impl DebugLayer {
    /// Suggested RGBA color for this layer
    pub fn color(self) -> [f32; 4] {
        match self {
            DebugLayer::NavEdge => [0.3, 0.3, 0.3, 0.5],
            DebugLayer::Path => [0.1, 0.9, 0.2, 1.0],
            DebugLayer::Goal => [0.95, 0.2, 0.2, 1.0],
        }
    }
}

/// Sink for debug primitives
pub trait DebugDraw {
    fn line(&mut self, a: Vec2, b: Vec2, layer: DebugLayer);

    fn point(&mut self, p: Vec2, layer: DebugLayer);

    /// Connected line strip through `points`
    fn polyline(&mut self, points: &[Vec2], layer: DebugLayer) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], layer);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugLine {
    pub a: Vec2,
    pub b: Vec2,
    pub layer: DebugLayer,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugPoint {
    pub p: Vec2,
    pub layer: DebugLayer,
}

/// Records primitives for later inspection or rendering
#[derive(Debug, Clone, Default)]
pub struct DebugLines {
    pub lines: Vec<DebugLine>,
    pub points: Vec<DebugPoint>,
}

impl DebugLines {
    pub fn clear(&mut self) {
        self.lines.clear();
        self.points.clear();
    }

    pub fn on_layer(&self, layer: DebugLayer) -> impl Iterator<Item = &DebugLine> {
        self.lines.iter().filter(move |l| l.layer == layer)
    }

    pub fn points_on_layer(&self, layer: DebugLayer) -> impl Iterator<Item = &DebugPoint> {
        self.points.iter().filter(move |p| p.layer == layer)
    }
}

impl DebugDraw for DebugLines {
    fn line(&mut self, a: Vec2, b: Vec2, layer: DebugLayer) {
        self.lines.push(DebugLine { a, b, layer });
    }

    fn point(&mut self, p: Vec2, layer: DebugLayer) {
        self.points.push(DebugPoint { p, layer });
    }
}
