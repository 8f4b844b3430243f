//! Grid navigation graph
//!
//! Nodes are grid samples that fall outside every wall polygon. Two nodes are
//! joined by a directed edge when they are within `neighbor_factor * grid_size`
//! of each other and the segment between them is clear. The graph is built
//! once per level and never changes afterwards.

use crate::sight::LineOfSight;
use chroma_math::{Polygon, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Extra reach on the neighbor radius so diagonal neighbors are not lost to
/// rounding
const RADIUS_EPSILON: f32 = 1e-4;

/// Navigation graph parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Spacing between grid samples
    pub grid_size: f32,
    pub world_width: f32,
    pub world_height: f32,
    /// Neighbor radius as a multiple of `grid_size`
    pub neighbor_factor: f32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            grid_size: 32.0,
            world_width: 0.0,
            world_height: 0.0,
            neighbor_factor: 1.5,
        }
    }
}

impl NavConfig {
    pub fn new(grid_size: f32, world_width: f32, world_height: f32) -> Self {
        Self {
            grid_size,
            world_width,
            world_height,
            ..Default::default()
        }
    }

    /// Grid spacing used by the original screen-based levels: half the
    /// viewport height in world units.
    pub fn grid_size_for_viewport(screen_height: f32, scale: f32) -> f32 {
        screen_height / scale / 2.0
    }

    pub fn with_neighbor_factor(mut self, factor: f32) -> Self {
        self.neighbor_factor = factor;
        self
    }

    /// Maximum edge length
    pub fn neighbor_radius(&self) -> f32 {
        self.grid_size * self.neighbor_factor
    }

    pub fn is_valid(&self) -> bool {
        self.grid_size.is_finite()
            && self.grid_size > 0.0
            && self.world_width.is_finite()
            && self.world_height.is_finite()
            && self.neighbor_factor.is_finite()
            && self.neighbor_factor > 0.0
    }
}

/// Directed edge to another node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavEdge {
    /// Index of the target node
    pub to: usize,
    /// Euclidean length
    pub cost: f32,
}

/// A walkable grid sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavNode {
    pub position: Vec2,
    /// Grid coordinate, the node's identity
    pub coord: (i32, i32),
    pub edges: Vec<NavEdge>,
}

/// Navigation graph over a sampled grid
#[derive(Debug, Clone, Default)]
pub struct NavGraph {
    config: NavConfig,
    nodes: Vec<NavNode>,
    /// Grid coordinate -> node index
    index: HashMap<(i32, i32), usize>,
    /// Bucket size for spatial queries (the neighbor radius)
    cell_size: f32,
    /// Spatial hash for nearest-node and neighbor lookup
    spatial_hash: HashMap<(i32, i32), Vec<usize>>,
}

impl NavGraph {
    /// Graph with no nodes
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sample the grid, drop samples inside walls and connect neighbors that
    /// can see each other
    pub fn build<S>(config: &NavConfig, walls: &[Polygon], sight: &S) -> Self
    where
        S: LineOfSight + ?Sized,
    {
        if !config.is_valid() {
            log::warn!("invalid navigation config {:?}, building an empty graph", config);
            return Self {
                config: *config,
                ..Self::default()
            };
        }

        let mut graph = Self {
            config: *config,
            nodes: Vec::new(),
            index: HashMap::new(),
            cell_size: config.neighbor_radius() + RADIUS_EPSILON,
            spatial_hash: HashMap::new(),
        };

        let grid = config.grid_size;
        let cols = (config.world_width / grid).ceil().max(0.0) as i32;
        let rows = (config.world_height / grid).ceil().max(0.0) as i32;
        let mut pruned = 0usize;

        for i in 0..cols {
            let x = i as f32 * grid;
            if x >= config.world_width {
                continue;
            }
            for j in 0..rows {
                let y = j as f32 * grid;
                if y >= config.world_height {
                    continue;
                }
                let position = Vec2::new(x, y);
                if walls.iter().any(|wall| wall.contains(position)) {
                    pruned += 1;
                    continue;
                }
                graph.index.insert((i, j), graph.nodes.len());
                graph.nodes.push(NavNode {
                    position,
                    coord: (i, j),
                    edges: Vec::new(),
                });
            }
        }

        graph.rebuild_spatial_hash();
        graph.connect(sight);

        log::info!(
            "navigation graph: {} nodes ({} inside walls), {} edges, grid {}",
            graph.nodes.len(),
            pruned,
            graph.edge_count(),
            grid
        );
        graph
    }

    fn connect<S>(&mut self, sight: &S)
    where
        S: LineOfSight + ?Sized,
    {
        let radius_sq = self.cell_size * self.cell_size;

        for from in 0..self.nodes.len() {
            let origin = self.nodes[from].position;
            let mut candidates = self.nearby(origin);
            candidates.sort_unstable();

            let edges: Vec<NavEdge> = candidates
                .into_iter()
                .filter(|&to| to != from)
                .filter_map(|to| {
                    let target = self.nodes[to].position;
                    let dist_sq = origin.distance_squared(target);
                    (dist_sq <= radius_sq && sight.is_clear(origin, target)).then(|| NavEdge {
                        to,
                        cost: dist_sq.sqrt(),
                    })
                })
                .collect();

            self.nodes[from].edges = edges;
        }
    }

    /// Rebuild spatial hash for queries
    fn rebuild_spatial_hash(&mut self) {
        self.spatial_hash.clear();
        for (idx, node) in self.nodes.iter().enumerate() {
            let cell = self.cell_of(node.position);
            self.spatial_hash.entry(cell).or_default().push(idx);
        }
    }

    fn cell_of(&self, position: Vec2) -> (i32, i32) {
        (
            (position.x / self.cell_size).floor() as i32,
            (position.y / self.cell_size).floor() as i32,
        )
    }

    /// Node indices in the 3x3 buckets around `position`
    fn nearby(&self, position: Vec2) -> Vec<usize> {
        let (cx, cy) = self.cell_of(position);
        let mut found = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(indices) = self.spatial_hash.get(&(cx + dx, cy + dy)) {
                    found.extend_from_slice(indices);
                }
            }
        }
        found
    }

    /// Index of the node closest to `position`.
    ///
    /// Checks the surrounding buckets first; falls back to a full scan when
    /// nothing close enough is found there.
    pub fn nearest_node(&self, position: Vec2) -> Option<usize> {
        if self.nodes.is_empty() || !position.is_finite() {
            return None;
        }

        let closest = |candidates: &mut dyn Iterator<Item = usize>| {
            candidates
                .map(|idx| (idx, self.nodes[idx].position.distance_squared(position)))
                .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
        };

        // Anything outside the 3x3 buckets is at least one cell away
        if let Some((idx, dist_sq)) = closest(&mut self.nearby(position).into_iter()) {
            if dist_sq <= self.cell_size * self.cell_size {
                return Some(idx);
            }
        }

        closest(&mut (0..self.nodes.len())).map(|(idx, _)| idx)
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn nodes(&self) -> &[NavNode] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&NavNode> {
        self.nodes.get(index)
    }

    /// Node at a grid coordinate, if that sample survived pruning
    pub fn node_at(&self, coord: (i32, i32)) -> Option<usize> {
        self.index.get(&coord).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum()
    }

    /// Every directed edge as `(from, to)` positions
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.nodes.iter().flat_map(move |node| {
            node.edges
                .iter()
                .map(move |edge| (node.position, self.nodes[edge.to].position))
        })
    }
}
