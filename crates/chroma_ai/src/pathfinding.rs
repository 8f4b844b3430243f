//! A* pathfinding over the navigation graph

use crate::navigation::NavGraph;
use chroma_math::Vec2;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A path through the navigation graph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    /// Node indices from start to goal
    pub nodes: Vec<usize>,
    /// Node positions from start to goal
    pub waypoints: Vec<Vec2>,
    /// Sum of edge costs
    pub cost: f32,
}

impl Route {
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// The waypoint a follower should steer toward: the second one, or the
    /// only one for a single-node route
    pub fn next_waypoint(&self) -> Option<Vec2> {
        self.waypoints.get(1).or_else(|| self.waypoints.first()).copied()
    }
}

/// Positions from the node nearest `start` to the node nearest `goal`.
///
/// Empty when the graph has no nodes or the two nodes are not connected.
pub fn find_path(graph: &NavGraph, start: Vec2, goal: Vec2) -> Vec<Vec2> {
    find_route(graph, start, goal)
        .map(|route| route.waypoints)
        .unwrap_or_default()
}

/// Like [`find_path`], also reporting node indices and total cost
pub fn find_route(graph: &NavGraph, start: Vec2, goal: Vec2) -> Option<Route> {
    let start_node = graph.nearest_node(start)?;
    let goal_node = graph.nearest_node(goal)?;
    let (nodes, cost) = astar(graph, start_node, goal_node)?;
    let waypoints = nodes
        .iter()
        .map(|&idx| graph.nodes()[idx].position)
        .collect();
    Some(Route {
        nodes,
        waypoints,
        cost,
    })
}

#[derive(Clone, Copy)]
struct Candidate {
    idx: usize,
    f_score: f32,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    // Reversed so the max-heap pops the lowest f-score; ties go to the lower index
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_score
            .total_cmp(&self.f_score)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

/// A* with a Euclidean heuristic. Returns node indices and path cost.
fn astar(graph: &NavGraph, start: usize, goal: usize) -> Option<(Vec<usize>, f32)> {
    let nodes = graph.nodes();
    if start >= nodes.len() || goal >= nodes.len() {
        return None;
    }
    if start == goal {
        return Some((vec![start], 0.0));
    }

    let goal_pos = nodes[goal].position;
    let mut open_set = BinaryHeap::new();
    let mut came_from: Vec<Option<usize>> = vec![None; nodes.len()];
    let mut g_score = vec![f32::INFINITY; nodes.len()];
    let mut closed = vec![false; nodes.len()];

    g_score[start] = 0.0;
    open_set.push(Candidate {
        idx: start,
        f_score: nodes[start].position.distance(goal_pos),
    });

    while let Some(current) = open_set.pop() {
        if current.idx == goal {
            let mut path = vec![goal];
            let mut cursor = goal;
            while let Some(prev) = came_from[cursor] {
                path.push(prev);
                cursor = prev;
            }
            path.reverse();
            return Some((path, g_score[goal]));
        }

        if closed[current.idx] {
            continue;
        }
        closed[current.idx] = true;

        let current_g = g_score[current.idx];
        for edge in &nodes[current.idx].edges {
            if closed[edge.to] {
                continue;
            }
            let tentative_g = current_g + edge.cost;
            if tentative_g < g_score[edge.to] {
                came_from[edge.to] = Some(current.idx);
                g_score[edge.to] = tentative_g;
                open_set.push(Candidate {
                    idx: edge.to,
                    f_score: tentative_g + nodes[edge.to].position.distance(goal_pos),
                });
            }
        }
    }

    None
}
