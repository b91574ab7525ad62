use crate::astar::AStar;
use crate::graph::{Connection, Graph, NodeIndex};
use crate::heuristic::{Chebyshev, Euclidean, Heuristic, Manhattan};
use crate::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Connectivity {
    #[default]
    Four,
    /// Diagonal moves are allowed only when both adjacent orthogonal cells are open.
    Eight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EdgeCost {
    /// Every move costs 1, diagonals included.
    #[default]
    Uniform,
    /// Moves cost the distance between cell centers.
    Distance,
}

/// Rectangular grid of square cells, each cell a graph node.
///
/// Node indices are row-major: `y * width + x`. Blocked cells have no edges
/// in or out.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridGraph {
    width: i32,
    height: i32,
    cell_size: f32,
    origin: Vec2,
    connectivity: Connectivity,
    edge_cost: EdgeCost,
    blocked: Vec<bool>,
}

impl GridGraph {
    pub fn new(width: u32, height: u32, cell_size: f32) -> Self {
        assert!(width > 0 && height > 0, "grid must be non-empty");
        assert!(cell_size > 0.0, "cell_size must be > 0");
        let width = width as i32;
        let height = height as i32;
        Self {
            width,
            height,
            cell_size,
            origin: Vec2::ZERO,
            connectivity: Connectivity::Four,
            edge_cost: EdgeCost::Uniform,
            blocked: vec![false; (width * height) as usize],
        }
    }

    /// World position of the grid's minimum corner.
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    pub fn with_edge_cost(mut self, edge_cost: EdgeCost) -> Self {
        self.edge_cost = edge_cost;
        self
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn set_blocked(&mut self, x: i32, y: i32, blocked: bool) {
        if let Some(node) = self.node_at(x, y) {
            self.blocked[node.0] = blocked;
        }
    }

    /// Out-of-bounds cells count as blocked.
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        self.node_at(x, y)
            .map(|node| self.blocked[node.0])
            .unwrap_or(true)
    }

    /// Node for cell `(x, y)`, if it lies inside the grid.
    pub fn node_at(&self, x: i32, y: i32) -> Option<NodeIndex> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(NodeIndex((y * self.width + x) as usize))
    }

    /// Node whose cell contains the world point `p`.
    pub fn cell_at(&self, p: Vec2) -> Option<NodeIndex> {
        let local = (p - self.origin) / self.cell_size;
        self.node_at(local.x.floor() as i32, local.y.floor() as i32)
    }

    pub fn cell_of(&self, node: NodeIndex) -> Option<(i32, i32)> {
        if !self.contains(node) {
            return None;
        }
        let idx = node.0 as i32;
        Some((idx % self.width, idx / self.width))
    }

    pub fn cell_center(&self, node: NodeIndex) -> Option<Vec2> {
        let (x, y) = self.cell_of(node)?;
        Some(
            self.origin
                + Vec2::new(
                    (x as f32 + 0.5) * self.cell_size,
                    (y as f32 + 0.5) * self.cell_size,
                ),
        )
    }

    /// Walkable points from `start` to `goal`: the exact endpoints with the
    /// centers of the intermediate cells between them.
    ///
    /// Empty when either point is outside the grid, on a blocked cell, or no
    /// route exists.
    pub fn path_points(&self, start: Vec2, goal: Vec2) -> Vec<Vec2> {
        let (Some(from), Some(to)) = (self.cell_at(start), self.cell_at(goal)) else {
            return Vec::new();
        };
        if self.blocked[from.0] || self.blocked[to.0] {
            return Vec::new();
        }
        let nodes = match (self.connectivity, self.edge_cost) {
            (Connectivity::Four, _) => self.search(from, to, Manhattan { weight: self.step_scale() }),
            (Connectivity::Eight, EdgeCost::Uniform) => {
                self.search(from, to, Chebyshev { weight: self.step_scale() })
            }
            (Connectivity::Eight, EdgeCost::Distance) => self.search(from, to, Euclidean::default()),
        };
        if nodes.is_empty() {
            return Vec::new();
        }

        let inner = nodes.len().saturating_sub(2);
        let mut points = Vec::with_capacity(inner + 2);
        points.push(start);
        points.extend(
            nodes
                .iter()
                .skip(1)
                .take(inner)
                .filter_map(|&n| self.cell_center(n)),
        );
        points.push(goal);
        points
    }

    /// First point to head for when travelling from `from` to `to`.
    pub fn next_path_point(&self, from: Vec2, to: Vec2) -> Option<Vec2> {
        self.path_points(from, to).get(1).copied()
    }

    fn search<H: Heuristic>(&self, from: NodeIndex, to: NodeIndex, heuristic: H) -> Vec<NodeIndex> {
        AStar::new(self, heuristic).find_path(from, to)
    }

    /// Heuristics see world-space deltas; uniform costs count cells.
    fn step_scale(&self) -> f32 {
        match self.edge_cost {
            EdgeCost::Uniform => 1.0 / self.cell_size,
            EdgeCost::Distance => 1.0,
        }
    }

    fn move_cost(&self, diagonal: bool) -> f32 {
        match (self.edge_cost, diagonal) {
            (EdgeCost::Uniform, _) => 1.0,
            (EdgeCost::Distance, false) => self.cell_size,
            (EdgeCost::Distance, true) => self.cell_size * core::f32::consts::SQRT_2,
        }
    }
}

impl Graph for GridGraph {
    type Edge = Connection;

    fn node_count(&self) -> usize {
        self.blocked.len()
    }

    fn position(&self, node: NodeIndex) -> Option<Vec2> {
        self.cell_center(node)
    }

    fn connections_into(&self, node: NodeIndex, out: &mut Vec<Connection>) {
        let Some((x, y)) = self.cell_of(node) else {
            return;
        };
        if self.blocked[node.0] {
            return;
        }

        // Fixed order for determinism: N, E, S, W, then NE, SE, SW, NW.
        const ORTHOGONAL: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
        const DIAGONAL: [(i32, i32); 4] = [(1, -1), (1, 1), (-1, 1), (-1, -1)];

        for (dx, dy) in ORTHOGONAL {
            if self.is_blocked(x + dx, y + dy) {
                continue;
            }
            if let Some(to) = self.node_at(x + dx, y + dy) {
                out.push(Connection::new(node, to, self.move_cost(false)));
            }
        }

        if self.connectivity == Connectivity::Four {
            return;
        }
        for (dx, dy) in DIAGONAL {
            if self.is_blocked(x + dx, y + dy)
                || self.is_blocked(x + dx, y)
                || self.is_blocked(x, y + dy)
            {
                continue;
            }
            if let Some(to) = self.node_at(x + dx, y + dy) {
                out.push(Connection::new(node, to, self.move_cost(true)));
            }
        }
    }
}
