use crate::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable index of a node inside a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeIndex(pub usize);

impl NodeIndex {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A directed, weighted link between two nodes.
pub trait Edge: Clone {
    fn from(&self) -> NodeIndex;
    fn to(&self) -> NodeIndex;
    /// Traversal cost. Must be finite and non-negative.
    fn cost(&self) -> f32;
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Connection {
    pub from: NodeIndex,
    pub to: NodeIndex,
    pub cost: f32,
}

impl Connection {
    pub fn new(from: NodeIndex, to: NodeIndex, cost: f32) -> Self {
        Self { from, to, cost }
    }
}

impl Edge for Connection {
    fn from(&self) -> NodeIndex {
        self.from
    }

    fn to(&self) -> NodeIndex {
        self.to
    }

    fn cost(&self) -> f32 {
        self.cost
    }
}

/// Read-only view of a searchable graph.
///
/// Node indices are dense: every index below [`Graph::node_count`] names a
/// node, and only those do.
pub trait Graph {
    type Edge: Edge;

    fn node_count(&self) -> usize;

    fn contains(&self, node: NodeIndex) -> bool {
        node.0 < self.node_count()
    }

    /// World position of `node`, used by heuristics.
    fn position(&self, node: NodeIndex) -> Option<Vec2>;

    /// Append the outgoing edges of `node` to `out`, in a fixed order.
    fn connections_into(&self, node: NodeIndex, out: &mut Vec<Self::Edge>);
}

/// Adjacency-list graph for hand-built or irregular layouts.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SparseGraph {
    positions: Vec<Vec2>,
    edges: Vec<Vec<Connection>>,
}

impl SparseGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, position: Vec2) -> NodeIndex {
        self.positions.push(position);
        self.edges.push(Vec::new());
        NodeIndex(self.positions.len() - 1)
    }

    /// Add a directed edge. Returns `false` when either endpoint is unknown.
    pub fn connect(&mut self, from: NodeIndex, to: NodeIndex, cost: f32) -> bool {
        if !self.contains(from) || !self.contains(to) {
            return false;
        }
        self.edges[from.0].push(Connection::new(from, to, cost));
        true
    }

    pub fn connect_both(&mut self, a: NodeIndex, b: NodeIndex, cost: f32) -> bool {
        self.connect(a, b, cost) && self.connect(b, a, cost)
    }

    pub fn edges(&self, node: NodeIndex) -> &[Connection] {
        self.edges.get(node.0).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Graph for SparseGraph {
    type Edge = Connection;

    fn node_count(&self) -> usize {
        self.positions.len()
    }

    fn position(&self, node: NodeIndex) -> Option<Vec2> {
        self.positions.get(node.0).copied()
    }

    fn connections_into(&self, node: NodeIndex, out: &mut Vec<Connection>) {
        out.extend_from_slice(self.edges(node));
    }
}
