//! A* search over any [`Graph`].
//!
//! Each node holds at most one record at a time, either open or closed. A
//! cheaper route to a node evicts its record (re-opening it if it was already
//! closed), which keeps path reconstruction unambiguous.

use core::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::{Edge, Graph, NodeIndex};
use crate::heuristic::Heuristic;

#[derive(Debug, Clone)]
struct NodeRecord<E> {
    node: NodeIndex,
    connection: Option<E>,
    cost_so_far: f32,
}

#[derive(Debug, Clone)]
enum Slot<E> {
    Unseen,
    Open(NodeRecord<E>),
    Closed(NodeRecord<E>),
}

impl<E> Slot<E> {
    fn record(&self) -> Option<&NodeRecord<E>> {
        match self {
            Slot::Unseen => None,
            Slot::Open(r) | Slot::Closed(r) => Some(r),
        }
    }
}

/// Heap entry pointing at an open record. Entries whose cost no longer
/// matches the node's current record are stale and skipped on pop.
#[derive(Debug)]
struct OpenEntry {
    estimated_total_cost: f32,
    cost_so_far: f32,
    node: NodeIndex,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap yields the lowest estimate, then the lowest index.
        other
            .estimated_total_cost
            .total_cmp(&self.estimated_total_cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

pub struct AStar<'g, G, H> {
    graph: &'g G,
    heuristic: H,
}

impl<'g, G, H> AStar<'g, G, H>
where
    G: Graph,
    H: Heuristic,
{
    pub fn new(graph: &'g G, heuristic: H) -> Self {
        Self { graph, heuristic }
    }

    /// Cheapest path from `start` to `goal`, both included.
    ///
    /// Returns an empty path when the goal is unreachable or either index is
    /// not part of the graph. `start == goal` yields `[start]`.
    pub fn find_path(&self, start: NodeIndex, goal: NodeIndex) -> Vec<NodeIndex> {
        let mut path = Vec::new();
        self.find_path_into(start, goal, &mut path);
        path
    }

    /// Like [`AStar::find_path`] but writes into `out`, returning whether a
    /// path was found. `out` is cleared first.
    pub fn find_path_into(&self, start: NodeIndex, goal: NodeIndex, out: &mut Vec<NodeIndex>) -> bool {
        out.clear();
        if !self.graph.contains(start) || !self.graph.contains(goal) {
            return false;
        }

        let mut slots: Vec<Slot<G::Edge>> = vec![Slot::Unseen; self.graph.node_count()];
        let mut open = BinaryHeap::new();
        let mut edges = Vec::new();

        slots[start.0] = Slot::Open(NodeRecord {
            node: start,
            connection: None,
            cost_so_far: 0.0,
        });
        open.push(OpenEntry {
            estimated_total_cost: self.heuristic_cost(start, goal),
            cost_so_far: 0.0,
            node: start,
        });

        while let Some(entry) = open.pop() {
            let current = match &slots[entry.node.0] {
                Slot::Open(record) if record.cost_so_far == entry.cost_so_far => record.clone(),
                _ => continue,
            };

            if current.node == goal {
                slots[goal.0] = Slot::Closed(current);
                return reconstruct(&slots, start, goal, out);
            }

            edges.clear();
            self.graph.connections_into(current.node, &mut edges);
            for edge in edges.drain(..) {
                let to = edge.to();
                if !self.graph.contains(to) {
                    continue;
                }
                let g_cost = current.cost_so_far + edge.cost();
                let improves = match slots[to.0].record() {
                    None => true,
                    Some(existing) => g_cost < existing.cost_so_far,
                };
                if !improves {
                    continue;
                }

                open.push(OpenEntry {
                    estimated_total_cost: g_cost + self.heuristic_cost(to, goal),
                    cost_so_far: g_cost,
                    node: to,
                });
                slots[to.0] = Slot::Open(NodeRecord {
                    node: to,
                    connection: Some(edge),
                    cost_so_far: g_cost,
                });
            }

            let node = current.node;
            slots[node.0] = Slot::Closed(current);
        }

        false
    }

    fn heuristic_cost(&self, from: NodeIndex, to: NodeIndex) -> f32 {
        match (self.graph.position(from), self.graph.position(to)) {
            (Some(a), Some(b)) => {
                let d = (b - a).abs();
                self.heuristic.estimate(d.x, d.y)
            }
            _ => 0.0,
        }
    }
}

fn reconstruct<E: Edge>(
    slots: &[Slot<E>],
    start: NodeIndex,
    goal: NodeIndex,
    out: &mut Vec<NodeIndex>,
) -> bool {
    let mut node = goal;
    out.push(goal);
    while node != start {
        let from = slots[node.0]
            .record()
            .and_then(|r| r.connection.as_ref())
            .map(Edge::from);
        match from {
            Some(prev) if out.len() <= slots.len() => {
                node = prev;
                out.push(node);
            }
            _ => {
                out.clear();
                return false;
            }
        }
    }
    out.reverse();
    true
}

/// Total cost of walking `path`, taking the cheapest edge between each pair
/// of consecutive nodes. `None` when the path is empty or a hop has no edge.
pub fn path_cost<G: Graph>(graph: &G, path: &[NodeIndex]) -> Option<f32> {
    if path.is_empty() {
        return None;
    }
    let mut total = 0.0;
    let mut edges = Vec::new();
    for hop in path.windows(2) {
        edges.clear();
        graph.connections_into(hop[0], &mut edges);
        let cheapest = edges
            .iter()
            .filter(|e| e.to() == hop[1])
            .map(Edge::cost)
            .min_by(f32::total_cmp)?;
        total += cheapest;
    }
    Some(total)
}
