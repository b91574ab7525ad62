//! Planar math and graph search.
//!
//! [`AStar`] works over anything implementing [`Graph`]; [`GridGraph`] is the
//! stock implementation used to plan around obstacles in a rectangular world.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod astar;
pub mod graph;
pub mod grid;
pub mod heuristic;
pub mod math;

pub use astar::{path_cost, AStar};
pub use graph::{Connection, Edge, Graph, NodeIndex, SparseGraph};
pub use grid::{Connectivity, EdgeCost, GridGraph};
pub use heuristic::{Chebyshev, Euclidean, Heuristic, Manhattan};
pub use math::Vec2;
