#![cfg(feature = "serde")]

use survivor_nav::{Connectivity, GridGraph, Vec2};

#[test]
fn grid_graph_roundtrips_via_serde() {
    let mut grid = GridGraph::new(6, 4, 5.0)
        .with_origin(Vec2::new(-15.0, -10.0))
        .with_connectivity(Connectivity::Eight);
    grid.set_blocked(2, 1, true);
    grid.set_blocked(2, 2, true);

    let json = serde_json::to_string(&grid).expect("serialize grid");
    let grid2: GridGraph = serde_json::from_str(&json).expect("deserialize grid");

    assert!(grid2.is_blocked(2, 1));
    assert_eq!(grid2.origin(), grid.origin());

    let start = Vec2::new(-14.0, -9.0);
    let goal = Vec2::new(14.0, 9.0);
    assert_eq!(grid.path_points(start, goal), grid2.path_points(start, goal));
}
