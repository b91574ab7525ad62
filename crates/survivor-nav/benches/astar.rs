use criterion::{black_box, criterion_group, criterion_main, Criterion};
use survivor_nav::{AStar, Connectivity, EdgeCost, GridGraph, Manhattan, NodeIndex, Vec2};

fn maze(width: u32, height: u32) -> GridGraph {
    let mut grid = GridGraph::new(width, height, 1.0);
    // Vertical walls every 8 columns with alternating gaps top and bottom.
    for (n, x) in (4..width as i32).step_by(8).enumerate() {
        let gap = if n % 2 == 0 { height as i32 - 1 } else { 0 };
        for y in 0..height as i32 {
            if y != gap {
                grid.set_blocked(x, y, true);
            }
        }
    }
    grid
}

fn bench_astar(c: &mut Criterion) {
    let grid = maze(64, 64);
    let start = grid.node_at(0, 0).unwrap_or(NodeIndex(0));
    let goal = grid.node_at(63, 63).unwrap_or(NodeIndex(0));

    let mut group = c.benchmark_group("survivor-nav/astar");

    group.bench_function("grid64_maze_alloc", |b| {
        let astar = AStar::new(&grid, Manhattan::default());
        b.iter(|| {
            let path = astar.find_path(start, goal);
            black_box(path.len());
        })
    });

    group.bench_function("grid64_maze_into_reuse", |b| {
        let astar = AStar::new(&grid, Manhattan::default());
        let mut out = Vec::new();
        b.iter(|| {
            astar.find_path_into(start, goal, &mut out);
            black_box(out.len());
        })
    });

    let open = GridGraph::new(64, 64, 1.0)
        .with_connectivity(Connectivity::Eight)
        .with_edge_cost(EdgeCost::Distance);
    group.bench_function("grid64_open_path_points", |b| {
        b.iter(|| {
            let points = open.path_points(Vec2::new(0.5, 0.5), Vec2::new(63.5, 63.5));
            black_box(points.len());
        })
    });

    group.finish();
}

criterion_group!(benches, bench_astar);
criterion_main!(benches);
