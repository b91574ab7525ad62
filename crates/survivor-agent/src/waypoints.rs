use serde::{Deserialize, Serialize};
use survivor_nav::Vec2;

use tracing::warn;

use crate::facts::WorldBounds;

/// Upper bound on grid size; anything larger yields an empty grid.
pub const MAX_WAYPOINTS: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub visited: bool,
    pub position: Vec2,
}

/// Exploration grid: one waypoint at the center of every cell covering the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointGrid {
    cells: Vec<Waypoint>,
    cols: usize,
    rows: usize,
}

impl WaypointGrid {
    fn empty() -> Self {
        Self {
            cells: Vec::new(),
            cols: 0,
            rows: 0,
        }
    }

    /// Partial cells at the far edges are dropped. A grid that would exceed
    /// [`MAX_WAYPOINTS`] cells comes out empty.
    pub fn new(bounds: WorldBounds, cell_size: f32) -> Self {
        if cell_size <= 0.0 || !bounds.dimensions.is_finite() {
            return Self::empty();
        }
        let cols = (bounds.dimensions.x / cell_size).max(0.0) as usize;
        let rows = (bounds.dimensions.y / cell_size).max(0.0) as usize;
        let Some(count) = cols.checked_mul(rows).filter(|&n| n <= MAX_WAYPOINTS) else {
            warn!(cols, rows, cell_size, "waypoint grid too large, exploring without one");
            return Self::empty();
        };
        let min = bounds.min();

        let mut cells = Vec::with_capacity(count);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Waypoint {
                    visited: false,
                    position: Vec2::new(
                        min.x + cell_size * col as f32 + cell_size / 2.0,
                        min.y + cell_size * row as f32 + cell_size / 2.0,
                    ),
                });
            }
        }
        Self { cells, cols, rows }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.cells.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Waypoint> + '_ {
        self.cells.iter()
    }

    pub fn visited_count(&self) -> usize {
        self.iter().filter(|w| w.visited).count()
    }

    /// Closest unvisited waypoint to `from`; the lower index wins a tie.
    pub fn nearest_unvisited(&self, from: Vec2) -> Option<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, w)| !w.visited)
            .min_by(|(ia, a), (ib, b)| {
                from.distance_squared(a.position)
                    .total_cmp(&from.distance_squared(b.position))
                    .then(ia.cmp(ib))
            })
            .map(|(i, _)| i)
    }

    pub fn mark_visited(&mut self, index: usize) {
        if let Some(cell) = self.cells.get_mut(index) {
            cell.visited = true;
        }
    }

    /// At most one waypoint left to visit.
    pub fn is_nearly_exhausted(&self) -> bool {
        self.visited_count() >= self.cells.len().saturating_sub(1)
    }

    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.visited = false;
        }
    }
}
