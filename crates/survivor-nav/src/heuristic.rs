//! Distance estimates used to order the A* open list.
//!
//! A heuristic receives the absolute per-axis distance between two node
//! positions. It must never overestimate the remaining cost, otherwise the
//! search still terminates but the path is no longer guaranteed cheapest.

pub trait Heuristic {
    fn estimate(&self, dx: f32, dy: f32) -> f32;
}

impl<F> Heuristic for F
where
    F: Fn(f32, f32) -> f32,
{
    fn estimate(&self, dx: f32, dy: f32) -> f32 {
        self(dx, dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Manhattan {
    pub weight: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Euclidean {
    pub weight: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chebyshev {
    pub weight: f32,
}

impl Default for Manhattan {
    fn default() -> Self {
        Self { weight: 1.0 }
    }
}

impl Default for Euclidean {
    fn default() -> Self {
        Self { weight: 1.0 }
    }
}

impl Default for Chebyshev {
    fn default() -> Self {
        Self { weight: 1.0 }
    }
}

impl Heuristic for Manhattan {
    fn estimate(&self, dx: f32, dy: f32) -> f32 {
        self.weight * (dx + dy)
    }
}

impl Heuristic for Euclidean {
    fn estimate(&self, dx: f32, dy: f32) -> f32 {
        self.weight * dx.hypot(dy)
    }
}

impl Heuristic for Chebyshev {
    fn estimate(&self, dx: f32, dy: f32) -> f32 {
        self.weight * dx.max(dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_heuristics_on_3_4() {
        assert_eq!(Manhattan::default().estimate(3.0, 4.0), 7.0);
        assert_eq!(Euclidean::default().estimate(3.0, 4.0), 5.0);
        assert_eq!(Chebyshev { weight: 2.0 }.estimate(3.0, 4.0), 8.0);
    }

    #[test]
    fn closures_are_heuristics() {
        let zero = |_: f32, _: f32| 0.0;
        assert_eq!(zero.estimate(10.0, 10.0), 0.0);
    }
}
