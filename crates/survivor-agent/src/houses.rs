use serde::{Deserialize, Serialize};

use crate::facts::HouseInfo;

/// Houses the agent has already explored, remembered by truncated center.
///
/// The list is bounded: once it reaches its cap it is cleared and every house
/// becomes worth exploring again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExploredHouses {
    keys: Vec<(i32, i32)>,
    cap: usize,
}

impl ExploredHouses {
    pub fn new(cap: usize) -> Self {
        Self {
            keys: Vec::new(),
            cap,
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, house: &HouseInfo) -> bool {
        self.keys.contains(&house.key())
    }

    pub fn insert(&mut self, house: &HouseInfo) {
        if !self.contains(house) {
            self.keys.push(house.key());
        }
    }

    /// Clear the list when it has reached its cap. Returns whether it was cleared.
    pub fn clear_if_full(&mut self) -> bool {
        if self.keys.len() >= self.cap {
            self.keys.clear();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survivor_nav::Vec2;

    fn house(x: f32, y: f32) -> HouseInfo {
        HouseInfo {
            center: Vec2::new(x, y),
            size: Vec2::new(20.0, 20.0),
        }
    }

    #[test]
    fn houses_match_on_truncated_center() {
        let mut explored = ExploredHouses::new(6);
        explored.insert(&house(10.2, -4.9));
        assert!(explored.contains(&house(10.9, -4.1)));
        assert!(!explored.contains(&house(11.0, -4.0)));
    }

    #[test]
    fn cleared_once_cap_is_reached() {
        let mut explored = ExploredHouses::new(2);
        explored.insert(&house(0.0, 0.0));
        assert!(!explored.clear_if_full());
        explored.insert(&house(50.0, 0.0));
        assert!(explored.clear_if_full());
        assert!(explored.is_empty());
    }
}
