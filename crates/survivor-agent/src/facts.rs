//! Value types describing what the agent perceives in one tick.

use serde::{Deserialize, Serialize};
use survivor_nav::Vec2;
use survivor_steering::AgentKinematics;

/// Host-assigned identity of a world entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct EntityId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub position: Vec2,
    /// Radians. An orientation of zero faces -Y.
    pub orientation: f32,
    pub linear_velocity: Vec2,
    pub max_linear_speed: f32,
    pub max_angular_speed: f32,
    pub health: f32,
    pub energy: f32,
    pub stamina: f32,
    pub fov_range: f32,
    pub was_bitten: bool,
    pub is_in_house: bool,
}

impl Default for AgentState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            orientation: 0.0,
            linear_velocity: Vec2::ZERO,
            max_linear_speed: 5.0,
            max_angular_speed: 1.0,
            health: 10.0,
            energy: 10.0,
            stamina: 10.0,
            fov_range: 20.0,
            was_bitten: false,
            is_in_house: false,
        }
    }
}

impl AgentState {
    pub fn kinematics(&self) -> AgentKinematics {
        AgentKinematics {
            position: self.position,
            orientation: self.orientation,
            linear_velocity: self.linear_velocity,
            max_linear_speed: self.max_linear_speed,
            max_angular_speed: self.max_angular_speed,
        }
    }

    pub fn heading(&self) -> Vec2 {
        self.kinematics().heading()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Normal,
    /// Fast movers; always handled before other kinds.
    Runner,
    Heavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyInfo {
    pub entity: EntityId,
    pub kind: EnemyKind,
    pub location: Vec2,
    pub linear_velocity: Vec2,
    /// Collision radius.
    pub size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Pistol,
    Food,
    Medkit,
    Garbage,
}

impl ItemKind {
    pub fn is_weapon(self) -> bool {
        matches!(self, ItemKind::Pistol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemInfo {
    pub entity: EntityId,
    pub kind: ItemKind,
    pub location: Vec2,
    /// Ammo for weapons, energy for food, health for medkits.
    pub charge: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseInfo {
    pub center: Vec2,
    pub size: Vec2,
}

impl HouseInfo {
    /// Identity used to remember explored houses: the center, truncated.
    pub fn key(&self) -> (i32, i32) {
        (self.center.x as i32, self.center.y as i32)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        let half = self.size / 2.0;
        (p.x - self.center.x).abs() <= half.x && (p.y - self.center.y).abs() <= half.y
    }
}

/// A circular area the agent must stay out of.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardZone {
    pub entity: EntityId,
    pub center: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub center: Vec2,
    pub dimensions: Vec2,
}

impl WorldBounds {
    pub fn new(center: Vec2, dimensions: Vec2) -> Self {
        Self { center, dimensions }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.dimensions / 2.0
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.dimensions / 2.0
    }

    /// Strictly inside; points on the edge count as outside.
    pub fn contains(&self, p: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        p.x > min.x && p.x < max.x && p.y > min.y && p.y < max.y
    }
}

/// One entity reported by the host's field-of-view query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PerceivedEntity {
    Enemy(EnemyInfo),
    Item(ItemInfo),
    Hazard(HazardZone),
}
