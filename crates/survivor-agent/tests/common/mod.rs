#![allow(dead_code)]

use survivor_agent::{
    AgentHost, AgentHostMut, AgentState, EnemyInfo, EnemyKind, EntityId, HazardZone, HouseInfo,
    ItemInfo, ItemKind, PerceivedEntity, WorldBounds,
};
use survivor_core::{WorldMut, WorldView};
use survivor_nav::Vec2;

/// Scripted host: everything in `entities` is in view, and grabbing works
/// within `grab_range` of the agent.
pub struct MockHost {
    pub agent: AgentState,
    pub bounds: WorldBounds,
    pub houses: Vec<HouseInfo>,
    pub entities: Vec<PerceivedEntity>,
    pub slots: Vec<Option<ItemInfo>>,
    pub grab_range: f32,
    pub used: Vec<usize>,
    pub removed: Vec<usize>,
    /// Slots `add_item` rejects even when empty.
    pub refused: Vec<usize>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            agent: AgentState::default(),
            bounds: WorldBounds::new(Vec2::ZERO, Vec2::new(300.0, 200.0)),
            houses: Vec::new(),
            entities: Vec::new(),
            slots: vec![None; 5],
            grab_range: 2.0,
            used: Vec::new(),
            removed: Vec::new(),
            refused: Vec::new(),
        }
    }

    pub fn with_item(mut self, id: u64, kind: ItemKind, x: f32, y: f32, charge: i32) -> Self {
        self.entities.push(PerceivedEntity::Item(item(id, kind, x, y, charge)));
        self
    }

    pub fn with_enemy(mut self, id: u64, kind: EnemyKind, x: f32, y: f32) -> Self {
        self.entities.push(PerceivedEntity::Enemy(EnemyInfo {
            entity: EntityId(id),
            kind,
            location: Vec2::new(x, y),
            linear_velocity: Vec2::ZERO,
            size: 1.0,
        }));
        self
    }

    pub fn with_hazard(mut self, id: u64, x: f32, y: f32, radius: f32) -> Self {
        self.entities.push(PerceivedEntity::Hazard(HazardZone {
            entity: EntityId(id),
            center: Vec2::new(x, y),
            radius,
        }));
        self
    }

    pub fn items_in_view(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| matches!(e, PerceivedEntity::Item(_)))
            .count()
    }
}

pub fn item(id: u64, kind: ItemKind, x: f32, y: f32, charge: i32) -> ItemInfo {
    ItemInfo {
        entity: EntityId(id),
        kind,
        location: Vec2::new(x, y),
        charge,
    }
}

impl WorldView for MockHost {}

impl WorldMut for MockHost {}

impl AgentHost for MockHost {
    fn agent(&self) -> AgentState {
        self.agent
    }

    fn world_bounds(&self) -> WorldBounds {
        self.bounds
    }

    fn inventory_capacity(&self) -> usize {
        self.slots.len()
    }

    fn houses_in_fov(&self) -> Vec<HouseInfo> {
        self.houses.clone()
    }

    fn entities_in_fov(&self) -> Vec<PerceivedEntity> {
        self.entities.clone()
    }

    fn closest_path_point(&self, target: Vec2) -> Vec2 {
        target
    }

    fn inventory_slots(&self) -> Vec<Option<ItemInfo>> {
        self.slots.clone()
    }

    fn item_charge(&self, slot: usize) -> Option<i32> {
        self.slots.get(slot).copied().flatten().map(|i| i.charge)
    }
}

impl AgentHostMut for MockHost {
    fn grab(&mut self, entity: EntityId) -> Option<ItemInfo> {
        let index = self.entities.iter().position(|e| match e {
            PerceivedEntity::Item(i) => {
                i.entity == entity
                    && i.location.distance(self.agent.position) <= self.grab_range
            }
            _ => false,
        })?;
        match self.entities.remove(index) {
            PerceivedEntity::Item(item) => Some(item),
            _ => None,
        }
    }

    fn add_item(&mut self, slot: usize, item: &ItemInfo) -> bool {
        if self.refused.contains(&slot) {
            return false;
        }
        match self.slots.get_mut(slot) {
            Some(entry @ None) => {
                *entry = Some(*item);
                true
            }
            _ => false,
        }
    }

    fn use_item(&mut self, slot: usize) -> bool {
        let Some(Some(item)) = self.slots.get_mut(slot) else {
            return false;
        };
        self.used.push(slot);
        match item.kind {
            ItemKind::Pistol => item.charge -= 1,
            ItemKind::Food => self.agent.energy += item.charge as f32,
            ItemKind::Medkit => self.agent.health += item.charge as f32,
            ItemKind::Garbage => {}
        }
        true
    }

    fn remove_item(&mut self, slot: usize) -> bool {
        match self.slots.get_mut(slot) {
            Some(entry @ Some(_)) => {
                *entry = None;
                self.removed.push(slot);
                true
            }
            _ => false,
        }
    }
}
