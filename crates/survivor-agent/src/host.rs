//! The contract a host simulation implements to drive the agent.

use survivor_core::{WorldMut, WorldView};
use survivor_nav::Vec2;

use crate::facts::{AgentState, EntityId, HouseInfo, ItemInfo, PerceivedEntity, WorldBounds};

/// Read side of the host: queries made during perception and guard evaluation.
pub trait AgentHost: WorldView {
    fn agent(&self) -> AgentState;

    fn world_bounds(&self) -> WorldBounds;

    fn inventory_capacity(&self) -> usize;

    /// Houses currently inside the agent's field of view.
    fn houses_in_fov(&self) -> Vec<HouseInfo>;

    /// Enemies, items and hazards currently inside the agent's field of view.
    fn entities_in_fov(&self) -> Vec<PerceivedEntity>;

    /// Next point to head for on the way to `target`, routing around obstacles.
    fn closest_path_point(&self, target: Vec2) -> Vec2;

    /// Contents of every inventory slot, in slot order.
    fn inventory_slots(&self) -> Vec<Option<ItemInfo>>;

    /// Remaining charge of the item in `slot`: ammo, energy or health.
    fn item_charge(&self, slot: usize) -> Option<i32>;
}

/// Side effects available to actions.
pub trait AgentHostMut: WorldMut + AgentHost {
    /// Try to pick up `entity`. Returns the item when it was in reach.
    ///
    /// Grabbing an entity that is already gone fails without side effects.
    fn grab(&mut self, entity: EntityId) -> Option<ItemInfo>;

    /// Place a grabbed item into an empty slot.
    fn add_item(&mut self, slot: usize, item: &ItemInfo) -> bool;

    /// Consume the item in `slot`; for a weapon this fires it once.
    fn use_item(&mut self, slot: usize) -> bool;

    /// Drop or destroy the item in `slot`.
    fn remove_item(&mut self, slot: usize) -> bool;
}
