//! Blackboard layout of the agent.
//!
//! Every key is created once by [`seed`]; afterwards perception and the
//! policy leaves only read and overwrite them.

use survivor_core::{BbKey, Blackboard, BlackboardError};
use survivor_nav::Vec2;
use survivor_steering::{SteeringKind, SteeringTarget};

use crate::config::DecisionConfig;
use crate::facts::{AgentState, EnemyInfo, HazardZone, HouseInfo, ItemInfo, ItemKind, WorldBounds};
use crate::houses::ExploredHouses;
use crate::inventory::Inventory;
use crate::waypoints::WaypointGrid;

// Per-tick perception.
pub const AGENT: BbKey<AgentState> = BbKey::new("agent");
pub const WORLD_BOUNDS: BbKey<WorldBounds> = BbKey::new("world_bounds");
pub const ENEMIES: BbKey<Vec<EnemyInfo>> = BbKey::new("enemies");
pub const ITEMS: BbKey<Vec<ItemInfo>> = BbKey::new("items");
pub const HAZARDS: BbKey<Vec<HazardZone>> = BbKey::new("hazards");
/// Houses in view that have not been explored yet.
pub const HOUSES: BbKey<Vec<HouseInfo>> = BbKey::new("houses");

// Decision output.
pub const BEHAVIOR: BbKey<SteeringKind> = BbKey::new("behavior");
pub const TARGET: BbKey<Option<SteeringTarget>> = BbKey::new("target");

// Persistent agent memory.
pub const EXPLORED_HOUSES: BbKey<ExploredHouses> = BbKey::new("explored_houses");
pub const INVENTORY: BbKey<Inventory> = BbKey::new("inventory");
pub const WAYPOINTS: BbKey<WaypointGrid> = BbKey::new("waypoints");

// Intra-tick and cross-tick flags.
/// Item kind the latest need guard asked for.
pub const WANTED_KIND: BbKey<Option<ItemKind>> = BbKey::new("wanted_kind");
pub const CLOSE_TO_BORDER: BbKey<bool> = BbKey::new("close_to_border");
pub const TURNING: BbKey<bool> = BbKey::new("turning");
/// Seconds of forced wandering left.
pub const WANDER_TIMER: BbKey<f32> = BbKey::new("wander_timer");
/// Seconds spent turning or inside a house.
pub const HOUSE_COOLDOWN: BbKey<f32> = BbKey::new("house_cooldown");
pub const OUTSIDE_POS: BbKey<Vec2> = BbKey::new("outside_pos");
pub const LEAVING_HOUSE: BbKey<bool> = BbKey::new("leaving_house");
pub const GOING_INSIDE: BbKey<bool> = BbKey::new("going_inside");

/// Create every key with its initial value.
pub fn seed(
    bb: &mut Blackboard,
    agent: AgentState,
    bounds: WorldBounds,
    inventory_capacity: usize,
    cfg: &DecisionConfig,
) -> Result<(), BlackboardError> {
    bb.add(AGENT, agent)?;
    bb.add(WORLD_BOUNDS, bounds)?;
    bb.add(ENEMIES, Vec::new())?;
    bb.add(ITEMS, Vec::new())?;
    bb.add(HAZARDS, Vec::new())?;
    bb.add(HOUSES, Vec::new())?;

    bb.add(BEHAVIOR, SteeringKind::Wander)?;
    bb.add(TARGET, None)?;

    bb.add(EXPLORED_HOUSES, ExploredHouses::new(cfg.explored_house_cap))?;
    bb.add(INVENTORY, Inventory::new(inventory_capacity))?;
    bb.add(WAYPOINTS, WaypointGrid::new(bounds, cfg.waypoint_cell_size))?;

    bb.add(WANTED_KIND, None)?;
    bb.add(CLOSE_TO_BORDER, false)?;
    bb.add(TURNING, false)?;
    bb.add(WANDER_TIMER, 0.0)?;
    bb.add(HOUSE_COOLDOWN, 0.0)?;
    bb.add(OUTSIDE_POS, Vec2::ZERO)?;
    bb.add(LEAVING_HOUSE, false)?;
    bb.add(GOING_INSIDE, false)?;
    Ok(())
}
