//! Actions. Each one either commits to a behavior (writing `behavior` and
//! usually `target`) or performs an inventory side effect through the host.

use survivor_bt::BtStatus;
use survivor_core::{Blackboard, TickContext};
use survivor_nav::Vec2;
use survivor_steering::{SteeringKind, SteeringTarget};
use tracing::{debug, info, warn};

use crate::config::DecisionConfig;
use crate::facts::{AgentState, ItemInfo, ItemKind};
use crate::host::AgentHostMut;
use crate::inventory::Inventory;
use crate::keys;
use crate::policy::{closest_item, closest_item_of_kind, enemy_by_priority};

fn agent(bb: &Blackboard) -> Option<AgentState> {
    bb.get(keys::AGENT).ok().copied()
}

/// Write the behavior and target; a failed write fails the action.
fn commit(bb: &mut Blackboard, kind: SteeringKind, target: Option<SteeringTarget>) -> BtStatus {
    let ok = bb.change(keys::BEHAVIOR, kind).is_ok() && bb.change(keys::TARGET, target).is_ok();
    BtStatus::from(ok)
}

/// Charge of `slot` as the host reports it, falling back to what was seen at pickup.
fn slot_charge<H: AgentHostMut>(host: &H, inventory: &Inventory, slot: usize) -> Option<i32> {
    host.item_charge(slot)
        .or_else(|| inventory.get(slot).map(|item| item.charge))
}

/// Consumables are only used when none of their charge would be wasted.
fn is_efficient_to_use(
    cfg: &DecisionConfig,
    agent: &AgentState,
    kind: ItemKind,
    charge: i32,
) -> bool {
    match kind {
        ItemKind::Food => charge as f32 + agent.energy <= cfg.stat_max,
        ItemKind::Medkit => charge as f32 + agent.health <= cfg.stat_max,
        ItemKind::Pistol => true,
        ItemKind::Garbage => false,
    }
}

fn drop_slot<H: AgentHostMut>(host: &mut H, inventory: &mut Inventory, slot: usize) {
    host.remove_item(slot);
    inventory.take(slot);
}

pub fn destroy_garbage<H: AgentHostMut>(
    _cfg: &DecisionConfig,
    _ctx: &TickContext,
    host: &mut H,
    bb: &mut Blackboard,
) -> BtStatus {
    let Ok(inventory) = bb.get_mut(keys::INVENTORY) else {
        return BtStatus::Failure;
    };
    for slot in inventory.slots_of_kind(ItemKind::Garbage) {
        drop_slot(host, inventory, slot);
    }
    BtStatus::Success
}

/// Fire the pistol with the least ammo left, dropping it once it is empty.
pub fn shoot<H: AgentHostMut>(
    _cfg: &DecisionConfig,
    _ctx: &TickContext,
    host: &mut H,
    bb: &mut Blackboard,
) -> BtStatus {
    let (Some(agent), Ok(enemies)) = (agent(bb), bb.get(keys::ENEMIES)) else {
        return BtStatus::Failure;
    };
    let has_target = enemy_by_priority(agent.position, enemies).is_some();
    if !has_target {
        return BtStatus::Failure;
    }
    let Ok(inventory) = bb.get_mut(keys::INVENTORY) else {
        return BtStatus::Failure;
    };
    let Some(slot) = inventory
        .slots_of_kind(ItemKind::Pistol)
        .into_iter()
        .min_by_key(|&slot| slot_charge(&*host, inventory, slot).unwrap_or(0))
    else {
        return BtStatus::Failure;
    };

    let fired = host.use_item(slot);
    let ammo = host.item_charge(slot).unwrap_or(0);
    inventory.set_charge(slot, ammo);
    if ammo <= 0 {
        debug!(slot, "pistol empty, dropping");
        drop_slot(host, inventory, slot);
    }
    if !fired {
        debug!(slot, "pistol did not fire");
        return BtStatus::Failure;
    }
    let _ = bb.change(keys::GOING_INSIDE, false);
    BtStatus::Success
}

pub fn aim_at_enemy<H: AgentHostMut>(
    _cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &mut H,
    bb: &mut Blackboard,
) -> BtStatus {
    let (Some(agent), Ok(enemies)) = (agent(bb), bb.get(keys::ENEMIES)) else {
        return BtStatus::Failure;
    };
    let Some(location) = enemy_by_priority(agent.position, enemies).map(|e| e.location) else {
        return BtStatus::Failure;
    };
    let _ = bb.change(keys::TURNING, false);
    commit(bb, SteeringKind::Face, Some(SteeringTarget::at(location)))
}

/// Head for the point just outside the nearest hazard, on the agent's side of it.
///
/// Expects the hazard center cached in `target` by the proximity guard.
pub fn escape_hazard<H: AgentHostMut>(
    cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &mut H,
    bb: &mut Blackboard,
) -> BtStatus {
    let (Some(agent), Ok(Some(target)), Ok(hazards)) = (
        agent(bb),
        bb.get(keys::TARGET),
        bb.get(keys::HAZARDS),
    ) else {
        return BtStatus::Failure;
    };
    let Some(zone) = hazards.iter().min_by(|a, b| {
        agent
            .position
            .distance_squared(a.center)
            .total_cmp(&agent.position.distance_squared(b.center))
    }) else {
        return BtStatus::Failure;
    };

    let mut away = (agent.position - target.position).normalize_or_zero();
    if away == Vec2::ZERO {
        away = agent.heading();
    }
    let exit = zone.center + away * (zone.radius + cfg.hazard_escape_margin);
    commit(bb, SteeringKind::Seek, Some(SteeringTarget::at(exit)))
}

/// Pivot toward the point behind the agent while moving to it.
pub fn turn_around<H: AgentHostMut>(
    cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &mut H,
    bb: &mut Blackboard,
) -> BtStatus {
    let Some(agent) = agent(bb) else {
        return BtStatus::Failure;
    };
    let behind = agent.position - agent.heading() * cfg.turn_distance;
    commit(bb, SteeringKind::FaceSeek, Some(SteeringTarget::at(behind)))
}

pub fn run_from_enemy<H: AgentHostMut>(
    _cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &mut H,
    bb: &mut Blackboard,
) -> BtStatus {
    let (Some(agent), Ok(enemies)) = (agent(bb), bb.get(keys::ENEMIES)) else {
        return BtStatus::Failure;
    };
    let Some(threat) = enemy_by_priority(agent.position, enemies)
        .map(|e| SteeringTarget::moving(e.location, e.linear_velocity))
    else {
        return BtStatus::Failure;
    };
    commit(bb, SteeringKind::Evade, Some(threat))
}

/// Seek the inward point cached by the border guard; once reached, clear the
/// border flag and fail so lower priorities run.
pub fn go_back<H: AgentHostMut>(
    cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &mut H,
    bb: &mut Blackboard,
) -> BtStatus {
    let Some(agent) = agent(bb) else {
        return BtStatus::Failure;
    };
    let arrived = match bb.get(keys::TARGET) {
        Ok(Some(t)) => agent.position.distance_squared(t.position) < cfg.arrival_distance_sq,
        _ => true,
    };
    if arrived {
        let _ = bb.change(keys::CLOSE_TO_BORDER, false);
        return BtStatus::Failure;
    }
    BtStatus::from(bb.change(keys::BEHAVIOR, SteeringKind::Seek).is_ok())
}

/// Consume the first item of the wanted kind that would not be wasted.
pub fn use_item_of_wanted_kind<H: AgentHostMut>(
    cfg: &DecisionConfig,
    _ctx: &TickContext,
    host: &mut H,
    bb: &mut Blackboard,
) -> BtStatus {
    let (Some(agent), Ok(Some(kind))) = (agent(bb), bb.get(keys::WANTED_KIND).copied()) else {
        return BtStatus::Failure;
    };
    let Ok(inventory) = bb.get_mut(keys::INVENTORY) else {
        return BtStatus::Failure;
    };
    for slot in inventory.slots_of_kind(kind) {
        let Some(charge) = slot_charge(&*host, inventory, slot) else {
            continue;
        };
        if !is_efficient_to_use(cfg, &agent, kind, charge) {
            continue;
        }
        if host.use_item(slot) {
            debug!(slot, ?kind, charge, "used item");
            // Consumables are spent in one use.
            drop_slot(host, inventory, slot);
            return BtStatus::Success;
        }
    }
    BtStatus::Failure
}

/// Grab `item` and store it in the first free slot the host accepts.
///
/// A slot the host refuses is skipped. If none accepts the item once it has
/// been taken from the world, it is reported as lost.
fn try_grab<H: AgentHostMut>(host: &mut H, bb: &mut Blackboard, item: &ItemInfo) {
    let Ok(inventory) = bb.get_mut(keys::INVENTORY) else {
        return;
    };
    let free: Vec<usize> = inventory.free_slots().collect();
    if free.is_empty() {
        return;
    }
    let Some(grabbed) = host.grab(item.entity) else {
        return;
    };
    for slot in free {
        if host.add_item(slot, &grabbed) {
            debug!(slot, kind = ?grabbed.kind, "picked up item");
            inventory.put(slot, grabbed);
            return;
        }
        warn!(slot, kind = ?grabbed.kind, "host refused inventory slot");
    }
    warn!(entity = grabbed.entity.0, kind = ?grabbed.kind, "grabbed item has no slot, lost");
}

/// Seek `item` and try to pick it up, unless the stock of its kind is full.
fn seek_and_grab<H: AgentHostMut>(
    cfg: &DecisionConfig,
    host: &mut H,
    bb: &mut Blackboard,
    item: ItemInfo,
) -> BtStatus {
    if commit(bb, SteeringKind::Seek, Some(SteeringTarget::at(item.location))) == BtStatus::Failure {
        return BtStatus::Failure;
    }
    let stocked = bb
        .get(keys::INVENTORY)
        .map(|inv| inv.count_of(item.kind))
        .unwrap_or(0);
    if !item.kind.is_weapon() && stocked >= cfg.stock_limit {
        return BtStatus::Failure;
    }
    try_grab(host, bb, &item);
    BtStatus::Success
}

pub fn get_item_of_wanted_kind<H: AgentHostMut>(
    cfg: &DecisionConfig,
    _ctx: &TickContext,
    host: &mut H,
    bb: &mut Blackboard,
) -> BtStatus {
    let (Some(agent), Ok(Some(kind)), Ok(items)) = (
        agent(bb),
        bb.get(keys::WANTED_KIND).copied(),
        bb.get(keys::ITEMS),
    ) else {
        return BtStatus::Failure;
    };
    let Some(item) = closest_item_of_kind(agent.position, items, kind).copied() else {
        return BtStatus::Failure;
    };
    seek_and_grab(cfg, host, bb, item)
}

pub fn get_item<H: AgentHostMut>(
    cfg: &DecisionConfig,
    _ctx: &TickContext,
    host: &mut H,
    bb: &mut Blackboard,
) -> BtStatus {
    let (Some(agent), Ok(items)) = (agent(bb), bb.get(keys::ITEMS)) else {
        return BtStatus::Failure;
    };
    let Some(item) = closest_item(agent.position, items).copied() else {
        return BtStatus::Failure;
    };
    seek_and_grab(cfg, host, bb, item)
}

pub fn change_to_wander<H: AgentHostMut>(
    _cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &mut H,
    bb: &mut Blackboard,
) -> BtStatus {
    BtStatus::from(bb.change(keys::BEHAVIOR, SteeringKind::Wander).is_ok())
}

/// Keep heading for the current target. Fails when there is none.
pub fn change_to_seek<H: AgentHostMut>(
    _cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &mut H,
    bb: &mut Blackboard,
) -> BtStatus {
    if !matches!(bb.get(keys::TARGET), Ok(Some(_))) {
        return BtStatus::Failure;
    }
    BtStatus::from(bb.change(keys::BEHAVIOR, SteeringKind::Seek).is_ok())
}

/// Mark the house explored (first tick only) and walk back to the saved
/// outside position.
pub fn leave_house<H: AgentHostMut>(
    _cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &mut H,
    bb: &mut Blackboard,
) -> BtStatus {
    let Ok(outside) = bb.get(keys::OUTSIDE_POS).copied() else {
        return BtStatus::Failure;
    };
    let leaving = bb.get(keys::LEAVING_HOUSE).copied().unwrap_or(false);
    if !leaving {
        let house = bb.get(keys::HOUSES).ok().and_then(|h| h.first().copied());
        if let (Some(house), Ok(explored)) = (house, bb.get_mut(keys::EXPLORED_HOUSES)) {
            explored.insert(&house);
        }
    }
    let _ = bb.change(keys::LEAVING_HOUSE, true);
    commit(bb, SteeringKind::Seek, Some(SteeringTarget::at(outside)))
}

/// Seek the center of the first house in view, remembering a point just
/// beyond its far wall to return to once it has been explored.
pub fn enter_house<H: AgentHostMut>(
    cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &mut H,
    bb: &mut Blackboard,
) -> BtStatus {
    let (Some(agent), Some(house)) = (
        agent(bb),
        bb.get(keys::HOUSES).ok().and_then(|h| h.first().copied()),
    ) else {
        return BtStatus::Failure;
    };

    let to_house = house.center - agent.position;
    let mut outside = house.center;
    let offset = house.size.y / 2.0 + cfg.house_exit_offset;
    if to_house.y < 0.0 {
        outside.y -= offset;
    } else if to_house.y > 0.0 {
        outside.y += offset;
    }

    if !bb.get(keys::GOING_INSIDE).copied().unwrap_or(false) {
        let _ = bb.change(keys::OUTSIDE_POS, outside);
    }
    let _ = bb.change(keys::GOING_INSIDE, true);
    commit(bb, SteeringKind::Seek, Some(SteeringTarget::at(house.center)))
}

pub fn escape_house<H: AgentHostMut>(
    cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &mut H,
    bb: &mut Blackboard,
) -> BtStatus {
    let Some(agent) = agent(bb) else {
        return BtStatus::Failure;
    };
    let exit = agent.position - Vec2::new(cfg.house_escape_step, 0.0);
    commit(bb, SteeringKind::Seek, Some(SteeringTarget::at(exit)))
}

/// Seek the nearest unvisited waypoint, marking it visited once close.
///
/// When at most one waypoint is left the grid starts over: every cell is
/// reset, the target cleared, and the action fails so the fallback runs.
pub fn follow_grid<H: AgentHostMut>(
    cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &mut H,
    bb: &mut Blackboard,
) -> BtStatus {
    let Some(agent) = agent(bb) else {
        return BtStatus::Failure;
    };
    let Ok(grid) = bb.get_mut(keys::WAYPOINTS) else {
        return BtStatus::Failure;
    };
    if grid.is_empty() {
        return BtStatus::Failure;
    }
    if grid.is_nearly_exhausted() {
        grid.reset();
        info!(cells = grid.len(), "waypoint grid explored, resetting");
        let _ = bb.change(keys::TARGET, None);
        return BtStatus::Failure;
    }
    let Some(index) = grid.nearest_unvisited(agent.position) else {
        return BtStatus::Failure;
    };
    let Some(position) = grid.get(index).map(|w| w.position) else {
        return BtStatus::Failure;
    };
    if agent.position.distance_squared(position) < cfg.waypoint_visit_distance_sq {
        grid.mark_visited(index);
    }
    commit(bb, SteeringKind::Seek, Some(SteeringTarget::at(position)))
}
