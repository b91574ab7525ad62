//! Guards. Some of them cache derived facts (a target, the wanted item kind,
//! a latched flag) for leaves evaluated after them in the same tick.

use survivor_core::{Blackboard, TickContext};
use survivor_nav::Vec2;
use survivor_steering::SteeringTarget;

use crate::config::DecisionConfig;
use crate::facts::{AgentState, ItemKind};
use crate::host::AgentHost;
use crate::keys;
use crate::policy::{enemy_by_priority, ray_hits_circle};

fn agent(bb: &Blackboard) -> Option<AgentState> {
    bb.get(keys::AGENT).ok().copied()
}

fn flag(bb: &Blackboard, key: survivor_core::BbKey<bool>) -> bool {
    bb.get(key).ok().copied().unwrap_or(false)
}

fn inventory_has(bb: &Blackboard, kind: ItemKind) -> bool {
    bb.get(keys::INVENTORY)
        .map(|inv| inv.contains_kind(kind))
        .unwrap_or(false)
}

pub fn has_garbage<H: AgentHost>(
    _cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &H,
    bb: &mut Blackboard,
) -> bool {
    inventory_has(bb, ItemKind::Garbage)
}

/// Also ends any bite-triggered turn: without a gun there is nothing to turn for.
pub fn has_gun<H: AgentHost>(
    _cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &H,
    bb: &mut Blackboard,
) -> bool {
    if inventory_has(bb, ItemKind::Pistol) {
        return true;
    }
    let _ = bb.change(keys::TURNING, false);
    false
}

/// The line of sight either passes through the priority enemy or ends on it.
pub fn is_aiming_at_enemy<H: AgentHost>(
    cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &H,
    bb: &mut Blackboard,
) -> bool {
    let (Some(agent), Ok(enemies)) = (agent(bb), bb.get(keys::ENEMIES)) else {
        return false;
    };
    let Some(enemy) = enemy_by_priority(agent.position, enemies) else {
        return false;
    };
    let heading = agent.heading();
    let sight_end = agent.position + heading * agent.fov_range;
    sight_end.distance_squared(enemy.location) < cfg.aim_tolerance_sq
        || ray_hits_circle(agent.position, heading, enemy.location, enemy.size)
}

pub fn is_in_danger<H: AgentHost>(
    cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &H,
    bb: &mut Blackboard,
) -> bool {
    let (Some(agent), Ok(enemies)) = (agent(bb), bb.get(keys::ENEMIES)) else {
        return false;
    };
    let radius_sq = cfg.danger_radius * cfg.danger_radius;
    enemies
        .iter()
        .any(|e| agent.position.distance_squared(e.location) <= radius_sq)
}

pub fn is_in_house<H: AgentHost>(
    _cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &H,
    bb: &mut Blackboard,
) -> bool {
    agent(bb).is_some_and(|a| a.is_in_house)
}

/// Near the closest hazard: caches its center as the target and starts the
/// forced-wander timer for after the escape.
pub fn is_close_to_hazard<H: AgentHost>(
    cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &H,
    bb: &mut Blackboard,
) -> bool {
    let (Some(agent), Ok(hazards)) = (agent(bb), bb.get(keys::HAZARDS)) else {
        return false;
    };
    let Some(zone) = hazards.iter().min_by(|a, b| {
        agent
            .position
            .distance_squared(a.center)
            .total_cmp(&agent.position.distance_squared(b.center))
    }) else {
        return false;
    };
    let alert = zone.radius + cfg.hazard_alert_distance;
    if agent.position.distance_squared(zone.center) >= alert * alert {
        return false;
    }
    let center = zone.center;
    let _ = bb.change(keys::TARGET, Some(SteeringTarget::at(center)));
    let _ = bb.change(keys::WANDER_TIMER, cfg.wander_duration);
    true
}

/// Latches the turning flag on a bite; it stays set until the turn cooldown
/// expires or the agent aims at an enemy.
pub fn is_bitten<H: AgentHost>(
    _cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &H,
    bb: &mut Blackboard,
) -> bool {
    if flag(bb, keys::TURNING) {
        return true;
    }
    match agent(bb) {
        Some(agent) if agent.was_bitten => bb.change(keys::TURNING, true).is_ok(),
        _ => false,
    }
}

/// On or past a world edge: caches a point one step back inside.
pub fn is_close_to_border<H: AgentHost>(
    cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &H,
    bb: &mut Blackboard,
) -> bool {
    if flag(bb, keys::CLOSE_TO_BORDER) {
        return true;
    }
    let (Some(agent), Ok(bounds)) = (agent(bb), bb.get(keys::WORLD_BOUNDS)) else {
        return false;
    };
    let (min, max) = (bounds.min(), bounds.max());
    let p = agent.position;
    let step = cfg.border_step;
    let inward = if p.x <= min.x {
        Vec2::new(step, 0.0)
    } else if p.x >= max.x {
        Vec2::new(-step, 0.0)
    } else if p.y <= min.y {
        Vec2::new(0.0, step)
    } else if p.y >= max.y {
        Vec2::new(0.0, -step)
    } else {
        return false;
    };
    let _ = bb.change(keys::TARGET, Some(SteeringTarget::at(p + inward)));
    let _ = bb.change(keys::CLOSE_TO_BORDER, true);
    true
}

pub fn is_hungry<H: AgentHost>(
    cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &H,
    bb: &mut Blackboard,
) -> bool {
    match agent(bb) {
        Some(agent) if agent.energy <= cfg.hunger_threshold => {
            bb.change(keys::WANTED_KIND, Some(ItemKind::Food)).is_ok()
        }
        _ => false,
    }
}

pub fn is_injured<H: AgentHost>(
    cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &H,
    bb: &mut Blackboard,
) -> bool {
    match agent(bb) {
        Some(agent) if agent.health <= cfg.injury_threshold => {
            bb.change(keys::WANTED_KIND, Some(ItemKind::Medkit)).is_ok()
        }
        _ => false,
    }
}

pub fn has_item_of_wanted_kind<H: AgentHost>(
    _cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &H,
    bb: &mut Blackboard,
) -> bool {
    match bb.get(keys::WANTED_KIND) {
        Ok(Some(kind)) => inventory_has(bb, *kind),
        _ => false,
    }
}

/// A free slot and something in view to put in it.
pub fn has_free_slot<H: AgentHost>(
    _cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &H,
    bb: &mut Blackboard,
) -> bool {
    let items_in_view = bb.get(keys::ITEMS).is_ok_and(|items| !items.is_empty());
    items_in_view
        && bb
            .get(keys::INVENTORY)
            .is_ok_and(|inv| inv.has_free_slot())
}

pub fn is_near_items<H: AgentHost>(
    _cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &H,
    bb: &mut Blackboard,
) -> bool {
    bb.get(keys::ITEMS).is_ok_and(|items| !items.is_empty())
}

pub fn is_item_of_wanted_kind_nearby<H: AgentHost>(
    _cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &H,
    bb: &mut Blackboard,
) -> bool {
    let (Ok(Some(kind)), Ok(items)) = (bb.get(keys::WANTED_KIND), bb.get(keys::ITEMS)) else {
        return false;
    };
    items.iter().any(|item| item.kind == *kind)
}

/// Clamps an expired timer to zero.
pub fn is_wander_active<H: AgentHost>(
    _cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &H,
    bb: &mut Blackboard,
) -> bool {
    let Ok(timer) = bb.get_mut(keys::WANDER_TIMER) else {
        return false;
    };
    if *timer <= 0.0 {
        *timer = 0.0;
        return false;
    }
    true
}

/// Back at the saved outside position after exploring a house; clears the
/// house-visit flags.
pub fn left_house<H: AgentHost>(
    cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &H,
    bb: &mut Blackboard,
) -> bool {
    let (Some(agent), Ok(outside)) = (agent(bb), bb.get(keys::OUTSIDE_POS)) else {
        return false;
    };
    let reached = agent.position.distance_squared(*outside) < cfg.outside_reached_distance_sq;
    if !(reached && flag(bb, keys::LEAVING_HOUSE)) {
        return false;
    }
    let _ = bb.change(keys::LEAVING_HOUSE, false);
    let _ = bb.change(keys::GOING_INSIDE, false);
    true
}

/// Already on the way out, or standing at the center of an unexplored house.
pub fn is_house_explored<H: AgentHost>(
    cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &H,
    bb: &mut Blackboard,
) -> bool {
    if flag(bb, keys::LEAVING_HOUSE) {
        return true;
    }
    let (Some(agent), Ok(houses)) = (agent(bb), bb.get(keys::HOUSES)) else {
        return false;
    };
    houses
        .iter()
        .any(|h| h.center.distance_squared(agent.position) < cfg.house_center_distance_sq)
}

pub fn is_near_house<H: AgentHost>(
    _cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &H,
    bb: &mut Blackboard,
) -> bool {
    bb.get(keys::HOUSES).is_ok_and(|houses| !houses.is_empty())
}

pub fn going_inside<H: AgentHost>(
    _cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &H,
    bb: &mut Blackboard,
) -> bool {
    flag(bb, keys::GOING_INSIDE)
}

/// Fires once the house cooldown runs out, and restarts it.
pub fn is_inside_for_a_while<H: AgentHost>(
    cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &H,
    bb: &mut Blackboard,
) -> bool {
    let Ok(cooldown) = bb.get_mut(keys::HOUSE_COOLDOWN) else {
        return false;
    };
    if *cooldown >= cfg.house_cooldown {
        *cooldown = 0.0;
        return true;
    }
    false
}

/// No target, or the target is within the arrival radius.
pub fn reached_target<H: AgentHost>(
    cfg: &DecisionConfig,
    _ctx: &TickContext,
    _host: &H,
    bb: &mut Blackboard,
) -> bool {
    let (Some(agent), Ok(target)) = (agent(bb), bb.get(keys::TARGET)) else {
        return false;
    };
    match target {
        None => true,
        Some(t) => agent.position.distance_squared(t.position) < cfg.arrival_distance_sq,
    }
}
