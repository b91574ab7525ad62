//! Pulls the host's view of the world into the blackboard, once per tick.

use survivor_core::{Blackboard, BlackboardError, TickContext};
use tracing::{debug, info};

use crate::config::DecisionConfig;
use crate::facts::{HazardZone, HouseInfo, PerceivedEntity};
use crate::host::AgentHost;
use crate::keys;

pub fn perceive<H>(
    cfg: &DecisionConfig,
    ctx: &TickContext,
    host: &H,
    bb: &mut Blackboard,
) -> Result<(), BlackboardError>
where
    H: AgentHost + ?Sized,
{
    let agent = host.agent();
    step_timers(cfg, ctx, agent.is_in_house, bb)?;
    bb.change(keys::AGENT, agent)?;

    if bb.get_mut(keys::INVENTORY)?.sync(host.inventory_slots()) {
        debug!("inventory refreshed from host");
    }

    let explored = bb.get_mut(keys::EXPLORED_HOUSES)?;
    if explored.clear_if_full() {
        info!("explored house list full, clearing");
    }
    let houses: Vec<HouseInfo> = host
        .houses_in_fov()
        .into_iter()
        .filter(|house| !explored.contains(house))
        .collect();
    bb.change(keys::HOUSES, houses)?;

    let mut enemies = Vec::new();
    let mut items = Vec::new();
    let mut hazards = Vec::new();
    for entity in host.entities_in_fov() {
        match entity {
            PerceivedEntity::Enemy(enemy) => enemies.push(enemy),
            PerceivedEntity::Item(item) => items.push(item),
            PerceivedEntity::Hazard(zone) => hazards.push(HazardZone {
                radius: zone.radius + cfg.hazard_margin,
                ..zone
            }),
        }
    }
    bb.change(keys::ENEMIES, enemies)?;
    bb.change(keys::ITEMS, items)?;
    bb.change(keys::HAZARDS, hazards)?;

    bb.change(keys::WORLD_BOUNDS, host.world_bounds())?;
    Ok(())
}

/// Advance the cooldowns and the forced-wander timer by one tick.
///
/// The house cooldown runs while the agent is turning or inside a house and
/// drops back to zero otherwise. A bite-triggered turn ends once the cooldown
/// reaches `turn_cooldown`.
fn step_timers(
    cfg: &DecisionConfig,
    ctx: &TickContext,
    in_house: bool,
    bb: &mut Blackboard,
) -> Result<(), BlackboardError> {
    let dt = ctx.dt_seconds;
    let turning = *bb.get(keys::TURNING)?;

    let cooldown = bb.get_mut(keys::HOUSE_COOLDOWN)?;
    if turning || in_house {
        *cooldown += dt;
    } else {
        *cooldown = 0.0;
    }
    if turning && *cooldown >= cfg.turn_cooldown {
        *cooldown = 0.0;
        bb.change(keys::TURNING, false)?;
    }

    let timer = bb.get_mut(keys::WANDER_TIMER)?;
    if *timer > f32::EPSILON {
        *timer -= dt;
    }
    Ok(())
}
