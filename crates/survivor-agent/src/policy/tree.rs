use std::rc::Rc;

use survivor_bt::{
    Action, BehaviorTree, BtError, BtNode, BtStatus, Condition, DefaultAction, Selector, Sequence,
};
use survivor_core::{Blackboard, TickContext};
use tracing::warn;

use crate::config::DecisionConfig;
use crate::host::AgentHostMut;
use crate::keys::*;
use crate::policy::actions as act;
use crate::policy::conditions as cond;

type GuardFn<H> = fn(&DecisionConfig, &TickContext, &H, &mut Blackboard) -> bool;
type ActionFn<H> = fn(&DecisionConfig, &TickContext, &mut H, &mut Blackboard) -> BtStatus;

fn guard<H>(
    cfg: &Rc<DecisionConfig>,
    name: &'static str,
    f: GuardFn<H>,
    reads: &[&'static str],
    writes: &[&'static str],
) -> Box<dyn BtNode<H>>
where
    H: AgentHostMut + 'static,
{
    let cfg = Rc::clone(cfg);
    Box::new(
        Condition::new(name, move |ctx: &TickContext, host: &H, bb: &mut Blackboard| {
            f(&cfg, ctx, host, bb)
        })
        .reads(reads)
        .writes(writes),
    )
}

fn action<H>(
    cfg: &Rc<DecisionConfig>,
    name: &'static str,
    f: ActionFn<H>,
    reads: &[&'static str],
    writes: &[&'static str],
) -> Box<dyn BtNode<H>>
where
    H: AgentHostMut + 'static,
{
    let cfg = Rc::clone(cfg);
    Box::new(
        Action::new(name, move |ctx: &TickContext, host: &mut H, bb: &mut Blackboard| {
            f(&cfg, ctx, host, bb)
        })
        .reads(reads)
        .writes(writes),
    )
}

fn fallback<H>(
    cfg: &Rc<DecisionConfig>,
    name: &'static str,
    f: ActionFn<H>,
    writes: &[&'static str],
) -> Box<dyn BtNode<H>>
where
    H: AgentHostMut + 'static,
{
    let cfg = Rc::clone(cfg);
    Box::new(
        DefaultAction::new(name, move |ctx: &TickContext, host: &mut H, bb: &mut Blackboard| {
            if f(&cfg, ctx, host, bb) == BtStatus::Failure {
                warn!(leaf = name, "fallback failed, behavior left unchanged");
            }
        })
        .writes(writes),
    )
}

fn seq<H>(children: Vec<Box<dyn BtNode<H>>>) -> Box<dyn BtNode<H>>
where
    H: AgentHostMut + 'static,
{
    Box::new(Sequence::new(children))
}

fn sel<H>(children: Vec<Box<dyn BtNode<H>>>) -> Box<dyn BtNode<H>>
where
    H: AgentHostMut + 'static,
{
    Box::new(Selector::new(children))
}

/// Build the agent's prioritized tree.
///
/// Root children, highest priority first: drop garbage, shoot, aim, escape
/// hazards, turn when bitten, run from enemies, step back from the border,
/// use consumables, pick up items, forced wander, house exploration, grid
/// exploration, keep seeking, and finally wander.
pub fn build_tree<H>(cfg: Rc<DecisionConfig>) -> Result<BehaviorTree<H>, BtError>
where
    H: AgentHostMut + 'static,
{
    let c = &cfg;

    let agent = AGENT.name();
    let behavior = BEHAVIOR.name();
    let target = TARGET.name();
    let enemies = ENEMIES.name();
    let items = ITEMS.name();
    let hazards = HAZARDS.name();
    let houses = HOUSES.name();
    let inventory = INVENTORY.name();
    let wanted = WANTED_KIND.name();
    let turning = TURNING.name();
    let going_inside = GOING_INSIDE.name();
    let leaving = LEAVING_HOUSE.name();
    let outside = OUTSIDE_POS.name();

    let has_gun = || guard(c, "has_gun", cond::has_gun, &[inventory], &[turning]);
    let is_hungry = || guard(c, "is_hungry", cond::is_hungry, &[agent], &[wanted]);
    let is_injured = || guard(c, "is_injured", cond::is_injured, &[agent], &[wanted]);
    let has_free_slot = || {
        guard(c, "has_free_slot", cond::has_free_slot, &[items, inventory], &[])
    };
    let is_near_items = || guard(c, "is_near_items", cond::is_near_items, &[items], &[]);
    let is_close_to_hazard = || {
        guard(
            c,
            "is_close_to_hazard",
            cond::is_close_to_hazard,
            &[agent, hazards],
            &[target, WANDER_TIMER.name()],
        )
    };
    let escape_hazard = || {
        action(
            c,
            "escape_hazard",
            act::escape_hazard,
            &[agent, target, hazards],
            &[behavior, target],
        )
    };
    let use_wanted = || {
        action(
            c,
            "use_item_of_wanted_kind",
            act::use_item_of_wanted_kind,
            &[agent, wanted, inventory],
            &[inventory],
        )
    };
    let has_wanted = || {
        guard(
            c,
            "has_item_of_wanted_kind",
            cond::has_item_of_wanted_kind,
            &[wanted, inventory],
            &[],
        )
    };
    let wanted_nearby = || {
        guard(
            c,
            "is_item_of_wanted_kind_nearby",
            cond::is_item_of_wanted_kind_nearby,
            &[wanted, items],
            &[],
        )
    };
    let get_wanted = || {
        action(
            c,
            "get_item_of_wanted_kind",
            act::get_item_of_wanted_kind,
            &[agent, wanted, items, inventory],
            &[behavior, target, inventory],
        )
    };
    let change_to_wander =
        || action(c, "change_to_wander", act::change_to_wander, &[], &[behavior]);
    let is_in_house = || guard(c, "is_in_house", cond::is_in_house, &[agent], &[]);

    let root: Selector<H> = Selector::new(vec![
        seq(vec![
            guard(c, "has_garbage", cond::has_garbage, &[inventory], &[]),
            action(
                c,
                "destroy_garbage",
                act::destroy_garbage,
                &[inventory],
                &[inventory],
            ),
        ]),
        seq(vec![
            has_gun(),
            guard(
                c,
                "is_aiming_at_enemy",
                cond::is_aiming_at_enemy,
                &[agent, enemies],
                &[],
            ),
            action(
                c,
                "shoot",
                act::shoot,
                &[agent, enemies, inventory],
                &[inventory, going_inside],
            ),
        ]),
        seq(vec![
            has_gun(),
            guard(c, "is_in_danger", cond::is_in_danger, &[agent, enemies], &[]),
            action(
                c,
                "aim_at_enemy",
                act::aim_at_enemy,
                &[agent, enemies],
                &[turning, behavior, target],
            ),
        ]),
        sel(vec![
            seq(vec![is_in_house(), is_close_to_hazard(), escape_hazard()]),
            seq(vec![is_close_to_hazard(), escape_hazard()]),
        ]),
        seq(vec![
            has_gun(),
            guard(c, "is_bitten", cond::is_bitten, &[agent, turning], &[turning]),
            action(c, "turn_around", act::turn_around, &[agent], &[behavior, target]),
        ]),
        seq(vec![
            guard(c, "is_in_danger", cond::is_in_danger, &[agent, enemies], &[]),
            action(
                c,
                "run_from_enemy",
                act::run_from_enemy,
                &[agent, enemies],
                &[behavior, target],
            ),
        ]),
        seq(vec![
            guard(
                c,
                "is_close_to_border",
                cond::is_close_to_border,
                &[agent, WORLD_BOUNDS.name(), CLOSE_TO_BORDER.name()],
                &[target, CLOSE_TO_BORDER.name()],
            ),
            action(
                c,
                "go_back",
                act::go_back,
                &[agent, target],
                &[behavior, CLOSE_TO_BORDER.name()],
            ),
        ]),
        sel(vec![
            seq(vec![is_hungry(), has_wanted(), use_wanted()]),
            seq(vec![is_injured(), has_wanted(), use_wanted()]),
        ]),
        sel(vec![
            seq(vec![
                has_free_slot(),
                is_near_items(),
                is_hungry(),
                wanted_nearby(),
                get_wanted(),
            ]),
            seq(vec![
                has_free_slot(),
                is_near_items(),
                is_injured(),
                wanted_nearby(),
                get_wanted(),
            ]),
            seq(vec![
                has_free_slot(),
                is_near_items(),
                action(
                    c,
                    "get_item",
                    act::get_item,
                    &[agent, items, inventory],
                    &[behavior, target, inventory],
                ),
            ]),
        ]),
        seq(vec![
            guard(
                c,
                "is_wander_active",
                cond::is_wander_active,
                &[WANDER_TIMER.name()],
                &[WANDER_TIMER.name()],
            ),
            change_to_wander(),
        ]),
        sel(vec![
            seq(vec![
                guard(
                    c,
                    "left_house",
                    cond::left_house,
                    &[agent, outside, leaving],
                    &[leaving, going_inside],
                ),
                change_to_wander(),
            ]),
            seq(vec![
                guard(
                    c,
                    "is_house_explored",
                    cond::is_house_explored,
                    &[agent, houses, leaving],
                    &[],
                ),
                action(
                    c,
                    "leave_house",
                    act::leave_house,
                    &[outside, houses, leaving, EXPLORED_HOUSES.name()],
                    &[EXPLORED_HOUSES.name(), leaving, behavior, target],
                ),
            ]),
            seq(vec![
                guard(c, "is_near_house", cond::is_near_house, &[houses], &[]),
                action(
                    c,
                    "enter_house",
                    act::enter_house,
                    &[agent, houses, going_inside],
                    &[outside, going_inside, behavior, target],
                ),
            ]),
            seq(vec![
                guard(c, "going_inside", cond::going_inside, &[going_inside], &[]),
                action(c, "change_to_seek", act::change_to_seek, &[target], &[behavior]),
            ]),
            seq(vec![
                is_in_house(),
                guard(
                    c,
                    "is_inside_for_a_while",
                    cond::is_inside_for_a_while,
                    &[HOUSE_COOLDOWN.name()],
                    &[HOUSE_COOLDOWN.name()],
                ),
                action(c, "escape_house", act::escape_house, &[agent], &[behavior, target]),
            ]),
        ]),
        seq(vec![
            guard(
                c,
                "reached_target",
                cond::reached_target,
                &[agent, target],
                &[],
            ),
            action(
                c,
                "follow_grid",
                act::follow_grid,
                &[agent, WAYPOINTS.name()],
                &[WAYPOINTS.name(), behavior, target],
            ),
        ]),
        action(c, "change_to_seek", act::change_to_seek, &[target], &[behavior]),
        fallback(c, "change_to_wander", act::change_to_wander, &[behavior]),
    ]);

    BehaviorTree::new(root)
}
