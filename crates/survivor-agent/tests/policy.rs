mod common;

use common::{item, MockHost};
use survivor_agent::policy::{actions, conditions};
use survivor_agent::{keys, AgentState, DecisionConfig, EnemyInfo, EnemyKind, EntityId, ItemKind};
use survivor_bt::BtStatus;
use survivor_core::{Blackboard, TickContext};
use survivor_nav::Vec2;
use survivor_steering::{SteeringKind, SteeringTarget};

fn setup(agent: AgentState) -> (DecisionConfig, MockHost, Blackboard) {
    let cfg = DecisionConfig::default();
    let mut host = MockHost::new();
    host.agent = agent;
    let mut bb = Blackboard::new();
    keys::seed(&mut bb, agent, host.bounds, host.slots.len(), &cfg).expect("seed");
    (cfg, host, bb)
}

fn ctx() -> TickContext {
    TickContext::new(0, 0.1, 0)
}

#[test]
fn guards_fail_on_a_bare_blackboard() {
    let cfg = DecisionConfig::default();
    let host = MockHost::new();
    let mut bb = Blackboard::new();
    assert!(!conditions::is_hungry(&cfg, &ctx(), &host, &mut bb));
    assert!(!conditions::has_gun(&cfg, &ctx(), &host, &mut bb));
    assert!(!conditions::reached_target(&cfg, &ctx(), &host, &mut bb));
    assert!(!conditions::is_wander_active(&cfg, &ctx(), &host, &mut bb));
}

#[test]
fn actions_fail_on_a_bare_blackboard() {
    let cfg = DecisionConfig::default();
    let mut host = MockHost::new();
    let mut bb = Blackboard::new();
    assert_eq!(
        actions::change_to_wander(&cfg, &ctx(), &mut host, &mut bb),
        BtStatus::Failure
    );
    assert_eq!(
        actions::follow_grid(&cfg, &ctx(), &mut host, &mut bb),
        BtStatus::Failure
    );
}

#[test]
fn border_guard_latches_until_go_back_arrives() {
    let agent = AgentState {
        position: Vec2::new(10.0, 100.0),
        ..AgentState::default()
    };
    let (cfg, mut host, mut bb) = setup(agent);

    assert!(conditions::is_close_to_border(&cfg, &ctx(), &host, &mut bb));
    assert_eq!(
        bb.get(keys::TARGET).copied(),
        Ok(Some(SteeringTarget::at(Vec2::new(10.0, 95.0))))
    );
    assert_eq!(
        actions::go_back(&cfg, &ctx(), &mut host, &mut bb),
        BtStatus::Success
    );

    // Back inside: the latch holds until go_back sees the agent arrive.
    bb.change(keys::AGENT, AgentState {
        position: Vec2::new(10.0, 96.0),
        ..agent
    })
    .expect("agent");
    assert!(conditions::is_close_to_border(&cfg, &ctx(), &host, &mut bb));
    assert_eq!(
        actions::go_back(&cfg, &ctx(), &mut host, &mut bb),
        BtStatus::Failure
    );
    assert_eq!(bb.get(keys::CLOSE_TO_BORDER).copied(), Ok(false));
    assert!(!conditions::is_close_to_border(&cfg, &ctx(), &host, &mut bb));
}

#[test]
fn need_guards_write_the_wanted_kind() {
    let agent = AgentState {
        energy: 2.0,
        health: 3.0,
        ..AgentState::default()
    };
    let (cfg, host, mut bb) = setup(agent);

    assert!(conditions::is_hungry(&cfg, &ctx(), &host, &mut bb));
    assert_eq!(bb.get(keys::WANTED_KIND).copied(), Ok(Some(ItemKind::Food)));
    assert!(conditions::is_injured(&cfg, &ctx(), &host, &mut bb));
    assert_eq!(bb.get(keys::WANTED_KIND).copied(), Ok(Some(ItemKind::Medkit)));
}

#[test]
fn thresholds_are_inclusive() {
    let cfg = DecisionConfig::default();
    let agent = AgentState {
        energy: cfg.hunger_threshold,
        health: cfg.injury_threshold + 0.5,
        ..AgentState::default()
    };
    let (cfg, host, mut bb) = setup(agent);
    assert!(conditions::is_hungry(&cfg, &ctx(), &host, &mut bb));
    assert!(!conditions::is_injured(&cfg, &ctx(), &host, &mut bb));
}

#[test]
fn has_gun_clears_turning_when_unarmed() {
    let (cfg, host, mut bb) = setup(AgentState::default());
    bb.change(keys::TURNING, true).expect("turning");

    assert!(!conditions::has_gun(&cfg, &ctx(), &host, &mut bb));
    assert_eq!(bb.get(keys::TURNING).copied(), Ok(false));
}

#[test]
fn bite_latches_turning() {
    let agent = AgentState {
        was_bitten: true,
        ..AgentState::default()
    };
    let (cfg, host, mut bb) = setup(agent);

    assert!(conditions::is_bitten(&cfg, &ctx(), &host, &mut bb));
    assert_eq!(bb.get(keys::TURNING).copied(), Ok(true));

    bb.change(keys::AGENT, AgentState::default()).expect("agent");
    assert!(conditions::is_bitten(&cfg, &ctx(), &host, &mut bb));
}

#[test]
fn aiming_counts_the_end_of_the_line_of_sight() {
    // Heading is -Y; the sight line ends at (0, -20).
    let (cfg, host, mut bb) = setup(AgentState::default());
    let enemy = EnemyInfo {
        entity: EntityId(1),
        kind: EnemyKind::Normal,
        location: Vec2::new(0.5, -20.0),
        linear_velocity: Vec2::ZERO,
        size: 0.1,
    };
    bb.change(keys::ENEMIES, vec![enemy]).expect("enemies");
    assert!(conditions::is_aiming_at_enemy(&cfg, &ctx(), &host, &mut bb));

    let behind = EnemyInfo {
        location: Vec2::new(0.0, 20.0),
        size: 3.0,
        ..enemy
    };
    bb.change(keys::ENEMIES, vec![behind]).expect("enemies");
    assert!(!conditions::is_aiming_at_enemy(&cfg, &ctx(), &host, &mut bb));
}

#[test]
fn expired_wander_timer_is_clamped() {
    let (cfg, host, mut bb) = setup(AgentState::default());
    bb.change(keys::WANDER_TIMER, -0.05).expect("timer");

    assert!(!conditions::is_wander_active(&cfg, &ctx(), &host, &mut bb));
    assert_eq!(bb.get(keys::WANDER_TIMER).copied(), Ok(0.0));
}

#[test]
fn change_to_seek_needs_a_target() {
    let (cfg, mut host, mut bb) = setup(AgentState::default());
    assert_eq!(
        actions::change_to_seek(&cfg, &ctx(), &mut host, &mut bb),
        BtStatus::Failure
    );

    bb.change(keys::TARGET, Some(SteeringTarget::at(Vec2::X)))
        .expect("target");
    assert_eq!(
        actions::change_to_seek(&cfg, &ctx(), &mut host, &mut bb),
        BtStatus::Success
    );
    assert_eq!(bb.get(keys::BEHAVIOR).copied(), Ok(SteeringKind::Seek));
}

#[test]
fn follow_grid_marks_waypoints_it_reaches() {
    let agent = AgentState {
        position: Vec2::new(-101.0, -51.0),
        ..AgentState::default()
    };
    let (cfg, mut host, mut bb) = setup(agent);

    assert_eq!(
        actions::follow_grid(&cfg, &ctx(), &mut host, &mut bb),
        BtStatus::Success
    );
    let grid = bb.get(keys::WAYPOINTS).expect("grid");
    assert_eq!(grid.visited_count(), 1);
    assert!(grid.get(0).is_some_and(|w| w.visited));
}

#[test]
fn medkit_is_used_only_when_it_fits() {
    let agent = AgentState {
        health: 6.0,
        ..AgentState::default()
    };
    let (cfg, mut host, mut bb) = setup(agent);
    let big = item(1, ItemKind::Medkit, 0.0, 0.0, 6);
    let small = item(2, ItemKind::Medkit, 0.0, 0.0, 4);
    for (slot, medkit) in [(0, big), (3, small)] {
        host.slots[slot] = Some(medkit);
        bb.get_mut(keys::INVENTORY)
            .expect("inventory")
            .put(slot, medkit);
    }
    bb.change(keys::WANTED_KIND, Some(ItemKind::Medkit))
        .expect("wanted");

    assert_eq!(
        actions::use_item_of_wanted_kind(&cfg, &ctx(), &mut host, &mut bb),
        BtStatus::Success
    );
    assert_eq!(host.used, vec![3]);
    assert_eq!(host.agent.health, 10.0);
    assert!(host.slots[0].is_some());
}

#[test]
fn explored_house_is_recorded_once() {
    let (cfg, mut host, mut bb) = setup(AgentState::default());
    let house = survivor_agent::HouseInfo {
        center: Vec2::new(3.0, 3.0),
        size: Vec2::new(8.0, 8.0),
    };
    bb.change(keys::HOUSES, vec![house]).expect("houses");

    for _ in 0..3 {
        assert_eq!(
            actions::leave_house(&cfg, &ctx(), &mut host, &mut bb),
            BtStatus::Success
        );
    }
    assert_eq!(bb.get(keys::EXPLORED_HOUSES).map(|e| e.len()), Ok(1));
    assert_eq!(bb.get(keys::LEAVING_HOUSE).copied(), Ok(true));
}

#[test]
fn grab_moves_on_when_the_host_refuses_a_slot() {
    let (cfg, mut host, mut bb) = setup(AgentState::default());
    host = host.with_item(4, ItemKind::Food, 1.0, 0.0, 2);
    host.refused = vec![0];
    bb.change(keys::ITEMS, vec![item(4, ItemKind::Food, 1.0, 0.0, 2)])
        .expect("items");

    assert_eq!(
        actions::get_item(&cfg, &ctx(), &mut host, &mut bb),
        BtStatus::Success
    );
    assert_eq!(host.slots[0], None);
    assert_eq!(host.slots[1].map(|i| i.entity), Some(EntityId(4)));
    let inventory = bb.get(keys::INVENTORY).expect("inventory");
    assert_eq!(inventory.get(0), None);
    assert_eq!(inventory.get(1).map(|i| i.entity), Some(EntityId(4)));
}

#[test]
fn shoot_fails_when_the_pistol_does_not_fire() {
    let (cfg, mut host, mut bb) = setup(AgentState::default());
    bb.change(
        keys::ENEMIES,
        vec![EnemyInfo {
            entity: EntityId(9),
            kind: EnemyKind::Normal,
            location: Vec2::new(0.0, -5.0),
            linear_velocity: Vec2::ZERO,
            size: 1.0,
        }],
    )
    .expect("enemies");
    // Believed held, but the host slot is empty.
    bb.get_mut(keys::INVENTORY)
        .expect("inventory")
        .put(0, item(3, ItemKind::Pistol, 0.0, 0.0, 2));

    assert_eq!(
        actions::shoot(&cfg, &ctx(), &mut host, &mut bb),
        BtStatus::Failure
    );
    assert!(host.used.is_empty());
    let inventory = bb.get(keys::INVENTORY).expect("inventory");
    assert!(!inventory.contains_kind(ItemKind::Pistol));
}
