mod common;

use std::rc::Rc;

use common::MockHost;
use survivor_agent::policy::build_tree;
use survivor_agent::{keys, DecisionConfig, DecisionCore};
use survivor_bt::{BtStatus, LeafKind};
use survivor_core::{Blackboard, TickContext};

fn contracts() -> (DecisionCore<MockHost>, Vec<survivor_bt::LeafContract>) {
    let host = MockHost::new();
    let core = DecisionCore::new(&host, DecisionConfig::default()).expect("default tree is valid");
    let contracts = core.contracts();
    (core, contracts)
}

#[test]
fn every_declared_key_is_seeded() {
    let (core, contracts) = contracts();
    for leaf in &contracts {
        for key in leaf.reads.iter().chain(&leaf.writes) {
            assert!(
                core.blackboard().contains_name(key),
                "{} declares unknown key {key}",
                leaf.name
            );
        }
    }
}

#[test]
fn cached_facts_are_written_before_they_are_read() {
    let (_, contracts) = contracts();
    for cached in [keys::WANTED_KIND.name(), keys::TARGET.name()] {
        let first_write = contracts
            .iter()
            .position(|leaf| leaf.writes.contains(&cached))
            .expect("someone writes the key");
        let first_read = contracts
            .iter()
            .position(|leaf| leaf.reads.contains(&cached))
            .expect("someone reads the key");
        assert!(
            first_write < first_read,
            "{cached} is read by {} before any leaf writes it",
            contracts[first_read].name
        );
    }
}

#[test]
fn tree_ends_in_the_wander_fallback() {
    let (_, contracts) = contracts();
    let last = contracts.last().expect("tree has leaves");
    assert_eq!(last.kind, LeafKind::Default);
    assert_eq!(last.name, "change_to_wander");
    assert_eq!(
        contracts.iter().filter(|c| c.kind == LeafKind::Default).count(),
        1
    );
}

#[test]
fn root_priority_order_is_preserved() {
    let (_, contracts) = contracts();
    let position = |name: &str| {
        contracts
            .iter()
            .position(|c| c.name == name)
            .unwrap_or_else(|| panic!("missing leaf {name}"))
    };
    let order = [
        "destroy_garbage",
        "shoot",
        "aim_at_enemy",
        "escape_hazard",
        "turn_around",
        "run_from_enemy",
        "go_back",
        "use_item_of_wanted_kind",
        "get_item_of_wanted_kind",
        "get_item",
        "leave_house",
        "enter_house",
        "escape_house",
        "follow_grid",
    ];
    for pair in order.windows(2) {
        assert!(
            position(pair[0]) < position(pair[1]),
            "{} must come before {}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn failing_fallback_still_ends_the_tick() {
    let mut host = MockHost::new();
    let mut tree = build_tree::<MockHost>(Rc::new(DecisionConfig::default())).expect("tree");
    // Nothing seeded: every guard fails and the wander fallback cannot write.
    let mut bb = Blackboard::new();

    let status = tree.tick(&TickContext::new(0, 0.1, 1), &mut host, &mut bb);

    assert_eq!(status, BtStatus::Success);
    assert!(!bb.contains_name(keys::BEHAVIOR.name()));
    assert!(host.used.is_empty() && host.removed.is_empty());
}
