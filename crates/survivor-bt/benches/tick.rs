use criterion::{black_box, criterion_group, criterion_main, Criterion};
use survivor_bt::{BehaviorTree, BtNode, Condition, DefaultAction, Selector, Sequence};
use survivor_core::{Blackboard, TickContext, WorldMut, WorldView};

#[derive(Default)]
struct World;

impl WorldView for World {}

impl WorldMut for World {}

fn always_true(_ctx: &TickContext, _world: &World, _bb: &mut Blackboard) -> bool {
    true
}

fn always_false(_ctx: &TickContext, _world: &World, _bb: &mut Blackboard) -> bool {
    false
}

fn noop(_ctx: &TickContext, _world: &mut World, _bb: &mut Blackboard) {}

fn bench_bt_tick(c: &mut Criterion) {
    // 16 guarded branches that each pass 7 guards and fail on the 8th, then the fallback.
    let mut branches: Vec<Box<dyn BtNode<World>>> = (0..16)
        .map(|_| {
            let mut guards: Vec<Box<dyn BtNode<World>>> = (0..7)
                .map(|_| Box::new(Condition::new("pass", always_true)) as Box<dyn BtNode<World>>)
                .collect();
            guards.push(Box::new(Condition::new("fail", always_false)));
            Box::new(Sequence::new(guards)) as Box<dyn BtNode<World>>
        })
        .collect();
    branches.push(Box::new(DefaultAction::new("fallback", noop)));

    let mut tree = match BehaviorTree::new(Selector::new(branches)) {
        Ok(tree) => tree,
        Err(err) => panic!("bench tree is invalid: {err}"),
    };
    let mut world = World;
    let mut bb = Blackboard::new();

    let mut tick: u64 = 0;
    c.bench_function("survivor-bt/tick(branches=16,guards=8)", |b| {
        b.iter(|| {
            let ctx = TickContext::new(tick, 0.016, 0);
            black_box(tree.tick(&ctx, &mut world, &mut bb));
            tick = tick.wrapping_add(1);
        })
    });
}

criterion_group!(benches, bench_bt_tick);
criterion_main!(benches);
