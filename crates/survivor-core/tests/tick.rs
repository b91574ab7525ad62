use survivor_core::{DeterministicRng, TickContext};

#[test]
fn tick_rng_is_reproducible_per_stream() {
    let ctx = TickContext::new(12, 0.1, 99);
    let a: Vec<u64> = {
        let mut rng = ctx.rng(1);
        (0..4).map(|_| rng.next_u64()).collect()
    };
    let b: Vec<u64> = {
        let mut rng = ctx.rng(1);
        (0..4).map(|_| rng.next_u64()).collect()
    };
    assert_eq!(a, b);

    let mut other = ctx.rng(2);
    assert_ne!(a[0], other.next_u64());
}

#[test]
fn next_advances_tick_only() {
    let ctx = TickContext::new(3, 0.25, 5);
    let next = ctx.next();
    assert_eq!(next.tick, 4);
    assert_eq!(next.dt_seconds, 0.25);
    assert_eq!(next.seed, 5);
}
