use survivor_core::{Blackboard, TickContext, WorldMut};
use tracing::trace;

use crate::bt::{BtNode, BtStatus, LeafContract, LeafKind};

/// AND composite: stops at the first child that does not succeed.
pub struct Sequence<W>
where
    W: WorldMut + 'static,
{
    children: Vec<Box<dyn BtNode<W>>>,
}

impl<W> Sequence<W>
where
    W: WorldMut + 'static,
{
    pub fn new(children: Vec<Box<dyn BtNode<W>>>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<W> BtNode<W> for Sequence<W>
where
    W: WorldMut + 'static,
{
    fn tick(&mut self, ctx: &TickContext, world: &mut W, blackboard: &mut Blackboard) -> BtStatus {
        for child in self.children.iter_mut() {
            match child.tick(ctx, world, blackboard) {
                BtStatus::Success => continue,
                other => return other,
            }
        }
        BtStatus::Success
    }

    fn is_unconditional(&self) -> bool {
        self.children.iter().all(|c| c.is_unconditional())
    }

    fn contracts(&self, out: &mut Vec<LeafContract>) {
        for child in &self.children {
            child.contracts(out);
        }
    }
}

/// OR composite: children are ordered from highest to lowest priority and the
/// first one that does not fail wins.
pub struct Selector<W>
where
    W: WorldMut + 'static,
{
    children: Vec<Box<dyn BtNode<W>>>,
}

impl<W> Selector<W>
where
    W: WorldMut + 'static,
{
    pub fn new(children: Vec<Box<dyn BtNode<W>>>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn last_child(&self) -> Option<&dyn BtNode<W>> {
        self.children.last().map(|c| c.as_ref())
    }
}

impl<W> BtNode<W> for Selector<W>
where
    W: WorldMut + 'static,
{
    fn tick(&mut self, ctx: &TickContext, world: &mut W, blackboard: &mut Blackboard) -> BtStatus {
        for child in self.children.iter_mut() {
            match child.tick(ctx, world, blackboard) {
                BtStatus::Failure => continue,
                other => return other,
            }
        }
        BtStatus::Failure
    }

    fn is_unconditional(&self) -> bool {
        self.children.iter().any(|c| c.is_unconditional())
    }

    fn contracts(&self, out: &mut Vec<LeafContract>) {
        for child in &self.children {
            child.contracts(out);
        }
    }
}

/// Guard leaf: a predicate over the host and blackboard.
///
/// The predicate may write derived facts (a cached target, the wanted item
/// kind) for siblings evaluated later in the same tick.
pub struct Condition<F> {
    contract: LeafContract,
    cond: F,
}

impl<F> Condition<F> {
    pub fn new(name: &'static str, cond: F) -> Self {
        Self {
            contract: LeafContract::new(name, LeafKind::Condition),
            cond,
        }
    }

    pub fn reads(mut self, keys: &[&'static str]) -> Self {
        self.contract.reads.extend_from_slice(keys);
        self
    }

    pub fn writes(mut self, keys: &[&'static str]) -> Self {
        self.contract.writes.extend_from_slice(keys);
        self
    }
}

impl<F, W> BtNode<W> for Condition<F>
where
    F: FnMut(&TickContext, &W, &mut Blackboard) -> bool + 'static,
    W: WorldMut + 'static,
{
    fn tick(&mut self, ctx: &TickContext, world: &mut W, blackboard: &mut Blackboard) -> BtStatus {
        let status = BtStatus::from((self.cond)(ctx, &*world, blackboard));
        trace!(leaf = self.contract.name, ?status, "condition");
        status
    }

    fn contracts(&self, out: &mut Vec<LeafContract>) {
        out.push(self.contract.clone());
    }
}

/// Side-effecting leaf: may mutate the host and the blackboard.
pub struct Action<F> {
    contract: LeafContract,
    act: F,
}

impl<F> Action<F> {
    pub fn new(name: &'static str, act: F) -> Self {
        Self {
            contract: LeafContract::new(name, LeafKind::Action),
            act,
        }
    }

    pub fn reads(mut self, keys: &[&'static str]) -> Self {
        self.contract.reads.extend_from_slice(keys);
        self
    }

    pub fn writes(mut self, keys: &[&'static str]) -> Self {
        self.contract.writes.extend_from_slice(keys);
        self
    }
}

impl<F, W> BtNode<W> for Action<F>
where
    F: FnMut(&TickContext, &mut W, &mut Blackboard) -> BtStatus + 'static,
    W: WorldMut + 'static,
{
    fn tick(&mut self, ctx: &TickContext, world: &mut W, blackboard: &mut Blackboard) -> BtStatus {
        let status = (self.act)(ctx, world, blackboard);
        trace!(leaf = self.contract.name, ?status, "action");
        status
    }

    fn contracts(&self, out: &mut Vec<LeafContract>) {
        out.push(self.contract.clone());
    }
}

/// Fallback leaf: runs its effect and always succeeds.
///
/// A root selector must end with one of these (directly or nested) so every
/// tick resolves to a chosen behavior.
pub struct DefaultAction<F> {
    contract: LeafContract,
    act: F,
}

impl<F> DefaultAction<F> {
    pub fn new(name: &'static str, act: F) -> Self {
        Self {
            contract: LeafContract::new(name, LeafKind::Default),
            act,
        }
    }

    pub fn reads(mut self, keys: &[&'static str]) -> Self {
        self.contract.reads.extend_from_slice(keys);
        self
    }

    pub fn writes(mut self, keys: &[&'static str]) -> Self {
        self.contract.writes.extend_from_slice(keys);
        self
    }
}

impl<F, W> BtNode<W> for DefaultAction<F>
where
    F: FnMut(&TickContext, &mut W, &mut Blackboard) + 'static,
    W: WorldMut + 'static,
{
    fn tick(&mut self, ctx: &TickContext, world: &mut W, blackboard: &mut Blackboard) -> BtStatus {
        (self.act)(ctx, world, blackboard);
        trace!(leaf = self.contract.name, "default");
        BtStatus::Success
    }

    fn is_unconditional(&self) -> bool {
        true
    }

    fn contracts(&self, out: &mut Vec<LeafContract>) {
        out.push(self.contract.clone());
    }
}
