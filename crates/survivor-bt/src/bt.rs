use survivor_core::{Blackboard, TickContext, WorldMut};

/// Result of evaluating a node.
///
/// `Running` is part of the contract even though the stock leaves resolve
/// within a single tick; composites propagate it unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BtStatus {
    Running,
    Success,
    Failure,
}

impl From<bool> for BtStatus {
    fn from(value: bool) -> Self {
        if value {
            BtStatus::Success
        } else {
            BtStatus::Failure
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    Condition,
    Action,
    Default,
}

/// Blackboard keys a leaf declares it reads and writes.
///
/// Composite ordering relies on earlier guards caching facts for later
/// siblings, so these declarations are checked by tests rather than trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafContract {
    pub name: &'static str,
    pub kind: LeafKind,
    pub reads: Vec<&'static str>,
    pub writes: Vec<&'static str>,
}

impl LeafContract {
    pub fn new(name: &'static str, kind: LeafKind) -> Self {
        Self {
            name,
            kind,
            reads: Vec::new(),
            writes: Vec::new(),
        }
    }
}

pub trait BtNode<W>: 'static
where
    W: WorldMut + 'static,
{
    fn tick(&mut self, ctx: &TickContext, world: &mut W, blackboard: &mut Blackboard) -> BtStatus;

    /// `true` when the node returns `Success` on every tick.
    fn is_unconditional(&self) -> bool {
        false
    }

    /// Append the contracts of every leaf below this node, in evaluation order.
    fn contracts(&self, out: &mut Vec<LeafContract>);
}
