use survivor_core::{Blackboard, TickContext, WorldMut};

use crate::bt::{BtNode, BtStatus, LeafContract};
use crate::error::BtError;
use crate::nodes::Selector;

/// A validated tree rooted at a priority selector.
pub struct BehaviorTree<W>
where
    W: WorldMut + 'static,
{
    root: Selector<W>,
    last: Option<BtStatus>,
}

impl<W> BehaviorTree<W>
where
    W: WorldMut + 'static,
{
    /// Validate and wrap `root`.
    ///
    /// The root's last child must be unconditional, otherwise a tick could
    /// end without any behavior being chosen.
    pub fn new(root: Selector<W>) -> Result<Self, BtError> {
        let Some(last) = root.last_child() else {
            return Err(BtError::EmptyRoot);
        };
        if !last.is_unconditional() {
            return Err(BtError::NoFallback);
        }
        Ok(Self { root, last: None })
    }

    /// Walk the tree once, top-down, depth-first, left-to-right.
    pub fn tick(&mut self, ctx: &TickContext, world: &mut W, blackboard: &mut Blackboard) -> BtStatus {
        let status = self.root.tick(ctx, world, blackboard);
        self.last = Some(status);
        status
    }

    pub fn last_status(&self) -> Option<BtStatus> {
        self.last
    }

    pub fn contracts(&self) -> Vec<LeafContract> {
        let mut out = Vec::new();
        self.root.contracts(&mut out);
        out
    }
}
