//! Behavior tree engine built on `survivor-core`.
//!
//! The tree is walked once per tick from the root. Nodes keep no memory
//! between ticks; anything that has to persist lives in the blackboard.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod bt;
pub mod error;
pub mod nodes;
pub mod tree;

pub use bt::{BtNode, BtStatus, LeafContract, LeafKind};
pub use error::BtError;
pub use nodes::{Action, Condition, DefaultAction, Selector, Sequence};
pub use tree::BehaviorTree;
