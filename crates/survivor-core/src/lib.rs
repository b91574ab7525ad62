//! Shared fact store and tick primitives for the survivor decision core.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod blackboard;
pub mod error;
pub mod rng;
pub mod tick;
pub mod world;

pub use blackboard::{BbKey, Blackboard};
pub use error::{BlackboardError, Result};
pub use rng::{DeterministicRng, SplitMix64};
pub use tick::TickContext;
pub use world::{WorldMut, WorldView};
