//! Decision layer of the survivor agent.
//!
//! Each tick [`DecisionCore`] pulls facts from the host into its blackboard,
//! walks the prioritized behavior tree built by [`policy::build_tree`], and
//! hands the selected behavior and target to the steering set.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod controller;
pub mod error;
pub mod facts;
pub mod host;
pub mod houses;
pub mod inventory;
pub mod keys;
pub mod perception;
pub mod policy;
pub mod waypoints;

pub use config::DecisionConfig;
pub use controller::{DecisionCore, TickOutput};
pub use error::AgentError;
pub use facts::{
    AgentState, EnemyInfo, EnemyKind, EntityId, HazardZone, HouseInfo, ItemInfo, ItemKind,
    PerceivedEntity, WorldBounds,
};
pub use host::{AgentHost, AgentHostMut};
pub use houses::ExploredHouses;
pub use inventory::Inventory;
pub use waypoints::{Waypoint, WaypointGrid};
