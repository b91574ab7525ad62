//! Steering behaviors for the survivor agent.
//!
//! The decision layer picks a [`SteeringKind`] and a target; [`SteeringSet`]
//! turns them into a [`SteeringCommand`] for the host to apply. All behaviors
//! are pure functions of their inputs except wander, whose angle lives in
//! [`WanderState`] and persists across ticks.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod behaviors;
pub mod command;
pub mod error;
pub mod set;

pub use command::{AgentKinematics, SteeringCommand, SteeringTarget};
pub use error::UnknownSteeringKind;
pub use set::{PathService, SteeringConfig, SteeringKind, SteeringSet, StraightLine, WanderState};
