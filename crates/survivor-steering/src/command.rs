use core::f32::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};
use survivor_nav::Vec2;

/// Movement request for one tick.
///
/// With `auto_orient` set the host turns the agent to face its velocity and
/// ignores `angular_velocity`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteeringCommand {
    pub linear_velocity: Vec2,
    pub angular_velocity: f32,
    pub auto_orient: bool,
    pub run_mode: bool,
}

impl Default for SteeringCommand {
    fn default() -> Self {
        Self {
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            auto_orient: true,
            run_mode: false,
        }
    }
}

impl SteeringCommand {
    pub fn moving(linear_velocity: Vec2) -> Self {
        Self {
            linear_velocity,
            ..Self::default()
        }
    }
}

/// Point to steer relative to, with the velocity of whatever sits there.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SteeringTarget {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl SteeringTarget {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
        }
    }

    pub fn moving(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }
}

/// The agent's physical state as far as steering cares.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentKinematics {
    pub position: Vec2,
    /// Radians. An orientation of zero faces -Y.
    pub orientation: f32,
    pub linear_velocity: Vec2,
    pub max_linear_speed: f32,
    pub max_angular_speed: f32,
}

impl AgentKinematics {
    /// Angle of the facing direction, in world radians.
    pub fn heading_angle(&self) -> f32 {
        self.orientation - FRAC_PI_2
    }

    /// Unit vector the agent is facing.
    pub fn heading(&self) -> Vec2 {
        Vec2::from_angle(self.heading_angle())
    }
}
