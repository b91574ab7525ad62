//! Stateless steering transforms.
//!
//! Seek-family behaviors take the point to head for separately from the
//! target itself, so the caller can route around obstacles by passing the
//! next point on a planned path instead of the raw target position.

use core::f32::consts::{PI, TAU};

use survivor_core::DeterministicRng;
use survivor_nav::Vec2;

use crate::command::{AgentKinematics, SteeringCommand, SteeringTarget};

/// Full speed toward `point`.
pub fn seek(agent: &AgentKinematics, point: Vec2) -> SteeringCommand {
    let desired = (point - agent.position).normalize_or_zero() * agent.max_linear_speed;
    SteeringCommand::moving(desired)
}

/// Full speed away from `point`.
pub fn flee(agent: &AgentKinematics, point: Vec2) -> SteeringCommand {
    let mut out = seek(agent, point);
    out.linear_velocity = -out.linear_velocity;
    out
}

/// Seek `point`, slowing linearly once `target` is inside `slow_radius`.
pub fn arrive(agent: &AgentKinematics, point: Vec2, target: Vec2, slow_radius: f32) -> SteeringCommand {
    let mut out = seek(agent, point);
    let distance = agent.position.distance(target);
    if slow_radius > 0.0 && distance < slow_radius {
        out.linear_velocity = out.linear_velocity * (distance / slow_radius);
    }
    out
}

/// Where `target` will be by the time the agent could cover the distance to it.
pub fn predicted_position(agent: &AgentKinematics, target: &SteeringTarget) -> Vec2 {
    let distance = agent.position.distance(target.position);
    let lookahead = distance / agent.max_linear_speed.max(f32::EPSILON);
    target.position + target.velocity * lookahead
}

pub fn pursuit(agent: &AgentKinematics, target: &SteeringTarget) -> SteeringCommand {
    seek(agent, predicted_position(agent, target))
}

/// Flee the predicted position of `target`, but only while it is within `radius`.
pub fn evade(agent: &AgentKinematics, target: &SteeringTarget, radius: f32) -> SteeringCommand {
    if agent.position.distance_squared(target.position) > radius * radius {
        return SteeringCommand::default();
    }
    flee(agent, predicted_position(agent, target))
}

/// Turn on the spot toward `point`.
pub fn face(agent: &AgentKinematics, point: Vec2, gain: f32) -> SteeringCommand {
    let to_point = point - agent.position;
    let angular_velocity = if to_point.length_squared() <= f32::EPSILON {
        0.0
    } else {
        let error = wrap_angle(to_point.angle() - agent.heading_angle());
        (error * gain).clamp(-agent.max_angular_speed, agent.max_angular_speed)
    };
    SteeringCommand {
        linear_velocity: Vec2::ZERO,
        angular_velocity,
        auto_orient: false,
        run_mode: false,
    }
}

/// Seek `point` while spinning at a fixed rate, used to look behind while moving.
pub fn face_seek(agent: &AgentKinematics, point: Vec2, spin_rate: f32) -> SteeringCommand {
    let mut out = seek(agent, point);
    out.auto_orient = false;
    out.angular_velocity = spin_rate;
    out
}

/// Wander parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WanderParams {
    /// Distance from the agent to the center of the wander circle.
    pub offset: f32,
    pub radius: f32,
    /// Largest change of the wander angle per call, in degrees.
    pub max_angle_change: f32,
}

/// Head for a point on a circle ahead of the agent.
///
/// `angle_degrees` is nudged by at most half of `max_angle_change` either way
/// and kept for the next call.
pub fn wander<R: DeterministicRng>(
    agent: &AgentKinematics,
    angle_degrees: &mut f32,
    params: WanderParams,
    rng: &mut R,
) -> SteeringCommand {
    let half = params.max_angle_change.abs() / 2.0;
    *angle_degrees = rng.next_f32_range(*angle_degrees - half, *angle_degrees + half);

    let circle_center = agent.position + agent.heading() * params.offset;
    let on_circle = circle_center + Vec2::from_angle(angle_degrees.to_radians()) * params.radius;
    seek(agent, on_circle)
}

/// Wrap an angle in radians into `(-PI, PI]`.
pub fn wrap_angle(radians: f32) -> f32 {
    let wrapped = (radians + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}
