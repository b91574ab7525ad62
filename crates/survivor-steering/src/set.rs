use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use survivor_core::TickContext;
use survivor_nav::Vec2;
use tracing::trace;

use crate::behaviors::{self, WanderParams};
use crate::command::{AgentKinematics, SteeringCommand, SteeringTarget};
use crate::error::UnknownSteeringKind;

const WANDER_STREAM: u64 = 0x5741_4e44;

/// The closed set of movement behaviors the decision layer can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SteeringKind {
    Seek,
    Flee,
    Arrive,
    Pursuit,
    Evade,
    Face,
    FaceSeek,
    #[default]
    Wander,
}

impl SteeringKind {
    pub const ALL: [SteeringKind; 8] = [
        SteeringKind::Seek,
        SteeringKind::Flee,
        SteeringKind::Arrive,
        SteeringKind::Pursuit,
        SteeringKind::Evade,
        SteeringKind::Face,
        SteeringKind::FaceSeek,
        SteeringKind::Wander,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SteeringKind::Seek => "Seek",
            SteeringKind::Flee => "Flee",
            SteeringKind::Arrive => "Arrive",
            SteeringKind::Pursuit => "Pursuit",
            SteeringKind::Evade => "Evade",
            SteeringKind::Face => "Face",
            SteeringKind::FaceSeek => "FaceSeek",
            SteeringKind::Wander => "Wander",
        }
    }

    /// Whether the behavior needs a target to produce movement.
    pub fn needs_target(self) -> bool {
        !matches!(self, SteeringKind::Wander)
    }
}

impl fmt::Display for SteeringKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SteeringKind {
    type Err = UnknownSteeringKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SteeringKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownSteeringKind(s.to_string()))
    }
}

/// Tuning for the steering behaviors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    /// Distance from the agent to the wander circle's center.
    #[serde(default = "default_wander_offset")]
    pub wander_offset: f32,

    #[serde(default = "default_wander_radius")]
    pub wander_radius: f32,

    /// Degrees per tick.
    #[serde(default = "default_wander_max_angle_change")]
    pub wander_max_angle_change: f32,

    /// Threats farther than this are ignored by evade.
    #[serde(default = "default_evade_radius")]
    pub evade_radius: f32,

    #[serde(default = "default_arrive_slow_radius")]
    pub arrive_slow_radius: f32,

    /// Angular velocity per radian of heading error when facing.
    #[serde(default = "default_face_gain")]
    pub face_gain: f32,

    /// Fixed angular velocity while turning and seeking at once.
    #[serde(default = "default_spin_rate")]
    pub spin_rate: f32,
}

fn default_wander_offset() -> f32 {
    30.0
}
fn default_wander_radius() -> f32 {
    10.0
}
fn default_wander_max_angle_change() -> f32 {
    10.0
}
fn default_evade_radius() -> f32 {
    200.0
}
fn default_arrive_slow_radius() -> f32 {
    20.0
}
fn default_face_gain() -> f32 {
    10.0
}
fn default_spin_rate() -> f32 {
    10.0
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            wander_offset: default_wander_offset(),
            wander_radius: default_wander_radius(),
            wander_max_angle_change: default_wander_max_angle_change(),
            evade_radius: default_evade_radius(),
            arrive_slow_radius: default_arrive_slow_radius(),
            face_gain: default_face_gain(),
            spin_rate: default_spin_rate(),
        }
    }
}

impl SteeringConfig {
    fn wander_params(&self) -> WanderParams {
        WanderParams {
            offset: self.wander_offset,
            radius: self.wander_radius,
            max_angle_change: self.wander_max_angle_change,
        }
    }
}

/// Wander angle carried from one tick to the next, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WanderState {
    angle_degrees: f32,
}

impl Default for WanderState {
    fn default() -> Self {
        Self {
            angle_degrees: 70.0,
        }
    }
}

impl WanderState {
    pub fn new(angle_degrees: f32) -> Self {
        Self { angle_degrees }
    }

    pub fn angle_degrees(&self) -> f32 {
        self.angle_degrees
    }

    /// Point the wander angle where the agent is facing.
    pub fn align_to(&mut self, agent: &AgentKinematics) {
        self.angle_degrees = agent.heading_angle().to_degrees();
    }
}

/// Maps a target to the next point worth heading for.
pub trait PathService {
    fn closest_path_point(&self, from: Vec2, to: Vec2) -> Vec2;
}

/// Heads straight for the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLine;

impl PathService for StraightLine {
    fn closest_path_point(&self, _from: Vec2, to: Vec2) -> Vec2 {
        to
    }
}

/// All steering behaviors plus the state they share across ticks.
#[derive(Debug, Clone, Default)]
pub struct SteeringSet {
    config: SteeringConfig,
    wander: WanderState,
}

impl SteeringSet {
    pub fn new(config: SteeringConfig) -> Self {
        Self {
            config,
            wander: WanderState::default(),
        }
    }

    pub fn config(&self) -> &SteeringConfig {
        &self.config
    }

    pub fn wander_state(&self) -> WanderState {
        self.wander
    }

    /// Run `kind` for this tick.
    ///
    /// Any behavior other than wander re-aligns the wander angle with the
    /// agent's heading, so wandering resumes straight ahead. A behavior that
    /// needs a target yields an idle command when there is none.
    pub fn compute<P>(
        &mut self,
        kind: SteeringKind,
        agent: &AgentKinematics,
        target: Option<&SteeringTarget>,
        ctx: &TickContext,
        path: &P,
    ) -> SteeringCommand
    where
        P: PathService + ?Sized,
    {
        if kind != SteeringKind::Wander {
            self.wander.align_to(agent);
        }

        let command = match (kind, target) {
            (SteeringKind::Wander, _) => {
                let mut rng = ctx.rng(WANDER_STREAM);
                behaviors::wander(
                    agent,
                    &mut self.wander.angle_degrees,
                    self.config.wander_params(),
                    &mut rng,
                )
            }
            (_, None) => SteeringCommand::default(),
            (SteeringKind::Seek, Some(t)) => {
                behaviors::seek(agent, path.closest_path_point(agent.position, t.position))
            }
            (SteeringKind::Flee, Some(t)) => {
                behaviors::flee(agent, path.closest_path_point(agent.position, t.position))
            }
            (SteeringKind::Arrive, Some(t)) => behaviors::arrive(
                agent,
                path.closest_path_point(agent.position, t.position),
                t.position,
                self.config.arrive_slow_radius,
            ),
            (SteeringKind::Pursuit, Some(t)) => behaviors::pursuit(agent, t),
            (SteeringKind::Evade, Some(t)) => behaviors::evade(agent, t, self.config.evade_radius),
            (SteeringKind::Face, Some(t)) => behaviors::face(agent, t.position, self.config.face_gain),
            (SteeringKind::FaceSeek, Some(t)) => behaviors::face_seek(
                agent,
                path.closest_path_point(agent.position, t.position),
                self.config.spin_rate,
            ),
        };

        trace!(kind = kind.as_str(), ?command, "steering");
        command
    }
}
