//! Decision configuration, loadable from YAML.
//!
//! Every policy constant lives here. Squared-distance fields are compared
//! against squared distances directly.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use survivor_steering::SteeringConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Energy at or below which the agent looks for food.
    #[serde(default = "default_hunger_threshold")]
    pub hunger_threshold: f32,

    /// Health at or below which the agent looks for a medkit.
    #[serde(default = "default_injury_threshold")]
    pub injury_threshold: f32,

    /// Upper bound of energy and health. Consumables that would overshoot it are kept.
    #[serde(default = "default_stat_max")]
    pub stat_max: f32,

    /// Enemies inside this radius put the agent in danger.
    #[serde(default = "default_danger_radius")]
    pub danger_radius: f32,

    /// Added to every perceived hazard radius.
    #[serde(default = "default_hazard_margin")]
    pub hazard_margin: f32,

    /// How far outside a (widened) hazard the agent starts escaping.
    #[serde(default = "default_hazard_alert_distance")]
    pub hazard_alert_distance: f32,

    /// Escape point distance beyond the hazard edge.
    #[serde(default = "default_hazard_escape_margin")]
    pub hazard_escape_margin: f32,

    /// Inward step taken when the agent crosses the world border.
    #[serde(default = "default_border_step")]
    pub border_step: f32,

    #[serde(default = "default_arrival_distance_sq")]
    pub arrival_distance_sq: f32,

    #[serde(default = "default_waypoint_visit_distance_sq")]
    pub waypoint_visit_distance_sq: f32,

    #[serde(default = "default_house_center_distance_sq")]
    pub house_center_distance_sq: f32,

    #[serde(default = "default_outside_reached_distance_sq")]
    pub outside_reached_distance_sq: f32,

    /// Distance between a house wall and the point the agent returns to after exploring it.
    #[serde(default = "default_house_exit_offset")]
    pub house_exit_offset: f32,

    /// Sideways step used to get out of a house the agent has lingered in.
    #[serde(default = "default_house_escape_step")]
    pub house_escape_step: f32,

    /// Seconds a bite-triggered turn lasts.
    #[serde(default = "default_turn_cooldown")]
    pub turn_cooldown: f32,

    /// Seconds inside a house before the agent forces its way out.
    #[serde(default = "default_house_cooldown")]
    pub house_cooldown: f32,

    /// Distance of the point behind the agent it pivots toward when bitten.
    #[serde(default = "default_turn_distance")]
    pub turn_distance: f32,

    /// Seconds of forced wandering after escaping a hazard.
    #[serde(default = "default_wander_duration")]
    pub wander_duration: f32,

    /// The explored-house list is cleared once it holds this many houses.
    #[serde(default = "default_explored_house_cap")]
    pub explored_house_cap: usize,

    #[serde(default = "default_waypoint_cell_size")]
    pub waypoint_cell_size: f32,

    /// Items of one non-weapon kind held before further ones are ignored.
    #[serde(default = "default_stock_limit")]
    pub stock_limit: usize,

    /// Squared distance from the end of the line of sight that still counts as on target.
    #[serde(default = "default_aim_tolerance_sq")]
    pub aim_tolerance_sq: f32,

    /// Stamina needed to start running after a bite.
    #[serde(default = "default_run_stamina_threshold")]
    pub run_stamina_threshold: f32,

    #[serde(default)]
    pub steering: SteeringConfig,
}

fn default_hunger_threshold() -> f32 {
    7.1
}
fn default_injury_threshold() -> f32 {
    8.1
}
fn default_stat_max() -> f32 {
    10.0
}
fn default_danger_radius() -> f32 {
    16.0
}
fn default_hazard_margin() -> f32 {
    10.0
}
fn default_hazard_alert_distance() -> f32 {
    10.0
}
fn default_hazard_escape_margin() -> f32 {
    3.0
}
fn default_border_step() -> f32 {
    5.0
}
fn default_arrival_distance_sq() -> f32 {
    10.0
}
fn default_waypoint_visit_distance_sq() -> f32 {
    15.0
}
fn default_house_center_distance_sq() -> f32 {
    5.5
}
fn default_outside_reached_distance_sq() -> f32 {
    2.5
}
fn default_house_exit_offset() -> f32 {
    4.0
}
fn default_house_escape_step() -> f32 {
    10.0
}
fn default_turn_cooldown() -> f32 {
    2.0
}
fn default_house_cooldown() -> f32 {
    5.0
}
fn default_turn_distance() -> f32 {
    2.0
}
fn default_wander_duration() -> f32 {
    5.0
}
fn default_explored_house_cap() -> usize {
    6
}
fn default_waypoint_cell_size() -> f32 {
    100.0
}
fn default_stock_limit() -> usize {
    2
}
fn default_aim_tolerance_sq() -> f32 {
    1.0
}
fn default_run_stamina_threshold() -> f32 {
    5.0
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            hunger_threshold: default_hunger_threshold(),
            injury_threshold: default_injury_threshold(),
            stat_max: default_stat_max(),
            danger_radius: default_danger_radius(),
            hazard_margin: default_hazard_margin(),
            hazard_alert_distance: default_hazard_alert_distance(),
            hazard_escape_margin: default_hazard_escape_margin(),
            border_step: default_border_step(),
            arrival_distance_sq: default_arrival_distance_sq(),
            waypoint_visit_distance_sq: default_waypoint_visit_distance_sq(),
            house_center_distance_sq: default_house_center_distance_sq(),
            outside_reached_distance_sq: default_outside_reached_distance_sq(),
            house_exit_offset: default_house_exit_offset(),
            house_escape_step: default_house_escape_step(),
            turn_cooldown: default_turn_cooldown(),
            house_cooldown: default_house_cooldown(),
            turn_distance: default_turn_distance(),
            wander_duration: default_wander_duration(),
            explored_house_cap: default_explored_house_cap(),
            waypoint_cell_size: default_waypoint_cell_size(),
            stock_limit: default_stock_limit(),
            aim_tolerance_sq: default_aim_tolerance_sq(),
            run_stamina_threshold: default_run_stamina_threshold(),
            steering: SteeringConfig::default(),
        }
    }
}

impl DecisionConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config")
    }
}
