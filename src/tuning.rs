//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Defaults come from
//! [`crate::consts`]; a JSON document may override any subset of fields.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Tuning failed to load or validate
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning parse error")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(&'static str),
}

/// Game balance and layout parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Canvas ===
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub spawn_x: f32,

    // === Player ===
    pub player_radius: f32,
    pub player_speed: f32,
    pub player_trail_length: usize,
    pub speed_boost_multiplier: f32,

    // === Competitors ===
    pub competitor_radius: f32,
    pub competitor_trail_length: usize,
    pub competitor_min_speed: f32,
    pub competitor_max_speed: f32,
    pub steer_chance: f32,
    pub steer_blend: f32,

    // === Level layout ===
    pub spawn_clear_x: f32,
    pub placement_margin: f32,
    pub obstacle_min_radius: f32,
    pub obstacle_max_radius: f32,
    pub energy_boost_radius: f32,
    pub powerup_radius: f32,
    pub obstacles_per_level: u32,
    pub competitors_per_level: u32,
    pub energy_boost_count: u32,
    pub powerup_count: u32,
    pub goal_inset: f32,
    pub goal_radius: f32,

    // === Energy economy ===
    pub max_energy: f32,
    pub energy_drain: f32,
    pub obstacle_penalty: f32,
    pub obstacle_recoil: f32,
    pub energy_boost_amount: f32,
    pub level_complete_bonus: f32,

    // === Power-ups ===
    pub powerup_duration: u32,
    pub powerup_blink_frames: u32,

    // === Presentation cues ===
    pub proximity_warning_threshold: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            spawn_x: SPAWN_X,

            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            player_trail_length: PLAYER_TRAIL_LENGTH,
            speed_boost_multiplier: SPEED_BOOST_MULTIPLIER,

            competitor_radius: COMPETITOR_RADIUS,
            competitor_trail_length: COMPETITOR_TRAIL_LENGTH,
            competitor_min_speed: COMPETITOR_MIN_SPEED,
            competitor_max_speed: COMPETITOR_MAX_SPEED,
            steer_chance: STEER_CHANCE,
            steer_blend: STEER_BLEND,

            spawn_clear_x: SPAWN_CLEAR_X,
            placement_margin: PLACEMENT_MARGIN,
            obstacle_min_radius: OBSTACLE_MIN_RADIUS,
            obstacle_max_radius: OBSTACLE_MAX_RADIUS,
            energy_boost_radius: ENERGY_BOOST_RADIUS,
            powerup_radius: POWERUP_RADIUS,
            obstacles_per_level: OBSTACLES_PER_LEVEL,
            competitors_per_level: COMPETITORS_PER_LEVEL,
            energy_boost_count: ENERGY_BOOST_COUNT,
            powerup_count: POWERUP_COUNT,
            goal_inset: GOAL_INSET,
            goal_radius: GOAL_RADIUS,

            max_energy: MAX_ENERGY,
            energy_drain: ENERGY_DRAIN_PER_FRAME,
            obstacle_penalty: OBSTACLE_PENALTY,
            obstacle_recoil: OBSTACLE_RECOIL,
            energy_boost_amount: ENERGY_BOOST_AMOUNT,
            level_complete_bonus: LEVEL_COMPLETE_BONUS,

            powerup_duration: POWERUP_DURATION_FRAMES,
            powerup_blink_frames: POWERUP_BLINK_FRAMES,

            proximity_warning_threshold: PROXIMITY_WARNING_THRESHOLD,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that the parameters describe a playable layout
    pub fn validate(&self) -> Result<(), TuningError> {
        let finite = [
            self.canvas_width,
            self.canvas_height,
            self.spawn_x,
            self.player_radius,
            self.player_speed,
            self.speed_boost_multiplier,
            self.competitor_radius,
            self.competitor_min_speed,
            self.competitor_max_speed,
            self.steer_chance,
            self.steer_blend,
            self.spawn_clear_x,
            self.placement_margin,
            self.obstacle_min_radius,
            self.obstacle_max_radius,
            self.energy_boost_radius,
            self.powerup_radius,
            self.goal_inset,
            self.goal_radius,
            self.max_energy,
            self.energy_drain,
            self.obstacle_penalty,
            self.obstacle_recoil,
            self.energy_boost_amount,
            self.level_complete_bonus,
            self.proximity_warning_threshold,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(TuningError::Invalid("all values must be finite"));
        }
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return Err(TuningError::Invalid("canvas must have positive size"));
        }
        if self.spawn_clear_x + self.placement_margin >= self.canvas_width {
            return Err(TuningError::Invalid(
                "canvas too narrow for the placement band",
            ));
        }
        if self.player_radius <= 0.0
            || self.competitor_radius <= 0.0
            || self.goal_radius <= 0.0
            || self.energy_boost_radius <= 0.0
            || self.powerup_radius <= 0.0
        {
            return Err(TuningError::Invalid("radii must be positive"));
        }
        if self.player_radius * 2.0 > self.canvas_width.min(self.canvas_height) {
            return Err(TuningError::Invalid("player does not fit on the canvas"));
        }
        if self.obstacle_min_radius <= 0.0 || self.obstacle_min_radius >= self.obstacle_max_radius
        {
            return Err(TuningError::Invalid("obstacle radius range is empty"));
        }
        if self.competitor_min_speed < 0.0
            || self.competitor_min_speed >= self.competitor_max_speed
        {
            return Err(TuningError::Invalid("competitor speed range is empty"));
        }
        if !(0.0..=1.0).contains(&self.steer_chance) || !(0.0..=1.0).contains(&self.steer_blend) {
            return Err(TuningError::Invalid("steering factors must be in [0, 1]"));
        }
        if self.max_energy <= 0.0 || self.energy_drain < 0.0 {
            return Err(TuningError::Invalid("energy economy is degenerate"));
        }
        if self.obstacle_penalty < 0.0
            || self.obstacle_recoil < 0.0
            || self.energy_boost_amount < 0.0
            || self.level_complete_bonus < 0.0
            || self.speed_boost_multiplier < 0.0
        {
            return Err(TuningError::Invalid(
                "penalties, bonuses and multipliers must not be negative",
            ));
        }
        if [
            self.obstacles_per_level,
            self.competitors_per_level,
            self.energy_boost_count,
            self.powerup_count,
        ]
        .iter()
        .any(|&count| count > MAX_ENTITIES_PER_LEVEL)
        {
            return Err(TuningError::Invalid("too many entities per level"));
        }
        if self.player_trail_length == 0 || self.competitor_trail_length == 0 {
            return Err(TuningError::Invalid("trails must hold at least one point"));
        }
        Ok(())
    }

    /// Player spawn point (left-center)
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(self.spawn_x, self.canvas_height / 2.0)
    }

    /// Goal center (right-center)
    pub fn goal_position(&self) -> Vec2 {
        Vec2::new(self.canvas_width - self.goal_inset, self.canvas_height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "energy_drain": 0.2, "powerup_count": 4 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.energy_drain, 0.2);
        assert_eq!(tuning.powerup_count, 4);
        assert_eq!(tuning.canvas_width, CANVAS_WIDTH);
        assert_eq!(tuning.goal_radius, GOAL_RADIUS);
    }

    #[test]
    fn test_rejects_narrow_canvas() {
        let err = Tuning::from_json(r#"{ "canvas_width": 280.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_empty_speed_range() {
        let tuning = Tuning {
            competitor_min_speed: 2.0,
            competitor_max_speed: 2.0,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_economy() {
        for json in [
            r#"{ "obstacle_penalty": -10.0 }"#,
            r#"{ "obstacle_recoil": -2.0 }"#,
            r#"{ "energy_boost_amount": -30.0 }"#,
            r#"{ "level_complete_bonus": -50.0 }"#,
            r#"{ "speed_boost_multiplier": -1.5 }"#,
        ] {
            let err = Tuning::from_json(json).unwrap_err();
            assert!(matches!(err, TuningError::Invalid(_)), "{json} accepted");
        }
    }

    #[test]
    fn test_rejects_huge_entity_counts() {
        let tuning = Tuning {
            obstacles_per_level: u32::MAX / 2 + 1,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_err());

        let tuning = Tuning {
            powerup_count: MAX_ENTITIES_PER_LEVEL + 1,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_err());

        let tuning = Tuning {
            competitors_per_level: MAX_ENTITIES_PER_LEVEL,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_spawn_and_goal_positions() {
        let tuning = Tuning::default();
        assert_eq!(tuning.spawn_point(), Vec2::new(50.0, 300.0));
        assert_eq!(tuning.goal_position(), Vec2::new(750.0, 300.0));
    }
}
