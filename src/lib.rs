//! Cell Race - A single-screen arcade race to the egg
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, steering, collisions, levels)
//! - `engine`: Owned game aggregate with lifecycle and score recording
//! - `runner`: Cooperative frame loop driven by the host scheduler
//! - `platform`: Input and name-prompt seams for host adapters
//! - `persistence`: High score storage backends
//! - `tuning`: Data-driven game balance

pub mod engine;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod runner;
pub mod sim;
pub mod tuning;

pub use engine::{Engine, InitError};
pub use highscores::{HighScores, ScoreEntry};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player spawn x (y is canvas center)
    pub const SPAWN_X: f32 = 50.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 8.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_TRAIL_LENGTH: usize = 10;
    /// Velocity multiplier while speed boost is active
    pub const SPEED_BOOST_MULTIPLIER: f32 = 1.5;

    /// Competitor defaults
    pub const COMPETITOR_RADIUS: f32 = 6.0;
    pub const COMPETITOR_TRAIL_LENGTH: usize = 5;
    pub const COMPETITOR_MIN_SPEED: f32 = 1.0;
    pub const COMPETITOR_MAX_SPEED: f32 = 2.0;
    /// Chance per frame a competitor corrects course toward the goal
    pub const STEER_CHANCE: f32 = 0.05;
    /// Fraction of the bearing to the goal blended into the heading
    pub const STEER_BLEND: f32 = 0.3;

    /// Entities are placed right of this x so the spawn area stays clear
    pub const SPAWN_CLEAR_X: f32 = 250.0;
    /// Right-hand margin for placed entities
    pub const PLACEMENT_MARGIN: f32 = 50.0;

    pub const OBSTACLE_MIN_RADIUS: f32 = 10.0;
    pub const OBSTACLE_MAX_RADIUS: f32 = 30.0;
    pub const ENERGY_BOOST_RADIUS: f32 = 8.0;
    pub const POWERUP_RADIUS: f32 = 10.0;

    /// Per-level entity counts
    pub const OBSTACLES_PER_LEVEL: u32 = 3;
    pub const COMPETITORS_PER_LEVEL: u32 = 2;
    pub const ENERGY_BOOST_COUNT: u32 = 3;
    pub const POWERUP_COUNT: u32 = 2;
    /// Upper bound accepted for any per-level count in tuning
    pub const MAX_ENTITIES_PER_LEVEL: u32 = 256;

    /// Goal (egg) sits this far in from the right edge
    pub const GOAL_INSET: f32 = 50.0;
    pub const GOAL_RADIUS: f32 = 30.0;

    /// Energy economy
    pub const MAX_ENERGY: f32 = 100.0;
    pub const ENERGY_DRAIN_PER_FRAME: f32 = 0.1;
    pub const OBSTACLE_PENALTY: f32 = 10.0;
    /// Recoil is `velocity * OBSTACLE_RECOIL` pushed backwards
    pub const OBSTACLE_RECOIL: f32 = 2.0;
    pub const ENERGY_BOOST_AMOUNT: f32 = 30.0;
    pub const LEVEL_COMPLETE_BONUS: f32 = 50.0;

    /// Power-up duration (5 seconds at 60 fps)
    pub const POWERUP_DURATION_FRAMES: u32 = 300;
    /// Power-up indicators blink for the last 2 seconds
    pub const POWERUP_BLINK_FRAMES: u32 = 120;

    /// Proximity warning shown above this intensity
    pub const PROXIMITY_WARNING_THRESHOLD: f32 = 0.3;
}

/// Score for a level and energy pair: `floor(level * 1000 + energy * 10)`
#[inline]
pub fn score_for(level: u32, energy: f32) -> u64 {
    let raw = level as f64 * 1000.0 + energy as f64 * 10.0;
    raw.floor().max(0.0) as u64
}
