//! Game state and core simulation types

use std::fmt;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::score_for;
use crate::tuning::{Tuning, TuningError};

/// Lifecycle phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for start (before the first run and after every loss)
    Idle,
    /// Active gameplay
    Running,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    /// Energy reached zero
    OutOfEnergy,
    /// A competitor reached the egg first
    Outraced,
    /// A frame failed and the run was abandoned
    Fault,
}

impl fmt::Display for LossReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfEnergy => write!(f, "You ran out of energy!"),
            Self::Outraced => write!(f, "Another cell reached the goal first!"),
            Self::Fault => write!(f, "An error occurred during gameplay"),
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    Speed,
    Shield,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 2] = [PowerupKind::Speed, PowerupKind::Shield];

    /// Single-letter label drawn on the pickup
    pub fn label(&self) -> char {
        match self {
            PowerupKind::Speed => 'S',
            PowerupKind::Shield => 'P',
        }
    }
}

/// Something that happened during a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstacleHit,
    PowerupCollected(PowerupKind),
    EnergyCollected,
    /// Player reached the egg; `level` is the new level
    LevelComplete { level: u32 },
    /// Run ended; state has already been reset to level 1
    GameOver {
        reason: LossReason,
        score: u64,
        level: u32,
    },
}

/// Remaining frames for each power-up effect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerupTimers {
    pub speed_boost: u32,
    pub shield: u32,
}

impl PowerupTimers {
    /// Count down every active timer by one frame
    pub fn tick(&mut self) {
        self.speed_boost = self.speed_boost.saturating_sub(1);
        self.shield = self.shield.saturating_sub(1);
    }

    /// Refresh a timer to at least `duration`, stacking on top of what remains
    pub fn grant(&mut self, kind: PowerupKind, duration: u32) {
        let timer = match kind {
            PowerupKind::Speed => &mut self.speed_boost,
            PowerupKind::Shield => &mut self.shield,
        };
        *timer = duration.max(timer.saturating_add(duration));
    }

    pub fn remaining(&self, kind: PowerupKind) -> u32 {
        match kind {
            PowerupKind::Speed => self.speed_boost,
            PowerupKind::Shield => self.shield,
        }
    }

    pub fn is_active(&self, kind: PowerupKind) -> bool {
        self.remaining(kind) > 0
    }
}

/// Push a position to the front of a trail, dropping the oldest beyond `max_len`
pub fn push_trail(trail: &mut Vec<Vec2>, pos: Vec2, max_len: usize) {
    trail.insert(0, pos);
    trail.truncate(max_len);
}

/// The player's cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Base speed; held input sets each velocity axis to ±speed
    pub speed: f32,
    pub vel: Vec2,
    /// Recent positions (newest first)
    pub trail: Vec<Vec2>,
    pub powerups: PowerupTimers,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.spawn_point(),
            radius: tuning.player_radius,
            speed: tuning.player_speed,
            vel: Vec2::ZERO,
            trail: Vec::with_capacity(tuning.player_trail_length + 1),
            powerups: PowerupTimers::default(),
        }
    }
}

/// A rival cell racing for the egg
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competitor {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    /// Heading in radians
    pub angle: f32,
    pub trail: Vec<Vec2>,
    /// Distance to the goal center as of the last frame
    pub distance_to_goal: f32,
}

impl Competitor {
    /// Proximity warning intensity in `(threshold, 1]`, or `None` when far away
    pub fn proximity_warning(&self, canvas_width: f32, threshold: f32) -> Option<f32> {
        let warning = (1.0 - self.distance_to_goal / (canvas_width / 2.0)).max(0.0);
        (warning > threshold).then_some(warning)
    }
}

/// A static hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub radius: f32,
}

/// One-shot energy pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyBoost {
    pub pos: Vec2,
    pub radius: f32,
    pub collected: bool,
}

/// One-shot power-up pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub pos: Vec2,
    pub radius: f32,
    pub kind: PowerupKind,
    pub collected: bool,
}

/// The egg
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub pos: Vec2,
    pub radius: f32,
    /// Latched by whoever reaches the egg first this level
    pub reached: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub level: u32,
    pub energy: f32,
    /// Score snapshot taken at the start of the last frame
    pub score: u64,
    /// Simulation frame counter for the current run
    pub frame: u64,
    pub player: Player,
    pub competitors: Vec<Competitor>,
    pub obstacles: Vec<Obstacle>,
    pub energy_boosts: Vec<EnergyBoost>,
    pub powerups: Vec<Powerup>,
    pub goal: Goal,
}

impl GameState {
    /// Create an idle game with level 1 laid out
    ///
    /// The tuning is validated first; level setup relies on its ranges.
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        let mut state = Self {
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            level: 1,
            energy: tuning.max_energy,
            score: 0,
            frame: 0,
            player: Player::new(&tuning),
            competitors: Vec::new(),
            obstacles: Vec::new(),
            energy_boosts: Vec::new(),
            powerups: Vec::new(),
            goal: Goal {
                pos: tuning.goal_position(),
                radius: tuning.goal_radius,
                reached: false,
            },
            tuning,
        };
        super::level::setup_level(&mut state);
        Ok(state)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Score for the current level and energy
    pub fn current_score(&self) -> u64 {
        score_for(self.level, self.energy)
    }

    /// Add energy, clamped to the maximum
    pub fn gain_energy(&mut self, amount: f32) {
        self.energy = (self.energy + amount).min(self.tuning.max_energy);
    }

    /// Remove energy, floored at zero
    pub fn drain_energy(&mut self, amount: f32) {
        self.energy = (self.energy - amount).max(0.0);
    }

    /// Move the player back to the spawn point
    pub fn respawn_player(&mut self) {
        self.player.pos = self.tuning.spawn_point();
    }

    /// Return to a fresh level-1 run (phase is left untouched)
    pub fn reset(&mut self) {
        self.energy = self.tuning.max_energy;
        self.level = 1;
        self.score = 0;
        self.frame = 0;
        self.respawn_player();
        self.player.vel = Vec2::ZERO;
        self.player.trail.clear();
        self.player.powerups = PowerupTimers::default();
        super::level::setup_level(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_level_one() {
        let state = GameState::new(Tuning::default(), 7).expect("state");
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.level, 1);
        assert_eq!(state.energy, 100.0);
        assert_eq!(state.player.pos, Vec2::new(50.0, 300.0));
        assert_eq!(state.goal.pos, Vec2::new(750.0, 300.0));
        assert!(!state.goal.reached);
    }

    #[test]
    fn test_new_rejects_unplayable_tuning() {
        let tuning = Tuning {
            canvas_width: 100.0,
            ..Tuning::default()
        };
        assert!(matches!(
            GameState::new(tuning, 7),
            Err(TuningError::Invalid(_))
        ));
    }

    #[test]
    fn test_powerup_grant_stacks() {
        let mut timers = PowerupTimers::default();
        timers.grant(PowerupKind::Speed, 300);
        assert_eq!(timers.speed_boost, 300);
        timers.grant(PowerupKind::Speed, 300);
        assert_eq!(timers.speed_boost, 600);
        assert_eq!(timers.shield, 0);
    }

    #[test]
    fn test_powerup_grant_after_partial_decay() {
        let mut timers = PowerupTimers::default();
        timers.grant(PowerupKind::Speed, 300);
        for _ in 0..250 {
            timers.tick();
        }
        assert_eq!(timers.speed_boost, 50);
        timers.grant(PowerupKind::Speed, 300);
        assert_eq!(timers.speed_boost, 350);
    }

    #[test]
    fn test_timers_never_go_negative() {
        let mut timers = PowerupTimers {
            speed_boost: 1,
            shield: 0,
        };
        assert!(timers.is_active(PowerupKind::Speed));
        assert!(!timers.is_active(PowerupKind::Shield));
        timers.tick();
        timers.tick();
        assert!(!timers.is_active(PowerupKind::Speed));
        assert_eq!(timers.speed_boost, 0);
        assert_eq!(timers.shield, 0);
    }

    #[test]
    fn test_push_trail_caps_length() {
        let mut trail = Vec::new();
        for i in 0..15 {
            push_trail(&mut trail, Vec2::new(i as f32, 0.0), 10);
        }
        assert_eq!(trail.len(), 10);
        assert_eq!(trail[0], Vec2::new(14.0, 0.0));
        assert_eq!(trail[9], Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_energy_clamps() {
        let mut state = GameState::new(Tuning::default(), 1).expect("state");
        state.gain_energy(30.0);
        assert_eq!(state.energy, 100.0);
        state.drain_energy(250.0);
        assert_eq!(state.energy, 0.0);
    }

    #[test]
    fn test_proximity_warning_threshold() {
        let mut comp = Competitor {
            pos: Vec2::ZERO,
            radius: 6.0,
            speed: 1.0,
            angle: 0.0,
            trail: Vec::new(),
            distance_to_goal: 400.0,
        };
        assert_eq!(comp.proximity_warning(800.0, 0.3), None);
        comp.distance_to_goal = 100.0;
        let warning = comp.proximity_warning(800.0, 0.3).expect("close enough");
        assert!((warning - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_loss_reason_messages() {
        assert_eq!(LossReason::OutOfEnergy.to_string(), "You ran out of energy!");
        assert_eq!(
            LossReason::Outraced.to_string(),
            "Another cell reached the goal first!"
        );
    }
}
