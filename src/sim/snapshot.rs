//! Read-only view of the game for presentation adapters

use glam::Vec2;
use serde::Serialize;

use super::state::{
    Competitor, EnergyBoost, GameState, Goal, Obstacle, Player, Powerup, PowerupKind,
};

/// Power-up indicator around the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerupIndicator {
    pub kind: PowerupKind,
    pub remaining: u32,
    /// Effect is about to run out
    pub blinking: bool,
}

/// Proximity cue for a competitor closing in on the egg
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProximityCue {
    pub pos: Vec2,
    pub radius: f32,
    /// Warning intensity (0-1)
    pub intensity: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    pub competitors: &'a [Competitor],
    pub energy_boosts: Vec<&'a EnergyBoost>,
    pub powerups: Vec<&'a Powerup>,
    pub goal: &'a Goal,
    pub energy: f32,
    pub level: u32,
    pub score: u64,
    pub indicators: Vec<PowerupIndicator>,
    pub proximity: Vec<ProximityCue>,
}

impl<'a> Snapshot<'a> {
    /// Capture the state; collected pickups are left out
    pub fn capture(state: &'a GameState) -> Self {
        let tuning = &state.tuning;

        let indicators = PowerupKind::ALL
            .iter()
            .filter_map(|&kind| {
                let remaining = state.player.powerups.remaining(kind);
                (remaining > 0).then_some(PowerupIndicator {
                    kind,
                    remaining,
                    blinking: remaining <= tuning.powerup_blink_frames,
                })
            })
            .collect();

        let proximity = state
            .competitors
            .iter()
            .filter_map(|c| {
                c.proximity_warning(tuning.canvas_width, tuning.proximity_warning_threshold)
                    .map(|intensity| ProximityCue {
                        pos: c.pos,
                        radius: c.radius,
                        intensity,
                    })
            })
            .collect();

        Self {
            player: &state.player,
            obstacles: &state.obstacles,
            competitors: &state.competitors,
            energy_boosts: state.energy_boosts.iter().filter(|b| !b.collected).collect(),
            powerups: state.powerups.iter().filter(|p| !p.collected).collect(),
            goal: &state.goal,
            energy: state.energy,
            level: state.level,
            score: state.score,
            indicators,
            proximity,
        }
    }

    /// Energy as shown on the HUD
    pub fn energy_display(&self) -> i32 {
        self.energy.round() as i32
    }
}
