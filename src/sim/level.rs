//! Level generation
//!
//! Every level is rebuilt from scratch; nothing carries over except the
//! player, energy and the level counter.

use std::f32::consts::FRAC_PI_4;

use glam::Vec2;
use rand::Rng;

use super::state::{Competitor, EnergyBoost, GameState, Obstacle, Powerup, PowerupKind};

/// Regenerate obstacles, competitors, boosts and power-ups for `state.level`
pub fn setup_level(state: &mut GameState) {
    let level = state.level;
    let tuning = state.tuning.clone();
    let rng = &mut state.rng;

    // Placed entities stay right of the spawn area
    let band_x = tuning.spawn_clear_x..(tuning.canvas_width - tuning.placement_margin);
    let band_y = 0.0..tuning.canvas_height;

    state.obstacles.clear();
    state.competitors.clear();
    state.energy_boosts.clear();
    state.powerups.clear();
    state.goal.reached = false;

    for _ in 0..level.saturating_mul(tuning.obstacles_per_level) {
        state.obstacles.push(Obstacle {
            pos: Vec2::new(
                rng.random_range(band_x.clone()),
                rng.random_range(band_y.clone()),
            ),
            radius: rng.random_range(tuning.obstacle_min_radius..tuning.obstacle_max_radius),
        });
    }

    // Competitors all start on the left edge, heading roughly right
    for _ in 0..level.saturating_mul(tuning.competitors_per_level) {
        let pos = Vec2::new(tuning.spawn_x, rng.random_range(band_y.clone()));
        state.competitors.push(Competitor {
            pos,
            radius: tuning.competitor_radius,
            speed: rng.random_range(tuning.competitor_min_speed..tuning.competitor_max_speed),
            angle: rng.random_range(-FRAC_PI_4..FRAC_PI_4),
            trail: Vec::with_capacity(tuning.competitor_trail_length + 1),
            distance_to_goal: pos.distance(state.goal.pos),
        });
    }

    for _ in 0..tuning.energy_boost_count {
        state.energy_boosts.push(EnergyBoost {
            pos: Vec2::new(
                rng.random_range(band_x.clone()),
                rng.random_range(band_y.clone()),
            ),
            radius: tuning.energy_boost_radius,
            collected: false,
        });
    }

    for _ in 0..tuning.powerup_count {
        let pos = Vec2::new(
            rng.random_range(band_x.clone()),
            rng.random_range(band_y.clone()),
        );
        let kind = PowerupKind::ALL[rng.random_range(0..PowerupKind::ALL.len())];
        state.powerups.push(Powerup {
            pos,
            radius: tuning.powerup_radius,
            kind,
            collected: false,
        });
    }

    log::debug!(
        "Level {} setup: {} obstacles, {} competitors, {} boosts, {} powerups",
        level,
        state.obstacles.len(),
        state.competitors.len(),
        state.energy_boosts.len(),
        state.powerups.len()
    );
}
