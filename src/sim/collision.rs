//! Collision detection and response
//!
//! Everything is a circle, so every check is a center-distance test against
//! the sum of radii. Entity counts are small; no spatial partitioning.

use glam::Vec2;

use super::state::{GameEvent, GameState, PowerupKind};

/// Whether two circles overlap (touching does not count)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// Resolve every player collision for this frame
///
/// Order matters: obstacles, power-ups, energy boosts, then the goal. The
/// goal check runs last because completing a level rebuilds the entity lists.
pub fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let penalty = state.tuning.obstacle_penalty;
    let recoil = state.tuning.obstacle_recoil;
    let duration = state.tuning.powerup_duration;

    for i in 0..state.obstacles.len() {
        let obstacle = &state.obstacles[i];
        if !circles_overlap(state.player.pos, state.player.radius, obstacle.pos, obstacle.radius) {
            continue;
        }
        if !state.player.powerups.is_active(PowerupKind::Shield) {
            state.drain_energy(penalty);
            // Knocked back along the current input direction, every overlapping frame
            state.player.pos -= state.player.vel * recoil;
            events.push(GameEvent::ObstacleHit);
        }
    }

    let player = &mut state.player;
    for powerup in state.powerups.iter_mut().filter(|p| !p.collected) {
        if circles_overlap(player.pos, player.radius, powerup.pos, powerup.radius) {
            powerup.collected = true;
            player.powerups.grant(powerup.kind, duration);
            events.push(GameEvent::PowerupCollected(powerup.kind));
        }
    }

    let mut boosts = 0;
    for boost in state.energy_boosts.iter_mut().filter(|b| !b.collected) {
        if circles_overlap(state.player.pos, state.player.radius, boost.pos, boost.radius) {
            boost.collected = true;
            boosts += 1;
        }
    }
    for _ in 0..boosts {
        state.gain_energy(state.tuning.energy_boost_amount);
        events.push(GameEvent::EnergyCollected);
    }

    if circles_overlap(
        state.player.pos,
        state.player.radius,
        state.goal.pos,
        state.goal.radius,
    ) {
        level_complete(state, events);
    }
}

/// Advance to the next level unless someone already latched the goal
pub fn level_complete(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.goal.reached {
        return;
    }
    state.level += 1;
    state.gain_energy(state.tuning.level_complete_bonus);
    state.respawn_player();
    state.goal.reached = false;
    super::level::setup_level(state);

    log::info!("Level complete! Now on level {}", state.level);
    events.push(GameEvent::LevelComplete { level: state.level });
}
