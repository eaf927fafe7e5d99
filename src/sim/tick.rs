//! Per-frame simulation tick
//!
//! Advances the game by exactly one frame. Step order is part of the game
//! rules: competitors are checked against the goal before the player is.

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;
use thiserror::Error;

use super::collision::{circles_overlap, resolve_collisions};
use super::state::{GameEvent, GamePhase, GameState, LossReason, PowerupKind, push_trail};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Held direction per axis, each component in {-1, 0, 1}
    pub axis: Vec2,
    /// Demo mode - steer automatically toward the goal
    pub autopilot: bool,
}

/// A frame left the simulation in a state it cannot continue from
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimError {
    #[error("non-finite {what} after frame {frame}")]
    NonFinite { what: &'static str, frame: u64 },
}

/// Advance the game state by one frame
///
/// Returns the events that occurred. A loss resets the state and moves it to
/// [`GamePhase::Idle`] before returning; the caller records the score.
pub fn tick(state: &mut GameState, input: &TickInput) -> Result<Vec<GameEvent>, SimError> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Running {
        return Ok(events);
    }
    state.frame += 1;

    let axis = if input.autopilot {
        autopilot_axis(state)
    } else {
        input.axis
    };
    state.player.vel = axis * state.player.speed;

    state.score = state.current_score();

    // Speed boost scales the step, not a max-speed cap
    let boost = if state.player.powerups.is_active(PowerupKind::Speed) {
        state.tuning.speed_boost_multiplier
    } else {
        1.0
    };
    state.player.pos += state.player.vel * boost;

    state.player.powerups.tick();

    let trail_len = state.tuning.player_trail_length;
    push_trail(&mut state.player.trail, state.player.pos, trail_len);

    let r = state.player.radius;
    state.player.pos = state.player.pos.clamp(
        Vec2::splat(r),
        Vec2::new(state.tuning.canvas_width - r, state.tuning.canvas_height - r),
    );

    if update_competitors(state) {
        state.goal.reached = true;
        lose(state, LossReason::Outraced, &mut events);
        return Ok(events);
    }

    resolve_collisions(state, &mut events);

    state.drain_energy(state.tuning.energy_drain);
    if state.energy <= 0.0 {
        lose(state, LossReason::OutOfEnergy, &mut events);
        return Ok(events);
    }

    check_integrity(state)?;
    Ok(events)
}

/// Move every competitor; returns true if one of them reached the goal
fn update_competitors(state: &mut GameState) -> bool {
    let width = state.tuning.canvas_width;
    let height = state.tuning.canvas_height;
    let trail_len = state.tuning.competitor_trail_length;
    let steer_chance = state.tuning.steer_chance;
    let blend = state.tuning.steer_blend;
    let goal = state.goal.pos;
    let goal_radius = state.goal.radius;

    for comp in state.competitors.iter_mut() {
        comp.pos += Vec2::new(comp.angle.cos(), comp.angle.sin()) * comp.speed;
        push_trail(&mut comp.trail, comp.pos, trail_len);

        // Occasional gradual course correction toward the egg
        if state.rng.random::<f32>() < steer_chance {
            let to_goal = goal - comp.pos;
            let angle_to_goal = to_goal.y.atan2(to_goal.x);
            comp.angle = comp.angle * (1.0 - blend) + angle_to_goal * blend;
        }

        // Bounce the heading, not the position
        if comp.pos.x < 0.0 || comp.pos.x > width {
            comp.angle = PI - comp.angle;
        }
        if comp.pos.y < 0.0 || comp.pos.y > height {
            comp.angle = -comp.angle;
        }

        comp.distance_to_goal = comp.pos.distance(goal);
        if comp.distance_to_goal < comp.radius + goal_radius && !state.goal.reached {
            return true;
        }
    }
    false
}

/// End the run: stop, report the final score, then reset to a fresh idle game
pub fn lose(state: &mut GameState, reason: LossReason, events: &mut Vec<GameEvent>) {
    let score = state.score;
    let level = state.level;
    state.phase = GamePhase::Idle;

    log::info!("Game over at level {}: {} (score {})", level, reason, score);
    events.push(GameEvent::GameOver {
        reason,
        score,
        level,
    });

    state.reset();
}

fn check_integrity(state: &GameState) -> Result<(), SimError> {
    let frame = state.frame;
    if !state.energy.is_finite() {
        return Err(SimError::NonFinite {
            what: "energy",
            frame,
        });
    }
    if !state.player.pos.is_finite() {
        return Err(SimError::NonFinite {
            what: "player position",
            frame,
        });
    }
    if state
        .competitors
        .iter()
        .any(|c| !c.pos.is_finite() || !c.angle.is_finite())
    {
        return Err(SimError::NonFinite {
            what: "competitor",
            frame,
        });
    }
    Ok(())
}

/// Demo steering: head for the egg, sidestep the nearest obstacle in the way
fn autopilot_axis(state: &GameState) -> Vec2 {
    let player = &state.player;
    let to_goal = state.goal.pos - player.pos;
    let mut desired = to_goal.normalize_or_zero();

    // Find the closest obstacle we're about to run into
    let lookahead = player.pos + desired * player.speed * 8.0;
    let threat = state
        .obstacles
        .iter()
        .filter(|o| circles_overlap(lookahead, player.radius * 2.0, o.pos, o.radius))
        .min_by(|a, b| {
            a.pos
                .distance_squared(player.pos)
                .partial_cmp(&b.pos.distance_squared(player.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(obstacle) = threat {
        if !player.powerups.is_active(PowerupKind::Shield) {
            // Dodge vertically, away from the obstacle center
            let away = if player.pos.y <= obstacle.pos.y { -1.0 } else { 1.0 };
            desired = Vec2::new(0.0, away);
        }
    }

    // Quantize to held-key style input
    let quantize = |v: f32| {
        if v > 0.3 {
            1.0
        } else if v < -0.3 {
            -1.0
        } else {
            0.0
        }
    };
    Vec2::new(quantize(desired.x), quantize(desired.y))
}
