//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to `tick` per frame
//! - Seeded RNG only
//! - Stable iteration order (entity lists are never reordered)
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, level_complete, resolve_collisions};
pub use level::setup_level;
pub use snapshot::{PowerupIndicator, ProximityCue, Snapshot};
pub use state::{
    Competitor, EnergyBoost, GameEvent, GamePhase, GameState, Goal, LossReason, Obstacle, Player,
    Powerup, PowerupKind, PowerupTimers,
};
pub use tick::{SimError, TickInput, lose, tick};
