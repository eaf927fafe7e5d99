//! Held-direction keyboard state
//!
//! Mirrors simple key toggling: pressing a direction sets that axis, releasing
//! either direction on an axis zeroes it. Opposing keys are not resolved; the
//! last event wins.

use glam::Vec2;

use crate::sim::TickInput;

/// A logical movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a DOM-style key name to a direction (arrows and WASD)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" => Some(Direction::Up),
            "ArrowDown" | "s" => Some(Direction::Down),
            "ArrowLeft" | "a" => Some(Direction::Left),
            "ArrowRight" | "d" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Current input state, updated by the host's key events
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Controls {
    axis: Vec2,
    autopilot: bool,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.axis.y = -1.0,
            Direction::Down => self.axis.y = 1.0,
            Direction::Left => self.axis.x = -1.0,
            Direction::Right => self.axis.x = 1.0,
        }
    }

    pub fn release(&mut self, direction: Direction) {
        match direction {
            Direction::Up | Direction::Down => self.axis.y = 0.0,
            Direction::Left | Direction::Right => self.axis.x = 0.0,
        }
    }

    /// Key-down by name; unknown keys are ignored
    pub fn key_down(&mut self, key: &str) {
        if let Some(direction) = Direction::from_key(key) {
            self.press(direction);
        }
    }

    /// Key-up by name; unknown keys are ignored
    pub fn key_up(&mut self, key: &str) {
        if let Some(direction) = Direction::from_key(key) {
            self.release(direction);
        }
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    /// Release every key
    pub fn clear(&mut self) {
        self.axis = Vec2::ZERO;
    }

    pub fn axis(&self) -> Vec2 {
        self.axis
    }

    pub fn to_tick_input(&self) -> TickInput {
        TickInput {
            axis: self.axis,
            autopilot: self.autopilot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Direction::from_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_key("s"), Some(Direction::Down));
        assert_eq!(Direction::from_key("a"), Some(Direction::Left));
        assert_eq!(Direction::from_key("ArrowRight"), Some(Direction::Right));
        assert_eq!(Direction::from_key("W"), None);
        assert_eq!(Direction::from_key(" "), None);
    }

    #[test]
    fn test_press_and_release() {
        let mut controls = Controls::new();
        controls.press(Direction::Right);
        controls.press(Direction::Up);
        assert_eq!(controls.axis(), Vec2::new(1.0, -1.0));

        controls.release(Direction::Right);
        assert_eq!(controls.axis(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_last_event_wins() {
        let mut controls = Controls::new();
        controls.key_down("w");
        controls.key_down("s");
        assert_eq!(controls.axis().y, 1.0);

        // Releasing the opposite key still zeroes the axis
        controls.key_up("w");
        assert_eq!(controls.axis().y, 0.0);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut controls = Controls::new();
        controls.key_down("d");
        controls.key_down("Shift");
        controls.key_up("Escape");
        assert_eq!(controls.axis(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_tick_input() {
        let mut controls = Controls::new();
        controls.press(Direction::Left);
        controls.set_autopilot(true);
        let input = controls.to_tick_input();
        assert_eq!(input.axis, Vec2::new(-1.0, 0.0));
        assert!(input.autopilot);

        controls.clear();
        assert_eq!(controls.axis(), Vec2::ZERO);
    }
}
