//! Platform abstraction layer
//!
//! Host adapters (browser, native) feed these instead of touching the
//! simulation directly:
//! - Input: held-direction key state
//! - Prompt: asking the player for a leaderboard name

pub mod input;
pub mod prompt;

pub use input::{Controls, Direction};
pub use prompt::{FixedName, NamePrompt, resolve_name};
