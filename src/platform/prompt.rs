//! Name prompt for leaderboard entries

/// Name recorded when the player gives none
pub const DEFAULT_NAME: &str = "Anonymous";

/// Asks the player for a display name after a run ends
pub trait NamePrompt {
    /// `None` means the prompt was cancelled
    fn request_name(&mut self, score: u64) -> Option<String>;
}

/// Always answers with the same name (headless hosts, tests)
#[derive(Debug, Clone, Default)]
pub struct FixedName(pub Option<String>);

impl NamePrompt for FixedName {
    fn request_name(&mut self, _score: u64) -> Option<String> {
        self.0.clone()
    }
}

/// Empty or cancelled answers fall back to [`DEFAULT_NAME`]
pub fn resolve_name(answer: Option<String>) -> String {
    match answer {
        Some(name) if !name.is_empty() => name,
        _ => DEFAULT_NAME.to_string(),
    }
}
