//! High score leaderboard
//!
//! Tracks the top 10 runs by score. Storage is handled by a
//! [`ScoreStore`](crate::persistence::ScoreStore) backend.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// How many entries the on-screen score list shows
pub const DISPLAYED_SCORES: usize = 5;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u64,
}

/// High score leaderboard, sorted by descending score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<ScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from stored entries, restoring order and size limits
    pub fn from_entries(mut entries: Vec<ScoreEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    /// Record a run. Every run is appended; the list is then re-sorted and
    /// trimmed, so low scores fall off once the board is full.
    ///
    /// Returns the rank achieved (1-indexed) or None if it was trimmed.
    pub fn add_score(&mut self, name: impl Into<String>, score: u64) -> Option<usize> {
        // Stable sort keeps ties in insertion order, so older entries rank first
        let rank = self.entries.iter().filter(|e| e.score >= score).count();

        self.entries.push(ScoreEntry {
            name: name.into(),
            score,
        });
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);

        (rank < MAX_HIGH_SCORES).then_some(rank + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The best score, or 0 when nobody has played yet
    pub fn top_score(&self) -> u64 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }

    /// The first `n` entries
    pub fn top(&self, n: usize) -> &[ScoreEntry] {
        &self.entries[..n.min(self.entries.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_sorts_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score("a", 1500), Some(1));
        assert_eq!(scores.add_score("b", 2500), Some(1));
        assert_eq!(scores.add_score("c", 2000), Some(2));

        let order: Vec<_> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![2500, 2000, 1500]);
        assert_eq!(scores.top_score(), 2500);
    }

    #[test]
    fn test_keeps_top_ten() {
        let mut scores = HighScores::new();
        for i in 0..12u64 {
            scores.add_score(format!("p{i}"), 1000 + i * 100);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), 2100);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(1200));

        // Too low to stay on the board
        assert_eq!(scores.add_score("late", 1000), None);
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert!(scores.entries.iter().all(|e| e.name != "late"));
    }

    #[test]
    fn test_ties_rank_after_existing() {
        let mut scores = HighScores::new();
        scores.add_score("first", 1800);
        assert_eq!(scores.add_score("second", 1800), Some(2));
        assert_eq!(scores.entries[0].name, "first");
    }

    #[test]
    fn test_empty_board() {
        let scores = HighScores::new();
        assert!(scores.is_empty());
        assert_eq!(scores.top_score(), 0);
        assert!(scores.top(DISPLAYED_SCORES).is_empty());
    }

    #[test]
    fn test_top_n() {
        let mut scores = HighScores::new();
        for i in 0..8u64 {
            scores.add_score("x", i);
        }
        assert_eq!(scores.top(DISPLAYED_SCORES).len(), 5);
        assert_eq!(scores.top(DISPLAYED_SCORES)[0].score, 7);
    }

    #[test]
    fn test_from_entries_restores_order() {
        let scores = HighScores::from_entries(vec![
            ScoreEntry {
                name: "low".into(),
                score: 10,
            },
            ScoreEntry {
                name: "high".into(),
                score: 90,
            },
        ]);
        assert_eq!(scores.entries[0].name, "high");
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let mut scores = HighScores::new();
        scores.add_score("Ova", 2340);
        let json = serde_json::to_string(&scores).expect("serialize");
        assert_eq!(json, r#"[{"name":"Ova","score":2340}]"#);
    }
}
