//! High score persistence
//!
//! The leaderboard is stored as a plain JSON list of `{name, score}` entries.
//! Backends:
//! - `MemoryStore`: in-process, for tests and ephemeral sessions
//! - `JsonFileStore`: a JSON file on disk (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)

use thiserror::Error;

use crate::highscores::ScoreEntry;

mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Storage failed
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage i/o error")]
    Io(#[from] std::io::Error),
    #[error("stored scores are corrupt")]
    Corrupt(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(&'static str),
}

/// Loads and saves the ranked score list
pub trait ScoreStore {
    /// Stored entries; an empty store yields an empty list
    fn load(&mut self) -> Result<Vec<ScoreEntry>, StoreError>;

    fn save(&mut self, entries: &[ScoreEntry]) -> Result<(), StoreError>;
}

/// Keeps scores in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub entries: Vec<ScoreEntry>,
    /// Number of successful saves
    pub saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<ScoreEntry>) -> Self {
        Self { entries, saves: 0 }
    }
}

impl ScoreStore for MemoryStore {
    fn load(&mut self) -> Result<Vec<ScoreEntry>, StoreError> {
        Ok(self.entries.clone())
    }

    fn save(&mut self, entries: &[ScoreEntry]) -> Result<(), StoreError> {
        self.entries = entries.to_vec();
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.load().expect("load").is_empty());

        let entries = vec![ScoreEntry {
            name: "Ova".into(),
            score: 2100,
        }];
        store.save(&entries).expect("save");
        assert_eq!(store.load().expect("load"), entries);
        assert_eq!(store.saves, 1);
    }
}
